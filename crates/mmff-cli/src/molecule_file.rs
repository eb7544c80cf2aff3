//! TOML molecule documents.
//!
//! ```toml
//! name = "water"
//!
//! [[atoms]]
//! element = "O"
//! position = [0.0, 0.0, 0.0]
//!
//! [[atoms]]
//! element = "H"
//! position = [0.96, 0.0, 0.0]
//! formal-charge = 0
//!
//! [[bonds]]
//! atoms = [0, 1]
//! order = "single"
//! ```
//!
//! `rings` (a list of atom-index lists) is optional; rings are perceived from the bonds
//! when it is absent.

use crate::error::{CliError, Result};
use anyhow::Context;
use mmff94::core::models::atom::{Atom, Element};
use mmff94::core::models::molecule::Molecule;
use mmff94::core::models::topology::{Bond, BondOrder};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AtomRecord {
    pub element: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub formal_charge: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondRecord {
    pub atoms: [usize; 2],
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    BondOrder::Single.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoleculeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<Vec<Vec<usize>>>,
    pub atoms: Vec<AtomRecord>,
    #[serde(default)]
    pub bonds: Vec<BondRecord>,
}

impl MoleculeDocument {
    pub fn read_from_path(path: &Path) -> Result<Self> {
        debug!("Reading molecule from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string(self).map_err(|e| CliError::FileWriting {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_molecule(molecule: &Molecule, name: Option<String>) -> Self {
        let atoms = molecule
            .atoms()
            .iter()
            .map(|atom| AtomRecord {
                element: atom.element.symbol().to_string(),
                position: [atom.position.x, atom.position.y, atom.position.z],
                formal_charge: atom.formal_charge,
            })
            .collect();
        let bonds = molecule
            .bonds()
            .iter()
            .map(|bond| BondRecord {
                atoms: [bond.i, bond.j],
                order: bond.order.to_string(),
            })
            .collect();
        Self {
            name,
            rings: None,
            atoms,
            bonds,
        }
    }

    /// Builds the molecule; `path` is only used to label errors.
    pub fn to_molecule(&self, path: &Path) -> Result<Molecule> {
        self.build().map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    fn build(&self) -> anyhow::Result<Molecule> {
        let atoms = self
            .atoms
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let element: Element = record
                    .element
                    .parse()
                    .with_context(|| format!("atom {index}"))?;
                let [x, y, z] = record.position;
                Ok(Atom::new(element, Point3::new(x, y, z)).with_formal_charge(record.formal_charge))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let bonds = self
            .bonds
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let order: BondOrder = record
                    .order
                    .parse()
                    .with_context(|| format!("bond {index}"))?;
                Ok(Bond::new(record.atoms[0], record.atoms[1], order))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let molecule = Molecule::new(atoms, bonds)?;
        match &self.rings {
            Some(rings) => Ok(molecule.with_rings(rings.clone())?),
            None => Ok(molecule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = r#"
name = "water"

[[atoms]]
element = "O"
position = [0.0, 0.0, 0.1173]

[[atoms]]
element = "H"
position = [0.0, 0.7572, -0.4692]

[[atoms]]
element = "h"
position = [0.0, -0.7572, -0.4692]

[[bonds]]
atoms = [0, 1]

[[bonds]]
atoms = [0, 2]
order = "single"
"#;

    #[test]
    fn parses_document_with_defaults() {
        let document: MoleculeDocument = toml::from_str(WATER).unwrap();
        assert_eq!(document.name.as_deref(), Some("water"));
        assert_eq!(document.atoms.len(), 3);
        assert_eq!(document.atoms[1].formal_charge, 0);
        assert_eq!(document.bonds[0].order, "single");

        let molecule = document.to_molecule(Path::new("water.toml")).unwrap();
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.atom(2).element, Element::HYDROGEN);
        assert_eq!(molecule.degree(0), 2);
    }

    #[test]
    fn unknown_element_names_the_atom() {
        let document: MoleculeDocument = toml::from_str(&WATER.replace("\"O\"", "\"Xx\"")).unwrap();
        let err = document.to_molecule(Path::new("bad.toml")).unwrap_err();
        let CliError::FileParsing { path, source } = err else {
            panic!("expected a parsing error");
        };
        assert_eq!(path, Path::new("bad.toml"));
        assert!(format!("{source:#}").contains("atom 0"));
    }

    #[test]
    fn out_of_range_bond_is_rejected() {
        let mut document: MoleculeDocument = toml::from_str(WATER).unwrap();
        document.bonds[1].atoms = [0, 7];
        assert!(document.to_molecule(Path::new("bad.toml")).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = WATER.replace("name = \"water\"", "title = \"water\"");
        assert!(toml::from_str::<MoleculeDocument>(&text).is_err());
    }

    #[test]
    fn written_file_reads_back_as_the_same_molecule() {
        let document: MoleculeDocument = toml::from_str(WATER).unwrap();
        let molecule = document.to_molecule(Path::new("water.toml")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.toml");
        MoleculeDocument::from_molecule(&molecule, Some("water".to_string()))
            .write_to_path(&path)
            .unwrap();

        let reread = MoleculeDocument::read_from_path(&path)
            .unwrap()
            .to_molecule(&path)
            .unwrap();
        assert_eq!(reread.atoms(), molecule.atoms());
        assert_eq!(reread.bonds(), molecule.bonds());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MoleculeDocument::read_from_path(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
