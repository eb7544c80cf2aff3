//! MMFF atom typing, ring aromaticity, topological separation and partial charges.
//!
//! [`MmffMolecule`] wraps an input [`Molecule`] together with everything the force
//! field derives from its connectivity. All of it is computed once in
//! [`MmffMolecule::new`] and never changes afterwards; only positions move.

pub mod aromaticity;
pub mod charges;
pub mod rules;
pub mod separation;

use self::rules::AtomEnvironment;
use self::separation::{Relation, Separation};
use crate::core::models::molecule::{Molecule, ring_contains_bond};
use crate::core::models::topology::BondOrder;
use crate::core::tables::error::ParameterError;
use crate::core::tables::props::AtomProps;
use crate::core::tables::{AtomType, Tables};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypingError {
    #[error("Atom {atom} ({element}) matches no MMFF atom type")]
    UnassignedType { atom: usize, element: &'static str },
    #[error("Aromaticity of rings {rings:?} could not be resolved")]
    UnresolvedAromaticity { rings: Vec<usize> },
    #[error("Parameter lookup failed while typing: {0}")]
    Parameter(#[from] ParameterError),
}

/// A molecule annotated with MMFF types, ring aromaticity, charges and separation.
#[derive(Debug, Clone)]
pub struct MmffMolecule {
    molecule: Molecule,
    types: Vec<AtomType>,
    symbols: Vec<&'static str>,
    props: Vec<AtomProps>,
    aromatic_rings: Vec<bool>,
    charges: Vec<f64>,
    separation: Separation,
}

impl MmffMolecule {
    #[instrument(skip_all, name = "mmff_typing")]
    pub fn new(molecule: &Molecule, tables: &Tables) -> Result<Self, TypingError> {
        let aromatic_rings = aromaticity::resolve_aromaticity(molecule)?;
        let (types, symbols) = assign_types(molecule, &aromatic_rings)?;
        let props = types
            .iter()
            .map(|&t| tables.props(t).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        let mut typed = Self {
            molecule: molecule.clone(),
            types,
            symbols,
            props,
            aromatic_rings,
            charges: Vec::new(),
            separation: Separation::new(molecule),
        };
        typed.charges =
            charges::partial_charges(molecule, &typed.types, |i, k| typed.bond_type(i, k), tables)?;

        debug!(
            atoms = typed.atom_count(),
            aromatic_rings = typed.aromatic_rings.iter().filter(|&&a| a).count(),
            "Assigned MMFF atom types"
        );
        Ok(typed)
    }

    #[inline]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.molecule.atom_count()
    }

    #[inline]
    pub fn atom_type(&self, atom: usize) -> AtomType {
        self.types[atom]
    }

    pub fn atom_types(&self) -> &[AtomType] {
        &self.types
    }

    pub fn symbol(&self, atom: usize) -> &'static str {
        self.symbols[atom]
    }

    #[inline]
    pub fn props(&self, atom: usize) -> &AtomProps {
        &self.props[atom]
    }

    pub fn ring_aromaticity(&self) -> &[bool] {
        &self.aromatic_rings
    }

    #[inline]
    pub fn partial_charge(&self, atom: usize) -> f64 {
        self.charges[atom]
    }

    pub fn partial_charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn separation(&self) -> &Separation {
        &self.separation
    }

    #[inline]
    pub fn relation(&self, a: usize, b: usize) -> Relation {
        self.separation.relation(a, b)
    }

    fn aromatic_ring_iter(&self) -> impl Iterator<Item = &Vec<usize>> {
        self.molecule
            .rings()
            .iter()
            .zip(&self.aromatic_rings)
            .filter(|&(_, &aromatic)| aromatic)
            .map(|(ring, _)| ring)
    }

    /// Whether the bond `a-b` lies inside a ring resolved as aromatic.
    pub fn is_aromatic_bond(&self, a: usize, b: usize) -> bool {
        self.aromatic_ring_iter()
            .any(|ring| ring_contains_bond(ring, a, b))
    }

    /// Bond order used for empirical rules, aromatic inside aromatic rings.
    pub fn effective_order(&self, a: usize, b: usize) -> BondOrder {
        if self.is_aromatic_bond(a, b) {
            BondOrder::Aromatic
        } else {
            self.molecule.bond_order(a, b).unwrap_or_default()
        }
    }

    /// MMFF bond type: 1 for a single bond joining two atoms that can both take part
    /// in conjugation, outside any aromatic ring; 0 otherwise.
    pub fn bond_type(&self, a: usize, b: usize) -> u8 {
        if self.molecule.bond_order(a, b) != Some(BondOrder::Single) || self.is_aromatic_bond(a, b)
        {
            return 0;
        }
        let conjugable =
            |p: &AtomProps| p.has_single_bond_multiplicity() || p.is_aromatic();
        u8::from(conjugable(&self.props[a]) && conjugable(&self.props[b]))
    }

    /// MMFF angle type for `i-j-k`, combining small-ring membership and bond types.
    pub fn angle_type(&self, i: usize, j: usize, k: usize) -> u8 {
        let sum = self.bond_type(i, j) + self.bond_type(j, k);
        match self.smallest_common_ring(&[i, j, k]) {
            Some(3) => [3, 5, 6][usize::from(sum)],
            Some(4) => [4, 7, 8][usize::from(sum)],
            _ => sum,
        }
    }

    /// MMFF stretch-bend type for `i-j-k`, oriented from `i`.
    pub fn stretch_bend_type(&self, i: usize, j: usize, k: usize) -> u8 {
        let bt_ij = self.bond_type(i, j);
        match self.angle_type(i, j, k) {
            1 => {
                if bt_ij == 1 {
                    1
                } else {
                    2
                }
            }
            2 => 3,
            3 => 6,
            4 => 5,
            5 => {
                if bt_ij == 1 {
                    7
                } else {
                    8
                }
            }
            6 => 9,
            7 => 10,
            8 => 11,
            _ => 0,
        }
    }

    /// MMFF torsion type for the chain `i-j-k-l`.
    pub fn torsion_type(&self, i: usize, j: usize, k: usize, l: usize) -> u8 {
        let atoms = [i, j, k, l];
        if self.smallest_common_ring(&atoms) == Some(4) {
            return 4;
        }
        let in_saturated_five_ring = self
            .molecule
            .rings()
            .iter()
            .zip(&self.aromatic_rings)
            .any(|(ring, &aromatic)| {
                !aromatic && ring.len() == 5 && atoms.iter().all(|a| ring.contains(a))
            });
        if in_saturated_five_ring {
            return 5;
        }
        if self.bond_type(j, k) == 1 {
            1
        } else if self.bond_type(i, j) == 1 || self.bond_type(k, l) == 1 {
            2
        } else {
            0
        }
    }

    fn smallest_common_ring(&self, atoms: &[usize]) -> Option<usize> {
        self.molecule
            .rings()
            .iter()
            .filter(|ring| ring.len() <= 4 && atoms.iter().all(|a| ring.contains(a)))
            .map(Vec::len)
            .min()
    }
}

fn assign_types(
    molecule: &Molecule,
    aromatic_rings: &[bool],
) -> Result<(Vec<AtomType>, Vec<&'static str>), TypingError> {
    let n = molecule.atom_count();
    let mut types = vec![0; n];
    let mut symbols = vec![""; n];
    let unassigned = |atom: usize| TypingError::UnassignedType {
        atom,
        element: molecule.atom(atom).element.symbol(),
    };

    for atom in (0..n).filter(|&a| !molecule.atom(a).is_hydrogen()) {
        let environment = AtomEnvironment::new(molecule, atom, aromatic_rings);
        let rule = rules::match_heavy_atom(&environment).ok_or_else(|| unassigned(atom))?;
        types[atom] = rule.atom_type;
        symbols[atom] = rule.symbol;
    }

    for atom in (0..n).filter(|&a| molecule.atom(a).is_hydrogen()) {
        let &[parent] = molecule.neighbors(atom) else {
            return Err(unassigned(atom));
        };
        let (atom_type, symbol) =
            rules::hydrogen_type(types[parent]).ok_or_else(|| unassigned(atom))?;
        types[atom] = atom_type;
        symbols[atom] = symbol;
    }

    Ok((types, symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Element;
    use crate::core::models::fixtures;
    use crate::core::tables::Variant;

    fn tables() -> Tables {
        Tables::bundled(Variant::Mmff94).unwrap()
    }

    fn typed(molecule: &Molecule) -> MmffMolecule {
        MmffMolecule::new(molecule, &tables()).unwrap()
    }

    #[test]
    fn every_fixture_gets_nonzero_types() {
        for molecule in [
            fixtures::ethane(),
            fixtures::butane(),
            fixtures::cyclohexane_boat(),
            fixtures::benzene(),
            fixtures::naphthalene(),
            fixtures::ethanol(),
            fixtures::methylamine(),
            fixtures::acetamide(),
            fixtures::pyrrole(),
            fixtures::pyridine(),
            fixtures::ethylene(),
            fixtures::chloromethane(),
            fixtures::water(),
        ] {
            let mol = typed(&molecule);
            assert!(mol.atom_types().iter().all(|&t| t != 0));
            assert_eq!(mol.atom_types().len(), molecule.atom_count());
        }
    }

    #[test]
    fn acetamide_types_and_symbols() {
        let mol = typed(&fixtures::acetamide());
        assert_eq!(&mol.atom_types()[..4], &[3, 1, 7, 10]);
        assert_eq!(mol.atom_type(7), 28);
        assert_eq!(mol.symbol(3), "NC=O");
    }

    #[test]
    fn naphthalene_rings_are_aromatic_and_carbons_are_cb() {
        let mol = typed(&fixtures::naphthalene());
        assert_eq!(mol.ring_aromaticity(), &[true, true]);
        assert!(mol.atom_types()[..10].iter().all(|&t| t == 37));
        assert!(mol.atom_types()[10..].iter().all(|&t| t == 5));
    }

    #[test]
    fn aromatic_ring_bonds_have_bond_type_zero() {
        let mol = typed(&fixtures::naphthalene());
        assert_eq!(mol.bond_type(0, 1), 0);
        assert_eq!(mol.effective_order(0, 1), BondOrder::Aromatic);
        assert_eq!(mol.bond_type(0, 10), 0);
    }

    #[test]
    fn amide_carbon_nitrogen_bond_is_not_conjugable_single() {
        // NC=O has no single-bond multiplicity flag, so C-N stays type 0.
        let mol = typed(&fixtures::acetamide());
        assert_eq!(mol.bond_type(0, 3), 0);
        assert_eq!(mol.angle_type(1, 0, 3), 0);
        assert_eq!(mol.torsion_type(1, 0, 3, 7), 0);
    }

    #[test]
    fn five_coordinate_carbon_is_a_typing_error() {
        let c = Element::CARBON;
        let h = Element::HYDROGEN;
        let molecule = fixtures::build(
            &[
                (c, [0.0, 0.0, 0.0]),
                (h, [1.1, 0.0, 0.0]),
                (h, [-1.1, 0.0, 0.0]),
                (h, [0.0, 1.1, 0.0]),
                (h, [0.0, -1.1, 0.0]),
                (h, [0.0, 0.0, 1.1]),
            ],
            &[
                (0, 1, BondOrder::Single),
                (0, 2, BondOrder::Single),
                (0, 3, BondOrder::Single),
                (0, 4, BondOrder::Single),
                (0, 5, BondOrder::Single),
            ],
        );
        assert_eq!(
            MmffMolecule::new(&molecule, &tables()).unwrap_err(),
            TypingError::UnassignedType {
                atom: 0,
                element: "C"
            }
        );
    }

    #[test]
    fn isolated_hydrogen_is_a_typing_error() {
        let molecule = fixtures::build(&[(Element::HYDROGEN, [0.0, 0.0, 0.0])], &[]);
        assert!(matches!(
            MmffMolecule::new(&molecule, &tables()),
            Err(TypingError::UnassignedType { atom: 0, .. })
        ));
    }

    #[test]
    fn partial_charges_of_water() {
        let mol = typed(&fixtures::water());
        assert!((mol.partial_charge(0) + 0.86).abs() < 1e-9);
        assert!((mol.partial_charge(1) - 0.43).abs() < 1e-9);
    }

    #[test]
    fn separation_is_exposed_per_pair() {
        let mol = typed(&fixtures::butane());
        assert_eq!(mol.relation(0, 3), Relation::ThreeApart);
        assert_eq!(mol.separation().relation(0, 1), Relation::Bonded);
    }
}
