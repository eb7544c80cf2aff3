use super::nonbonded_pairs;
use crate::core::typing::MmffMolecule;
use crate::core::typing::separation::Relation;
use crate::core::utils::geometry::{accumulate, point_at};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coulomb constant in kcal·Å/(mol·e²).
const COULOMB_CONSTANT: f64 = 332.0716;
/// Distance buffer in Å added to every separation.
const BUFFER: f64 = 0.05;
const ONE_FOUR_SCALE: f64 = 0.75;
/// Charges at or below this magnitude do not produce terms.
const CHARGE_THRESHOLD: f64 = 1e-5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown dielectric model '{0}' (expected 'constant' or 'distance')")]
pub struct ParseDielectricModelError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DielectricModel {
    #[default]
    Constant,
    Distance,
}

impl DielectricModel {
    fn exponent(self) -> i32 {
        match self {
            Self::Constant => 1,
            Self::Distance => 2,
        }
    }
}

impl FromStr for DielectricModel {
    type Err = ParseDielectricModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(Self::Constant),
            "distance" => Ok(Self::Distance),
            _ => Err(ParseDielectricModelError(s.to_string())),
        }
    }
}

impl fmt::Display for DielectricModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constant => "constant",
            Self::Distance => "distance",
        })
    }
}

/// Buffered Coulomb interaction between two charged, nonbonded atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Electrostatic {
    pub i: usize,
    pub j: usize,
    /// `332.0716 * q_i * q_j * scale / D`, folded at build time.
    pub prefactor: f64,
    pub model: DielectricModel,
}

impl Electrostatic {
    pub fn new(i: usize, j: usize, prefactor: f64, model: DielectricModel) -> Self {
        Self {
            i,
            j,
            prefactor,
            model,
        }
    }

    pub fn find_in(
        molecule: &MmffMolecule,
        positions: &[f64],
        cutoff: f64,
        dielectric: f64,
        model: DielectricModel,
    ) -> Vec<Self> {
        nonbonded_pairs(molecule, positions, cutoff)
            .filter_map(|(i, j, relation)| {
                let (qi, qj) = (molecule.partial_charge(i), molecule.partial_charge(j));
                if qi.abs() <= CHARGE_THRESHOLD || qj.abs() <= CHARGE_THRESHOLD {
                    return None;
                }
                let scale = if relation == Relation::ThreeApart {
                    ONE_FOUR_SCALE
                } else {
                    1.0
                };
                Some(Self::new(
                    i,
                    j,
                    COULOMB_CONSTANT * qi * qj * scale / dielectric,
                    model,
                ))
            })
            .collect()
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let r = (point_at(positions, self.i) - point_at(positions, self.j)).norm();
        self.prefactor / (r + BUFFER).powi(self.model.exponent())
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let rij = point_at(positions, self.i) - point_at(positions, self.j);
        let r = rij.norm();
        if r < 1e-10 {
            return;
        }
        let n = self.model.exponent();
        let de_dr = -f64::from(n) * self.prefactor / (r + BUFFER).powi(n + 1);
        let force = rij * (de_dr / r);
        accumulate(gradient, self.i, &force);
        accumulate(gradient, self.j, &-force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::testing::{assert_gradient_matches, typed};
    use crate::core::models::fixtures;

    #[test]
    fn energy_follows_buffered_coulomb_law() {
        let positions = [0.0, 0.0, 0.0, 2.95, 0.0, 0.0];
        let constant = Electrostatic::new(0, 1, 332.0716 * 0.5 * -0.5, DielectricModel::Constant);
        assert!((constant.energy(&positions) - 332.0716 * -0.25 / 3.0).abs() < 1e-9);
        let distance = Electrostatic::new(0, 1, 332.0716 * 0.5 * -0.5, DielectricModel::Distance);
        assert!((distance.energy(&positions) - 332.0716 * -0.25 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn dielectric_model_parses_case_insensitively() {
        assert_eq!("Distance".parse::<DielectricModel>().unwrap(), DielectricModel::Distance);
        assert_eq!("constant".parse::<DielectricModel>().unwrap(), DielectricModel::Constant);
        assert!("vacuum".parse::<DielectricModel>().is_err());
    }

    #[test]
    fn uncharged_atoms_are_skipped_and_one_four_pairs_scaled() {
        let (mol, _) = typed(fixtures::acetamide());
        let positions = mol.molecule().positions_flat();
        let terms = Electrostatic::find_in(&mol, &positions, 100.0, 1.0, DielectricModel::Constant);
        // The methyl group carries no charge.
        assert!(terms.iter().all(|t| ![1, 4, 5, 6].contains(&t.i) && ![1, 4, 5, 6].contains(&t.j)));
        let one_four = terms
            .iter()
            .find(|t| (t.i, t.j) == (2, 7))
            .unwrap();
        assert_eq!(mol.relation(2, 7), Relation::ThreeApart);
        let (qi, qj) = (mol.partial_charge(2), mol.partial_charge(7));
        assert!((one_four.prefactor - COULOMB_CONSTANT * qi * qj * 0.75).abs() < 1e-9);
    }

    #[test]
    fn gradient_matches_finite_differences_for_both_models() {
        let (mol, _) = typed(fixtures::pyrrole());
        let positions = mol.molecule().positions_flat();
        for model in [DielectricModel::Constant, DielectricModel::Distance] {
            let terms = Electrostatic::find_in(&mol, &positions, 100.0, 4.0, model);
            assert!(!terms.is_empty());
            assert_gradient_matches(
                &positions,
                |p| terms.iter().map(|t| t.energy(p)).sum(),
                |p, g| terms.iter().for_each(|t| t.accumulate_gradient(p, g)),
            );
        }
    }
}
