use super::{ANGLE_CONSTANT, MDYNE_A_TO_KCAL};
use crate::core::tables::Tables;
use crate::core::tables::angle::AngleParams;
use crate::core::tables::error::ParameterError;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, cos_between, cos_gradient, point_at};
use itertools::Itertools;
use std::f64::consts::PI;

/// Cubic bend constant `cb` in 1/deg.
const CUBIC_BEND: f64 = -0.006981;

/// Angle bend `i-j-k` with vertex `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleBend {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    /// Force constant in md·Å/rad².
    pub ka: f64,
    /// Rest angle in degrees.
    pub theta0: f64,
    /// Linear centers use `1 + cos(theta)` instead of the cubic form.
    pub linear: bool,
}

impl AngleBend {
    pub fn new(i: usize, j: usize, k: usize, ka: f64, theta0: f64, linear: bool) -> Self {
        Self {
            i,
            j,
            k,
            ka,
            theta0,
            linear,
        }
    }

    /// One term per pair of neighbors around every atom with at least two neighbors.
    pub fn find_in(molecule: &MmffMolecule, tables: &Tables) -> Result<Vec<Self>, ParameterError> {
        let mut terms = Vec::new();
        for j in 0..molecule.atom_count() {
            let neighbors = molecule.molecule().neighbors(j);
            for (&i, &k) in neighbors.iter().sorted().tuple_combinations() {
                let params = angle_params(molecule, tables, i, j, k)?;
                terms.push(Self::new(
                    i,
                    j,
                    k,
                    params.ka,
                    params.theta0,
                    molecule.props(j).is_linear(),
                ));
            }
        }
        Ok(terms)
    }

    fn cos_theta(&self, positions: &[f64]) -> f64 {
        let pj = point_at(positions, self.j);
        cos_between(
            &(point_at(positions, self.i) - pj),
            &(point_at(positions, self.k) - pj),
        )
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let cos_theta = self.cos_theta(positions);
        if self.linear {
            return MDYNE_A_TO_KCAL * self.ka * (1.0 + cos_theta);
        }
        let dtheta = cos_theta.acos().to_degrees() - self.theta0;
        0.5 * ANGLE_CONSTANT * self.ka * dtheta * dtheta * (1.0 + CUBIC_BEND * dtheta)
    }

    /// `dE/d(cos theta)` at the current geometry.
    fn energy_derivative(&self, cos_theta: f64) -> Option<f64> {
        if self.linear {
            return Some(MDYNE_A_TO_KCAL * self.ka);
        }
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        if sin_theta < 1e-8 {
            return None;
        }
        let dtheta = cos_theta.acos().to_degrees() - self.theta0;
        let de_dtheta = 0.5 * ANGLE_CONSTANT * self.ka * dtheta * (2.0 + 3.0 * CUBIC_BEND * dtheta)
            * (180.0 / PI);
        Some(-de_dtheta / sin_theta)
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let pj = point_at(positions, self.j);
        let u = point_at(positions, self.i) - pj;
        let v = point_at(positions, self.k) - pj;
        if u.norm() < 1e-10 || v.norm() < 1e-10 {
            return;
        }
        let Some(de_dcos) = self.energy_derivative(cos_between(&u, &v)) else {
            return;
        };
        let gi = cos_gradient(&u, &v) * de_dcos;
        let gk = cos_gradient(&v, &u) * de_dcos;
        accumulate(gradient, self.i, &gi);
        accumulate(gradient, self.k, &gk);
        accumulate(gradient, self.j, &-(gi + gk));
    }
}

/// Resolves angle parameters for `i-j-k`, including the bond rest lengths the
/// empirical force constant needs.
pub(crate) fn angle_params(
    molecule: &MmffMolecule,
    tables: &Tables,
    i: usize,
    j: usize,
    k: usize,
) -> Result<AngleParams, ParameterError> {
    let rest_length = |a: usize, b: usize| -> Result<f64, ParameterError> {
        Ok(tables
            .bond_params(
                molecule.atom_type(a),
                molecule.atom_type(b),
                molecule.bond_type(a, b),
                molecule.effective_order(a, b),
            )?
            .r0)
    };
    tables.angle_params(
        molecule.atom_type(i),
        molecule.atom_type(j),
        molecule.atom_type(k),
        molecule.angle_type(i, j, k),
        rest_length(i, j)?,
        rest_length(j, k)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::testing::{assert_gradient_matches, typed};
    use crate::core::models::fixtures;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn right_angle() -> [f64; 9] {
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    }

    #[test]
    fn energy_is_zero_at_rest_angle() {
        let term = AngleBend::new(0, 1, 2, 0.8, 90.0, false);
        assert!(f64_approx_equal(term.energy(&right_angle()), 0.0));
    }

    #[test]
    fn energy_includes_cubic_correction() {
        let term = AngleBend::new(0, 1, 2, 0.8, 100.0, false);
        let dtheta = -10.0;
        let expected = 0.5 * ANGLE_CONSTANT * 0.8 * dtheta * dtheta * (1.0 + CUBIC_BEND * dtheta);
        assert!(f64_approx_equal(term.energy(&right_angle()), expected));
    }

    #[test]
    fn linear_center_uses_cosine_form() {
        let term = AngleBend::new(0, 1, 2, 0.4, 180.0, true);
        assert!(f64_approx_equal(term.energy(&right_angle()), MDYNE_A_TO_KCAL * 0.4));
        let straight = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0];
        assert!(f64_approx_equal(term.energy(&straight), 0.0));
    }

    #[test]
    fn ethane_has_twelve_angles() {
        let (mol, tables) = typed(fixtures::ethane());
        let terms = AngleBend::find_in(&mol, &tables).unwrap();
        assert_eq!(terms.len(), 12);
        let hcc = terms.iter().find(|t| t.j == 0 && t.k == 2 && t.i == 1).unwrap();
        assert_eq!((hcc.ka, hcc.theta0), (0.636, 110.549));
    }

    #[test]
    fn gradient_matches_finite_differences_for_ethane() {
        let (mol, tables) = typed(fixtures::ethane());
        let terms = AngleBend::find_in(&mol, &tables).unwrap();
        let positions = mol.molecule().positions_flat();
        assert_gradient_matches(
            &positions,
            |p| terms.iter().map(|t| t.energy(p)).sum(),
            |p, g| terms.iter().for_each(|t| t.accumulate_gradient(p, g)),
        );
    }

    #[test]
    fn linear_gradient_matches_finite_differences() {
        let term = AngleBend::new(0, 1, 2, 0.4, 180.0, true);
        let positions = [1.0, 0.1, 0.0, 0.0, 0.0, 0.05, -1.0, 0.2, 0.1];
        assert_gradient_matches(
            &positions,
            |p| term.energy(p),
            |p, g| term.accumulate_gradient(p, g),
        );
    }
}
