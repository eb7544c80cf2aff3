use super::ANGLE_CONSTANT;
use crate::core::tables::Tables;
use crate::core::tables::error::ParameterError;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, point_at};
use std::f64::consts::PI;

/// Wilson out-of-plane bend of `l` against the plane `i-j-k` at the center `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutOfPlane {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    /// Force constant in md·Å/rad².
    pub koop: f64,
}

impl OutOfPlane {
    pub fn new(i: usize, j: usize, k: usize, l: usize, koop: f64) -> Self {
        Self { i, j, k, l, koop }
    }

    /// Three terms per atom with exactly three neighbors, one per out-of-plane atom.
    pub fn find_in(molecule: &MmffMolecule, tables: &Tables) -> Result<Vec<Self>, ParameterError> {
        let mut terms = Vec::new();
        for j in 0..molecule.atom_count() {
            let &[a, b, c] = molecule.molecule().neighbors(j) else {
                continue;
            };
            let koop = tables.out_of_plane_params(
                molecule.atom_type(a),
                molecule.atom_type(j),
                molecule.atom_type(b),
                molecule.atom_type(c),
            )?;
            terms.push(Self::new(a, j, b, c, koop));
            terms.push(Self::new(a, j, c, b, koop));
            terms.push(Self::new(b, j, c, a, koop));
        }
        Ok(terms)
    }

    /// Signed Wilson angle in radians.
    pub fn wilson_angle(&self, positions: &[f64]) -> f64 {
        let pj = point_at(positions, self.j);
        let a = (point_at(positions, self.i) - pj).normalize();
        let b = (point_at(positions, self.k) - pj).normalize();
        let c = (point_at(positions, self.l) - pj).normalize();
        let normal = a.cross(&b);
        let sin_theta = normal.norm();
        if sin_theta < 1e-10 {
            return 0.0;
        }
        (normal.dot(&c) / sin_theta).clamp(-1.0, 1.0).asin()
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let chi = self.wilson_angle(positions).to_degrees();
        0.5 * ANGLE_CONSTANT * self.koop * chi * chi
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let pj = point_at(positions, self.j);
        let (ra, rb, rc) = (
            point_at(positions, self.i) - pj,
            point_at(positions, self.k) - pj,
            point_at(positions, self.l) - pj,
        );
        let (da, db, dc) = (ra.norm(), rb.norm(), rc.norm());
        if da < 1e-10 || db < 1e-10 || dc < 1e-10 {
            return;
        }
        let (a, b, c) = (ra / da, rb / db, rc / dc);

        let cos_theta = a.dot(&b);
        let sin2_theta = 1.0 - cos_theta * cos_theta;
        if sin2_theta < 1e-16 {
            return;
        }
        let sin_theta = sin2_theta.sqrt();
        let sin_chi = (a.cross(&b).dot(&c) / sin_theta).clamp(-1.0, 1.0);
        let cos_chi = (1.0 - sin_chi * sin_chi).sqrt();
        if cos_chi < 1e-8 {
            return;
        }

        let chi_deg = sin_chi.asin().to_degrees();
        let de_dchi = ANGLE_CONSTANT * self.koop * chi_deg * (180.0 / PI);
        let t1 = 1.0 / (cos_chi * sin_theta);
        let t2 = sin_chi / (cos_chi * sin2_theta);

        let gi = (b.cross(&c) * t1 - (a - b * cos_theta) * t2) / da * de_dchi;
        let gk = (c.cross(&a) * t1 - (b - a * cos_theta) * t2) / db * de_dchi;
        let gl = (a.cross(&b) * t1 - c * (sin_chi / cos_chi)) / dc * de_dchi;

        accumulate(gradient, self.i, &gi);
        accumulate(gradient, self.k, &gk);
        accumulate(gradient, self.l, &gl);
        accumulate(gradient, self.j, &-(gi + gk + gl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::testing::{assert_gradient_matches, typed, typed_with};
    use crate::core::models::fixtures;
    use crate::core::tables::Variant;

    #[test]
    fn planar_center_has_zero_energy() {
        let term = OutOfPlane::new(0, 1, 2, 3, 0.1);
        let positions = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5, 0.8, 0.0, -0.5, -0.8, 0.0];
        assert!(term.energy(&positions).abs() < 1e-12);
    }

    #[test]
    fn pyramidal_center_has_positive_energy_and_signed_angle() {
        let up = OutOfPlane::new(0, 1, 2, 3, 0.1);
        let positions = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -0.7, -0.7, 0.3];
        assert!(up.wilson_angle(&positions) > 0.0);
        assert!(up.energy(&positions) > 0.0);
        let swapped = OutOfPlane::new(2, 1, 0, 3, 0.1);
        assert!(swapped.wilson_angle(&positions) < 0.0);
    }

    #[test]
    fn acetamide_has_three_terms_per_tricoordinate_center() {
        let (mol, tables) = typed(fixtures::acetamide());
        let terms = OutOfPlane::find_in(&mol, &tables).unwrap();
        // Carbonyl carbon and amide nitrogen.
        assert_eq!(terms.len(), 6);
        let nitrogen: Vec<_> = terms.iter().filter(|t| t.j == 3).collect();
        assert!(nitrogen.iter().all(|t| t.koop == 0.009));
    }

    #[test]
    fn amide_constant_differs_between_variants() {
        let (mol, tables) = typed_with(fixtures::acetamide(), Variant::Mmff94s);
        let terms = OutOfPlane::find_in(&mol, &tables).unwrap();
        assert!(terms.iter().filter(|t| t.j == 3).all(|t| t.koop == 0.038));
    }

    #[test]
    fn gradient_matches_finite_differences_for_acetamide() {
        let (mol, tables) = typed(fixtures::acetamide());
        let terms = OutOfPlane::find_in(&mol, &tables).unwrap();
        let positions = mol.molecule().positions_flat();
        assert_gradient_matches(
            &positions,
            |p| terms.iter().map(|t| t.energy(p)).sum(),
            |p, g| terms.iter().for_each(|t| t.accumulate_gradient(p, g)),
        );
    }

    #[test]
    fn gradient_matches_finite_differences_for_pyramidal_center() {
        let term = OutOfPlane::new(0, 1, 2, 3, 0.1);
        let positions = [1.0, 0.05, 0.0, 0.0, 0.0, 0.02, 0.1, 1.0, 0.0, -0.7, -0.7, 0.3];
        assert_gradient_matches(
            &positions,
            |p| term.energy(p),
            |p, g| term.accumulate_gradient(p, g),
        );
    }
}
