use super::STRETCH_BEND_CONSTANT;
use super::angle_bend::angle_params;
use crate::core::tables::Tables;
use crate::core::tables::error::ParameterError;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, cos_between, cos_gradient, point_at};
use itertools::Itertools;
use std::f64::consts::PI;
use tracing::debug;

/// Coupling of the angle `i-j-k` to the lengths of its two bonds.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchBend {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub kba_ijk: f64,
    pub kba_kji: f64,
    pub r0_ij: f64,
    pub r0_kj: f64,
    /// Rest angle in degrees.
    pub theta0: f64,
}

impl StretchBend {
    /// One term per unordered neighbor pair of every non-linear center whose two bonds
    /// have stretch parameters.
    pub fn find_in(molecule: &MmffMolecule, tables: &Tables) -> Result<Vec<Self>, ParameterError> {
        let mut terms = Vec::new();
        for j in 0..molecule.atom_count() {
            if molecule.props(j).is_linear() {
                continue;
            }
            let neighbors = molecule.molecule().neighbors(j);
            for (&i, &k) in neighbors.iter().sorted().tuple_combinations() {
                let bond = |a: usize| {
                    tables.bond_params(
                        molecule.atom_type(a),
                        molecule.atom_type(j),
                        molecule.bond_type(a, j),
                        molecule.effective_order(a, j),
                    )
                };
                let (Ok(bond_ij), Ok(bond_kj)) = (bond(i), bond(k)) else {
                    debug!(i, j, k, "Skipping stretch-bend with unresolved bond");
                    continue;
                };
                let angle = angle_params(molecule, tables, i, j, k)?;
                let params = tables.stretch_bend_params(
                    molecule.atom_type(i),
                    molecule.atom_type(j),
                    molecule.atom_type(k),
                    molecule.stretch_bend_type(i, j, k),
                )?;
                terms.push(Self {
                    i,
                    j,
                    k,
                    kba_ijk: params.kba_ijk,
                    kba_kji: params.kba_kji,
                    r0_ij: bond_ij.r0,
                    r0_kj: bond_kj.r0,
                    theta0: angle.theta0,
                });
            }
        }
        Ok(terms)
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let pj = point_at(positions, self.j);
        let u = point_at(positions, self.i) - pj;
        let v = point_at(positions, self.k) - pj;
        let dtheta = cos_between(&u, &v).acos().to_degrees() - self.theta0;
        let stretch = self.kba_ijk * (u.norm() - self.r0_ij) + self.kba_kji * (v.norm() - self.r0_kj);
        STRETCH_BEND_CONSTANT * stretch * dtheta
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let pj = point_at(positions, self.j);
        let u = point_at(positions, self.i) - pj;
        let v = point_at(positions, self.k) - pj;
        let (ru, rv) = (u.norm(), v.norm());
        if ru < 1e-10 || rv < 1e-10 {
            return;
        }
        let cos_theta = cos_between(&u, &v);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        if sin_theta < 1e-8 {
            return;
        }
        let dtheta = cos_theta.acos().to_degrees() - self.theta0;
        let stretch = self.kba_ijk * (ru - self.r0_ij) + self.kba_kji * (rv - self.r0_kj);

        let de_dcos = -STRETCH_BEND_CONSTANT * stretch * (180.0 / PI) / sin_theta;
        let gi = cos_gradient(&u, &v) * de_dcos + u * (STRETCH_BEND_CONSTANT * self.kba_ijk * dtheta / ru);
        let gk = cos_gradient(&v, &u) * de_dcos + v * (STRETCH_BEND_CONSTANT * self.kba_kji * dtheta / rv);
        accumulate(gradient, self.i, &gi);
        accumulate(gradient, self.k, &gk);
        accumulate(gradient, self.j, &-(gi + gk));
    }
}
