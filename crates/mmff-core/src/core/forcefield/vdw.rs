use crate::core::tables::Tables;
use crate::core::tables::error::ParameterError;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, point_at};

/// Buffered 14-7 interaction between a 1-4 or more distant atom pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VanDerWaals {
    pub i: usize,
    pub j: usize,
    /// Minimum-energy separation in Å.
    pub r_star: f64,
    /// Well depth in kcal/mol.
    pub epsilon: f64,
}

impl VanDerWaals {
    pub fn new(i: usize, j: usize, r_star: f64, epsilon: f64) -> Self {
        Self {
            i,
            j,
            r_star,
            epsilon,
        }
    }

    /// One term per nonbonded pair closer than `cutoff` in `positions`.
    pub fn find_in(
        molecule: &MmffMolecule,
        tables: &Tables,
        positions: &[f64],
        cutoff: f64,
    ) -> Result<Vec<Self>, ParameterError> {
        super::nonbonded_pairs(molecule, positions, cutoff)
            .map(|(i, j, _)| {
                let pair = tables.vdw_pair(molecule.atom_type(i), molecule.atom_type(j))?;
                Ok(Self::new(i, j, pair.r_star, pair.epsilon))
            })
            .collect()
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let r = (point_at(positions, self.i) - point_at(positions, self.j)).norm();
        let rs = self.r_star;
        let rs7 = rs.powi(7);
        let repulsive = (1.07 * rs / (r + 0.07 * rs)).powi(7);
        let attractive = 1.12 * rs7 / (r.powi(7) + 0.12 * rs7) - 2.0;
        self.epsilon * repulsive * attractive
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let rij = point_at(positions, self.i) - point_at(positions, self.j);
        let r = rij.norm();
        if r < 1e-10 {
            return;
        }
        let rs = self.r_star;
        let rs7 = rs.powi(7);
        let buffer = r + 0.07 * rs;
        let repulsive = (1.07 * rs / buffer).powi(7);
        let denom = r.powi(7) + 0.12 * rs7;
        let attractive = 1.12 * rs7 / denom - 2.0;

        let d_repulsive = -7.0 * repulsive / buffer;
        let d_attractive = -7.84 * rs7 * r.powi(6) / (denom * denom);
        let de_dr = self.epsilon * (d_repulsive * attractive + repulsive * d_attractive);

        let force = rij * (de_dr / r);
        accumulate(gradient, self.i, &force);
        accumulate(gradient, self.j, &-force);
    }
}
