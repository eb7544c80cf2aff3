use super::MDYNE_A_TO_KCAL;
use crate::core::tables::Tables;
use crate::core::tables::error::ParameterError;
use crate::core::typing::MmffMolecule;
use crate::core::utils::geometry::{accumulate, point_at};

/// Cubic stretch constant `cs` in 1/Å.
const CUBIC_STRETCH: f64 = -2.0;

/// MMFF quartic bond stretch between two bonded atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct BondStretch {
    pub i: usize,
    pub j: usize,
    /// Force constant in md/Å.
    pub kb: f64,
    /// Rest length in Å.
    pub r0: f64,
}

impl BondStretch {
    pub fn new(i: usize, j: usize, kb: f64, r0: f64) -> Self {
        Self { i, j, kb, r0 }
    }

    /// One term per bond of the molecule.
    pub fn find_in(molecule: &MmffMolecule, tables: &Tables) -> Result<Vec<Self>, ParameterError> {
        molecule
            .molecule()
            .bonds()
            .iter()
            .map(|bond| {
                let params = tables.bond_params(
                    molecule.atom_type(bond.i),
                    molecule.atom_type(bond.j),
                    molecule.bond_type(bond.i, bond.j),
                    molecule.effective_order(bond.i, bond.j),
                )?;
                Ok(Self::new(bond.i, bond.j, params.kb, params.r0))
            })
            .collect()
    }

    pub fn energy(&self, positions: &[f64]) -> f64 {
        let r = (point_at(positions, self.i) - point_at(positions, self.j)).norm();
        let dr = r - self.r0;
        let cs = CUBIC_STRETCH;
        0.5 * MDYNE_A_TO_KCAL
            * self.kb
            * dr
            * dr
            * (1.0 + cs * dr + 7.0 / 12.0 * cs * cs * dr * dr)
    }

    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        let rij = point_at(positions, self.i) - point_at(positions, self.j);
        let r = rij.norm();
        if r < 1e-10 {
            return;
        }
        let dr = r - self.r0;
        let cs = CUBIC_STRETCH;
        let de_dr = 0.5
            * MDYNE_A_TO_KCAL
            * self.kb
            * dr
            * (2.0 + 3.0 * cs * dr + 7.0 / 3.0 * cs * cs * dr * dr);
        let force = rij * (de_dr / r);
        accumulate(gradient, self.i, &force);
        accumulate(gradient, self.j, &-force);
    }
}
