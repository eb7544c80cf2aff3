use super::elements::COVALENT;
use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use crate::core::models::topology::BondOrder;
use serde::Deserialize;
use tracing::debug;

/// Explicit bond-stretch parameters (MMFFBOND), keyed by `(type_i, type_j, bond_type)`
/// with `type_i <= type_j`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BondRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub bond_type: u8,
    pub kb: f64,
    pub r0: f64,
}

impl KeyedRow for BondRow {
    const KEY_COLUMNS: usize = 3;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_i),
            1 => i32::from(self.atom_type_j),
            _ => i32::from(self.bond_type),
        }
    }
}

/// Reference length and force constant per element pair (MMFFBNDK), used to scale an
/// empirical force constant to an empirical rest length.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BondReferenceRow {
    pub atomic_number_i: u8,
    pub atomic_number_j: u8,
    pub r_ref: f64,
    pub kb_ref: f64,
}

impl KeyedRow for BondReferenceRow {
    const KEY_COLUMNS: usize = 2;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atomic_number_i),
            _ => i32::from(self.atomic_number_j),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondParams {
    /// Force constant in md/Å.
    pub kb: f64,
    /// Rest length in Å.
    pub r0: f64,
}

const SS_EXPONENT: f64 = 1.4;
const SS_SCALE: f64 = 0.085;
const SS_SCALE_HYDROGEN: f64 = 0.050;

/// Per-atom radius shortening applied for the bond order.
fn multiplicity_shortening(order: BondOrder) -> f64 {
    match order {
        BondOrder::Single => 0.0,
        BondOrder::Aromatic => 0.075,
        BondOrder::Double => 0.10,
        BondOrder::Triple => 0.17,
    }
}

impl Tables {
    /// Bond-stretch parameters for a bond between types `ti` and `tj`.
    ///
    /// Falls back to a Schomaker–Stevenson rest length with a force constant scaled
    /// from the element-pair reference when no explicit row exists.
    pub fn bond_params(
        &self,
        ti: AtomType,
        tj: AtomType,
        bond_type: u8,
        order: BondOrder,
    ) -> Result<BondParams, ParameterError> {
        let (a, b) = (ti.min(tj), ti.max(tj));
        if let Some(row) =
            self.bonds
                .lookup(&[i32::from(a), i32::from(b), i32::from(bond_type)])
        {
            return Ok(BondParams {
                kb: row.kb,
                r0: row.r0,
            });
        }

        let zi = self.props(ti)?.atomic_number;
        let zj = self.props(tj)?.atomic_number;
        let r0 = empirical_rest_length(zi, zj, order)?;
        let kb = self.empirical_force_constant(zi, zj, r0)?;
        debug!(ti, tj, bond_type, r0, kb, "Using empirical bond-stretch parameters");
        Ok(BondParams { kb, r0 })
    }

    fn empirical_force_constant(&self, zi: u8, zj: u8, r0: f64) -> Result<f64, ParameterError> {
        let (a, b) = (zi.min(zj), zi.max(zj));
        let reference = self
            .bond_references
            .lookup(&[i32::from(a), i32::from(b)])
            .ok_or_else(|| ParameterError::MissingElement {
                table: "bond reference",
                elements: vec![a, b],
            })?;
        Ok(reference.kb_ref * (reference.r_ref / r0).powi(6))
    }
}

/// Schomaker–Stevenson rest length from covalent radii and electronegativities.
pub fn empirical_rest_length(zi: u8, zj: u8, order: BondOrder) -> Result<f64, ParameterError> {
    let missing = || ParameterError::MissingElement {
        table: "covalent radius",
        elements: vec![zi, zj],
    };
    let &(ri, chi_i) = COVALENT.get(&zi).ok_or_else(missing)?;
    let &(rj, chi_j) = COVALENT.get(&zj).ok_or_else(missing)?;

    let scale = if zi == 1 || zj == 1 {
        SS_SCALE_HYDROGEN
    } else {
        SS_SCALE
    };
    let shortening = 2.0 * multiplicity_shortening(order);
    Ok(ri + rj - scale * (chi_i - chi_j).abs().powf(SS_EXPONENT) - shortening)
}
