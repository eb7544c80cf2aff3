use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use crate::core::models::atom::Element;
use serde::Deserialize;
use tracing::debug;

/// Stretch-bend constants (MMFFSTBN), keyed by `(type_j, type_i, type_k, sb_type)` with
/// `type_i <= type_k`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StretchBendRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub atom_type_k: AtomType,
    pub stretch_bend_type: u8,
    pub kba_ijk: f64,
    pub kba_kji: f64,
}

impl KeyedRow for StretchBendRow {
    const KEY_COLUMNS: usize = 4;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_j),
            1 => i32::from(self.atom_type_i),
            2 => i32::from(self.atom_type_k),
            _ => i32::from(self.stretch_bend_type),
        }
    }
}

/// Default stretch-bend constants by periodic-table row (MMFFDFSB), keyed by
/// `(row_j, row_i, row_k)` with `row_i <= row_k`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StretchBendDefaultRow {
    pub row_i: u8,
    pub row_j: u8,
    pub row_k: u8,
    pub kba_ijk: f64,
    pub kba_kji: f64,
}

impl KeyedRow for StretchBendDefaultRow {
    const KEY_COLUMNS: usize = 3;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.row_j),
            1 => i32::from(self.row_i),
            _ => i32::from(self.row_k),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchBendParams {
    /// Couples the `i-j` stretch to the bend.
    pub kba_ijk: f64,
    /// Couples the `k-j` stretch to the bend.
    pub kba_kji: f64,
}

impl StretchBendParams {
    fn reversed(self) -> Self {
        Self {
            kba_ijk: self.kba_kji,
            kba_kji: self.kba_ijk,
        }
    }
}

/// Stretch-bend type as seen from the opposite end of the angle.
fn mirrored_type(stretch_bend_type: u8) -> u8 {
    match stretch_bend_type {
        1 => 2,
        2 => 1,
        7 => 8,
        8 => 7,
        other => other,
    }
}

impl Tables {
    /// Stretch-bend constants for `ti-tj-tk`, oriented as given.
    pub fn stretch_bend_params(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
        stretch_bend_type: u8,
    ) -> Result<StretchBendParams, ParameterError> {
        if ti > tk {
            return self
                .stretch_bend_params(tk, tj, ti, mirrored_type(stretch_bend_type))
                .map(StretchBendParams::reversed);
        }

        let keys = [
            i32::from(tj),
            i32::from(ti),
            i32::from(tk),
            i32::from(stretch_bend_type),
        ];
        if let Some(row) = self.stretch_bends.lookup(&keys) {
            return Ok(StretchBendParams {
                kba_ijk: row.kba_ijk,
                kba_kji: row.kba_kji,
            });
        }

        let params = self.default_stretch_bend(ti, tj, tk)?;
        debug!(ti, tj, tk, stretch_bend_type, "Using default stretch-bend constants");
        Ok(params)
    }

    fn default_stretch_bend(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
    ) -> Result<StretchBendParams, ParameterError> {
        let row_of = |t: AtomType| -> Result<u8, ParameterError> {
            Ok(Element(self.props(t)?.atomic_number).periodic_row())
        };
        let (ri, rj, rk) = (row_of(ti)?, row_of(tj)?, row_of(tk)?);
        let swapped = ri > rk;
        let (a, b) = if swapped { (rk, ri) } else { (ri, rk) };

        let row = self
            .stretch_bend_defaults
            .lookup(&[i32::from(rj), i32::from(a), i32::from(b)])
            .ok_or_else(|| ParameterError::Missing {
                table: "stretch-bend",
                types: vec![ti, tj, tk],
            })?;
        let params = StretchBendParams {
            kba_ijk: row.kba_ijk,
            kba_kji: row.kba_kji,
        };
        Ok(if swapped { params.reversed() } else { params })
    }
}
