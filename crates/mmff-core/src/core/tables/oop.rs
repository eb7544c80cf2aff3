use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use serde::Deserialize;

/// Out-of-plane bending constants (MMFFOOP / MMFF94s_OOP), keyed by the central type
/// followed by the three outer types in ascending order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutOfPlaneRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub atom_type_k: AtomType,
    pub atom_type_l: AtomType,
    pub koop: f64,
}

impl KeyedRow for OutOfPlaneRow {
    const KEY_COLUMNS: usize = 4;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_j),
            1 => i32::from(self.atom_type_i),
            2 => i32::from(self.atom_type_k),
            _ => i32::from(self.atom_type_l),
        }
    }
}

impl Tables {
    /// Out-of-plane force constant (md·Å/rad²) for center `tj` with neighbors
    /// `ti`, `tk`, `tl` in any order.
    ///
    /// All three neighbors are mapped through the same equivalence level, from 1 (exact)
    /// down to 5 (wildcard), until a row matches.
    pub fn out_of_plane_params(
        &self,
        ti: AtomType,
        tj: AtomType,
        tk: AtomType,
        tl: AtomType,
    ) -> Result<f64, ParameterError> {
        for level in 1..=5 {
            let mut outer = [
                self.equivalent(ti, level)?,
                self.equivalent(tk, level)?,
                self.equivalent(tl, level)?,
            ];
            outer.sort_unstable();
            let keys = [
                i32::from(tj),
                i32::from(outer[0]),
                i32::from(outer[1]),
                i32::from(outer[2]),
            ];
            if let Some(row) = self.out_of_planes.lookup(&keys) {
                return Ok(row.koop);
            }
        }
        Err(ParameterError::Missing {
            table: "out-of-plane",
            types: vec![ti, tj, tk, tl],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::Variant;

    #[test]
    fn out_of_plane_params_is_independent_of_neighbor_order() {
        let tables = Tables::bundled(Variant::Mmff94).unwrap();
        assert_eq!(tables.out_of_plane_params(1, 3, 7, 10).unwrap(), 0.100);
        assert_eq!(tables.out_of_plane_params(10, 3, 1, 7).unwrap(), 0.100);
    }

    #[test]
    fn out_of_plane_params_falls_back_to_wildcard_row() {
        let tables = Tables::bundled(Variant::Mmff94).unwrap();
        assert_eq!(tables.out_of_plane_params(5, 3, 5, 7).unwrap(), 0.130);
    }

    #[test]
    fn out_of_plane_params_differs_between_variants_for_amide_nitrogen() {
        let mmff94 = Tables::bundled(Variant::Mmff94).unwrap();
        let mmff94s = Tables::bundled(Variant::Mmff94s).unwrap();
        let plain = mmff94.out_of_plane_params(3, 10, 28, 28).unwrap();
        let smoothed = mmff94s.out_of_plane_params(3, 10, 28, 28).unwrap();
        assert!(smoothed > plain);
    }

    #[test]
    fn out_of_plane_params_fails_for_center_without_rows() {
        let tables = Tables::bundled(Variant::Mmff94).unwrap();
        assert_eq!(
            tables.out_of_plane_params(5, 1, 5, 5).unwrap_err(),
            ParameterError::Missing {
                table: "out-of-plane",
                types: vec![5, 1, 5, 5]
            }
        );
    }
}
