use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use serde::Deserialize;

/// Bond charge increments (MMFFCHG), keyed by `(type_i, type_j, bond_type)` with
/// `type_i < type_j`. The atom of type `i` receives `+bci`, the atom of type `j`
/// receives `-bci`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChargeRow {
    pub atom_type_i: AtomType,
    pub atom_type_j: AtomType,
    pub bond_type: u8,
    pub bci: f64,
}

impl KeyedRow for ChargeRow {
    const KEY_COLUMNS: usize = 3;
    fn key(&self, column: usize) -> i32 {
        match column {
            0 => i32::from(self.atom_type_i),
            1 => i32::from(self.atom_type_j),
            _ => i32::from(self.bond_type),
        }
    }
}

/// Partial bond charge increments and formal-charge adjustment factors (MMFFPBCI).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PbciRow {
    pub atom_type: AtomType,
    pub pbci: f64,
    pub fcadj: f64,
}

impl KeyedRow for PbciRow {
    const KEY_COLUMNS: usize = 1;
    fn key(&self, _column: usize) -> i32 {
        i32::from(self.atom_type)
    }
}

impl Tables {
    pub fn pbci(&self, atom_type: AtomType) -> Result<&PbciRow, ParameterError> {
        self.pbci
            .lookup(&[i32::from(atom_type)])
            .ok_or_else(|| ParameterError::Missing {
                table: "partial bond charge increment",
                types: vec![atom_type],
            })
    }

    /// Charge moved onto an atom of type `ti` by its bond to an atom of type `tj`.
    ///
    /// Uses the tabulated increment when available, otherwise the difference of the
    /// two partial increments `pbci_i - pbci_j`.
    pub fn bond_charge_increment(
        &self,
        ti: AtomType,
        tj: AtomType,
        bond_type: u8,
    ) -> Result<f64, ParameterError> {
        if ti == tj {
            return Ok(0.0);
        }
        let (a, b, sign) = if ti < tj { (ti, tj, 1.0) } else { (tj, ti, -1.0) };
        if let Some(row) =
            self.charges
                .lookup(&[i32::from(a), i32::from(b), i32::from(bond_type)])
        {
            return Ok(sign * row.bci);
        }
        Ok(self.pbci(ti)?.pbci - self.pbci(tj)?.pbci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::Variant;

    fn tables() -> Tables {
        Tables::bundled(Variant::Mmff94).unwrap()
    }

    #[test]
    fn bond_charge_increment_is_antisymmetric() {
        let tables = tables();
        assert_eq!(tables.bond_charge_increment(6, 21, 0).unwrap(), -0.40);
        assert_eq!(tables.bond_charge_increment(21, 6, 0).unwrap(), 0.40);
    }

    #[test]
    fn bond_charge_increment_is_zero_for_like_types() {
        assert_eq!(tables().bond_charge_increment(37, 37, 0).unwrap(), 0.0);
    }

    #[test]
    fn bond_charge_increment_falls_back_to_partial_increments() {
        let tables = tables();
        // No CR-OH2 row: pbci(CR) - pbci(OH2) = 0.0 - (-0.5).
        assert!((tables.bond_charge_increment(1, 70, 0).unwrap() - 0.5).abs() < 1e-12);
        assert!((tables.bond_charge_increment(70, 1, 0).unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn pbci_fails_for_unknown_type() {
        assert!(tables().pbci(99).is_err());
    }
}
