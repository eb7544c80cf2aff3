use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use serde::Deserialize;

/// Per-type chemical properties (MMFFPROP).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AtomProps {
    pub atom_type: AtomType,
    pub atomic_number: u8,
    /// Number of attached neighbors expected for this type.
    pub crd: u8,
    pub val: u8,
    /// Lone pair that can take part in pi conjugation.
    pub pilp: u8,
    /// 1 or 2 for double-bonded, 3 for triple-bonded types.
    pub mltb: u8,
    pub arom: u8,
    pub lin: u8,
    /// Single bonds to this type may be resonance-shortened.
    pub sbmb: u8,
}

impl AtomProps {
    #[inline]
    pub fn is_aromatic(&self) -> bool {
        self.arom != 0
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        self.lin != 0
    }

    #[inline]
    pub fn has_single_bond_multiplicity(&self) -> bool {
        self.sbmb != 0
    }
}

impl KeyedRow for AtomProps {
    const KEY_COLUMNS: usize = 1;
    fn key(&self, _column: usize) -> i32 {
        i32::from(self.atom_type)
    }
}

/// Type-equivalence hierarchy (MMFFDEF): each level maps a type to a more general one,
/// level 5 being the wildcard `0`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EquivalenceRow {
    pub atom_type: AtomType,
    pub level1: AtomType,
    pub level2: AtomType,
    pub level3: AtomType,
    pub level4: AtomType,
    pub level5: AtomType,
}

impl EquivalenceRow {
    pub fn level(&self, level: u8) -> AtomType {
        match level {
            0 | 1 => self.level1,
            2 => self.level2,
            3 => self.level3,
            4 => self.level4,
            _ => self.level5,
        }
    }
}

impl KeyedRow for EquivalenceRow {
    const KEY_COLUMNS: usize = 1;
    fn key(&self, _column: usize) -> i32 {
        i32::from(self.atom_type)
    }
}

impl Tables {
    pub fn props(&self, atom_type: AtomType) -> Result<&AtomProps, ParameterError> {
        self.props
            .lookup(&[i32::from(atom_type)])
            .ok_or_else(|| ParameterError::Missing {
                table: "atom property",
                types: vec![atom_type],
            })
    }

    /// The equivalent type of `atom_type` at `level` (1 = itself, 5 = wildcard).
    pub fn equivalent(&self, atom_type: AtomType, level: u8) -> Result<AtomType, ParameterError> {
        self.equivalences
            .lookup(&[i32::from(atom_type)])
            .map(|row| row.level(level))
            .ok_or_else(|| ParameterError::Missing {
                table: "type equivalence",
                types: vec![atom_type],
            })
    }
}
