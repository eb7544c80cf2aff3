use nalgebra::Point3;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[rustfmt::skip]
static SYMBOL_TO_ATOMIC_NUMBER: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15,
    "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Br" => 35, "I" => 53,
};

#[rustfmt::skip]
const ATOMIC_NUMBER_TO_SYMBOL: [&str; 21] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol: '{0}'")]
pub struct ParseElementError(pub String);

/// A chemical element identified by its atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(pub u8);

impl Element {
    pub const HYDROGEN: Element = Element(1);
    pub const CARBON: Element = Element(6);
    pub const NITROGEN: Element = Element(7);
    pub const OXYGEN: Element = Element(8);
    pub const FLUORINE: Element = Element(9);
    pub const SULFUR: Element = Element(16);
    pub const CHLORINE: Element = Element(17);

    pub fn atomic_number(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        match self.0 {
            35 => "Br",
            53 => "I",
            n => ATOMIC_NUMBER_TO_SYMBOL
                .get(n as usize)
                .copied()
                .unwrap_or("X"),
        }
    }

    /// Row of the periodic table, with hydrogen and helium as row 0.
    pub fn periodic_row(self) -> u8 {
        match self.0 {
            0..=2 => 0,
            3..=10 => 1,
            11..=18 => 2,
            19..=36 => 3,
            _ => 4,
        }
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized = match chars.next() {
            Some(first) => {
                first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
            }
            None => String::new(),
        };
        SYMBOL_TO_ATOMIC_NUMBER
            .get(normalized.as_str())
            .map(|&z| Element(z))
            .ok_or_else(|| ParseElementError(trimmed.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An atom of the input structure.
///
/// Only the element, formal charge and starting position are stored here; MMFF
/// types and partial charges are derived later by the typing layer and never
/// written back onto the atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    pub formal_charge: i8,
}

impl Atom {
    pub fn new(element: Element, position: Point3<f64>) -> Self {
        Self {
            element,
            position,
            formal_charge: 0,
        }
    }

    pub fn with_formal_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number()
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.element == Element::HYDROGEN
    }
}
