//! Per-element constants used by the empirical parameter rules.

use phf::{Map, phf_map};

/// Covalent radius (Å) and electronegativity used by the Schomaker–Stevenson rule.
#[rustfmt::skip]
pub static COVALENT: Map<u8, (f64, f64)> = phf_map! {
    1u8 => (0.33, 2.20),
    5u8 => (0.81, 2.04),
    6u8 => (0.77, 2.60),
    7u8 => (0.73, 3.05),
    8u8 => (0.72, 3.50),
    9u8 => (0.74, 4.00),
    14u8 => (1.15, 1.90),
    15u8 => (1.09, 2.19),
    16u8 => (1.03, 2.52),
    17u8 => (1.01, 3.05),
    35u8 => (1.15, 2.74),
    53u8 => (1.33, 2.21),
};

/// `Z` (outer atom) and `C` (central atom) constants of the empirical bending rule.
#[rustfmt::skip]
pub static ANGLE_ZC: Map<u8, (f64, f64)> = phf_map! {
    1u8 => (1.395, 0.000),
    6u8 => (2.494, 1.016),
    7u8 => (2.711, 1.113),
    8u8 => (3.045, 1.337),
    9u8 => (2.847, 0.000),
    14u8 => (2.350, 0.811),
    15u8 => (2.350, 1.068),
    16u8 => (2.980, 1.249),
    17u8 => (2.909, 1.078),
    35u8 => (3.017, 0.000),
    53u8 => (3.086, 0.000),
};

/// `U` (sp2 conjugation) and `V` (sp3 barrier) constants of the empirical torsion rule.
#[rustfmt::skip]
pub static TORSION_UV: Map<u8, (f64, f64)> = phf_map! {
    6u8 => (2.00, 2.12),
    7u8 => (2.00, 1.50),
    8u8 => (2.00, 0.20),
    14u8 => (1.25, 1.22),
    15u8 => (1.25, 2.40),
    16u8 => (1.25, 0.49),
};
