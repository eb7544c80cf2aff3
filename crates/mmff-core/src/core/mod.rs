//! # Core Module
//!
//! Stateless building blocks of the MMFF94 force field.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, rings and the read-only
//!   [`models::molecule::Molecule`] consumed by everything else
//! - **Parameter Tables** ([`tables`]) - Sorted parameter tables, multi-column binary
//!   search, per-table fallback chains and the per-variant registry
//! - **Atom Typing** ([`typing`]) - Symbolic MMFF types, ring aromaticity, partial charges
//!   and the 1-2/1-3/1-4 separation relation
//! - **Energy Terms** ([`forcefield`]) - The seven energy-term families with analytic
//!   gradients
//! - **Geometry** ([`utils`]) - Small vector helpers shared by the energy terms

pub mod forcefield;
pub mod models;
pub mod tables;
pub mod typing;
pub mod utils;
