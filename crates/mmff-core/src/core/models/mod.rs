//! Input structures consumed by the force field: atoms, bonds, and rings.

pub mod atom;
pub mod molecule;
pub mod rings;
pub mod topology;

#[cfg(test)]
pub(crate) mod fixtures;
