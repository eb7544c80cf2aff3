//! # Energy Terms
//!
//! The seven MMFF94 energy-term families. Each family is a plain struct holding atom
//! indices and constants resolved once from the parameter tables, with a `find_in`
//! constructor that enumerates the atom tuples it applies to:
//!
//! | Family          | Atoms                         | Functional form                    |
//! |-----------------|-------------------------------|------------------------------------|
//! | [`bond_stretch`]| bonded pair                   | quartic with cubic stretch `cs`    |
//! | [`angle_bend`]  | `i-j-k`, vertex `j`           | cubic bend, or `1 + cos` if linear |
//! | [`stretch_bend`]| `i-j-k`, vertex `j`           | bend deviation times stretches     |
//! | [`out_of_plane`]| tricoordinate center + 3      | Wilson angle, quadratic            |
//! | [`torsion`]     | bonded chain `i-j-k-l`        | three-term Fourier series          |
//! | [`vdw`]         | 1-4 and farther pairs         | buffered 14-7                      |
//! | [`electrostatic`]| charged 1-4 and farther pairs| buffered Coulomb, 1-4 scaled 0.75  |
//!
//! [`term::EnergyTerm`] closes the set into one enum so the force field can iterate
//! a single list. Gradients are *accumulated*: every term adds into a shared buffer
//! that the caller zeroes once per evaluation.

pub mod angle_bend;
pub mod bond_stretch;
pub mod electrostatic;
pub mod out_of_plane;
pub mod stretch_bend;
pub mod term;
pub mod torsion;
pub mod vdw;

use crate::core::typing::MmffMolecule;
use crate::core::typing::separation::Relation;
use crate::core::utils::geometry::{distance, point_at};

/// Converts md·Å to kcal/mol.
pub(crate) const MDYNE_A_TO_KCAL: f64 = 143.9325;
/// `MDYNE_A_TO_KCAL` expressed per square degree.
pub(crate) const ANGLE_CONSTANT: f64 = 0.043844;
/// `MDYNE_A_TO_KCAL` per degree, for stretch-bend coupling.
pub(crate) const STRETCH_BEND_CONSTANT: f64 = 2.51210;

/// Atom pairs `(i, j, relation)` with `i < j` that are 1-4 or farther apart and closer
/// than `cutoff` in `positions`.
pub(crate) fn nonbonded_pairs<'a>(
    molecule: &'a MmffMolecule,
    positions: &'a [f64],
    cutoff: f64,
) -> impl Iterator<Item = (usize, usize, Relation)> + 'a {
    let n = molecule.atom_count();
    (0..n)
        .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
        .filter_map(move |(i, j)| {
            let relation = molecule.relation(i, j);
            (relation.is_nonbonded()
                && distance(&point_at(positions, i), &point_at(positions, j)) < cutoff)
                .then_some((i, j, relation))
        })
}
