use crate::core::models::molecule::Molecule;
use std::collections::HashMap;

/// Topological separation of an atom pair, closest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Same,
    Bonded,
    TwoApart,
    ThreeApart,
    Far,
}

impl Relation {
    /// Pairs that interact through the van der Waals and electrostatic terms.
    #[inline]
    pub fn is_nonbonded(self) -> bool {
        matches!(self, Self::ThreeApart | Self::Far)
    }
}

/// The 1-1 through 1-4 relation between every atom pair of a molecule.
///
/// Only relations up to three bonds are stored; any pair without an entry is
/// [`Relation::Far`]. When several paths connect a pair, the shortest one wins.
#[derive(Debug, Clone, Default)]
pub struct Separation {
    relations: HashMap<(usize, usize), Relation>,
}

impl Separation {
    pub fn new(molecule: &Molecule) -> Self {
        let mut separation = Self::default();
        for a in 0..molecule.atom_count() {
            separation.record(a, a, Relation::Same);
            for &b in molecule.neighbors(a) {
                separation.record(a, b, Relation::Bonded);
                for &c in molecule.neighbors(b) {
                    if c == a {
                        continue;
                    }
                    separation.record(a, c, Relation::TwoApart);
                    for &d in molecule.neighbors(c) {
                        if d == b || d == a {
                            continue;
                        }
                        separation.record(a, d, Relation::ThreeApart);
                    }
                }
            }
        }
        separation
    }

    /// Stores `relation` unless a closer one is already known.
    fn record(&mut self, a: usize, b: usize, relation: Relation) {
        let entry = self.relations.entry(key(a, b)).or_insert(relation);
        if relation < *entry {
            *entry = relation;
        }
    }

    pub fn relation(&self, a: usize, b: usize) -> Relation {
        self.relations
            .get(&key(a, b))
            .copied()
            .unwrap_or(Relation::Far)
    }

    /// Number of explicitly stored pairs (self pairs included).
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[inline]
fn key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}
