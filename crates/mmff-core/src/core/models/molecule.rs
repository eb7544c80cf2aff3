use super::atom::Atom;
use super::rings::{normalize_ring, perceive_rings};
use super::topology::{Bond, BondOrder};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("Bond {bond} references atom {atom}, but the molecule has only {atom_count} atoms")]
    AtomOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
    #[error("Bond {bond} connects atom {atom} to itself")]
    SelfBond { bond: usize, atom: usize },
    #[error("Atoms {i} and {j} are bonded more than once")]
    DuplicateBond { i: usize, j: usize },
    #[error("Ring {ring} is not a closed cycle of bonded atoms")]
    InvalidRing { ring: usize },
    #[error("Position buffer has length {actual}, expected {expected}")]
    PositionLength { expected: usize, actual: usize },
}

/// Connectivity-bearing input structure: atoms, bonds and the ring set.
///
/// The molecule is read-only from the force field's point of view. Rings are perceived
/// on construction unless supplied explicitly through [`Molecule::with_rings`].
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<usize>>,
    rings: Vec<Vec<usize>>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, MoleculeError> {
        let atom_count = atoms.len();
        let mut adjacency = vec![Vec::new(); atom_count];

        for (index, bond) in bonds.iter().enumerate() {
            for atom in [bond.i, bond.j] {
                if atom >= atom_count {
                    return Err(MoleculeError::AtomOutOfRange {
                        bond: index,
                        atom,
                        atom_count,
                    });
                }
            }
            if bond.i == bond.j {
                return Err(MoleculeError::SelfBond {
                    bond: index,
                    atom: bond.i,
                });
            }
            if adjacency[bond.i].contains(&bond.j) {
                return Err(MoleculeError::DuplicateBond {
                    i: bond.i.min(bond.j),
                    j: bond.i.max(bond.j),
                });
            }
            adjacency[bond.i].push(bond.j);
            adjacency[bond.j].push(bond.i);
        }

        let rings = perceive_rings(&adjacency);

        Ok(Self {
            atoms,
            bonds,
            adjacency,
            rings,
        })
    }

    /// Replaces the perceived ring set with a caller-provided one.
    pub fn with_rings(mut self, rings: Vec<Vec<usize>>) -> Result<Self, MoleculeError> {
        for (index, ring) in rings.iter().enumerate() {
            let closed = ring.len() >= 3
                && ring
                    .iter()
                    .zip(ring.iter().cycle().skip(1))
                    .all(|(&a, &b)| self.bond_between(a, b).is_some());
            if !closed {
                return Err(MoleculeError::InvalidRing { ring: index });
            }
        }
        self.rings = rings.iter().map(|r| normalize_ring(r)).collect();
        Ok(self)
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn atom(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    #[inline]
    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    #[inline]
    pub fn neighbors(&self, atom: usize) -> &[usize] {
        &self.adjacency[atom]
    }

    #[inline]
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.bonds
            .iter()
            .find(|bond| (bond.i == a && bond.j == b) || (bond.i == b && bond.j == a))
    }

    pub fn bond_order(&self, a: usize, b: usize) -> Option<BondOrder> {
        self.bond_between(a, b).map(|bond| bond.order)
    }

    pub fn is_in_ring_of_size(&self, atom: usize, size: usize) -> bool {
        self.rings
            .iter()
            .any(|ring| ring.len() == size && ring.contains(&atom))
    }

    pub fn is_ring_bond(&self, a: usize, b: usize) -> bool {
        self.rings.iter().any(|ring| ring_contains_bond(ring, a, b))
    }

    /// Coordinates packed as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_flat(&self) -> Vec<f64> {
        self.atoms
            .iter()
            .flat_map(|atom| [atom.position.x, atom.position.y, atom.position.z])
            .collect()
    }

    pub fn set_positions_flat(&mut self, positions: &[f64]) -> Result<(), MoleculeError> {
        let expected = 3 * self.atoms.len();
        if positions.len() != expected {
            return Err(MoleculeError::PositionLength {
                expected,
                actual: positions.len(),
            });
        }
        for (atom, chunk) in self.atoms.iter_mut().zip(positions.chunks_exact(3)) {
            atom.position = Point3::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(())
    }
}

/// Whether `a` and `b` are consecutive members of `ring`.
pub fn ring_contains_bond(ring: &[usize], a: usize, b: usize) -> bool {
    let len = ring.len();
    (0..len).any(|k| {
        let (x, y) = (ring[k], ring[(k + 1) % len]);
        (x == a && y == b) || (x == b && y == a)
    })
}
