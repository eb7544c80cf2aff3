//! Symbolic MMFF atom-type rules.
//!
//! Heavy atoms are matched against [`HEAVY_ATOM_RULES`] in order, first match wins.
//! Hydrogens are typed afterwards from the type of the heavy atom they are attached
//! to, through [`HYDROGEN_TYPES`].

use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::tables::AtomType;
use phf::{Map, phf_map};

/// Connectivity view of one atom, as seen by the typing predicates.
pub struct AtomEnvironment<'a> {
    molecule: &'a Molecule,
    atom: usize,
    aromatic_rings: &'a [bool],
}

impl<'a> AtomEnvironment<'a> {
    pub fn new(molecule: &'a Molecule, atom: usize, aromatic_rings: &'a [bool]) -> Self {
        Self {
            molecule,
            atom,
            aromatic_rings,
        }
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.molecule.atom(self.atom).atomic_number()
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.molecule.degree(self.atom)
    }

    fn bonds(&self) -> impl Iterator<Item = (usize, BondOrder)> + '_ {
        self.molecule.neighbors(self.atom).iter().filter_map(|&n| {
            self.molecule
                .bond_order(self.atom, n)
                .map(|order| (n, order))
        })
    }

    pub fn count_bonds(&self, order: BondOrder) -> usize {
        self.bonds().filter(|&(_, o)| o == order).count()
    }

    pub fn all_single(&self) -> bool {
        self.bonds().all(|(_, order)| order == BondOrder::Single)
    }

    /// Whether the atom has a double bond to an atom with atomic number `z`.
    pub fn double_bonded_to(&self, z: u8) -> bool {
        self.bonds().any(|(n, order)| {
            order == BondOrder::Double && self.molecule.atom(n).atomic_number() == z
        })
    }

    pub fn hydrogen_count(&self) -> usize {
        self.molecule
            .neighbors(self.atom)
            .iter()
            .filter(|&&n| self.molecule.atom(n).is_hydrogen())
            .count()
    }

    pub fn in_ring_of_size(&self, size: usize) -> bool {
        self.molecule.is_in_ring_of_size(self.atom, size)
    }

    pub fn in_aromatic_ring_of_size(&self, size: usize) -> bool {
        self.molecule
            .rings()
            .iter()
            .zip(self.aromatic_rings)
            .any(|(ring, &aromatic)| aromatic && ring.len() == size && ring.contains(&self.atom))
    }

    /// Whether a neighboring carbon carries a C=O or C=S double bond.
    pub fn bonded_to_carbonyl_carbon(&self) -> bool {
        self.molecule.neighbors(self.atom).iter().any(|&n| {
            let neighbor = AtomEnvironment::new(self.molecule, n, self.aromatic_rings);
            neighbor.atomic_number() == 6
                && (neighbor.double_bonded_to(8) || neighbor.double_bonded_to(16))
        })
    }
}

pub struct TypingRule {
    pub atom_type: AtomType,
    pub symbol: &'static str,
    pub atomic_number: u8,
    pub matches: fn(&AtomEnvironment) -> bool,
}

#[rustfmt::skip]
pub static HEAVY_ATOM_RULES: &[TypingRule] = &[
    // Carbon
    TypingRule { atom_type: 37, symbol: "CB", atomic_number: 6, matches: |e| e.degree() == 3 && e.in_aromatic_ring_of_size(6) },
    TypingRule { atom_type: 78, symbol: "C5", atomic_number: 6, matches: |e| e.degree() == 3 && e.in_aromatic_ring_of_size(5) },
    TypingRule { atom_type: 22, symbol: "CR3R", atomic_number: 6, matches: |e| e.degree() == 4 && e.all_single() && e.in_ring_of_size(3) },
    TypingRule { atom_type: 20, symbol: "CR4R", atomic_number: 6, matches: |e| e.degree() == 4 && e.all_single() && e.in_ring_of_size(4) },
    TypingRule { atom_type: 1, symbol: "CR", atomic_number: 6, matches: |e| e.degree() == 4 && e.all_single() },
    TypingRule { atom_type: 3, symbol: "C=O", atomic_number: 6, matches: |e| e.degree() == 3 && e.count_bonds(BondOrder::Double) == 1 && (e.double_bonded_to(8) || e.double_bonded_to(7)) },
    TypingRule { atom_type: 2, symbol: "C=C", atomic_number: 6, matches: |e| e.degree() == 3 && e.count_bonds(BondOrder::Double) == 1 && e.double_bonded_to(6) },
    TypingRule { atom_type: 4, symbol: "CSP", atomic_number: 6, matches: |e| e.degree() == 2 && (e.count_bonds(BondOrder::Triple) == 1 || e.count_bonds(BondOrder::Double) == 2) },
    // Nitrogen
    TypingRule { atom_type: 38, symbol: "NPYD", atomic_number: 7, matches: |e| e.degree() == 2 && e.in_aromatic_ring_of_size(6) },
    TypingRule { atom_type: 39, symbol: "NPYL", atomic_number: 7, matches: |e| e.degree() == 3 && e.in_aromatic_ring_of_size(5) },
    TypingRule { atom_type: 10, symbol: "NC=O", atomic_number: 7, matches: |e| e.degree() == 3 && e.all_single() && e.bonded_to_carbonyl_carbon() },
    TypingRule { atom_type: 8, symbol: "NR", atomic_number: 7, matches: |e| e.degree() == 3 && e.all_single() },
    TypingRule { atom_type: 9, symbol: "N=C", atomic_number: 7, matches: |e| e.degree() == 2 && e.count_bonds(BondOrder::Double) == 1 && e.double_bonded_to(6) },
    // Oxygen
    TypingRule { atom_type: 7, symbol: "O=C", atomic_number: 8, matches: |e| e.degree() == 1 && e.count_bonds(BondOrder::Double) == 1 },
    TypingRule { atom_type: 70, symbol: "OH2", atomic_number: 8, matches: |e| e.degree() == 2 && e.hydrogen_count() == 2 },
    TypingRule { atom_type: 6, symbol: "OR", atomic_number: 8, matches: |e| e.degree() == 2 && e.all_single() },
    // Halogens and sulfur
    TypingRule { atom_type: 11, symbol: "F", atomic_number: 9, matches: |e| e.degree() == 1 && e.all_single() },
    TypingRule { atom_type: 12, symbol: "CL", atomic_number: 17, matches: |e| e.degree() == 1 && e.all_single() },
    TypingRule { atom_type: 15, symbol: "S", atomic_number: 16, matches: |e| e.degree() == 2 && e.all_single() },
];

/// Hydrogen type and symbol keyed by the type of the attached heavy atom.
#[rustfmt::skip]
pub static HYDROGEN_TYPES: Map<u8, (AtomType, &'static str)> = phf_map! {
    1u8 => (5, "HC"),
    2u8 => (5, "HC"),
    3u8 => (5, "HC"),
    4u8 => (5, "HC"),
    20u8 => (5, "HC"),
    22u8 => (5, "HC"),
    37u8 => (5, "HC"),
    78u8 => (5, "HC"),
    6u8 => (21, "HOR"),
    70u8 => (31, "HOH"),
    8u8 => (23, "HNR"),
    39u8 => (23, "HPYL"),
    10u8 => (28, "HNCO"),
};

/// First heavy-atom rule matching `environment`, if any.
pub fn match_heavy_atom(environment: &AtomEnvironment) -> Option<&'static TypingRule> {
    let z = environment.atomic_number();
    HEAVY_ATOM_RULES
        .iter()
        .find(|rule| rule.atomic_number == z && (rule.matches)(environment))
}

/// Hydrogen type for a hydrogen attached to an atom of `parent_type`.
pub fn hydrogen_type(parent_type: AtomType) -> Option<(AtomType, &'static str)> {
    HYDROGEN_TYPES.get(&parent_type).copied()
}
