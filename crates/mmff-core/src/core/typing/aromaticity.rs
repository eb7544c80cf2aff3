//! Ring aromaticity by fixed-point iteration.
//!
//! A ring's verdict may depend on a fused neighbor: an exocyclic double bond that lies
//! in an aromatic ring donates one pi electron, but the verdict on that other ring may
//! not be known yet. Every ring therefore starts [`RingState::Undetermined`] and the
//! undetermined rings are re-evaluated pass after pass, each pass seeing the verdicts
//! of the previous ones, until a pass changes nothing.

use super::TypingError;
use crate::core::models::molecule::{Molecule, ring_contains_bond};
use crate::core::models::topology::BondOrder;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingState {
    Undetermined,
    Aromatic,
    NotAromatic,
}

/// Resolves every ring of `molecule` to aromatic or not.
///
/// Fails with [`TypingError::UnresolvedAromaticity`] when a pass makes no progress
/// while some ring is still undetermined.
pub fn resolve_aromaticity(molecule: &Molecule) -> Result<Vec<bool>, TypingError> {
    let rings = molecule.rings();
    let mut states = vec![RingState::Undetermined; rings.len()];
    let max_passes = rings.len() + 1;

    for pass in 0..max_passes {
        let mut changed = false;
        for index in 0..rings.len() {
            if states[index] != RingState::Undetermined {
                continue;
            }
            let verdict = evaluate_ring(molecule, index, &states);
            if verdict != RingState::Undetermined {
                states[index] = verdict;
                changed = true;
            }
        }
        debug!(pass, changed, "Aromaticity pass complete");
        if !changed {
            break;
        }
    }

    let unresolved: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|&(_, &state)| state == RingState::Undetermined)
        .map(|(index, _)| index)
        .collect();
    if !unresolved.is_empty() {
        return Err(TypingError::UnresolvedAromaticity { rings: unresolved });
    }

    Ok(states
        .into_iter()
        .map(|state| state == RingState::Aromatic)
        .collect())
}

/// Applies the MMFF aromaticity criteria to one ring given the current verdicts.
pub fn evaluate_ring(molecule: &Molecule, ring_index: usize, states: &[RingState]) -> RingState {
    let ring = &molecule.rings()[ring_index];
    let size = ring.len();
    if size != 5 && size != 6 {
        return RingState::NotAromatic;
    }
    if !ring.iter().all(|&atom| is_pi_capable(molecule, atom, size)) {
        return RingState::NotAromatic;
    }

    let ring_bonds: Vec<BondOrder> = (0..size)
        .filter_map(|k| molecule.bond_order(ring[k], ring[(k + 1) % size]))
        .collect();
    if ring_bonds.iter().all(|&order| order == BondOrder::Aromatic) {
        return RingState::Aromatic;
    }

    let mut pi_electrons: usize = ring_bonds
        .iter()
        .map(|order| match order {
            BondOrder::Double => 2,
            BondOrder::Aromatic => 1,
            _ => 0,
        })
        .sum();

    let mut lone_pair_donors = 0;
    for &atom in ring {
        let mut has_endocyclic_multiple = false;
        for &neighbor in molecule.neighbors(atom) {
            let Some(order) = molecule.bond_order(atom, neighbor) else {
                continue;
            };
            let in_this_ring = ring_contains_bond(ring, atom, neighbor);
            if in_this_ring {
                has_endocyclic_multiple |= order != BondOrder::Single;
                continue;
            }
            if order != BondOrder::Double {
                continue;
            }
            match exocyclic_ring_state(molecule, ring_index, atom, neighbor, states) {
                RingState::Aromatic => pi_electrons += 1,
                RingState::Undetermined => return RingState::Undetermined,
                RingState::NotAromatic => return RingState::NotAromatic,
            }
        }
        if size == 5 && !has_endocyclic_multiple && is_lone_pair_donor(molecule, atom) {
            lone_pair_donors += 1;
        }
    }

    if lone_pair_donors > 1 {
        return RingState::NotAromatic;
    }
    pi_electrons += 2 * lone_pair_donors;

    if pi_electrons == 6 {
        RingState::Aromatic
    } else {
        RingState::NotAromatic
    }
}

/// Verdict on the ring carrying the exocyclic bond `atom=partner`; rings containing
/// that bond other than `ring_index` are consulted, aromatic ones winning.
fn exocyclic_ring_state(
    molecule: &Molecule,
    ring_index: usize,
    atom: usize,
    partner: usize,
    states: &[RingState],
) -> RingState {
    let mut verdict = RingState::NotAromatic;
    for (other, ring) in molecule.rings().iter().enumerate() {
        if other == ring_index || !ring_contains_bond(ring, atom, partner) {
            continue;
        }
        match states[other] {
            RingState::Aromatic => return RingState::Aromatic,
            RingState::Undetermined => verdict = RingState::Undetermined,
            RingState::NotAromatic => {}
        }
    }
    verdict
}

fn has_multiple_bond(molecule: &Molecule, atom: usize) -> bool {
    molecule.neighbors(atom).iter().any(|&n| {
        molecule
            .bond_order(atom, n)
            .is_some_and(|order| order != BondOrder::Single)
    })
}

fn is_lone_pair_donor(molecule: &Molecule, atom: usize) -> bool {
    let degree = molecule.degree(atom);
    match molecule.atom(atom).atomic_number() {
        7 => degree == 3 && !has_multiple_bond(molecule, atom),
        8 | 16 => degree == 2,
        _ => false,
    }
}

/// Whether `atom` can take part in a conjugated ring of `ring_size` atoms.
fn is_pi_capable(molecule: &Molecule, atom: usize, ring_size: usize) -> bool {
    let degree = molecule.degree(atom);
    let multiple = has_multiple_bond(molecule, atom);
    match molecule.atom(atom).atomic_number() {
        6 => degree == 3 && multiple,
        7 => (degree == 2 && multiple) || (degree == 3 && (multiple || ring_size == 5)),
        8 | 16 => ring_size == 5 && degree == 2 && !multiple,
        _ => false,
    }
}
