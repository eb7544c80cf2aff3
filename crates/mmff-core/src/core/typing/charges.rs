use crate::core::models::molecule::Molecule;
use crate::core::tables::error::ParameterError;
use crate::core::tables::{AtomType, Tables};

/// MMFF partial charges from formal charges and bond charge increments.
///
/// `q_i = (1 - M_i u_i) q0_i + sum(u_k q0_k) + sum(w_ik)` over the neighbors `k` of
/// `i`, where `M` is the expected coordination, `u` the formal-charge adjustment and
/// `w_ik` the bond charge increment of `i` in its bond to `k`. Each atom hands
/// `u q0` of its formal charge to every neighbor, so the total charge is conserved.
pub fn partial_charges(
    molecule: &Molecule,
    types: &[AtomType],
    bond_type: impl Fn(usize, usize) -> u8,
    tables: &Tables,
) -> Result<Vec<f64>, ParameterError> {
    let formal: Vec<f64> = molecule
        .atoms()
        .iter()
        .map(|atom| f64::from(atom.formal_charge))
        .collect();

    let mut charges = Vec::with_capacity(types.len());
    for (i, &ti) in types.iter().enumerate() {
        let crd = f64::from(tables.props(ti)?.crd);
        let adjustment = tables.pbci(ti)?.fcadj;

        let mut shared = 0.0;
        let mut increments = 0.0;
        for &k in molecule.neighbors(i) {
            shared += tables.pbci(types[k])?.fcadj * formal[k];
            increments += tables.bond_charge_increment(ti, types[k], bond_type(i, k))?;
        }
        charges.push((1.0 - crd * adjustment) * formal[i] + shared + increments);
    }
    Ok(charges)
}
