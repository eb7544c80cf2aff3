use super::error::ParameterError;
use super::table::KeyedRow;
use super::{AtomType, Tables};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DonorAcceptor {
    #[serde(rename = "-")]
    Neither,
    #[serde(rename = "D")]
    Donor,
    #[serde(rename = "A")]
    Acceptor,
}

/// Buffered 14-7 van der Waals parameters (MMFFVDW).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VdwRow {
    pub atom_type: AtomType,
    /// Atomic polarizability (Å³).
    pub alpha: f64,
    /// Slater–Kirkwood effective number of valence electrons.
    pub n: f64,
    pub a: f64,
    pub g: f64,
    pub donor_acceptor: DonorAcceptor,
}

impl VdwRow {
    /// Minimum-energy separation of a like pair, `A * alpha^(1/4)`.
    #[inline]
    pub fn r_star(&self) -> f64 {
        self.a * self.alpha.powf(0.25)
    }
}

impl KeyedRow for VdwRow {
    const KEY_COLUMNS: usize = 1;
    fn key(&self, _column: usize) -> i32 {
        i32::from(self.atom_type)
    }
}

/// Combined parameters for an unlike pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VdwPair {
    pub r_star: f64,
    pub epsilon: f64,
}

const B: f64 = 0.2;
const BETA: f64 = 12.0;
const DARAD: f64 = 0.8;
const DAEPS: f64 = 0.5;

impl Tables {
    pub fn vdw(&self, atom_type: AtomType) -> Result<&VdwRow, ParameterError> {
        self.vdw
            .lookup(&[i32::from(atom_type)])
            .ok_or_else(|| ParameterError::Missing {
                table: "van der Waals",
                types: vec![atom_type],
            })
    }

    /// Applies the MMFF combination rules to types `ti` and `tj`.
    ///
    /// Hydrogen-bonding donor/acceptor pairs have their separation scaled by 0.8 and
    /// their well depth by 0.5, and skip the asymmetry correction on `r_star`.
    pub fn vdw_pair(&self, ti: AtomType, tj: AtomType) -> Result<VdwPair, ParameterError> {
        let vi = self.vdw(ti)?;
        let vj = self.vdw(tj)?;
        let (ri, rj) = (vi.r_star(), vj.r_star());

        let any_donor = vi.donor_acceptor == DonorAcceptor::Donor
            || vj.donor_acceptor == DonorAcceptor::Donor;
        let gamma = (ri - rj) / (ri + rj);
        let b = if any_donor { 0.0 } else { B };
        let mut r_star = 0.5 * (ri + rj) * (1.0 + b * (1.0 - (-BETA * gamma * gamma).exp()));

        let mut epsilon = 181.16 * vi.g * vj.g * vi.alpha * vj.alpha
            / ((vi.alpha / vi.n).sqrt() + (vj.alpha / vj.n).sqrt())
            / r_star.powi(6);

        let donor_acceptor = matches!(
            (vi.donor_acceptor, vj.donor_acceptor),
            (DonorAcceptor::Donor, DonorAcceptor::Acceptor)
                | (DonorAcceptor::Acceptor, DonorAcceptor::Donor)
        );
        if donor_acceptor {
            r_star *= DARAD;
            epsilon *= DAEPS;
        }

        Ok(VdwPair { r_star, epsilon })
    }
}
