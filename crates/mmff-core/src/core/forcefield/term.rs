use super::angle_bend::AngleBend;
use super::bond_stretch::BondStretch;
use super::electrostatic::Electrostatic;
use super::out_of_plane::OutOfPlane;
use super::stretch_bend::StretchBend;
use super::torsion::TorsionAngle;
use super::vdw::VanDerWaals;
use std::fmt;
use std::ops::{Add, AddAssign};

/// The seven MMFF energy-term families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermKind {
    BondStretch,
    AngleBend,
    StretchBend,
    OutOfPlane,
    TorsionAngle,
    VanDerWaals,
    Electrostatic,
}

impl TermKind {
    pub const ALL: [TermKind; 7] = [
        Self::BondStretch,
        Self::AngleBend,
        Self::StretchBend,
        Self::OutOfPlane,
        Self::TorsionAngle,
        Self::VanDerWaals,
        Self::Electrostatic,
    ];

    /// Kebab-case name, as used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Self::BondStretch => "bond-stretch",
            Self::AngleBend => "angle-bend",
            Self::StretchBend => "stretch-bend",
            Self::OutOfPlane => "out-of-plane",
            Self::TorsionAngle => "torsion-angle",
            Self::VanDerWaals => "van-der-waals",
            Self::Electrostatic => "electrostatic",
        }
    }

    /// Parses either the kebab-case key or the spaced form ("van der waals").
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|kind| kind.key() == normalized)
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single energy contribution with its atoms and resolved constants.
///
/// Terms never cache geometry: every call reads the live position buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyTerm {
    BondStretch(BondStretch),
    AngleBend(AngleBend),
    StretchBend(StretchBend),
    OutOfPlane(OutOfPlane),
    TorsionAngle(TorsionAngle),
    VanDerWaals(VanDerWaals),
    Electrostatic(Electrostatic),
}

impl EnergyTerm {
    pub fn kind(&self) -> TermKind {
        match self {
            Self::BondStretch(_) => TermKind::BondStretch,
            Self::AngleBend(_) => TermKind::AngleBend,
            Self::StretchBend(_) => TermKind::StretchBend,
            Self::OutOfPlane(_) => TermKind::OutOfPlane,
            Self::TorsionAngle(_) => TermKind::TorsionAngle,
            Self::VanDerWaals(_) => TermKind::VanDerWaals,
            Self::Electrostatic(_) => TermKind::Electrostatic,
        }
    }

    #[inline]
    pub fn energy(&self, positions: &[f64]) -> f64 {
        match self {
            Self::BondStretch(t) => t.energy(positions),
            Self::AngleBend(t) => t.energy(positions),
            Self::StretchBend(t) => t.energy(positions),
            Self::OutOfPlane(t) => t.energy(positions),
            Self::TorsionAngle(t) => t.energy(positions),
            Self::VanDerWaals(t) => t.energy(positions),
            Self::Electrostatic(t) => t.energy(positions),
        }
    }

    /// Adds this term's gradient into `gradient`; the caller zeroes it once per
    /// evaluation.
    #[inline]
    pub fn accumulate_gradient(&self, positions: &[f64], gradient: &mut [f64]) {
        match self {
            Self::BondStretch(t) => t.accumulate_gradient(positions, gradient),
            Self::AngleBend(t) => t.accumulate_gradient(positions, gradient),
            Self::StretchBend(t) => t.accumulate_gradient(positions, gradient),
            Self::OutOfPlane(t) => t.accumulate_gradient(positions, gradient),
            Self::TorsionAngle(t) => t.accumulate_gradient(positions, gradient),
            Self::VanDerWaals(t) => t.accumulate_gradient(positions, gradient),
            Self::Electrostatic(t) => t.accumulate_gradient(positions, gradient),
        }
    }
}

impl From<BondStretch> for EnergyTerm {
    fn from(term: BondStretch) -> Self {
        Self::BondStretch(term)
    }
}

impl From<AngleBend> for EnergyTerm {
    fn from(term: AngleBend) -> Self {
        Self::AngleBend(term)
    }
}

impl From<StretchBend> for EnergyTerm {
    fn from(term: StretchBend) -> Self {
        Self::StretchBend(term)
    }
}

impl From<OutOfPlane> for EnergyTerm {
    fn from(term: OutOfPlane) -> Self {
        Self::OutOfPlane(term)
    }
}

impl From<TorsionAngle> for EnergyTerm {
    fn from(term: TorsionAngle) -> Self {
        Self::TorsionAngle(term)
    }
}

impl From<VanDerWaals> for EnergyTerm {
    fn from(term: VanDerWaals) -> Self {
        Self::VanDerWaals(term)
    }
}

impl From<Electrostatic> for EnergyTerm {
    fn from(term: Electrostatic) -> Self {
        Self::Electrostatic(term)
    }
}

/// Energy split by term family, in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyComponents {
    pub bond_stretch: f64,
    pub angle_bend: f64,
    pub stretch_bend: f64,
    pub out_of_plane: f64,
    pub torsion_angle: f64,
    pub van_der_waals: f64,
    pub electrostatic: f64,
}

impl EnergyComponents {
    #[inline]
    pub fn total(&self) -> f64 {
        self.bond_stretch
            + self.angle_bend
            + self.stretch_bend
            + self.out_of_plane
            + self.torsion_angle
            + self.van_der_waals
            + self.electrostatic
    }

    pub fn get(&self, kind: TermKind) -> f64 {
        match kind {
            TermKind::BondStretch => self.bond_stretch,
            TermKind::AngleBend => self.angle_bend,
            TermKind::StretchBend => self.stretch_bend,
            TermKind::OutOfPlane => self.out_of_plane,
            TermKind::TorsionAngle => self.torsion_angle,
            TermKind::VanDerWaals => self.van_der_waals,
            TermKind::Electrostatic => self.electrostatic,
        }
    }

    fn slot_mut(&mut self, kind: TermKind) -> &mut f64 {
        match kind {
            TermKind::BondStretch => &mut self.bond_stretch,
            TermKind::AngleBend => &mut self.angle_bend,
            TermKind::StretchBend => &mut self.stretch_bend,
            TermKind::OutOfPlane => &mut self.out_of_plane,
            TermKind::TorsionAngle => &mut self.torsion_angle,
            TermKind::VanDerWaals => &mut self.van_der_waals,
            TermKind::Electrostatic => &mut self.electrostatic,
        }
    }

    pub fn add_to(&mut self, kind: TermKind, energy: f64) {
        *self.slot_mut(kind) += energy;
    }
}

impl Add for EnergyComponents {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for EnergyComponents {
    fn add_assign(&mut self, rhs: Self) {
        for kind in TermKind::ALL {
            self.add_to(kind, rhs.get(kind));
        }
    }
}
