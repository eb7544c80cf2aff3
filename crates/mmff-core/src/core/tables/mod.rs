//! MMFF94 parameter tables and their lookup rules.
//!
//! A [`Tables`] bundle holds every table needed to parameterize a molecule: bond
//! stretching (`mmffbond` plus the `mmffbndk` empirical references), angle bending,
//! stretch-bend coupling (`mmffstbn` plus the `mmffdfsb` defaults), out-of-plane
//! bending, torsions, van der Waals, bond charge increments, atom properties and the
//! type-equivalence hierarchy. Each table is sorted by its key columns and searched
//! with the multi-column binary search of [`search`].
//!
//! Lookups are exposed as methods on [`Tables`], one file per table family. Each
//! method reproduces that table's fallback chain (equivalence levels, wildcard rows,
//! empirical rules) and fails with [`ParameterError`] once the chain is exhausted.
//!
//! The three variants differ only in their out-of-plane and torsion files:
//!
//! | Variant    | Out-of-plane      | Torsion                                   |
//! |------------|-------------------|-------------------------------------------|
//! | `MMFF94`   | `mmffoop`         | `mmfftor`                                 |
//! | `MMFF94s`  | `mmff94s_oop`     | `mmff94s_tor`                             |
//! | `MMFF94s+` | `mmff94s_oop`     | `mmff94s_tor` merged with the supplement  |

pub mod angle;
pub mod bond;
pub mod charge;
pub mod elements;
pub mod error;
pub mod oop;
pub mod props;
pub mod registry;
pub mod search;
pub mod source;
pub mod stbn;
pub mod table;
pub mod torsion;
pub mod vdw;

use self::angle::AngleRow;
use self::bond::{BondReferenceRow, BondRow};
use self::charge::{ChargeRow, PbciRow};
use self::error::TableError;
use self::oop::OutOfPlaneRow;
use self::props::{AtomProps, EquivalenceRow};
use self::source::TableSource;
use self::stbn::{StretchBendDefaultRow, StretchBendRow};
use self::table::Table;
use self::torsion::TorsionRow;
use self::vdw::VdwRow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Numeric MMFF atom type. `0` is the wildcard and never a valid assignment.
pub type AtomType = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Mmff94,
    Mmff94s,
    Mmff94sPlus,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mmff94 => "MMFF94",
            Self::Mmff94s => "MMFF94s",
            Self::Mmff94sPlus => "MMFF94s+",
        }
    }

    fn out_of_plane_file(self) -> &'static str {
        match self {
            Self::Mmff94 => "mmffoop.csv",
            Self::Mmff94s | Self::Mmff94sPlus => "mmff94s_oop.csv",
        }
    }

    fn torsion_file(self) -> &'static str {
        match self {
            Self::Mmff94 => "mmfftor.csv",
            Self::Mmff94s | Self::Mmff94sPlus => "mmff94s_tor.csv",
        }
    }

    fn torsion_supplement_file(self) -> Option<&'static str> {
        match self {
            Self::Mmff94sPlus => Some("mmff94s_tor_supplement.csv"),
            _ => None,
        }
    }
}

impl FromStr for Variant {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mmff94" => Ok(Self::Mmff94),
            "mmff94s" => Ok(Self::Mmff94s),
            "mmff94s+" => Ok(Self::Mmff94sPlus),
            _ => Err(TableError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The complete, read-only parameter set of one force field variant.
#[derive(Debug, Clone)]
pub struct Tables {
    variant: Variant,
    props: Table<AtomProps>,
    equivalences: Table<EquivalenceRow>,
    bonds: Table<BondRow>,
    bond_references: Table<BondReferenceRow>,
    angles: Table<AngleRow>,
    stretch_bends: Table<StretchBendRow>,
    stretch_bend_defaults: Table<StretchBendDefaultRow>,
    out_of_planes: Table<OutOfPlaneRow>,
    torsions: Table<TorsionRow>,
    vdw: Table<VdwRow>,
    charges: Table<ChargeRow>,
    pbci: Table<PbciRow>,
}

impl Tables {
    /// Loads `variant` from the parameter files compiled into the library.
    pub fn bundled(variant: Variant) -> Result<Self, TableError> {
        Self::load(&TableSource::Bundled, variant)
    }

    /// Loads `variant` from CSV files in `dir` named like the bundled ones.
    pub fn from_dir(dir: &Path, variant: Variant) -> Result<Self, TableError> {
        Self::load(&TableSource::Directory(dir.to_path_buf()), variant)
    }

    pub fn load(source: &TableSource, variant: Variant) -> Result<Self, TableError> {
        debug!(variant = variant.name(), ?source, "Loading parameter tables");

        let mut torsions = source.load::<TorsionRow>(variant.torsion_file())?;
        if let Some(supplement) = variant.torsion_supplement_file() {
            torsions = torsions.merged_with(source.load(supplement)?);
        }

        Ok(Self {
            variant,
            props: source.load("mmffprop.csv")?,
            equivalences: source.load("mmffdef.csv")?,
            bonds: source.load("mmffbond.csv")?,
            bond_references: source.load("mmffbndk.csv")?,
            angles: source.load("mmffang.csv")?,
            stretch_bends: source.load("mmffstbn.csv")?,
            stretch_bend_defaults: source.load("mmffdfsb.csv")?,
            out_of_planes: source.load(variant.out_of_plane_file())?,
            torsions,
            vdw: source.load("mmffvdw.csv")?,
            charges: source.load("mmffchg.csv")?,
            pbci: source.load("mmffpbci.csv")?,
        })
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }
}
