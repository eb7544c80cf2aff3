use super::error::TableError;
use super::table::{KeyedRow, Table};
use phf::{Map, phf_map};
use std::path::PathBuf;

#[rustfmt::skip]
static BUNDLED: Map<&'static str, &'static str> = phf_map! {
    "mmffprop.csv" => include_str!("../../../data/mmffprop.csv"),
    "mmffdef.csv" => include_str!("../../../data/mmffdef.csv"),
    "mmffbond.csv" => include_str!("../../../data/mmffbond.csv"),
    "mmffbndk.csv" => include_str!("../../../data/mmffbndk.csv"),
    "mmffang.csv" => include_str!("../../../data/mmffang.csv"),
    "mmffstbn.csv" => include_str!("../../../data/mmffstbn.csv"),
    "mmffdfsb.csv" => include_str!("../../../data/mmffdfsb.csv"),
    "mmffoop.csv" => include_str!("../../../data/mmffoop.csv"),
    "mmff94s_oop.csv" => include_str!("../../../data/mmff94s_oop.csv"),
    "mmfftor.csv" => include_str!("../../../data/mmfftor.csv"),
    "mmff94s_tor.csv" => include_str!("../../../data/mmff94s_tor.csv"),
    "mmff94s_tor_supplement.csv" => include_str!("../../../data/mmff94s_tor_supplement.csv"),
    "mmffvdw.csv" => include_str!("../../../data/mmffvdw.csv"),
    "mmffchg.csv" => include_str!("../../../data/mmffchg.csv"),
    "mmffpbci.csv" => include_str!("../../../data/mmffpbci.csv"),
};

/// Where parameter files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// The parameter subset compiled into the library.
    Bundled,
    /// A directory holding files with the bundled names and column layout.
    Directory(PathBuf),
}

impl TableSource {
    pub fn load<R: KeyedRow>(&self, file: &str) -> Result<Table<R>, TableError> {
        match self {
            Self::Bundled => {
                let content = BUNDLED.get(file).ok_or_else(|| TableError::NotBundled {
                    name: file.to_string(),
                })?;
                Table::from_csv_str(file, content)
            }
            Self::Directory(dir) => Table::from_csv_path(&dir.join(file)),
        }
    }
}
