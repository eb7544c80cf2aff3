use super::error::TableError;
use super::search::{self, Searchable};
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

/// A row type of a parameter table, identified by its leading integer key columns.
pub trait KeyedRow: DeserializeOwned + Clone {
    const KEY_COLUMNS: usize;

    fn key(&self, column: usize) -> i32;

    fn key_vec(&self) -> Vec<i32> {
        (0..Self::KEY_COLUMNS).map(|c| self.key(c)).collect()
    }
}

/// Rows sorted ascending by key columns, ready for [`search::find`].
#[derive(Debug, Clone)]
pub struct Table<R> {
    name: String,
    rows: Vec<R>,
}

impl<R: KeyedRow> Table<R> {
    /// Wraps `rows`, rejecting input that is not sorted by key columns.
    pub fn from_rows(name: impl Into<String>, rows: Vec<R>) -> Result<Self, TableError> {
        let name = name.into();
        for (previous, pair) in rows.windows(2).enumerate() {
            if compare_keys(&pair[0], &pair[1]) == Ordering::Greater {
                return Err(TableError::Unsorted {
                    name,
                    row: previous + 1,
                    previous,
                });
            }
        }
        Ok(Self { name, rows })
    }

    pub fn from_csv_str(name: &str, content: &str) -> Result<Self, TableError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(content.as_bytes());
        Self::from_reader(name, reader)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let name = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| TableError::Io {
            path: name.clone(),
            source: e,
        })?;
        Self::from_csv_str(&name, &content)
    }

    fn from_reader<T: std::io::Read>(
        name: &str,
        mut reader: csv::Reader<T>,
    ) -> Result<Self, TableError> {
        let mut rows = Vec::new();
        for result in reader.deserialize::<R>() {
            let record = result.map_err(|e| TableError::Csv {
                name: name.to_string(),
                source: e,
            })?;
            rows.push(record);
        }
        Self::from_rows(name, rows)
    }

    /// Combines two tables; rows of `overrides` replace rows of `self` with equal keys.
    pub fn merged_with(self, overrides: Table<R>) -> Self {
        let mut merged: BTreeMap<Vec<i32>, R> = BTreeMap::new();
        for row in self.rows.into_iter().chain(overrides.rows) {
            merged.insert(row.key_vec(), row);
        }
        Self {
            name: format!("{}+{}", self.name, overrides.name),
            rows: merged.into_values().collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    #[inline]
    pub fn lookup(&self, keys: &[i32]) -> Option<&R> {
        search::find(self, keys).map(|row| &self.rows[row])
    }
}

impl<R: KeyedRow> Searchable for Table<R> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn key(&self, row: usize, column: usize) -> i32 {
        self.rows[row].key(column)
    }
}

fn compare_keys<R: KeyedRow>(a: &R, b: &R) -> Ordering {
    (0..R::KEY_COLUMNS)
        .map(|c| a.key(c).cmp(&b.key(c)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
