use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{name}': {source}")]
    Csv { name: String, source: csv::Error },
    #[error("Table '{name}' is not sorted by its key columns (row {row} precedes row {previous})")]
    Unsorted {
        name: String,
        row: usize,
        previous: usize,
    },
    #[error("Table '{name}' is not available from the bundled parameter set")]
    NotBundled { name: String },
    #[error("Unknown force field variant: '{0}' (expected MMFF94, MMFF94s or MMFF94s+)")]
    UnknownVariant(String),
}

/// A parameter lookup that failed after every fallback step for its table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("No {table} parameters for atom types {types:?}")]
    Missing {
        table: &'static str,
        types: Vec<u8>,
    },
    #[error("No {table} constants for atomic numbers {elements:?}")]
    MissingElement {
        table: &'static str,
        elements: Vec<u8>,
    },
}
