use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::molecule::MoleculeError;
use crate::core::tables::error::{ParameterError, TableError};
use crate::core::typing::TypingError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Parameter tables unavailable: {source}")]
    Tables {
        #[from]
        source: TableError,
    },

    #[error("Atom typing failed: {source}")]
    Typing {
        #[from]
        source: TypingError,
    },

    #[error("Force field construction failed: {source}")]
    Parameter {
        #[from]
        source: ParameterError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid molecule: {source}")]
    Molecule {
        #[from]
        source: MoleculeError,
    },

    #[error("Position buffer has {actual} values, expected {expected}")]
    PositionLength { expected: usize, actual: usize },
}
