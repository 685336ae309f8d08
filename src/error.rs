//! Error types for the cryptanalysis engine
//!
//! Every variant is raised at a boundary (key construction, model loading,
//! configuration, file access) before any search work starts. A search that
//! fails to find a convincing key is not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building keys, models, or solvers
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("alphabet and key length must match: alphabet has {alphabet} symbols, key has {key}")]
    KeyLengthMismatch { alphabet: usize, key: usize },

    #[error("invalid frequency model: {0}")]
    InvalidModel(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("cannot read {}: {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CrackError>;

/// Read a text file, mapping I/O failures to [`CrackError::FileUnavailable`]
pub fn read_text_file(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| CrackError::FileUnavailable { path, source })
}
