//! Loader error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur while reading network files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input file could not be opened
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A row violated a domain invariant
    #[error("line {line}: {source}")]
    Domain { line: u64, source: DomainError },
}
