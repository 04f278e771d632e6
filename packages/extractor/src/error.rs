//! Error types for the extractor.
//!
//! Only run-fatal conditions are errors. A document that is missing a
//! required field is not an error; it surfaces as a per-document skip
//! (see [`crate::extractor::ExtractOutcome`]).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Source path is not an existing directory.
    #[error("Source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// XML parsing of a corpus file failed.
    #[error("Failed to parse {file}: {source}")]
    DocumentParse {
        file: String,
        #[source]
        source: roxmltree::Error,
    },

    /// Existing output file does not start with the expected header row.
    #[error("Existing dataset {path} has header '{found}', expected '{expected}'")]
    HeaderMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
