//! Configuration constants and validation functions for the extractor.

use std::path::Path;

use crate::error::{ExtractorError, Result};

/// TEI namespace used by all corpus files.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

/// Classification scheme URI for the coarse (main) genre category.
pub const MAIN_TYPE_SCHEME: &str =
    "http://www.deutschestextarchiv.de/doku/klassifikation#dtamain";

/// Classification scheme URI for the fine (sub) genre category.
pub const SUB_TYPE_SCHEME: &str =
    "http://www.deutschestextarchiv.de/doku/klassifikation#dtasub";

/// Default output file name when none is given on the command line.
pub const DEFAULT_OUTPUT_FILE: &str = "dataset.csv";

/// File extension of corpus documents.
pub const CORPUS_EXTENSION: &str = "xml";

/// Validate that a source path exists and is a directory.
///
/// # Arguments
/// * `path` - Corpus directory given on the command line
///
/// # Returns
/// * `Ok(())` if the path is an existing directory
/// * `Err(ExtractorError::NotADirectory)` otherwise
pub fn validate_source_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ExtractorError::NotADirectory(path.to_path_buf()))
    }
}
