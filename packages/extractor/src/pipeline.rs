//! Corpus processing pipeline: discovery, per-file loop, dataset output.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use roxmltree::Document;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{validate_source_dir, CORPUS_EXTENSION};
use crate::dataset::DatasetWriter;
use crate::error::{ExtractorError, Result};
use crate::extractor::{extract, ExtractOutcome};

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Corpus files discovered.
    pub discovered: usize,

    /// Records written to the dataset.
    pub written: usize,

    /// Documents skipped over a missing required field.
    pub skipped: usize,
}

/// Discover corpus files in a directory.
///
/// Lists `*.xml` files directly in `dir` (no recursion), sorted by file
/// name so output order is stable across platforms.
pub fn discover_corpus_files(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_source_dir(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(CORPUS_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Process a corpus directory into a dataset file.
///
/// For each discovered file: parse, extract, append the record or log the
/// skip. Documents are independent; no state is carried between them. A
/// malformed or unreadable file aborts the run, with all rows appended so
/// far preserved in the output.
///
/// # Arguments
/// * `source_dir` - Directory containing TEI XML files
/// * `output` - Output CSV path, appended to if it already holds a dataset
pub fn process_corpus(source_dir: &Path, output: &Path) -> Result<RunSummary> {
    let files = discover_corpus_files(source_dir)?;
    let mut writer = DatasetWriter::open(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut written = 0;
    let mut skipped = 0;

    for path in &files {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        pb.set_message(file_name.clone());

        let xml = std::fs::read_to_string(path)?;
        let doc = Document::parse(&xml).map_err(|source| ExtractorError::DocumentParse {
            file: file_name.clone(),
            source,
        })?;

        match extract(&doc, &file_name) {
            ExtractOutcome::Record(record) => {
                writer.append(&record)?;
                written += 1;
                debug!(file = file_name, "record written");
            }
            ExtractOutcome::Skipped { field } => {
                skipped += 1;
                warn!(file = file_name, field, "document skipped");
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    writer.finish()?;

    Ok(RunSummary {
        discovered: files.len(),
        written,
        skipped,
    })
}
