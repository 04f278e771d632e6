//! Textarchiv Extractor - Flatten a TEI corpus into a CSV dataset.
//!
//! This crate converts a directory of TEI-encoded XML documents (one
//! literary or historical text per file) into a single flat CSV dataset
//! with one row per document, suitable for corpus-linguistics or NLP use.
//!
//! # Example
//!
//! ```
//! use textarchiv_extractor::xml::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("Es  war\n einmal"), "Es war einmal");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Namespace and scheme constants, input validation
//! - [`error`]: Error types and Result alias
//! - [`fields`]: Declarative field table (column, query, validity policy)
//! - [`xml`]: Namespace-aware XML utilities
//! - [`extractor`]: Record extraction core
//! - [`dataset`]: Append-only CSV dataset writer
//! - [`pipeline`]: File discovery and per-file processing loop
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extractor;
pub mod fields;
pub mod pipeline;
pub mod xml;

// Re-export main functions
pub use pipeline::process_corpus;

// Re-export commonly used items
pub use dataset::DatasetWriter;
pub use error::{ExtractorError, Result};
pub use extractor::{extract, ExtractOutcome, Record};
pub use pipeline::RunSummary;
