//! Declarative field table for the TEI record schema.
//!
//! Each output column is described by a [`FieldSpec`]: which structural
//! query produces it and whether its absence skips the whole document.
//! Adding a metadata column (subtitle, gender, ...) means adding an entry
//! here and a matching field on [`crate::extractor::Record`], not new
//! control flow.

use crate::config::{MAIN_TYPE_SCHEME, SUB_TYPE_SCHEME};

/// Whether a missing field skips the document or degrades to an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence skips the whole document; no partial record is written.
    Required,
    /// Absence yields an empty string plus a warning; the record is kept.
    Optional,
}

/// Structural query backing one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `titleStmt/title[@type="main"]`, first match.
    MainTitle,
    /// Forenames then surnames of the first listed author, distinct,
    /// first-occurrence order, space-joined.
    Author,
    /// All text under `div` containers, whitespace-collapsed.
    BodyText,
    /// `textClass/classCode[@scheme=...]` texts, space-joined.
    ClassCode { scheme: &'static str },
    /// `date[@type="publication"]` under the source description; smallest
    /// distinct value wins.
    PublicationYear,
}

/// One entry in the field table: column name, query, validity policy.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Output column this query fills.
    pub column: &'static str,

    /// Structural query to run against the document.
    pub kind: FieldKind,

    /// Required or optional.
    pub presence: Presence,
}

/// Field table for the TEI corpus schema, in output column order.
///
/// The `file` column is not listed here; it comes from the file name, not
/// from a query.
#[must_use]
pub fn tei_field_set() -> [FieldSpec; 6] {
    [
        FieldSpec {
            column: "title",
            kind: FieldKind::MainTitle,
            presence: Presence::Required,
        },
        FieldSpec {
            column: "author",
            kind: FieldKind::Author,
            presence: Presence::Optional,
        },
        FieldSpec {
            column: "text",
            kind: FieldKind::BodyText,
            presence: Presence::Optional,
        },
        FieldSpec {
            column: "main_type",
            kind: FieldKind::ClassCode {
                scheme: MAIN_TYPE_SCHEME,
            },
            presence: Presence::Optional,
        },
        FieldSpec {
            column: "sub_type",
            kind: FieldKind::ClassCode {
                scheme: SUB_TYPE_SCHEME,
            },
            presence: Presence::Optional,
        },
        FieldSpec {
            column: "year",
            kind: FieldKind::PublicationYear,
            presence: Presence::Required,
        },
    ]
}
