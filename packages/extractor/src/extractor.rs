//! Record extraction - the core of the pipeline.
//!
//! Runs the declarative field table (see [`crate::fields`]) against one
//! parsed TEI document and applies the per-field validity policy: required
//! fields skip the whole document when absent, optional fields degrade to
//! an empty string with a warning.

use roxmltree::Document;
use serde::Serialize;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::fields::{tei_field_set, FieldKind, Presence};
use crate::xml::{collapse_whitespace, get_text, has_tei_tag, tei_children, tei_descendants};

/// One flattened output row representing one source document.
///
/// Every column always carries a value (possibly the empty string); field
/// declaration order matches the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Base file name of the source document.
    pub file: String,

    /// Main title (required).
    pub title: String,

    /// Forenames and surnames of the first listed author, space-joined.
    pub author: String,

    /// Whitespace-normalized body text.
    pub text: String,

    /// Coarse genre classification code(s).
    pub main_type: String,

    /// Fine genre classification code(s).
    pub sub_type: String,

    /// Publication year (required).
    pub year: String,
}

impl Record {
    /// Fixed CSV column order.
    pub const COLUMNS: [&'static str; 7] = [
        "file",
        "title",
        "author",
        "text",
        "main_type",
        "sub_type",
        "year",
    ];

    fn set(&mut self, column: &str, value: String) {
        match column {
            "title" => self.title = value,
            "author" => self.author = value,
            "text" => self.text = value,
            "main_type" => self.main_type = value,
            "sub_type" => self.sub_type = value,
            "year" => self.year = value,
            _ => debug_assert!(false, "unknown column: {column}"),
        }
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// A complete record, ready to append to the dataset.
    Record(Record),

    /// The document is skipped because a required field is absent.
    Skipped {
        /// Column name of the missing required field.
        field: &'static str,
    },
}

/// Extract a record from one parsed TEI document.
///
/// Walks the field table in column order. The first absent required field
/// ends the extraction with [`ExtractOutcome::Skipped`]; absent optional
/// fields are logged and left empty.
///
/// # Arguments
/// * `doc` - Parsed TEI document
/// * `file_name` - Base file name, used for the `file` column and diagnostics
#[must_use]
pub fn extract(doc: &Document<'_>, file_name: &str) -> ExtractOutcome {
    let mut record = Record {
        file: file_name.to_string(),
        ..Record::default()
    };

    for spec in tei_field_set() {
        let value = query_field(doc, spec.kind);

        if value.is_empty() {
            match spec.presence {
                Presence::Required => {
                    warn!(file = file_name, field = spec.column, "missing:{}", spec.column);
                    return ExtractOutcome::Skipped { field: spec.column };
                }
                Presence::Optional => {
                    warn!(file = file_name, field = spec.column, "field is empty");
                }
            }
        }

        record.set(spec.column, value);
    }

    ExtractOutcome::Record(record)
}

/// Run one structural query against the document.
fn query_field(doc: &Document<'_>, kind: FieldKind) -> String {
    match kind {
        FieldKind::MainTitle => find_main_title(doc),
        FieldKind::Author => collect_author(doc),
        FieldKind::BodyText => collect_body_text(doc),
        FieldKind::ClassCode { scheme } => collect_class_codes(doc, scheme),
        FieldKind::PublicationYear => find_publication_year(doc),
    }
}

/// First `titleStmt/title[@type="main"]` text.
fn find_main_title(doc: &Document<'_>) -> String {
    tei_descendants(doc, "titleStmt")
        .flat_map(|stmt| tei_children(stmt, "title"))
        .find(|title| title.attribute("type") == Some("main"))
        .map(get_text)
        .unwrap_or_default()
}

/// Distinct forenames then distinct surnames of the first listed author,
/// first-occurrence order, space-joined.
fn collect_author(doc: &Document<'_>) -> String {
    let Some(author) = tei_descendants(doc, "author").next() else {
        return String::new();
    };

    // Distinct per name category, keeping first-occurrence order
    let collect_names = |tag: &str| {
        let mut names: Vec<String> = Vec::new();
        for node in author.descendants().filter(|n| has_tei_tag(*n, tag)) {
            let text = get_text(node);
            if !text.is_empty() && !names.contains(&text) {
                names.push(text);
            }
        }
        names
    };

    let forenames = collect_names("forename");
    let surnames = collect_names("surname");

    forenames
        .into_iter()
        .chain(surnames)
        .collect::<Vec<_>>()
        .join(" ")
}

/// All text under `div` containers, NFC-normalized and whitespace-collapsed.
fn collect_body_text(doc: &Document<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in doc.descendants().filter(|n| n.is_text()) {
        if node.ancestors().any(|a| has_tei_tag(a, "div")) {
            if let Some(text) = node.text() {
                parts.push(text);
            }
        }
    }

    let joined: String = parts.join(" ").nfc().collect();
    collapse_whitespace(&joined)
}

/// Texts of `textClass/classCode` elements with the given scheme, space-joined.
fn collect_class_codes(doc: &Document<'_>, scheme: &str) -> String {
    tei_descendants(doc, "classCode")
        .filter(|code| code.attribute("scheme") == Some(scheme))
        .filter(|code| code.parent().is_some_and(|p| has_tei_tag(p, "textClass")))
        .map(get_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Publication date under the source description.
///
/// When several distinct values exist the lexicographically smallest wins,
/// which for four-digit years is the earliest.
fn find_publication_year(doc: &Document<'_>) -> String {
    tei_descendants(doc, "date")
        .filter(|date| date.attribute("type") == Some("publication"))
        .filter(|date| date.ancestors().any(|a| has_tei_tag(a, "sourceDesc")))
        .map(get_text)
        .filter(|text| !text.is_empty())
        .min()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FAUST: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
        <teiHeader>
            <fileDesc>
                <titleStmt>
                    <title type="main">Faust</title>
                    <author>
                        <persName>
                            <surname>Goethe</surname>
                            <forename>Johann</forename>
                        </persName>
                    </author>
                </titleStmt>
                <sourceDesc>
                    <biblFull>
                        <publicationStmt>
                            <date type="publication">1808</date>
                        </publicationStmt>
                    </biblFull>
                </sourceDesc>
            </fileDesc>
            <profileDesc>
                <textClass>
                    <classCode scheme="http://www.deutschestextarchiv.de/doku/klassifikation#dtamain">E</classCode>
                    <classCode scheme="http://www.deutschestextarchiv.de/doku/klassifikation#dtasub">1</classCode>
                </textClass>
            </profileDesc>
        </teiHeader>
        <text>
            <body>
                <div>
                    <p>Es  war
 einmal</p>
                </div>
            </body>
        </text>
    </TEI>"#;

    fn extract_str(xml: &str, file_name: &str) -> ExtractOutcome {
        let doc = Document::parse(xml).unwrap();
        extract(&doc, file_name)
    }

    #[test]
    fn test_extract_faust() {
        let outcome = extract_str(FAUST, "faust.xml");

        let ExtractOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(
            record,
            Record {
                file: "faust.xml".to_string(),
                title: "Faust".to_string(),
                author: "Johann Goethe".to_string(),
                text: "Es war einmal".to_string(),
                main_type: "E".to_string(),
                sub_type: "1".to_string(),
                year: "1808".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_missing_title_skips() {
        let xml = FAUST.replace(r#"<title type="main">Faust</title>"#, "");
        let outcome = extract_str(&xml, "untitled.xml");
        assert_eq!(outcome, ExtractOutcome::Skipped { field: "title" });
    }

    #[test]
    fn test_extract_missing_year_skips() {
        let xml = FAUST.replace(r#"<date type="publication">1808</date>"#, "");
        let outcome = extract_str(&xml, "undated.xml");
        assert_eq!(outcome, ExtractOutcome::Skipped { field: "year" });
    }

    #[test]
    fn test_extract_missing_optional_fields_degrade_to_empty() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
            <teiHeader>
                <fileDesc>
                    <titleStmt><title type="main">Anonymus</title></titleStmt>
                    <sourceDesc>
                        <publicationStmt><date type="publication">1650</date></publicationStmt>
                    </sourceDesc>
                </fileDesc>
            </teiHeader>
        </TEI>"#;

        let ExtractOutcome::Record(record) = extract_str(xml, "anon.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.title, "Anonymus");
        assert_eq!(record.author, "");
        assert_eq!(record.text, "");
        assert_eq!(record.main_type, "");
        assert_eq!(record.sub_type, "");
        assert_eq!(record.year, "1650");
    }

    #[test]
    fn test_author_join_distinct_order_stable() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
            <titleStmt>
                <title type="main">Luise</title>
                <author>
                    <persName>
                        <forename>J.</forename>
                        <surname>Voss</surname>
                    </persName>
                    <persName>
                        <surname>Voss</surname>
                    </persName>
                </author>
            </titleStmt>
            <sourceDesc>
                <publicationStmt><date type="publication">1795</date></publicationStmt>
            </sourceDesc>
        </TEI>"#;

        let ExtractOutcome::Record(record) = extract_str(xml, "luise.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.author, "J. Voss");
    }

    #[test]
    fn test_author_only_first_author_considered() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
            <titleStmt>
                <title type="main">Xenien</title>
                <author><persName><surname>Goethe</surname></persName></author>
                <author><persName><surname>Schiller</surname></persName></author>
            </titleStmt>
            <sourceDesc>
                <publicationStmt><date type="publication">1796</date></publicationStmt>
            </sourceDesc>
        </TEI>"#;

        let ExtractOutcome::Record(record) = extract_str(xml, "xenien.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.author, "Goethe");
    }

    #[test]
    fn test_year_tie_break_is_smallest() {
        let xml = FAUST.replace(
            r#"<date type="publication">1808</date>"#,
            r#"<date type="publication">1810</date><date type="publication">1808</date>"#,
        );

        let ExtractOutcome::Record(record) = extract_str(&xml, "faust.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.year, "1808");
    }

    #[test]
    fn test_year_outside_source_desc_ignored() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
            <titleStmt><title type="main">Undatiert</title></titleStmt>
            <publicationStmt><date type="publication">1900</date></publicationStmt>
        </TEI>"#;

        // The only publication date is not under sourceDesc
        let outcome = extract_str(xml, "undatiert.xml");
        assert_eq!(outcome, ExtractOutcome::Skipped { field: "year" });
    }

    #[test]
    fn test_class_codes_joined_with_spaces() {
        let xml = FAUST.replace(
            r#"<classCode scheme="http://www.deutschestextarchiv.de/doku/klassifikation#dtamain">E</classCode>"#,
            r#"<classCode scheme="http://www.deutschestextarchiv.de/doku/klassifikation#dtamain">E</classCode>
               <classCode scheme="http://www.deutschestextarchiv.de/doku/klassifikation#dtamain">F</classCode>"#,
        );

        let ExtractOutcome::Record(record) = extract_str(&xml, "faust.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.main_type, "E F");
    }

    #[test]
    fn test_body_text_spans_nested_divs() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
            <titleStmt><title type="main">Kapitel</title></titleStmt>
            <sourceDesc>
                <publicationStmt><date type="publication">1800</date></publicationStmt>
            </sourceDesc>
            <text><body>
                <div>
                    <head>Erstes   Kapitel</head>
                    <div><p>Der
Anfang.</p></div>
                </div>
            </body></text>
        </TEI>"#;

        let ExtractOutcome::Record(record) = extract_str(xml, "kapitel.xml") else {
            panic!("expected a record");
        };
        assert_eq!(record.text, "Erstes Kapitel Der Anfang.");
    }

    #[test]
    fn test_record_columns_match_field_order() {
        // Serde serialization order must match the fixed header
        let record = Record::default();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let header = data.lines().next().unwrap();
        assert_eq!(header, Record::COLUMNS.join(","));
    }
}
