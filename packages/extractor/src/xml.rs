//! XML utility functions for navigating namespace-aware TEI trees.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};

use crate::config::TEI_NS;

/// Regex matching runs of whitespace, including newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Check if a node is an element with the given local name in the TEI namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use textarchiv_extractor::xml::has_tei_tag;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><title/></TEI>"#;
/// let doc = Document::parse(xml).unwrap();
/// let title = doc.root_element().first_element_child().unwrap();
/// assert!(has_tei_tag(title, "title"));
/// assert!(!has_tei_tag(title, "author"));
/// ```
pub fn has_tei_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == tag
        && node.tag_name().namespace() == Some(TEI_NS)
}

/// Iterate over all TEI elements with the given local name, in document order.
///
/// # Arguments
/// * `doc` - Parsed document
/// * `tag` - Local element name (e.g., "titleStmt")
pub fn tei_descendants<'a, 'input: 'a>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants().filter(move |n| has_tei_tag(*n, tag))
}

/// Find all child elements with the given TEI tag name.
pub fn tei_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tei_tag(*child, tag))
}

/// Get the direct text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Collapse all whitespace runs (including newlines) to single spaces and trim.
///
/// Idempotent: collapsing already-collapsed text yields the same text.
///
/// # Examples
/// ```
/// use textarchiv_extractor::xml::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("Es  war\n einmal"), "Es war einmal");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").to_string()
}
