//! Document segmenter and citation marker extractor
//!
//! Rebuilds a linear wiki-markup text stream from the typed content nodes of
//! a rendered article page, then scans it for inline citation markers. The
//! marker scan runs on the untranslated text: digit-only tokens survive
//! translation, and extracting them up front decouples reconciliation from
//! translation-engine quirks.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline citation marker as rendered in body text, e.g. `[3]`
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]+\]").unwrap());

/// Edit affordance injected into rendered headings
const EDIT_ARTIFACT: &str = "[edit]";

/// Wiki markup for the rendered reference list
pub const REFERENCES_PLACEHOLDER: &str = "<references />";

/// A typed content node from the rendered article page, in document order.
///
/// Produced by the HTML-parsing side ([`crate::fetch`]), consumed here.
/// Anything outside these three shapes never becomes a node; the HTML
/// collaborator is the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A prose paragraph
    Paragraph(String),
    /// An unordered list block; internal line breaks separate the items
    ListBlock(String),
    /// A section heading at levels 1-6
    Heading { level: u8, text: String },
}

impl ContentNode {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentNode::Heading {
            level,
            text: text.into(),
        }
    }
}

/// Rebuild a single wiki-markup text block from ordered content nodes.
///
/// Rules are fixed and order-preserving:
/// - paragraph: `\n<text>\n`
/// - list block: each line prefixed with `* `, wrapped in `\n <lines>\n`
/// - heading level L: `L×'=' <text> L×'='` and a newline; a level-2
///   "References" heading is followed by the references placeholder so the
///   reinserted citations render in the translated article
///
/// Every literal `[edit]` artifact is stripped from the result.
pub fn segment(nodes: &[ContentNode]) -> String {
    let mut out = String::new();

    for node in nodes {
        match node {
            ContentNode::Paragraph(text) => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
            }
            ContentNode::ListBlock(text) => {
                out.push_str("\n ");
                let mut lines = text.lines();
                if let Some(first) = lines.next() {
                    out.push_str("* ");
                    out.push_str(first);
                }
                for line in lines {
                    out.push_str("\n* ");
                    out.push_str(line);
                }
                out.push('\n');
            }
            ContentNode::Heading { level, text } => {
                let fence = "=".repeat(*level as usize);
                out.push_str(&fence);
                out.push(' ');
                out.push_str(text);
                out.push(' ');
                out.push_str(&fence);
                out.push('\n');

                if *level == 2 && text == "References" {
                    out.push('\n');
                    out.push_str(REFERENCES_PLACEHOLDER);
                    out.push('\n');
                }
            }
        }
    }

    out.replace(EDIT_ARTIFACT, "")
}

/// Scan text for inline citation markers, left to right.
///
/// Duplicates are retained: marker identity is positional, so `[3]` cited
/// twice yields two entries.
pub fn extract_markers(text: &str) -> Vec<String> {
    MARKER_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_paragraph() {
        let nodes = vec![ContentNode::Paragraph("Foo bar.".to_string())];
        assert_eq!(segment(&nodes), "\nFoo bar.\n");
    }

    #[test]
    fn test_segment_heading_levels() {
        for level in 1..=6u8 {
            let nodes = vec![ContentNode::heading(level, "Title")];
            let fence = "=".repeat(level as usize);
            assert_eq!(segment(&nodes), format!("{} Title {}\n", fence, fence));
        }
    }

    #[test]
    fn test_segment_list_block() {
        let nodes = vec![ContentNode::ListBlock("one\ntwo\nthree".to_string())];
        assert_eq!(segment(&nodes), "\n * one\n* two\n* three\n");
    }

    #[test]
    fn test_segment_references_heading_gets_placeholder() {
        let nodes = vec![ContentNode::heading(2, "References")];
        assert_eq!(segment(&nodes), "== References ==\n\n<references />\n");
    }

    #[test]
    fn test_segment_deeper_references_heading_gets_no_placeholder() {
        let nodes = vec![ContentNode::heading(3, "References")];
        assert_eq!(segment(&nodes), "=== References ===\n");
    }

    #[test]
    fn test_segment_strips_edit_artifacts() {
        let nodes = vec![
            ContentNode::heading(2, "History[edit]"),
            ContentNode::Paragraph("Text with [edit] inside.".to_string()),
        ];
        let result = segment(&nodes);
        assert!(!result.contains("[edit]"));
        assert!(result.contains("== History =="));
    }

    #[test]
    fn test_segment_is_deterministic() {
        let nodes = vec![
            ContentNode::heading(2, "History"),
            ContentNode::Paragraph("Foo bar.[1]".to_string()),
            ContentNode::ListBlock("a\nb".to_string()),
        ];
        assert_eq!(segment(&nodes), segment(&nodes));
    }

    #[test]
    fn test_segment_preserves_document_order() {
        let nodes = vec![
            ContentNode::heading(2, "First"),
            ContentNode::Paragraph("alpha".to_string()),
            ContentNode::heading(3, "Second"),
            ContentNode::Paragraph("beta".to_string()),
        ];
        let result = segment(&nodes);
        let first = result.find("First").unwrap();
        let alpha = result.find("alpha").unwrap();
        let second = result.find("Second").unwrap();
        let beta = result.find("beta").unwrap();
        assert!(first < alpha && alpha < second && second < beta);
    }

    #[test]
    fn test_extract_markers_in_order_with_duplicates() {
        let text = "A[1] then B[2] then A again[1].";
        assert_eq!(extract_markers(text), vec!["[1]", "[2]", "[1]"]);
    }

    #[test]
    fn test_extract_markers_ignores_non_numeric_brackets() {
        let text = "See [citation needed] and [1a] but keep [42].";
        assert_eq!(extract_markers(text), vec!["[42]"]);
    }

    #[test]
    fn test_extract_markers_empty() {
        assert!(extract_markers("no markers here").is_empty());
    }
}
