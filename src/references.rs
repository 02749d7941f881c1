//! Citation definition extraction and reference reconciliation
//!
//! Definitions come from the article's edit-source wikitext in appearance
//! order, which matches Wikipedia's citation numbering for simple articles.
//! Named-reference reuse (one definition serving several markers) breaks the
//! positional assumption and surfaces as a count mismatch.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, WikiturnError};

/// A `<ref>...</ref>` block or self-closing `<ref ... />`. The word boundary
/// keeps `<references />` from matching.
static REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<ref\b[^>]*/>|<ref\b[^>]*>.*?</ref>").unwrap());

/// Extract citation definition fragments from edit-source wikitext.
///
/// Fragments are returned as opaque strings in source order, never parsed
/// further.
pub fn extract_definitions(wikitext: &str) -> Vec<String> {
    REF_RE
        .find_iter(wikitext)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reinsert original citation markup into translated text.
///
/// Pairs the i-th marker with the i-th definition and replaces the next
/// unconsumed occurrence of each marker token in a single left-to-right
/// scan. Identity is positional: `[3]` cited twice consumes two distinct
/// definition slots. A marker the translation engine mangled beyond
/// recognition is skipped with a warning rather than misaligning the rest.
///
/// Fails with [`WikiturnError::ReferenceMismatch`] when the sequences have
/// different lengths; no substitution is attempted in that case.
pub fn reconcile(markers: &[String], definitions: &[String], translated: &str) -> Result<String> {
    if markers.len() != definitions.len() {
        return Err(WikiturnError::ReferenceMismatch {
            markers: markers.len(),
            definitions: definitions.len(),
        });
    }

    let mut out = String::with_capacity(translated.len());
    let mut rest = translated;

    for (marker, definition) in markers.iter().zip(definitions) {
        match rest.find(marker.as_str()) {
            Some(pos) => {
                out.push_str(&rest[..pos]);
                out.push_str(definition);
                rest = &rest[pos + marker.len()..];
            }
            None => {
                tracing::warn!(
                    "marker {} not found in translated text, leaving its reference out",
                    marker
                );
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
