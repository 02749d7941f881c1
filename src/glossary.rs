//! Glossary substitution
//!
//! Plain key-to-value text replacement applied to the segmented article
//! before translation, so fixed terminology survives the engine.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// A term substitution table loaded from a JSON object file.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: BTreeMap<String, String>,
}

impl Glossary {
    /// Load a glossary from a JSON file mapping terms to replacements.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read glossary file {:?}", path))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("glossary file {:?} is not a JSON object", path))?;
        Ok(Self { entries })
    }

    /// Add a single term to the table.
    pub fn with_entry(mut self, term: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.entries.insert(term.into(), replacement.into());
        self
    }

    /// Replace every glossary term in the text. Keys are applied in sorted
    /// order, which keeps runs deterministic.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (term, replacement) in &self.entries {
            result = result.replace(term.as_str(), replacement.as_str());
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_apply_replaces_terms() {
        let glossary = Glossary::default().with_entry("river", "řeka");
        assert_eq!(glossary.apply("the river bends"), "the řeka bends");
    }

    #[test]
    fn test_apply_empty_glossary_is_identity() {
        let glossary = Glossary::default();
        assert_eq!(glossary.apply("unchanged"), "unchanged");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"castle": "hrad"}}"#).unwrap();
        let glossary = Glossary::load(file.path()).unwrap();
        assert_eq!(glossary.apply("old castle"), "old hrad");
    }

    #[test]
    fn test_load_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(Glossary::load(file.path()).is_err());
    }
}
