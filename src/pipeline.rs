//! Conversion pipeline
//!
//! Strictly sequential: segment the rendered page, extract markers, fetch
//! reference definitions, then translate, reconcile and assemble. The run is
//! split into [`Pipeline::prepare`] and [`Pipeline::translate`] so the caller
//! can resolve a reference mismatch before any translation quota is spent.

use crate::assemble::assemble;
use crate::error::{Result, WikiturnError};
use crate::fetch::{display_name, ArticleSource};
use crate::glossary::Glossary;
use crate::references::{extract_definitions, reconcile};
use crate::segment::{extract_markers, segment};
use crate::translate::Translator;

/// Everything gathered about an article before translation.
#[derive(Debug, Clone)]
pub struct PreparedArticle {
    /// Title as shown in the attribution template
    pub display_name: String,
    /// Source revision id
    pub revision: String,
    /// Segmented wiki-markup body, untranslated
    pub segmented: String,
    /// Rendered article size in characters
    pub char_count: u64,
    /// Inline citation markers in order of appearance
    pub markers: Vec<String>,
    /// Citation definitions in edit-source order; `None` when references
    /// were not requested
    pub definitions: Option<Vec<String>>,
    /// Category names to translate, leading self-reference already dropped
    pub categories: Vec<String>,
}

impl PreparedArticle {
    /// The marker/definition counts when they disagree.
    pub fn reference_mismatch(&self) -> Option<(usize, usize)> {
        match &self.definitions {
            Some(definitions) if definitions.len() != self.markers.len() => {
                Some((self.markers.len(), definitions.len()))
            }
            _ => None,
        }
    }
}

/// One conversion run over an article source and a translation service.
pub struct Pipeline<'a, S, T> {
    source: &'a S,
    translator: &'a T,
    target_lang: String,
    include_references: bool,
    translate_categories: bool,
    glossary: Option<Glossary>,
}

impl<'a, S: ArticleSource, T: Translator> Pipeline<'a, S, T> {
    pub fn new(source: &'a S, translator: &'a T, target_lang: impl Into<String>) -> Self {
        Self {
            source,
            translator,
            target_lang: target_lang.into().to_uppercase(),
            include_references: true,
            translate_categories: false,
            glossary: None,
        }
    }

    /// Reinsert original references into the translation (default true).
    pub fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    /// Also translate and append category links (default false).
    pub fn with_categories(mut self, translate: bool) -> Self {
        self.translate_categories = translate;
        self
    }

    /// Apply a glossary to the segmented text before translation.
    pub fn with_glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = Some(glossary);
        self
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Fetch and segment the article, extract markers and definitions.
    ///
    /// No translation happens here; a mismatch is visible on the returned
    /// value before any quota is spent.
    pub fn prepare(&self, title: &str) -> Result<PreparedArticle> {
        let rendered = self.source.rendered(title)?;
        tracing::info!(
            "article '{}' rendered: {} nodes, {} characters, revision {}",
            title,
            rendered.nodes.len(),
            rendered.char_count,
            rendered.revision
        );

        let segmented = segment(&rendered.nodes);
        let markers = extract_markers(&segmented);

        let definitions = if self.include_references {
            let wikitext = self.source.edit_source(title)?;
            let definitions = extract_definitions(&wikitext);
            if definitions.is_empty() && !markers.is_empty() {
                return Err(WikiturnError::FetchError(format!(
                    "edit source contains no reference definitions but the body has {} markers",
                    markers.len()
                )));
            }
            tracing::info!(
                "{} markers in body, {} definitions in edit source",
                markers.len(),
                definitions.len()
            );
            Some(definitions)
        } else {
            None
        };

        let categories = if self.translate_categories {
            // The first catlinks entry is the "Categories" self-reference,
            // not an article category.
            rendered.categories.iter().skip(1).cloned().collect()
        } else {
            Vec::new()
        };

        Ok(PreparedArticle {
            display_name: display_name(title),
            revision: rendered.revision,
            segmented,
            char_count: rendered.char_count,
            markers,
            definitions,
            categories,
        })
    }

    /// Translate a prepared article and assemble the final output.
    ///
    /// `with_references` lets an interactive caller drop reconciliation after
    /// confirming a mismatch; passing `true` with mismatched counts fails.
    pub fn translate(&self, prepared: &PreparedArticle, with_references: bool) -> Result<String> {
        self.preflight(prepared)?;

        let text = match &self.glossary {
            Some(glossary) => glossary.apply(&prepared.segmented),
            None => prepared.segmented.clone(),
        };

        let translated = self.translator.translate(&text, &self.target_lang)?;

        let body = match (&prepared.definitions, with_references) {
            (Some(definitions), true) => reconcile(&prepared.markers, definitions, &translated)?,
            _ => translated,
        };

        let attribution_label = self.translator.translate("Translation", &self.target_lang)?;

        let categories = self
            .translator
            .translate_batch(&prepared.categories, &self.target_lang)?;

        Ok(assemble(
            &body,
            &attribution_label,
            &prepared.display_name,
            &prepared.revision,
            &categories,
        ))
    }

    /// Full run: prepare, fail hard on mismatch, translate.
    pub fn run(&self, title: &str) -> Result<String> {
        let prepared = self.prepare(title)?;
        if let Some((markers, definitions)) = prepared.reference_mismatch() {
            return Err(WikiturnError::ReferenceMismatch {
                markers,
                definitions,
            });
        }
        self.translate(&prepared, self.include_references)
    }

    /// Language and quota checks, before any character is spent.
    fn preflight(&self, prepared: &PreparedArticle) -> Result<()> {
        let supported = self.translator.target_languages()?;
        if !supported.iter().any(|l| l == &self.target_lang) {
            return Err(WikiturnError::UnsupportedLanguage(self.target_lang.clone()));
        }

        let usage = self.translator.usage()?;
        if usage.remaining() < prepared.char_count {
            return Err(WikiturnError::QuotaExceeded {
                remaining: usage.remaining(),
                needed: prepared.char_count,
            });
        }

        Ok(())
    }
}
