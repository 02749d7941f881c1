//! # Wikiturn
//!
//! DeepL-assisted translation of English Wikipedia articles with original
//! reference positioning, basic wiki formatting and glossary support.
//!
//! The pipeline rebuilds a wiki-markup text stream from the rendered article,
//! extracts the inline citation markers before translation, fetches the
//! citation definitions from the article's edit source, translates the body,
//! and reinserts the original reference markup positionally.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate an article into the configured default language
//! wikiturn --article Albert_Einstein
//!
//! # Translate into German, including category links
//! wikiturn --article Albert_Einstein --lang de --kat
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod fetch;
pub mod glossary;
pub mod pipeline;
pub mod references;
pub mod segment;
pub mod translate;

pub use config::Config;
pub use error::{Result, WikiturnError};
pub use fetch::{ArticleSource, RenderedArticle, WikipediaSource};
pub use glossary::Glossary;
pub use pipeline::{Pipeline, PreparedArticle};
pub use segment::ContentNode;
pub use translate::{DeeplTranslator, MockTranslator, Translator, Usage};

/// DeepL target languages at the time of writing, shown as a hint during
/// first-run setup. The authoritative set comes from the live API.
pub const KNOWN_TARGET_LANGUAGES: &[&str] = &[
    "BG", "CS", "DA", "DE", "EL", "EN-GB", "EN-US", "ES", "ET", "FI", "FR", "HU", "ID", "IT", "JA",
    "KO", "LT", "LV", "NB", "NL", "PL", "PT-BR", "PT-PT", "RO", "RU", "SK", "SL", "SV", "TR", "UK",
    "ZH",
];
