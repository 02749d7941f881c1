//! Error taxonomy for a conversion run

use thiserror::Error;

/// Errors that terminate a conversion run.
///
/// Every variant is terminal: the tool is a single-shot CLI, so recovery
/// means re-invocation with adjusted flags.
#[derive(Debug, Error)]
pub enum WikiturnError {
    /// The rendered article page returned a non-success status.
    #[error("article '{0}' does not exist or is misspelled")]
    ArticleNotFound(String),

    /// The requested target language is not in the service's supported set.
    #[error("target language '{0}' is not supported by the translation service")]
    UnsupportedLanguage(String),

    /// Remaining character quota is smaller than the article.
    #[error("character quota insufficient: {remaining} characters left, article needs {needed}")]
    QuotaExceeded { remaining: u64, needed: u64 },

    /// Marker and definition sequences have different lengths.
    #[error("reference pointers and reference list do not match: {markers} markers, {definitions} definitions")]
    ReferenceMismatch { markers: usize, definitions: usize },

    /// Edit-source markup or reference definitions could not be obtained.
    #[error("could not fetch reference definitions: {0}")]
    FetchError(String),

    /// The translation service rejected a request.
    #[error("translation request failed: {0}")]
    Translation(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WikiturnError>;
