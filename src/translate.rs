//! Translation adapter
//!
//! The [`Translator`] trait abstracts the external translation capability so
//! the pipeline can run against the live DeepL API or a deterministic mock.
//! The core relies on one property of implementations: batches come back in
//! input order with input length, and digit-only bracket tokens pass through
//! unchanged in practice.

use serde::Deserialize;

use crate::error::{Result, WikiturnError};

/// Character quota of the translation account
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub character_count: u64,
    pub character_limit: u64,
}

impl Usage {
    /// Characters left in the current billing period
    pub fn remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }
}

/// External translation capability.
///
/// All calls are blocking; the pipeline is single-threaded by design.
pub trait Translator {
    /// Translate one text into the target language.
    fn translate(&self, text: &str, target_lang: &str) -> Result<String>;

    /// Translate a batch, preserving order and length.
    fn translate_batch(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>>;

    /// Current character usage of the account.
    fn usage(&self) -> Result<Usage>;

    /// Target language codes the service supports, uppercased.
    fn target_languages(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TargetLanguage {
    language: String,
}

/// DeepL REST API v2 client.
pub struct DeeplTranslator {
    auth_key: String,
    client: reqwest::blocking::Client,
    base_url: String,
}

impl DeeplTranslator {
    /// Create a client for the given authorisation key.
    ///
    /// Free-tier keys carry an `:fx` suffix and talk to a different host
    /// than paid keys.
    pub fn new(auth_key: impl Into<String>) -> Result<Self> {
        let auth_key = auth_key.into();
        if auth_key.trim().is_empty() {
            return Err(WikiturnError::Translation(
                "authorisation key is empty".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        let base_url = if auth_key.ends_with(":fx") {
            "https://api-free.deepl.com/v2".to_string()
        } else {
            "https://api.deepl.com/v2".to_string()
        };

        Ok(Self {
            auth_key,
            client,
            base_url,
        })
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.auth_key)
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(WikiturnError::Translation(format!(
            "DeepL API returned {}: {}",
            status, body
        )))
    }
}

impl Translator for DeeplTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let mut results = self.translate_batch(&[text.to_string()], target_lang)?;
        results
            .pop()
            .ok_or_else(|| WikiturnError::Translation("empty response from DeepL".to_string()))
    }

    fn translate_batch(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("translating {} text(s) to {}", texts.len(), target_lang);

        let mut form: Vec<(&str, &str)> = texts.iter().map(|t| ("text", t.as_str())).collect();
        form.push(("target_lang", target_lang));

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .header("Authorization", self.auth_header())
            .form(&form)
            .send()?;
        let response = Self::check_status(response)?;

        let parsed: TranslateResponse = response.json()?;
        if parsed.translations.len() != texts.len() {
            return Err(WikiturnError::Translation(format!(
                "DeepL returned {} translations for {} inputs",
                parsed.translations.len(),
                texts.len()
            )));
        }

        Ok(parsed.translations.into_iter().map(|t| t.text).collect())
    }

    fn usage(&self) -> Result<Usage> {
        let response = self
            .client
            .get(format!("{}/usage", self.base_url))
            .header("Authorization", self.auth_header())
            .send()?;
        let response = Self::check_status(response)?;
        Ok(response.json()?)
    }

    fn target_languages(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/languages?type=target", self.base_url))
            .header("Authorization", self.auth_header())
            .send()?;
        let response = Self::check_status(response)?;
        let languages: Vec<TargetLanguage> = response.json()?;
        Ok(languages.into_iter().map(|l| l.language).collect())
    }
}

/// Deterministic translator for tests and dry runs.
///
/// Applies a fixed phrase dictionary and passes everything else through
/// unchanged, which preserves markup and citation markers the way a
/// well-behaved engine does.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    replacements: Vec<(String, String)>,
    languages: Vec<String>,
    usage: Option<Usage>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            replacements: Vec::new(),
            languages: vec!["CS".to_string(), "DE".to_string(), "FR".to_string()],
            usage: None,
        }
    }

    /// Add a phrase translation to the dictionary.
    pub fn with_phrase(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Override the supported target language set.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Report a fixed quota instead of an unlimited one.
    pub fn with_usage(mut self, character_count: u64, character_limit: u64) -> Self {
        self.usage = Some(Usage {
            character_count,
            character_limit,
        });
        self
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
        let mut result = text.to_string();
        for (from, to) in &self.replacements {
            result = result.replace(from.as_str(), to.as_str());
        }
        Ok(result)
    }

    fn translate_batch(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>> {
        texts
            .iter()
            .map(|t| self.translate(t, target_lang))
            .collect()
    }

    fn usage(&self) -> Result<Usage> {
        Ok(self.usage.unwrap_or(Usage {
            character_count: 0,
            character_limit: u64::MAX,
        }))
    }

    fn target_languages(&self) -> Result<Vec<String>> {
        Ok(self.languages.clone())
    }
}
