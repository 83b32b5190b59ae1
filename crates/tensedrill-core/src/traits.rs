//! The translation collaborator.
//!
//! Implemented by the `tensedrill-providers` crate. The core never inspects
//! provider errors: [`fetch_reference`] reduces every outcome to "a reference
//! translation" or "none available".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for machine-translation backends that supply reference answers.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable provider name (e.g. "deepl").
    fn name(&self) -> &str;

    /// Translate a single sentence.
    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String>;
}

/// A sentence to translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Source text.
    pub text: String,
    /// Source language code (e.g. "EN").
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Target language code (e.g. "ES").
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_source_lang() -> String {
    "EN".to_string()
}

fn default_target_lang() -> String {
    "ES".to_string()
}

impl TranslateRequest {
    /// English to Spanish request for `text`.
    pub fn english_to_spanish(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
        }
    }
}

/// Ask the translator for a reference translation of `english`.
///
/// Any failure, as well as a blank translation, is reported as `None`.
pub async fn fetch_reference(translator: &dyn Translator, english: &str) -> Option<String> {
    let request = TranslateRequest::english_to_spanish(english);
    match translator.translate(&request).await {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => {
            tracing::warn!(provider = translator.name(), "translator returned blank text");
            None
        }
        Err(e) => {
            tracing::warn!(provider = translator.name(), "reference unavailable: {e:#}");
            None
        }
    }
}
