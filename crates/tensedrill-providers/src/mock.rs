//! Offline translator for tests and network-free drills.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use tensedrill_core::traits::{TranslateRequest, Translator};

/// A translator that answers from a fixed table.
///
/// Sentences are matched exactly, then with surrounding whitespace trimmed.
/// Unknown sentences fall back to `fallback`, or fail when there is none.
pub struct MockTranslator {
    /// English sentence → Spanish translation.
    translations: HashMap<String, String>,
    /// Reply for sentences missing from the table.
    fallback: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
}

impl MockTranslator {
    /// Create a mock with the given sentence→translation table.
    pub fn new(translations: HashMap<String, String>) -> Self {
        Self {
            translations,
            fallback: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock that always returns the same translation.
    pub fn with_fixed_translation(text: &str) -> Self {
        Self::new(HashMap::new()).with_fallback(Some(text.to_string()))
    }

    /// Create a mock that never has a translation.
    pub fn unavailable() -> Self {
        Self::new(HashMap::new())
    }

    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Get the number of calls made to this translator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        self.translations
            .get(&request.text)
            .or_else(|| self.translations.get(request.text.trim()))
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no mock translation for '{}'", request.text))
    }
}
