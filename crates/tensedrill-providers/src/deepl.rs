//! DeepL API provider implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tensedrill_core::traits::{TranslateRequest, Translator};

use crate::error::ProviderError;

const FREE_BASE_URL: &str = "https://api-free.deepl.com";
const PRO_BASE_URL: &str = "https://api.deepl.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Base URL matching the key's plan. Free-plan keys end in `:fx`.
pub fn default_base_url(api_key: &str) -> &'static str {
    if api_key.trim().ends_with(":fx") {
        FREE_BASE_URL
    } else {
        PRO_BASE_URL
    }
}

/// DeepL translation provider.
pub struct DeeplProvider {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    source_lang: Option<String>,
    target_lang: Option<String>,
    client: reqwest::Client,
}

impl DeeplProvider {
    pub fn new(api_key: &str, base_url: Option<String>) -> Result<Self, ProviderError> {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        api_key: &str,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        let base_url = base_url
            .unwrap_or_else(|| default_base_url(api_key).to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url,
            timeout_secs,
            source_lang: None,
            target_lang: None,
            client,
        })
    }

    /// Pin the language pair sent to DeepL. `None` keeps the request's own.
    pub fn with_languages(
        mut self,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> Self {
        self.source_lang = source_lang;
        self.target_lang = target_lang;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct DeeplRequest<'a> {
    text: Vec<&'a str>,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct DeeplResponse {
    #[serde(default)]
    translations: Vec<DeeplTranslation>,
}

#[derive(Deserialize)]
struct DeeplTranslation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[async_trait]
impl Translator for DeeplProvider {
    fn name(&self) -> &str {
        "deepl"
    }

    #[instrument(skip(self, request), fields(target_lang = tracing::field::Empty))]
    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationFailed("no API key configured".into()).into());
        }

        let start = Instant::now();

        let body = DeeplRequest {
            text: vec![request.text.as_str()],
            source_lang: self.source_lang.as_deref().unwrap_or(&request.source_lang),
            target_lang: self.target_lang.as_deref().unwrap_or(&request.target_lang),
        };
        tracing::Span::current().record("target_lang", body.target_lang);

        let response = self
            .client
            .post(format!("{}/v2/translate", self.base_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        match status {
            401 | 403 => {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::AuthenticationFailed(body).into());
            }
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(5)
                    * 1000;
                return Err(ProviderError::RateLimited {
                    retry_after_ms: retry_after,
                }
                .into());
            }
            456 => return Err(ProviderError::QuotaExceeded.into()),
            s if s >= 400 => {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::ApiError {
                    status,
                    message: body,
                }
                .into());
            }
            _ => {}
        }

        let api_response: DeeplResponse = response.json().await.map_err(|e| {
            ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let translation = api_response
            .translations
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyTranslation)?;

        tracing::debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            detected = translation.detected_source_language.as_deref().unwrap_or("?"),
            "translation received"
        );

        Ok(translation.text)
    }
}
