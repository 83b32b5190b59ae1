//! Provider error types.

use thiserror::Error;

/// Errors that can occur when talking to a translation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API key is missing or was rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The account's character quota is used up (DeepL answers 456).
    #[error("translation quota exceeded")]
    QuotaExceeded,

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response carried no translation.
    #[error("response contained no translations")]
    EmptyTranslation,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
