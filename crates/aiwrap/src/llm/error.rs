//! LLM error types.

use thiserror::Error;

use crate::credential::API_KEY_ENV;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// No credential was supplied and none was found in the environment
    #[error("missing API key: pass one explicitly or set {}", API_KEY_ENV)]
    MissingCredential,

    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Reply had no text in its first content block
    #[error("response contained no text content")]
    EmptyContent,
}

/// Standard error envelope returned by the service on non-2xx responses.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Build an `Api` error from a status and raw response body.
///
/// Uses the envelope's message when the body parses, the raw body otherwise.
pub(crate) fn api_error(status: u16, body: String) -> LLMError {
    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    };
    LLMError::Api { status, message }
}
