//! Transport client error types.

use serde::Deserialize;

/// Error envelope sent by the NS API in place of a normal response,
/// e.g. `{"statusCode": 404, "message": "Resource not found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("API error {status_code}: {message}")]
pub struct ApiError {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
}

/// Errors from the NS transport client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The subscription key could not be used as a header value
    #[error("invalid subscription key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The API answered with its error envelope
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response matched neither the expected shape nor the error envelope
    #[error("response is not a valid {expected}: {message}")]
    Validation {
        expected: &'static str,
        message: String,
        body: Option<String>,
    },
}

impl ClientError {
    /// The upstream error envelope, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }
}
