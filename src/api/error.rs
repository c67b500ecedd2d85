use thiserror::Error;

/// Errors returned by [`super::PexelsClient`]
///
/// Payloads are plain strings so the error can travel inside UI messages,
/// which must be `Clone`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub(crate) fn request(url: &str, err: reqwest::Error) -> Self {
        ApiError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, err: reqwest::Error) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
