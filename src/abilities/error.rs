use thiserror::Error;

/// Page-level message when the listing fails without a usable error body.
pub const LIST_FALLBACK: &str = "failed to load abilities";
/// Message used when a detail fetch fails without a usable error body.
pub const DETAIL_FALLBACK: &str = "failed to load ability detail";

/// Errors produced by the ability API client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The collaborator answered with a non-success status.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON document.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// What the ability page shows when the listing fails: the
    /// collaborator's own message when it sent one, otherwise the generic
    /// fallback.
    pub fn page_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            _ => LIST_FALLBACK.to_string(),
        }
    }
}
