//! Error type shared by the news, model, and workspace clients.
//!
//! None of these errors are allowed to end a run. Each stage catches them,
//! logs them, and degrades to "fewer results" (see [`crate::pipeline`]).

use crate::utils::truncate_for_log;
use thiserror::Error;

/// Byte budget for an error rendered into a log line.
const LOG_BUDGET: usize = 500;

/// Failure of a single call against one of the external APIs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential for this API was not supplied.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// No page id was given to write into.
    #[error("no target page id given")]
    MissingPageId,

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the API
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response parsed but carried nothing usable.
    #[error("empty response: {0}")]
    EmptyResponse(&'static str),
}

impl ApiError {
    /// The error's display text, cut to a bounded size. Status errors carry the
    /// whole response body, which can be arbitrarily long.
    pub fn for_log(&self) -> String {
        truncate_for_log(&self.to_string(), LOG_BUDGET)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Request(format!("invalid endpoint: {e}"))
    }
}

/// Turn a non-success response into [`ApiError::Status`], passing successful ones through.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
