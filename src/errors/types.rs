//! Error type definitions for the Vavoo proxy

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request parameter was absent or blank
    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    /// Talking to the origin failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

}

/// Errors raised while fetching from the origin
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request did not complete within its deadline
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Transport level failure (DNS, connect, TLS, body read)
    #[error("Request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// The origin answered with a non-success status
    #[error("Upstream {url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// The body could not be parsed into the expected shape
    #[error("Malformed upstream body: {message}")]
    MalformedBody { message: String },

    /// The fetch succeeded but yielded nothing usable
    #[error("Upstream returned no {what}")]
    Empty { what: String },
}

impl AppError {
    pub fn missing_parameter<S: Into<String>>(name: S) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the failure was an upstream deadline being exceeded
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Upstream(UpstreamError::Timeout { .. }))
    }
}

impl UpstreamError {
    /// Classify a reqwest failure for `url`, keeping timeouts distinct
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
            };
        }
        if let Some(status) = error.status() {
            return Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }
        Self::RequestFailed {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedBody {
            message: message.into(),
        }
    }

    pub fn empty<S: Into<String>>(what: S) -> Self {
        Self::Empty { what: what.into() }
    }
}
