//! Error types for the fetch client.
//!
//! # Design
//! `Unauthorized` gets a dedicated variant because a 403 carries no payload
//! worth parsing. Every other unexpected status lands in `Application` with
//! the parsed JSON body. A body that is not JSON surfaces as `Parse`, before
//! any status mapping takes place.

use thiserror::Error;

/// Errors returned by `FetchClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 403.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned a status other than 200, 204 or 403.
    #[error("{payload}")]
    Application {
        status: u16,
        payload: serde_json::Value,
    },

    /// A response body could not be parsed as JSON.
    #[error("invalid JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration could not be loaded, e.g. a non-UTF-8 environment value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(403),
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
