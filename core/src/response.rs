//! Maps an `HttpResponse` to a parsed value or an `ApiError`.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

/// What a status code means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 200: the body is the result.
    Success,
    /// 204: no result, body ignored.
    NoContent,
    /// 403: fixed error, body ignored.
    Unauthorized,
    /// Anything else: the body is the error payload.
    Failure,
}

impl StatusOutcome {
    pub fn classify(status: u16) -> Self {
        match status {
            200 => StatusOutcome::Success,
            204 => StatusOutcome::NoContent,
            403 => StatusOutcome::Unauthorized,
            _ => StatusOutcome::Failure,
        }
    }
}

/// Apply the status table to `response`.
///
/// Returns `Ok(None)` for 204. A body that is not valid JSON on the success or
/// failure path yields `ApiError::Parse`.
pub fn map_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<Option<T>> {
    debug!(status = response.status, "mapping response");
    match StatusOutcome::classify(response.status) {
        StatusOutcome::Success => Ok(Some(serde_json::from_str(&response.body)?)),
        StatusOutcome::NoContent => Ok(None),
        StatusOutcome::Unauthorized => {
            warn!("request rejected as unauthorized");
            Err(ApiError::Unauthorized)
        }
        StatusOutcome::Failure => {
            let payload: serde_json::Value = serde_json::from_str(&response.body)?;
            warn!(status = response.status, %payload, "request failed");
            Err(ApiError::Application {
                status: response.status,
                payload,
            })
        }
    }
}
