//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! The core only builds and maps plain data; a `Transport` is the single
//! place where I/O happens. `UreqTransport` is the blocking implementation
//! used by default. Tests can substitute a closure-backed or canned
//! transport.

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Perform one round-trip. Any status code, including 4xx/5xx, is a
    /// successful execution; only failures to obtain a response are errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self(request)
    }
}

/// Response bodies larger than this fail with `ApiError::Transport`.
/// Matches ureq's own default.
pub const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Blocking transport backed by a `ureq` agent.
///
/// Bodies are read fully into memory, capped at `body_limit` bytes
/// ([`DEFAULT_BODY_LIMIT`] unless set with [`UreqTransport::with_body_limit`]).
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to the response mapper.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

macro_rules! with_headers {
    ($builder:expr, $request:expr) => {{
        let mut builder = $builder;
        for (name, value) in $request.headers.iter() {
            builder = builder.header(name, value);
        }
        builder
    }};
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let result = match (request.method, body) {
            (HttpMethod::Get, None) => with_headers!(self.agent.get(url), request).call(),
            (HttpMethod::Get, Some(body)) => {
                with_headers!(self.agent.get(url).force_send_body(), request).send(body.as_bytes())
            }
            (HttpMethod::Delete, None) => with_headers!(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_headers!(self.agent.delete(url).force_send_body(), request).send(body.as_bytes())
            }
            (HttpMethod::Post, Some(body)) => with_headers!(self.agent.post(url), request).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers!(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers!(self.agent.put(url), request).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers!(self.agent.put(url), request).send_empty(),
            (HttpMethod::Patch, Some(body)) => with_headers!(self.agent.patch(url), request).send(body.as_bytes()),
            (HttpMethod::Patch, None) => with_headers!(self.agent.patch(url), request).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
