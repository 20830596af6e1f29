//! JSON fetch client: request building, execution and response mapping.
//!
//! # Design
//! `FetchClient` is immutable after construction. Default headers are part of
//! its `ClientConfig`; `with_headers` returns a new client instead of mutating
//! shared state, so concurrent calls never observe a half-applied update.
//! Building (`build_request`) and mapping (`parse_response`) are pure; only
//! `fetch` goes through the [`Transport`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;
use crate::response::map_response;
use crate::transport::{Transport, UreqTransport};
use crate::url::build_url;

#[derive(Clone)]
pub struct FetchClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Client using the blocking `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Client whose base origin comes from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// A copy of this client whose default headers are merged with `headers`.
    /// Given headers win on conflict.
    pub fn with_headers(&self, headers: impl Into<Headers>) -> Self {
        let mut config = self.config.clone();
        config.default_headers = config.default_headers.merged(&headers.into());
        Self {
            config,
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn default_headers(&self) -> &Headers {
        &self.config.default_headers
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn build_request<P>(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<&P>,
        query: Option<&QueryParams>,
    ) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        self.build_request_with_headers(method, url, payload, query, &Headers::new())
    }

    /// Like `build_request`, with per-call headers layered over the defaults.
    pub fn build_request_with_headers<P>(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<&P>,
        query: Option<&QueryParams>,
        headers: &Headers,
    ) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let body = match payload {
            Some(payload) => {
                let json = serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
                is_truthy(&json).then(|| json.to_string())
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: build_url(&self.config.base_url, url, query),
            headers: self.config.default_headers.merged(headers),
            body,
        })
    }

    pub fn parse_response<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<Option<T>> {
        map_response(response)
    }

    /// Build, send and map one request. `Ok(None)` means 204.
    pub fn fetch<T, P>(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<&P>,
        query: Option<&QueryParams>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, url, payload, query)?;
        debug!(method = %request.method, url = %request.url, "fetch");
        let response = self.transport.execute(&request)?;
        self.parse_response(&response)
    }

    pub fn get<T: DeserializeOwned>(&self, url: &str, query: Option<&QueryParams>) -> Result<Option<T>> {
        self.fetch::<T, Value>(HttpMethod::Get, url, None, query)
    }

    pub fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        self.fetch::<T, Value>(HttpMethod::Delete, url, None, None)
    }

    pub fn post<T, P>(&self, url: &str, payload: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.fetch(HttpMethod::Post, url, Some(payload), None)
    }

    pub fn put<T, P>(&self, url: &str, payload: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.fetch(HttpMethod::Put, url, Some(payload), None)
    }

    pub fn patch<T, P>(&self, url: &str, payload: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.fetch(HttpMethod::Patch, url, Some(payload), None)
    }
}

/// `null`, `false`, `0` and `""` count as no payload. Empty arrays and
/// objects are still sent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
