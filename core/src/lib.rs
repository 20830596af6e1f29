//! Blocking JSON fetch client core.
//!
//! # Overview
//! Builds request URLs (base origin + path + nested query string), sends JSON
//! requests and maps status codes to a parsed result or an `ApiError`.
//!
//! # Design
//! - `FetchClient` is immutable; default headers live in its `ClientConfig`
//!   and `with_headers` returns a new client.
//! - Request building and response mapping are pure functions over
//!   `HttpRequest` / `HttpResponse`; a `Transport` performs the I/O
//!   (`UreqTransport` by default).
//! - Status handling is a closed table (`StatusOutcome`): 200 parses, 204 is
//!   `None`, 403 is `Unauthorized`, everything else is an application error
//!   carrying the parsed body.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod query;
pub mod response;
pub mod transport;
pub mod url;

pub use client::FetchClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{QueryParams, QueryValue};
pub use response::{map_response, StatusOutcome};
pub use transport::{Transport, UreqTransport};
pub use url::build_url;
