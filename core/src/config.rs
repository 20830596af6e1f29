//! Client configuration: base origin and default headers.

use std::env;

use crate::error::{ApiError, Result};
use crate::headers::Headers;

/// Environment variable holding the base API origin.
pub const ROOT_API_ENV: &str = "FETCH_ROOT_API";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Prefix for relative paths, e.g. `https://api.example.com`. May be empty.
    pub base_url: String,
    pub default_headers: Headers,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: Headers::json_defaults(),
        }
    }

    /// Read the base origin from [`ROOT_API_ENV`]. An unset variable means an
    /// empty origin; a non-UTF-8 value is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(ROOT_API_ENV)
    }

    pub fn from_env_var(name: &str) -> Result<Self> {
        match env::var(name) {
            Ok(base_url) => Ok(Self::new(base_url)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                Err(ApiError::Config(format!("{name} is not valid unicode")))
            }
        }
    }
}
