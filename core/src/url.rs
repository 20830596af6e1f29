//! Request URL construction.

use std::sync::LazyLock;

use regex::Regex;

use crate::query::QueryParams;

/// Optional scheme followed by `//`, or a protocol-relative `//`.
static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z][a-z0-9+\-.]*:)?//").expect("static pattern compiles"));

pub fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE_URL.is_match(url)
}

/// Resolve `path` against `base`.
///
/// Absolute URLs are returned verbatim and the query is dropped. Otherwise the
/// result is `base + "/" + path`, with `"?" + query` appended when the query
/// serializes to something non-empty. Neither side is normalized.
pub fn build_url(base: &str, path: &str, query: Option<&QueryParams>) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let url = format!("{base}/{path}");
    match query.map(QueryParams::serialize) {
        Some(params) if !params.is_empty() => format!("{url}?{params}"),
        _ => url,
    }
}
