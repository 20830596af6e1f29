//! Query-string serialization for nested parameter maps.
//!
//! Nested maps use bracket keys (`a[b]=1`). Lists are rendered as a single
//! comma-joined value without percent-encoding (`a=1,2`), not as repeated
//! keys.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Null,
    Scalar(String),
    List(Vec<QueryValue>),
    Map(QueryParams),
}

/// Insertion-ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated key replaces the earlier value in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Build parameters from any serializable value. The value must serialize
    /// to a JSON object (or `null`, which yields no parameters).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        match QueryValue::from(json) {
            QueryValue::Map(params) => Ok(params),
            QueryValue::Null => Ok(Self::new()),
            other => Err(ApiError::Serialization(format!(
                "query parameters must be an object, got {other:?}"
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize into a `&`-joined query string (no leading `?`).
    pub fn serialize(&self) -> String {
        let mut pairs = Vec::new();
        collect_pairs(self, None, &mut pairs);
        pairs.join("&")
    }
}

fn collect_pairs(params: &QueryParams, prefix: Option<&str>, pairs: &mut Vec<String>) {
    for (key, value) in params.iter() {
        let key = match prefix {
            Some(prefix) => format!("{prefix}[{key}]"),
            None => key.to_string(),
        };
        match value {
            QueryValue::Map(nested) => collect_pairs(nested, Some(&key), pairs),
            // raw key and raw joined value
            QueryValue::List(items) => pairs.push(format!("{key}={}", join_list(items))),
            QueryValue::Scalar(s) => pairs.push(format!("{}={}", encode_component(&key), encode_component(s))),
            QueryValue::Null => pairs.push(format!("{}=", encode_component(&key))),
        }
    }
}

fn join_list(items: &[QueryValue]) -> String {
    items
        .iter()
        .map(|item| match item {
            QueryValue::Null => String::new(),
            QueryValue::Scalar(s) => s.clone(),
            QueryValue::List(inner) => join_list(inner),
            QueryValue::Map(map) => map_to_json(map).to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn map_to_json(map: &QueryParams) -> Value {
    Value::Object(map.iter().map(|(k, v)| (k.to_string(), value_to_json(v))).collect())
}

fn value_to_json(value: &QueryValue) -> Value {
    match value {
        QueryValue::Null => Value::Null,
        QueryValue::Scalar(s) => Value::String(s.clone()),
        QueryValue::List(items) => Value::Array(items.iter().map(value_to_json).collect()),
        QueryValue::Map(map) => map_to_json(map),
    }
}

/// Percent-encode like `encodeURIComponent`: `!'()*` stay literal on top of
/// the RFC 3986 unreserved set.
pub fn encode_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => QueryValue::Null,
            Value::Bool(b) => QueryValue::Scalar(b.to_string()),
            Value::Number(n) => QueryValue::Scalar(match n.as_f64() {
                Some(f) if n.is_f64() => format_number(f),
                _ => n.to_string(),
            }),
            Value::String(s) => QueryValue::Scalar(s),
            Value::Array(items) => QueryValue::List(items.into_iter().map(QueryValue::from).collect()),
            Value::Object(map) => QueryValue::Map(QueryParams {
                entries: map.into_iter().map(|(k, v)| (k, QueryValue::from(v))).collect(),
            }),
        }
    }
}

impl From<QueryParams> for QueryValue {
    fn from(params: QueryParams) -> Self {
        QueryValue::Map(params)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Scalar(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Scalar(s)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Scalar(b.to_string())
    }
}

macro_rules! scalar_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(v: $t) -> Self {
                QueryValue::Scalar(v.to_string())
            }
        })*
    };
}

scalar_from_display!(i32, i64, u32, u64, usize);

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Scalar(format_number(v))
    }
}

/// Render a float the way JavaScript's `String(number)` does: whole values
/// drop the fraction, exponent form outside `[1e-6, 1e21)`, and
/// `NaN`/`Infinity` spelled out.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return v.to_string();
    }
    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::List(items.into_iter().map(Into::into).collect())
    }
}
