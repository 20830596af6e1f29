//! Verify serialization, URL building and status mapping against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Parsed results are compared as `serde_json::Value` so field ordering in the
//! vector files does not matter.

use fetch_core::{build_url, map_response, ApiError, HttpResponse, QueryParams};
use serde_json::Value;

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    for case in load(include_str!("../../test-vectors/query.json")) {
        let name = case["name"].as_str().unwrap();
        let params = QueryParams::from_serialize(&case["input"]).unwrap();
        assert_eq!(params.serialize(), case["expected"].as_str().unwrap(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    for case in load(include_str!("../../test-vectors/url.json")) {
        let name = case["name"].as_str().unwrap();
        let query = QueryParams::from_serialize(&case["query"]).unwrap();
        let url = build_url(
            case["base"].as_str().unwrap(),
            case["path"].as_str().unwrap(),
            Some(&query),
        );
        assert_eq!(url, case["expected"].as_str().unwrap(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    for case in load(include_str!("../../test-vectors/status.json")) {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let result = map_response::<Value>(&response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Unauthorized" => assert!(matches!(err, ApiError::Unauthorized), "{name}: expected Unauthorized"),
                "Parse" => assert!(matches!(err, ApiError::Parse(_)), "{name}: expected Parse"),
                "Application" => match err {
                    ApiError::Application { status, payload } => {
                        assert_eq!(status, response.status, "{name}: status");
                        assert_eq!(payload, case["expected_payload"], "{name}: payload");
                    }
                    other => panic!("{name}: expected Application, got {other:?}"),
                },
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let parsed = result.unwrap();
            match &case["expected_result"] {
                Value::Null => assert!(parsed.is_none(), "{name}: expected no content"),
                expected => assert_eq!(parsed.as_ref(), Some(expected), "{name}: parsed result"),
            }
        }
    }
}
