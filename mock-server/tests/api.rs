use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_raw_query() {
    let resp = app()
        .oneshot(empty_request("GET", "/echo?a=1&ids=3,4"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo");
    assert_eq!(echo.query.as_deref(), Some("a=1&ids=3,4"));
    assert!(echo.body.is_none());
}

#[tokio::test]
async fn echo_returns_json_body_and_headers() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo", r#"{"name":"pen"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.body, Some(json!({"name": "pen"})));
    assert_eq!(
        echo.headers["content-type"],
        json!("application/json; charset=utf-8")
    );
}

// --- fixed outcomes ---

#[tokio::test]
async fn empty_returns_204_without_body() {
    let resp = app().oneshot(empty_request("DELETE", "/empty")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn forbidden_returns_403_with_non_json_body() {
    let resp = app().oneshot(empty_request("GET", "/forbidden")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn fail_returns_500_with_error_payload() {
    let resp = app().oneshot(empty_request("POST", "/fail")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "bad"}));
}

#[tokio::test]
async fn malformed_returns_200_with_plain_text() {
    let resp = app().oneshot(empty_request("GET", "/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "this is not json");
}

#[tokio::test]
async fn status_route_echoes_requested_code() {
    let resp = app().oneshot(empty_request("GET", "/status/418")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"status": 418}));
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(empty_request("GET", "/status/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
