use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/widgets/42?foo=bar&foo=baz")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/widgets/42");
    assert_eq!(echo.query.as_deref(), Some("foo=bar&foo=baz"));
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_keeps_repeated_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(http::header::ACCEPT, "text/html")
                .header(http::header::ACCEPT, "application/json")
                .body("payload".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert!(echo.query.is_none());
    assert_eq!(echo.body, "payload");
    let accept: Vec<&str> = echo
        .headers
        .iter()
        .filter(|(k, _)| k == "accept")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(accept, vec!["text/html", "application/json"]);
}

#[tokio::test]
async fn echo_accepts_any_method() {
    for method in ["PUT", "PATCH", "DELETE", "OPTIONS"] {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/anything")
                    .body(String::new())
                    .unwrap(),
            )
            .await
            .unwrap();
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
    }
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/418").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn status_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/teapot").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- bytes ---

#[tokio::test]
async fn bytes_returns_requested_length() {
    let resp = app()
        .oneshot(Request::builder().uri("/bytes/300").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 300);
    assert_eq!(body[0], 0);
    assert_eq!(body[251], 0);
}

#[tokio::test]
async fn bytes_refuses_large_payloads() {
    let resp = app()
        .oneshot(Request::builder().uri("/bytes/99999999").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
