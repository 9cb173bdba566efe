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

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_query() {
    let resp = app()
        .oneshot(request("GET", "/echo?a=1&a=2", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo");
    assert_eq!(echo.query.as_deref(), Some("a=1&a=2"));
}

#[tokio::test]
async fn echo_returns_body_and_headers() {
    let resp = app()
        .oneshot(request("POST", "/echo", "hello"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "hello");
    assert_eq!(echo.headers["content-type"], "text/plain");
}

#[tokio::test]
async fn echo_joins_repeated_headers() {
    let req = Request::builder()
        .uri("/echo")
        .header("x-tag", "a")
        .header("x-tag", "b")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.headers["x-tag"], "a, b");
}

#[tokio::test]
async fn echo_accepts_every_method() {
    for method in ["PUT", "DELETE", "PATCH", "OPTIONS"] {
        let resp = app().oneshot(request(method, "/echo", "")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
    }
}

#[tokio::test]
async fn echo_sets_request_id() {
    let resp = app().oneshot(request("GET", "/echo", "")).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    let resp = app()
        .oneshot(request("GET", "/status/418", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "status 418");
}

#[tokio::test]
async fn status_route_rejects_bad_code() {
    let resp = app()
        .oneshot(request("GET", "/status/not-a-code", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- jsonp ---

#[tokio::test]
async fn jsonp_wraps_payload_in_callback() {
    let resp = app()
        .oneshot(request("GET", "/jsonp?callback=cb_1", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/javascript"
    );
    assert_eq!(body_bytes(resp).await, r#"cb_1({"ok":true})"#);
}

#[tokio::test]
async fn jsonp_rejects_post() {
    let resp = app()
        .oneshot(request("POST", "/jsonp", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
