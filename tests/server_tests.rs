//! # Server Tests
//!
//! Drive the axum router in-process and check routes, response shapes and
//! the header policy.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use pretty_assertions::assert_eq;
use qrforge::server::{AppState, Environment, ServerConfig, router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn app_with(environment: Environment) -> Router {
    let config = ServerConfig {
        environment,
        ..Default::default()
    };
    router(Arc::new(AppState::new(config)))
}

fn app() -> Router {
    app_with(Environment::Development)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

async fn get(path: &str) -> Response {
    send(app(), Request::get(path).body(Body::empty()).unwrap()).await
}

async fn post_json(path: &str, body: Value) -> Response {
    let request = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app(), request).await
}

async fn post_form(body: &str) -> Response {
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app(), request).await
}

async fn body_bytes(resp: Response) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("JSON body")
}

async fn body_text(resp: Response) -> String {
    String::from_utf8(body_bytes(resp).await).expect("UTF-8 body")
}

// ============================================================================
// HEALTH AND STATIC CONTENT
// ============================================================================

#[tokio::test]
async fn health_reports_healthy() {
    let resp = get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"status": "healthy", "service": "qr-generator"})
    );
}

#[tokio::test]
async fn well_known_files_are_served() {
    for (path, content_type) in [
        ("/robots.txt", "text/plain; charset=utf-8"),
        ("/security.txt", "text/plain; charset=utf-8"),
        ("/.well-known/security.txt", "text/plain; charset=utf-8"),
        ("/humans.txt", "text/plain; charset=utf-8"),
        ("/ads.txt", "text/plain; charset=utf-8"),
        ("/sitemap.xml", "application/xml; charset=utf-8"),
    ] {
        let resp = get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", path);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], content_type, "{}", path);
    }
}

#[tokio::test]
async fn legal_pages_and_aliases() {
    for path in [
        "/privacy-policy",
        "/privacy",
        "/terms-of-service",
        "/terms",
        "/cookie-policy",
        "/cookies",
        "/dmca-policy",
    ] {
        let resp = get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", path);
        assert!(body_text(resp).await.contains("<footer>"), "{}", path);
    }
}

#[tokio::test]
async fn static_assets_and_missing_files() {
    let resp = get("/static/style.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css");

    let resp = get("/static/nope.js").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// HEADER POLICY
// ============================================================================

#[tokio::test]
async fn security_headers_on_every_response() {
    let resp = get("/").await;
    let headers = resp.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate, proxy-revalidate"
    );
    assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
    assert!(!headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn static_paths_are_cacheable() {
    let resp = get("/static/app.js").await;
    assert_eq!(
        resp.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );
}

#[tokio::test]
async fn api_gets_cors_and_preflight() {
    let resp = get("/api/options").await;
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), preflight).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, OPTIONS"
    );
}

#[tokio::test]
async fn hsts_only_in_production() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let resp = send(app_with(Environment::Production), request).await;
    assert_eq!(
        resp.headers()[header::STRICT_TRANSPORT_SECURITY],
        "max-age=31536000; includeSubDomains"
    );
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn api_generate_success_envelope() {
    let resp = post_json(
        "/api/generate",
        json!({"data": "user@example.com", "size": "s", "color": "#abc", "error_correction": "Q"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert!(
        body["qr_code"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
    assert_eq!(body["info"]["data_length"], json!(16));
    assert_eq!(body["info"]["size"], json!("Маленький"));
    assert_eq!(body["info"]["color"], json!("#aabbcc"));
    assert_eq!(body["info"]["error_correction"], json!("Q (Высокий, 25%)"));
}

#[tokio::test]
async fn api_generate_defaults() {
    let resp = post_json("/api/generate", json!({"data": "hello"})).await;
    let body = body_json(resp).await;
    assert_eq!(body["info"]["size"], json!("Средний"));
    assert_eq!(body["info"]["color"], json!("#000000"));
    assert_eq!(body["info"]["error_correction"], json!("M (Средний, 15%)"));
    assert_eq!(body["info"]["version"], json!(1));
    assert!(body["info"].get("warning").is_none());
}

#[tokio::test]
async fn api_generate_null_or_mistyped_options_use_defaults() {
    for payload in [
        json!({"data": "hello", "size": null}),
        json!({"data": "hello", "error_correction": null}),
        json!({"data": "hello", "size": 5, "error_correction": false, "color": null}),
    ] {
        let resp = post_json("/api/generate", payload.clone()).await;
        assert_eq!(resp.status(), StatusCode::OK, "payload {payload}");
        let body = body_json(resp).await;
        assert_eq!(body["info"]["size"], json!("Средний"));
        assert_eq!(body["info"]["error_correction"], json!("M (Средний, 15%)"));
        assert_eq!(body["info"]["color"], json!("#000000"));
    }
}

#[tokio::test]
async fn api_generate_rejects_empty_data() {
    for payload in [json!({"data": "   "}), json!({})] {
        let resp = post_json("/api/generate", payload).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"error": "No data provided"}));
    }
}

#[tokio::test]
async fn api_generate_rejects_malformed_json() {
    let request = Request::post("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = send(app(), request).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn api_generate_encoder_failure_is_500() {
    let resp = post_json(
        "/api/generate",
        json!({"data": "z".repeat(5000), "error_correction": "H"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn api_overflow_reports_warning_and_version() {
    let resp = post_json(
        "/api/generate",
        json!({"data": "QR overflow check ".repeat(4), "error_correction": "H"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["info"]["version"].as_i64().unwrap() > 1);
    assert!(body["info"]["warning"].as_str().unwrap().contains("коррекции H"));
}

#[tokio::test]
async fn api_png_returns_image_bytes() {
    let resp = post_json("/api/generate.png", json!({"data": "hello"})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(resp.headers()["x-qr-version"], "1");
    assert!(!resp.headers().contains_key("x-qr-capacity-warning"));

    let png = body_bytes(resp).await;
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn api_png_is_deterministic() {
    let payload = json!({"data": "example.com", "size": "xs", "color": "#ff6584"});
    let a = body_bytes(post_json("/api/generate.png", payload.clone()).await).await;
    let b = body_bytes(post_json("/api/generate.png", payload).await).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn api_options_lists_catalog() {
    let body = body_json(get("/api/options").await).await;
    assert_eq!(body["sizes"].as_array().unwrap().len(), 5);
    assert_eq!(body["sizes"][2]["id"], json!("m"));
    assert_eq!(body["sizes"][2]["char_limits"]["H"], json!("~120 символов"));
    assert_eq!(body["colors"].as_array().unwrap().len(), 16);
    assert_eq!(body["error_correction"][3]["code"], json!("H"));
}

// ============================================================================
// HTML FORM
// ============================================================================

#[tokio::test]
async fn form_get_renders_page() {
    let resp = get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<form method=\"post\" action=\"/\">"));
    assert!(!html.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn form_post_normalizes_and_embeds_image() {
    let resp = post_form("data=example.com&size=l&color=%236c63ff&error_correction=L").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("https://example.com"));
    assert!(html.contains("L (Низкий, 7%)"));
    assert!(html.contains("Большой"));
}

#[tokio::test]
async fn form_post_empty_shows_validation_message() {
    let html = body_text(post_form("data=+++&size=m").await).await;
    assert!(html.contains("Пожалуйста, введите данные для QR-кода"));
    assert!(!html.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn form_post_overflow_shows_warning() {
    let data = "QR overflow check ".repeat(4).replace(' ', "+");
    let html = body_text(post_form(&format!("data={}&error_correction=H", data)).await).await;
    assert!(html.contains("class=\"warning\""));
    assert!(html.contains("data:image/png;base64,"));
}
