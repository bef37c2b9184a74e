//! Security header policy applied to every response.
//!
//! | Path | Cache-Control | Extra |
//! |------|---------------|-------|
//! | `/static/*` | `public, max-age=31536000, immutable` | |
//! | `/api/*` | `no-store, ...` | CORS (`*`) |
//! | everything else | `no-store, ...` | |
//!
//! HSTS is only sent in production.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::state::{AppState, Environment};

const CSP_DIRECTIVES: [&str; 9] = [
    "default-src 'self'",
    "script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net",
    "style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net",
    "img-src 'self' data: https:",
    "font-src 'self' https://cdn.jsdelivr.net",
    "connect-src 'self'",
    "frame-ancestors 'none'",
    "form-action 'self'",
    "object-src 'none'",
];

const PERMISSIONS_POLICY: &str = "accelerometer=(), autoplay=(), camera=(), \
    geolocation=(), gyroscope=(), magnetometer=(), \
    microphone=(), payment=(), usb=()";

const HSTS: &str = "max-age=31536000; includeSubDomains";
const STATIC_CACHE: &str = "public, max-age=31536000, immutable";
const NO_CACHE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// Response headers added around every handler.
#[derive(Debug, Clone)]
pub struct HeaderPolicy {
    base: Vec<(HeaderName, HeaderValue)>,
    /// Whether `Strict-Transport-Security` is sent
    pub hsts: bool,
}

impl HeaderPolicy {
    pub fn for_environment(environment: Environment) -> Self {
        let csp = CSP_DIRECTIVES.join("; ");
        let base = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static(PERMISSIONS_POLICY),
            ),
            (
                HeaderName::from_static("cross-origin-embedder-policy"),
                HeaderValue::from_static("require-corp"),
            ),
            (
                HeaderName::from_static("cross-origin-opener-policy"),
                HeaderValue::from_static("same-origin"),
            ),
            (
                HeaderName::from_static("cross-origin-resource-policy"),
                HeaderValue::from_static("same-origin"),
            ),
            (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_str(&csp)
                    .unwrap_or_else(|_| HeaderValue::from_static("default-src 'self'")),
            ),
        ];

        Self {
            base,
            hsts: environment == Environment::Production,
        }
    }

    /// Apply the policy to the headers of a response for `path`.
    pub fn apply(&self, path: &str, headers: &mut HeaderMap) {
        headers.remove(header::SERVER);
        headers.remove("x-powered-by");

        for (name, value) in &self.base {
            headers.insert(name.clone(), value.clone());
        }

        if self.hsts {
            headers.insert(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS),
            );
        }

        if path.starts_with("/static/") {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(STATIC_CACHE));
        } else {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
        }

        if path.starts_with("/api/") {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            );
        }
    }
}

/// Middleware adding the security headers; answers API preflight requests.
pub async fn security_headers(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let mut resp = if req.method() == Method::OPTIONS && path.starts_with("/api/") {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    state.headers.apply(&path, resp.headers_mut());
    resp
}
