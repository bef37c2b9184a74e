//! Embedded static content: assets, well-known text files and legal pages.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};
use std::sync::Arc;

use super::page;
use super::state::AppState;

/// Embedded static files.
static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const XML: &str = "application/xml; charset=utf-8";

fn embedded(name: &str, content_type: &'static str) -> Response {
    match STATIC_DIR.get_file(name) {
        Some(file) => ([(header::CONTENT_TYPE, content_type)], file.contents()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// GET /robots.txt
pub async fn robots_txt() -> Response {
    embedded("robots.txt", TEXT_PLAIN)
}

/// GET /sitemap.xml
pub async fn sitemap_xml() -> Response {
    embedded("sitemap.xml", XML)
}

/// GET /security.txt and /.well-known/security.txt
pub async fn security_txt() -> Response {
    embedded("security.txt", TEXT_PLAIN)
}

/// GET /humans.txt
pub async fn humans_txt() -> Response {
    embedded("humans.txt", TEXT_PLAIN)
}

/// GET /ads.txt
pub async fn ads_txt() -> Response {
    embedded("ads.txt", TEXT_PLAIN)
}

/// Serve files from the static directory.
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    if path.starts_with("pages/") {
        return (StatusCode::NOT_FOUND, "Asset not found").into_response();
    }

    match STATIC_DIR.get_file(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();
            ([(header::CONTENT_TYPE, mime)], file.contents()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

/// Embedded legal page and its title.
struct LegalPage {
    file: &'static str,
    title: &'static str,
}

const PRIVACY: LegalPage = LegalPage {
    file: "pages/privacy-policy.html",
    title: "Политика конфиденциальности",
};
const TERMS: LegalPage = LegalPage {
    file: "pages/terms-of-service.html",
    title: "Условия использования",
};
const COOKIES: LegalPage = LegalPage {
    file: "pages/cookie-policy.html",
    title: "Политика использования cookies",
};
const DMCA: LegalPage = LegalPage {
    file: "pages/dmca-policy.html",
    title: "Политика DMCA",
};

fn legal_page(state: &AppState, legal: &LegalPage) -> Response {
    match STATIC_DIR
        .get_file(legal.file)
        .and_then(|file| file.contents_utf8())
    {
        Some(body) => Html(page::layout(state, legal.title, body)).into_response(),
        None => (StatusCode::NOT_FOUND, "Page not found").into_response(),
    }
}

/// GET /privacy-policy and /privacy
pub async fn privacy_policy(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, &PRIVACY)
}

/// GET /terms-of-service and /terms
pub async fn terms_of_service(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, &TERMS)
}

/// GET /cookie-policy and /cookies
pub async fn cookie_policy(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, &COOKIES)
}

/// GET /dmca-policy
pub async fn dmca_policy(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, &DMCA)
}
