//! # HTTP Server for QR Generation
//!
//! Serves the generator page, the JSON API and the static/legal content.
//!
//! ## Usage
//!
//! ```bash
//! qrforge serve --listen 0.0.0.0:5000 --environment production
//! ```
//!
//! Then open http://localhost:5000 in a browser.
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Generator form |
//! | POST | `/` | Generate from form fields, normalized |
//! | POST | `/api/generate` | JSON in, JSON with data URI out |
//! | POST | `/api/generate.png` | JSON in, PNG out |
//! | GET | `/api/options` | Size catalog, palette, levels |
//! | GET | `/health` | Liveness |
//! | GET | `/static/*path` | Embedded assets |

pub mod handlers;
pub mod headers;
pub mod page;
pub mod state;
pub mod static_files;

pub use state::{AppState, Environment, ServerConfig};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::QrForgeError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let max_body = state.config.max_body_bytes;

    Router::new()
        // Generator page
        .route(
            "/",
            get(handlers::generator::index).post(handlers::generator::submit),
        )
        // JSON API
        .route("/api/generate", post(handlers::api::generate))
        .route("/api/generate.png", post(handlers::api::generate_png))
        .route("/api/options", get(handlers::api::options))
        .route("/health", get(handlers::health::health))
        // Well-known files
        .route("/robots.txt", get(static_files::robots_txt))
        .route("/sitemap.xml", get(static_files::sitemap_xml))
        .route("/security.txt", get(static_files::security_txt))
        .route("/.well-known/security.txt", get(static_files::security_txt))
        .route("/humans.txt", get(static_files::humans_txt))
        .route("/ads.txt", get(static_files::ads_txt))
        .route("/static/*path", get(static_files::asset_handler))
        // Legal pages
        .route("/privacy-policy", get(static_files::privacy_policy))
        .route("/privacy", get(static_files::privacy_policy))
        .route("/terms-of-service", get(static_files::terms_of_service))
        .route("/terms", get(static_files::terms_of_service))
        .route("/cookie-policy", get(static_files::cookie_policy))
        .route("/cookies", get(static_files::cookie_policy))
        .route("/dmca-policy", get(static_files::dmca_policy))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(state.clone(), headers::security_headers))
                .layer(DefaultBodyLimit::max(max_body)),
        )
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use qrforge::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), qrforge::QrForgeError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), QrForgeError> {
    let app_state = Arc::new(AppState::new(config.clone()));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            QrForgeError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(
        listen = %config.listen_addr,
        environment = %config.environment,
        max_body_bytes = config.max_body_bytes,
        "qrforge HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| QrForgeError::Transport(format!("Server error: {}", e)))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
