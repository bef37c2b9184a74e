//! JSON API handlers.
//!
//! Unlike the HTML form, the API encodes `data` verbatim: no `mailto:`,
//! `tel:` or `https://` prefixes are added.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::catalog::{CharLimits, ErrorCorrection, SizeProfile};
use crate::error::QrForgeError;
use crate::generate::{GenerationRequest, GenerationResult, Normalization};
use crate::server::state::AppState;

use super::generate_blocking;

/// Metadata returned next to the generated image.
#[derive(Debug, Serialize)]
pub struct GenerateInfo {
    pub data_length: usize,
    /// Display name of the size profile
    pub size: &'static str,
    pub color: String,
    /// Display name of the error-correction level
    pub error_correction: &'static str,
    pub version: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Success envelope of POST /api/generate.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub qr_code: String,
    pub info: GenerateInfo,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            qr_code: result.data_uri(),
            info: GenerateInfo {
                data_length: result.data_length,
                size: result.profile.name,
                color: result.color,
                error_correction: result.error_correction.display_name(),
                version: result.version,
                warning: result.warning,
            },
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn generation_error(err: QrForgeError) -> Response {
    if err.is_client_error() {
        return error_response(StatusCode::BAD_REQUEST, err.to_string());
    }
    tracing::error!(error = %err, "API generation failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

async fn run(
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<GenerationResult, Response> {
    let Json(request) =
        payload.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;
    generate_blocking(request, Normalization::Skip)
        .await
        .map_err(generation_error)
}

/// Handle POST /api/generate - return the image as a data URI in JSON.
pub async fn generate(payload: Result<Json<GenerationRequest>, JsonRejection>) -> Response {
    match run(payload).await {
        Ok(result) => Json(GenerateResponse::from(result)).into_response(),
        Err(resp) => resp,
    }
}

/// Handle POST /api/generate.png - return the raw PNG.
pub async fn generate_png(payload: Result<Json<GenerationRequest>, JsonRejection>) -> Response {
    let result = match run(payload).await {
        Ok(result) => result,
        Err(resp) => return resp,
    };

    let mut resp = ([(header::CONTENT_TYPE, "image/png")], result.png).into_response();
    resp.headers_mut().insert(
        HeaderName::from_static("x-qr-version"),
        HeaderValue::from(result.version),
    );
    if result.warning.is_some() {
        resp.headers_mut().insert(
            HeaderName::from_static("x-qr-capacity-warning"),
            HeaderValue::from_static("true"),
        );
    }
    resp
}

/// One error-correction level as listed by the options endpoint.
#[derive(Debug, Serialize)]
pub struct LevelOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// Generator options for building a client form.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub sizes: &'static [SizeProfile],
    pub colors: &'static [&'static str],
    pub error_correction: Vec<LevelOption>,
    pub default_char_limits: CharLimits,
}

/// Handle GET /api/options - list sizes, palette and levels.
pub async fn options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        sizes: state.sizes,
        colors: state.palette,
        error_correction: ErrorCorrection::ALL
            .iter()
            .map(|level| LevelOption {
                code: level.code(),
                name: level.display_name(),
            })
            .collect(),
        default_char_limits: SizeProfile::medium().char_limits,
    })
}
