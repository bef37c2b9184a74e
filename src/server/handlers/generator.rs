//! HTML form handlers for the generator page.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::QrForgeError;
use crate::generate::{GenerationRequest, Normalization};
use crate::input::DEFAULT_COLOR;
use crate::server::page::{self, FormValues, IndexView};
use crate::server::state::AppState;

use super::generate_blocking;

/// Prompt shown when the form is submitted without data.
pub const EMPTY_FORM_MESSAGE: &str = "Пожалуйста, введите данные для QR-кода";

/// Handle GET / - return the empty form.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::index_page(&state, &IndexView::default()))
}

/// Handle POST / - generate and show the QR code.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(request): Form<GenerationRequest>,
) -> Response {
    let submitted = FormValues {
        data: request.data.clone(),
        size: request.size_id().to_string(),
        color: request
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        error_correction: request.level_code().to_string(),
    };

    match generate_blocking(request, Normalization::Apply).await {
        Ok(result) => {
            tracing::info!(
                chars = result.data_length,
                size = result.profile.id,
                correction = result.error_correction.code(),
                version = result.version,
                "generated QR code"
            );
            let view = IndexView {
                form: FormValues {
                    data: result.data.clone(),
                    color: result.color.clone(),
                    ..submitted
                },
                result: Some(&result),
                error: None,
            };
            Html(page::index_page(&state, &view)).into_response()
        }
        Err(QrForgeError::Validation(_)) => {
            let view = IndexView {
                form: submitted,
                result: None,
                error: Some(EMPTY_FORM_MESSAGE.to_string()),
            };
            Html(page::index_page(&state, &view)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "QR generation failed");
            let view = IndexView {
                form: submitted,
                result: None,
                error: Some(format!("Ошибка при генерации QR-кода: {}", e)),
            };
            Html(page::index_page(&state, &view)).into_response()
        }
    }
}
