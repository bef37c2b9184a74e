//! HTTP handlers for the server.

pub mod api;
pub mod generator;
pub mod health;

use crate::error::QrForgeError;
use crate::generate::{GenerationRequest, GenerationResult, Normalization, generate};

/// Run the generation pipeline on the blocking pool.
///
/// Encoding and PNG compression are CPU-bound, so they stay off the async
/// worker threads.
pub(crate) async fn generate_blocking(
    request: GenerationRequest,
    normalization: Normalization,
) -> Result<GenerationResult, QrForgeError> {
    tokio::task::spawn_blocking(move || generate(&request, normalization))
        .await
        .map_err(|e| QrForgeError::Encode(format!("Task error: {}", e)))?
}
