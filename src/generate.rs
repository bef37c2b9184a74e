//! # QR Generation Pipeline
//!
//! One request in, one rendered symbol out:
//!
//! ```text
//! GenerationRequest
//!     -> trim, reject empty            (QrForgeError::Validation)
//!     -> normalize (form path only)
//!     -> resolve SizeProfile / ErrorCorrection / color
//!     -> encode_with_fallback          (version 1, then automatic)
//!     -> rasterize + PNG
//! GenerationResult
//! ```
//!
//! Every call is independent and deterministic: the same request always
//! produces the same PNG bytes.

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

use crate::catalog::{DEFAULT_SIZE_ID, ErrorCorrection, SizeProfile, max_chars_for};
use crate::error::QrForgeError;
use crate::input::{normalize, parse_hex_rgb, validate_color};
use crate::render::{encode_with_fallback, png_data_uri, rasterize, to_png};

/// Message carried by the validation error for empty input.
pub const NO_DATA_MESSAGE: &str = "No data provided";

/// Level code used when none is submitted.
pub const DEFAULT_LEVEL_CODE: &str = "M";

/// Accept a string value and treat anything else (`null`, numbers, objects)
/// as absent, so unusable options fall back to their defaults.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(text)) => Some(text),
        Some(Field::Other(_)) | None => None,
    })
}

/// Raw generator input, from the HTML form or the JSON API.
///
/// Options that are missing or unusable resolve to their defaults inside
/// [`generate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    /// Text to encode (required, non-empty after trimming)
    #[serde(default)]
    pub data: String,
    /// Size profile id
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: Option<String>,
    /// Foreground color, validated before use
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,
    /// Error-correction level code
    #[serde(default, deserialize_with = "lenient_text")]
    pub error_correction: Option<String>,
}

impl GenerationRequest {
    /// Request for `data` with every option at its default.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn error_correction(mut self, code: impl Into<String>) -> Self {
        self.error_correction = Some(code.into());
        self
    }

    /// Size id as submitted, or the default.
    pub fn size_id(&self) -> &str {
        self.size.as_deref().unwrap_or(DEFAULT_SIZE_ID)
    }

    /// Level code as submitted, or the default.
    pub fn level_code(&self) -> &str {
        self.error_correction
            .as_deref()
            .unwrap_or(DEFAULT_LEVEL_CODE)
    }
}

/// Whether the input normalizer runs before encoding.
///
/// The HTML form normalizes; the JSON API encodes the text verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    Apply,
    Skip,
}

/// A rendered symbol and everything shown alongside it.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Trimmed input as submitted
    pub data: String,
    /// Text that was actually encoded
    pub encoded_data: String,
    /// Character count of the trimmed input
    pub data_length: usize,
    pub profile: &'static SizeProfile,
    pub color: String,
    pub error_correction: ErrorCorrection,
    /// Side of the square image in pixels
    pub size_px: u32,
    /// Symbol version actually used
    pub version: i16,
    /// Advisory character budget for the requested size and level
    pub max_chars: &'static str,
    /// Capacity warning, set when the initial version overflowed
    pub warning: Option<String>,
    pub png: Vec<u8>,
}

impl GenerationResult {
    /// PNG as a `data:` URI for embedding in HTML or JSON.
    pub fn data_uri(&self) -> String {
        png_data_uri(&self.png)
    }
}

/// Run the full pipeline for one request.
pub fn generate(
    request: &GenerationRequest,
    normalization: Normalization,
) -> Result<GenerationResult, QrForgeError> {
    let data = request.data.trim();
    if data.is_empty() {
        return Err(QrForgeError::Validation(NO_DATA_MESSAGE.to_string()));
    }

    let encoded_data = match normalization {
        Normalization::Apply => normalize(data),
        Normalization::Skip => data.to_string(),
    };

    let profile = SizeProfile::by_id(request.size_id());
    let error_correction = ErrorCorrection::resolve(request.level_code());
    let color = validate_color(request.color.as_deref());
    let data_length = data.chars().count();
    let max_chars = max_chars_for(request.size_id(), request.level_code());

    let symbol = encode_with_fallback(
        &encoded_data,
        error_correction,
        request.level_code(),
        data_length,
    )?;
    if let Some(warning) = &symbol.warning {
        tracing::warn!(
            chars = data_length,
            size = profile.id,
            correction = error_correction.code(),
            version = symbol.version,
            "{}",
            warning
        );
    }

    let rgb = parse_hex_rgb(&color).unwrap_or([0, 0, 0]);
    let img = rasterize(&symbol, profile, rgb);
    let png = to_png(&img)?;

    Ok(GenerationResult {
        data: data.to_string(),
        encoded_data,
        data_length,
        profile,
        color,
        error_correction,
        size_px: img.width(),
        version: symbol.version,
        max_chars,
        warning: symbol.warning,
        png,
    })
}
