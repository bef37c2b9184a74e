//! QR symbol encoding with a single relaxed retry.
//!
//! Encoding first tries a fixed version 1 symbol. When the data does not fit,
//! it retries once with automatic version selection and attaches a warning.
//! Nothing else is retried.

use qrcode::types::QrError;
use qrcode::{QrCode, Version};

use crate::catalog::ErrorCorrection;
use crate::error::QrForgeError;

/// Symbol version tried before falling back to automatic selection.
pub const INITIAL_VERSION: i16 = 1;

/// An encoded symbol plus how it was obtained.
pub struct EncodedSymbol {
    pub code: QrCode,
    /// Symbol version actually used
    pub version: i16,
    /// Set when the initial version overflowed and the retry was used
    pub warning: Option<String>,
}

impl EncodedSymbol {
    /// Width of the symbol in modules.
    pub fn modules(&self) -> u32 {
        self.code.width() as u32
    }
}

/// Encode `data`, retrying with automatic version selection on overflow.
///
/// `char_count` is the length of the text as the user typed it and
/// `requested_code` the level code as submitted, before resolution. Both are
/// quoted in the warning.
pub fn encode_with_fallback(
    data: &str,
    level: ErrorCorrection,
    requested_code: &str,
    char_count: usize,
) -> Result<EncodedSymbol, QrForgeError> {
    match QrCode::with_version(data, Version::Normal(INITIAL_VERSION), level.ec_level()) {
        Ok(code) => Ok(EncodedSymbol {
            code,
            version: INITIAL_VERSION,
            warning: None,
        }),
        Err(QrError::DataTooLong) => {
            tracing::debug!(
                chars = char_count,
                correction = level.code(),
                "data overflows initial version, selecting version automatically"
            );
            let code = QrCode::with_error_correction_level(data, level.ec_level())
                .map_err(|e| QrForgeError::Encode(e.to_string()))?;
            let version = version_number(code.version());
            Ok(EncodedSymbol {
                code,
                version,
                warning: Some(overflow_warning(char_count, requested_code)),
            })
        }
        Err(e) => Err(QrForgeError::Encode(e.to_string())),
    }
}

/// Advisory message shown next to a symbol that needed the relaxed retry.
pub fn overflow_warning(char_count: usize, level_code: &str) -> String {
    format!(
        "Внимание: данные ({} символов) могут не поместиться в выбранный размер \
         с уровнем коррекции {}. Рекомендуется выбрать больший размер или более \
         высокий уровень коррекции.",
        char_count, level_code
    )
}

fn version_number(version: Version) -> i16 {
    match version {
        Version::Normal(v) | Version::Micro(v) => v,
    }
}
