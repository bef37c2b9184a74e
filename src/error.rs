//! # Error Types
//!
//! This module defines error types used throughout the qrforge library.
//!
//! Capacity overflow at the initial symbol version is deliberately absent:
//! it is recovered inside [`crate::render::encode_with_fallback`] and only
//! ever surfaces as an advisory warning on a successful result.

use thiserror::Error;

/// Main error type for qrforge operations
#[derive(Debug, Error)]
pub enum QrForgeError {
    /// The request was rejected before any encoding was attempted
    #[error("{0}")]
    Validation(String),

    /// The QR encoder failed for a reason other than the recoverable overflow
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Rasterization or PNG encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Server-level errors (bind, accept loop)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QrForgeError {
    /// Whether this error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, QrForgeError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_bare() {
        let err = QrForgeError::Validation("No data provided".to_string());
        assert_eq!(err.to_string(), "No data provided");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_encode_is_server_error() {
        let err = QrForgeError::Encode("bad".to_string());
        assert_eq!(err.to_string(), "Encoding error: bad");
        assert!(!err.is_client_error());
    }
}
