//! # qrforge - QR Code Generator
//!
//! qrforge is a small web front-end for making QR codes. It provides:
//!
//! - **Input normalization**: email, phone and bare-domain detection with
//!   the matching `mailto:`, `tel:` or `https://` prefix
//! - **Option catalog**: five size tiers, four error-correction levels and a
//!   color palette, with advisory character budgets
//! - **Rendering**: symbol encoding with a one-shot overflow retry, colored
//!   PNG output and data URIs
//! - **Server**: HTML form, JSON API, health check and security headers
//!
//! ## Quick Start
//!
//! ```
//! use qrforge::generate::{generate, GenerationRequest, Normalization};
//!
//! let request = GenerationRequest::new("example.com")
//!     .size("s")
//!     .color("#6c63ff")
//!     .error_correction("Q");
//!
//! let result = generate(&request, Normalization::Apply)?;
//! assert_eq!(result.encoded_data, "https://example.com");
//! assert!(result.data_uri().starts_with("data:image/png;base64,"));
//!
//! # Ok::<(), qrforge::QrForgeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`input`] | Input normalization and color validation |
//! | [`catalog`] | Size profiles, error-correction levels, palette |
//! | [`render`] | Symbol encoding and PNG rendering |
//! | [`generate`] | Request-to-image pipeline |
//! | [`server`] | HTTP server |
//! | [`error`] | Error types |

pub mod catalog;
pub mod error;
pub mod generate;
pub mod input;
pub mod render;
pub mod server;

// Re-exports for convenience
pub use catalog::{ErrorCorrection, SizeProfile};
pub use error::QrForgeError;
pub use generate::{GenerationRequest, GenerationResult, Normalization, generate};
