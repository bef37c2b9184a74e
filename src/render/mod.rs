//! # Rendering Module
//!
//! Turns text into a QR symbol and the symbol into a PNG.
//!
//! ## Modules
//!
//! - [`encode`]: symbol encoding with the one-shot overflow retry
//! - [`raster`]: module matrix to colored pixels, PNG and data URI
//!
//! ## Usage Example
//!
//! ```
//! use qrforge::catalog::{ErrorCorrection, SizeProfile};
//! use qrforge::render::{encode_with_fallback, rasterize, to_png};
//!
//! let symbol = encode_with_fallback("https://example.com", ErrorCorrection::M, "M", 19)?;
//! let img = rasterize(&symbol, SizeProfile::medium(), [0, 0, 0]);
//! let png = to_png(&img)?;
//! assert!(!png.is_empty());
//! # Ok::<(), qrforge::QrForgeError>(())
//! ```

pub mod encode;
pub mod raster;

pub use encode::{EncodedSymbol, INITIAL_VERSION, encode_with_fallback};
pub use raster::{png_data_uri, rasterize, to_png};
