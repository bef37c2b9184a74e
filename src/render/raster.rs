//! Rasterization of encoded symbols to PNG.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use qrcode::Color;
use std::io::Cursor;

use crate::catalog::SizeProfile;
use crate::error::QrForgeError;

use super::encode::EncodedSymbol;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Draw the symbol with `foreground` modules on a white background.
///
/// Each module becomes a `box_size` square and the symbol is surrounded by a
/// quiet zone of `border` modules.
pub fn rasterize(symbol: &EncodedSymbol, profile: &SizeProfile, foreground: [u8; 3]) -> RgbImage {
    let modules = symbol.modules();
    let side = profile.pixel_size(modules);
    let box_size = profile.box_size;
    let border = profile.border;
    let fg = Rgb(foreground);

    ImageBuffer::from_fn(side, side, |x, y| {
        let mx = (x / box_size).checked_sub(border);
        let my = (y / box_size).checked_sub(border);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                if symbol.code[(mx as usize, my as usize)] == Color::Dark {
                    fg
                } else {
                    WHITE
                }
            }
            _ => WHITE,
        }
    })
}

/// Encode an image as PNG bytes.
pub fn to_png(img: &RgbImage) -> Result<Vec<u8>, QrForgeError> {
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| QrForgeError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Wrap PNG bytes as a `data:image/png;base64,...` URI.
pub fn png_data_uri(png_bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ErrorCorrection;
    use crate::render::encode::encode_with_fallback;

    #[test]
    fn test_rasterize_dimensions_and_quiet_zone() {
        let symbol = encode_with_fallback("hello", ErrorCorrection::M, "M", 5).unwrap();
        let profile = SizeProfile::by_id("xs");
        let img = rasterize(&symbol, profile, [0, 0, 0]);

        assert_eq!(img.width(), 125);
        assert_eq!(img.height(), 125);
        // Quiet zone is white
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
        // Finder pattern corner is dark
        assert_eq!(*img.get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_rasterize_uses_foreground_color() {
        let symbol = encode_with_fallback("hello", ErrorCorrection::L, "L", 5).unwrap();
        let img = rasterize(&symbol, SizeProfile::medium(), [0x6c, 0x63, 0xff]);
        let border_px = SizeProfile::medium().border * SizeProfile::medium().box_size;
        assert_eq!(*img.get_pixel(border_px, border_px), Rgb([0x6c, 0x63, 0xff]));
        assert!(img.pixels().all(|p| *p == WHITE || *p == Rgb([0x6c, 0x63, 0xff])));
    }

    #[test]
    fn test_png_signature_and_data_uri() {
        let symbol = encode_with_fallback("hello", ErrorCorrection::M, "M", 5).unwrap();
        let png = to_png(&rasterize(&symbol, SizeProfile::medium(), [0, 0, 0])).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let uri = png_data_uri(&png);
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
