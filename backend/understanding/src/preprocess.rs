//! Image preparation before local OCR.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};

/// Decode PNG/JPEG/WebP bytes, convert to 8-bit grayscale and re-encode as PNG.
///
/// Tesseract reads grayscale input more reliably than the coloured game UI.
pub fn to_grayscale_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).context("Failed to decode screenshot")?;
    let gray = DynamicImage::ImageLuma8(decoded.to_luma8());

    let mut out = Cursor::new(Vec::new());
    gray.write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode grayscale screenshot")?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn colour_png() -> Vec<u8> {
        let img = RgbImage::from_fn(4, 3, |x, _| if x % 2 == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn converts_to_single_channel() {
        let gray = to_grayscale_png(&colour_png()).unwrap();
        let decoded = image::load_from_memory(&gray).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(to_grayscale_png(b"definitely not a png").is_err());
    }
}
