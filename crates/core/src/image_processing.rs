//! Image encoding utilities.
//!
//! This module serializes captured regions for transmission to the vision
//! API. The wire format is fixed: lossless PNG wrapped in base64, so the
//! remote model sees exactly the pixels that were grabbed.

use crate::error::{AppError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Image encoding utilities for the capture workflow.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Encodes an image as a base64 PNG string.
    ///
    /// PNG is lossless, so decoding the payload yields pixel-identical data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ImageProcessing`] if PNG encoding fails.
    pub fn encode_to_base64_png(image: &DynamicImage) -> Result<String> {
        let mut buffer: Vec<u8> = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| AppError::image(format!("Failed to encode image: {}", e)))?;

        Ok(BASE64.encode(buffer))
    }

    /// Saves a debug copy of the capture, overwriting any previous one.
    ///
    /// Best-effort: a write failure is logged and never aborts the cycle.
    pub fn save_debug_snapshot(image: &DynamicImage, path: &Path) {
        if let Err(e) = image.save(path) {
            log::warn!("Failed to save debug snapshot to {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image() -> DynamicImage {
        let mut img = RgbaImage::new(8, 6);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 30) as u8, (y * 40) as u8, 200, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn encode_produces_nonempty_base64() {
        let encoded = ImageProcessor::encode_to_base64_png(&test_image()).unwrap();
        assert!(!encoded.is_empty());
        // Decodes as valid base64 with the PNG magic up front
        let bytes = BASE64.decode(encoded).unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn encode_round_trips_pixel_identical() {
        let original = test_image();
        let encoded = ImageProcessor::encode_to_base64_png(&original).unwrap();
        let bytes = BASE64.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(original.to_rgba8().as_raw(), decoded.to_rgba8().as_raw());
    }
}
