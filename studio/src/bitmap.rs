//! Decoded raster images embedded in a scene.
//!
//! Raw bytes from an upload are decoded once, at insertion time, into shared
//! RGBA pixels. A [`Bitmap`] is cheap to clone; every clone points at the same
//! pixel buffer.

#[cfg(test)]
#[path = "bitmap_test.rs"]
mod bitmap_test;

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

#[derive(Debug, thiserror::Error)]
pub enum BitmapError {
    #[error("image source is empty")]
    Empty,
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("image has zero width or height")]
    ZeroSized,
    #[error("image encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// A decoded RGBA bitmap with its intrinsic size.
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Wrap already-decoded pixels.
    ///
    /// # Errors
    ///
    /// Returns `ZeroSized` if either dimension is zero.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, BitmapError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BitmapError::ZeroSized);
        }
        Ok(Self { pixels: Arc::new(pixels) })
    }

    /// Intrinsic width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Intrinsic height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Encode the pixels as PNG.
    ///
    /// # Errors
    ///
    /// Returns `Encode` if the PNG encoder fails.
    pub fn to_png(&self) -> Result<Vec<u8>, BitmapError> {
        let mut out = Cursor::new(Vec::new());
        self.pixels.write_to(&mut out, ImageFormat::Png).map_err(BitmapError::Encode)?;
        Ok(out.into_inner())
    }

    /// `data:` URI carrying the PNG encoding, suitable for an SVG `<image>`.
    ///
    /// # Errors
    ///
    /// Returns `Encode` if the PNG encoder fails.
    pub fn to_data_uri(&self) -> Result<String, BitmapError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap").field("width", &self.width()).field("height", &self.height()).finish()
    }
}

/// Decode raw image bytes (PNG or JPEG) into a bitmap.
///
/// # Errors
///
/// Returns `Empty` for an empty source, `Decode` when the bytes are not a
/// supported image, and `ZeroSized` for degenerate images.
pub fn decode(bytes: &[u8]) -> Result<Bitmap, BitmapError> {
    if bytes.is_empty() {
        return Err(BitmapError::Empty);
    }
    let decoded = image::load_from_memory(bytes).map_err(BitmapError::Decode)?;
    Bitmap::from_rgba(decoded.to_rgba8())
}
