//! Image handles consumed by sprites and pattern fills.
//!
//! Fetching is not this crate's concern: an `Image` is always fully decoded
//! before it is handed to a drawable.

use std::fmt;
use std::rc::Rc;

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::coords::Rect;

/// Shared, immutable RGBA8 bitmap.
///
/// Cloning is cheap and keeps pointing at the same pixels; equality is handle
/// identity, not pixel comparison.
#[derive(Clone)]
pub struct Image {
    pixels: Rc<RgbaImage>,
}

impl Image {
    /// Wraps an already decoded bitmap.
    pub fn from_rgba_image(pixels: RgbaImage) -> Self {
        Self { pixels: Rc::new(pixels) }
    }

    /// Builds an image from raw row-major RGBA bytes.
    ///
    /// Returns `None` if `data` holds fewer than `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(Self::from_rgba_image)
    }

    /// Decodes an encoded image (PNG, JPEG, BMP, GIF) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).context("failed to decode image bytes")?;
        let pixels = decoded.to_rgba8();
        log::debug!("decoded {}x{} image", pixels.width(), pixels.height());
        Ok(Self::from_rgba_image(pixels))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Full extent of the image, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
