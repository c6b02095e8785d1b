use std::collections::HashMap;
use std::fmt;

use super::{Font, TextMeasure};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts, addressable by family name.
///
/// Fonts are immutable after loading. A canvas backend that has no text engine
/// of its own measures through this.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType or OpenType font and registers it under `family`.
    ///
    /// Loading a second font under the same family replaces the mapping.
    pub fn load_font(&mut self, family: &str, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        self.families.insert(family.to_string(), id);
        log::debug!("loaded font family {family:?} as {id:?}");
        Ok(id)
    }

    /// Looks up the font registered for `family`.
    pub fn family(&self, family: &str) -> Option<FontId> {
        self.families.get(family).copied()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Advance width of a single line of `text` at `size` pixels.
    ///
    /// Returns `None` if `id` is not loaded.
    #[must_use]
    pub fn advance_width(&self, text: &str, id: FontId, size: f32) -> Option<f32> {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let font = self.get(id)?;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        // Pen position after each glyph rather than the bitmap's right edge, so
        // trailing spaces and side bearings count like a canvas measureText.
        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Some(width)
    }
}

impl TextMeasure for FontSystem {
    fn measure_text(&self, text: &str, font: &Font) -> Option<f32> {
        let id = self.family(&font.family)?;
        self.advance_width(text, id, font.size)
    }
}
