/// Font selection for a text run.
///
/// `style` is a free-form prefix such as `"bold"` or `"italic 600"`; together
/// with the pixel size and family it forms the canvas font string.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    /// Size in pixels; also the nominal line height.
    pub size: f32,
    pub style: String,
}

impl Font {
    pub const DEFAULT_FAMILY: &'static str = "sans-serif";
    pub const DEFAULT_SIZE: f32 = 16.0;

    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self { family: family.into(), size, style: String::new() }
    }

    /// Canvas-style font shorthand, e.g. `"bold 16px serif"`.
    pub fn css(&self) -> String {
        let style = self.style.trim();
        if style.is_empty() {
            format!("{}px {}", self.size, self.family)
        } else {
            format!("{} {}px {}", style, self.size, self.family)
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAMILY, Self::DEFAULT_SIZE)
    }
}

/// Text width measurement.
///
/// Returns the advance width of `text` set in `font`, or `None` when the font
/// cannot be measured by this implementation.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, font: &Font) -> Option<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_without_style() {
        assert_eq!(Font::new("serif", 12.0).css(), "12px serif");
    }

    #[test]
    fn css_with_style() {
        let font = Font { style: "bold".into(), ..Font::default() };
        assert_eq!(font.css(), "bold 16px sans-serif");
    }
}
