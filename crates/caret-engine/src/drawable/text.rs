use std::cell::Cell;

use crate::canvas::Canvas;
use crate::coords::{Rect, Vec2};
use crate::paint::{Color, LineCap, LineJoin, Paint, TextBaseline};
use crate::text::{Font, TextMeasure};
use crate::transform::{Transform, Transformable};

use super::{mapped_bounds, DrawStyle, Drawable};

/// Distance glyphs are pushed off-canvas when only their shadow should show.
const BLUR_OFFSET: f32 = 99_999.0;

/// A single line of text.
///
/// The run is laid out from its local origin downwards: glyphs sit between
/// `y = 0` and `y = font.size`. Measuring the run needs a [`TextMeasure`], so
/// the bounding-box accessors take one.
#[derive(Debug, Clone)]
pub struct Text {
    transform: Transform,
    style: DrawStyle,

    string: String,
    font: Font,
    stroke: bool,
    stroke_width: f32,

    pub fill: bool,
    pub color: Paint,
    pub stroke_color: Paint,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Draw the fill before the stroke so the stroke ends up on top.
    pub fill_over_stroke: bool,

    glyph_offset: Vec2,
    /// Global bounding box, paired with the local rect it was mapped from.
    transformed_rect: Cell<Option<(Rect, Rect)>>,
}

impl Default for Text {
    fn default() -> Self {
        Self::new("", Font::default())
    }
}

impl Text {
    pub fn new(string: impl Into<String>, font: Font) -> Self {
        Self {
            transform: Transform::new(),
            style: DrawStyle::default(),
            string: string.into(),
            font,
            stroke: false,
            stroke_width: 1.0,
            fill: true,
            color: Paint::Solid(Color::black()),
            stroke_color: Paint::Solid(Color::black()),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            fill_over_stroke: false,
            glyph_offset: Vec2::zero(),
            transformed_rect: Cell::new(None),
        }
    }

    fn invalidate(&mut self) {
        self.transformed_rect.set(None);
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
        self.invalidate();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.invalidate();
    }

    pub fn set_family(&mut self, family: impl Into<String>) {
        self.font.family = family.into();
        self.invalidate();
    }

    pub fn font_size(&self) -> f32 {
        self.font.size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font.size = size;
        self.invalidate();
    }

    /// Sets the style prefix of the font string, e.g. `"bold"`.
    pub fn set_font_style(&mut self, style: impl Into<String>) {
        self.font.style = style.into();
        self.invalidate();
    }

    pub fn stroke(&self) -> bool {
        self.stroke
    }

    pub fn set_stroke(&mut self, stroke: bool) {
        self.stroke = stroke;
        self.invalidate();
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
        self.invalidate();
    }

    fn strokes(&self) -> bool {
        self.stroke && self.stroke_width != 0.0
    }

    /// Hides the glyphs far off-canvas and throws the shadow back over the
    /// original spot, so only the blurred shadow is visible.
    ///
    /// Takes effect only while the shadow blur is nonzero.
    pub fn set_shadow_as_blur(&mut self, blur: bool) {
        let d = if blur { BLUR_OFFSET } else { 0.0 };
        self.glyph_offset = Vec2::splat(-d);
        self.style.shadow.offset = Vec2::splat(d);
    }

    /// Local extent of the run, including half the stroke width on each side.
    ///
    /// Measured on every call, since the result depends on `measure`. Text the
    /// measure cannot handle has zero width.
    pub fn font_rect(&self, measure: &dyn TextMeasure) -> Rect {
        let width = measure.measure_text(&self.string, &self.font).unwrap_or(0.0);
        if self.strokes() {
            let half = self.stroke_width / 2.0;
            Rect::new(-half, -half, width + self.stroke_width, self.font.size + self.stroke_width)
        } else {
            Rect::new(0.0, 0.0, width, self.font.size)
        }
    }

    /// Axis-aligned bounding box of the run in global coordinates.
    ///
    /// The mapped box is reused only while placement is unchanged and `measure`
    /// yields the same local rect as last time.
    pub fn transformed_rect(&self, measure: &dyn TextMeasure) -> Rect {
        let local = self.font_rect(measure);
        if let Some((cached_local, r)) = self.transformed_rect.get() {
            if cached_local == local {
                return r;
            }
        }
        let r = mapped_bounds(&self.matrix(), local);
        self.transformed_rect.set(Some((local, r)));
        r
    }

    /// [`transformed_rect`](Self::transformed_rect) relative to the text's
    /// position.
    pub fn relative_transformed_rect(&self, measure: &dyn TextMeasure) -> Rect {
        self.transformed_rect(measure).translated(-self.position())
    }
}

impl Transformable for Text {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn transformed(&mut self) {
        self.transformed_rect.set(None);
    }
}

impl Drawable for Text {
    fn style(&self) -> &DrawStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DrawStyle {
        &mut self.style
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let strokes = self.strokes();
        if self.string.is_empty() || (!strokes && !self.fill) {
            return;
        }

        // Bottom baseline keeps descenders inside the measured height.
        canvas.set_text_baseline(TextBaseline::Bottom);
        canvas.set_font(&self.font);

        if strokes {
            canvas.set_stroke_style(self.stroke_color.clone());
            canvas.set_line_width(self.stroke_width);
            canvas.set_line_cap(self.line_cap);
            canvas.set_line_join(self.line_join);
        }
        if self.fill {
            canvas.set_fill_style(self.color.clone());
        }

        let offset = if self.style.shadow.is_visible() { self.glyph_offset } else { Vec2::zero() };
        let at = Vec2::new(offset.x, self.font.size + offset.y);

        if strokes && !self.fill_over_stroke {
            canvas.stroke_text(&self.string, at);
        }
        if self.fill {
            canvas.fill_text(&self.string, at);
        }
        if strokes && self.fill_over_stroke {
            canvas.stroke_text(&self.string, at);
        }
    }
}
