use crate::coords::Vec2;

use super::Color;

/// End cap drawn on open stroke segments.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Corner drawn where two stroke segments meet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Blend mode used when compositing a drawable onto the surface.
///
/// Mirrors the canvas `globalCompositeOperation` set.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CompositeOp {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
}

/// Vertical anchor of a text run relative to the y coordinate it is drawn at.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Drop shadow behind a draw.
///
/// A blur of zero disables the shadow. How `offset` is interpreted depends on
/// the caller: drawables declare it in their local frame, canvases receive it
/// in device pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Color,
    pub offset: Vec2,
}

impl Shadow {
    #[inline]
    pub const fn none() -> Self {
        Self { blur: 0.0, color: Color::black(), offset: Vec2::zero() }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.blur != 0.0
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}
