//! Paint model handed to canvases.
//!
//! Scope:
//! - color representation (straight-alpha sRGB)
//! - paint sources (solid colors, repeating image patterns)
//! - stroke, compositing, shadow and text-anchoring settings

pub mod color;
pub mod style;

pub use color::Color;
pub use style::{CompositeOp, LineCap, LineJoin, Shadow, TextBaseline};

use crate::bitmap::Image;

/// Source for filling or stroking geometry.
///
/// Gradients are not supported.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Image repeated in both directions, anchored at the origin of the current transform.
    Pattern(Image),
}

impl From<Color> for Paint {
    #[inline]
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}
