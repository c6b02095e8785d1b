//! Things that can be composed onto a surface.
//!
//! Every drawable embeds a [`Transform`](crate::transform::Transform) for
//! placement and a [`DrawStyle`] for compositing, and supplies a `draw` callback
//! that paints in its own local frame. [`Drawable::render`] wraps that callback
//! with the element matrix and compositing state.

mod shape;
mod sprite;
mod text;

pub use shape::{Shape, ShapePath};
pub use sprite::Sprite;
pub use text::Text;

use crate::canvas::{Canvas, SaveGuard};
use crate::coords::{Matrix, Rect};
use crate::paint::{CompositeOp, Shadow};
use crate::transform::Transformable;

/// Compositing attributes shared by every drawable.
///
/// `shadow.offset` is in the drawable's local frame; the surface converts it to
/// device pixels at draw time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawStyle {
    /// Global alpha in `[0, 1]`. Zero skips the draw entirely.
    pub alpha: f32,
    pub composite: CompositeOp,
    pub shadow: Shadow,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self { alpha: 1.0, composite: CompositeOp::SourceOver, shadow: Shadow::none() }
    }
}

pub trait Drawable: Transformable {
    fn style(&self) -> &DrawStyle;
    fn style_mut(&mut self) -> &mut DrawStyle;

    /// Paints the content in local coordinates. The canvas already carries the
    /// element matrix and compositing state.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Draws the element with its own matrix, alpha and blend mode.
    ///
    /// Canvas state is saved before and restored after, including when `draw`
    /// unwinds.
    fn render(&self, canvas: &mut dyn Canvas) {
        let style = *self.style();
        if style.alpha == 0.0 {
            log::trace!("render: skipped, alpha is zero");
            return;
        }

        let mut canvas = SaveGuard::new(canvas);
        self.matrix().apply_to(Some(&mut *canvas));
        canvas.set_global_alpha(style.alpha);
        canvas.set_composite(style.composite);
        self.draw(&mut *canvas);
    }
}

/// Bounding box of `local` once mapped through `m`.
fn mapped_bounds(m: &Matrix, local: Rect) -> Rect {
    let corners = local.corners().map(|p| m.transform(p));
    Rect::bounding(corners).unwrap_or(local)
}
