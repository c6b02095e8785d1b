//! Immediate-mode drawing surface interface.
//!
//! The engine never rasterizes anything itself. It drives a [`Canvas`]: a
//! 2D-context-style surface with paths, fills, strokes, image blits, clipping,
//! an affine current transform and a save/restore state stack.
//!
//! [`RecordingCanvas`] is the headless implementation shipped with the crate;
//! it keeps enough state to answer point-in-path and text measurement and logs
//! every call as a [`CanvasCmd`].

mod guard;
mod path;
mod record;

pub use guard::SaveGuard;
pub use path::{Path, PathEl, Polylines};
pub use record::{CanvasCmd, CanvasInit, RecordingCanvas};

use crate::bitmap::Image;
use crate::coords::{Matrix, Rect, Vec2};
use crate::paint::{CompositeOp, LineCap, LineJoin, Paint, Shadow, TextBaseline};
use crate::text::{Font, TextMeasure};

/// Capability set of an immediate-mode 2D drawing surface.
///
/// Coordinates passed to path, rect, text and image calls are mapped through
/// the current transform at call time, like an HTML canvas context.
pub trait Canvas: TextMeasure {
    /// Width in physical pixels.
    fn width(&self) -> u32;
    /// Height in physical pixels.
    fn height(&self) -> u32;

    fn save(&mut self);
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, m: Matrix);
    /// Post-multiplies the current transform: `current = current · m`.
    fn apply_transform(&mut self, m: Matrix);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool);
    fn rect(&mut self, rect: Rect);

    /// Traces every element of `path` into the current path.
    fn add_path(&mut self, path: &Path) {
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.move_to(p),
                PathEl::LineTo(p) => self.line_to(p),
                PathEl::Arc { center, radius, start, end, anticlockwise } => {
                    self.arc(center, radius, start, end, anticlockwise)
                }
                PathEl::Rect(r) => self.rect(r),
                PathEl::Close => self.close_path(),
            }
        }
    }

    /// Intersects the clip region with the current path.
    fn clip(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, rect: Rect);
    /// Resets the pixels under `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    fn set_fill_style(&mut self, paint: Paint);
    fn set_stroke_style(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, op: CompositeOp);

    /// Shadow applied to subsequent draws. The offset is in device pixels and is
    /// not affected by the current transform.
    fn set_shadow(&mut self, shadow: Shadow);

    fn set_font(&mut self, font: &Font);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, at: Vec2);
    fn stroke_text(&mut self, text: &str, at: Vec2);

    /// Blits the `src` region of `image` into `dst`.
    fn draw_image(&mut self, image: &Image, src: Rect, dst: Rect);

    /// Tests a device-space point against the current path.
    fn is_point_in_path(&self, p: Vec2) -> bool;
}
