//! Caret engine crate.
//!
//! Affine-transform and render-composition core of a small 2D scene toolkit:
//! matrices, placement of drawables, views, and the surface that composes
//! sprites, text and shapes onto an immediate-mode canvas.

pub mod time;
pub mod logging;

pub mod coords;
pub mod paint;
pub mod bitmap;
pub mod text;
pub mod canvas;

pub mod transform;
pub mod view;
pub mod drawable;
pub mod surface;

pub use coords::{Matrix, Rect, Vec2};
pub use drawable::{DrawStyle, Drawable, Shape, ShapePath, Sprite, Text};
pub use surface::Surface;
pub use transform::{Transform, Transformable};
pub use view::{SharedView, View};
