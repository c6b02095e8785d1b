//! Coordinate and geometry types shared by views, drawables and canvases.
//!
//! Canonical space:
//! - origin top-left
//! - +X right, +Y down
//!
//! Scene coordinates are mapped onto surface pixels by a `View` matrix.

mod matrix;
mod rect;
mod vec2;

pub use matrix::Matrix;
pub use rect::Rect;
pub use vec2::Vec2;
