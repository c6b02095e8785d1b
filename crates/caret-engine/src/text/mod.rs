//! Text support: font descriptions and width measurement.

mod font;
mod font_system;

pub use font::{Font, TextMeasure};
pub use font_system::{FontId, FontLoadError, FontSystem};
