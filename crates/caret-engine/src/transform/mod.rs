//! Placement of drawables.
//!
//! [`Transform`] is the shared state component; [`Transformable`] is the
//! behaviour every drawable gets by embedding one.

mod state;
mod transformable;

pub use state::Transform;
pub use transformable::Transformable;
