use crate::coords::{Matrix, Vec2};

use super::Transform;

/// Placement behaviour of every drawable.
///
/// Implementors embed a [`Transform`] and expose it through `transform` /
/// `transform_mut`. All mutators here update that state and then call
/// [`transformed`](Transformable::transformed) unconditionally, which is where an
/// implementor drops caches derived from its placement (bounding boxes).
pub trait Transformable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    /// Called after every placement change.
    fn transformed(&mut self);

    fn position(&self) -> Vec2 {
        self.transform().position()
    }

    fn set_position(&mut self, p: Vec2) {
        self.transform_mut().set_position(p);
        self.transformed();
    }

    /// Moves by `delta` relative to the current position.
    fn move_by(&mut self, delta: Vec2) {
        let p = self.position();
        self.set_position(p + delta);
    }

    /// Point, in local coordinates, that rotation and scaling pivot around and
    /// that lands on `position`.
    fn origin(&self) -> Vec2 {
        self.transform().origin()
    }

    fn set_origin(&mut self, p: Vec2) {
        self.transform_mut().set_origin(p);
        self.transformed();
    }

    fn scale(&self) -> Vec2 {
        self.transform().scale()
    }

    fn set_scale(&mut self, s: Vec2) {
        self.transform_mut().set_scale(s);
        self.transformed();
    }

    /// Multiplies the current scale. A zero factor leaves that axis unchanged.
    fn scale_by(&mut self, factor: Vec2) {
        let or_one = |f: f32| if f == 0.0 { 1.0 } else { f };
        let s = self.scale();
        self.set_scale(Vec2::new(s.x * or_one(factor.x), s.y * or_one(factor.y)));
    }

    fn skew(&self) -> Vec2 {
        self.transform().skew()
    }

    fn set_skew(&mut self, deg: Vec2) {
        self.transform_mut().set_skew(deg);
        self.transformed();
    }

    /// Adds to the current skew angles.
    fn skew_by(&mut self, deg: Vec2) {
        let k = self.skew();
        self.set_skew(k + deg);
    }

    fn rotation(&self) -> f32 {
        self.transform().rotation()
    }

    fn set_rotation(&mut self, deg: f32) {
        self.transform_mut().set_rotation(deg);
        self.transformed();
    }

    /// Adds to the current rotation.
    fn rotate_by(&mut self, deg: f32) {
        let r = self.rotation();
        self.set_rotation(r + deg);
    }

    fn matrix(&self) -> Matrix {
        self.transform().matrix()
    }

    fn inverse_matrix(&self) -> Matrix {
        self.transform().inverse_matrix()
    }

    /// Maps a local point into global (scene) coordinates.
    fn transform_to_global(&self, p: Vec2) -> Vec2 {
        self.matrix().transform(p)
    }

    /// Maps a global (scene) point into local coordinates.
    fn transform_to_local(&self, p: Vec2) -> Vec2 {
        self.inverse_matrix().transform(p)
    }
}
