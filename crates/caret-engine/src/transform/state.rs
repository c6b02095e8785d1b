use std::cell::Cell;

use crate::coords::{Matrix, Vec2};

/// Placement state shared by every drawable.
///
/// Holds position, origin, scale, skew and rotation, and lazily derives the
/// placement matrix and its inverse from them. Each cache is `None` while stale;
/// every setter clears both, and the next read rebuilds and stores the value.
///
/// Setters are crate-private: outside code changes placement through
/// [`Transformable`](super::Transformable) so the owner's hook always runs.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec2,
    origin: Vec2,
    scale: Vec2,
    skew: Vec2,
    rotation: f32,

    matrix: Cell<Option<Matrix>>,
    inverse: Cell<Option<Matrix>>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            origin: Vec2::zero(),
            scale: Vec2::splat(1.0),
            skew: Vec2::zero(),
            rotation: 0.0,
            matrix: Cell::new(None),
            inverse: Cell::new(None),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Skew angles in degrees, in `(-360, 360)`.
    #[inline]
    pub fn skew(&self) -> Vec2 {
        self.skew
    }

    /// Rotation in degrees, in `(-360, 360)`.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub(crate) fn set_position(&mut self, p: Vec2) {
        self.position = p;
        self.invalidate();
    }

    pub(crate) fn set_origin(&mut self, p: Vec2) {
        self.origin = p;
        self.invalidate();
    }

    pub(crate) fn set_scale(&mut self, s: Vec2) {
        self.scale = s;
        self.invalidate();
    }

    pub(crate) fn set_skew(&mut self, deg: Vec2) {
        self.skew = Vec2::new(deg.x % 360.0, deg.y % 360.0);
        self.invalidate();
    }

    pub(crate) fn set_rotation(&mut self, deg: f32) {
        self.rotation = deg % 360.0;
        self.invalidate();
    }

    #[inline]
    fn invalidate(&mut self) {
        self.matrix.set(None);
        self.inverse.set(None);
    }

    /// Local-to-global matrix.
    pub fn matrix(&self) -> Matrix {
        if let Some(m) = self.matrix.get() {
            return m;
        }
        let m = Matrix::compose_from_parameters(
            self.origin,
            self.position,
            self.rotation,
            self.scale,
            self.skew,
        );
        self.matrix.set(Some(m));
        m
    }

    /// Global-to-local matrix.
    pub fn inverse_matrix(&self) -> Matrix {
        if let Some(m) = self.inverse.get() {
            return m;
        }
        let m = self.matrix().invert();
        self.inverse.set(Some(m));
        m
    }

    /// Whether the matrix is cached from the current parameters.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.matrix.get().is_some()
    }
}
