//! Logical window onto a physical surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::{Matrix, Rect, Vec2};

/// Side length used when a surface or window size is zero.
pub const FALLBACK_EXTENT: f32 = 512.0;

/// A view shared between a surface and the code that pans/zooms it.
pub type SharedView = Rc<RefCell<View>>;

/// Maps a rectangular logical window (center, size, rotation) onto a physical
/// region of fixed pixel size.
///
/// The view matrix takes logical scene coordinates to physical pixels; its
/// inverse converts pointer positions back into the scene. Both, and the
/// scene-space bounding box of the window, are cached and rebuilt on the next
/// read after any setter.
#[derive(Debug, Clone)]
pub struct View {
    center: Vec2,
    size: Vec2,
    rotation: f32,
    physical: Vec2,

    matrix: Cell<Option<Matrix>>,
    inverse: Cell<Option<Matrix>>,
    transformed_rect: Cell<Option<Rect>>,
}

fn or_fallback(v: f32) -> f32 {
    if v == 0.0 { FALLBACK_EXTENT } else { v }
}

fn non_zero_extent(size: Vec2, physical: Vec2) -> Vec2 {
    Vec2::new(
        if size.x == 0.0 { physical.x } else { size.x },
        if size.y == 0.0 { physical.y } else { size.y },
    )
}

impl View {
    /// A view showing exactly the physical region, unscaled and unrotated.
    pub fn new(physical: Vec2) -> Self {
        Self::with_window(physical, None, None, 0.0)
    }

    /// A view over an explicit window.
    ///
    /// Zero physical extents fall back to [`FALLBACK_EXTENT`]. A missing or zero
    /// window size falls back to the physical size, and a missing center to the
    /// physical center.
    pub fn with_window(physical: Vec2, center: Option<Vec2>, size: Option<Vec2>, rotation: f32) -> Self {
        let physical = Vec2::new(or_fallback(physical.x), or_fallback(physical.y));
        let size = non_zero_extent(size.unwrap_or(physical), physical);

        Self {
            center: center.unwrap_or(physical / 2.0),
            size,
            rotation: rotation % 360.0,
            physical,
            matrix: Cell::new(None),
            inverse: Cell::new(None),
            transformed_rect: Cell::new(None),
        }
    }

    /// Wraps the view for sharing with a surface.
    pub fn shared(self) -> SharedView {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn physical_size(&self) -> Vec2 {
        self.physical
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
        self.invalidate();
    }

    /// Sets the logical window size. Smaller sizes zoom in.
    /// Sets the logical extent. A zero component falls back to the physical one.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = non_zero_extent(size, self.physical);
        self.invalidate();
    }

    pub fn set_rotation(&mut self, deg: f32) {
        self.rotation = deg % 360.0;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.matrix.set(None);
        self.inverse.set(None);
        self.transformed_rect.set(None);
    }

    /// Logical-to-physical matrix.
    pub fn matrix(&self) -> Matrix {
        if let Some(m) = self.matrix.get() {
            return m;
        }
        let m = Matrix::compose_from_parameters(
            self.center,
            self.physical / 2.0,
            -self.rotation,
            Vec2::new(self.physical.x / self.size.x, self.physical.y / self.size.y),
            Vec2::zero(),
        );
        self.matrix.set(Some(m));
        m
    }

    /// Physical-to-logical matrix.
    pub fn inverse_matrix(&self) -> Matrix {
        if let Some(m) = self.inverse.get() {
            return m;
        }
        let m = self.matrix().invert();
        self.inverse.set(Some(m));
        m
    }

    /// Axis-aligned bounding box, in scene coordinates, of everything the view
    /// shows.
    ///
    /// Unrotated this is the window itself. Rotated, it is the box around the
    /// window turned about its center, which is what the physical corners map
    /// back to.
    pub fn transformed_rect(&self) -> Rect {
        if let Some(r) = self.transformed_rect.get() {
            return r;
        }

        let window = Rect::from_origin_size(self.center - self.size / 2.0, self.size);
        let r = if self.rotation == 0.0 {
            window
        } else {
            let inv = self.inverse_matrix();
            let physical = Rect::from_origin_size(Vec2::zero(), self.physical);
            Rect::bounding(physical.corners().map(|p| inv.transform(p))).unwrap_or(window)
        };

        self.transformed_rect.set(Some(r));
        r
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(Vec2::splat(FALLBACK_EXTENT))
    }
}
