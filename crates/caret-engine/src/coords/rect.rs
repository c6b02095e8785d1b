use super::Vec2;

/// Axis-aligned rectangle (top-left origin, +Y down).
///
/// Width and height may be zero or negative; such rectangles are empty and never
/// intersect anything.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty iterator.
    pub fn bounding<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (lo, hi) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Rect::new(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y))
    }

    #[inline]
    pub fn origin(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    /// Corners in clockwise order starting at the top-left.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left, self.bottom()),
        ]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin().is_finite() && self.size().is_finite()
    }

    /// Returns the same rectangle shifted by `delta`.
    #[inline]
    pub fn translated(self, delta: Vec2) -> Rect {
        Rect::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }

    /// Closed containment: a point on any of the four edges is inside.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.left && p.y >= self.top && p.x <= self.right() && p.y <= self.bottom()
    }

    /// Overlap of the two rectangles.
    ///
    /// Only a strictly positive area on both axes counts: rectangles that merely
    /// share an edge or a corner return `None`.
    #[inline]
    pub fn intersects(self, other: Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}
