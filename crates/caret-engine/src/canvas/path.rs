use std::f32::consts::TAU;

use crate::coords::{Matrix, Rect, Vec2};

/// Segments used to flatten a full turn of an arc.
const ARC_SEGMENTS_PER_TURN: f32 = 64.0;

/// One recorded path instruction, in the path's own coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Angles in radians, measured clockwise from +X on a +Y-down surface.
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    },
    /// Closed rectangular subpath.
    Rect(Rect),
    Close,
}

/// Vector path built from canvas-style instructions.
///
/// A `Path` is plain data: shapes produce one, clip shapes trace one onto a
/// canvas, and the recording canvas flattens one to answer point-in-path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    els: Vec<PathEl>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle path.
    pub fn from_rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.rect(rect);
        path
    }

    /// Full circle path.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        let mut path = Self::new();
        path.arc(center, radius, 0.0, TAU, false);
        path
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::LineTo(p));
        self
    }

    pub fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool) -> &mut Self {
        self.els.push(PathEl::Arc { center, radius, start, end, anticlockwise });
        self
    }

    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.els.push(PathEl::Rect(rect));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.els.push(PathEl::Close);
        self
    }

    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.els.is_empty()
    }

    /// Flattens the path into polylines after mapping every point through `m`.
    pub fn flatten(&self, m: &Matrix) -> Polylines {
        let mut out = Polylines::default();
        for el in &self.els {
            out.push(*el, m);
        }
        out
    }

    /// Bounding box of the flattened path under `m`.
    ///
    /// Only subpaths with at least one segment count; a bare `move_to` draws
    /// nothing and does not grow the box. `None` when nothing is drawn.
    pub fn bounds(&self, m: &Matrix) -> Option<Rect> {
        let flat = self.flatten(m);
        let drawn = flat.subpaths().iter().filter(|sub| sub.len() >= 2);
        Rect::bounding(drawn.flatten().copied())
    }

    /// Nonzero-winding containment test in path coordinates.
    pub fn contains(&self, p: Vec2) -> bool {
        self.flatten(&Matrix::identity()).contains(p)
    }
}

/// Flattened subpaths, each an open or closed polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polylines {
    subpaths: Vec<Vec<Vec2>>,
    /// Start of the current subpath in the space the points were recorded in.
    start: Option<Vec2>,
}

impl Polylines {
    pub fn clear(&mut self) {
        self.subpaths.clear();
        self.start = None;
    }

    #[inline]
    pub fn subpaths(&self) -> &[Vec<Vec2>] {
        &self.subpaths
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.subpaths.iter().flatten().copied()
    }

    fn begin(&mut self, p: Vec2) {
        self.subpaths.push(vec![p]);
        self.start = Some(p);
    }

    fn extend(&mut self, p: Vec2) {
        match self.subpaths.last_mut() {
            Some(sub) if self.start.is_some() => sub.push(p),
            _ => self.begin(p),
        }
    }

    /// Appends one instruction, mapping its points through `m`.
    pub fn push(&mut self, el: PathEl, m: &Matrix) {
        match el {
            PathEl::MoveTo(p) => self.begin(m.transform(p)),
            PathEl::LineTo(p) => self.extend(m.transform(p)),
            PathEl::Arc { center, radius, start, end, anticlockwise } => {
                let sweep = arc_sweep(start, end, anticlockwise);
                let steps = ((sweep.abs() / TAU) * ARC_SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
                for i in 0..=steps {
                    let t = start + sweep * (i as f32 / steps as f32);
                    let local = center + Vec2::new(t.cos(), t.sin()) * radius;
                    self.extend(m.transform(local));
                }
            }
            PathEl::Rect(r) => {
                let [a, b, c, d] = r.corners();
                self.begin(m.transform(a));
                for corner in [b, c, d, a] {
                    self.extend(m.transform(corner));
                }
                // A rect leaves a fresh subpath at its top-left corner.
                self.begin(m.transform(a));
            }
            PathEl::Close => {
                if let (Some(start), Some(sub)) = (self.start, self.subpaths.last_mut()) {
                    if sub.last() != Some(&start) {
                        sub.push(start);
                    }
                    self.begin(start);
                }
            }
        }
    }

    /// Nonzero-winding point containment; every subpath is implicitly closed.
    pub fn contains(&self, p: Vec2) -> bool {
        let mut winding = 0i32;
        for sub in self.subpaths.iter().filter(|s| s.len() > 2) {
            let closing = [sub[sub.len() - 1], sub[0]];
            let edges = sub.windows(2).map(|w| [w[0], w[1]]).chain(std::iter::once(closing));
            for [a, b] in edges {
                if a.y <= p.y {
                    if b.y > p.y && cross(a, b, p) > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= p.y && cross(a, b, p) < 0.0 {
                    winding -= 1;
                }
            }
        }
        winding != 0
    }
}

/// Signed sweep of a canvas arc, following the canvas rules for full turns.
fn arc_sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    if anticlockwise {
        if start - end >= TAU { -TAU } else { -(start - end).rem_euclid(TAU) }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

fn cross(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn rect_contains_interior_only() {
        let path = Path::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(path.contains(Vec2::new(5.0, 5.0)));
        assert!(!path.contains(Vec2::new(15.0, 5.0)));
        assert!(!path.contains(Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn circle_contains_center_not_corner() {
        let path = Path::circle(Vec2::new(50.0, 50.0), 20.0);
        assert!(path.contains(Vec2::new(50.0, 50.0)));
        assert!(path.contains(Vec2::new(65.0, 50.0)));
        assert!(!path.contains(Vec2::new(66.0, 66.0)));
    }

    #[test]
    fn open_triangle_is_implicitly_closed() {
        let mut path = Path::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(0.0, 10.0));
        assert!(path.contains(Vec2::new(2.0, 2.0)));
        assert!(!path.contains(Vec2::new(8.0, 8.0)));
    }

    #[test]
    fn nonzero_rule_fills_overlapping_subpaths() {
        let mut path = Path::new();
        path.rect(Rect::new(0.0, 0.0, 10.0, 10.0)).rect(Rect::new(5.0, 5.0, 10.0, 10.0));
        assert!(path.contains(Vec2::new(7.0, 7.0)));
        assert!(path.contains(Vec2::new(12.0, 12.0)));
    }

    // ── flatten / bounds ──────────────────────────────────────────────────

    #[test]
    fn bounds_follow_the_matrix() {
        let path = Path::from_rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        let m = Matrix::translation(5.0, -5.0);
        assert_eq!(path.bounds(&m), Some(Rect::new(5.0, -5.0, 10.0, 20.0)));
    }

    #[test]
    fn empty_path_has_no_bounds() {
        assert!(Path::new().bounds(&Matrix::identity()).is_none());

        let mut lone = Path::new();
        lone.move_to(Vec2::new(3.0, 3.0));
        assert!(lone.bounds(&Matrix::identity()).is_none());
    }

    #[test]
    fn stray_move_to_does_not_grow_bounds() {
        let mut path = Path::new();
        path.move_to(Vec2::new(100.0, 100.0))
            .move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(0.0, 10.0))
            .close()
            .move_to(Vec2::new(-50.0, 40.0));
        assert_eq!(path.bounds(&Matrix::identity()), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let mut path = Path::new();
        path.move_to(Vec2::new(1.0, 1.0)).line_to(Vec2::new(4.0, 1.0)).close();
        let flat = path.flatten(&Matrix::identity());
        assert_eq!(flat.subpaths()[0], vec![Vec2::new(1.0, 1.0), Vec2::new(4.0, 1.0), Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn full_turn_sweeps() {
        assert_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_eq!(arc_sweep(TAU, 0.0, true), -TAU);
        assert!((arc_sweep(0.0, -1.0, false) - (TAU - 1.0)).abs() < 1e-5);
    }
}
