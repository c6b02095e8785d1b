use crate::canvas::Canvas;

use super::Vec2;

/// 3×3 affine transform.
///
/// Cells are stored column-major as `[a b 0  c d 0  e f 1]`, so a point maps as
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// Every operation returns a new matrix; a `Matrix` is never mutated in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    cells: [f32; 9],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Builds an affine matrix from its six free coefficients.
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { cells: [a, b, 0.0, c, d, 0.0, e, f, 1.0] }
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub const fn cells(&self) -> [f32; 9] {
        self.cells
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f32 {
        self.cells[col * 3 + row]
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn transform(&self, p: Vec2) -> Vec2 {
        let m = &self.cells;
        Vec2::new(m[0] * p.x + m[3] * p.y + m[6], m[1] * p.x + m[4] * p.y + m[7])
    }

    /// Applies only the linear part (no translation), for direction vectors.
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        let m = &self.cells;
        Vec2::new(m[0] * v.x + m[3] * v.y, m[1] * v.x + m[4] * v.y)
    }

    pub fn determinant(&self) -> f32 {
        self.at(0, 0) * (self.at(1, 1) * self.at(2, 2) - self.at(1, 2) * self.at(2, 1))
            - self.at(0, 1) * (self.at(1, 0) * self.at(2, 2) - self.at(1, 2) * self.at(2, 0))
            + self.at(0, 2) * (self.at(1, 0) * self.at(2, 1) - self.at(1, 1) * self.at(2, 0))
    }

    /// Inverse transform.
    ///
    /// A degenerate matrix (zero or non-finite determinant) inverts to the identity
    /// so a collapsed element can never abort a frame.
    pub fn invert(&self) -> Matrix {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            log::trace!("inverting a degenerate matrix; using identity");
            return Matrix::identity();
        }

        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            self.at(r0, c0) * self.at(r1, c1) - self.at(r0, c1) * self.at(r1, c0)
        };

        // Adjugate (transposed cofactor matrix) divided by the determinant.
        let inv = [
            [cofactor(1, 2, 1, 2), -cofactor(0, 2, 1, 2), cofactor(0, 1, 1, 2)],
            [-cofactor(1, 2, 0, 2), cofactor(0, 2, 0, 2), -cofactor(0, 1, 0, 2)],
            [cofactor(1, 2, 0, 1), -cofactor(0, 2, 0, 1), cofactor(0, 1, 0, 1)],
        ];

        let mut cells = [0.0; 9];
        for (row, values) in inv.iter().enumerate() {
            for (col, v) in values.iter().enumerate() {
                cells[col * 3 + row] = v / det;
            }
        }
        Matrix { cells }
    }

    /// Matrix product `self · other`.
    ///
    /// The result applies `other` first, then `self`:
    /// `a.multiply(b).transform(p) == a.transform(b.transform(p))`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let mut cells = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                cells[col * 3 + row] = (0..3).map(|k| self.at(row, k) * other.at(k, col)).sum();
            }
        }
        Matrix { cells }
    }

    /// Builds the placement matrix of an element.
    ///
    /// Equivalent to translating `origin` to zero, scaling, skewing, rotating, then
    /// translating to `translate`. The origin therefore always lands exactly on
    /// `translate`.
    ///
    /// Positive rotation turns clockwise on a +Y-down surface. Skew angles on an odd
    /// multiple of 90° have no finite tangent and are treated as zero.
    pub fn compose_from_parameters(
        origin: Vec2,
        translate: Vec2,
        rotation_deg: f32,
        scale: Vec2,
        skew_deg: Vec2,
    ) -> Matrix {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let tan_x = skew_tangent(skew_deg.x);
        let tan_y = skew_tangent(skew_deg.y);

        // rotate · skew · scale
        let a = cos * scale.x - sin * tan_y * scale.x;
        let b = sin * scale.x + cos * tan_y * scale.x;
        let c = cos * tan_x * scale.y - sin * scale.y;
        let d = sin * tan_x * scale.y + cos * scale.y;

        let e = translate.x - (a * origin.x + c * origin.y);
        let f = translate.y - (b * origin.x + d * origin.y);

        Matrix::new(a, b, c, d, e, f)
    }

    /// Composes this matrix with the canvas's current transform. No-op without a canvas.
    pub fn apply_to<C: Canvas + ?Sized>(&self, canvas: Option<&mut C>) {
        if let Some(canvas) = canvas {
            canvas.apply_transform(*self);
        }
    }

    /// Replaces the canvas's current transform with this matrix. No-op without a canvas.
    pub fn set_on<C: Canvas + ?Sized>(&self, canvas: Option<&mut C>) {
        if let Some(canvas) = canvas {
            canvas.set_transform(*self);
        }
    }
}

fn skew_tangent(deg: f32) -> f32 {
    if deg.rem_euclid(180.0) == 90.0 {
        0.0
    } else {
        deg.to_radians().tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCmd, RecordingCanvas};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn samples() -> Vec<Matrix> {
        vec![
            Matrix::identity(),
            Matrix::translation(12.0, -7.5),
            Matrix::new(2.0, 0.5, -0.25, 3.0, 4.0, 5.0),
            Matrix::compose_from_parameters(
                Vec2::new(10.0, 20.0),
                Vec2::new(100.0, 50.0),
                33.0,
                Vec2::new(1.5, 0.75),
                Vec2::new(12.0, -8.0),
            ),
        ]
    }

    fn points() -> [Vec2; 4] {
        [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(-3.5, 8.25), Vec2::new(240.0, -60.0)]
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn transform_uses_column_layout() {
        let m = Matrix::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(m.transform(Vec2::new(1.0, 1.0)), Vec2::new(1.0 + 3.0 + 5.0, 2.0 + 4.0 + 6.0));
    }

    #[test]
    fn identity_leaves_points_alone() {
        for p in points() {
            assert_eq!(Matrix::identity().transform(p), p);
        }
    }

    // ── invert ────────────────────────────────────────────────────────────

    #[test]
    fn inverse_round_trip() {
        for m in samples() {
            let inv = m.invert();
            for p in points() {
                let back = inv.transform(m.transform(p));
                assert!(approx(back, p), "{m:?}: {p:?} came back as {back:?}");
            }
        }
    }

    #[test]
    fn degenerate_matrix_inverts_to_identity() {
        let collapsed = Matrix::compose_from_parameters(
            Vec2::zero(),
            Vec2::new(5.0, 5.0),
            30.0,
            Vec2::zero(),
            Vec2::zero(),
        );
        assert_eq!(collapsed.determinant(), 0.0);
        assert_eq!(collapsed.invert(), Matrix::identity());
    }

    #[test]
    fn non_finite_matrix_inverts_to_identity() {
        let nan = Matrix::new(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert!(nan.determinant().is_nan());
        assert_eq!(nan.invert(), Matrix::identity());

        let inf = Matrix::new(f32::INFINITY, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(inf.invert(), Matrix::identity());
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn multiply_applies_right_operand_first() {
        for a in samples() {
            for b in samples() {
                let ab = a.multiply(&b);
                for p in points() {
                    assert!(approx(ab.transform(p), a.transform(b.transform(p))));
                }
            }
        }
    }

    #[test]
    fn multiply_order_matters() {
        let t = Matrix::translation(10.0, 0.0);
        let s = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(t.multiply(&s).transform(p), Vec2::new(12.0, 2.0));
        assert_eq!(s.multiply(&t).transform(p), Vec2::new(22.0, 2.0));
    }

    #[test]
    fn multiply_by_inverse_is_identity() {
        let m = samples()[3];
        let id = m.multiply(&m.invert());
        for (lhs, rhs) in id.cells().iter().zip(Matrix::identity().cells().iter()) {
            assert!((lhs - rhs).abs() < 1e-4);
        }
    }

    #[test]
    fn transform_vector_ignores_translation() {
        let m = Matrix::new(2.0, 0.0, 0.0, 3.0, 40.0, 50.0);
        assert_eq!(m.transform_vector(Vec2::new(1.0, 1.0)), Vec2::new(2.0, 3.0));
        assert_eq!(
            m.transform_vector(Vec2::new(1.0, 1.0)),
            m.transform(Vec2::new(1.0, 1.0)) - m.transform(Vec2::zero())
        );
    }

    // ── compose_from_parameters ───────────────────────────────────────────

    #[test]
    fn origin_lands_on_translation() {
        let m = Matrix::compose_from_parameters(
            Vec2::new(8.0, 4.0),
            Vec2::new(50.0, 60.0),
            71.0,
            Vec2::new(2.0, 3.0),
            Vec2::new(10.0, 20.0),
        );
        assert!(approx(m.transform(Vec2::new(8.0, 4.0)), Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn positive_rotation_is_clockwise_with_y_down() {
        let m = Matrix::compose_from_parameters(Vec2::zero(), Vec2::zero(), 90.0, Vec2::splat(1.0), Vec2::zero());
        assert!(approx(m.transform(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
        assert!(approx(m.transform(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn scale_is_relative_to_origin() {
        let m = Matrix::compose_from_parameters(
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 10.0),
            0.0,
            Vec2::new(2.0, 3.0),
            Vec2::zero(),
        );
        assert!(approx(m.transform(Vec2::new(11.0, 11.0)), Vec2::new(12.0, 13.0)));
    }

    #[test]
    fn skew_shears_along_each_axis() {
        let m = Matrix::compose_from_parameters(Vec2::zero(), Vec2::zero(), 0.0, Vec2::splat(1.0), Vec2::new(45.0, 0.0));
        assert!(approx(m.transform(Vec2::new(0.0, 2.0)), Vec2::new(2.0, 2.0)));

        let m = Matrix::compose_from_parameters(Vec2::zero(), Vec2::zero(), 0.0, Vec2::splat(1.0), Vec2::new(0.0, 45.0));
        assert!(approx(m.transform(Vec2::new(2.0, 0.0)), Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn skew_on_odd_right_angles_is_ignored() {
        for deg in [90.0, -90.0, 270.0, 450.0] {
            let m = Matrix::compose_from_parameters(
                Vec2::zero(),
                Vec2::zero(),
                0.0,
                Vec2::splat(1.0),
                Vec2::new(deg, deg),
            );
            assert_eq!(m, Matrix::identity(), "skew {deg}");
        }
    }

    // ── canvas ────────────────────────────────────────────────────────────

    #[test]
    fn apply_to_composes_with_canvas_transform() {
        let mut canvas = RecordingCanvas::default();
        canvas.set_transform(Matrix::translation(5.0, 0.0));
        Matrix::translation(0.0, 7.0).apply_to(Some(&mut canvas));
        assert_eq!(canvas.commands().last(), Some(&CanvasCmd::ApplyTransform(Matrix::translation(0.0, 7.0))));
        assert_eq!(canvas.transform(), Matrix::translation(5.0, 7.0));
    }

    #[test]
    fn set_on_replaces_canvas_transform() {
        let mut canvas = RecordingCanvas::default();
        canvas.set_transform(Matrix::translation(5.0, 0.0));
        Matrix::translation(0.0, 7.0).set_on(Some(&mut canvas));
        assert_eq!(canvas.transform(), Matrix::translation(0.0, 7.0));
    }

    #[test]
    fn missing_canvas_is_a_no_op() {
        let mut canvas = RecordingCanvas::default();
        let m = Matrix::translation(3.0, 3.0);
        m.apply_to(None::<&mut RecordingCanvas>);
        m.set_on(None::<&mut dyn Canvas>);
        assert!(canvas.commands().is_empty());
        assert_eq!(canvas.transform(), Matrix::identity());

        let dyn_canvas: &mut dyn Canvas = &mut canvas;
        m.set_on(Some(dyn_canvas));
        assert_eq!(canvas.transform(), m);
    }
}
