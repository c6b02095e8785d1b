use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::canvas::{Canvas, Path, SaveGuard};
use crate::coords::{Rect, Vec2};
use crate::paint::{Color, LineCap, LineJoin, Paint};
use crate::transform::{Transform, Transformable};

use super::{DrawStyle, Drawable};

/// Where a [`Shape`]'s outline comes from.
#[derive(Clone)]
pub enum ShapePath {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
    /// Arbitrary outline traced into the given path on every use.
    Custom(Rc<dyn Fn(&mut Path)>),
}

impl ShapePath {
    /// Traces the outline in the shape's local coordinates.
    pub fn build(&self) -> Path {
        match self {
            ShapePath::Rect(rect) => Path::from_rect(*rect),
            ShapePath::Circle { center, radius } => Path::circle(*center, *radius),
            ShapePath::Custom(trace) => {
                let mut path = Path::new();
                trace(&mut path);
                path
            }
        }
    }
}

impl fmt::Debug for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapePath::Rect(rect) => f.debug_tuple("Rect").field(rect).finish(),
            ShapePath::Circle { center, radius } => {
                f.debug_struct("Circle").field("center", center).field("radius", radius).finish()
            }
            ShapePath::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Default for ShapePath {
    fn default() -> Self {
        ShapePath::Custom(Rc::new(|_: &mut Path| {}))
    }
}

/// Filled and/or stroked vector outline.
#[derive(Debug, Clone)]
pub struct Shape {
    transform: Transform,
    style: DrawStyle,
    path: ShapePath,

    pub fill: bool,
    pub fill_color: Paint,
    pub stroke: bool,
    pub line_color: Paint,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Draw the fill before the stroke so the stroke ends up on top.
    pub fill_over_stroke: bool,

    transformed_rect: Cell<Option<Rect>>,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new(ShapePath::default())
    }
}

impl Shape {
    pub fn new(path: ShapePath) -> Self {
        Self {
            transform: Transform::new(),
            style: DrawStyle::default(),
            path,
            fill: true,
            fill_color: Paint::Solid(Color::black()),
            stroke: false,
            line_color: Paint::Solid(Color::black()),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            fill_over_stroke: false,
            transformed_rect: Cell::new(None),
        }
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new(ShapePath::Rect(rect))
    }

    pub fn circle(radius: f32, center: Vec2) -> Self {
        Self::new(ShapePath::Circle { center, radius })
    }

    /// A shape whose outline is traced by `trace`.
    pub fn custom(trace: impl Fn(&mut Path) + 'static) -> Self {
        Self::new(ShapePath::Custom(Rc::new(trace)))
    }

    pub fn path_source(&self) -> &ShapePath {
        &self.path
    }

    pub fn set_path_source(&mut self, path: ShapePath) {
        self.path = path;
        self.transformed_rect.set(None);
    }

    /// The outline in local coordinates.
    pub fn path(&self) -> Path {
        self.path.build()
    }

    /// Axis-aligned bounding box of the flattened outline in global coordinates.
    ///
    /// An empty outline yields an empty rectangle at the shape's position.
    pub fn transformed_rect(&self) -> Rect {
        if let Some(r) = self.transformed_rect.get() {
            return r;
        }
        let r = self
            .path()
            .bounds(&self.matrix())
            .unwrap_or_else(|| Rect::from_origin_size(self.position(), Vec2::zero()));
        self.transformed_rect.set(Some(r));
        r
    }

    pub fn relative_transformed_rect(&self) -> Rect {
        self.transformed_rect().translated(-self.position())
    }

    /// Tests a global point against the outline using the canvas's own
    /// point-in-path test.
    ///
    /// The canvas's current path is replaced by the outline; everything else is
    /// restored. Pass a scratch canvas to keep a path under construction, as
    /// [`Surface::hit_test`](crate::Surface::hit_test) does.
    pub fn is_point_inside(&self, canvas: &mut dyn Canvas, point: Vec2) -> bool {
        let path = self.path();
        if path.is_empty() {
            return false;
        }

        let mut canvas = SaveGuard::new(canvas);
        canvas.set_transform(self.matrix());
        canvas.begin_path();
        canvas.add_path(&path);
        canvas.close_path();
        canvas.is_point_in_path(point)
    }
}

impl Transformable for Shape {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn transformed(&mut self) {
        self.transformed_rect.set(None);
    }
}

impl Drawable for Shape {
    fn style(&self) -> &DrawStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DrawStyle {
        &mut self.style
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.fill && !self.stroke {
            return;
        }
        let path = self.path();
        if path.is_empty() {
            log::trace!("shape: empty outline, nothing to draw");
            return;
        }

        if self.stroke {
            canvas.set_stroke_style(self.line_color.clone());
            canvas.set_line_width(self.line_width);
            canvas.set_line_cap(self.line_cap);
            canvas.set_line_join(self.line_join);
        }
        if self.fill {
            canvas.set_fill_style(self.fill_color.clone());
        }

        canvas.begin_path();
        canvas.add_path(&path);
        canvas.close_path();

        if self.stroke && !self.fill_over_stroke {
            canvas.stroke();
        }
        if self.fill {
            canvas.fill();
        }
        if self.stroke && self.fill_over_stroke {
            canvas.stroke();
        }
    }
}
