use std::cell::Cell;

use crate::bitmap::Image;
use crate::canvas::Canvas;
use crate::coords::{Matrix, Rect, Vec2};
use crate::paint::Paint;
use crate::transform::{Transform, Transformable};

use super::{mapped_bounds, DrawStyle, Drawable};

/// A rectangular region of an image.
///
/// When the visible region reaches past the image bounds, the image repeats to
/// fill it.
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    transform: Transform,
    style: DrawStyle,
    image: Option<Image>,
    subrect: Rect,
    transformed_rect: Cell<Option<Rect>>,
}

impl Sprite {
    /// A sprite showing the whole of `image`.
    pub fn new(image: Option<Image>) -> Self {
        let mut sprite = Self::default();
        sprite.set_image(image, false);
        sprite
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Replaces the image, or removes it with `None`.
    ///
    /// The visible region is reset to the new image's bounds when the sprite had
    /// no image before, or when `update_rect` is set.
    pub fn set_image(&mut self, image: Option<Image>, update_rect: bool) {
        let Some(image) = image else {
            self.image = None;
            return;
        };
        if self.image.is_none() || update_rect {
            self.set_subrect(image.bounds());
        }
        self.image = Some(image);
    }

    /// Visible region, in image pixels.
    pub fn subrect(&self) -> Rect {
        self.subrect
    }

    pub fn set_subrect(&mut self, rect: Rect) {
        self.subrect = rect;
        self.transformed_rect.set(None);
    }

    /// Axis-aligned bounding box of the sprite in global coordinates.
    pub fn transformed_rect(&self) -> Rect {
        if let Some(r) = self.transformed_rect.get() {
            return r;
        }
        let local = Rect::from_origin_size(Vec2::zero(), self.subrect.size());
        let r = mapped_bounds(&self.matrix(), local);
        self.transformed_rect.set(Some(r));
        r
    }

    /// [`transformed_rect`](Self::transformed_rect) relative to the sprite's
    /// position.
    pub fn relative_transformed_rect(&self) -> Rect {
        self.transformed_rect().translated(-self.position())
    }
}

impl Transformable for Sprite {
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

impl Drawable for Sprite {
    fn style(&self) -> &DrawStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DrawStyle {
        &mut self.style
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let rect = self.subrect;
        let Some(image) = &self.image else {
            return;
        };
        if rect.width == 0.0 || rect.height == 0.0 {
            return;
        }

        let (w, h) = (image.width() as f32, image.height() as f32);
        if rect.right() > w || rect.bottom() > h {
            log::trace!("sprite: subrect {rect:?} exceeds {w}x{h} image, tiling");

            canvas.begin_path();
            canvas.move_to(Vec2::zero());
            canvas.line_to(Vec2::new(rect.width, 0.0));
            canvas.line_to(Vec2::new(rect.width, rect.height));
            canvas.line_to(Vec2::new(0.0, rect.height));
            canvas.close_path();
            canvas.clip();

            // Patterns are anchored to the canvas origin.
            canvas.apply_transform(Matrix::translation(-rect.left, -rect.top));
            canvas.set_fill_style(Paint::Pattern(image.clone()));
            canvas.fill_rect(Rect::new(0.0, 0.0, rect.width + rect.left, rect.height + rect.top));
        } else {
            let dst = Rect::from_origin_size(Vec2::zero(), rect.size());
            canvas.draw_image(image, rect, dst);
        }
    }
}
