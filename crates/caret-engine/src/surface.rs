//! Render target: a canvas plus the view and clip it is drawn through.

use crate::canvas::{Canvas, CanvasInit, RecordingCanvas, SaveGuard};
use crate::coords::{Matrix, Rect, Vec2};
use crate::drawable::{Drawable, Shape};
use crate::paint::{Paint, Shadow};
use crate::transform::Transformable;
use crate::view::{SharedView, View};

/// Composes drawables onto a canvas.
///
/// A surface always has a current view; it starts as, and falls back to, the
/// default view sized to the canvas. Views are shared, never copied, so panning
/// or zooming a view through any handle is seen on the next draw.
pub struct Surface<C: Canvas> {
    canvas: C,
    default_view: SharedView,
    view: SharedView,
    /// Clips every draw to this shape's outline, placed by its own matrix and
    /// independent of the view.
    ///
    /// Only a [`Shape`] can clip: sprites and text have no outline path.
    pub clip_shape: Option<Shape>,
}

impl<C: Canvas> Surface<C> {
    pub fn new(canvas: C) -> Self {
        let physical = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let default_view = View::new(physical).shared();
        Self { canvas, view: default_view.clone(), default_view, clip_shape: None }
    }

    #[inline]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn default_view(&self) -> SharedView {
        self.default_view.clone()
    }

    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    /// Draws through `view` from now on; `None` goes back to the default view.
    pub fn set_view(&mut self, view: Option<SharedView>) {
        self.view = view.unwrap_or_else(|| self.default_view.clone());
        log::debug!("surface: view set to {:?}", self.view.borrow().center());
    }

    /// Composes one drawable: clip, then the view transform, then the shadow,
    /// then the element itself.
    ///
    /// Each draw runs in its own saved canvas state, so nothing set here carries
    /// over to the next draw.
    pub fn draw<D: Drawable + ?Sized>(&mut self, element: &D) {
        let view = self.view.borrow().matrix();
        let mut canvas = SaveGuard::new(&mut self.canvas);

        if let Some(clip) = &self.clip_shape {
            let path = clip.path();
            if !path.is_empty() {
                log::trace!("surface: clipping to {:?}", clip.path_source());
                clip.matrix().set_on(Some(&mut *canvas));
                canvas.begin_path();
                canvas.add_path(&path);
                canvas.close_path();
                canvas.clip();
            }
        }

        view.set_on(Some(&mut *canvas));

        if element.style().shadow.is_visible() {
            canvas.set_shadow(device_shadow(&view, element));
        }

        element.render(&mut *canvas);
    }

    /// Fills the whole canvas with `paint`, or clears it to transparent.
    ///
    /// Works in device pixels regardless of the current view.
    pub fn clear(&mut self, paint: Option<Paint>) {
        let full = Rect::new(0.0, 0.0, self.canvas.width() as f32, self.canvas.height() as f32);
        let mut canvas = SaveGuard::new(&mut self.canvas);
        canvas.set_transform(Matrix::identity());
        match paint {
            Some(paint) => {
                canvas.set_fill_style(paint);
                canvas.fill_rect(full);
            }
            None => canvas.clear_rect(full),
        }
    }

    /// Maps a physical canvas point (e.g. a pointer position) into the scene
    /// coordinates of `view`, or of the current view.
    pub fn convert_coordinates(&self, point: Vec2, view: Option<&View>) -> Vec2 {
        match view {
            Some(view) => view.inverse_matrix().transform(point),
            None => self.view.borrow().inverse_matrix().transform(point),
        }
    }

    /// Whether the scene point lies inside `shape`.
    ///
    /// The test runs on a scratch canvas the size of this one, so the path being
    /// built on the surface's own canvas is left alone.
    pub fn hit_test(&self, shape: &Shape, point: Vec2) -> bool {
        let mut scratch = RecordingCanvas::new(CanvasInit::with_size(self.width(), self.height()));
        shape.is_point_inside(&mut scratch, point)
    }
}

/// Device-space shadow for `element` drawn under `view`.
///
/// The declared offset lives in the element's local frame. Only the linear part
/// of the element and view matrices applies to it; the element's anchor lands on
/// the same device point with or without the offset.
fn device_shadow<D: Drawable + ?Sized>(view: &Matrix, element: &D) -> Shadow {
    let shadow = element.style().shadow;
    let offset = view.multiply(&element.matrix()).transform_vector(shadow.offset);
    Shadow { offset, ..shadow }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Image;
    use crate::canvas::CanvasCmd;
    use crate::drawable::Sprite;
    use crate::paint::Color;

    fn surface() -> Surface<RecordingCanvas> {
        Surface::new(RecordingCanvas::new(CanvasInit::with_size(200, 100)))
    }

    fn sprite() -> Sprite {
        let image = Image::from_rgba(10, 10, vec![0; 400]).unwrap();
        Sprite::new(Some(image))
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn shadow_sent(s: &Surface<RecordingCanvas>) -> Option<Shadow> {
        s.canvas().commands().iter().find_map(|c| match c {
            CanvasCmd::SetShadow(shadow) => Some(*shadow),
            _ => None,
        })
    }

    // ── views ─────────────────────────────────────────────────────────────

    #[test]
    fn default_view_matches_canvas() {
        let s = surface();
        let v = s.view();
        assert!(std::rc::Rc::ptr_eq(&v, &s.default_view()));
        assert_eq!(v.borrow().physical_size(), Vec2::new(200.0, 100.0));
        assert_eq!(v.borrow().center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn unsetting_view_restores_default() {
        let mut s = surface();
        let custom = View::new(Vec2::new(200.0, 100.0)).shared();
        s.set_view(Some(custom.clone()));
        assert!(std::rc::Rc::ptr_eq(&s.view(), &custom));
        s.set_view(None);
        assert!(std::rc::Rc::ptr_eq(&s.view(), &s.default_view()));
    }

    #[test]
    fn shared_view_changes_are_seen() {
        let s = surface();
        let view = s.view();
        view.borrow_mut().set_center(Vec2::new(0.0, 0.0));
        assert!(approx(s.convert_coordinates(Vec2::new(100.0, 50.0), None), Vec2::zero()));
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn draw_order_is_clip_view_then_element() {
        let mut s = surface();
        s.clip_shape = Some(Shape::circle(20.0, Vec2::new(50.0, 50.0)));
        s.view().borrow_mut().set_rotation(30.0);
        let view_m = s.view().borrow().matrix();

        let mut e = sprite();
        e.set_position(Vec2::new(10.0, 10.0));
        s.draw(&e);

        let cmds = s.canvas().commands();
        let clip = cmds.iter().position(|c| matches!(c, CanvasCmd::Clip { .. })).unwrap();
        let set_view = cmds.iter().position(|c| *c == CanvasCmd::SetTransform(view_m)).unwrap();
        let apply = cmds.iter().position(|c| *c == CanvasCmd::ApplyTransform(e.matrix())).unwrap();
        let blit = cmds.iter().position(|c| matches!(c, CanvasCmd::DrawImage { .. })).unwrap();
        assert!(clip < set_view && set_view < apply && apply < blit);

        // The clip is placed by the clip shape's matrix, not the view.
        assert_eq!(cmds[clip], CanvasCmd::Clip { transform: Matrix::identity() });

        // The blit lands under view · element.
        match &cmds[blit] {
            CanvasCmd::DrawImage { transform, .. } => assert_eq!(*transform, view_m.multiply(&e.matrix())),
            other => panic!("expected a blit, got {other:?}"),
        }
    }

    #[test]
    fn clip_is_placed_by_its_own_matrix() {
        let mut s = surface();
        let mut clip = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        clip.set_position(Vec2::new(30.0, 5.0));
        clip.set_rotation(15.0);
        let clip_m = clip.matrix();
        s.clip_shape = Some(clip);
        s.view().borrow_mut().set_size(Vec2::new(100.0, 50.0));

        s.draw(&sprite());
        let cmds = s.canvas().commands();
        let placed = cmds.iter().position(|c| *c == CanvasCmd::SetTransform(clip_m)).unwrap();
        let clip = cmds.iter().position(|c| matches!(c, CanvasCmd::Clip { .. })).unwrap();
        assert!(placed < clip);
        assert_eq!(cmds[clip], CanvasCmd::Clip { transform: clip_m });
    }

    #[test]
    fn draws_leave_no_state_behind() {
        let mut s = surface();
        s.view().borrow_mut().set_size(Vec2::new(100.0, 50.0));
        s.clip_shape = Some(Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
        s.draw(&sprite());
        s.draw(&sprite());
        assert_eq!(s.canvas().save_depth(), 0);
        assert_eq!(s.canvas().transform(), Matrix::identity());
        assert_eq!(s.canvas().shadow(), Shadow::none());
    }

    #[test]
    fn zero_alpha_element_draws_nothing_of_its_own() {
        let mut s = surface();
        let mut e = sprite();
        e.style_mut().alpha = 0.0;
        s.draw(&e);
        let cmds = s.canvas().commands();
        assert!(!cmds.iter().any(|c| matches!(c, CanvasCmd::DrawImage { .. } | CanvasCmd::SetGlobalAlpha(_))));
    }

    #[test]
    fn draws_trait_objects() {
        let mut s = surface();
        let scene: Vec<Box<dyn Drawable>> = vec![Box::new(sprite()), Box::new(Shape::circle(5.0, Vec2::zero()))];
        for e in &scene {
            s.draw(&**e);
        }
        let cmds = s.canvas().commands();
        assert!(cmds.iter().any(|c| matches!(c, CanvasCmd::DrawImage { .. })));
        assert!(cmds.iter().any(|c| matches!(c, CanvasCmd::Fill { .. })));
    }

    // ── shadow compensation ───────────────────────────────────────────────

    #[test]
    fn no_blur_sends_no_shadow() {
        let mut s = surface();
        let mut e = sprite();
        e.style_mut().shadow.offset = Vec2::new(3.0, 4.0);
        s.draw(&e);
        assert_eq!(shadow_sent(&s), None);
    }

    #[test]
    fn shadow_offset_scales_with_element() {
        let mut s = surface();
        let mut e = sprite();
        e.set_position(Vec2::new(40.0, 40.0));
        e.set_scale(Vec2::splat(2.0));
        e.style_mut().shadow = Shadow { blur: 2.0, color: Color::black(), offset: Vec2::new(3.0, 4.0) };
        s.draw(&e);

        let sent = shadow_sent(&s).unwrap();
        assert!(approx(sent.offset, Vec2::new(6.0, 8.0)));
        assert_eq!(sent.blur, 2.0);
    }

    #[test]
    fn shadow_offset_turns_with_element() {
        let mut s = surface();
        let mut e = sprite();
        e.set_origin(Vec2::new(5.0, 5.0));
        e.set_rotation(90.0);
        e.style_mut().shadow = Shadow { blur: 1.0, color: Color::black(), offset: Vec2::new(4.0, 0.0) };
        s.draw(&e);
        assert!(approx(shadow_sent(&s).unwrap().offset, Vec2::new(0.0, 4.0)));
    }

    #[test]
    fn shadow_offset_follows_view_zoom() {
        let mut s = surface();
        s.view().borrow_mut().set_size(Vec2::new(100.0, 50.0));
        let mut e = sprite();
        e.set_position(Vec2::new(30.0, 20.0));
        e.style_mut().shadow = Shadow { blur: 1.0, color: Color::black(), offset: Vec2::new(3.0, 4.0) };
        s.draw(&e);
        assert!(approx(shadow_sent(&s).unwrap().offset, Vec2::new(6.0, 8.0)));
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_covers_the_canvas_in_device_space() {
        let mut s = surface();
        s.view().borrow_mut().set_rotation(45.0);
        s.clear(Some(Paint::Solid(Color::white())));
        s.clear(None);

        let full = Rect::new(0.0, 0.0, 200.0, 100.0);
        let cmds = s.canvas().commands();
        assert!(cmds.contains(&CanvasCmd::FillRect {
            rect: full,
            paint: Paint::Solid(Color::white()),
            transform: Matrix::identity(),
        }));
        assert!(cmds.contains(&CanvasCmd::ClearRect { rect: full, transform: Matrix::identity() }));
        assert_eq!(s.canvas().save_depth(), 0);
    }

    // ── coordinates ───────────────────────────────────────────────────────

    #[test]
    fn convert_coordinates_uses_view_inverse() {
        let mut s = surface();
        assert!(approx(s.convert_coordinates(Vec2::new(12.0, 34.0), None), Vec2::new(12.0, 34.0)));

        s.view().borrow_mut().set_size(Vec2::new(100.0, 50.0));
        // The window now spans 50..150 × 25..75.
        assert!(approx(s.convert_coordinates(Vec2::zero(), None), Vec2::new(50.0, 25.0)));

        let other = View::with_window(Vec2::new(200.0, 100.0), Some(Vec2::zero()), None, 0.0);
        assert!(approx(s.convert_coordinates(Vec2::new(100.0, 50.0), Some(&other)), Vec2::zero()));
    }

    #[test]
    fn hit_test_uses_scene_points() {
        let s = surface();
        let mut target = Shape::rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        target.set_position(Vec2::new(60.0, 30.0));

        let pointer = Vec2::new(70.0, 40.0);
        let scene = s.convert_coordinates(pointer, None);
        assert!(s.hit_test(&target, scene));
        assert!(!s.hit_test(&target, Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn hit_test_leaves_canvas_path_alone() {
        let mut s = surface();
        s.canvas_mut().begin_path();
        s.canvas_mut().rect(Rect::new(100.0, 0.0, 50.0, 50.0));
        let before = s.canvas().current_path().clone();
        let recorded = s.canvas().commands().len();

        let target = Shape::circle(10.0, Vec2::new(10.0, 10.0));
        assert!(s.hit_test(&target, Vec2::new(10.0, 10.0)));

        assert_eq!(s.canvas().current_path(), &before);
        assert_eq!(s.canvas().commands().len(), recorded);
        assert!(s.canvas().is_point_in_path(Vec2::new(120.0, 20.0)));
    }
}
