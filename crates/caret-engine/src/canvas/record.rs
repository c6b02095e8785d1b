use crate::bitmap::Image;
use crate::coords::{Matrix, Rect, Vec2};
use crate::paint::{Color, CompositeOp, LineCap, LineJoin, Paint, Shadow, TextBaseline};
use crate::text::{Font, FontSystem, TextMeasure};

use super::{Canvas, PathEl, Polylines};

/// Initialization parameters for a [`RecordingCanvas`].
#[derive(Debug, Clone)]
pub struct CanvasInit {
    /// Surface width in physical pixels.
    pub width: u32,
    /// Surface height in physical pixels.
    pub height: u32,
    /// Per-character advance, as a fraction of the font size, used to measure
    /// text whose family is not loaded. `None` leaves such text unmeasurable.
    pub fallback_advance: Option<f32>,
}

impl CanvasInit {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }
}

impl Default for CanvasInit {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            fallback_advance: None,
        }
    }
}

/// One recorded canvas call.
///
/// Drawing commands carry the transform that was current when they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCmd {
    Save,
    Restore,
    SetTransform(Matrix),
    ApplyTransform(Matrix),
    BeginPath,
    ClosePath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool },
    Rect(Rect),
    Clip { transform: Matrix },
    Fill { paint: Paint, transform: Matrix },
    Stroke { paint: Paint, width: f32, transform: Matrix },
    FillRect { rect: Rect, paint: Paint, transform: Matrix },
    ClearRect { rect: Rect, transform: Matrix },
    SetFillStyle(Paint),
    SetStrokeStyle(Paint),
    SetLineWidth(f32),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetGlobalAlpha(f32),
    SetComposite(CompositeOp),
    SetShadow(Shadow),
    /// Canvas font shorthand, as produced by [`Font::css`].
    SetFont(String),
    SetTextBaseline(TextBaseline),
    FillText { text: String, at: Vec2, transform: Matrix },
    StrokeText { text: String, at: Vec2, transform: Matrix },
    DrawImage { image: Image, src: Rect, dst: Rect, transform: Matrix },
}

/// Drawing state captured by `save` and reinstated by `restore`.
#[derive(Debug, Clone)]
struct DrawingState {
    transform: Matrix,
    fill: Paint,
    stroke: Paint,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    global_alpha: f32,
    composite: CompositeOp,
    shadow: Shadow,
    font: Font,
    baseline: TextBaseline,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            transform: Matrix::identity(),
            fill: Paint::Solid(Color::black()),
            stroke: Paint::Solid(Color::black()),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            global_alpha: 1.0,
            composite: CompositeOp::default(),
            shadow: Shadow::none(),
            font: Font::new("sans-serif", 10.0),
            baseline: TextBaseline::default(),
        }
    }
}

/// Headless canvas that records every call.
///
/// It tracks the current transform and state stack, keeps the current path in
/// device space so `is_point_in_path` answers like a real surface, and measures
/// text through an optional [`FontSystem`]. Nothing is rasterized.
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    state: DrawingState,
    stack: Vec<DrawingState>,
    path: Polylines,
    fonts: Option<FontSystem>,
    fallback_advance: Option<f32>,
    cmds: Vec<CanvasCmd>,
}

impl RecordingCanvas {
    pub fn new(init: CanvasInit) -> Self {
        let CanvasInit { width, height, fallback_advance } = init;
        Self {
            width,
            height,
            state: DrawingState::default(),
            stack: Vec::new(),
            path: Polylines::default(),
            fonts: None,
            fallback_advance,
            cmds: Vec::new(),
        }
    }

    /// Measures text with the given fonts from now on.
    pub fn with_fonts(mut self, fonts: FontSystem) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Recorded calls in issue order.
    #[inline]
    pub fn commands(&self) -> &[CanvasCmd] {
        &self.cmds
    }

    /// Drains the recorded calls, keeping the allocation for the next frame.
    pub fn take_commands(&mut self) -> Vec<CanvasCmd> {
        std::mem::take(&mut self.cmds)
    }

    /// Current transform.
    #[inline]
    pub fn transform(&self) -> Matrix {
        self.state.transform
    }

    /// Number of `save` calls not yet matched by `restore`.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    #[inline]
    pub fn shadow(&self) -> Shadow {
        self.state.shadow
    }

    /// Current path, flattened into device space.
    #[inline]
    pub fn current_path(&self) -> &Polylines {
        &self.path
    }

    fn record(&mut self, cmd: CanvasCmd) {
        log::trace!("canvas: {cmd:?}");
        self.cmds.push(cmd);
    }

    fn push_path(&mut self, el: PathEl) {
        let m = self.state.transform;
        self.path.push(el, &m);
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(CanvasInit::default())
    }
}

impl TextMeasure for RecordingCanvas {
    fn measure_text(&self, text: &str, font: &Font) -> Option<f32> {
        self.fonts
            .as_ref()
            .and_then(|fonts| fonts.measure_text(text, font))
            .or_else(|| {
                self.fallback_advance
                    .map(|advance| advance * font.size * text.chars().count() as f32)
            })
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.record(CanvasCmd::Save);
    }

    fn restore(&mut self) {
        // An unbalanced restore is ignored, as on a real canvas.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.record(CanvasCmd::Restore);
    }

    fn set_transform(&mut self, m: Matrix) {
        self.state.transform = m;
        self.record(CanvasCmd::SetTransform(m));
    }

    fn apply_transform(&mut self, m: Matrix) {
        self.state.transform = self.state.transform.multiply(&m);
        self.record(CanvasCmd::ApplyTransform(m));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.record(CanvasCmd::BeginPath);
    }

    fn close_path(&mut self) {
        self.push_path(PathEl::Close);
        self.record(CanvasCmd::ClosePath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.push_path(PathEl::MoveTo(p));
        self.record(CanvasCmd::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.push_path(PathEl::LineTo(p));
        self.record(CanvasCmd::LineTo(p));
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.push_path(PathEl::Arc { center, radius, start, end, anticlockwise });
        self.record(CanvasCmd::Arc { center, radius, start, end, anticlockwise });
    }

    fn rect(&mut self, rect: Rect) {
        self.push_path(PathEl::Rect(rect));
        self.record(CanvasCmd::Rect(rect));
    }

    fn clip(&mut self) {
        let transform = self.state.transform;
        self.record(CanvasCmd::Clip { transform });
    }

    fn fill(&mut self) {
        let cmd = CanvasCmd::Fill { paint: self.state.fill.clone(), transform: self.state.transform };
        self.record(cmd);
    }

    fn stroke(&mut self) {
        let cmd = CanvasCmd::Stroke {
            paint: self.state.stroke.clone(),
            width: self.state.line_width,
            transform: self.state.transform,
        };
        self.record(cmd);
    }

    fn fill_rect(&mut self, rect: Rect) {
        let cmd = CanvasCmd::FillRect { rect, paint: self.state.fill.clone(), transform: self.state.transform };
        self.record(cmd);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let transform = self.state.transform;
        self.record(CanvasCmd::ClearRect { rect, transform });
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.state.fill = paint.clone();
        self.record(CanvasCmd::SetFillStyle(paint));
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.state.stroke = paint.clone();
        self.record(CanvasCmd::SetStrokeStyle(paint));
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
        self.record(CanvasCmd::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
        self.record(CanvasCmd::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
        self.record(CanvasCmd::SetLineJoin(join));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.global_alpha = alpha;
        self.record(CanvasCmd::SetGlobalAlpha(alpha));
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.state.composite = op;
        self.record(CanvasCmd::SetComposite(op));
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
        self.record(CanvasCmd::SetShadow(shadow));
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = font.clone();
        self.record(CanvasCmd::SetFont(font.css()));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
        self.record(CanvasCmd::SetTextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, at: Vec2) {
        let transform = self.state.transform;
        self.record(CanvasCmd::FillText { text: text.to_string(), at, transform });
    }

    fn stroke_text(&mut self, text: &str, at: Vec2) {
        let transform = self.state.transform;
        self.record(CanvasCmd::StrokeText { text: text.to_string(), at, transform });
    }

    fn draw_image(&mut self, image: &Image, src: Rect, dst: Rect) {
        let transform = self.state.transform;
        self.record(CanvasCmd::DrawImage { image: image.clone(), src, dst, transform });
    }

    fn is_point_in_path(&self, p: Vec2) -> bool {
        self.path.contains(p)
    }
}
