use anyhow::{Context, Result};
use caret_engine::bitmap::Image;
use caret_engine::canvas::{CanvasCmd, CanvasInit, RecordingCanvas};
use caret_engine::logging::{init_logging, LoggingConfig};
use caret_engine::paint::{Color, Paint, Shadow};
use caret_engine::text::{Font, FontSystem};
use caret_engine::time::Clock;
use caret_engine::{Drawable, Rect, Shape, Sprite, Surface, Text, Transformable, Vec2, View};

/// Demo settings.
#[derive(Debug, Clone)]
struct StudioConfig {
    width: u32,
    height: u32,
    frames: u32,
    /// View rotation per frame, in degrees.
    spin: f32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self { width: 640, height: 480, frames: 8, spin: 7.5 }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let config = StudioConfig::default();

    let tile = match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;
            Image::decode(&bytes).with_context(|| format!("failed to load {path}"))?
        }
        None => checkerboard(16).context("failed to build checkerboard")?,
    };

    let mut canvas = RecordingCanvas::new(CanvasInit {
        width: config.width,
        height: config.height,
        fallback_advance: Some(0.55),
    });
    let mut fonts = FontSystem::new();
    match fonts.load_font(Font::DEFAULT_FAMILY, &load_font()) {
        Ok(_) => canvas = canvas.with_fonts(fonts),
        Err(err) => log::warn!("{err}; measuring text with the fallback advance"),
    }

    let mut surface = Surface::new(canvas);
    surface.clip_shape = Some(Shape::circle(220.0, Vec2::new(320.0, 240.0)));

    let mut scene = build_scene(tile);
    let clock = Clock::new();

    for frame in 0..config.frames {
        surface.view().borrow_mut().set_rotation(frame as f32 * config.spin);

        surface.clear(Some(Paint::Solid(Color::from_srgb_u8(24, 26, 32, 255))));
        for element in &scene {
            surface.draw(&**element);
        }
        for element in scene.iter_mut().skip(1) {
            element.rotate_by(config.spin);
        }

        let cmds = surface.canvas_mut().take_commands();
        log::info!(
            "frame {frame}: {} calls ({} blits, {} fills, {} strokes, {} text runs)",
            cmds.len(),
            count(&cmds, |c| matches!(c, CanvasCmd::DrawImage { .. })),
            count(&cmds, |c| matches!(c, CanvasCmd::Fill { .. } | CanvasCmd::FillRect { .. })),
            count(&cmds, |c| matches!(c, CanvasCmd::Stroke { .. })),
            count(&cmds, |c| matches!(c, CanvasCmd::FillText { .. } | CanvasCmd::StrokeText { .. })),
        );
    }

    let pointer = Vec2::new(330.0, 250.0);
    let target = Shape::rect(Rect::new(290.0, 210.0, 60.0, 60.0));
    let in_scene = surface.convert_coordinates(pointer, None);
    log::info!(
        "pointer {pointer:?} is {in_scene:?} in the scene; over target: {}",
        surface.hit_test(&target, in_scene)
    );

    let mini = View::with_window(
        Vec2::new(config.width as f32, config.height as f32),
        Some(Vec2::zero()),
        Some(Vec2::new(160.0, 120.0)),
        0.0,
    );
    log::info!(
        "same pointer through a 4x minimap view: {:?}",
        surface.convert_coordinates(pointer, Some(&mini))
    );

    let mut title = Text::new("caret studio", Font::new(Font::DEFAULT_FAMILY, 28.0));
    title.set_position(Vec2::new(24.0, 16.0));
    log::info!("title bounds: {:?}", title.transformed_rect(surface.canvas()));

    log::info!("{} frames composed in {} ms", config.frames, clock.elapsed_ms());
    Ok(())
}

fn build_scene(tile: Image) -> Vec<Box<dyn Drawable>> {
    let mut floor = Sprite::new(Some(tile.clone()));
    floor.set_subrect(Rect::new(0.0, 0.0, 640.0, 480.0));

    let mut crate_sprite = Sprite::new(Some(tile));
    crate_sprite.set_origin(Vec2::splat(8.0));
    crate_sprite.set_position(Vec2::new(200.0, 180.0));
    crate_sprite.set_scale(Vec2::splat(3.0));
    crate_sprite.style_mut().shadow = Shadow {
        blur: 6.0,
        color: Color::black().with_alpha(0.6),
        offset: Vec2::new(2.0, 2.0),
    };

    let mut ring = Shape::circle(40.0, Vec2::zero());
    ring.set_position(Vec2::new(420.0, 260.0));
    ring.stroke = true;
    ring.line_width = 6.0;
    ring.fill_color = Paint::Solid(Color::from_srgb_u8(240, 180, 40, 255));
    ring.line_color = Paint::Solid(Color::white());
    ring.fill_over_stroke = true;

    let mut label = Text::new("hello, caret", Font::new(Font::DEFAULT_FAMILY, 24.0));
    label.set_origin(Vec2::new(60.0, 12.0));
    label.set_position(Vec2::new(320.0, 360.0));
    label.set_stroke(true);
    label.set_stroke_width(2.0);
    label.color = Paint::Solid(Color::white());

    let mut glow = label.clone();
    glow.style_mut().shadow.blur = 8.0;
    glow.style_mut().shadow.color = Color::from_srgb_u8(120, 200, 255, 255);
    glow.set_shadow_as_blur(true);

    vec![Box::new(floor), Box::new(crate_sprite), Box::new(ring), Box::new(glow), Box::new(label)]
}

/// Two-tone RGBA checkerboard, `cell` pixels per square.
fn checkerboard(cell: u32) -> Option<Image> {
    let side = cell * 2;
    let mut data = Vec::with_capacity((side * side * 4) as usize);
    for y in 0..side {
        for x in 0..side {
            let light = (x / cell + y / cell) % 2 == 0;
            data.extend_from_slice(if light { &[200, 200, 210, 255] } else { &[90, 90, 110, 255] });
        }
    }
    Image::from_rgba(side, side, data)
}

fn count(cmds: &[CanvasCmd], pred: impl Fn(&CanvasCmd) -> bool) -> usize {
    cmds.iter().filter(|c| pred(c)).count()
}

fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
