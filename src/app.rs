// SPDX: CC0-1.0

//! Window shell: feeds egui input into a [`Session`] and paints its output.

use crate::{
    canvas::{Canvas, Rect, Rgba},
    config::{COLOR_BLACK, FPS, HEIGHT, TITLE, WIDTH},
    input::{FrameInput, Keys},
    session::Session,
    Number, Point, Screen,
};
use anyhow::Context;
use core::time::Duration;
use eframe::egui::{self, Align2, Color32, CursorIcon, FontId, Key, Painter, Pos2, Stroke};

fn to_color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_pos(p: Point<Number>) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}

fn to_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        Pos2::new(r.x0 as f32, r.y0 as f32),
        Pos2::new(r.x1 as f32, r.y1 as f32),
    )
}

fn from_pos(p: Pos2) -> Point<Number> {
    Point::new(Number::from(p.x), Number::from(p.y))
}

struct PainterCanvas<'a> {
    painter: &'a Painter,
}

impl Canvas for PainterCanvas<'_> {
    fn line(&mut self, from: Point<Number>, to: Point<Number>, thickness: Number, color: Rgba) {
        self.painter.line_segment(
            [to_pos(from), to_pos(to)],
            Stroke::new(thickness as f32, to_color(color)),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.painter.rect_filled(to_rect(rect), 0.0, to_color(color));
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: Number, color: Rgba) {
        self.painter.rect_stroke(
            to_rect(rect),
            0.0,
            Stroke::new(thickness as f32, to_color(color)),
        );
    }

    fn text(&mut self, text: &str, pos: Point<Number>, size: Number, color: Rgba) {
        self.painter.text(
            to_pos(pos),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(size as f32),
            to_color(color),
        );
    }

    fn measure_text(&self, text: &str, size: Number) -> Point<Number> {
        let galley = self.painter.layout_no_wrap(
            text.to_string(),
            FontId::proportional(size as f32),
            Color32::WHITE,
        );
        let size = galley.size();
        Point::new(Number::from(size.x), Number::from(size.y))
    }
}

/// Snapshot of this frame's input.
///
/// `points_per_notch` is egui's `line_scroll_speed`, the distance it
/// reports for one wheel line. Scrolling is dropped until the pointer has
/// been seen, since there is nothing to anchor the zoom at.
fn frame_input(i: &egui::InputState, points_per_notch: f32) -> FrameInput {
    let delta = i.pointer.delta();
    let pointer = i.pointer.latest_pos();
    let scroll = match pointer {
        Some(_) if points_per_notch > 0.0 => i.raw_scroll_delta.y / points_per_notch,
        _ => 0.0,
    };
    FrameInput {
        pointer: pointer.map(from_pos).unwrap_or_default(),
        hovering: i.pointer.hover_pos().is_some(),
        pointer_delta: Point::new(Number::from(delta.x), Number::from(delta.y)),
        primary_held: i.pointer.primary_down(),
        primary_pressed: i.pointer.primary_pressed(),
        scroll: Number::from(scroll),
        keys: Keys {
            up: i.key_down(Key::ArrowUp) || i.key_down(Key::W),
            down: i.key_down(Key::ArrowDown) || i.key_down(Key::S),
            left: i.key_down(Key::ArrowLeft) || i.key_down(Key::A),
            right: i.key_down(Key::ArrowRight) || i.key_down(Key::D),
            zoom_in: i.key_down(Key::Plus) || i.key_down(Key::Equals),
            zoom_out: i.key_down(Key::Minus),
            reset_pressed: i.key_pressed(Key::Space),
        },
        close_requested: i.key_pressed(Key::Escape),
    }
}

pub struct App {
    session: Session,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let per_notch = ctx.options(|o| o.line_scroll_speed);
        let input = ctx.input(|i| frame_input(i, per_notch));
        if input.close_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let size = ctx.screen_rect().size();
        self.session
            .resize(Screen::new(Number::from(size.x), Number::from(size.y)));

        let out = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(to_color(COLOR_BLACK)))
            .show(ctx, |ui| {
                let mut canvas = PainterCanvas {
                    painter: ui.painter(),
                };
                self.session.frame(&mut canvas, &input)
            })
            .inner;

        ctx.set_cursor_icon(if out.over_legend {
            CursorIcon::Default
        } else {
            CursorIcon::Crosshair
        });
        ctx.request_repaint_after(Duration::from_secs_f64(1.0 / f64::from(FPS)));
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(session: Session) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([WIDTH as f32, HEIGHT as f32]),
        ..Default::default()
    };

    log::info!(
        "opening {WIDTH}x{HEIGHT} window with {} expression(s)",
        session.exprs.len()
    );
    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc: &eframe::CreationContext<'_>| {
            Ok(Box::new(App::new(session)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("failed to run window")?;
    log::info!("window closed");

    Ok(())
}
