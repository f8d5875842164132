// SPDX: CC0-1.0

use crate::{
    camera::update_camera,
    canvas::{Canvas, Rgba},
    config::{plot_color, DEFAULT_SCREEN},
    eval::{Idents, Program},
    grid::{compute_grid_spacing, render_grid, render_grid_labels},
    input::FrameInput,
    overlay::{legend_hovered, render_coordinate_readout, render_legend},
    parse::compile,
    plot::plot,
    stdlib::standard_idents,
    transform::Camera,
    Screen,
};
use std::sync::Arc;

#[derive(Debug)]
pub struct ParsedExpression {
    pub text: Arc<String>,
    /// `None` if the text didn't compile; such entries are never shown.
    pub prog: Option<Program>,
    pub color: Rgba,
    pub visible: bool,
}

impl ParsedExpression {
    pub fn is_plottable(&self) -> bool {
        self.prog.is_some()
    }
}

/// Compiles each source, colouring them by position.
pub fn parse_expressions<'a, I>(srcs: I, idents: &mut Idents) -> Vec<ParsedExpression>
where
    I: IntoIterator<Item = &'a str>,
{
    srcs.into_iter()
        .enumerate()
        .map(|(idx, src)| {
            let text = Arc::new(src.trim().to_string());
            let prog = match compile(&text, idents) {
                Ok(prog) => {
                    log::debug!("compiled '{text}': {prog}");
                    Some(prog)
                }
                Err(err) => {
                    log::warn!("skipping '{text}': {err}");
                    None
                }
            };
            ParsedExpression {
                text,
                prog,
                color: plot_color(idx),
                visible: true,
            }
        })
        .collect()
}

/// Per-frame outcome the shell may react to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutput {
    pub over_legend: bool,
}

/// All state of a plotting session.
#[derive(Debug)]
pub struct Session {
    pub camera: Camera,
    pub screen: Screen,
    pub exprs: Vec<ParsedExpression>,
    pub idents: Idents,
    /// The primary button went down on the legend and is still held.
    pressed_on_legend: bool,
}

impl Session {
    pub fn new<'a, I>(srcs: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut idents = standard_idents();
        let exprs = parse_expressions(srcs, &mut idents);
        Self {
            camera: Camera::new(DEFAULT_SCREEN),
            screen: DEFAULT_SCREEN,
            exprs,
            idents,
            pressed_on_legend: false,
        }
    }

    /// Adapts to a new window size, keeping the view centred on the same
    /// world point.
    pub fn resize(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        let center = self.camera.screen_to_world(self.screen.center());
        self.camera.target = center;
        self.camera.offset = screen.center();
        self.screen = screen;
    }

    /// Runs one frame: camera update, grid, curves, then overlays.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C, input: &FrameInput) -> FrameOutput {
        // a drag that starts on the legend is a click, not a pan
        if input.primary_pressed {
            self.pressed_on_legend = legend_hovered(canvas, &self.exprs, input);
        } else if !input.primary_held {
            self.pressed_on_legend = false;
        }
        update_camera(&mut self.camera, input, self.screen, !self.pressed_on_legend);

        let spacing = compute_grid_spacing(self.camera.zoom);
        render_grid(canvas, &self.camera, self.screen, spacing);

        for expr in self.exprs.iter().filter(|e| e.visible) {
            if let Some(ref prog) = expr.prog {
                plot(canvas, &self.camera, self.screen, prog, &mut self.idents, expr.color);
            }
        }

        render_grid_labels(canvas, &self.camera, self.screen, spacing);

        let over_legend = render_legend(canvas, input, &mut self.exprs);
        render_coordinate_readout(
            canvas,
            &self.camera,
            input.pointer,
            over_legend || !input.hovering,
        );

        FrameOutput { over_legend }
    }
}
