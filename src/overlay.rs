// SPDX: CC0-1.0

//! Screen-space widgets drawn over the plot: the legend and the pointer's
//! coordinate readout.

use crate::{
    canvas::{Canvas, Rect},
    config::{
        COLOR_BRIGHT_BLACK, COLOR_BRIGHT_WHITE, COORDS_DISPLAY_OFFSET, COORDS_DISPLAY_SIZE,
        LEGEND_ELEM_SIZE, LEGEND_OPACITY, LEGEND_RECT_THICKNESS, LEGEND_SPACING,
    },
    input::FrameInput,
    session::ParsedExpression,
    transform::{world_to_math_point, Camera},
    Number, Point,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    /// Index into the expression list.
    pub expr: usize,
    pub swatch: Rect,
    pub text_pos: Point<Number>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    pub bounds: Rect,
    pub rows: Vec<LegendRow>,
}

/// Places one row per compiled expression, in input order, inside a box
/// wide enough for the longest label with [`LEGEND_SPACING`] margins all
/// round.
pub fn legend_layout<C: Canvas + ?Sized>(canvas: &C, exprs: &[ParsedExpression]) -> LegendLayout {
    const S: Number = LEGEND_SPACING;
    const E: Number = LEGEND_ELEM_SIZE;

    let mut rows = Vec::new();
    let mut max_width: Number = 0.0;
    for (idx, expr) in exprs.iter().enumerate().filter(|(_, e)| e.is_plottable()) {
        max_width = max_width.max(canvas.measure_text(&expr.text, E).x);

        let y = 2.0 * S + rows.len() as Number * (E + S);
        rows.push(LegendRow {
            expr: idx,
            swatch: Rect::from_origin_size((2.0 * S, y), (E, E)),
            text_pos: Point::new(3.0 * S + E, y),
        });
    }

    let n = rows.len() as Number;
    LegendLayout {
        bounds: Rect::from_origin_size((S, S), (3.0 * S + E + max_width, (n + 1.0) * S + n * E)),
        rows,
    }
}

fn is_hovered(layout: &LegendLayout, input: &FrameInput) -> bool {
    !layout.rows.is_empty() && input.hovering && layout.bounds.contains(input.pointer)
}

/// Whether the pointer is over the legend, without drawing it.
pub fn legend_hovered<C: Canvas + ?Sized>(
    canvas: &C,
    exprs: &[ParsedExpression],
    input: &FrameInput,
) -> bool {
    is_hovered(&legend_layout(canvas, exprs), input)
}

/// Draws the legend and handles clicks on its swatches.
///
/// Returns whether the pointer is over the legend box.
pub fn render_legend<C: Canvas + ?Sized>(
    canvas: &mut C,
    input: &FrameInput,
    exprs: &mut [ParsedExpression],
) -> bool {
    let layout = legend_layout(canvas, exprs);
    if layout.rows.is_empty() {
        return false;
    }

    canvas.fill_rect(layout.bounds, COLOR_BRIGHT_BLACK.with_alpha(LEGEND_OPACITY));

    for row in &layout.rows {
        let expr = &mut exprs[row.expr];

        if input.hovering && input.primary_pressed && row.swatch.contains(input.pointer) {
            expr.visible = !expr.visible;
            log::debug!(
                "{} '{}'",
                if expr.visible { "showing" } else { "hiding" },
                expr.text
            );
        }

        canvas.text(&expr.text, row.text_pos, LEGEND_ELEM_SIZE, COLOR_BRIGHT_WHITE);
        if expr.visible {
            canvas.fill_rect(row.swatch, expr.color);
        } else {
            canvas.stroke_rect(row.swatch, LEGEND_RECT_THICKNESS, expr.color);
        }
    }

    is_hovered(&layout, input)
}

/// Shows the math coordinates under the pointer, just above it.
pub fn render_coordinate_readout<C: Canvas + ?Sized>(
    canvas: &mut C,
    camera: &Camera,
    pointer: Point<Number>,
    suppress: bool,
) {
    if suppress {
        return;
    }

    let math = world_to_math_point(camera.screen_to_world(pointer));
    // adding 0.0 turns -0.0 into 0.0
    let text = format!("({:.4}, {:.4})", math.x + 0.0, math.y + 0.0);
    let size = canvas.measure_text(&text, COORDS_DISPLAY_SIZE);
    let pos = pointer + Point::new(-size.x / 2.0, -COORDS_DISPLAY_OFFSET);
    canvas.text(&text, pos, COORDS_DISPLAY_SIZE, COLOR_BRIGHT_WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::testing::{Call, RecordingCanvas},
        config::DEFAULT_SCREEN,
        session::parse_expressions,
        stdlib::standard_idents,
    };
    use approx::assert_relative_eq;

    fn exprs(srcs: &[&str]) -> Vec<ParsedExpression> {
        parse_expressions(srcs.iter().copied(), &mut standard_idents())
    }

    fn click(at: Point<Number>) -> FrameInput {
        FrameInput {
            pointer: at,
            hovering: true,
            primary_held: true,
            primary_pressed: true,
            ..FrameInput::default()
        }
    }

    fn swatch_center(layout: &LegendLayout, row: usize) -> Point<Number> {
        layout.rows[row].swatch.center().into()
    }

    #[test]
    fn box_fits_longest_label() {
        let canvas = RecordingCanvas::default();
        let list = exprs(&["x", "1/x", "sin(x)"]);
        let layout = legend_layout(&canvas, &list);

        assert_eq!(layout.rows.len(), 3);
        let widest = 6.0 * RecordingCanvas::CHAR_WIDTH;
        assert_relative_eq!(
            layout.bounds.width(),
            3.0 * LEGEND_SPACING + LEGEND_ELEM_SIZE + widest
        );
        assert_relative_eq!(
            layout.bounds.height(),
            4.0 * LEGEND_SPACING + 3.0 * LEGEND_ELEM_SIZE
        );

        // uniform margin below the last row
        let last = &layout.rows[2].swatch;
        assert_relative_eq!(layout.bounds.y1 - last.y1, LEGEND_SPACING);
    }

    #[test]
    fn failed_parses_get_no_row() {
        let canvas = RecordingCanvas::default();
        let list = exprs(&["x", "2x", "cos(x)"]);
        let layout = legend_layout(&canvas, &list);
        let idxs: Vec<_> = layout.rows.iter().map(|r| r.expr).collect();
        assert_eq!(idxs, [0, 2]);
        // rows stay packed
        assert_relative_eq!(
            layout.rows[1].swatch.y0 - layout.rows[0].swatch.y0,
            LEGEND_SPACING + LEGEND_ELEM_SIZE
        );
    }

    #[test]
    fn clicking_swatch_toggles_twice_back() {
        let mut list = exprs(&["x", "x^2"]);
        let layout = legend_layout(&RecordingCanvas::default(), &list);
        let at = swatch_center(&layout, 1);

        let mut canvas = RecordingCanvas::default();
        assert!(render_legend(&mut canvas, &click(at), &mut list));
        assert!(list[0].visible);
        assert!(!list[1].visible);
        assert!(canvas.calls.contains(&Call::StrokeRect(layout.rows[1].swatch, list[1].color)));

        let mut canvas = RecordingCanvas::default();
        render_legend(&mut canvas, &click(at), &mut list);
        assert!(list[1].visible);
        assert!(canvas.calls.contains(&Call::FillRect(layout.rows[1].swatch, list[1].color)));
    }

    #[test]
    fn holding_does_not_toggle() {
        let mut list = exprs(&["x"]);
        let layout = legend_layout(&RecordingCanvas::default(), &list);
        let mut held = click(swatch_center(&layout, 0));
        held.primary_pressed = false;
        for _ in 0..3 {
            render_legend(&mut RecordingCanvas::default(), &held, &mut list);
        }
        assert!(list[0].visible);
    }

    #[test]
    fn hover_reporting() {
        let mut list = exprs(&["x"]);
        let mut input = FrameInput {
            pointer: Point::new(LEGEND_SPACING + 1.0, LEGEND_SPACING + 1.0),
            hovering: true,
            ..FrameInput::default()
        };
        assert!(render_legend(&mut RecordingCanvas::default(), &input, &mut list));

        input.pointer = Point::new(600.0, 400.0);
        assert!(!render_legend(&mut RecordingCanvas::default(), &input, &mut list));

        input.pointer = Point::new(LEGEND_SPACING + 1.0, LEGEND_SPACING + 1.0);
        input.hovering = false;
        assert!(!render_legend(&mut RecordingCanvas::default(), &input, &mut list));
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let mut list = exprs(&["2x"]);
        let mut canvas = RecordingCanvas::default();
        let input = FrameInput {
            pointer: Point::new(LEGEND_SPACING, LEGEND_SPACING),
            hovering: true,
            ..FrameInput::default()
        };
        assert!(!render_legend(&mut canvas, &input, &mut list));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn readout_shows_math_coordinates() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let mut canvas = RecordingCanvas::default();
        // 50px right of and 100px above the origin
        let pointer = Point::new(690.0, 260.0);
        render_coordinate_readout(&mut canvas, &cam, pointer, false);

        let (text, pos) = canvas.texts().next().unwrap();
        assert_eq!(text, "(0.4000, 0.8000)");
        let width = text.len() as Number * RecordingCanvas::CHAR_WIDTH;
        assert_relative_eq!(pos.x, pointer.x - width / 2.0);
        assert_relative_eq!(pos.y, pointer.y - COORDS_DISPLAY_OFFSET);
    }

    #[test]
    fn readout_suppressed() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let mut canvas = RecordingCanvas::default();
        render_coordinate_readout(&mut canvas, &cam, Point::new(5.0, 5.0), true);
        assert!(canvas.calls.is_empty());
    }
}
