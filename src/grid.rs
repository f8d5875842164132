// SPDX: CC0-1.0

//! Infinite grid with zoom-dependent line spacing, and its axis labels.

use crate::{
    canvas::{Canvas, InCamera},
    config::{
        COLOR_BRIGHT_WHITE, GRID_AXIS_EPSILON, GRID_INITIAL_SPACING, GRID_LABEL_CLAMP_OFFSET,
        GRID_LABEL_OFFSET, GRID_LABEL_SIZE, GRID_MAJOR_OPACITY, GRID_MAJOR_STEP,
        GRID_MAX_SPACING, GRID_MINOR_OPACITY, GRID_MIN_SPACING, GRID_RENDER_BUFFER,
    },
    transform::{world_to_math, Camera},
    Number, Point, Screen,
};

/// Picks the world-space line spacing for `zoom`.
///
/// Starting from [`GRID_INITIAL_SPACING`] the spacing is doubled or halved
/// until its on-screen size lands in
/// [`GRID_MIN_SPACING`]..=[`GRID_MAX_SPACING`]. The result depends on nothing
/// but `zoom`.
pub fn compute_grid_spacing(zoom: Number) -> Number {
    spacing_within(zoom, GRID_INITIAL_SPACING, GRID_MIN_SPACING, GRID_MAX_SPACING)
}

fn spacing_within(zoom: Number, initial: Number, min: Number, max: Number) -> Number {
    if !(zoom.is_finite() && zoom > 0.0) {
        return initial;
    }
    let mut spacing = initial;
    while spacing * zoom < min {
        spacing *= 2.0;
    }
    while spacing * zoom > max {
        spacing /= 2.0;
    }
    spacing
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Axis,
    Major,
    Minor,
}

impl LineKind {
    pub const fn opacity(&self) -> u8 {
        match self {
            Self::Axis => u8::MAX,
            Self::Major => GRID_MAJOR_OPACITY,
            Self::Minor => GRID_MINOR_OPACITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub index: i64,
    /// World coordinate along the axis the line crosses.
    pub pos: Number,
    pub kind: LineKind,
}

impl GridLine {
    fn new(index: i64, spacing: Number) -> Self {
        let pos = index as Number * spacing;
        let kind = if pos.abs() < GRID_AXIS_EPSILON {
            LineKind::Axis
        } else if (pos / spacing).round() as i64 % GRID_MAJOR_STEP == 0 {
            LineKind::Major
        } else {
            LineKind::Minor
        };
        Self { index, pos, kind }
    }

    pub fn is_labeled(&self) -> bool {
        self.kind == LineKind::Major
    }
}

/// Lines covering `min..=max`, plus `buffer` extra lines on each side.
pub fn grid_lines(
    min: Number,
    max: Number,
    spacing: Number,
    buffer: Number,
) -> impl Iterator<Item = GridLine> {
    let first = ((min / spacing).floor() - buffer) as i64;
    let last = ((max / spacing).ceil() + buffer) as i64;
    (first..=last).map(move |i| GridLine::new(i, spacing))
}

pub fn render_grid<C: Canvas + ?Sized>(
    canvas: &mut C,
    camera: &Camera,
    screen: Screen,
    spacing: Number,
) {
    let view = camera.view(screen);
    let thickness = 1.0 / camera.zoom;
    let mut world = InCamera::new(canvas, camera);

    for line in grid_lines(view.min.x, view.max.x, spacing, GRID_RENDER_BUFFER) {
        let color = COLOR_BRIGHT_WHITE.with_alpha(line.kind.opacity());
        world.line(
            Point::new(line.pos, view.min.y),
            Point::new(line.pos, view.max.y),
            thickness,
            color,
        );
    }

    for line in grid_lines(view.min.y, view.max.y, spacing, GRID_RENDER_BUFFER) {
        let color = COLOR_BRIGHT_WHITE.with_alpha(line.kind.opacity());
        world.line(
            Point::new(view.min.x, line.pos),
            Point::new(view.max.x, line.pos),
            thickness,
            color,
        );
    }
}

// unlike Number::clamp, doesn't panic when the screen is too small for the
// bounds to be ordered
fn clamp(val: Number, lo: Number, hi: Number) -> Number {
    val.max(lo).min(hi)
}

/// Screen y of the x-axis label row, kept clear of the top and bottom edges.
fn label_row_y(origin_y: Number, text_height: Number, screen: Screen) -> Number {
    clamp(
        origin_y,
        GRID_LABEL_CLAMP_OFFSET - GRID_LABEL_OFFSET,
        screen.height - text_height - GRID_LABEL_CLAMP_OFFSET,
    )
}

/// Screen x of the y-axis label column, kept clear of the left and right edges.
fn label_column_x(origin_x: Number, text_width: Number, screen: Screen) -> Number {
    clamp(
        origin_x,
        GRID_LABEL_CLAMP_OFFSET + text_width + GRID_LABEL_OFFSET,
        screen.width + GRID_LABEL_OFFSET - GRID_LABEL_CLAMP_OFFSET,
    )
}

pub fn render_grid_labels<C: Canvas + ?Sized>(
    canvas: &mut C,
    camera: &Camera,
    screen: Screen,
    spacing: Number,
) {
    let view = camera.view(screen);
    let origin = camera.world_to_screen(Point::ZERO);

    // origin label, drawn once where both axes meet
    let zero = "0";
    let zero_size = canvas.measure_text(zero, GRID_LABEL_SIZE);
    let zero_x = label_column_x(origin.x, zero_size.x, screen);
    let zero_y = label_row_y(origin.y, zero_size.y, screen);
    canvas.text(
        zero,
        Point::new(zero_x - zero_size.x - GRID_LABEL_OFFSET, zero_y + GRID_LABEL_OFFSET),
        GRID_LABEL_SIZE,
        COLOR_BRIGHT_WHITE,
    );

    for line in grid_lines(view.min.x, view.max.x, spacing, 0.0).filter(GridLine::is_labeled) {
        let pos = camera.world_to_screen(Point::new(line.pos, 0.0));
        let text = format_label(world_to_math(line.pos));
        let size = canvas.measure_text(&text, GRID_LABEL_SIZE);
        let y = label_row_y(origin.y, size.y, screen);
        canvas.text(
            &text,
            Point::new(pos.x - size.x / 2.0, y + GRID_LABEL_OFFSET),
            GRID_LABEL_SIZE,
            COLOR_BRIGHT_WHITE,
        );
    }

    for line in grid_lines(view.min.y, view.max.y, spacing, 0.0).filter(GridLine::is_labeled) {
        let pos = camera.world_to_screen(Point::new(0.0, line.pos));
        let text = format_label(world_to_math(-line.pos));
        let size = canvas.measure_text(&text, GRID_LABEL_SIZE);
        let x = label_column_x(origin.x, size.x, screen);
        canvas.text(
            &text,
            Point::new(x - size.x - GRID_LABEL_OFFSET, pos.y - size.y / 2.0),
            GRID_LABEL_SIZE,
            COLOR_BRIGHT_WHITE,
        );
    }
}

/// Compact decimal: six significant digits, no trailing zeros, and
/// scientific notation outside `1e-4..1e6`.
pub fn format_label(val: Number) -> String {
    const SIG: usize = 6;

    if val == 0.0 {
        return String::from("0");
    }
    if !val.is_finite() {
        return val.to_string();
    }

    // rounding to SIG digits first decides the exponent, e.g. 999999.5 -> 1e+06
    let sci = format!("{:.*e}", SIG - 1, val);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= SIG as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exp.unsigned_abs()
        )
    } else {
        let decimals = (SIG as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{val:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::testing::RecordingCanvas,
        config::{DEFAULT_SCREEN, ZOOM_MAX, ZOOM_MIN},
    };
    use approx::assert_relative_eq;

    #[test]
    fn spacing_stays_in_band() {
        let steps = 2000;
        let (lo, hi) = (ZOOM_MIN.ln(), ZOOM_MAX.ln());
        for i in 0..=steps {
            let zoom = (lo + (hi - lo) * i as Number / steps as Number).exp();
            let spacing = compute_grid_spacing(zoom);
            let on_screen = spacing * zoom;
            assert!(
                (GRID_MIN_SPACING..=GRID_MAX_SPACING).contains(&on_screen),
                "zoom {zoom}: {on_screen}px"
            );

            let ratio = (spacing / GRID_INITIAL_SPACING).log2();
            assert_relative_eq!(ratio, ratio.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn spacing_at_rest() {
        assert_eq!(compute_grid_spacing(1.0), GRID_INITIAL_SPACING);
        assert_eq!(compute_grid_spacing(0.5), 100.0);
        assert_eq!(compute_grid_spacing(2.0), 25.0);
        assert_eq!(compute_grid_spacing(f64::NAN), GRID_INITIAL_SPACING);
    }

    #[test]
    fn spacing_is_reproducible() {
        let zoom = 13.7;
        let a = compute_grid_spacing(zoom);
        let b = compute_grid_spacing(zoom);
        assert_eq!(a, b);
    }

    #[test]
    fn lines_classified() {
        let lines: Vec<_> = grid_lines(-120.0, 260.0, 50.0, 0.0).collect();
        assert_eq!(lines.first().map(|l| l.index), Some(-3));
        assert_eq!(lines.last().map(|l| l.index), Some(6));

        for line in &lines {
            let expected = match line.index {
                0 => LineKind::Axis,
                5 => LineKind::Major,
                _ => LineKind::Minor,
            };
            assert_eq!(line.kind, expected, "line {}", line.index);
        }
        assert!(!lines.iter().any(|l| l.index == -5));

        let negative: Vec<_> = grid_lines(-260.0, -240.0, 50.0, 0.0).collect();
        assert!(negative
            .iter()
            .any(|l| l.index == -5 && l.kind == LineKind::Major));
    }

    #[test]
    fn buffer_extends_range() {
        let plain = grid_lines(-100.0, 100.0, 50.0, 0.0).count();
        let buffered = grid_lines(-100.0, 100.0, 50.0, GRID_RENDER_BUFFER).count();
        assert_eq!(buffered, plain + 4);
    }

    #[test]
    fn axis_lines_are_opaque() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let mut canvas = RecordingCanvas::default();
        render_grid(&mut canvas, &cam, DEFAULT_SCREEN, compute_grid_spacing(cam.zoom));

        let axes: Vec<_> = canvas.lines().filter(|(_, _, c)| c.a == u8::MAX).collect();
        assert_eq!(axes.len(), 2);

        // vertical axis spans the screen top to bottom
        let (from, to, _) = axes[0];
        assert_relative_eq!(from.x, 640.0);
        assert_relative_eq!(from.y, 0.0);
        assert_relative_eq!(to.y, DEFAULT_SCREEN.height);

        // horizontal axis spans the screen left to right
        let (from, to, _) = axes[1];
        assert_relative_eq!(from.y, 360.0);
        assert_relative_eq!(from.x, 0.0);
        assert_relative_eq!(to.x, DEFAULT_SCREEN.width);
    }

    #[test]
    fn grid_lines_are_one_pixel_at_any_zoom() {
        let mut cam = Camera::new(DEFAULT_SCREEN);
        cam.zoom = 37.0;
        let mut canvas = RecordingCanvas::default();
        render_grid(&mut canvas, &cam, DEFAULT_SCREEN, compute_grid_spacing(cam.zoom));
        assert!(canvas.calls.iter().all(|c| match c {
            crate::canvas::testing::Call::Line { thickness, .. } => (thickness - 1.0).abs() < 1e-9,
            _ => true,
        }));
    }

    #[test]
    fn default_labels() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let mut canvas = RecordingCanvas::default();
        render_grid_labels(&mut canvas, &cam, DEFAULT_SCREEN, compute_grid_spacing(cam.zoom));

        let texts: Vec<_> = canvas.texts().map(|(t, _)| t.to_string()).collect();
        assert_eq!(texts, ["0", "-4", "-2", "2", "4", "2", "-2"]);

        // the origin label sits below-left of the origin
        let (_, pos) = canvas.texts().next().unwrap();
        assert_relative_eq!(pos.x, 640.0 - RecordingCanvas::CHAR_WIDTH - GRID_LABEL_OFFSET);
        assert_relative_eq!(pos.y, 360.0 + GRID_LABEL_OFFSET);

        // "2" on the x axis is centred on its grid line, 250px right of the origin
        let (_, pos) = canvas.texts().find(|(t, _)| *t == "2").unwrap();
        assert_relative_eq!(pos.x, 890.0 - RecordingCanvas::CHAR_WIDTH / 2.0);
    }

    #[test]
    fn labels_stick_to_screen_edges() {
        let mut cam = Camera::new(DEFAULT_SCREEN);
        // origin far below and to the left of the screen
        cam.target = Point::new(2000.0, -3000.0);
        let mut canvas = RecordingCanvas::default();
        render_grid_labels(&mut canvas, &cam, DEFAULT_SCREEN, compute_grid_spacing(cam.zoom));

        let (text, pos) = canvas.texts().next().unwrap();
        assert_eq!(text, "0");
        assert_relative_eq!(pos.x, GRID_LABEL_CLAMP_OFFSET);
        assert_relative_eq!(
            pos.y,
            DEFAULT_SCREEN.height - GRID_LABEL_SIZE - GRID_LABEL_CLAMP_OFFSET + GRID_LABEL_OFFSET
        );

        for (text, pos) in canvas.texts() {
            assert!(pos.x >= 0.0, "{text} clipped at {pos}");
            assert!(pos.y + GRID_LABEL_SIZE <= DEFAULT_SCREEN.height, "{text} clipped at {pos}");
        }
    }

    #[test]
    fn labels_formatted_compactly() {
        assert_eq!(format_label(0.0), "0");
        assert_eq!(format_label(2.0), "2");
        assert_eq!(format_label(-0.4), "-0.4");
        assert_eq!(format_label(1.9999999999), "2");
        assert_eq!(format_label(0.1 + 0.2), "0.3");
        assert_eq!(format_label(123456.0), "123456");
        assert_eq!(format_label(1234567.0), "1.23457e+06");
        assert_eq!(format_label(0.0001), "0.0001");
        assert_eq!(format_label(2f64.powi(-16)), "1.52588e-05");
        assert_eq!(format_label(-2.5e-7), "-2.5e-07");
    }
}
