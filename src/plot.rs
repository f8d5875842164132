// SPDX: CC0-1.0

//! Turns a scalar function into a polyline, one sample per screen column.

use crate::{
    canvas::{Canvas, InCamera, Rgba},
    config::{ASYMPTOTE_FACTOR, LINE_THICKNESS},
    eval::{bind, evaluate, Idents, Program},
    stdlib::X,
    transform::{math_to_world, world_to_math, Camera},
    Number, Point, Screen,
};

/// Samples `f` (math x -> math y) across the visible x range and hands each
/// drawable world-space segment to `draw`.
///
/// There is one sample per screen column, so zooming in samples the math
/// space more densely. A non-finite sample breaks the curve. Two finite
/// neighbours are not joined either if they are further apart on screen
/// than [`ASYMPTOTE_FACTOR`] screen heights, which hides the spike of a pole
/// that falls between two columns.
pub fn trace<F, D>(mut f: F, mut draw: D, camera: &Camera, screen: Screen)
where
    F: FnMut(Number) -> Number,
    D: FnMut(Point<Number>, Point<Number>),
{
    let view = camera.view(screen);
    let samples = screen.width.max(1.0).round() as u32;
    let step = view.width() / Number::from(samples);
    let threshold = ASYMPTOTE_FACTOR * screen.height;

    let mut prev: Option<Point<Number>> = None;
    for i in 0..=samples {
        let x_world = view.min.x + step * Number::from(i);
        let y_math = f(world_to_math(x_world));
        if !y_math.is_finite() {
            prev = None;
            continue;
        }

        let cur = Point::new(x_world, -math_to_world(y_math));
        if let Some(prev) = prev {
            let jump = (cur.y - prev.y).abs() * camera.zoom;
            if jump < threshold {
                draw(prev, cur);
            }
        }
        prev = Some(cur);
    }
}

/// Plots a compiled expression, rebinding `x` for every column.
pub fn plot<C: Canvas + ?Sized>(
    canvas: &mut C,
    camera: &Camera,
    screen: Screen,
    prog: &Program,
    idents: &mut Idents,
    color: Rgba,
) {
    let mut stack = Vec::new();
    let mut world = InCamera::new(canvas, camera);
    let thickness = LINE_THICKNESS / camera.zoom;
    trace(
        |x| {
            bind(idents, X, x);
            evaluate(prog, idents, &mut stack)
        },
        |from, to| world.line(from, to, thickness, color),
        camera,
        screen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::testing::{Call, RecordingCanvas},
        config::{COLOR_BRIGHT_RED, DEFAULT_SCREEN},
        parse::compile,
        stdlib::standard_idents,
    };
    use approx::assert_relative_eq;
    use std::sync::Arc;

    type Segment = (Point<Number>, Point<Number>);

    fn segments<F: FnMut(Number) -> Number>(f: F, camera: &Camera) -> Vec<Segment> {
        let mut out = Vec::new();
        trace(f, |a, b| out.push((a, b)), camera, DEFAULT_SCREEN);
        out
    }

    /// Number of separately drawn pieces.
    fn branches(segs: &[Segment]) -> usize {
        if segs.is_empty() {
            return 0;
        }
        1 + segs.windows(2).filter(|w| w[0].1 != w[1].0).count()
    }

    fn crosses_zero(segs: &[Segment]) -> bool {
        segs.iter().any(|(a, b)| a.x < 0.0 && b.x > 0.0)
    }

    #[test]
    fn continuous_function_is_one_piece() {
        let cams = [Camera::new(DEFAULT_SCREEN), {
            let mut cam = Camera::new(DEFAULT_SCREEN);
            cam.zoom = 40.0;
            cam.target = Point::new(12.0, -3.0);
            cam
        }];
        for cam in cams {
            let segs = segments(|x| x * x * 0.01, &cam);
            assert_eq!(segs.len(), DEFAULT_SCREEN.width as usize);
            assert_eq!(branches(&segs), 1);
        }
    }

    #[test]
    fn columns_span_the_view() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let segs = segments(|x| x, &cam);
        let view = cam.view(DEFAULT_SCREEN);
        assert_relative_eq!(segs[0].0.x, view.min.x);
        assert_relative_eq!(segs[segs.len() - 1].1.x, view.max.x, epsilon = 1e-9);
    }

    #[test]
    fn math_y_is_flipped() {
        let cam = Camera::new(DEFAULT_SCREEN);
        // y = 0.4 is one initial spacing above the axis
        let segs = segments(|_| 0.4, &cam);
        assert_relative_eq!(segs[0].0.y, -50.0);
    }

    #[test]
    fn infinite_sample_breaks_curve() {
        // the middle column lands exactly on x = 0
        let cam = Camera::new(DEFAULT_SCREEN);
        let segs = segments(|x| 1.0 / x, &cam);
        assert_eq!(branches(&segs), 2);
        assert!(!crosses_zero(&segs));
        assert!(segs.iter().all(|(a, b)| a.x != 0.0 && b.x != 0.0));
    }

    #[test]
    fn pole_between_columns_is_not_bridged() {
        // shift by half a column so no sample hits x = 0
        let mut cam = Camera::new(DEFAULT_SCREEN);
        cam.target.x = 0.5;
        let segs = segments(|x| 1.0 / x, &cam);
        assert_eq!(branches(&segs), 2);
        assert!(!crosses_zero(&segs));
    }

    #[test]
    fn steep_but_finite_jumps_are_kept() {
        // tanh(50x) jumps from -1 to 1 within a couple of columns
        let cam = Camera::new(DEFAULT_SCREEN);
        let segs = segments(|x| (50.0 * x).tanh(), &cam);
        assert_eq!(branches(&segs), 1);
    }

    #[test]
    fn nan_region_is_skipped() {
        let cam = Camera::new(DEFAULT_SCREEN);
        let segs = segments(|x| x.sqrt(), &cam);
        assert_eq!(branches(&segs), 1);
        assert!(segs.iter().all(|(a, _)| a.x >= 0.0));
    }

    #[test]
    fn nothing_valid_draws_nothing() {
        let cam = Camera::new(DEFAULT_SCREEN);
        assert!(segments(|_| Number::NAN, &cam).is_empty());
    }

    #[test]
    fn plotted_stroke_keeps_screen_width() {
        let mut idents = standard_idents();
        let prog = compile(&Arc::new(String::from("sin(x)")), &mut idents).unwrap();
        for zoom in [0.01, 1.0, 250.0] {
            let mut cam = Camera::new(DEFAULT_SCREEN);
            cam.zoom = zoom;
            let mut canvas = RecordingCanvas::default();
            plot(&mut canvas, &cam, DEFAULT_SCREEN, &prog, &mut idents, COLOR_BRIGHT_RED);

            assert!(!canvas.calls.is_empty());
            for call in &canvas.calls {
                let Call::Line { thickness, color, .. } = call else {
                    panic!("unexpected {call:?}");
                };
                assert_relative_eq!(*thickness, LINE_THICKNESS, max_relative = 1e-12);
                assert_eq!(*color, COLOR_BRIGHT_RED);
            }
        }
    }

    #[test]
    fn plot_of_reciprocal_has_two_branches_on_screen() {
        let mut idents = standard_idents();
        let prog = compile(&Arc::new(String::from("1/x")), &mut idents).unwrap();
        let cam = Camera::new(DEFAULT_SCREEN);
        let mut canvas = RecordingCanvas::default();
        plot(&mut canvas, &cam, DEFAULT_SCREEN, &prog, &mut idents, COLOR_BRIGHT_RED);

        let segs: Vec<_> = canvas.lines().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(branches(&segs), 2);
        // the gap sits on the y axis, at screen x = 640
        assert!(!segs.iter().any(|(a, b)| a.x < 640.0 && b.x > 640.0));
    }
}
