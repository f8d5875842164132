// SPDX: CC0-1.0

use crate::{canvas::Rgba, Number, Point, Screen};

// window
pub const TITLE: &str = "Graphing Calculator";
pub const WIDTH: Number = 1280.0;
pub const HEIGHT: Number = 720.0;
pub const FPS: u32 = 60;
pub const DEFAULT_SCREEN: Screen = Screen::new(WIDTH, HEIGHT);

// camera
pub const CAMERA_INITIAL_ZOOM: Number = 1.0;
pub const CAMERA_INITIAL_ROTATION: Number = 0.0;
pub const CAMERA_INITIAL_TARGET: Point<Number> = Point::new(0.0, 0.0);

// pan
pub const PAN_SENSITIVITY: Number = 1.0;
pub const PAN_SHORTCUT_SENSITIVITY: Number = 10.0;

// zoom
pub const ZOOM_SENSITIVITY: Number = 0.15;
pub const ZOOM_SHORTCUT_SENSITIVITY: Number = 0.08;
pub const ZOOM_MIN: Number = 0.001;
pub const ZOOM_MAX: Number = 1000.0;

// grid, spacings in screen pixels
pub const GRID_INITIAL_SPACING: Number = 50.0;
pub const GRID_MIN_SPACING: Number = 30.0;
pub const GRID_MAX_SPACING: Number = 70.0;
pub const GRID_UNITS_PER_SPACING: Number = 0.4; // math units per initial spacing
pub const GRID_MAJOR_STEP: i64 = 5;
pub const GRID_MINOR_OPACITY: u8 = 51; // 20%
pub const GRID_MAJOR_OPACITY: u8 = 153; // 60%
pub const GRID_RENDER_BUFFER: Number = 2.0;
pub const GRID_AXIS_EPSILON: Number = 0.001;

// grid labels
pub const GRID_LABEL_SIZE: Number = 20.0;
pub const GRID_LABEL_OFFSET: Number = 5.0;
pub const GRID_LABEL_CLAMP_OFFSET: Number = 10.0;

// plotting
pub const ASYMPTOTE_FACTOR: Number = 2.0; // times screen height
pub const LINE_THICKNESS: Number = 2.0;

// legend
pub const LEGEND_SPACING: Number = 10.0;
pub const LEGEND_ELEM_SIZE: Number = 20.0;
pub const LEGEND_OPACITY: u8 = 200;
pub const LEGEND_RECT_THICKNESS: Number = 2.0;

// coordinate readout
pub const COORDS_DISPLAY_SIZE: Number = 20.0;
pub const COORDS_DISPLAY_OFFSET: Number = 25.0;

// gruvbox dark
pub const COLOR_BRIGHT_BLACK: Rgba = Rgba::new(146, 131, 116, 255);
pub const COLOR_BRIGHT_BLUE: Rgba = Rgba::new(131, 165, 152, 255);
pub const COLOR_BRIGHT_CYAN: Rgba = Rgba::new(142, 192, 124, 255);
pub const COLOR_BRIGHT_GREEN: Rgba = Rgba::new(184, 187, 38, 255);
pub const COLOR_BRIGHT_PURPLE: Rgba = Rgba::new(211, 134, 155, 255);
pub const COLOR_BRIGHT_RED: Rgba = Rgba::new(251, 73, 52, 255);
pub const COLOR_BRIGHT_WHITE: Rgba = Rgba::new(235, 219, 178, 255);
pub const COLOR_BRIGHT_YELLOW: Rgba = Rgba::new(250, 189, 47, 255);
pub const COLOR_BLACK: Rgba = Rgba::new(40, 40, 40, 255);

/// Curve colours, assigned to expressions by input position and repeating
/// past the end.
pub const PLOT_PALETTE: [Rgba; 6] = [
    COLOR_BRIGHT_RED,
    COLOR_BRIGHT_BLUE,
    COLOR_BRIGHT_GREEN,
    COLOR_BRIGHT_YELLOW,
    COLOR_BRIGHT_PURPLE,
    COLOR_BRIGHT_CYAN,
];

pub const fn plot_color(idx: usize) -> Rgba {
    PLOT_PALETTE[idx % PLOT_PALETTE.len()]
}
