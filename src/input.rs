// SPDX: CC0-1.0

use crate::{Number, Point};

/// Everything the per-frame logic reads from the input devices.
///
/// "Held" fields are level-triggered, "pressed" fields are true only on the
/// frame the press happened.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Screen position of the pointer, the last known one if it left the
    /// window.
    pub pointer: Point<Number>,
    /// Whether the pointer is inside the window.
    pub hovering: bool,
    /// Pointer motion since the previous frame, in screen pixels.
    pub pointer_delta: Point<Number>,
    pub primary_held: bool,
    pub primary_pressed: bool,
    /// Wheel notches, positive away from the user.
    pub scroll: Number,
    pub keys: Keys,
    pub close_requested: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub reset_pressed: bool,
}

impl Keys {
    /// Pan direction of the held arrow keys, each axis in -1..=1.
    ///
    /// Points the way the view content moves, so "up" yields +y.
    pub fn pan_vector(&self) -> Point<Number> {
        let mut v = Point::ZERO;
        if self.up {
            v.y = 1.0;
        }
        if self.down {
            v.y = -1.0;
        }
        if self.left {
            v.x = 1.0;
        }
        if self.right {
            v.x = -1.0;
        }
        v
    }

    /// -1, 0 or 1. Zooming in wins if both keys are held.
    pub fn zoom_direction(&self) -> Number {
        if self.zoom_in {
            1.0
        } else if self.zoom_out {
            -1.0
        } else {
            0.0
        }
    }
}
