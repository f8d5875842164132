// SPDX: CC0-1.0

//! Conversions between the three coordinate spaces.
//!
//! - screen: device pixels, origin top-left, y down
//! - world: screen space with the camera's pan and zoom undone, y down
//! - math: evaluator units, a fixed scale of world space with y up
//!
//! Everything here is pure. The camera's rotation is carried for
//! completeness but is always zero, so the transforms are axis-aligned.

use crate::{
    config::{
        CAMERA_INITIAL_ROTATION, CAMERA_INITIAL_TARGET, CAMERA_INITIAL_ZOOM,
        GRID_INITIAL_SPACING, GRID_UNITS_PER_SPACING,
    },
    Number, Point, Screen,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub zoom: Number,
    pub rotation: Number,
    /// World point drawn at `offset`.
    pub target: Point<Number>,
    /// Screen point that `target` maps to.
    pub offset: Point<Number>,
}

impl Camera {
    /// Default camera for a screen: origin in the middle, zoom 1.
    pub fn new(screen: Screen) -> Self {
        Self {
            zoom: CAMERA_INITIAL_ZOOM,
            rotation: CAMERA_INITIAL_ROTATION,
            target: CAMERA_INITIAL_TARGET,
            offset: screen.center(),
        }
    }

    pub fn screen_to_world(&self, p: Point<Number>) -> Point<Number> {
        (p - self.offset) / self.zoom + self.target
    }

    pub fn world_to_screen(&self, p: Point<Number>) -> Point<Number> {
        (p - self.target) * self.zoom + self.offset
    }

    /// Moves the anchor to `screen_pos` without moving anything on screen.
    pub fn anchor_at(&mut self, screen_pos: Point<Number>) {
        self.target = self.screen_to_world(screen_pos);
        self.offset = screen_pos;
    }

    pub fn view(&self, screen: Screen) -> ViewContext {
        ViewContext {
            min: self.screen_to_world(Point::ZERO),
            max: self.screen_to_world(screen.corner()),
        }
    }
}

/// World-space corners of the visible area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewContext {
    /// top-left
    pub min: Point<Number>,
    /// bottom-right
    pub max: Point<Number>,
}

impl ViewContext {
    pub fn width(&self) -> Number {
        self.max.x - self.min.x
    }
}

#[inline]
pub fn world_to_math(px: Number) -> Number {
    px / GRID_INITIAL_SPACING * GRID_UNITS_PER_SPACING
}

#[inline]
pub fn math_to_world(math: Number) -> Number {
    math / GRID_UNITS_PER_SPACING * GRID_INITIAL_SPACING
}

/// Flips y, since math y grows upwards.
pub fn world_to_math_point(p: Point<Number>) -> Point<Number> {
    Point::new(world_to_math(p.x), world_to_math(-p.y))
}

pub fn math_to_world_point(p: Point<Number>) -> Point<Number> {
    Point::new(math_to_world(p.x), -math_to_world(p.y))
}
