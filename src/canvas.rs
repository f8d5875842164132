// SPDX: CC0-1.0

//! Drawing seam between the renderers and whatever rasterizes their output.
//!
//! All coordinates handed to a [`Canvas`] are screen pixels; renderers do
//! their own camera transforms first.

use crate::{transform::Camera, Number, Point};

pub use kurbo::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

pub trait Canvas {
    fn line(&mut self, from: Point<Number>, to: Point<Number>, thickness: Number, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, thickness: Number, color: Rgba);

    /// Draws `text` with its top-left corner at `pos`.
    fn text(&mut self, text: &str, pos: Point<Number>, size: Number, color: Rgba);

    /// Rendered width and height of `text` at font `size`.
    fn measure_text(&self, text: &str, size: Number) -> Point<Number>;
}

/// Draws world-space geometry through a camera onto a screen-space canvas.
#[derive(Debug)]
pub struct InCamera<'a, C: ?Sized> {
    canvas: &'a mut C,
    camera: &'a Camera,
}

impl<'a, C: Canvas + ?Sized> InCamera<'a, C> {
    pub fn new(canvas: &'a mut C, camera: &'a Camera) -> Self {
        Self { canvas, camera }
    }

    /// `thickness` is in world units, so it shrinks on screen as zoom grows.
    pub fn line(&mut self, from: Point<Number>, to: Point<Number>, thickness: Number, color: Rgba) {
        self.canvas.line(
            self.camera.world_to_screen(from),
            self.camera.world_to_screen(to),
            thickness * self.camera.zoom,
            color,
        );
    }
}
