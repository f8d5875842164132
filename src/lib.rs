// SPDX: CC0-1.0

pub mod app;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod eval;
pub mod grid;
pub mod input;
pub mod lex;
pub mod overlay;
pub mod parse;
pub mod plot;
pub mod session;
pub mod stdlib;
pub mod transform;

use core::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

pub type Number = f64;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<Number> {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn scale(self, by: Number) -> Self {
        Self::new(self.x * by, self.y * by)
    }
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Point<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Point<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Point<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Point<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point<Number>> for kurbo::Point {
    fn from(p: Point<Number>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point<Number> {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Size of the drawable area in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: Number,
    pub height: Number,
}

impl Screen {
    #[inline]
    pub const fn new(width: Number, height: Number) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point<Number> {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn corner(&self) -> Point<Number> {
        Point::new(self.width, self.height)
    }
}
