//! Layout geometry
//!
//! Signed integers throughout: remaining space inside a container can go
//! negative when its children ask for more than was offered.

use core::ops::{Add, Sub};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if neither dimension exceeds `other`
    pub fn fits_within(self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// Absolute position on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point moved by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Box edges in (left, top, right, bottom) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Edges {
    pub const ZERO: Edges = Edges::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same value on every side
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// left + right
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// top + bottom
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
