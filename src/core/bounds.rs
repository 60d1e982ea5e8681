//! Screen geometry: node bounds, screen rectangle, and tap points.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BOUNDS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(-?\d+),(-?\d+)\]\[(-?\d+),(-?\d+)\]$").expect("bounds regex must compile")
});

/// A pixel point on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Device screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The rectangle occupied by a node, as written in `[left,top][right,bottom]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Parses the exact `[L,T][R,B]` form. Whitespace, `+` signs and anything that
    /// overflows `i32` are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = BOUNDS_PATTERN.captures(raw)?;
        let coord = |group: usize| -> Option<i32> { captures.get(group)?.as_str().parse().ok() };
        Some(Self::new(coord(1)?, coord(2)?, coord(3)?, coord(4)?))
    }

    /// Center point using floor division.
    pub fn center(&self) -> Point {
        let x = (i64::from(self.left) + i64::from(self.right)).div_euclid(2);
        let y = (i64::from(self.top) + i64::from(self.bottom)).div_euclid(2);
        // The midpoint of two i32 values always fits in i32.
        Point::new(x as i32, y as i32)
    }

    /// Whether any part of the rectangle lands inside `[0,W) x [0,H)`.
    ///
    /// Edges are exclusive: a node whose right edge is at 0, or whose left edge is
    /// at the screen width, covers no on-screen pixel.
    pub fn is_visible_in(&self, screen: Screen) -> bool {
        let width = i64::from(screen.width);
        let height = i64::from(screen.height);
        let off_screen = self.right <= 0
            || i64::from(self.left) >= width
            || self.bottom <= 0
            || i64::from(self.top) >= height;
        !off_screen
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}][{},{}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoundsError(String);

impl fmt::Display for ParseBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bounds: {:?}", self.0)
    }
}

impl std::error::Error for ParseBoundsError {}

impl FromStr for Bounds {
    type Err = ParseBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseBoundsError(s.to_string()))
    }
}
