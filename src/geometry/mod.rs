//! Plane geometry shared by strokes, the engine and the renderers.
//!
//! All functions are total: degenerate input (coincident points, zero
//! radius, zero sides) yields a degenerate but valid result.

pub mod path;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub use path::{PathCommand, SmoothPath, quadratic_smooth_path};

/// A point in display space while drawing, or image space after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Componentwise scale, used when mapping display space to image space.
    pub fn scaled(self, scale_x: f32, scale_y: f32) -> Self {
        Self::new(self.x * scale_x, self.y * scale_y)
    }
}

impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<Point> for egui::Pos2 {
    fn from(point: Point) -> Self {
        egui::pos2(point.x, point.y)
    }
}

/// Integer pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn is_portrait(&self) -> bool {
        self.width < self.height
    }
}

/// Extent of the on-screen drawing surface, in the same unrounded units the
/// strokes are recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

impl From<Size> for DisplaySize {
    fn from(size: Size) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

impl From<egui::Vec2> for DisplaySize {
    fn from(size: egui::Vec2) -> Self {
        Self::new(size.x, size.y)
    }
}

/// Euclidean distance. Evaluated in `f64` so that long drags stay exact
/// enough for pixel-aligned export.
pub fn distance(a: Point, b: Point) -> f32 {
    let dy = f64::from(a.y) - f64::from(b.y);
    let dx = f64::from(b.x) - f64::from(a.x);
    (dy * dy + dx * dx).sqrt() as f32
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Returns `(top_left, bottom_right)` for a rectangle given by two diagonal
/// corners.
///
/// Equal coordinates take the `else` branch on each axis, so the result is
/// stable while a drag passes through a tie.
pub fn normalize_rect(d1: Point, d2: Point) -> (Point, Point) {
    let (x1, y1, x2, y2) = (d1.x, d1.y, d2.x, d2.y);
    if y2 > y1 {
        if x2 > x1 {
            (Point::new(x1, y1), Point::new(x2, y2))
        } else {
            (Point::new(x2, y1), Point::new(x1, y2))
        }
    } else if x2 > x1 {
        (Point::new(x1, y2), Point::new(x2, y1))
    } else {
        (Point::new(x2, y2), Point::new(x1, y1))
    }
}

/// Vertices of a regular polygon, starting at angle zero and winding with
/// increasing angle.
///
/// `sides == 0` yields no vertices; callers that need a drawable shape must
/// ask for at least three.
pub fn regular_polygon_vertices(radius: f32, center: Point, sides: u32) -> Vec<Point> {
    let (cx, cy) = (f64::from(center.x), f64::from(center.y));
    let radius = f64::from(radius);
    let n = f64::from(sides);
    (0..sides)
        .map(|i| {
            let angle = 2.0 * PI * f64::from(i) / n;
            Point::new(
                (cx + radius * angle.cos()) as f32,
                (cy + radius * angle.sin()) as f32,
            )
        })
        .collect()
}
