use crate::geometry::{self, Point};
use serde::{Deserialize, Serialize};

/// A color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const TRANSPARENT: Self = Self(0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Straight (non-premultiplied) RGBA with the color's own alpha
    /// multiplied by `opacity`.
    pub fn to_rgba8(self, opacity: f32) -> [u8; 4] {
        let a = (f32::from(self.alpha()) * opacity.clamp(0.0, 1.0)).round() as u8;
        [self.red(), self.green(), self.blue(), a]
    }
}

impl From<egui::Color32> for Argb {
    fn from(color: egui::Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::from_argb(a, r, g, b)
    }
}

/// Color, thickness and opacity shared by every stroke kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Argb,
    pub width: f32,
    /// Opacity in `0.0..=1.0`, applied on top of the color's own alpha.
    #[serde(default = "opaque")]
    pub alpha: f32,
}

fn opaque() -> f32 {
    1.0
}

impl StrokeStyle {
    pub fn new(color: Argb, width: f32) -> Self {
        Self {
            color,
            width,
            alpha: opaque(),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn rgba8(&self) -> [u8; 4] {
        self.color.to_rgba8(self.alpha)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Argb::RED, 5.0)
    }
}

/// One annotation shape.
///
/// Polygon points are stored closed (last point equals the first). Closing
/// happens in [`Stroke::polygon`] only; deserialising or transforming an
/// existing polygon keeps its point list as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stroke {
    FreeHand {
        points: Vec<Point>,
        style: StrokeStyle,
    },
    Polygon {
        points: Vec<Point>,
        style: StrokeStyle,
    },
    Rectangle {
        corner1: Point,
        corner2: Point,
        style: StrokeStyle,
    },
    Circle {
        diameter_start: Point,
        diameter_end: Point,
        style: StrokeStyle,
    },
}

impl Stroke {
    pub fn free_hand(points: Vec<Point>, style: StrokeStyle) -> Self {
        Self::FreeHand { points, style }
    }

    /// Builds a polygon from its open vertex list, appending the first vertex
    /// again to close the outline. An empty vertex list stays empty.
    pub fn polygon(mut vertices: Vec<Point>, style: StrokeStyle) -> Self {
        if let Some(&first) = vertices.first() {
            vertices.push(first);
        }
        Self::Polygon {
            points: vertices,
            style,
        }
    }

    pub fn rectangle(corner1: Point, corner2: Point, style: StrokeStyle) -> Self {
        Self::Rectangle {
            corner1,
            corner2,
            style,
        }
    }

    pub fn circle(diameter_start: Point, diameter_end: Point, style: StrokeStyle) -> Self {
        Self::Circle {
            diameter_start,
            diameter_end,
            style,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::FreeHand { .. } => "free_hand",
            Self::Polygon { .. } => "polygon",
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        match self {
            Self::FreeHand { style, .. }
            | Self::Polygon { style, .. }
            | Self::Rectangle { style, .. }
            | Self::Circle { style, .. } => style,
        }
    }

    pub fn color(&self) -> Argb {
        self.style().color
    }

    pub fn width(&self) -> f32 {
        self.style().width
    }

    pub fn alpha(&self) -> f32 {
        self.style().alpha
    }

    /// Center of a circle stroke.
    pub fn center(&self) -> Option<Point> {
        match self {
            Self::Circle {
                diameter_start,
                diameter_end,
                ..
            } => Some(geometry::midpoint(*diameter_start, *diameter_end)),
            _ => None,
        }
    }

    /// Radius of a circle stroke: half the diameter points' distance.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Self::Circle {
                diameter_start,
                diameter_end,
                ..
            } => Some(geometry::distance(*diameter_start, *diameter_end) / 2.0),
            _ => None,
        }
    }

    /// Normalized `(top_left, bottom_right)` of a rectangle stroke.
    pub fn rect_corners(&self) -> Option<(Point, Point)> {
        match self {
            Self::Rectangle {
                corner1, corner2, ..
            } => Some(geometry::normalize_rect(*corner1, *corner2)),
            _ => None,
        }
    }

    /// Path vertices of freehand and polygon strokes.
    pub fn path_points(&self) -> Option<&[Point]> {
        match self {
            Self::FreeHand { points, .. } | Self::Polygon { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Returns a copy with every point passed through `f`. Style and the
    /// stored polygon closure are carried over unchanged.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        match self {
            Self::FreeHand { points, style } => Self::FreeHand {
                points: points.iter().copied().map(&mut f).collect(),
                style: *style,
            },
            Self::Polygon { points, style } => Self::Polygon {
                points: points.iter().copied().map(&mut f).collect(),
                style: *style,
            },
            Self::Rectangle {
                corner1,
                corner2,
                style,
            } => Self::Rectangle {
                corner1: f(*corner1),
                corner2: f(*corner2),
                style: *style,
            },
            Self::Circle {
                diameter_start,
                diameter_end,
                style,
            } => Self::Circle {
                diameter_start: f(*diameter_start),
                diameter_end: f(*diameter_end),
                style: *style,
            },
        }
    }
}
