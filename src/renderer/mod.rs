//! Turns strokes into primitive draw calls.
//!
//! A host implements [`StrokeCanvas`] for whatever it paints on. Two
//! implementations ship with the crate: [`painter::PainterCanvas`] for
//! interactive rendering through `egui`, and [`pixmap::PixmapCanvas`] for
//! offscreen rasterization during export.

pub mod painter;
pub mod pixmap;

use crate::geometry::{self, Point, SmoothPath, quadratic_smooth_path};
use crate::stroke::Stroke;

pub use painter::PainterCanvas;
pub use pixmap::{PixmapCanvas, rasterize};

/// Outline-only paint with round joins and caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePaint {
    /// Straight RGBA, opacity already folded into alpha
    pub rgba: [u8; 4],
    pub width: f32,
}

impl StrokePaint {
    pub fn for_stroke(stroke: &Stroke) -> Self {
        Self {
            rgba: stroke.style().rgba8(),
            width: stroke.width(),
        }
    }
}

/// Primitive drawing operations a rendering host must provide.
pub trait StrokeCanvas {
    fn stroke_path(&mut self, path: &SmoothPath, paint: &StrokePaint);

    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &StrokePaint);

    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, paint: &StrokePaint);
}

/// A recorded primitive, as produced by the `Vec<DrawCall>` canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Path(SmoothPath, StrokePaint),
    Circle {
        center: Point,
        radius: f32,
        paint: StrokePaint,
    },
    Rect {
        top_left: Point,
        bottom_right: Point,
        paint: StrokePaint,
    },
}

impl StrokeCanvas for Vec<DrawCall> {
    fn stroke_path(&mut self, path: &SmoothPath, paint: &StrokePaint) {
        self.push(DrawCall::Path(path.clone(), *paint));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &StrokePaint) {
        self.push(DrawCall::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, paint: &StrokePaint) {
        self.push(DrawCall::Rect {
            top_left,
            bottom_right,
            paint: *paint,
        });
    }
}

/// Draws one stroke. Paths with fewer than two points draw nothing.
pub fn draw_stroke<C: StrokeCanvas + ?Sized>(canvas: &mut C, stroke: &Stroke) {
    let paint = StrokePaint::for_stroke(stroke);
    match stroke {
        Stroke::Circle {
            diameter_start,
            diameter_end,
            ..
        } => {
            let center = geometry::midpoint(*diameter_start, *diameter_end);
            let radius = geometry::distance(*diameter_start, *diameter_end) / 2.0;
            canvas.stroke_circle(center, radius, &paint);
        }
        Stroke::FreeHand { points, .. } | Stroke::Polygon { points, .. } => {
            let path = quadratic_smooth_path(points);
            if !path.is_empty() {
                canvas.stroke_path(&path, &paint);
            }
        }
        Stroke::Rectangle {
            corner1, corner2, ..
        } => {
            let (top_left, bottom_right) = geometry::normalize_rect(*corner1, *corner2);
            canvas.stroke_rect(top_left, bottom_right, &paint);
        }
    }
}

/// Draws strokes in history order, so later strokes end up on top.
pub fn draw_strokes<C: StrokeCanvas + ?Sized>(canvas: &mut C, strokes: &[Stroke]) {
    for stroke in strokes {
        draw_stroke(canvas, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Argb, StrokeStyle};

    #[test]
    fn test_draw_calls_follow_history_order() {
        let style = StrokeStyle::new(Argb::BLUE, 2.0).with_alpha(0.5);
        let strokes = vec![
            Stroke::rectangle(Point::new(9.0, 9.0), Point::new(1.0, 1.0), style),
            Stroke::free_hand(vec![Point::new(0.0, 0.0)], style),
            Stroke::free_hand(vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)], style),
            Stroke::circle(Point::new(0.0, 0.0), Point::new(0.0, 4.0), style),
        ];
        let mut calls = Vec::new();
        draw_strokes(&mut calls, &strokes);

        let paint = StrokePaint {
            rgba: [0, 0, 255, 128],
            width: 2.0,
        };
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            DrawCall::Rect {
                top_left: Point::new(1.0, 1.0),
                bottom_right: Point::new(9.0, 9.0),
                paint
            }
        );
        assert!(matches!(&calls[1], DrawCall::Path(path, _) if path.segment_count() == 1));
        assert_eq!(
            calls[2],
            DrawCall::Circle {
                center: Point::new(0.0, 2.0),
                radius: 2.0,
                paint
            }
        );
    }
}
