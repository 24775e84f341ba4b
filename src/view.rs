//! Pan and zoom of the annotation surface.
//!
//! Strokes always live in display space, the unzoomed coordinates of the
//! surface. The view only changes where that space lands on screen.

use crate::config::AnnotatorConfig;
use crate::geometry::Point;
use egui::{Pos2, Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        let config = AnnotatorConfig::default();
        Self::new(config.min_zoom, config.max_zoom)
    }
}

impl ViewTransform {
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        let min_zoom = min_zoom.max(f32::EPSILON);
        Self {
            scale: 1.0_f32.clamp(min_zoom, max_zoom.max(min_zoom)),
            offset: Vec2::ZERO,
            min_zoom,
            max_zoom: max_zoom.max(min_zoom),
        }
    }

    pub fn from_config(config: &AnnotatorConfig) -> Self {
        Self::new(config.min_zoom, config.max_zoom)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Multiplies the zoom by `factor`, keeping it within the configured
    /// limits and the pan within the new bounds.
    pub fn apply_zoom(&mut self, factor: f32, surface: Vec2) {
        self.scale = (self.scale * factor).clamp(self.min_zoom, self.max_zoom);
        self.offset = self.clamp_offset(self.offset, surface);
    }

    /// Moves the view by a screen-space delta. The zoomed surface never
    /// uncovers its frame.
    pub fn apply_pan(&mut self, delta: Vec2, surface: Vec2) {
        self.offset = self.clamp_offset(self.offset + delta, surface);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0_f32.clamp(self.min_zoom, self.max_zoom);
        self.offset = Vec2::ZERO;
    }

    fn clamp_offset(&self, offset: Vec2, surface: Vec2) -> Vec2 {
        let max = ((self.scale - 1.0).max(0.0) * surface) / 2.0;
        egui::vec2(offset.x.clamp(-max.x, max.x), offset.y.clamp(-max.y, max.y))
    }

    /// Display-space point to screen position, zooming about the centre of
    /// `rect`.
    pub fn to_screen(&self, point: Point, rect: Rect) -> Pos2 {
        let local = egui::vec2(point.x, point.y) - rect.size() / 2.0;
        rect.center() + local * self.scale + self.offset
    }

    /// Inverse of [`ViewTransform::to_screen`].
    pub fn to_display(&self, pos: Pos2, rect: Rect) -> Point {
        let local = (pos - rect.center() - self.offset) / self.scale + rect.size() / 2.0;
        Point::new(local.x, local.y)
    }
}

/// The largest size with `aspect_ratio` (width / height) that fits `available`.
pub fn fit_aspect(available: Vec2, aspect_ratio: f32) -> Vec2 {
    if available.y <= 0.0 || aspect_ratio <= 0.0 || !aspect_ratio.is_finite() {
        return available.max(Vec2::ZERO);
    }
    if available.x / available.y > aspect_ratio {
        egui::vec2(available.y * aspect_ratio, available.y)
    } else {
        egui::vec2(available.x, available.x / aspect_ratio)
    }
}
