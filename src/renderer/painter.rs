use super::{StrokeCanvas, StrokePaint};
use crate::geometry::{Point, SmoothPath};
use crate::view::ViewTransform;
use egui::{Color32, Painter, Rect};

const SEGMENTS_PER_CURVE: usize = 4;

/// Interactive rendering onto an `egui` painter.
///
/// Points arrive in display space and are mapped through the current
/// pan/zoom of the surface occupying `rect`.
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    rect: Rect,
    view: ViewTransform,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, view: ViewTransform) -> Self {
        Self {
            painter,
            rect,
            view,
        }
    }

    fn egui_stroke(&self, paint: &StrokePaint) -> egui::Stroke {
        let [r, g, b, a] = paint.rgba;
        egui::Stroke::new(
            paint.width * self.view.scale(),
            Color32::from_rgba_unmultiplied(r, g, b, a),
        )
    }
}

impl StrokeCanvas for PainterCanvas<'_> {
    fn stroke_path(&mut self, path: &SmoothPath, paint: &StrokePaint) {
        let points = path
            .flatten(SEGMENTS_PER_CURVE)
            .into_iter()
            .map(|p| self.view.to_screen(p, self.rect))
            .collect();
        self.painter
            .add(egui::Shape::line(points, self.egui_stroke(paint)));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &StrokePaint) {
        self.painter.circle_stroke(
            self.view.to_screen(center, self.rect),
            radius * self.view.scale(),
            self.egui_stroke(paint),
        );
    }

    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, paint: &StrokePaint) {
        let rect = Rect::from_min_max(
            self.view.to_screen(top_left, self.rect),
            self.view.to_screen(bottom_right, self.rect),
        );
        self.painter.rect_stroke(rect, 0.0, self.egui_stroke(paint));
    }
}
