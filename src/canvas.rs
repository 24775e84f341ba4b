//! The `egui` widget that hosts an [`Annotator`].

use crate::geometry::{DisplaySize, Point};
use crate::renderer::{PainterCanvas, draw_strokes};
use crate::state::Annotator;
use crate::view::{ViewTransform, fit_aspect};
use egui::{Color32, Response, Sense, TextureId, Ui};

/// Shows the source image with its annotation layer on top and routes drags
/// either to the annotator (any drawing mode) or to pan/zoom (`DrawMode::None`).
pub struct AnnotationCanvas<'a> {
    annotator: &'a mut Annotator,
    view: &'a mut ViewTransform,
    background: Option<TextureId>,
}

impl<'a> AnnotationCanvas<'a> {
    pub fn new(annotator: &'a mut Annotator, view: &'a mut ViewTransform) -> Self {
        Self {
            annotator,
            view,
            background: None,
        }
    }

    /// Texture of the source image, drawn under the strokes.
    pub fn background(mut self, texture: TextureId) -> Self {
        self.background = Some(texture);
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> Response {
        let size = fit_aspect(ui.available_size(), self.annotator.aspect_ratio());
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let rect = response.rect;
        let painter = painter.with_clip_rect(rect);

        self.annotator
            .set_display_size(DisplaySize::new(rect.width(), rect.height()));

        if self.annotator.mode().is_drawing() {
            if let Some(pos) = response.interact_pointer_pos() {
                let point = self.view.to_display(pos, rect);
                if response.drag_started() {
                    self.annotator.start_drawing(point);
                } else if response.dragged() {
                    self.annotator.update_drawing(point);
                }
            }
        } else {
            if response.dragged() {
                self.view.apply_pan(response.drag_delta(), rect.size());
            }
            if response.hovered() {
                let zoom = ui.input(|i| i.zoom_delta());
                if zoom != 1.0 {
                    self.view.apply_zoom(zoom, rect.size());
                }
            }
        }

        if response.drag_stopped() {
            self.annotator.finish_drawing();
        }

        if let Some(texture) = self.background {
            let image_rect = egui::Rect::from_min_max(
                self.view.to_screen(Point::ZERO, rect),
                self.view.to_screen(
                    Point::new(rect.width(), rect.height()),
                    rect,
                ),
            );
            painter.image(
                texture,
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let mut canvas = PainterCanvas::new(&painter, rect, *self.view);
        draw_strokes(&mut canvas, self.annotator.strokes());

        if self.annotator.is_drawing() {
            ui.ctx().request_repaint();
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_mode::DrawMode;
    use crate::geometry::Size;
    use crate::stroke::Stroke;
    use egui::{Event, Modifiers, PointerButton, Pos2, Rect};

    /// Drives one `egui::Context` through consecutive frames, like a host would.
    struct Host {
        ctx: egui::Context,
        annotator: Annotator,
        view: ViewTransform,
    }

    impl Host {
        fn new(image: Size, mode: DrawMode) -> Self {
            let mut annotator = Annotator::with_defaults(image);
            annotator.set_mode(mode);
            Self {
                ctx: egui::Context::default(),
                annotator,
                view: ViewTransform::default(),
            }
        }

        /// Runs a frame and returns the rect the canvas occupied.
        fn frame(&mut self, events: Vec<Event>) -> Rect {
            let input = egui::RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 300.0))),
                events,
                ..Default::default()
            };
            let mut rect = Rect::NOTHING;
            let (annotator, view) = (&mut self.annotator, &mut self.view);
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    rect = AnnotationCanvas::new(&mut *annotator, &mut *view).show(ui).rect;
                });
            });
            rect
        }

        fn press(&mut self, pos: Pos2) {
            self.frame(vec![Event::PointerMoved(pos), button(pos, true)]);
        }

        fn move_to(&mut self, pos: Pos2) {
            self.frame(vec![Event::PointerMoved(pos)]);
        }

        fn release(&mut self, pos: Pos2) {
            self.frame(vec![button(pos, false)]);
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_layout_reports_display_size() {
        let mut host = Host::new(Size::new(200, 100), DrawMode::FreeHand);
        let rect = host.frame(Vec::new());

        let display = host
            .annotator
            .display_size()
            .expect("layout pass records the size");
        assert_eq!(display, DisplaySize::new(rect.width(), rect.height()));
        assert!((display.width / display.height - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_fractional_surface_edge_exports_to_image_edge() {
        let mut host = Host::new(Size::new(7000, 3000), DrawMode::FreeHand);
        let rect = host.frame(Vec::new());

        let corner = Point::new(rect.width(), rect.height());
        let style = host.annotator.style();
        host.annotator
            .restore_strokes(vec![Stroke::free_hand(vec![Point::ZERO, corner], style)]);

        let scaled = host.annotator.snapshot().unwrap().image_space_strokes().unwrap();
        let far = scaled[0].path_points().unwrap()[1];
        assert!((far.x - 7000.0).abs() < 1e-2, "{far:?} from {rect:?}");
        assert!((far.y - 3000.0).abs() < 1e-2, "{far:?} from {rect:?}");
    }

    #[test]
    fn test_frame_without_input_leaves_history_alone() {
        let mut host = Host::new(Size::new(100, 100), DrawMode::Circle);
        host.frame(Vec::new());
        assert!(host.annotator.strokes().is_empty());
        assert_eq!(host.view.scale(), 1.0);
    }

    #[test]
    fn test_drag_draws_a_stroke() {
        let mut host = Host::new(Size::new(200, 100), DrawMode::Rectangle);
        let rect = host.frame(Vec::new());
        let start = rect.min + egui::vec2(20.0, 20.0);
        let end = rect.min + egui::vec2(120.0, 80.0);

        host.press(start);
        host.move_to(start + egui::vec2(40.0, 30.0));
        host.move_to(end);
        assert!(host.annotator.is_drawing());
        host.release(end);

        assert!(!host.annotator.is_drawing());
        assert_eq!(host.annotator.strokes().len(), 1);
        let stroke = &host.annotator.strokes()[0];
        assert_eq!(stroke.kind(), "rectangle");
        let (top_left, bottom_right) = stroke.rect_corners().unwrap();
        assert!(bottom_right.x - top_left.x > 50.0, "{top_left:?} {bottom_right:?}");
        assert!((bottom_right.x - 120.0).abs() < 1e-3);
        assert!((bottom_right.y - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_mode_switch_mid_drag_stops_drawing() {
        let mut host = Host::new(Size::new(200, 100), DrawMode::FreeHand);
        let rect = host.frame(Vec::new());
        let start = rect.center();

        host.press(start);
        host.move_to(start + egui::vec2(30.0, 0.0));
        host.annotator.set_mode(DrawMode::None);
        host.move_to(start + egui::vec2(60.0, 0.0));
        host.release(start + egui::vec2(60.0, 0.0));

        assert!(!host.annotator.is_drawing());
        assert_eq!(host.annotator.strokes().len(), 1);
    }

    #[test]
    fn test_drag_pans_in_none_mode() {
        let mut host = Host::new(Size::new(200, 100), DrawMode::None);
        let rect = host.frame(Vec::new());
        host.view.apply_zoom(2.0, rect.size());
        let start = rect.center();

        host.press(start);
        host.move_to(start + egui::vec2(20.0, 10.0));
        host.release(start + egui::vec2(20.0, 10.0));

        assert!(host.annotator.strokes().is_empty());
        assert_ne!(host.view.offset(), egui::Vec2::ZERO);
    }

    #[test]
    fn test_zoom_gesture_in_none_mode() {
        let mut host = Host::new(Size::new(200, 100), DrawMode::None);
        let rect = host.frame(Vec::new());
        host.move_to(rect.center());
        host.frame(vec![Event::Zoom(1.5)]);

        assert!((host.view.scale() - 1.5).abs() < 1e-4);
        assert!(host.annotator.strokes().is_empty());
    }
}
