//! The annotation engine.
//!
//! An [`Annotator`] is created per editing session and bound to one source
//! image. The host feeds it gestures in display coordinates
//! (`start_drawing`, `update_drawing`, `finish_drawing`), toolbar commands
//! (`undo`, `redo`, `clear`, style and mode setters) and the measured size of
//! the on-screen surface (`set_display_size`). Every change is announced on
//! the [`EventBus`] and bumps [`Annotator::revision`] for hosts that poll.
//!
//! Mutation is expected from a single (UI) thread. Export works on a
//! [`StrokeSnapshot`], which later edits never change.

use super::DrawingState;
use crate::config::AnnotatorConfig;
use crate::draw_mode::DrawMode;
use crate::error::{AnnotatorError, AnnotatorResult};
use crate::event::{AnnotatorEvent, EventBus, EventHandler};
use crate::geometry::{self, DisplaySize, Point, Size};
use crate::history::StrokeHistory;
use crate::scaling;
use crate::stroke::{Argb, Stroke, StrokeStyle};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub struct Annotator {
    session: Uuid,
    image_size: Size,
    display_size: Option<DisplaySize>,
    history: StrokeHistory,
    style: StrokeStyle,
    mode: DrawMode,
    state: DrawingState,
    revision: u64,
    export_batch_size: usize,
    events: EventBus,
}

/// Immutable view of the strokes and sizes at one point in time.
#[derive(Debug, Clone)]
pub struct StrokeSnapshot {
    pub strokes: Arc<Vec<Stroke>>,
    pub display_size: DisplaySize,
    pub image_size: Size,
    pub batch_size: usize,
}

impl StrokeSnapshot {
    /// The strokes mapped into source-image pixels.
    pub fn image_space_strokes(&self) -> AnnotatorResult<Vec<Stroke>> {
        scaling::scale_strokes_to_image(&self.strokes, self.image_size, self.display_size)
    }
}

impl Annotator {
    pub fn new(image_size: Size, config: &AnnotatorConfig) -> Self {
        let session = Uuid::new_v4();
        log::info!(
            "annotation session {session} for {}x{} image",
            image_size.width,
            image_size.height
        );
        Self {
            session,
            image_size,
            display_size: None,
            history: StrokeHistory::new(),
            style: config.style(),
            mode: config.draw_mode,
            state: DrawingState::Idle,
            revision: 0,
            export_batch_size: config.export_batch_size.max(1),
            events: EventBus::new(),
        }
    }

    /// A session with [`AnnotatorConfig::default`] settings.
    pub fn with_defaults(image_size: Size) -> Self {
        Self::new(image_size, &AnnotatorConfig::default())
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Drag start: seeds a new stroke of the current mode at `point`.
    pub fn start_drawing(&mut self, point: Point) {
        let style = self.style;
        let stroke = match self.mode {
            DrawMode::None => {
                log::trace!("start_drawing ignored in DrawMode::None");
                return;
            }
            DrawMode::FreeHand => Stroke::free_hand(vec![point], style),
            DrawMode::Circle => Stroke::circle(point, point, style),
            DrawMode::Rectangle => Stroke::rectangle(point, point, style),
            DrawMode::Polygon { sides } => {
                if sides == 0 {
                    log::warn!("polygon mode with zero sides produces an empty stroke");
                }
                Stroke::polygon(geometry::regular_polygon_vertices(0.0, point, sides), style)
            }
        };

        let kind = stroke.kind();
        self.history.push(stroke);
        let index = self.history.len() - 1;
        self.state = DrawingState::Drawing {
            origin: point,
            index,
        };
        log::debug!("started {kind} stroke #{index} at ({}, {})", point.x, point.y);
        self.notify(AnnotatorEvent::StrokeStarted { index, kind });
    }

    /// Drag move: reshapes the in-progress stroke towards `point`.
    ///
    /// Does nothing when the history is empty or no drag is in progress.
    /// The stroke keeps the style it was started with.
    pub fn update_drawing(&mut self, point: Point) {
        let DrawingState::Drawing { origin, index } = self.state else {
            return;
        };
        let Some(stroke) = self.history.last_mut() else {
            return;
        };

        let regenerated = match &mut *stroke {
            Stroke::Circle { diameter_end, .. } => {
                *diameter_end = point;
                None
            }
            Stroke::Rectangle { corner2, .. } => {
                *corner2 = point;
                None
            }
            Stroke::FreeHand { points, .. } => {
                points.push(point);
                None
            }
            Stroke::Polygon { points, style } => {
                // Stored closed, so the side count is one less than the points.
                let sides = points.len().saturating_sub(1) as u32;
                if sides == 0 {
                    return;
                }
                let radius = geometry::distance(origin, point) / 2.0;
                let center = geometry::midpoint(origin, point);
                Some(Stroke::polygon(
                    geometry::regular_polygon_vertices(radius, center, sides),
                    *style,
                ))
            }
        };
        if let Some(polygon) = regenerated {
            *stroke = polygon;
        }
        self.notify(AnnotatorEvent::StrokeUpdated { index });
    }

    /// Drag end: the in-progress stroke becomes a committed one.
    pub fn finish_drawing(&mut self) {
        if let DrawingState::Drawing { index, .. } = self.state {
            self.state = DrawingState::Idle;
            log::debug!("finished stroke #{index}");
            self.notify(AnnotatorEvent::StrokeFinished { index });
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Moves the newest stroke onto the redo stack. No-op on an empty history.
    pub fn undo(&mut self) {
        if self.history.undo() {
            self.state = DrawingState::Idle;
            let remaining = self.history.len();
            log::debug!("undo, {remaining} strokes left");
            self.notify(AnnotatorEvent::Undone { remaining });
        }
    }

    /// Brings back the most recently undone stroke, if any.
    pub fn redo(&mut self) {
        if self.history.redo() {
            let restored = self.history.len() - 1;
            log::debug!("redo restored stroke #{restored}");
            self.notify(AnnotatorEvent::Redone { restored });
        }
    }

    /// Drops all strokes and the redo stack.
    pub fn clear(&mut self) {
        self.state = DrawingState::Idle;
        if self.history.is_empty() && !self.history.can_redo() {
            return;
        }
        self.history.clear();
        log::debug!("cleared annotation history");
        self.notify(AnnotatorEvent::Cleared);
    }

    /// Whether [`Annotator::undo`] would change anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Style and mode. These apply to the next stroke only.
    // ------------------------------------------------------------------

    /// Color of the next stroke.
    pub fn set_color(&mut self, color: Argb) {
        self.set_style(StrokeStyle {
            color,
            ..self.style
        });
    }

    /// Width of the next stroke, in display units. Negative widths become zero.
    pub fn set_width(&mut self, width: f32) {
        self.set_style(StrokeStyle {
            width: width.max(0.0),
            ..self.style
        });
    }

    /// Opacity of the next stroke, clamped to `0..=1`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.set_style(StrokeStyle {
            alpha: alpha.clamp(0.0, 1.0),
            ..self.style
        });
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        if style != self.style {
            self.style = style;
            self.notify(AnnotatorEvent::StyleChanged(style));
        }
    }

    /// Switches the tool. A drag still in progress is finished first, so the
    /// stroke it produced stays as drawn.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if mode != self.mode {
            self.finish_drawing();
            let old = std::mem::replace(&mut self.mode, mode);
            log::debug!("draw mode {old} -> {mode}");
            self.notify(AnnotatorEvent::ModeChanged { old, new: mode });
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Layout callback: records the measured size of the drawing surface.
    ///
    /// The size is kept unrounded: strokes are recorded in the same fractional
    /// units, and export divides by it.
    pub fn set_display_size(&mut self, size: impl Into<DisplaySize>) {
        let size = size.into();
        if self.display_size != Some(size) {
            log::debug!("display size {}x{}", size.width, size.height);
            self.display_size = Some(size);
            self.notify(AnnotatorEvent::DisplaySizeChanged(size));
        }
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Strokes in drawing order, the in-progress one last.
    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    /// Undone strokes, the next one to come back last.
    pub fn redo_strokes(&self) -> &[Stroke] {
        self.history.redo_strokes()
    }

    /// The active tool.
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Style the next stroke will be drawn with.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn drawing_state(&self) -> DrawingState {
        self.state
    }

    /// True between drag start and drag end.
    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// `None` until the first layout pass.
    pub fn display_size(&self) -> Option<DisplaySize> {
        self.display_size
    }

    /// Width over height of the source image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_size.aspect_ratio()
    }

    pub fn is_portrait(&self) -> bool {
        self.image_size.is_portrait()
    }

    /// Random id of this editing session, stored with saved documents.
    pub fn session_id(&self) -> Uuid {
        self.session
    }

    /// Increases on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a handler for every later [`AnnotatorEvent`].
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Captures the strokes for export. Fails until the display size is known.
    pub fn snapshot(&self) -> AnnotatorResult<StrokeSnapshot> {
        let display_size = self.display_size.ok_or(AnnotatorError::NotInitialized)?;
        Ok(StrokeSnapshot {
            strokes: self.history.shared(),
            display_size,
            image_size: self.image_size,
            batch_size: self.export_batch_size,
        })
    }

    /// Replaces the history with previously saved strokes, for example when
    /// reopening a document. The redo stack starts empty.
    pub fn restore_strokes(&mut self, strokes: Vec<Stroke>) {
        self.history.clear();
        self.state = DrawingState::Idle;
        for stroke in strokes {
            self.history.push(stroke);
        }
        let count = self.history.len();
        log::info!("restored {count} strokes");
        self.notify(AnnotatorEvent::Restored { count });
    }

    fn notify(&mut self, event: AnnotatorEvent) {
        self.revision += 1;
        self.events.emit(event);
    }
}
