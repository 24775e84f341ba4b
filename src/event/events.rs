use crate::draw_mode::DrawMode;
use crate::geometry::DisplaySize;
use crate::stroke::StrokeStyle;

/// Something observable changed in the annotator.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatorEvent {
    StrokeStarted { index: usize, kind: &'static str },
    StrokeUpdated { index: usize },
    StrokeFinished { index: usize },
    Undone { remaining: usize },
    Redone { restored: usize },
    Cleared,
    /// A restore replaced the whole history with `count` saved strokes.
    Restored { count: usize },
    StyleChanged(StrokeStyle),
    ModeChanged { old: DrawMode, new: DrawMode },
    DisplaySizeChanged(DisplaySize),
}
