/// Gesture state of the annotator.
///
/// ```text
/// ┌──────────┐  start_drawing   ┌───────────┐
/// │          ├──────────────────►           │ update_drawing
/// │   Idle   │                  │  Drawing  ◄────────┐
/// │          ◄──────────────────┤           ├────────┘
/// └──────────┘  finish_drawing  └───────────┘
///               undo / clear
/// ```
///
/// `start_drawing` in `DrawMode::None` creates nothing and leaves the state
/// untouched.
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    /// A drag is authoring the last stroke of the history
    Drawing {
        /// Where the drag started, used as the fixed anchor of polygons
        origin: Point,
        /// Index of the in-progress stroke in the history
        index: usize,
    },
}

impl DrawingState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn origin(&self) -> Option<Point> {
        match self {
            Self::Drawing { origin, .. } => Some(*origin),
            Self::Idle => None,
        }
    }
}
