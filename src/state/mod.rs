mod annotator;
mod drawing_state;
mod persistence;

pub use annotator::{Annotator, StrokeSnapshot};
pub use drawing_state::DrawingState;
pub use persistence::{AnnotationDocument, DOCUMENT_VERSION};
