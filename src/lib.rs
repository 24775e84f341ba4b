#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod config;
pub mod draw_mode;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod history;
pub mod renderer;
pub mod scaling;
pub mod state;
pub mod stroke;
pub mod view;

pub use canvas::AnnotationCanvas;
pub use config::AnnotatorConfig;
pub use draw_mode::DrawMode;
pub use error::{AnnotatorError, AnnotatorResult, PersistenceError, PersistenceResult};
pub use event::{AnnotatorEvent, EventBus, EventHandler};
pub use export::{ExportFuture, ExportHandle, ExportTask};
pub use geometry::{DisplaySize, Point, Size};
pub use history::StrokeHistory;
pub use state::{AnnotationDocument, Annotator, DrawingState, StrokeSnapshot};
pub use stroke::{Argb, Stroke, StrokeStyle};
pub use view::ViewTransform;
