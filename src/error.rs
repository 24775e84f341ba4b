use thiserror::Error;

/// Errors surfaced by the annotator and its export path
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// Export needs the on-screen size, which arrives with the first layout pass
    #[error("display size is not initialized; the canvas has not been laid out yet")]
    NotInitialized,

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The drawing surface has no area, so nothing can be mapped from it
    #[error("empty display surface {width}x{height}")]
    EmptyDisplay { width: f32, height: f32 },

    #[error("export was cancelled")]
    Cancelled,
}

pub type AnnotatorResult<T> = Result<T, AnnotatorError>;

/// Errors that can occur while saving or loading stroke documents
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to (de)serialize strokes: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported document version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
