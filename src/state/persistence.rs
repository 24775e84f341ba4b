use super::Annotator;
use crate::error::{PersistenceError, PersistenceResult};
use crate::geometry::{DisplaySize, Size};
use crate::scaling::{self, ScaleFactors};
use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Newest document layout this build reads and writes.
pub const DOCUMENT_VERSION: u32 = 1;

/// Serializable copy of a session's strokes.
///
/// Strokes are kept in the display space they were drawn in, together with
/// that display size, so they can be mapped onto a differently sized surface
/// when reopened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub version: u32,
    pub session: Uuid,
    pub image_size: Size,
    pub display_size: Option<DisplaySize>,
    pub strokes: Vec<Stroke>,
}

impl AnnotationDocument {
    pub fn from_annotator(annotator: &Annotator) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            session: annotator.session_id(),
            image_size: annotator.image_size(),
            display_size: annotator.display_size(),
            strokes: annotator.strokes().to_vec(),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.version > DOCUMENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: document.version,
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(document)
    }

    /// The strokes mapped onto a surface of `target` size. Without a saved
    /// display size, or with an unusable one, they are returned unchanged.
    pub fn strokes_for_display(&self, target: impl Into<DisplaySize>) -> Vec<Stroke> {
        let target = target.into();
        match self.display_size {
            Some(saved) if saved != target => match ScaleFactors::between(target, saved) {
                Ok(factors) => scaling::scale_strokes(&self.strokes, factors),
                Err(err) => {
                    log::warn!("keeping saved strokes unscaled: {err}");
                    self.strokes.clone()
                }
            },
            _ => self.strokes.clone(),
        }
    }

    /// Loads the strokes into `annotator`, rescaled to its display size when
    /// that is already known.
    pub fn restore_into(&self, annotator: &mut Annotator) {
        if self.image_size != annotator.image_size() {
            log::warn!(
                "document was saved for a {:?} image, restoring onto {:?}",
                self.image_size,
                annotator.image_size()
            );
        }
        let strokes = match annotator.display_size() {
            Some(display) => self.strokes_for_display(display),
            None => self.strokes.clone(),
        };
        annotator.restore_strokes(strokes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_mode::DrawMode;
    use crate::geometry::Point;

    fn drawn() -> Annotator {
        let mut a = Annotator::with_defaults(Size::new(400, 400));
        a.set_display_size(Size::new(100, 100));
        a.set_mode(DrawMode::polygon());
        a.start_drawing(Point::new(10.0, 10.0));
        a.update_drawing(Point::new(30.0, 10.0));
        a.finish_drawing();
        a
    }

    #[test]
    fn test_json_round_trip() {
        let document = AnnotationDocument::from_annotator(&drawn());
        let json = document.to_json().unwrap();
        let back = AnnotationDocument::from_json(&json).unwrap();
        assert_eq!(back, document);
        assert_eq!(back.strokes[0].path_points().unwrap().len(), 6);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut document = AnnotationDocument::from_annotator(&drawn());
        document.version = DOCUMENT_VERSION + 1;
        let json = document.to_json().unwrap();
        assert!(matches!(
            AnnotationDocument::from_json(&json),
            Err(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_restore_rescales_to_new_display() {
        let document = AnnotationDocument::from_annotator(&drawn());
        let mut reopened = Annotator::with_defaults(Size::new(400, 400));
        reopened.set_display_size(Size::new(200, 200));
        document.restore_into(&mut reopened);

        let original = &document.strokes[0].path_points().unwrap()[0];
        let restored = &reopened.strokes()[0].path_points().unwrap()[0];
        assert_eq!(*restored, Point::new(original.x * 2.0, original.y * 2.0));
        assert!(!reopened.can_redo());
    }
}
