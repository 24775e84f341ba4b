use crate::draw_mode::{DEFAULT_POLYGON_SIDES, DrawMode};
use crate::stroke::{Argb, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Initial settings for an annotation session.
///
/// Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub stroke_color: Argb,
    pub stroke_width: f32,
    pub stroke_alpha: f32,
    pub draw_mode: DrawMode,
    /// Side count used when a host switches to polygon mode without one
    pub polygon_sides: u32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Strokes painted per poll of an export task
    pub export_batch_size: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            stroke_color: Argb::RED,
            stroke_width: 5.0,
            stroke_alpha: 1.0,
            draw_mode: DrawMode::FreeHand,
            polygon_sides: DEFAULT_POLYGON_SIDES,
            min_zoom: 1.0,
            max_zoom: 5.0,
            export_batch_size: 32,
        }
    }
}

impl AnnotatorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.stroke_color, self.stroke_width).with_alpha(self.stroke_alpha)
    }

    pub fn polygon_mode(&self) -> DrawMode {
        DrawMode::Polygon {
            sides: self.polygon_sides,
        }
    }
}
