//! Maps strokes drawn on the on-screen surface into source-image pixels.

use crate::error::{AnnotatorError, AnnotatorResult};
use crate::geometry::{DisplaySize, Size};
use crate::stroke::Stroke;

/// Per-axis factors from display space to image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactors {
    /// Factors mapping `source` onto `target`. Both are taken unrounded, so
    /// the far edge of the source lands exactly on the far edge of the target.
    pub fn between(
        target: impl Into<DisplaySize>,
        source: impl Into<DisplaySize>,
    ) -> AnnotatorResult<Self> {
        let (target, source) = (target.into(), source.into());
        if source.is_empty() {
            return Err(AnnotatorError::EmptyDisplay {
                width: source.width,
                height: source.height,
            });
        }
        Ok(Self {
            x: target.width / source.width,
            y: target.height / source.height,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }
}

/// Scales every point of every stroke. Color, width and alpha are kept:
/// the stroke width stays in display units on purpose.
pub fn scale_strokes(strokes: &[Stroke], factors: ScaleFactors) -> Vec<Stroke> {
    strokes
        .iter()
        .map(|stroke| stroke.map_points(|p| p.scaled(factors.x, factors.y)))
        .collect()
}

/// [`scale_strokes`] for a display and image size pair.
pub fn scale_strokes_to_image(
    strokes: &[Stroke],
    image: Size,
    display: impl Into<DisplaySize>,
) -> AnnotatorResult<Vec<Stroke>> {
    let display = display.into();
    let factors = ScaleFactors::between(image, display)?;
    log::debug!(
        "scaling {} strokes by ({}, {}) from {display:?} to {image:?}",
        strokes.len(),
        factors.x,
        factors.y
    );
    Ok(scale_strokes(strokes, factors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::stroke::{Argb, StrokeStyle};

    fn sample() -> Vec<Stroke> {
        let style = StrokeStyle::new(Argb::BLUE, 3.0).with_alpha(0.5);
        vec![
            Stroke::free_hand(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)], style),
            Stroke::polygon(
                vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(2.0, 4.0)],
                style,
            ),
            Stroke::rectangle(Point::new(1.0, 1.0), Point::new(6.0, 7.0), style),
            Stroke::circle(Point::new(10.0, 10.0), Point::new(10.0, 40.0), style),
        ]
    }

    #[test]
    fn test_identity_scale() {
        let strokes = sample();
        let size = Size::new(100, 80);
        let scaled = scale_strokes_to_image(&strokes, size, size).unwrap();
        assert_eq!(scaled, strokes);
    }

    #[test]
    fn test_double_scale_keeps_style() {
        let strokes = sample();
        let scaled =
            scale_strokes_to_image(&strokes, Size::new(200, 160), Size::new(100, 80)).unwrap();
        for (before, after) in strokes.iter().zip(&scaled) {
            assert_eq!(before.style(), after.style());
            assert_eq!(before.kind(), after.kind());
        }
        assert_eq!(scaled[0].path_points().unwrap()[1], Point::new(6.0, 8.0));
        assert_eq!(scaled[1].path_points().unwrap().len(), 4);
        assert_eq!(scaled[3].center(), Some(Point::new(20.0, 50.0)));
        assert_eq!(scaled[3].radius(), Some(30.0));
    }

    #[test]
    fn test_anisotropic_scale() {
        let factors = ScaleFactors::between(Size::new(300, 100), Size::new(100, 100)).unwrap();
        let scaled = scale_strokes(&sample()[2..3], factors);
        assert_eq!(
            scaled[0].rect_corners(),
            Some((Point::new(3.0, 1.0), Point::new(18.0, 7.0)))
        );
    }

    #[test]
    fn test_empty_display_rejected() {
        let err = ScaleFactors::between(Size::new(10, 10), Size::new(0, 10)).unwrap_err();
        assert!(matches!(err, AnnotatorError::EmptyDisplay { .. }));
    }

    #[test]
    fn test_fractional_display_edge_maps_to_image_edge() {
        let display = DisplaySize::new(384.0, 164.6);
        let corner = Stroke::free_hand(
            vec![Point::ZERO, Point::new(display.width, display.height)],
            StrokeStyle::default(),
        );
        let scaled = scale_strokes_to_image(&[corner], Size::new(7000, 3000), display).unwrap();
        let far = scaled[0].path_points().unwrap()[1];
        assert!((far.x - 7000.0).abs() < 1e-2, "{far:?}");
        assert!((far.y - 3000.0).abs() < 1e-2, "{far:?}");
    }
}
