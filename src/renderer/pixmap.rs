//! Offscreen rasterization with tiny-skia.

use super::{StrokeCanvas, StrokePaint, draw_strokes};
use crate::error::{AnnotatorError, AnnotatorResult};
use crate::geometry::{PathCommand, Point, Size, SmoothPath};
use crate::stroke::Stroke;
use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Transform};

/// A transparent pixel buffer that strokes are painted onto.
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl PixmapCanvas {
    pub fn new(size: Size) -> AnnotatorResult<Self> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or(
            AnnotatorError::InvalidDimensions {
                width: size.width,
                height: size.height,
            },
        )?;
        Ok(Self { pixmap })
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Converts the premultiplied pixmap into a straight-alpha image.
    pub fn into_image(self) -> AnnotatorResult<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let raw: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, raw)
            .ok_or(AnnotatorError::InvalidDimensions { width, height })
    }

    fn stroke(&mut self, path: &tiny_skia::Path, paint: &StrokePaint) {
        let [r, g, b, a] = paint.rgba;
        let mut skia_paint = Paint::default();
        skia_paint.set_color_rgba8(r, g, b, a);
        skia_paint.anti_alias = true;

        let stroke = tiny_skia::Stroke {
            width: paint.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(path, &skia_paint, &stroke, Transform::identity(), None);
    }
}

impl StrokeCanvas for PixmapCanvas {
    fn stroke_path(&mut self, path: &SmoothPath, paint: &StrokePaint) {
        let mut pb = PathBuilder::new();
        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo(p) => pb.move_to(p.x, p.y),
                PathCommand::QuadTo { control, end } => {
                    pb.quad_to(control.x, control.y, end.x, end.y)
                }
            }
        }
        match pb.finish() {
            Some(skia_path) => self.stroke(&skia_path, paint),
            None => log::trace!("skipping degenerate path"),
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &StrokePaint) {
        match PathBuilder::from_circle(center.x, center.y, radius) {
            Some(path) => self.stroke(&path, paint),
            None => log::trace!("skipping circle with radius {radius}"),
        }
    }

    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, paint: &StrokePaint) {
        match Rect::from_ltrb(top_left.x, top_left.y, bottom_right.x, bottom_right.y) {
            Some(rect) => self.stroke(&PathBuilder::from_rect(rect), paint),
            None => log::warn!("skipping unrenderable rectangle {top_left:?}..{bottom_right:?}"),
        }
    }
}

/// Paints `strokes` onto a fresh transparent buffer of `size`.
pub fn rasterize(strokes: &[Stroke], size: Size) -> AnnotatorResult<RgbaImage> {
    let mut canvas = PixmapCanvas::new(size)?;
    draw_strokes(&mut canvas, strokes);
    canvas.into_image()
}
