//! Rendering the annotation layer at source-image resolution.
//!
//! Export works on a [`StrokeSnapshot`]: strokes are scaled from display
//! space into image space and painted onto a transparent buffer the size of
//! the source image, which can then be composited over the image itself.
//! [`ExportTask`] does the painting in batches so a host can run it off the
//! UI thread and cancel it when the image is discarded.

use crate::error::{AnnotatorError, AnnotatorResult};
use crate::geometry::Size;
use crate::renderer::{PixmapCanvas, draw_stroke, rasterize};
use crate::state::{Annotator, StrokeSnapshot};
use crate::stroke::Stroke;
use futures::FutureExt;
use futures::future::{AbortHandle, BoxFuture, abortable};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

pub type ExportFuture = BoxFuture<'static, AnnotatorResult<RgbaImage>>;

/// The annotation layer alone, sized to the source image.
pub fn export_overlay(snapshot: &StrokeSnapshot) -> AnnotatorResult<RgbaImage> {
    let strokes = snapshot.image_space_strokes()?;
    log::info!(
        "rasterizing {} strokes at {}x{}",
        strokes.len(),
        snapshot.image_size.width,
        snapshot.image_size.height
    );
    rasterize(&strokes, snapshot.image_size)
}

/// Draws `overlay` over a copy of `base`. An overlay of a different size is
/// resampled to the base size first.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    if overlay.dimensions() == base.dimensions() {
        imageops::overlay(&mut out, overlay, 0, 0);
    } else {
        log::warn!(
            "resampling {:?} overlay to {:?} image",
            overlay.dimensions(),
            base.dimensions()
        );
        let resized = imageops::resize(overlay, base.width(), base.height(), FilterType::Triangle);
        imageops::overlay(&mut out, &resized, 0, 0);
    }
    out
}

/// Cancels a running [`ExportTask`].
#[derive(Debug, Clone)]
pub struct ExportHandle {
    abort: AbortHandle,
}

impl ExportHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Incremental rasterization of a snapshot.
///
/// Every poll paints up to `batch_size` strokes, then yields.
pub struct ExportTask {
    strokes: Vec<Stroke>,
    next: usize,
    batch_size: usize,
    canvas: Option<PixmapCanvas>,
    base: Option<Arc<RgbaImage>>,
}

impl ExportTask {
    /// Scales the snapshot and allocates the target buffer up front, so
    /// invalid sizes fail here rather than on first poll.
    pub fn new(snapshot: &StrokeSnapshot, base: Option<Arc<RgbaImage>>) -> AnnotatorResult<Self> {
        let strokes = snapshot.image_space_strokes()?;
        let canvas = PixmapCanvas::new(snapshot.image_size)?;
        Ok(Self {
            strokes,
            next: 0,
            batch_size: snapshot.batch_size.max(1),
            canvas: Some(canvas),
            base,
        })
    }

    pub fn target_size(&self) -> Option<Size> {
        self.canvas.as_ref().map(PixmapCanvas::size)
    }

    /// Wraps the task so it can be cancelled through the returned handle. A
    /// cancelled export resolves to [`AnnotatorError::Cancelled`].
    pub fn cancellable(self) -> (ExportFuture, ExportHandle) {
        let (task, abort) = abortable(self);
        let future = task
            .map(|result| result.unwrap_or(Err(AnnotatorError::Cancelled)))
            .boxed();
        (future, ExportHandle { abort })
    }
}

impl Future for ExportTask {
    type Output = AnnotatorResult<RgbaImage>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let Some(canvas) = this.canvas.as_mut() else {
            return Poll::Ready(Err(AnnotatorError::Cancelled));
        };

        let end = (this.next + this.batch_size).min(this.strokes.len());
        for stroke in &this.strokes[this.next..end] {
            draw_stroke(canvas, stroke);
        }
        this.next = end;

        if this.next < this.strokes.len() {
            log::trace!("export painted {}/{} strokes", this.next, this.strokes.len());
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        let Some(canvas) = this.canvas.take() else {
            return Poll::Ready(Err(AnnotatorError::Cancelled));
        };
        let overlay = match canvas.into_image() {
            Ok(overlay) => overlay,
            Err(err) => return Poll::Ready(Err(err)),
        };
        log::info!("export finished: {} strokes", this.strokes.len());
        Poll::Ready(Ok(match &this.base {
            Some(base) => composite(base, &overlay),
            None => overlay,
        }))
    }
}

impl Annotator {
    /// The annotation layer at source-image size.
    ///
    /// Fails with [`AnnotatorError::NotInitialized`] before the first layout.
    pub fn export_overlay(&self) -> AnnotatorResult<RgbaImage> {
        export_overlay(&self.snapshot()?)
    }

    /// The source image with the annotation layer composited on top.
    pub fn export(&self, base: &RgbaImage) -> AnnotatorResult<RgbaImage> {
        let overlay = self.export_overlay()?;
        Ok(composite(base, &overlay))
    }

    /// Starts an export of the current strokes that can be driven on another
    /// thread. Strokes drawn after this call are not included.
    pub fn export_task(
        &self,
        base: Option<Arc<RgbaImage>>,
    ) -> AnnotatorResult<(ExportFuture, ExportHandle)> {
        Ok(ExportTask::new(&self.snapshot()?, base)?.cancellable())
    }
}
