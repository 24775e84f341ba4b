use eframe_annotator::export::{ExportTask, composite};
use eframe_annotator::{Annotator, AnnotatorConfig, AnnotatorError, DrawMode, Point, Size};
use futures::executor::block_on;
use futures::task::noop_waker;
use image::{Rgba, RgbaImage};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

// Helper: 200x200 image shown on a 100x100 surface
fn circle_session() -> Annotator {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut annotator = Annotator::with_defaults(Size::new(200, 200));
    annotator.set_display_size(Size::new(100, 100));
    annotator.set_mode(DrawMode::Circle);
    annotator.start_drawing(Point::new(10.0, 10.0));
    annotator.update_drawing(Point::new(10.0, 40.0));
    annotator.finish_drawing();
    annotator
}

#[test]
fn test_overlay_is_drawn_in_image_space() {
    let annotator = circle_session();
    let overlay = annotator.export_overlay().unwrap();

    assert_eq!(overlay.dimensions(), (200, 200));
    // Circle centered at (20, 50) with radius 30 once doubled.
    assert!(overlay.get_pixel(50, 50)[3] > 0);
    assert_eq!(overlay.get_pixel(20, 50)[3], 0);
    assert_eq!(overlay.get_pixel(150, 150)[3], 0);
}

#[test]
fn test_export_before_layout_fails() {
    let annotator = Annotator::with_defaults(Size::new(50, 50));
    assert!(matches!(
        annotator.export_overlay(),
        Err(AnnotatorError::NotInitialized)
    ));
    assert!(annotator.export_task(None).is_err());
}

#[test]
fn test_export_composites_over_base() {
    let annotator = circle_session();
    let base = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 255, 255]));
    let out = annotator.export(&base).unwrap();

    assert_eq!(out.get_pixel(20, 50), &Rgba([0, 0, 255, 255]));
    let edge = out.get_pixel(50, 50);
    assert!(edge[0] > 0, "stroke color should show on the edge: {edge:?}");
}

#[test]
fn test_task_matches_direct_export() {
    let annotator = circle_session();
    let direct = annotator.export_overlay().unwrap();
    let (task, handle) = annotator.export_task(None).unwrap();

    let result = block_on(task).unwrap();
    assert!(!handle.is_cancelled());
    assert_eq!(result, direct);
}

#[test]
fn test_task_ignores_strokes_drawn_later() {
    let mut annotator = circle_session();
    let (task, _handle) = annotator.export_task(None).unwrap();

    annotator.set_mode(DrawMode::Rectangle);
    annotator.start_drawing(Point::new(60.0, 60.0));
    annotator.update_drawing(Point::new(90.0, 90.0));
    annotator.finish_drawing();

    let result = block_on(task).unwrap();
    assert_eq!(result.get_pixel(120, 150)[3], 0);
    assert!(annotator.export_overlay().unwrap().get_pixel(120, 150)[3] > 0);
}

#[test]
fn test_cancelled_task_reports_cancelled() {
    let annotator = circle_session();
    let (task, handle) = annotator.export_task(None).unwrap();
    handle.cancel();

    assert!(handle.is_cancelled());
    assert!(matches!(block_on(task), Err(AnnotatorError::Cancelled)));
}

#[test]
fn test_task_paints_in_batches() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = AnnotatorConfig {
        export_batch_size: 1,
        draw_mode: DrawMode::Rectangle,
        ..Default::default()
    };
    let mut annotator = Annotator::new(Size::new(40, 40), &config);
    annotator.set_display_size(Size::new(40, 40));
    for offset in [0.0, 10.0, 20.0] {
        annotator.start_drawing(Point::new(offset + 2.0, offset + 2.0));
        annotator.update_drawing(Point::new(offset + 8.0, offset + 8.0));
        annotator.finish_drawing();
    }

    let mut task = ExportTask::new(&annotator.snapshot().unwrap(), None).unwrap();
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut pending = 0;
    let image = loop {
        match Pin::new(&mut task).poll(&mut cx) {
            Poll::Pending => pending += 1,
            Poll::Ready(result) => break result.unwrap(),
        }
    };
    assert_eq!(pending, 2);
    assert_eq!(image.dimensions(), (40, 40));
}

#[test]
fn test_task_with_base_image() {
    let annotator = circle_session();
    let base = Arc::new(RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255])));
    let (task, _handle) = annotator.export_task(Some(Arc::clone(&base))).unwrap();

    let out = block_on(task).unwrap();
    assert_eq!(out, composite(&base, &annotator.export_overlay().unwrap()));
}
