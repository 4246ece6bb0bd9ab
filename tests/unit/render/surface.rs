use std::sync::{Arc, Mutex};

use super::*;
use crate::foundation::error::LayerframeError;

#[derive(Default)]
struct Log {
    inits: u32,
    shutdowns: u32,
    jobs: Vec<(String, Option<StyleState>)>,
}

/// Paints a 2x2 opaque square at (10, 20) on every job.
struct Scripted {
    log: Arc<Mutex<Log>>,
    fail_init: bool,
}

impl Scripted {
    fn new() -> (Self, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        (
            Self {
                log: log.clone(),
                fail_init: false,
            },
            log,
        )
    }
}

impl Rasterizer for Scripted {
    fn initialize(&mut self) -> LayerframeResult<()> {
        if self.fail_init {
            return Err(LayerframeError::validation("no surface"));
        }
        self.log.lock().unwrap().inits += 1;
        Ok(())
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> LayerframeResult<Raster> {
        self.log
            .lock()
            .unwrap()
            .jobs
            .push((job.markup.to_string(), job.style));
        let Canvas { width, height } = job.canvas;
        let mut data = vec![0u8; job.canvas.rgba_len()];
        for y in 20..22 {
            for x in 10..12 {
                let i = ((y * width + x) * 4) as usize;
                data[i..i + 4].copy_from_slice(&[1, 2, 3, 255]);
            }
        }
        Raster::from_rgba8(width, height, data)
    }

    fn shutdown(&mut self) {
        self.log.lock().unwrap().shutdowns += 1;
    }
}

fn canvas() -> Canvas {
    Canvas::new(64, 48).unwrap()
}

#[test]
fn initialize_is_idempotent_and_drop_shuts_down() {
    let (r, log) = Scripted::new();
    {
        let mut s = Surface::new(r);
        assert!(!s.is_ready());
        s.initialize().unwrap();
        s.initialize().unwrap();
        assert!(s.is_ready());
    }
    let log = log.lock().unwrap();
    assert_eq!(log.inits, 1);
    assert_eq!(log.shutdowns, 1);
}

#[test]
fn shutdown_without_initialize_is_noop() {
    let (r, log) = Scripted::new();
    let mut s = Surface::new(r);
    s.shutdown();
    drop(s);
    assert_eq!(log.lock().unwrap().shutdowns, 0);
}

#[test]
fn failed_initialize_leaves_surface_idle() {
    let (mut r, _log) = Scripted::new();
    r.fail_init = true;
    let mut s = Surface::new(r);
    assert!(s.render_static("<p/>", canvas(), &[], false).is_err());
    assert!(!s.is_ready());
}

#[test]
fn full_canvas_static_render_anchors_at_canvas_center() {
    let (r, log) = Scripted::new();
    let mut s = Surface::new(r);
    let out = s.render_static("<p>hi</p>", canvas(), &[], false).unwrap();
    assert_eq!((out.raster.width, out.raster.height), (64, 48));
    assert_eq!(out.position, Position { x: 0, y: 0 });
    assert_eq!(out.anchor_point, Point::new(32.0, 24.0));
    assert_eq!(log.lock().unwrap().inits, 1);
    assert_eq!(log.lock().unwrap().jobs[0].1, None);
}

#[test]
fn cropped_static_render_pads_and_anchors_on_content() {
    let (r, _log) = Scripted::new();
    let mut s = Surface::new(r);
    let out = s.render_static("<p>hi</p>", canvas(), &[], true).unwrap();
    assert_eq!(out.position, Position { x: 6, y: 16 });
    assert_eq!((out.raster.width, out.raster.height), (10, 10));
    assert_eq!(out.anchor_point, Point::new(11.0, 21.0));
}

#[test]
fn styled_capture_forwards_style() {
    let (r, log) = Scripted::new();
    let mut s = Surface::new(r);
    let style = StyleState::new(0.5, crate::animation::effect::SpatialTransform::Scale(0.8));
    let raster = s
        .apply_style_and_capture("<p/>", canvas(), style, &[])
        .unwrap();
    assert_eq!((raster.width, raster.height), (64, 48));
    assert_eq!(log.lock().unwrap().jobs[0].1, Some(style));
}

#[test]
fn default_rasterizer_cannot_fork() {
    let (r, _log) = Scripted::new();
    assert!(Surface::new(r).fork().is_none());
}
