#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use layerframe::{
    Canvas, LayerframeError, LayerframeResult, Raster, RasterJob, Rasterizer, StyleState,
};

/// One recorded rasterizer call.
#[derive(Clone, Debug)]
pub struct Call {
    pub markup: String,
    pub canvas: Canvas,
    pub fonts: Vec<String>,
    pub style: Option<StyleState>,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub inits: AtomicUsize,
    pub shutdowns: AtomicUsize,
    pub forks: AtomicUsize,
    pub calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

/// Deterministic rasterizer that paints an opaque 4x2 block at (8, 6) and records every call.
///
/// Markup containing `FAIL` errors; `fail_after` errors once that many calls were made.
#[derive(Clone, Debug)]
pub struct Scripted {
    pub recorder: Arc<Recorder>,
    pub can_fork: bool,
    pub fail_after: Option<usize>,
}

impl Scripted {
    pub fn new() -> Self {
        Self {
            recorder: Arc::new(Recorder::default()),
            can_fork: false,
            fail_after: None,
        }
    }
}

impl Rasterizer for Scripted {
    fn initialize(&mut self) -> LayerframeResult<()> {
        self.recorder.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> LayerframeResult<Raster> {
        let n = {
            let mut calls = self.recorder.calls.lock().unwrap();
            calls.push(Call {
                markup: job.markup.to_string(),
                canvas: job.canvas,
                fonts: job.fonts.to_vec(),
                style: job.style,
            });
            calls.len()
        };
        if job.markup.contains("FAIL") || self.fail_after.is_some_and(|limit| n > limit) {
            return Err(LayerframeError::validation("scripted failure"));
        }

        let Canvas { width, height } = job.canvas;
        let mut data = vec![0u8; job.canvas.rgba_len()];
        for y in 6..8 {
            for x in 8..12 {
                let i = ((y * width + x) * 4) as usize;
                data[i..i + 4].copy_from_slice(&[200, 100, 50, 255]);
            }
        }
        Raster::from_rgba8(width, height, data)
    }

    fn shutdown(&mut self) {
        self.recorder.shutdowns.fetch_add(1, Ordering::SeqCst);
    }

    fn fork(&self) -> Option<Self> {
        if !self.can_fork {
            return None;
        }
        self.recorder.forks.fetch_add(1, Ordering::SeqCst);
        Some(self.clone())
    }
}

pub fn small_canvas() -> Canvas {
    Canvas::new(32, 16).unwrap()
}
