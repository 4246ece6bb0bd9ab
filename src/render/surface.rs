use crate::{
    animation::effect::StyleState,
    foundation::{
        core::{Canvas, PixelRect, Point},
        error::LayerframeResult,
    },
    render::rasterizer::{Raster, RasterJob, Rasterizer},
};

/// Padding in pixels around content when cropping a static render.
pub const CROP_PADDING: u32 = 4;

/// Top-left of a raster within the original canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// A static render plus where it sits on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticRender {
    pub raster: Raster,
    /// Top-left of `raster` within the canvas.
    pub position: Position,
    /// Centre of the rendered (or cropped-to) content, in canvas coordinates.
    pub anchor_point: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SurfaceState {
    Idle,
    Ready,
}

/// Owned handle around a [`Rasterizer`] with idempotent init and shutdown.
///
/// The first render initializes the surface. Shutting down a surface that was never
/// initialized is a no-op, and dropping a surface shuts it down.
pub struct Surface<R: Rasterizer> {
    inner: R,
    state: SurfaceState,
}

impl<R: Rasterizer> Surface<R> {
    /// Wrap a rasterizer without initializing it.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            state: SurfaceState::Idle,
        }
    }

    /// Initialize the underlying rasterizer if it is not already running.
    pub fn initialize(&mut self) -> LayerframeResult<()> {
        if self.state == SurfaceState::Ready {
            return Ok(());
        }
        self.inner.initialize()?;
        self.state = SurfaceState::Ready;
        tracing::debug!("rasterizer surface initialized");
        Ok(())
    }

    /// Shut the underlying rasterizer down if it is running.
    pub fn shutdown(&mut self) {
        if self.state == SurfaceState::Idle {
            return;
        }
        self.inner.shutdown();
        self.state = SurfaceState::Idle;
        tracing::debug!("rasterizer surface shut down");
    }

    /// `true` between a successful [`Surface::initialize`] and [`Surface::shutdown`].
    pub fn is_ready(&self) -> bool {
        self.state == SurfaceState::Ready
    }

    /// Borrow the wrapped rasterizer.
    pub fn rasterizer(&self) -> &R {
        &self.inner
    }

    /// Independent, uninitialized surface for a parallel worker, if the rasterizer can fork.
    pub fn fork(&self) -> Option<Surface<R>> {
        self.inner.fork().map(Surface::new)
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> LayerframeResult<Raster> {
        self.initialize()?;
        self.inner.rasterize(job)
    }

    /// Render `markup` once, either full-canvas or cropped to its content.
    ///
    /// Full-canvas renders sit at `(0, 0)` with the canvas centre as anchor. Cropped renders
    /// pad the content box by [`CROP_PADDING`], clipped to the canvas, and anchor at the centre
    /// of the unpadded content. Empty content falls back to the full canvas.
    pub fn render_static(
        &mut self,
        markup: &str,
        canvas: Canvas,
        fonts: &[String],
        crop_to_content: bool,
    ) -> LayerframeResult<StaticRender> {
        let raster = self.rasterize(&RasterJob {
            markup,
            canvas,
            fonts,
            style: None,
        })?;

        if crop_to_content
            && let Some(bounds) = raster.content_bounds.filter(|b| !b.is_empty())
        {
            let clip: PixelRect = bounds.padded_within(CROP_PADDING, canvas);
            let cropped = raster.crop(clip)?;
            return Ok(StaticRender {
                raster: cropped,
                position: Position {
                    x: clip.x,
                    y: clip.y,
                },
                anchor_point: bounds.center(),
            });
        }

        Ok(StaticRender {
            raster,
            position: Position::default(),
            anchor_point: canvas.center(),
        })
    }

    /// Render `markup` inside a canvas-sized container carrying `style`.
    pub fn apply_style_and_capture(
        &mut self,
        markup: &str,
        canvas: Canvas,
        style: StyleState,
        fonts: &[String],
    ) -> LayerframeResult<Raster> {
        self.rasterize(&RasterJob {
            markup,
            canvas,
            fonts,
            style: Some(style),
        })
    }
}

impl<R: Rasterizer> Drop for Surface<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
