use crate::{
    animation::effect::StyleState,
    foundation::{
        core::{Canvas, PixelRect},
        error::{LayerframeError, LayerframeResult},
    },
};

/// One rasterization request.
#[derive(Clone, Copy, Debug)]
pub struct RasterJob<'a> {
    /// Markup fragment to render. What markup a rasterizer understands is backend-defined.
    pub markup: &'a str,
    /// Canvas (viewport) size.
    pub canvas: Canvas,
    /// Web font family names the fragment expects to be available.
    pub fonts: &'a [String],
    /// Style applied to a canvas-sized container around the fragment. `None` renders the
    /// fragment as authored.
    pub style: Option<StyleState>,
}

/// A canvas-sized (or cropped) RGBA8 image, straight alpha, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Bounding box of the rendered content inside this raster, if anything was drawn.
    pub content_bounds: Option<PixelRect>,
}

impl Raster {
    /// Wrap RGBA8 bytes and derive content bounds from the alpha channel.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> LayerframeResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(LayerframeError::validation(format!(
                "raster data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        let content_bounds = alpha_bounds(&data, width, height);
        Ok(Self {
            width,
            height,
            data,
            content_bounds,
        })
    }

    /// Copy out `rect`, which must lie inside the raster.
    pub fn crop(&self, rect: PixelRect) -> LayerframeResult<Raster> {
        if rect.x.saturating_add(rect.width) > self.width
            || rect.y.saturating_add(rect.height) > self.height
        {
            return Err(LayerframeError::validation(format!(
                "crop {rect:?} exceeds raster {}x{}",
                self.width, self.height
            )));
        }
        let stride = self.width as usize * 4;
        let row_len = rect.width as usize * 4;
        let mut data = Vec::with_capacity(row_len * rect.height as usize);
        for y in rect.y..rect.y + rect.height {
            let start = y as usize * stride + rect.x as usize * 4;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Raster::from_rgba8(rect.width, rect.height, data)
    }
}

/// Tight bounding box of pixels with non-zero alpha. Rows missing from a short `data` count
/// as transparent.
pub(crate) fn alpha_bounds(data: &[u8], width: u32, height: u32) -> Option<PixelRect> {
    let (w, h) = (width as usize, height as usize);
    if w == 0 {
        return None;
    }
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;
    let mut any = false;

    for (y, row) in data.chunks_exact(w * 4).take(h).enumerate() {
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            any = true;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    any.then(|| PixelRect {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    })
}

/// Off-screen rendering surface.
///
/// Implementations hold mutable document state and are driven strictly sequentially: one job
/// is fully rendered and read back before the next is issued. Use [`Rasterizer::fork`] to obtain
/// an independent surface for another thread.
pub trait Rasterizer: Send {
    /// Acquire underlying resources. Called once before the first job.
    fn initialize(&mut self) -> LayerframeResult<()>;

    /// Render `job` into a canvas-sized raster.
    fn rasterize(&mut self, job: &RasterJob<'_>) -> LayerframeResult<Raster>;

    /// Release underlying resources. Called at most once after [`Rasterizer::initialize`].
    fn shutdown(&mut self);

    /// Create an equivalent, independent surface for parallel workers.
    ///
    /// The default cannot fork, which keeps rendering sequential.
    fn fork(&self) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
