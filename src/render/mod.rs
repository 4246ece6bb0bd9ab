//! Off-screen rasterization: the [`rasterizer::Rasterizer`] seam, the [`surface::Surface`]
//! lifecycle wrapper and the built-in SVG backend.

/// Rasterizer trait and raster buffers.
pub mod rasterizer;
/// Lifecycle-managed rendering surface.
pub mod surface;
/// `usvg`/`resvg` rasterizer for SVG markup.
pub mod svg;
