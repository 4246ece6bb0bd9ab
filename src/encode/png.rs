use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::error::{LayerframeError, LayerframeResult},
    render::rasterizer::Raster,
};

/// Encode a straight-alpha RGBA8 raster as PNG.
pub fn encode_png(raster: &Raster) -> LayerframeResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.data.clone())
        .ok_or_else(|| {
            LayerframeError::validation(format!(
                "raster buffer does not match {}x{}",
                raster.width, raster.height
            ))
        })?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
