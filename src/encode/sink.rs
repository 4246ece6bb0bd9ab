use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    encode::png::encode_png,
    foundation::error::{LayerframeError, LayerframeResult},
    render::rasterizer::Raster,
};

/// `true` if `layer_id` can prefix asset names without leaving a sink root.
///
/// Rejects empty ids and ids containing path separators, drive colons, NUL or `..`.
pub fn is_safe_layer_id(layer_id: &str) -> bool {
    !layer_id.is_empty()
        && !layer_id.contains("..")
        && !layer_id.contains(['/', '\\', ':', '\0'])
}

/// Role of a raster within a layer's outputs. Determines its deterministic name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetName {
    /// Baseline static render: `{id}.png`.
    Static,
    /// Animation frame: `{id}_frames/frame_{index:04}.png`.
    Frame(u64),
    /// Stroke reveal mask: `{id}_masks/mask_{index:04}.png`.
    Mask(u64),
    /// Unmasked stroke render: `{id}_hq.png`.
    Hq,
}

impl AssetName {
    /// Path of this asset relative to the sink root, using `/` separators.
    pub fn relative_path(self, layer_id: &str) -> String {
        match self {
            Self::Static => format!("{layer_id}.png"),
            Self::Frame(i) => format!("{layer_id}_frames/frame_{i:04}.png"),
            Self::Mask(i) => format!("{layer_id}_masks/mask_{i:04}.png"),
            Self::Hq => format!("{layer_id}_hq.png"),
        }
    }
}

/// Where a persisted raster ended up.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RasterRef {
    /// Encoded PNG bytes.
    Bytes(Vec<u8>),
    /// Path of the written PNG file.
    Path(PathBuf),
}

impl RasterRef {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Path(_) => None,
        }
    }
}

/// Destination for rendered rasters.
///
/// Implementors only store encoded PNG bytes; [`AssetSink::store`] encodes first. Callers that
/// share a sink between threads encode outside their lock and call [`AssetSink::store_png`].
pub trait AssetSink: Send {
    /// Persist already-encoded PNG bytes as `name` of layer `layer_id`.
    fn store_png(
        &mut self,
        layer_id: &str,
        name: AssetName,
        png: Vec<u8>,
    ) -> LayerframeResult<RasterRef>;

    /// Encode `raster` and persist it as `name` of layer `layer_id`.
    fn store(
        &mut self,
        layer_id: &str,
        name: AssetName,
        raster: &Raster,
    ) -> LayerframeResult<RasterRef> {
        self.store_png(layer_id, name, encode_png(raster)?)
    }
}

/// Returns every raster inline as PNG bytes.
#[derive(Debug, Default)]
pub struct InMemorySink {
    names: Vec<String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative names of stored rasters, in storage order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl AssetSink for InMemorySink {
    fn store_png(
        &mut self,
        layer_id: &str,
        name: AssetName,
        png: Vec<u8>,
    ) -> LayerframeResult<RasterRef> {
        self.names.push(name.relative_path(layer_id));
        Ok(RasterRef::Bytes(png))
    }
}

/// Writes PNG files under a root directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSink for DirectorySink {
    fn store_png(
        &mut self,
        layer_id: &str,
        name: AssetName,
        png: Vec<u8>,
    ) -> LayerframeResult<RasterRef> {
        if !is_safe_layer_id(layer_id) {
            return Err(LayerframeError::validation(format!(
                "layer id '{layer_id}' cannot name a file under {}",
                self.root.display()
            )));
        }
        let path = self.root.join(name.relative_path(layer_id));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
        std::fs::write(&path, png).with_context(|| format!("write {}", path.display()))?;
        tracing::trace!(path = %path.display(), "raster written");
        Ok(RasterRef::Path(path))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
