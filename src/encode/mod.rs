//! Raster encoding and asset persistence.
//!
//! Rasters are encoded to PNG and handed to an [`sink::AssetSink`], which decides whether the
//! bytes are returned inline or written under a directory.

/// PNG encoding.
pub mod png;
/// Asset sinks and deterministic asset names.
pub mod sink;
