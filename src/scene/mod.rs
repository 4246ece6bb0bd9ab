//! Scene descriptors: the JSON boundary, normalization into tagged layers, and render results.

/// JSON-facing scene and layer descriptors.
pub mod model;
/// One-time validation into [`normalize::Scene`].
pub mod normalize;
/// Scene render results.
pub mod result;
