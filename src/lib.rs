//! Layerframe turns declarative scene layers into transparent raster sequences for video
//! compositing.
//!
//! - Describe a scene as [`SceneDef`] (usually JSON from a planner)
//! - Create a [`SceneCompositor`] around a [`Rasterizer`] such as [`SvgRasterizer`]
//! - Render into an [`AssetSink`]: inline PNG bytes or files under a directory
//!
//! Layers are either markup (rendered once, plus a per-frame sequence when animated) or stroke
//! reveals (one unmasked stroke plus a sequence of luma masks).
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves, effects and frame timelines.
pub mod animation;
/// PNG encoding and asset sinks.
pub mod encode;
/// Rasterizer boundary and built-in SVG backend.
pub mod render;
/// Scene descriptors, normalization and results.
pub mod scene;
/// Scene compositor.
pub mod session;
/// Stroke path sampling and reveal masks.
pub mod stroke;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, PixelRect, Point, Vec2};
pub use crate::foundation::error::{LayerframeError, LayerframeResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::effect::{Effect, SpatialTransform, StyleState};
pub use crate::animation::timeline::{AnimationSpec, FramePhase, FramePlan, Timeline};
pub use crate::encode::sink::{
    AssetName, AssetSink, DirectorySink, InMemorySink, RasterRef, is_safe_layer_id,
};
pub use crate::render::rasterizer::{Raster, RasterJob, Rasterizer};
pub use crate::render::surface::{Position, StaticRender, Surface};
pub use crate::render::svg::{SvgRasterizer, SvgRasterizerOpts};
pub use crate::scene::model::{LayerDef, SceneDef, StoryboardDef};
pub use crate::scene::normalize::{Scene, SceneWarning, WarningKind};
pub use crate::scene::result::{
    AnimationSequence, LayerRender, SceneRenderResult, StrokeRevealRender,
};
pub use crate::session::compositor::{CancelToken, CompositorOpts, PartialRender, SceneCompositor};
pub use crate::stroke::{RevealSpec, StrokeStyle};
