use crate::{
    animation::{effect::Effect, timeline::AnimationSpec},
    encode::sink::RasterRef,
    foundation::core::{Fps, Point},
    render::surface::Position,
    scene::normalize::SceneWarning,
    stroke::RevealSpec,
};

/// Everything produced for one scene. Built fresh per render call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneRenderResult {
    pub scene_id: String,
    /// Markup layers, in declared order.
    pub layers: Vec<LayerRender>,
    /// Stroke reveal layers, in declared order.
    pub stroke_reveals: Vec<StrokeRevealRender>,
    /// Absorbed input defects.
    #[serde(default)]
    pub warnings: Vec<SceneWarning>,
}

impl SceneRenderResult {
    pub(crate) fn empty(scene_id: impl Into<String>, warnings: Vec<SceneWarning>) -> Self {
        Self {
            scene_id: scene_id.into(),
            layers: Vec::new(),
            stroke_reveals: Vec::new(),
            warnings,
        }
    }
}

/// A rendered markup layer: its baseline static raster, plus frames when animated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerRender {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub z_index: i64,
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSpec>,
    pub raster: RasterRef,
    pub width: u32,
    pub height: u32,
    pub position: Position,
    pub anchor_point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<AnimationSequence>,
}

/// Frame sequence of an animated layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSequence {
    /// One full-canvas raster per frame, in display order.
    pub frames: Vec<RasterRef>,
    pub total_frames: u64,
    pub delay_frames: u64,
    pub anim_frames: u64,
    pub hold_frames: u64,
    pub fps: Fps,
    /// Delay plus active duration, in milliseconds.
    pub duration_ms: u64,
    pub effect: Effect,
}

/// A rendered stroke reveal: the unmasked stroke and its ordered mask frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeRevealRender {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub z_index: i64,
    pub hq: RasterRef,
    pub masks: Vec<RasterRef>,
    pub reveal: RevealSpec,
    pub total_frames: u64,
    pub fps: Fps,
}
