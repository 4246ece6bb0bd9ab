use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::timeline::AnimationSpec,
    foundation::error::{LayerframeError, LayerframeResult},
    stroke::{RevealSpec, StrokeStyle},
};

/// Layer `type` that routes a layer through the stroke reveal pipeline.
pub const STROKE_REVEAL_TYPE: &str = "stroke_reveal";

/// One scene as supplied by the scene source.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    #[serde(default = "default_scene_id")]
    pub scene_id: String,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

fn default_scene_id() -> String {
    "scene_unknown".to_string()
}

/// One layer as supplied by the scene source. Every field is optional here; required fields
/// are checked once by [`crate::scene::normalize`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_style: Option<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealSpec>,
}

impl LayerDef {
    pub fn is_stroke_reveal(&self) -> bool {
        self.layer_type.as_deref() == Some(STROKE_REVEAL_TYPE)
    }
}

impl SceneDef {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LayerframeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LayerframeError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LayerframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LayerframeError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// A list of scenes, as produced by a planner for a whole video.
///
/// Scene position in `scenes` is the scene index used for generated layer ids.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryboardDef {
    pub scenes: Vec<SceneDef>,
}

impl StoryboardDef {
    /// Parse either a storyboard (`{"scenes": [...]}`) or a single scene object.
    pub fn from_reader<R: std::io::Read>(r: R) -> LayerframeResult<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Storyboard { scenes: Vec<SceneDef> },
            Scene(SceneDef),
        }

        let repr: Repr = serde_json::from_reader(r)
            .map_err(|e| LayerframeError::serde(format!("parse scene JSON: {e}")))?;
        Ok(match repr {
            Repr::Storyboard { scenes } => Self { scenes },
            Repr::Scene(scene) => Self {
                scenes: vec![scene],
            },
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> LayerframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LayerframeError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
