use crate::{
    animation::timeline::AnimationSpec,
    encode::sink::is_safe_layer_id,
    scene::model::{LayerDef, SceneDef},
    stroke::{RevealSpec, StrokeStyle},
};

/// Soft cap on layers per scene.
pub const DEFAULT_MAX_LAYERS: usize = 15;

/// Base z-index assigned to the first layer when none is declared.
pub const AUTO_Z_BASE: i64 = 100;
/// Z-index step between consecutive auto-assigned layers.
pub const AUTO_Z_STEP: i64 = 50;

/// Layer `type` reported for markup layers that do not declare one.
pub const DEFAULT_LAYER_TYPE: &str = "html";

/// Validated scene, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub scene_id: String,
    /// Position of this scene in its storyboard; part of generated layer ids.
    pub scene_index: usize,
    pub layers: Vec<Layer>,
}

/// Validated layer with its id and z-index resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: String,
    /// Position of the layer in the declared scene, before any layer was skipped.
    pub index: usize,
    pub z_index: i64,
    pub description: Option<String>,
    pub kind: LayerKind,
}

/// What a layer renders.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    /// Markup rendered through the rasterizer, optionally animated.
    Markup {
        /// Declared layer `type`, passed through to results.
        layer_type: String,
        markup: String,
        is_static: bool,
        animation: Option<AnimationSpec>,
    },
    /// Stroke path revealed by a sequence of luma masks.
    StrokeReveal {
        svg_path: String,
        style: StrokeStyle,
        reveal: RevealSpec,
    },
}

/// Kind of absorbed input defect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A non-stroke layer had no markup and was skipped.
    MissingHtml,
    /// The scene had more layers than the cap and was truncated.
    LayersTruncated,
    /// A stroke path had fewer than two coordinate pairs; a fallback line was used.
    FallbackPath,
    /// A declared layer id could not name output files; the generated id was used.
    UnsafeLayerId,
}

/// Non-fatal problem recorded while normalizing or rendering a scene.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneWarning {
    pub kind: WarningKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
    pub message: String,
}

impl SceneWarning {
    pub(crate) fn new(
        kind: WarningKind,
        layer_id: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        let w = Self {
            kind,
            layer_id: layer_id.map(str::to_string),
            message: message.into(),
        };
        tracing::warn!(
            kind = ?w.kind,
            layer = w.layer_id.as_deref().unwrap_or("-"),
            "{}",
            w.message
        );
        w
    }
}

/// Deterministic id for the `layer_index`-th layer of the `scene_index`-th scene.
pub fn auto_layer_id(scene_index: usize, layer_index: usize) -> String {
    format!("layer_{scene_index}_{layer_index}")
}

/// Deterministic z-index for the `layer_index`-th layer.
pub fn auto_z_index(layer_index: usize) -> i64 {
    AUTO_Z_BASE + AUTO_Z_STEP * layer_index as i64
}

/// Validate `def` once into a tagged [`Scene`].
///
/// Layers past `max_layers` are dropped. Markup layers without `html` are skipped. Ids and
/// z-indices are derived from declared positions, so skipping a layer never renumbers the
/// others. Declared ids that could escape an output directory are replaced by generated
/// ones. Every absorbed defect is returned as a [`SceneWarning`].
pub fn normalize_scene(
    def: &SceneDef,
    scene_index: usize,
    max_layers: usize,
) -> (Scene, Vec<SceneWarning>) {
    let mut warnings = Vec::new();

    let declared = def.layers.len();
    if declared > max_layers {
        warnings.push(SceneWarning::new(
            WarningKind::LayersTruncated,
            None,
            format!(
                "scene '{}' has {declared} layers; truncating to {max_layers}",
                def.scene_id
            ),
        ));
    }

    let mut layers = Vec::with_capacity(declared.min(max_layers));
    for (j, layer) in def.layers.iter().take(max_layers).enumerate() {
        let id = match layer.id.as_deref() {
            Some(raw) if is_safe_layer_id(raw) => raw.to_string(),
            Some(raw) => {
                let id = auto_layer_id(scene_index, j);
                warnings.push(SceneWarning::new(
                    WarningKind::UnsafeLayerId,
                    Some(id.as_str()),
                    format!("layer id '{raw}' cannot name output files; using '{id}'"),
                ));
                id
            }
            None => auto_layer_id(scene_index, j),
        };
        match normalize_kind(layer) {
            Some(kind) => layers.push(Layer {
                z_index: layer.z_index.unwrap_or_else(|| auto_z_index(j)),
                description: layer.description.clone(),
                index: j,
                id,
                kind,
            }),
            None => warnings.push(SceneWarning::new(
                WarningKind::MissingHtml,
                Some(id.as_str()),
                format!("layer '{id}' has no html; skipping"),
            )),
        }
    }

    (
        Scene {
            scene_id: def.scene_id.clone(),
            scene_index,
            layers,
        },
        warnings,
    )
}

fn normalize_kind(layer: &LayerDef) -> Option<LayerKind> {
    if layer.is_stroke_reveal() {
        return Some(LayerKind::StrokeReveal {
            svg_path: layer.svg_path.clone().unwrap_or_default(),
            style: layer.svg_style.clone().unwrap_or_default(),
            reveal: layer.reveal.unwrap_or_default(),
        });
    }

    let markup = layer.html.as_deref().filter(|h| !h.trim().is_empty())?;
    Some(LayerKind::Markup {
        layer_type: layer
            .layer_type
            .clone()
            .unwrap_or_else(|| DEFAULT_LAYER_TYPE.to_string()),
        markup: markup.to_string(),
        is_static: layer.is_static.unwrap_or(true),
        animation: layer.animation,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/normalize.rs"]
mod tests;
