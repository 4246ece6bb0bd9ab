/// Convenience result type used across layerframe.
pub type LayerframeResult<T> = Result<T, LayerframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Recoverable input defects (missing layer markup, malformed stroke paths, unknown effect or
/// easing names) never appear here; they are absorbed with a fallback and reported as scene
/// warnings instead.
#[derive(thiserror::Error, Debug)]
pub enum LayerframeError {
    /// Invalid user-provided options or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while planning or sampling an animation.
    #[error("animation error: {0}")]
    Animation(String),

    /// The rasterizer failed while producing output for a layer.
    #[error("render error on layer '{layer_id}'{}: {message}", frame_suffix(.frame))]
    Render {
        /// Id of the layer being rendered.
        layer_id: String,
        /// Frame (or mask) index inside the layer's sequence, when the failure was per-frame.
        frame: Option<u64>,
        /// Rasterizer-provided detail.
        message: String,
    },

    /// The render was cancelled before completion.
    #[error("render cancelled")]
    Cancelled,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn frame_suffix(frame: &Option<u64>) -> String {
    match frame {
        Some(f) => format!(" (frame {f})"),
        None => String::new(),
    }
}

impl LayerframeError {
    /// Build a [`LayerframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerframeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`LayerframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`LayerframeError::Render`] value for a whole-layer render.
    pub fn render(layer_id: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::Render {
            layer_id: layer_id.into(),
            frame: None,
            message: msg.to_string(),
        }
    }

    /// Build a [`LayerframeError::Render`] value tagged with a frame index.
    pub fn render_frame(
        layer_id: impl Into<String>,
        frame: u64,
        msg: impl std::fmt::Display,
    ) -> Self {
        Self::Render {
            layer_id: layer_id.into(),
            frame: Some(frame),
            message: msg.to_string(),
        }
    }

    /// Id of the layer a render error belongs to, if any.
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            Self::Render { layer_id, .. } => Some(layer_id),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
