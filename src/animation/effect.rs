use crate::foundation::core::{Affine, Point, Vec2};

/// Named motion pattern applied to a layer while it animates in (or out).
///
/// Unknown names resolve to [`Effect::FadeIn`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Effect {
    #[default]
    FadeIn,
    FadeOut,
    ScaleUp,
    ScaleDown,
    ScaleOut,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    BounceIn,
}

/// Distance in pixels covered by the slide effects.
pub const SLIDE_DISTANCE_PX: f64 = 120.0;

impl Effect {
    /// All supported effects, in declaration order.
    pub const ALL: [Effect; 10] = [
        Effect::FadeIn,
        Effect::FadeOut,
        Effect::ScaleUp,
        Effect::ScaleDown,
        Effect::ScaleOut,
        Effect::SlideUp,
        Effect::SlideDown,
        Effect::SlideLeft,
        Effect::SlideRight,
        Effect::BounceIn,
    ];

    /// Canonical `snake_case` name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
            Self::ScaleUp => "scale_up",
            Self::ScaleDown => "scale_down",
            Self::ScaleOut => "scale_out",
            Self::SlideUp => "slide_up",
            Self::SlideDown => "slide_down",
            Self::SlideLeft => "slide_left",
            Self::SlideRight => "slide_right",
            Self::BounceIn => "bounce_in",
        }
    }

    /// Look up an effect by name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|e| e.name() == norm)
    }

    /// Look up an effect by name, falling back to [`Effect::FadeIn`].
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(effect = name, "unknown effect, using fade_in");
            Self::default()
        })
    }

    /// Resolve the visual state of this effect at (already eased) progress `p`.
    pub fn style_at(self, p: f64) -> StyleState {
        match self {
            Self::FadeIn => StyleState::new(p, SpatialTransform::None),
            Self::FadeOut => StyleState::new(1.0 - p, SpatialTransform::None),
            Self::ScaleUp => StyleState::new(p, SpatialTransform::Scale(0.3 + 0.7 * p)),
            Self::ScaleDown => StyleState::new(p, SpatialTransform::Scale(1.5 - 0.5 * p)),
            Self::ScaleOut => StyleState::new(1.0 - p, SpatialTransform::Scale(1.0 + 0.5 * p)),
            Self::SlideUp => StyleState::new(
                p,
                SpatialTransform::TranslateY(SLIDE_DISTANCE_PX * (1.0 - p)),
            ),
            Self::SlideDown => StyleState::new(
                p,
                SpatialTransform::TranslateY(-SLIDE_DISTANCE_PX * (1.0 - p)),
            ),
            Self::SlideLeft => StyleState::new(
                p,
                SpatialTransform::TranslateX(SLIDE_DISTANCE_PX * (1.0 - p)),
            ),
            Self::SlideRight => StyleState::new(
                p,
                SpatialTransform::TranslateX(-SLIDE_DISTANCE_PX * (1.0 - p)),
            ),
            Self::BounceIn => StyleState::new(
                (2.0 * p).min(1.0),
                SpatialTransform::Scale(bounce_scale(p)),
            ),
        }
    }
}

/// Piecewise bounce: `0 → 1.15` over `[0, 0.6]`, `1.15 → 0.95` over `[0.6, 0.8]`,
/// `0.95 → 1.0` over `[0.8, 1.0]`.
fn bounce_scale(p: f64) -> f64 {
    if p < 0.6 {
        (p / 0.6) * 1.15
    } else if p < 0.8 {
        1.15 - ((p - 0.6) / 0.2) * 0.20
    } else {
        0.95 + ((p - 0.8) / 0.2) * 0.05
    }
}

impl From<String> for Effect {
    fn from(name: String) -> Self {
        Self::from_name_or_default(&name)
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        effect.name().to_string()
    }
}

/// Spatial part of a [`StyleState`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SpatialTransform {
    /// Identity.
    None,
    /// Uniform scale around the layer container's centre.
    Scale(f64),
    /// Horizontal translation in pixels.
    TranslateX(f64),
    /// Vertical translation in pixels.
    TranslateY(f64),
}

impl SpatialTransform {
    /// Affine form, scaling about `origin`.
    pub fn to_affine(self, origin: Point) -> Affine {
        match self {
            Self::None => Affine::IDENTITY,
            Self::Scale(s) => {
                let o = origin.to_vec2();
                Affine::translate(o) * Affine::scale(s) * Affine::translate(-o)
            }
            Self::TranslateX(x) => Affine::translate(Vec2::new(x, 0.0)),
            Self::TranslateY(y) => Affine::translate(Vec2::new(0.0, y)),
        }
    }
}

/// Opacity plus spatial transform for one frame of one layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleState {
    /// Layer opacity. Follows the eased progress, so it can leave `[0, 1]` for overshooting
    /// curves; rasterizers clamp when applying it.
    pub opacity: f64,
    /// Spatial transform.
    pub transform: SpatialTransform,
}

impl StyleState {
    /// Build a style state.
    pub fn new(opacity: f64, transform: SpatialTransform) -> Self {
        Self { opacity, transform }
    }

    /// Fully transparent, untransformed.
    pub fn hidden() -> Self {
        Self::new(0.0, SpatialTransform::None)
    }

    /// Opacity clamped to the displayable range.
    pub fn clamped_opacity(&self) -> f64 {
        if self.opacity.is_nan() {
            0.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        }
    }

    /// Inline CSS for browser-backed rasterizers that apply the state to a container element.
    pub fn to_css(&self) -> String {
        match self.transform {
            SpatialTransform::None => format!("opacity:{:.3};", self.opacity),
            SpatialTransform::Scale(s) => format!(
                "transform:scale({s:.3});opacity:{:.3};transform-origin:center center;",
                self.opacity
            ),
            SpatialTransform::TranslateX(x) => {
                format!("transform:translateX({x:.1}px);opacity:{:.3};", self.opacity)
            }
            SpatialTransform::TranslateY(y) => {
                format!("transform:translateY({y:.1}px);opacity:{:.3};", self.opacity)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/effect.rs"]
mod tests;
