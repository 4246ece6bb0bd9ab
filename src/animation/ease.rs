/// Easing curves used to map linear animation progress.
///
/// Names are accepted in `snake_case` or `kebab-case`. Unknown names resolve to
/// [`Ease::EaseOut`] rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ease {
    /// `t`
    Linear,
    /// Quadratic ease-in, `t²`.
    EaseIn,
    /// Quadratic ease-out, `1-(1-t)²`.
    #[default]
    EaseOut,
    /// Smoothstep, `3t² - 2t³`.
    EaseInOut,
    /// Cubic ease-out, `1-(1-t)³`.
    EaseOutCubic,
    /// Back ease-out. Overshoots above 1.0 before settling.
    EaseOutBack,
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

impl Ease {
    /// All supported curves, in declaration order.
    pub const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::EaseOutCubic,
        Ease::EaseOutBack,
    ];

    /// Apply this easing function to progress `t`, clamped to `[0, 1]` first.
    ///
    /// The output is not re-clamped: [`Ease::EaseOutBack`] exceeds 1.0 mid-curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => 3.0 * t * t - 2.0 * t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
        }
    }

    /// Canonical `snake_case` name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::EaseOutCubic => "ease_out_cubic",
            Self::EaseOutBack => "ease_out_back",
        }
    }

    /// Look up a curve by name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|e| e.name() == norm)
    }

    /// Look up a curve by name, falling back to [`Ease::EaseOut`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(easing = name, "unknown easing, using ease_out");
            Self::default()
        })
    }
}

impl From<String> for Ease {
    fn from(name: String) -> Self {
        Self::from_name_or_default(&name)
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.name().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
