//! Stroke reveal: path sampling, per-frame luma masks and the high-quality stroke document.

use std::fmt::Write as _;

use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Fps},
};

/// Progressive-reveal luma masks.
pub mod mask;
/// Polyline sampling of SVG path strings.
pub mod sampler;

/// Reveal duration used when a stroke layer does not declare one.
pub const DEFAULT_REVEAL_MS: u64 = 1200;

/// Number of points sampled along a stroke for mask generation.
pub const DEFAULT_MASK_POINTS: usize = 60;

/// Visual style of a stroke path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    #[serde(default = "default_stroke_color", alias = "stroke")]
    pub stroke_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub glow: bool,
    #[serde(default = "default_glow_color")]
    pub glow_color: String,
    #[serde(default = "default_glow_blur")]
    pub glow_blur: f64,
}

fn default_stroke_color() -> String {
    "#00e5ff".to_string()
}

fn default_stroke_width() -> f64 {
    4.0
}

fn default_glow_color() -> String {
    "rgba(0,229,255,0.3)".to_string()
}

fn default_glow_blur() -> f64 {
    12.0
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            glow: false,
            glow_color: default_glow_color(),
            glow_blur: default_glow_blur(),
        }
    }
}

/// Reveal timing of a stroke layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    #[serde(default = "default_reveal_ms")]
    pub duration_ms: u64,
}

fn default_reveal_ms() -> u64 {
    DEFAULT_REVEAL_MS
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_REVEAL_MS,
        }
    }
}

/// Mask frame schedule for a stroke reveal.
///
/// Progress always follows cubic ease-out, independent of any layer easing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealSchedule {
    pub total_frames: u64,
}

impl RevealSchedule {
    /// Schedule `spec` at `fps`. A reveal shorter than half a frame has no masks.
    pub fn new(spec: &RevealSpec, fps: Fps) -> Self {
        Self {
            total_frames: fps.ms_to_frames_round(spec.duration_ms),
        }
    }

    /// Linear progress of mask `frame`; 0 for single-frame (and empty) schedules.
    pub fn linear_progress(&self, frame: u64) -> f64 {
        if self.total_frames <= 1 {
            return 0.0;
        }
        frame as f64 / (self.total_frames - 1) as f64
    }

    /// Eased progress of mask `frame`.
    pub fn progress(&self, frame: u64) -> f64 {
        Ease::EaseOutCubic.apply(self.linear_progress(frame))
    }
}

/// Standalone SVG document drawing the full stroke, unmasked.
pub fn stroke_markup(svg_path: &str, style: &StrokeStyle, canvas: Canvas) -> String {
    let Canvas { width, height } = canvas;
    let mut out = String::with_capacity(512 + svg_path.len());
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    if style.glow {
        let _ = write!(
            out,
            concat!(
                r#"<defs><filter id="glow" x="-50%" y="-50%" width="200%" height="200%">"#,
                r#"<feGaussianBlur in="SourceAlpha" stdDeviation="{blur}" result="blur"/>"#,
                r#"<feFlood flood-color="{color}"/>"#,
                r#"<feComposite in2="blur" operator="in" result="halo"/>"#,
                r#"<feMerge><feMergeNode in="halo"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
                r#"</filter></defs>"#
            ),
            blur = style.glow_blur,
            color = escape_attr(&style.glow_color),
        );
    }
    let _ = write!(
        out,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"{}/>"#,
        escape_attr(svg_path),
        escape_attr(&style.stroke_color),
        style.stroke_width,
        if style.glow {
            r#" filter="url(#glow)""#
        } else {
            ""
        }
    );
    out.push_str("</svg>");
    out
}

/// Escape a value for use inside a double-quoted XML attribute.
pub(crate) fn escape_attr(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/mod.rs"]
mod tests;
