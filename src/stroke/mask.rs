use std::fmt::Write as _;

use crate::foundation::core::{Canvas, Point};

/// Default marker radius in pixels.
pub const DEFAULT_MARKER_RADIUS: f64 = 30.0;

/// Number of path points visible at `progress` (clamped to `[0, 1]`).
///
/// At least one point is visible whenever there are points at all.
pub fn reveal_count(progress: f64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    ((p * total as f64).floor() as usize).clamp(1, total)
}

/// One soft white disc of the luma matte.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MaskMarker {
    pub center: Point,
    pub radius: f64,
    /// Gaussian blur standard deviation applied to the disc edge.
    pub blur: f64,
}

/// Declarative luma matte for one frame of a stroke reveal.
///
/// Black everywhere, with accumulated blurred white discs marking the ink revealed so far.
/// Rendering is left to the rasterizer via [`RevealMask::to_markup`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealMask {
    pub canvas: Canvas,
    pub markers: Vec<MaskMarker>,
}

impl RevealMask {
    /// Build the mask showing the first [`reveal_count`] of `points`.
    pub fn new(points: &[Point], progress: f64, canvas: Canvas, radius: f64) -> Self {
        let visible = reveal_count(progress, points.len());
        let blur = (radius / 2.0).floor();
        let markers = points[..visible]
            .iter()
            .map(|&center| MaskMarker {
                center,
                radius,
                blur,
            })
            .collect();
        Self { canvas, markers }
    }

    /// Standalone SVG document for this mask, sized to the canvas.
    pub fn to_markup(&self) -> String {
        let Canvas { width, height } = self.canvas;
        let blur = self.markers.first().map(|m| m.blur).unwrap_or(0.0);

        let mut out = String::with_capacity(256 + self.markers.len() * 72);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        if blur > 0.0 {
            let _ = write!(
                out,
                r#"<defs><filter id="reveal-soft" x="-100%" y="-100%" width="300%" height="300%"><feGaussianBlur stdDeviation="{blur}"/></filter></defs>"#
            );
        }
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="black"/>"#
        );
        for m in &self.markers {
            let filter = if m.blur > 0.0 {
                r#" filter="url(#reveal-soft)""#
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="white"{filter}/>"#,
                m.center.x, m.center.y, m.radius
            );
        }
        out.push_str("</svg>");
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/mask.rs"]
mod tests;
