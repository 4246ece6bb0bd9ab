use crate::foundation::error::{LayerframeError, LayerframeResult};

pub use kurbo::{Affine, Point, Vec2};

/// 0-based frame index inside one rendered sequence.
///
/// Index order is display order at the sequence's frame rate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> LayerframeResult<Self> {
        if den == 0 {
            return Err(LayerframeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LayerframeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate (`num/1`).
    pub fn whole(num: u32) -> LayerframeResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a millisecond span to a frame count, rounding half up.
    ///
    /// Exact integer arithmetic, so `500ms @ 30fps` is always 15 frames.
    pub fn ms_to_frames_round(self, ms: u64) -> u64 {
        crate::foundation::math::round_div(
            u128::from(ms) * u128::from(self.num),
            1000 * u128::from(self.den),
        )
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> LayerframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(LayerframeError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Geometric centre of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 720,
            height: 1280,
        }
    }
}

/// Integer pixel rectangle (top-left origin, `width`/`height` in pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Geometric centre.
    pub fn center(self) -> Point {
        Point::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Grow by `pad` on every side, then clip to `canvas`.
    ///
    /// The clipped width/height are measured from the clipped origin, so a rectangle touching
    /// the right edge never extends past the canvas.
    pub fn padded_within(self, pad: u32, canvas: Canvas) -> Self {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let width = self
            .width
            .saturating_add(pad.saturating_mul(2))
            .min(canvas.width.saturating_sub(x));
        let height = self
            .height
            .saturating_add(pad.saturating_mul(2))
            .min(canvas.height.saturating_sub(y));
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
