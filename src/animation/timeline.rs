use crate::{
    animation::{
        ease::Ease,
        effect::{Effect, StyleState},
    },
    foundation::core::{Fps, FrameIndex},
};

/// Frames held at the final state after the animation completes.
///
/// Downstream compositors blend against these trailing frames.
pub const HOLD_FRAMES: u64 = 2;

/// Timing of one layer animation, as authored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    /// Motion pattern.
    #[serde(default)]
    pub effect: Effect,
    /// Length of the active phase in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Transparent lead-in before the active phase, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
    /// Curve applied to linear progress during the active phase.
    #[serde(default)]
    pub easing: Ease,
}

fn default_duration_ms() -> u64 {
    500
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            effect: Effect::default(),
            duration_ms: default_duration_ms(),
            delay_ms: 0,
            easing: Ease::default(),
        }
    }
}

/// Which part of the timeline a frame falls into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FramePhase {
    /// Before the animation starts; the layer is invisible.
    Delay,
    /// Active phase with linear (un-eased) progress in `[0, 1]`.
    Animate(f64),
    /// Pinned at the final state.
    Hold,
}

/// Frame-count breakdown for one animated layer.
///
/// `total_frames == delay_frames + anim_frames + hold_frames` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FramePlan {
    pub delay_frames: u64,
    pub anim_frames: u64,
    pub hold_frames: u64,
    pub total_frames: u64,
    pub fps: Fps,
}

impl FramePlan {
    /// Build the plan for `spec` at `fps`.
    pub fn new(spec: &AnimationSpec, fps: Fps) -> Self {
        let delay_frames = fps.ms_to_frames_round(spec.delay_ms);
        let anim_frames = fps.ms_to_frames_round(spec.duration_ms).max(1);
        let hold_frames = HOLD_FRAMES;
        Self {
            delay_frames,
            anim_frames,
            hold_frames,
            total_frames: delay_frames
                .saturating_add(anim_frames)
                .saturating_add(hold_frames),
            fps,
        }
    }

    /// Classify frame `f`. Frames past the end of the plan report [`FramePhase::Hold`].
    pub fn phase(&self, f: FrameIndex) -> FramePhase {
        let f = f.0;
        if f < self.delay_frames {
            return FramePhase::Delay;
        }
        let local = f - self.delay_frames;
        if local < self.anim_frames {
            let denom = self.anim_frames.saturating_sub(1).max(1);
            return FramePhase::Animate(local as f64 / denom as f64);
        }
        FramePhase::Hold
    }

    /// Frame indices `0..total_frames`, in display order.
    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> + use<> {
        (0..self.total_frames).map(FrameIndex)
    }
}

/// Per-frame driver pairing a [`FramePlan`] with the effect and easing it animates.
#[derive(Clone, Copy, Debug)]
pub struct Timeline {
    spec: AnimationSpec,
    plan: FramePlan,
}

impl Timeline {
    /// Plan `spec` at `fps`.
    pub fn new(spec: AnimationSpec, fps: Fps) -> Self {
        let plan = FramePlan::new(&spec, fps);
        tracing::debug!(
            effect = spec.effect.name(),
            delay = plan.delay_frames,
            anim = plan.anim_frames,
            hold = plan.hold_frames,
            total = plan.total_frames,
            "frame plan"
        );
        Self { spec, plan }
    }

    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// Resolved style state for frame `f`.
    pub fn style_at(&self, f: FrameIndex) -> StyleState {
        match self.plan.phase(f) {
            FramePhase::Delay => StyleState::hidden(),
            FramePhase::Animate(t) => self.spec.effect.style_at(self.spec.easing.apply(t)),
            FramePhase::Hold => self.spec.effect.style_at(1.0),
        }
    }

    /// `(frame, style)` for every frame of the plan, in display order.
    pub fn styles(&self) -> impl Iterator<Item = (FrameIndex, StyleState)> + '_ {
        self.plan.frames().map(|f| (f, self.style_at(f)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
