//! Time-to-progress mapping: easing curves, effect styles and per-frame timelines.

/// Easing curves.
pub mod ease;
/// Named effects and the style state they resolve to.
pub mod effect;
/// Frame plans and per-frame style resolution.
pub mod timeline;
