//! Scene rendering sessions.

/// Scene compositor: per-layer dispatch, sequencing and result assembly.
pub mod compositor;
