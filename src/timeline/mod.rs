//! Per-frame cue resolution and frame snapshots.

pub mod ease;
pub mod fingerprint;
pub mod frame;
pub mod resolver;
