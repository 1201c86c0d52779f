//! Beat-driven timing: stagger scheduling and reveal cue synthesis.

pub mod beat;
pub mod synth;
