//! Frame-domain primitives shared by every layer.

pub mod core;
pub mod error;
