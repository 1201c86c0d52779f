//! Multi-scene composition over the four narrative pillars.

pub mod pillars;
