//! The scene descriptor boundary: the JSON model and its accumulating
//! validation, plus the template registry scenes activate against.

pub mod model;
pub mod registry;
pub mod validate;
