//! CLI command implementations

pub mod generators;
pub mod layer;
pub mod render;
