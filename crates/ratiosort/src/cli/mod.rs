//! CLI command implementations.

pub mod config;
pub mod presets;
pub mod probe;
pub mod sort;
