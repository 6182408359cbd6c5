//! Command implementations

pub mod artifacts;
pub mod build;
pub mod clean;
pub mod completions;
pub mod flags;
pub mod toolchain;
