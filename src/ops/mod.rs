//! High-level operations.
//!
//! This module contains the implementation of cmbuild commands.

pub mod artifacts;
pub mod cmbuild_build;
pub mod cmbuild_clean;

pub use artifacts::collect_artifacts;
pub use cmbuild_build::{build, BuildOptions, BuildResult};
pub use cmbuild_clean::clean;
