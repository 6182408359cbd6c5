//! cmbuild - a small CMake driver.
//!
//! Picks a native build tool the host can run, configures a CMake project
//! with layered defines, runs the build, and keeps an editor
//! completion-flags file in sync with the project's compile commands.

pub mod builder;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only available when compiling tests. Provides a recording command runner,
/// a fixed executable probe, and a lock for tests that change the working
/// directory.
#[cfg(test)]
pub mod test_support;

pub use builder::{CMakeCommand, CMakeOptions, Compiler, Defines};
pub use util::platform::Os;
