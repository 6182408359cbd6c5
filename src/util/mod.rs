//! Shared utilities

pub mod config;
pub mod fs;
pub mod paths;
pub mod platform;
pub mod process;
pub mod shell;

pub use config::Config;
pub use paths::PathBuilder;
pub use platform::Os;
pub use shell::Shell;
