//! Running build commands inside a directory.

use std::path::Path;

use thiserror::Error;

use crate::util::fs::DirGuard;
use crate::util::platform;
use crate::util::process::CommandError;

/// Error from a build step.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("CMake configuration failed")]
    ConfigureFailed(#[source] CommandError),

    #[error("build command failed")]
    CompileFailed(#[source] CommandError),

    #[error("command failed")]
    Command(#[source] CommandError),

    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),
}

/// Executes a shell command line in the current working directory.
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<(), CommandError>;
}

/// Runs commands through the platform shell with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<(), CommandError> {
        platform::exec_command(command)
    }
}

/// A command line to run inside a particular directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirCommand {
    command: String,
}

impl DirCommand {
    pub fn new(command: impl Into<String>) -> Self {
        DirCommand {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the command inside `dir`, then return to the previous working
    /// directory whether or not the command succeeded. `dir` must exist.
    pub fn exec(&self, dir: &Path, runner: &dyn CommandRunner) -> Result<(), BuildError> {
        let _guard = DirGuard::enter(dir)?;
        runner.run(&self.command).map_err(BuildError::Command)
    }
}
