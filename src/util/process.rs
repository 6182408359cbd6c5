//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use thiserror::Error;

/// Failure while running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {}", display_code(.code))]
    Failed { command: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<signal>".to_string(),
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    /// Passed verbatim after `args` (Windows `cmd /C` lines).
    raw_tail: Option<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            raw_tail: None,
        }
    }

    /// Run a full command line through the platform shell
    /// (`cmd /C` on Windows, `sh -c` elsewhere).
    pub fn shell(command: impl Into<String>) -> Self {
        let command = command.into();
        if cfg!(windows) {
            let mut pb = ProcessBuilder::new("cmd").arg("/C");
            pb.raw_tail = Some(command);
            pb
        } else {
            ProcessBuilder::new("sh").arg("-c").arg(command)
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        #[cfg(windows)]
        if let Some(ref raw) = self.raw_tail {
            use std::os::windows::process::CommandExt;
            cmd.raw_arg(raw);
        }

        cmd
    }

    /// Execute with captured stdout/stderr and wait for completion.
    pub fn exec(&self) -> Result<Output, CommandError> {
        let mut cmd = self.build_command();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        cmd.output().map_err(|source| CommandError::Spawn {
            command: self.display_command(),
            source,
        })
    }

    /// Execute with inherited stdio so the child's output reaches the terminal.
    pub fn status(&self) -> Result<ExitStatus, CommandError> {
        let mut cmd = self.build_command();
        cmd.status().map_err(|source| CommandError::Spawn {
            command: self.display_command(),
            source,
        })
    }

    /// Execute with inherited stdio and require a zero exit code.
    pub fn run(&self) -> Result<(), CommandError> {
        let status = self.status()?;
        if !status.success() {
            return Err(CommandError::Failed {
                command: self.display_command(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Execute silently and report only whether it exited successfully.
    pub fn succeeds(&self) -> bool {
        let mut cmd = self.build_command();
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        cmd.status().map(|s| s.success()).unwrap_or(false)
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.extend(self.raw_tail.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}
