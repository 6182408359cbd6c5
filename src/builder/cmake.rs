//! CMake configure + native build driver.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::builder::compile_flags::{
    generate_flags_file, COMPILE_COMMANDS_FILE, DEFAULT_FLAGS_FILE,
};
use crate::builder::compiler::{Compiler, DEFAULT_THREADS};
use crate::builder::defines::Defines;
use crate::builder::executor::{BuildError, CommandRunner, ShellRunner};
use crate::util::fs::{copy_file, create_and_enter};

/// Per-invocation options for [`CMakeCommand::exec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeOptions {
    /// Highest-precedence define layer.
    pub defines: Defines,

    /// Parallel jobs for the native build tool.
    pub threads: usize,

    /// Completion-flags output; defaults to `<source>/.clang_complete`.
    /// Relative paths are taken from the working directory at call time.
    pub flags_path: Option<PathBuf>,

    /// Copy `compile_commands.json` from the build dir next to the sources.
    pub export_compile_commands: bool,
}

impl Default for CMakeOptions {
    fn default() -> Self {
        CMakeOptions {
            defines: Defines::new(),
            threads: DEFAULT_THREADS,
            flags_path: None,
            export_compile_commands: false,
        }
    }
}

/// What a successful [`CMakeCommand::exec`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub build_dir: PathBuf,
    pub configure_command: String,
    pub build_command: String,
    /// Lines written to the completion-flags file, if it was refreshed.
    pub flags_written: Option<usize>,
    /// Where `compile_commands.json` was copied, if it was.
    pub exported_compile_commands: Option<PathBuf>,
}

/// Configures a CMake project for a fixed compiler and builds it.
pub struct CMakeCommand {
    compiler: Compiler,
    common_defines: Defines,
    runner: Box<dyn CommandRunner>,
}

impl CMakeCommand {
    pub fn new(compiler: Compiler, common_defines: Defines) -> Self {
        CMakeCommand {
            compiler,
            common_defines,
            runner: Box::new(ShellRunner),
        }
    }

    /// Replace the command runner.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn compiler(&self) -> Compiler {
        self.compiler
    }

    pub fn generator(&self) -> &'static str {
        self.compiler.generator()
    }

    /// Defaults, then common defines, then `overrides`.
    pub fn merged_defines(&self, overrides: &Defines) -> Defines {
        Defines::layered([&Defines::defaults(), &self.common_defines, overrides])
    }

    /// The configure command line for `source_dir`.
    pub fn configure_command(&self, source_dir: &Path, defines: &Defines) -> String {
        let mut command = format!("cmake {}", quote(&source_dir.display().to_string()));
        for arg in defines.to_args() {
            command.push(' ');
            command.push_str(&quote(&arg));
        }
        command.push_str(&format!(" -G \"{}\"", self.generator()));
        command
    }

    /// Configure `source_dir` into `build_dir`, refresh the completion flags,
    /// then run the native build.
    ///
    /// The working directory is `build_dir` while commands run and is
    /// restored before returning on every path. A failed configure stops the
    /// build before the native tool runs. Problems with the completion-flags
    /// file are logged and otherwise ignored.
    pub fn exec(
        &self,
        source_dir: &Path,
        build_dir: &Path,
        opts: &CMakeOptions,
    ) -> Result<BuildReport, BuildError> {
        let source_dir = std::path::absolute(source_dir).with_context(|| {
            format!("failed to resolve source directory: {}", source_dir.display())
        })?;
        let build_dir = std::path::absolute(build_dir).with_context(|| {
            format!("failed to resolve build directory: {}", build_dir.display())
        })?;
        let flags_path = match &opts.flags_path {
            Some(path) => std::path::absolute(path).with_context(|| {
                format!("failed to resolve flags file: {}", path.display())
            })?,
            None => source_dir.join(DEFAULT_FLAGS_FILE),
        };

        let _guard = create_and_enter(&build_dir)?;

        let defines = self.merged_defines(&opts.defines);
        let configure_command = self.configure_command(&source_dir, &defines);
        self.runner
            .run(&configure_command)
            .map_err(BuildError::ConfigureFailed)?;

        let database = build_dir.join(COMPILE_COMMANDS_FILE);
        let flags_written = match generate_flags_file(&database, &flags_path) {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(
                    "did not refresh completion flags for {}: {}",
                    source_dir.display(),
                    e
                );
                None
            }
        };

        let exported_compile_commands = if opts.export_compile_commands {
            export_compile_commands(&database, &source_dir)
        } else {
            None
        };

        let build_command = self.compiler.build_command(opts.threads);
        self.runner
            .run(&build_command)
            .map_err(BuildError::CompileFailed)?;

        Ok(BuildReport {
            build_dir,
            configure_command,
            build_command,
            flags_written,
            exported_compile_commands,
        })
    }
}

fn export_compile_commands(database: &Path, source_dir: &Path) -> Option<PathBuf> {
    let target = source_dir.join(COMPILE_COMMANDS_FILE);
    match copy_file(database, &target) {
        Ok(()) => {
            tracing::info!(
                "copied file: {} to: {}",
                database.display(),
                source_dir.display()
            );
            Some(target)
        }
        Err(e) => {
            tracing::warn!(
                "did not find {} for: {}: {:#}",
                COMPILE_COMMANDS_FILE,
                source_dir.display(),
                e
            );
            None
        }
    }
}

/// Double-quote an argument containing whitespace.
fn quote(arg: &str) -> String {
    if arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}
