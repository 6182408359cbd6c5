//! Implementation of `cmbuild build`.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::cmake::{is_cmake_project, BuildReport, CMakeCommand, CMakeOptions};
use crate::builder::compiler::{
    select_compiler, Compiler, ExecutableProbe, HostProbe, DEFAULT_THREADS,
};
use crate::builder::defines::Defines;
use crate::builder::executor::{CommandRunner, ShellRunner};
use crate::ops::artifacts::collect_artifacts;
use crate::util::config::Config;
use crate::util::paths::PathBuilder;
use crate::util::platform::Os;

/// Default build directory, relative to the source directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Options for the build command. Unset fields fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Directory holding the top-level CMakeLists.txt
    pub source_dir: PathBuf,

    /// Build directory (relative paths are taken from the source dir)
    pub build_dir: Option<PathBuf>,

    /// Explicit compiler key
    pub compiler: Option<String>,

    /// Number of parallel jobs
    pub threads: Option<usize>,

    /// Per-invocation defines, overriding config defines
    pub defines: Defines,

    /// Completion-flags file location (relative paths are taken from the
    /// source dir)
    pub flags_path: Option<PathBuf>,

    /// Copy compile_commands.json next to the sources
    pub export_compile_commands: Option<bool>,

    /// Move built static libraries here (relative paths are taken from the
    /// source dir)
    pub artifacts_dir: Option<PathBuf>,
}

/// Result of a build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub compiler: Compiler,
    pub report: BuildReport,
    /// Static libraries moved into the artifacts directory.
    pub artifacts: Vec<PathBuf>,
}

/// Build with the host's probe and shell.
pub fn build(opts: &BuildOptions, config: &Config) -> Result<BuildResult> {
    build_with(
        opts,
        config,
        Os::current(),
        &HostProbe::default(),
        ShellRunner,
    )
}

/// Build with explicit platform, probe, and runner.
pub fn build_with(
    opts: &BuildOptions,
    config: &Config,
    os: Os,
    probe: &dyn ExecutableProbe,
    runner: impl CommandRunner + 'static,
) -> Result<BuildResult> {
    if !is_cmake_project(&opts.source_dir) {
        bail!(
            "no CMakeLists.txt in {}\n\
             help: pass the directory containing your top-level CMakeLists.txt",
            opts.source_dir.display()
        );
    }

    let compiler_name = opts.compiler.as_deref().or(config.build.compiler.as_deref());
    let Some(compiler) = select_compiler(compiler_name, os, probe) else {
        match compiler_name {
            Some(name) if !name.trim().is_empty() => bail!(
                "unknown compiler `{}`\n\
                 help: expected one of gcc, mingw, jom, nmake",
                name
            ),
            _ => bail!(
                "no supported build tool found for {}\n\
                 help: install make (or jom/nmake/mingw32-make on Windows), \
                 or pass --compiler",
                os
            ),
        }
    };
    tracing::info!("using compiler `{}` ({})", compiler, compiler.generator());

    let build_dir = resolve_build_dir(opts, config);

    let cmake_opts = CMakeOptions {
        defines: opts.defines.clone(),
        threads: opts
            .threads
            .or(config.build.threads)
            .unwrap_or(DEFAULT_THREADS),
        flags_path: opts
            .flags_path
            .as_ref()
            .or(config.build.flags_file.as_ref())
            .map(|path| PathBuilder::new(&opts.source_dir).join(path).to_path_buf()),
        export_compile_commands: opts
            .export_compile_commands
            .or(config.build.export_compile_commands)
            .unwrap_or(false),
    };

    let common = Defines::from(config.defines.clone());
    let command = CMakeCommand::new(compiler, common).with_runner(runner);
    let report = command.exec(&opts.source_dir, &build_dir, &cmake_opts)?;

    let artifacts = match opts.artifacts_dir.as_ref().or(config.build.artifacts_dir.as_ref()) {
        Some(dest) => {
            let dest = PathBuilder::new(&opts.source_dir).join(dest);
            collect_artifacts(&report.build_dir, compiler.lib_extension(), dest.as_path())?
        }
        None => Vec::new(),
    };

    Ok(BuildResult {
        compiler,
        report,
        artifacts,
    })
}

/// Build directory for `opts`; relative paths hang off the source directory.
pub fn resolve_build_dir(opts: &BuildOptions, config: &Config) -> PathBuf {
    let dir = opts
        .build_dir
        .clone()
        .or(config.build.build_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
    PathBuilder::new(&opts.source_dir).join(dir).to_path_buf()
}
