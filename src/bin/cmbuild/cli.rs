//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use cmbuild::builder::defines::parse_define;
use cmbuild::util::shell::ColorChoice;

/// cmbuild - configure and build CMake projects with the native build tool
#[derive(Parser)]
#[command(name = "cmbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure and build a CMake project
    Build(BuildArgs),

    /// Regenerate the completion-flags file from compile_commands.json
    Flags(FlagsArgs),

    /// Remove the build directory
    Clean(CleanArgs),

    /// Show which build tool would be used
    Toolchain(ToolchainArgs),

    /// Move built static libraries out of a build tree
    Artifacts(ArtifactsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory containing the top-level CMakeLists.txt
    #[arg(default_value = ".")]
    pub source: PathBuf,

    /// Build directory (relative to the source directory)
    #[arg(short = 'B', long)]
    pub build_dir: Option<PathBuf>,

    /// Build tool to use: gcc, mingw, jom, nmake (probed when omitted)
    #[arg(short, long, env = "CMBUILD_COMPILER")]
    pub compiler: Option<String>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// CMake define, repeatable (KEY=VALUE)
    #[arg(short = 'D', long = "define", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Where to write the completion-flags file (relative to the source
    /// directory)
    #[arg(long)]
    pub flags_file: Option<PathBuf>,

    /// Copy compile_commands.json next to the sources
    #[arg(long, overrides_with = "no_export_compile_commands")]
    pub export_compile_commands: bool,

    /// Do not copy compile_commands.json, even if the config asks for it
    #[arg(long)]
    pub no_export_compile_commands: bool,

    /// Move built static libraries into this directory
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Path to compile_commands.json
    #[arg(default_value = "build/compile_commands.json")]
    pub database: PathBuf,

    /// Output file
    #[arg(short, long, default_value = ".clang_complete")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Project source directory
    #[arg(default_value = ".")]
    pub source: PathBuf,

    /// Build directory (relative to the source directory)
    #[arg(short = 'B', long)]
    pub build_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Show this build tool instead of probing
    #[arg(short, long, env = "CMBUILD_COMPILER")]
    pub compiler: Option<String>,
}

#[derive(Args)]
pub struct ArtifactsArgs {
    /// Build tree to search
    pub build_dir: PathBuf,

    /// Destination directory
    pub dest: PathBuf,

    /// File extension to collect (defaults to the build tool's static library extension)
    #[arg(long)]
    pub ext: Option<String>,

    /// Build tool whose library extension to use
    #[arg(short, long, env = "CMBUILD_COMPILER")]
    pub compiler: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
