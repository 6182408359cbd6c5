//! Completion-flags file generation from `compile_commands.json`.
//!
//! Editors that read a `.clang_complete`-style file expect one compiler flag
//! per line. This takes the first compiler invocation CMake recorded and
//! keeps the flags that matter for parsing (includes, defines, language
//! standard, warnings), dropping the ones that only matter for producing
//! object files.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name CMake uses for its compile-commands database.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// Default completion-flags file name, written next to the sources.
pub const DEFAULT_FLAGS_FILE: &str = ".clang_complete";

/// Flag prefixes that never reach the completion-flags file.
const DROPPED_PREFIXES: [&str; 5] = ["-c", "-g", "-o", "-pg", "-O"];

#[derive(Debug, Error)]
pub enum FlagsError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} contains no compile commands", .path.display())]
    Empty { path: PathBuf },

    #[error("first entry in {} has no `command`", .path.display())]
    MissingCommand { path: PathBuf },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One entry of a compile-commands database.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileCommand {
    #[serde(default)]
    pub command: Option<String>,

    /// Pre-split form some generators emit instead of `command`.
    #[serde(default)]
    pub arguments: Option<Vec<String>>,

    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl CompileCommand {
    /// The invocation as a single command line.
    pub fn command_line(&self) -> Option<String> {
        self.command
            .clone()
            .or_else(|| self.arguments.as_ref().map(|args| args.join(" ")))
    }
}

fn is_dropped(token: &str) -> bool {
    DROPPED_PREFIXES.iter().any(|p| token.starts_with(p))
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Extract completion flags from a compiler command line.
///
/// The command is split on whitespace with no quote handling. A flag that is
/// followed by a non-flag token takes that token as its argument and both
/// end up on one line (`-I /usr/include`). Bare tokens that are not a flag
/// argument (the compiler path, source files) are skipped.
pub fn extract_flags(command: &str) -> Vec<String> {
    let tokens: Vec<&str> = command.split_whitespace().collect();
    let mut lines = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if is_dropped(token) || !is_flag(token) {
            i += 1;
            continue;
        }

        match tokens.get(i + 1) {
            Some(next) if !is_flag(next) => {
                lines.push(format!("{} {}", token, next));
                i += 2;
            }
            _ => {
                lines.push(token.to_string());
                i += 1;
            }
        }
    }

    lines
}

/// Read the compile-commands database at `path`.
pub fn read_compile_commands(path: &Path) -> Result<Vec<CompileCommand>, FlagsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FlagsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| FlagsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Command line of the first entry in the database at `path`.
pub fn first_command(path: &Path) -> Result<String, FlagsError> {
    let commands = read_compile_commands(path)?;
    let first = commands.first().ok_or_else(|| FlagsError::Empty {
        path: path.to_path_buf(),
    })?;

    first
        .command_line()
        .ok_or_else(|| FlagsError::MissingCommand {
            path: path.to_path_buf(),
        })
}

/// Write one line per entry, newline-terminated, replacing any existing file.
pub fn write_flags_file(lines: &[String], output: &Path) -> Result<(), FlagsError> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }

    std::fs::write(output, contents).map_err(|source| FlagsError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Regenerate the completion-flags file at `output` from the database at
/// `database`. Returns the number of lines written.
pub fn generate_flags_file(database: &Path, output: &Path) -> Result<usize, FlagsError> {
    let command = first_command(database)?;
    let lines = extract_flags(&command);
    write_flags_file(&lines, output)?;

    tracing::info!(
        "wrote {} completion flag(s) to {}",
        lines.len(),
        output.display()
    );
    Ok(lines.len())
}
