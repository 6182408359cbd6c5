//! Configuration file support.
//!
//! Two locations are consulted:
//! - Global: `~/.cmbuild/config.toml` - User-wide defaults
//! - Project: `cmbuild.toml` in the project root - Project-specific overrides
//!
//! Project config takes precedence over global config, field by field.
//! Command-line flags take precedence over both.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "cmbuild.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Extra CMake defines passed on every configure
    pub defines: BTreeMap<String, String>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Explicit compiler key (gcc, mingw, jom, nmake); probed when unset
    pub compiler: Option<String>,

    /// Parallel jobs passed to the native build tool
    pub threads: Option<usize>,

    /// Build directory, relative to the project root
    pub build_dir: Option<PathBuf>,

    /// Where to write the editor completion-flags file
    pub flags_file: Option<PathBuf>,

    /// Copy compile_commands.json next to the sources after configuring
    pub export_compile_commands: Option<bool>,

    /// Move built static libraries here after a successful build
    pub artifacts_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create config directory: {}", parent.display())
                })?;
            }
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.compiler.is_some() {
            self.build.compiler = other.build.compiler;
        }
        if other.build.threads.is_some() {
            self.build.threads = other.build.threads;
        }
        if other.build.build_dir.is_some() {
            self.build.build_dir = other.build.build_dir;
        }
        if other.build.flags_file.is_some() {
            self.build.flags_file = other.build.flags_file;
        }
        if other.build.export_compile_commands.is_some() {
            self.build.export_compile_commands = other.build.export_compile_commands;
        }
        if other.build.artifacts_dir.is_some() {
            self.build.artifacts_dir = other.build.artifacts_dir;
        }
        self.defines.extend(other.defines);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`cmbuild.toml`)
/// 2. Global config (`~/.cmbuild/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Load the configuration that applies to `project_root`.
pub fn load_for_project(project_root: &Path) -> Config {
    let global = global_config_path();
    load_config(global.as_deref(), &project_config_path(project_root))
}

/// Get the global config directory (~/.cmbuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cmbuild"))
}

/// Get the global config path (~/.cmbuild/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}
