//! Configuration file support for cljgoal.
//!
//! cljgoal reads two configuration file locations:
//! - Global: `~/.cljgoal/config.toml` - User-wide defaults
//! - Project: `.cljgoal/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, field by field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::absolutize;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".cljgoal";

/// cljgoal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Artifact repository settings
    pub repository: RepositoryConfig,

    /// Goal defaults
    pub goal: GoalConfig,
}

/// Artifact repository configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Root of the Maven-layout local repository
    pub local: Option<PathBuf>,
}

/// Goal defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Executable used when a goal configuration does not name one
    pub executable: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Relative paths are taken relative to the directory holding the
    /// `.cljgoal` directory, so `local = "m2"` in a project config means
    /// `<project>/m2`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.anchor_paths(&config_base_dir(path)?);
        Ok(config)
    }

    fn anchor_paths(&mut self, base: &Path) {
        self.repository.local = self
            .repository
            .local
            .take()
            .map(|local| absolutize(base, &local));
    }

    /// Load configuration with fallback to defaults if the file is missing or malformed.
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

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.repository.local.is_some() {
            self.repository.local = other.repository.local;
        }
        if other.goal.executable.is_some() {
            self.goal.executable = other.goal.executable;
        }
    }

    /// Get the local repository root, falling back to `~/.m2/repository`.
    pub fn local_repository(&self) -> PathBuf {
        self.repository
            .local
            .clone()
            .or_else(default_local_repository)
            .unwrap_or_else(|| PathBuf::from(".m2").join("repository"))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cljgoal/config.toml)
/// 2. Global config (~/.cljgoal/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Directory that relative paths in the config file at `path` resolve against.
fn config_base_dir(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to get current directory")?
            .join(path)
    };
    let dir = path.parent().unwrap_or(Path::new("/"));
    let base = match dir.file_name() {
        Some(name) if name == CONFIG_DIR_NAME => dir.parent().unwrap_or(dir),
        _ => dir,
    };
    Ok(base.to_path_buf())
}

/// Get the global config directory (~/.cljgoal).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the project config path (.cljgoal/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Get the conventional local repository (~/.m2/repository).
pub fn default_local_repository() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".m2").join("repository"))
}
