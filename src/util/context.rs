//! Global context for cljgoal operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::project::{find_project, Project, ProjectError};
use crate::util::config::{self, Config, CONFIG_DIR_NAME};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global cljgoal data (~/.cljgoal/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the cljgoal home directory (~/.cljgoal/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the project descriptor starting from cwd and searching upward.
    pub fn find_project(&self) -> Result<PathBuf, ProjectError> {
        find_project(&self.cwd)
    }

    /// Load the enclosing project.
    pub fn load_project(&self) -> Result<Project, ProjectError> {
        Project::load(&self.find_project()?)
    }

    /// Load the merged configuration for a project.
    pub fn load_config(&self, project: &Project) -> Config {
        config::load_config(
            &self.config_path(),
            &config::project_config_path(project.root()),
        )
    }
}
