//! Global context for lockwalk operations.
//!
//! Provides centralized access to configuration, paths, and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ops::lockfile::{find_lock_file, LOCK_FILE_PATH};
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Merged global and project configuration
    config: Config,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a context for the current directory, loading configuration.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context for a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let global = config::global_config_path();
        let config = config::load_config(global.as_deref(), &config::project_config_path(&cwd));

        GlobalContext {
            cwd,
            config,
            verbose: false,
            color: true,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Resolve the lock file to read: an explicit path (relative to the
    /// working directory) or the default location.
    pub fn lock_file_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }

        find_lock_file(&self.cwd).ok_or_else(|| {
            anyhow::anyhow!(
                "could not find {} in {}\n\
                 help: Run a package restore first, or pass --lock-file",
                LOCK_FILE_PATH,
                self.cwd.display()
            )
        })
    }
}
