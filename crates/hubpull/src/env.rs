use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use home::home_dir;

/// Overrides the default `~/.hubpull` root.
pub const ROOT_VAR: &str = "HUBPULL_ROOT";

/// Well-known locations under the hubpull root.
#[derive(Debug, Clone)]
pub struct HubpullEnv {
    root:  PathBuf,
    repos: PathBuf,
}

impl HubpullEnv {
    pub fn new() -> Result<Self> {
        let root = match env::var_os(ROOT_VAR) {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => home_dir().context("Failed to get home directory")?.join(".hubpull"),
        };
        Ok(Self::from_root(&root))
    }

    pub fn from_root(root: &Path) -> Self {
        Self {
            root:  root.to_path_buf(),
            repos: root.join("repos"),
        }
    }

    pub fn root(&self) -> &Path { &self.root }

    /// Default repository cache directory.
    pub fn repos(&self) -> &Path { &self.repos }

    pub fn config_file(&self) -> PathBuf { self.root.join("config.toml") }
}
