use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use hubpull_fetch::{DEFAULT_ENDPOINT, HubOptions, RepoId, StaticManifest};
use serde::{Deserialize, Serialize};

use crate::env::HubpullEnv;

/// Contents of `config.toml`. Every field is optional in the file.
///
/// ```toml
/// endpoint = "https://huggingface.co"
/// transfer_timeout_secs = 600
///
/// [repositories]
/// "org/model" = ["Encoder.mlmodelc", "Decoder.mlmodelc"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub endpoint:              String,
    /// Defaults to `{root}/repos`.
    pub cache_dir:             Option<PathBuf>,
    pub list_timeout_secs:     u64,
    pub transfer_timeout_secs: u64,
    pub progress_threshold:    u64,
    pub progress_step:         u32,
    pub max_depth:             usize,
    /// Repository id to the model packages it must provide.
    pub repositories:          BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        let options = HubOptions::default();
        Self {
            endpoint:              DEFAULT_ENDPOINT.to_string(),
            cache_dir:             None,
            list_timeout_secs:     options.list_timeout.as_secs(),
            transfer_timeout_secs: options.transfer_timeout.as_secs(),
            progress_threshold:    options.progress_threshold,
            progress_step:         options.progress_step,
            max_depth:             options.max_depth,
            repositories:          BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load `explicit` if given, otherwise the root's `config.toml` when it
    /// exists, otherwise the defaults.
    pub fn load(explicit: Option<&Path>, env: &HubpullEnv) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = env.config_file();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> { Ok(toml::from_str(text)?) }

    pub fn cache_dir(&self, env: &HubpullEnv) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| env.repos().to_path_buf())
    }

    pub fn hub_options(&self) -> HubOptions {
        HubOptions::default()
            .endpoint(self.endpoint.clone())
            .list_timeout(Duration::from_secs(self.list_timeout_secs))
            .transfer_timeout(Duration::from_secs(self.transfer_timeout_secs))
            .progress_threshold(self.progress_threshold)
            .progress_step(self.progress_step)
            .max_depth(self.max_depth)
    }

    pub fn manifest(&self) -> Result<StaticManifest> {
        let mut manifest = StaticManifest::new();
        for (id, models) in &self.repositories {
            let repo: RepoId = id.parse().with_context(|| format!("Invalid repository key {id:?}"))?;
            manifest.insert(repo, models.iter().cloned());
        }
        Ok(manifest)
    }
}
