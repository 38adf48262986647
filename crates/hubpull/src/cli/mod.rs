use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use hubpull_fetch::{ClientSetting, Hub, HubOptions, ReqwestClient, StaticManifest};
use tracing::debug;

use crate::config::Config;
use crate::env::HubpullEnv;

mod clean;
mod ls;
mod pull;

#[derive(Debug, Parser)]
#[command(name = "hubpull", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Config file; defaults to `config.toml` under the hubpull root.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Hub base URL.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Directory holding one folder per repository.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Per-file download timeout in seconds.
    #[arg(long, global = true)]
    pub transfer_timeout: Option<u64>,

    /// Raise log verbosity (-v, -vv).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "p", name = "pull", about = "Download a repository and check its models")]
    Pull(pull::PullArg),
    #[command(visible_alias = "list", name = "ls", about = "List one level of a remote repository")]
    Ls(ls::LsArg),
    #[command(alias = "rm", name = "clean", about = "Delete a cached repository")]
    Clean(clean::CleanArg),
}

impl App {
    pub async fn run(self) -> Result<()> {
        let env = HubpullEnv::new()?;
        let session = Session::new(&self, &env)?;
        debug!(root = %env.root().display(), cache = %session.cache_dir().display(), "resolved paths");

        match self.cmd {
            Commands::Pull(arg) => arg.run(&session).await,
            Commands::Ls(arg) => arg.run(&session).await,
            Commands::Clean(arg) => arg.run(&session).await,
        }
    }
}

/// Resolved configuration shared by every subcommand.
pub struct Session {
    config:    Config,
    cache_dir: PathBuf,
}

impl Session {
    fn new(app: &App, env: &HubpullEnv) -> Result<Self> {
        let mut config = Config::load(app.config.as_deref(), env)?;
        if let Some(endpoint) = &app.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(dir) = &app.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(secs) = app.transfer_timeout {
            config.transfer_timeout_secs = secs;
        }

        let cache_dir = config.cache_dir(env);
        Ok(Self { config, cache_dir })
    }

    pub fn cache_dir(&self) -> &Path { &self.cache_dir }

    pub fn options(&self) -> HubOptions { self.config.hub_options() }

    /// Build the one HTTP client of this run and wrap it in a hub.
    pub fn hub(&self) -> Result<Hub<ReqwestClient, StaticManifest>> {
        let client = ReqwestClient::new(&ClientSetting::from_env()).context("Failed to build HTTP client")?;
        Ok(Hub::new(client, self.config.manifest()?).with_options(self.options()))
    }
}
