use anyhow::{Context, Result};
use hubpull_fetch::RepoId;
use hubpull_fs::{RemoveDirOptions, remove_dir_all_if_exists};
use tracing::info;

use crate::cli::Session;

#[derive(Debug, clap::Args)]
pub struct CleanArg {
    /// Repository id, `owner/name`.
    pub repo: String,
}

impl CleanArg {
    pub async fn run(self, session: &Session) -> Result<()> {
        let repo: RepoId = self.repo.parse()?;
        let dir = session.cache_dir().join(repo.folder_name());

        let target = dir.clone();
        let removed = tokio::task::spawn_blocking(move || remove_dir_all_if_exists(&target, RemoveDirOptions::new()))
            .await
            .context("Cache removal task failed")?
            .with_context(|| format!("Failed to remove {}", dir.display()))?;

        if removed {
            info!(%repo, path = %dir.display(), "removed cached repository");
        } else {
            info!(%repo, path = %dir.display(), "nothing cached");
        }
        Ok(())
    }
}
