use anyhow::{Context, Result};
use hubpull_fetch::{PathLoader, RepoId};
use tracing::{info, warn};

use crate::cli::Session;
use crate::ui::FileProgress;

#[derive(Debug, clap::Args)]
pub struct PullArg {
    /// Repository id, `owner/name`.
    pub repo: String,
}

impl PullArg {
    pub async fn run(self, session: &Session) -> Result<()> {
        let repo: RepoId = self.repo.parse()?;
        let hub = session.hub()?;
        let progress = FileProgress::new();

        let loaded = hub
            .load_models(&repo, session.cache_dir(), &PathLoader, &progress.sink())
            .await
            .inspect_err(|_| progress.abandon())
            .with_context(|| format!("Failed to pull {repo}"))?;

        let report = &loaded.report;
        if report.cached {
            info!(%repo, path = %report.path().display(), "already cached");
        } else {
            info!(%repo, path = %report.path().display(), files = report.downloaded().count(), "pulled");
        }
        for warning in report.warnings() {
            warn!("{warning}");
        }

        for path in &loaded.models {
            println!("{}", path.display());
        }
        Ok(())
    }
}
