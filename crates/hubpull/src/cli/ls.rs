use anyhow::{Context, Result};
use hubpull_fetch::core::{Selection, select};
use hubpull_fetch::{ModelManifest, RemoteEntry, RepoId, RequiredModelSet};
use indicatif::HumanBytes;
use tabled::Tabled;

use crate::cli::Session;
use crate::ui::Formatter;

#[derive(Debug, clap::Args)]
pub struct LsArg {
    /// Repository id, `owner/name`.
    pub repo: String,
    /// Directory inside the repository; the root when omitted.
    pub path: Option<String>,
}

#[derive(Debug, Tabled)]
struct EntryRow {
    kind: &'static str,
    size: String,
    pull: &'static str,
    path: String,
}

impl EntryRow {
    /// `required` is only consulted for root rows.
    fn new(entry: &RemoteEntry, required: Option<&RequiredModelSet>) -> Self {
        let pull = match required.map(|set| select(entry, set)) {
            Some(Selection::Model) => "model",
            Some(Selection::Essential) => "file",
            _ => "",
        };
        Self {
            kind: if entry.is_dir() { "dir" } else { "file" },
            size: if entry.is_dir() {
                "-".to_string()
            } else {
                HumanBytes(entry.true_size()).to_string()
            },
            pull,
            path: entry.path.clone(),
        }
    }
}

impl LsArg {
    pub async fn run(self, session: &Session) -> Result<()> {
        let repo: RepoId = self.repo.parse()?;
        let dir = self.path.as_deref().unwrap_or("").trim_matches('/');
        let hub = session.hub()?;

        let entries = hub
            .lister()
            .list(&repo, dir)
            .await
            .with_context(|| format!("Failed to list {repo}"))?;

        let required = if dir.is_empty() {
            hub.manifest().required_models(&repo)
        } else {
            None
        };
        let rows = entries.iter().map(|e| EntryRow::new(e, required.as_ref()));
        let header = if dir.is_empty() {
            repo.to_string()
        } else {
            format!("{repo}: {dir}")
        };

        let table = Formatter {
            header: Some(header),
            ..Formatter::default()
        }
        .build(rows);
        println!("{table}");
        Ok(())
    }
}
