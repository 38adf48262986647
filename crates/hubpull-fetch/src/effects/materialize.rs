use std::path::Path;

use tracing::debug;

use crate::core::{is_child_of, local_path};
use crate::data::{EntryKind, ProgressSink, RepoId, TransferOutcome, TransferTask};
use crate::effects::fs::create_dir_all;
use crate::effects::http::HttpClient;
use crate::effects::lister::TreeLister;
use crate::effects::transfer::TransferEngine;
use crate::error::{Error, Result};

/// Mirrors a remote directory subtree onto disk, one file at a time.
pub struct Materializer<'a, C: HttpClient> {
    lister:    TreeLister<'a, C>,
    engine:    TransferEngine<'a, C>,
    max_depth: usize,
}

impl<'a, C: HttpClient> Materializer<'a, C> {
    pub fn new(lister: TreeLister<'a, C>, engine: TransferEngine<'a, C>, max_depth: usize) -> Self {
        Self {
            lister,
            engine,
            max_depth,
        }
    }

    /// Download everything below `remote_dir` into `local_root/remote_dir`.
    ///
    /// Directories are walked depth first with an explicit stack; files of a
    /// directory are fetched before its subdirectories are entered. The first
    /// failure aborts the walk.
    pub async fn materialize(
        &self,
        repo: &RepoId,
        remote_dir: &str,
        local_root: &Path,
        sink: &ProgressSink,
    ) -> Result<Vec<TransferOutcome>> {
        let mut outcomes = Vec::new();
        let mut pending = vec![(remote_dir.to_string(), 0usize)];

        while let Some((dir, depth)) = pending.pop() {
            if depth > self.max_depth {
                return Err(Error::TooDeep {
                    path:      dir,
                    max_depth: self.max_depth,
                });
            }

            create_dir_all(&local_path(local_root, &dir)).await?;
            let entries = self.lister.list(repo, &dir).await?;
            debug!(%repo, dir = %dir, depth, entries = entries.len(), "materializing directory");

            let mut subdirs = Vec::new();
            for entry in entries {
                if !is_child_of(&dir, &entry.path) {
                    return Err(Error::Protocol {
                        url:    format!("{repo}:{dir}"),
                        reason: format!("listing returned {:?} outside of {dir:?}", entry.path),
                    });
                }
                match entry.kind {
                    EntryKind::Directory => subdirs.push(entry.path),
                    EntryKind::File => {
                        let task = TransferTask::for_entry(&entry, local_root);
                        outcomes.push(self.engine.transfer(repo, task, sink).await?);
                    }
                }
            }

            pending.extend(subdirs.into_iter().rev().map(|path| (path, depth + 1)));
        }

        Ok(outcomes)
    }
}
