use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::{Selection, select};
use crate::data::{
    HubOptions, LoadedRepository, ModelManifest, ProgressSink, RepoId, RepositoryReport,
    RequiredModelSet, TransferTask,
};
use crate::effects::fs::{create_dir_all, dir_exists};
use crate::effects::http::HttpClient;
use crate::effects::lister::TreeLister;
use crate::effects::loader::ModelLoader;
use crate::effects::materialize::Materializer;
use crate::effects::recovery::load_with_recovery;
use crate::effects::transfer::TransferEngine;
use crate::error::{Error, Result};

/// Entry point of the engine: one shared client, one manifest, one set of
/// options.
pub struct Hub<C: HttpClient, M: ModelManifest> {
    client:   C,
    manifest: M,
    options:  HubOptions,
}

impl<C: HttpClient, M: ModelManifest> Hub<C, M> {
    pub fn new(client: C, manifest: M) -> Self {
        Self {
            client,
            manifest,
            options: HubOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: HubOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &HubOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    pub fn manifest(&self) -> &M { &self.manifest }

    pub fn lister(&self) -> TreeLister<'_, C> { TreeLister::new(&self.client, &self.options) }

    pub fn transfer_engine(&self) -> TransferEngine<'_, C> { TransferEngine::new(&self.client, &self.options) }

    pub fn materializer(&self) -> Materializer<'_, C> {
        Materializer::new(self.lister(), self.transfer_engine(), self.options.max_depth)
    }

    /// Local cache directory of `repo` under `base_dir`.
    pub fn repository_dir(&self, repo: &RepoId, base_dir: &Path) -> PathBuf { base_dir.join(repo.folder_name()) }

    pub fn required_models(&self, repo: &RepoId) -> Result<RequiredModelSet> {
        self.manifest
            .required_models(repo)
            .ok_or_else(|| Error::UnknownRepository(repo.to_string()))
    }

    /// Make sure `repo` is on disk under `base_dir`.
    ///
    /// An existing cache directory is trusted as complete and returned without
    /// any network access. Otherwise the root is listed once: required model
    /// packages are materialized, essential metadata files are transferred,
    /// everything else is ignored.
    pub async fn ensure_repository(
        &self,
        repo: &RepoId,
        base_dir: &Path,
        sink: &ProgressSink,
    ) -> Result<RepositoryReport> {
        let required = self.required_models(repo)?;
        let root = self.repository_dir(repo, base_dir);

        if dir_exists(&root).await? {
            debug!(%repo, path = %root.display(), "using cached repository");
            return Ok(RepositoryReport {
                root,
                cached: true,
                transfers: Vec::new(),
            });
        }

        create_dir_all(&root).await?;
        let entries = self.lister().list(repo, "").await?;
        let engine = self.transfer_engine();
        let materializer = self.materializer();
        let mut transfers = Vec::new();

        for entry in entries {
            if !crate::core::is_safe_relative(&entry.path) {
                return Err(Error::Protocol {
                    url:    repo.to_string(),
                    reason: format!("unsafe path {:?} in root listing", entry.path),
                });
            }
            match select(&entry, &required) {
                Selection::Model => {
                    transfers.extend(materializer.materialize(repo, &entry.path, &root, sink).await?);
                }
                Selection::Essential => {
                    let task = TransferTask::for_entry(&entry, &root);
                    transfers.push(engine.transfer(repo, task, sink).await?);
                }
                Selection::Skip => debug!(%repo, path = %entry.path, "skipping"),
            }
        }

        info!(%repo, path = %root.display(), files = transfers.len(), "repository ready");
        Ok(RepositoryReport {
            root,
            cached: false,
            transfers,
        })
    }

    /// Ensure `repo` is on disk and hand its model directories to `loader`,
    /// wiping the cache and starting over once if anything fails.
    pub async fn load_models<L: ModelLoader>(
        &self,
        repo: &RepoId,
        base_dir: &Path,
        loader: &L,
        sink: &ProgressSink,
    ) -> Result<LoadedRepository<L::Output>> {
        let models: Vec<String> = self.required_models(repo)?.into_iter().collect();
        let models = &models;
        let root = self.repository_dir(repo, base_dir);

        load_with_recovery(&root, |attempt| async move {
            debug!(%repo, attempt, "loading repository");
            let report = self.ensure_repository(repo, base_dir, sink).await?;
            let models = loader.load(report.path(), models).await?;
            Ok(LoadedRepository { report, models })
        })
        .await
    }
}
