use std::collections::BTreeMap;

use crate::data::repo::{RepoId, RequiredModelSet};

/// Lookup of the model directories each supported repository must provide.
pub trait ModelManifest: Send + Sync {
    /// `None` means the repository is not supported.
    fn required_models(&self, repo: &RepoId) -> Option<RequiredModelSet>;
}

impl<F> ModelManifest for F
where
    F: Fn(&RepoId) -> Option<RequiredModelSet> + Send + Sync,
{
    fn required_models(&self, repo: &RepoId) -> Option<RequiredModelSet> { self(repo) }
}

/// A fixed table of repositories and their model directories.
#[derive(Debug, Clone, Default)]
pub struct StaticManifest {
    entries: BTreeMap<RepoId, RequiredModelSet>,
}

impl StaticManifest {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_repository<I, S>(mut self, repo: RepoId, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(repo, models);
        self
    }

    pub fn insert<I, S>(&mut self, repo: RepoId, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(repo)
            .or_default()
            .extend(models.into_iter().map(Into::into));
    }

    pub fn repositories(&self) -> impl Iterator<Item = &RepoId> { self.entries.keys() }
}

impl ModelManifest for StaticManifest {
    fn required_models(&self, repo: &RepoId) -> Option<RequiredModelSet> { self.entries.get(repo).cloned() }
}
