use url::Url;

use crate::data::RepoId;
use crate::error::{Error, Result};

/// Revision every request is pinned to.
pub const DEFAULT_REVISION: &str = "main";

fn base(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| Error::InvalidUrl(format!("{endpoint}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(endpoint.to_string()));
    }
    Ok(url)
}

fn with_segments<'a>(
    endpoint: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url> {
    let mut url = base(endpoint)?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(endpoint.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn relative_segments(path: &str) -> impl Iterator<Item = &str> { path.split('/').filter(|s| !s.is_empty()) }

/// `GET {endpoint}/api/models/{owner}/{name}/tree/main[/{path}]`.
///
/// An empty `relative_path` lists the repository root.
pub fn listing_url(endpoint: &str, repo: &RepoId, relative_path: &str) -> Result<Url> {
    with_segments(
        endpoint,
        ["api", "models", repo.owner(), repo.name(), "tree", DEFAULT_REVISION]
            .into_iter()
            .chain(relative_segments(relative_path)),
    )
}

/// `GET {endpoint}/{owner}/{name}/resolve/main/{path}`.
pub fn resolve_url(endpoint: &str, repo: &RepoId, path: &str) -> Result<Url> {
    with_segments(
        endpoint,
        [repo.owner(), repo.name(), "resolve", DEFAULT_REVISION]
            .into_iter()
            .chain(relative_segments(path)),
    )
}
