use std::time::Duration;

use tracing::debug;

use crate::core::listing_url;
use crate::data::{HubOptions, RemoteEntry, RepoId};
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Lists one level of a remote repository tree.
pub struct TreeLister<'a, C: HttpClient> {
    client:   &'a C,
    endpoint: &'a str,
    timeout:  Duration,
}

impl<'a, C: HttpClient> TreeLister<'a, C> {
    pub fn new(client: &'a C, options: &'a HubOptions) -> Self {
        Self {
            client,
            endpoint: &options.endpoint,
            timeout: options.list_timeout,
        }
    }

    /// Entries directly under `relative_path`; the empty path is the root.
    ///
    /// Every call is a fresh round trip.
    pub async fn list(&self, repo: &RepoId, relative_path: &str) -> Result<Vec<RemoteEntry>> {
        let url = listing_url(self.endpoint, repo, relative_path)?;
        debug!(%repo, path = relative_path, "listing remote tree");

        let response = self
            .client
            .get(&url, self.timeout)
            .await
            .map_err(|e| Error::network(&url, e))?;

        if !response.is_success() {
            return Err(Error::Protocol {
                url:    url.to_string(),
                reason: format!("status {}", response.status),
            });
        }

        let body = response.collect().await.map_err(|e| Error::network(&url, e))?;
        let entries: Vec<RemoteEntry> = serde_json::from_slice(&body).map_err(|e| Error::Protocol {
            url:    url.to_string(),
            reason: format!("malformed listing: {e}"),
        })?;

        debug!(%repo, path = relative_path, entries = entries.len(), "listed remote tree");
        Ok(entries)
    }
}
