use std::path::Path;

use futures_util::TryStreamExt;
use hubpull_fs::{Finalized, partial_path};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::core::{ThrottledSink, resolve_url};
use crate::data::{
    DownloadProgress, HubOptions, ProgressSink, RepoId, TransferOutcome, TransferTask, TransferWarning,
};
use crate::effects::fs::{create_dir_all, file_len, write_error};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::{Error, Result};

/// Downloads single files into place.
pub struct TransferEngine<'a, C: HttpClient> {
    client:  &'a C,
    options: &'a HubOptions,
}

impl<'a, C: HttpClient> TransferEngine<'a, C> {
    pub fn new(client: &'a C, options: &'a HubOptions) -> Self { Self { client, options } }

    /// Fetch `task.source_path` from `repo` into `task.destination`.
    ///
    /// A destination that already has the expected size is kept without
    /// touching the network. Otherwise the whole file is streamed into the
    /// `.download` sibling and moved into place. The sink always sees exactly
    /// one terminal event for a successful call.
    pub async fn transfer(
        &self,
        repo: &RepoId,
        task: TransferTask,
        sink: &ProgressSink,
    ) -> Result<TransferOutcome> {
        let TransferTask {
            source_path,
            destination,
            expected_size,
        } = task;
        let mut reporter = Reporter::new(sink, &source_path, &destination, expected_size, self.options);

        if let Some(parent) = destination.parent() {
            create_dir_all(parent).await?;
        }

        if file_len(&destination).await? == Some(expected_size) {
            debug!(path = %destination.display(), "already complete, skipping");
            reporter.finish(expected_size);
            return Ok(TransferOutcome {
                destination,
                bytes: expected_size,
                skipped: true,
                warnings: Vec::new(),
            });
        }

        let partial = partial_path(&destination);
        if let Some(stale) = file_len(&partial).await? {
            // Range requests are not issued; the stale bytes are only reported.
            debug!(path = %partial.display(), stale_bytes = stale, "found previous partial transfer");
        }

        let url = resolve_url(&self.options.endpoint, repo, &source_path)?;
        debug!(%repo, path = %source_path, expected_size, "transferring");

        let response = self
            .client
            .get(&url, self.options.transfer_timeout)
            .await
            .map_err(|e| Error::transfer(&source_path, Error::network(&url, e)))?;

        if !response.is_success() {
            return Err(Error::transfer(
                &source_path,
                Error::Protocol {
                    url:    url.to_string(),
                    reason: format!("status {}", response.status),
                },
            ));
        }

        let written = stream_to_file(response, &url, &source_path, &partial, &mut reporter).await?;

        if let Some(parent) = destination.parent() {
            create_dir_all(parent).await?;
        }
        let finalize = self.options.finalize;
        let (from, to) = (partial.clone(), destination.clone());
        let how = tokio::task::spawn_blocking(move || hubpull_fs::finalize(&from, &to, finalize)).await??;
        if how == Finalized::Copied {
            debug!(path = %destination.display(), "rename refused, copied into place");
        }

        let actual = file_len(&destination).await?.unwrap_or(0);
        let mut warnings = Vec::new();
        if actual != expected_size {
            warn!(
                path = %destination.display(),
                expected = expected_size,
                actual,
                "downloaded size differs from listing"
            );
            warnings.push(TransferWarning::SizeMismatch {
                path: destination.clone(),
                expected: expected_size,
                actual,
            });
        }

        reporter.finish(written);
        Ok(TransferOutcome {
            destination,
            bytes: actual,
            skipped: false,
            warnings,
        })
    }
}

async fn stream_to_file<E: std::error::Error>(
    response: HttpResponse<E>,
    url: &Url,
    source_path: &str,
    partial: &Path,
    reporter: &mut Reporter<'_>,
) -> Result<u64> {
    let mut file = tokio::fs::File::create(partial).await.map_err(write_error(partial))?;
    let mut body = response.body;
    let mut written = 0u64;

    loop {
        let chunk = match body.try_next().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                // What arrived stays on disk as the partial file.
                let _ = file.flush().await;
                return Err(Error::transfer(source_path, Error::network(url, e)));
            }
        };
        file.write_all(&chunk).await.map_err(write_error(partial))?;
        written += chunk.len() as u64;
        reporter.advance(written);
    }

    file.flush().await.map_err(write_error(partial))?;
    file.sync_all().await.map_err(write_error(partial))?;
    Ok(written)
}

/// Per-file progress emitter. Intermediate events only exist for files above
/// the configured threshold; the terminal event is always sent.
struct Reporter<'s> {
    sink:      &'s ProgressSink,
    throttled: Option<ThrottledSink>,
    file_name: String,
    file_path: String,
    file_size: u64,
}

impl<'s> Reporter<'s> {
    fn new(
        sink: &'s ProgressSink,
        source_path: &str,
        destination: &Path,
        file_size: u64,
        options: &HubOptions,
    ) -> Self {
        let throttled = (file_size > options.progress_threshold)
            .then(|| ThrottledSink::new(sink.clone(), options.progress_step));
        Self {
            sink,
            throttled,
            file_name: source_path.rsplit('/').next().unwrap_or(source_path).to_string(),
            file_path: destination.display().to_string(),
            file_size,
        }
    }

    fn progress(&self, fraction: f64, bytes_downloaded: u64) -> DownloadProgress {
        DownloadProgress {
            fraction,
            file_name: self.file_name.clone(),
            file_path: self.file_path.clone(),
            file_size: self.file_size,
            bytes_downloaded,
        }
    }

    fn advance(&mut self, bytes: u64) {
        if self.file_size == 0 {
            return;
        }
        let fraction = bytes as f64 / self.file_size as f64;
        if fraction >= 1.0 {
            return;
        }
        let Some(mut throttled) = self.throttled.take() else {
            return;
        };
        throttled.offer(fraction, || self.progress(fraction, bytes));
        self.throttled = Some(throttled);
    }

    fn finish(self, bytes: u64) { (self.sink)(&self.progress(1.0, bytes)); }
}
