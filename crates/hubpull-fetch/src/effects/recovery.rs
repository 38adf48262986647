use std::future::Future;
use std::path::Path;

use hubpull_fs::{RemoveDirOptions, remove_dir_all_if_exists};
use tracing::{info, warn};

use crate::error::Result;

/// Run `attempt` and, if it fails, wipe `repo_dir` and run it exactly once
/// more.
///
/// The attempt number (1 or 2) is passed to `attempt`. The second failure is
/// returned as is. Wiping is best effort: a failure to delete is logged and
/// the retry still happens.
pub async fn load_with_recovery<T, F, Fut>(repo_dir: &Path, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let first = match attempt(1).await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    warn!(
        dir = %repo_dir.display(),
        error = %first,
        "load failed, wiping repository cache and retrying once"
    );
    wipe_cache(repo_dir).await;

    match attempt(2).await {
        Ok(value) => {
            info!(dir = %repo_dir.display(), "load succeeded after wiping cache");
            Ok(value)
        }
        Err(e) => {
            warn!(dir = %repo_dir.display(), error = %e, "load failed again, giving up");
            Err(e)
        }
    }
}

/// Delete a repository cache directory, swallowing every failure.
pub async fn wipe_cache(repo_dir: &Path) {
    let dir = repo_dir.to_path_buf();
    let removed = tokio::task::spawn_blocking(move || remove_dir_all_if_exists(&dir, RemoveDirOptions::new())).await;

    match removed {
        Ok(Ok(true)) => info!(dir = %repo_dir.display(), "removed repository cache"),
        Ok(Ok(false)) => {}
        Ok(Err(e)) => warn!(dir = %repo_dir.display(), error = %e, "failed to remove repository cache"),
        Err(e) => warn!(dir = %repo_dir.display(), error = %e, "cache removal task failed"),
    }
}
