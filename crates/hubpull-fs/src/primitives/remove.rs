use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct RemoveDirOptions {
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for RemoveDirOptions {
    fn default() -> Self {
        Self {
            retry_count: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl RemoveDirOptions {
    pub fn new() -> Self { Self::default() }

    pub fn retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// Remove a file, treating an absent file as success.
///
/// Returns whether something was removed.
pub fn remove_file_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Remove {
            path:   path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove a directory tree, treating an absent directory as success.
///
/// Windows can hold transient locks on freshly written files (indexers,
/// antivirus), so removal is retried with a linear backoff.
pub fn remove_dir_all_if_exists(path: impl AsRef<Path>, options: RemoveDirOptions) -> Result<bool> {
    let path = path.as_ref();
    let mut attempts = 0;
    loop {
        match std::fs::remove_dir_all(path) {
            Ok(()) => return Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                attempts += 1;
                if attempts >= options.retry_count.max(1) {
                    return Err(Error::RetryLimitExceeded {
                        path:   path.to_path_buf(),
                        source: e,
                    });
                }
                std::thread::sleep(options.retry_delay * attempts);
            }
        }
    }
}
