//! Async wrappers over the handful of filesystem calls the engine makes,
//! mapped onto [`hubpull_fs::Error`].

use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

pub(crate) async fn create_dir_all(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await.map_err(|source| {
        hubpull_fs::Error::CreateDir {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Length of the regular file at `path`, or `None` if there is none.
pub(crate) async fn file_len(path: &Path) -> Result<Option<u64>> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(hubpull_fs::Error::Metadata {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

pub(crate) async fn dir_exists(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(hubpull_fs::Error::Metadata {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

pub(crate) fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> crate::Error + '_ {
    move |source| {
        hubpull_fs::Error::Write {
            path: path.to_path_buf(),
            source,
        }
        .into()
    }
}
