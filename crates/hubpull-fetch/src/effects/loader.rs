use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::local_path;
use crate::error::{Error, Result};

/// Consumer of a materialized repository.
///
/// Implementations turn the model directories under `repo_root` into
/// whatever the caller needs. Any error makes the surrounding load retry once
/// from a wiped cache.
pub trait ModelLoader: Send + Sync {
    type Output: Send;

    fn load(&self, repo_root: &Path, models: &[String]) -> impl Future<Output = Result<Self::Output>> + Send;
}

/// Loader that only checks the model directories are present and populated,
/// and hands back their paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLoader;

impl ModelLoader for PathLoader {
    type Output = Vec<PathBuf>;

    async fn load(&self, repo_root: &Path, models: &[String]) -> Result<Self::Output> {
        let mut paths = Vec::with_capacity(models.len());
        for model in models {
            let path = local_path(repo_root, model);
            let meta = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta,
                Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::MissingFile { path }),
                Err(source) => {
                    return Err(hubpull_fs::Error::Metadata { path, source }.into());
                }
            };
            if !meta.is_dir() {
                return Err(Error::CorruptModel {
                    name:   model.clone(),
                    reason: "not a directory".into(),
                });
            }

            let mut dir = tokio::fs::read_dir(&path).await.map_err(|source| hubpull_fs::Error::Metadata {
                path: path.clone(),
                source,
            })?;
            let populated = dir
                .next_entry()
                .await
                .map_err(|source| hubpull_fs::Error::Metadata {
                    path: path.clone(),
                    source,
                })?
                .is_some();
            if !populated {
                return Err(Error::CorruptModel {
                    name:   model.clone(),
                    reason: "empty model package".into(),
                });
            }

            paths.push(path);
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn models(names: &[&str]) -> Vec<String> { names.iter().map(|n| n.to_string()).collect() }

    #[tokio::test]
    async fn test_returns_model_paths() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Encoder.mlmodelc")).unwrap();
        std::fs::write(dir.path().join("Encoder.mlmodelc/model.mil"), "x").unwrap();

        let paths = PathLoader.load(dir.path(), &models(&["Encoder.mlmodelc"])).await.unwrap();

        assert_eq!(paths, vec![dir.path().join("Encoder.mlmodelc")]);
    }

    #[tokio::test]
    async fn test_missing_model() {
        let dir = tempdir().unwrap();
        let err = PathLoader.load(dir.path(), &models(&["Encoder.mlmodelc"])).await.unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[tokio::test]
    async fn test_empty_model_is_corrupt() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Encoder.mlmodelc")).unwrap();

        let err = PathLoader.load(dir.path(), &models(&["Encoder.mlmodelc"])).await.unwrap_err();
        assert!(matches!(err, Error::CorruptModel { .. }));
    }
}
