//! Error types for hubpull-fetch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid repository id {id:?}: {reason}")]
    InvalidRepository { id: String, reason: &'static str },

    #[error("repository {0} has no model manifest")]
    UnknownRepository(String),

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("unexpected response from {url}: {reason}")]
    Protocol { url: String, reason: String },

    #[error("failed to transfer {path}")]
    Transfer {
        path:   String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Filesystem(#[from] hubpull_fs::Error),

    #[error("remote tree under {path} is deeper than {max_depth} levels")]
    TooDeep { path: String, max_depth: usize },

    #[error("missing model file {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("model {name} is corrupt: {reason}")]
    CorruptModel { name: String, reason: String },

    #[error("background filesystem task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn network(url: &url::Url, err: impl std::fmt::Display) -> Self {
        Error::Network {
            url:     url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn transfer(path: &str, source: Error) -> Self {
        Error::Transfer {
            path:   path.to_string(),
            source: Box::new(source),
        }
    }

    /// Whether the failure came from the transport rather than the local disk
    /// or the remote's answer.
    pub fn is_network(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::Transfer { source, .. } => source.is_network(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
