use std::path::{Path, PathBuf};

use crate::core::local_path;
use crate::data::entry::RemoteEntry;

/// A single file to fetch. Consumed by the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTask {
    /// Path of the file inside the remote repository.
    pub source_path:   String,
    pub destination:   PathBuf,
    pub expected_size: u64,
}

impl TransferTask {
    pub fn new(source_path: impl Into<String>, destination: impl Into<PathBuf>, expected_size: u64) -> Self {
        Self {
            source_path: source_path.into(),
            destination: destination.into(),
            expected_size,
        }
    }

    /// Task mirroring `entry` under `local_root`.
    pub fn for_entry(entry: &RemoteEntry, local_root: &Path) -> Self {
        Self::new(entry.path.clone(), local_path(local_root, &entry.path), entry.true_size())
    }
}

/// Non-fatal conditions noticed while transferring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferWarning {
    /// The finalized file does not have the size the listing announced.
    SizeMismatch {
        path:     PathBuf,
        expected: u64,
        actual:   u64,
    },
}

impl std::fmt::Display for TransferWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferWarning::SizeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {expected} bytes, found {actual}",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub destination: PathBuf,
    /// Bytes on disk at the destination after the transfer.
    pub bytes:       u64,
    /// `true` when an already complete destination was reused.
    pub skipped:     bool,
    pub warnings:    Vec<TransferWarning>,
}

/// What `ensure_repository` did for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    pub root:      PathBuf,
    /// The cache directory already existed and nothing was fetched.
    pub cached:    bool,
    pub transfers: Vec<TransferOutcome>,
}

impl RepositoryReport {
    pub fn path(&self) -> &Path { &self.root }

    pub fn warnings(&self) -> impl Iterator<Item = &TransferWarning> {
        self.transfers.iter().flat_map(|t| t.warnings.iter())
    }

    pub fn downloaded(&self) -> impl Iterator<Item = &TransferOutcome> {
        self.transfers.iter().filter(|t| !t.skipped)
    }
}

/// Result of a full load: the repository report plus the loader's output.
#[derive(Debug)]
pub struct LoadedRepository<T> {
    pub report: RepositoryReport,
    pub models: T,
}
