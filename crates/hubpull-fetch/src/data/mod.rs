//! Immutable data types shared by the engine.
//!
//! Nothing in here performs I/O; the types are built by callers or parsed
//! from listing responses and passed down to [`effects`](crate::effects).

pub mod client;
pub mod entry;
pub mod manifest;
pub mod options;
pub mod progress;
pub mod repo;
pub mod task;

pub use client::ClientSetting;
pub use entry::{EntryKind, LfsInfo, RemoteEntry};
pub use manifest::{ModelManifest, StaticManifest};
pub use options::{DEFAULT_ENDPOINT, HubOptions};
pub use progress::{DownloadProgress, ProgressSink, channel_sink, noop_sink};
pub use repo::{RepoId, RequiredModelSet};
pub use task::{LoadedRepository, RepositoryReport, TransferOutcome, TransferTask, TransferWarning};
