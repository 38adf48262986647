//! Download engine for model repositories.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure selection, path and progress rules
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Flow
//!
//! [`Hub::load_models`] wraps everything in a wipe-and-retry-once supervisor.
//! Inside, [`Hub::ensure_repository`] lists the remote root, materializes
//! the required model packages through [`Materializer`] and fetches essential
//! metadata files through [`TransferEngine`]. Transfers stream into a
//! `.download` sibling and are moved into place by `hubpull-fs`.

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use self::core::{ProgressThrottle, ThrottledSink};
pub use data::{
    ClientSetting, DEFAULT_ENDPOINT, DownloadProgress, EntryKind, HubOptions, LoadedRepository, ModelManifest,
    ProgressSink, RemoteEntry, RepoId, RepositoryReport, RequiredModelSet, StaticManifest,
    TransferOutcome, TransferTask, TransferWarning, channel_sink, noop_sink,
};
pub use effects::{
    BoxStream, Hub, HttpClient, HttpResponse, Materializer, ModelLoader, PathLoader, TransferEngine,
    TreeLister, load_with_recovery, wipe_cache,
};
#[cfg(feature = "reqwest")]
pub use effects::{ClientSettingError, ReqwestClient};
pub use error::{Error, Result};
