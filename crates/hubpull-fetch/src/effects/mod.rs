//! I/O side of the engine: HTTP, disk, and the components built on them.

mod fs;
mod http;
mod hub;
mod lister;
mod loader;
mod materialize;
mod recovery;
mod transfer;

pub use http::{BoxStream, HttpClient, HttpResponse};
#[cfg(feature = "reqwest")]
pub use http::{ClientSettingError, ReqwestClient};
pub use hub::Hub;
pub use lister::TreeLister;
pub use loader::{ModelLoader, PathLoader};
pub use materialize::Materializer;
pub use recovery::{load_with_recovery, wipe_cache};
pub use transfer::TransferEngine;
