//! Filesystem primitives for staged downloads.
//!
//! Transfers stream into a `.download` sibling of their destination and are
//! moved into place by [`finalize`], which falls back to copy-and-delete when
//! a rename is refused. Removal helpers treat "already gone" as success.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::*;
