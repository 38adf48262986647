use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::primitives::remove::remove_file_if_exists;
use crate::{Error, Result};

/// Suffix appended to a destination to name its in-flight sibling.
pub const PARTIAL_SUFFIX: &str = ".download";

/// Rename hook used by [`finalize`]. Swappable so callers can exercise the
/// copy fallback without needing two filesystems.
pub type RenameFn = fn(&Path, &Path) -> io::Result<()>;

/// The path a transfer streams into before it is finalized.
pub fn partial_path(destination: impl AsRef<Path>) -> PathBuf {
    let destination = destination.as_ref();
    let mut name = destination.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    destination.with_file_name(name)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackStrategy {
    #[default]
    Copy,
    Error,
}

/// How a staged file reached its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finalized {
    Renamed,
    Copied,
}

#[derive(Clone, Copy)]
pub struct FinalizeOptions {
    fallback: FallbackStrategy,
    rename:   RenameFn,
}

impl fmt::Debug for FinalizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizeOptions")
            .field("fallback", &self.fallback)
            .field("rename", &"fn(..)")
            .finish()
    }
}

impl Default for FinalizeOptions {
    fn default() -> Self { Self::new() }
}

fn std_rename(from: &Path, to: &Path) -> io::Result<()> { std::fs::rename(from, to) }

impl FinalizeOptions {
    pub fn new() -> Self {
        Self {
            fallback: FallbackStrategy::default(),
            rename:   std_rename,
        }
    }

    pub fn fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn rename_with(mut self, rename: RenameFn) -> Self {
        self.rename = rename;
        self
    }

    pub fn get_fallback(&self) -> FallbackStrategy { self.fallback }
}

/// Move `staging` onto `destination`, replacing whatever is there.
///
/// A stale destination is removed first; a missing one is fine. If the rename
/// fails (cross-device, sandboxed directories) the file is copied and the
/// staging file deleted, unless the fallback is [`FallbackStrategy::Error`].
pub fn finalize(
    staging: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: FinalizeOptions,
) -> Result<Finalized> {
    let staging = staging.as_ref();
    let destination = destination.as_ref();

    remove_file_if_exists(destination)?;

    let rename_err = match (options.rename)(staging, destination) {
        Ok(()) => return Ok(Finalized::Renamed),
        Err(e) => e,
    };

    match options.fallback {
        FallbackStrategy::Error => Err(Error::Move {
            from:   staging.to_path_buf(),
            to:     destination.to_path_buf(),
            source: rename_err,
        }),
        FallbackStrategy::Copy => {
            std::fs::copy(staging, destination).map_err(|e| Error::Copy {
                from:   staging.to_path_buf(),
                to:     destination.to_path_buf(),
                source: e,
            })?;
            remove_file_if_exists(staging)?;
            Ok(Finalized::Copied)
        }
    }
}
