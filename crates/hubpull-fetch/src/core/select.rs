use crate::data::{EntryKind, RemoteEntry, RequiredModelSet};

/// Suffix identifying a compiled model package directory.
pub const MODEL_PACKAGE_SUFFIX: &str = ".mlmodelc";

/// Extensions of small metadata files fetched for every repository.
pub const METADATA_EXTENSIONS: [&str; 2] = ["json", "txt"];

/// The canonical configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// What the orchestrator does with one top-level entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Required model package: materialize the whole subtree.
    Model,
    /// Essential metadata file: transfer directly.
    Essential,
    Skip,
}

pub fn is_model_package(path: &str) -> bool { path.ends_with(MODEL_PACKAGE_SUFFIX) }

pub fn is_essential_file(name: &str) -> bool {
    if name == CONFIG_FILE_NAME {
        return true;
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => METADATA_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Decide whether a top-level entry is needed.
///
/// Model directories are pinned to the required set; files are picked by
/// name. Directories that are not model packages are never followed.
pub fn select(entry: &RemoteEntry, required: &RequiredModelSet) -> Selection {
    match entry.kind {
        EntryKind::Directory if is_model_package(&entry.path) && required.contains(&entry.path) => {
            Selection::Model
        }
        EntryKind::File if is_essential_file(entry.name()) => Selection::Essential,
        _ => Selection::Skip,
    }
}
