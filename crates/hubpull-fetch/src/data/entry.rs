use serde::{Deserialize, Serialize};

/// Kind of a remote tree row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Large-file-storage block attached to files kept out of band.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LfsInfo {
    #[serde(default)]
    pub size:         Option<u64>,
    #[serde(default)]
    pub sha256:       Option<String>,
    #[serde(default)]
    pub oid:          Option<String>,
    #[serde(default, alias = "pointerSize")]
    pub pointer_size: Option<u64>,
}

/// One row of a remote tree listing.
///
/// `path` is relative to the repository root and slash separated, for nested
/// rows as well as top-level ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lfs:  Option<LfsInfo>,
}

impl RemoteEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            kind: EntryKind::File,
            path: path.into(),
            size,
            lfs: None,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Directory,
            path: path.into(),
            size: 0,
            lfs: None,
        }
    }

    #[must_use]
    pub fn with_lfs_size(mut self, size: u64) -> Self {
        self.lfs = Some(LfsInfo {
            size: Some(size),
            ..LfsInfo::default()
        });
        self
    }

    /// Byte size of the file content; the LFS size wins over the pointer size.
    pub fn true_size(&self) -> u64 {
        self.lfs
            .as_ref()
            .and_then(|lfs| lfs.size)
            .unwrap_or(self.size)
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn is_dir(&self) -> bool { self.kind == EntryKind::Directory }

    pub fn is_file(&self) -> bool { self.kind == EntryKind::File }
}
