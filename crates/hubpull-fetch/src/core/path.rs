use std::path::{Path, PathBuf};

/// Whether `path` is a safe repository-relative path: non-empty, slash
/// separated, with no absolute, empty, `.` or `..` segments.
pub fn is_safe_relative(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && path.split('/').all(|s| !s.is_empty() && s != "." && s != "..")
}

/// Whether a listing row returned for `parent` really lives below it.
pub fn is_child_of(parent: &str, path: &str) -> bool {
    if !is_safe_relative(path) {
        return false;
    }
    if parent.is_empty() {
        return true;
    }
    path.strip_prefix(parent)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'))
}

/// Map a repository-relative path onto the local filesystem.
pub fn local_path(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(relative.split('/').filter(|s| !s.is_empty()));
    path
}
