pub mod finalize;
pub mod remove;

pub use finalize::{
    FallbackStrategy, FinalizeOptions, Finalized, PARTIAL_SUFFIX, RenameFn, finalize, partial_path,
};
pub use remove::{RemoveDirOptions, remove_dir_all_if_exists, remove_file_if_exists};
