//! Pure rules of the engine: which entries are needed, where they live, how
//! URLs are formed and how progress is thinned out.

mod path;
mod select;
mod throttle;
mod endpoint;

pub use path::{is_child_of, is_safe_relative, local_path};
pub use select::{
    CONFIG_FILE_NAME, METADATA_EXTENSIONS, MODEL_PACKAGE_SUFFIX, Selection, is_essential_file,
    is_model_package, select,
};
pub use throttle::{ProgressThrottle, ThrottledSink};
pub use endpoint::{DEFAULT_REVISION, listing_url, resolve_url};
