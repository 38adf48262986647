pub mod table;
pub mod tracker;

pub use table::Formatter;
pub use tracker::FileProgress;
