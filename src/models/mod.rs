pub mod limits;
pub mod root_path;
pub mod size_record;

pub use limits::SizeLimits;
pub use root_path::{display_roots, RootPath};
pub use size_record::{SizeEntry, SizeRecord};
