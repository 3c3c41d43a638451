pub mod git_status;
pub mod ignored_file_lister;
pub mod path_relation;
pub mod size_measurer;

pub use git_status::{Git2StatusSource, GitStatusCommand, IgnoredEntry, StatusSource};
pub use ignored_file_lister::{list_ignored_files, IgnoredFileLister};
pub use path_relation::{is_subpath, is_subpath_in};
pub use size_measurer::{create_size_dictionary, SizeMeasurer};
