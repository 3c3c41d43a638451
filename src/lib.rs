pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod scanner;
pub mod utils;

// 重新导出常用模块
pub use error::{AuditError, Result};
pub use models::{RootPath, SizeLimits, SizeRecord};
pub use operations::{issue_size_warnings, AuditReport, SizeAuditor};
pub use scanner::{create_size_dictionary, is_subpath, list_ignored_files, StatusSource};
