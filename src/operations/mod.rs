pub mod size_audit;

pub use size_audit::{
    evaluate, issue_size_warnings, AuditReport, FlaggedFile, SizeAuditor, TotalSizeWarning,
};
