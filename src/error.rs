use std::process::ExitStatus;
use thiserror::Error;

/// 大小审计过程中可能出现的错误
#[derive(Debug, Error)]
pub enum AuditError {
    /// 根目录不是路径字符串（调用方违反约定）
    #[error("expected a path string, found {found}")]
    NotAPath { found: &'static str },

    /// 无法启动 `git status --ignored`
    #[error("failed to run `git status --ignored`: {0}")]
    StatusCommand(#[source] std::io::Error),

    /// `git status --ignored` 返回非零退出码
    #[error("`git status --ignored` exited with {status}: {stderr}")]
    StatusFailed { status: ExitStatus, stderr: String },

    /// libgit2 查询失败
    #[error("git repository query failed: {0}")]
    Git(#[from] git2::Error),

    /// 目录遍历失败
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// 是否属于调用方违反约定（而非外部环境故障）
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AuditError::NotAPath { .. })
    }
}

/// 审计操作的结果类型
pub type Result<T> = std::result::Result<T, AuditError>;
