use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::AuditError;

/// 审计根目录 - 调用方提供的目录路径字符串
///
/// 空字符串与 `.` 都表示当前工作目录。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "toml::Value", into = "String")]
pub struct RootPath(String);

impl RootPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl From<&str> for RootPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RootPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<RootPath> for String {
    fn from(root: RootPath) -> Self {
        root.0
    }
}

impl TryFrom<toml::Value> for RootPath {
    type Error = AuditError;

    fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
        match value {
            toml::Value::String(path) => Ok(Self(path)),
            other => Err(AuditError::NotAPath {
                found: other.type_str(),
            }),
        }
    }
}

impl fmt::Display for RootPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 按警告输出的格式拼接根目录列表
pub fn display_roots(roots: &[RootPath]) -> String {
    roots
        .iter()
        .map(RootPath::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
