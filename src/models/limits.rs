use serde::{Deserialize, Serialize};

/// 默认的单文件上限（MB）
pub const DEFAULT_FILE_MB_LIMIT: f64 = 2.0;

/// 默认的总大小上限（MB）
pub const DEFAULT_TOTAL_MB_LIMIT: f64 = 500.0;

/// 大小阈值，单位为十进制兆字节
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// 单个文件的上限
    pub file_mb: f64,

    /// 所有文件合计的上限
    pub total_mb: f64,
}

impl SizeLimits {
    pub fn new(file_mb: f64, total_mb: f64) -> Self {
        Self { file_mb, total_mb }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_MB_LIMIT, DEFAULT_TOTAL_MB_LIMIT)
    }
}
