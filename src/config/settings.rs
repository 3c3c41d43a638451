use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::config::defaults::DefaultConfig;
use crate::models::{RootPath, SizeLimits};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 审计配置
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// 需要审计的根目录
    pub roots: Vec<RootPath>,

    /// 单个文件的大小上限（MB）
    pub file_mb_limit: f64,

    /// 所有文件合计的大小上限（MB）
    pub total_mb_limit: f64,

    /// 被忽略文件的来源
    pub source: StatusSourceKind,

    /// 是否给警告加上颜色
    pub color: bool,

    /// 是否显示统计进度
    pub progress: bool,

    /// 统计时是否跳过 `.git` 目录
    pub skip_git_dir: bool,
}

/// 被忽略文件的查询方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusSourceKind {
    /// 运行 `git status --ignored`
    Command,
    /// 使用 libgit2
    Library,
}

impl Default for AuditConfig {
    fn default() -> Self {
        let limits = SizeLimits::default();
        Self {
            roots: DefaultConfig::default_roots(),
            file_mb_limit: limits.file_mb,
            total_mb_limit: limits.total_mb,
            source: StatusSourceKind::Command,
            color: true,
            progress: false,
            skip_git_dir: false,
        }
    }
}

impl AuditConfig {
    pub fn limits(&self) -> SizeLimits {
        SizeLimits::new(self.file_mb_limit, self.total_mb_limit)
    }
}

impl Config {
    /// 从文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("配置文件格式错误 {}", path.display()))
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// 以 TOML 文本输出配置
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 获取默认配置文件路径
    pub fn default_config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("无法找到配置目录"))?;
        path.push("repo-size-audit");
        path.push("config.toml");
        Ok(path)
    }

    /// 加载默认位置的配置，文件不存在时使用内置默认值（不会写入文件）
    pub fn load_or_default() -> Result<Self> {
        match Self::default_config_path() {
            Ok(config_path) if config_path.exists() => Self::load_from_file(&config_path),
            _ => Ok(Self::default()),
        }
    }
}
