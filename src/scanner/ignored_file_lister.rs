use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::models::RootPath;
use crate::scanner::git_status::{GitStatusCommand, IgnoredEntry, StatusSource};
use crate::scanner::path_relation::is_subpath_in;

/// 被忽略文件列举器 - 找出版本控制忽略且位于审计根目录下的文件
pub struct IgnoredFileLister<S> {
    /// 被忽略路径的来源
    source: S,

    /// 工作目录，状态输出中的相对路径以它为基准
    base_dir: PathBuf,
}

impl<S: StatusSource> IgnoredFileLister<S> {
    pub fn new(source: S, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            base_dir: base_dir.into(),
        }
    }

    /// 列出 `roots` 下被忽略的文件（去重，保持首次出现的顺序）
    ///
    /// 被忽略的目录会展开为其中的所有文件；已经不存在的路径会被跳过。
    pub fn list(&self, roots: &[RootPath]) -> Result<Vec<String>> {
        let entries = self.source.ignored_entries(&self.base_dir)?;

        let mut candidates = Vec::new();
        for entry in &entries {
            self.expand_entry(entry, &mut candidates)?;
        }

        let mut seen = HashSet::new();
        let mut ignored = Vec::new();
        for root in roots {
            for candidate in &candidates {
                if is_subpath_in(candidate, root.as_str(), &self.base_dir)
                    && seen.insert(candidate.as_str())
                {
                    ignored.push(candidate.clone());
                }
            }
        }

        tracing::debug!(
            "{} 个被忽略的文件位于审计目录中（共 {} 个候选）",
            ignored.len(),
            candidates.len()
        );
        Ok(ignored)
    }

    /// 将一条被忽略的路径转换为候选文件列表
    fn expand_entry(&self, entry: &IgnoredEntry, candidates: &mut Vec<String>) -> Result<()> {
        let absolute = self.base_dir.join(&entry.path);

        if absolute.is_dir() {
            candidates.extend(Self::files_in_directory(&entry.path, &absolute)?);
        } else if entry.is_dir {
            tracing::debug!("被忽略的目录已不存在: {}", entry.path);
        } else if absolute.is_file() {
            candidates.push(entry.path.clone());
        } else {
            tracing::debug!("被忽略的文件已不存在: {}", entry.path);
        }

        Ok(())
    }

    /// 递归列出目录中的所有普通文件，路径以 `display_prefix` 开头
    fn files_in_directory(display_prefix: &str, dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let inner = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            files.push(
                Path::new(display_prefix)
                    .join(inner)
                    .to_string_lossy()
                    .into_owned(),
            );
        }

        Ok(files)
    }
}

/// 列出当前工作目录中 `roots` 下被 git 忽略的文件
pub fn list_ignored_files(roots: &[RootPath]) -> Result<Vec<String>> {
    let base_dir = std::env::current_dir()?;
    IgnoredFileLister::new(GitStatusCommand::new(), base_dir).list(roots)
}
