use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::size_record::BYTES_PER_MB;
use crate::models::{display_roots, RootPath, SizeEntry, SizeLimits, SizeRecord};
use crate::scanner::git_status::{GitStatusCommand, StatusSource};
use crate::scanner::ignored_file_lister::IgnoredFileLister;
use crate::scanner::path_relation::absolutize;
use crate::scanner::size_measurer::SizeMeasurer;
use crate::utils::size_format::{format_megabytes, warning_label};

/// 超过单文件上限且未被忽略的文件
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedFile {
    pub path: String,
    pub megabytes: f64,
}

/// 总大小超限信息
#[derive(Debug, Clone, PartialEq)]
pub struct TotalSizeWarning {
    pub roots: String,
    pub megabytes: f64,
}

/// 一次审计的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    /// 超过单文件上限的文件（按大小记录的顺序）
    pub flagged: Vec<FlaggedFile>,

    /// 总大小超限时的警告
    pub total: Option<TotalSizeWarning>,

    /// 未被忽略文件的总大小（MB）
    pub total_megabytes: f64,
}

impl AuditReport {
    pub fn has_warnings(&self) -> bool {
        !self.flagged.is_empty() || self.total.is_some()
    }

    /// 每条警告对应一行文本
    pub fn warning_lines(&self, color: bool) -> Vec<String> {
        let label = warning_label(color);
        let mut lines: Vec<String> = self
            .flagged
            .iter()
            .map(|file| {
                format!(
                    "{} {} (size: {} MB). Versioning files of this size is discouraged.",
                    label,
                    file.path,
                    format_megabytes(file.megabytes)
                )
            })
            .collect();

        if let Some(total) = &self.total {
            lines.push(format!(
                "{} total size of {} is {} MB. Versioning this much content is discouraged.",
                label,
                total.roots,
                format_megabytes(total.megabytes)
            ));
        }

        lines
    }

    /// 将警告写入输出流
    pub fn write_to<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        for line in self.warning_lines(color) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

/// 按阈值评估大小记录，返回需要发出的警告
///
/// 被忽略的文件不会提交，既不单独告警也不计入总大小。比较均为严格大于。
pub fn evaluate(
    sizes: &SizeRecord,
    ignored: &[String],
    roots: &[RootPath],
    limits: &SizeLimits,
    base_dir: &Path,
) -> AuditReport {
    let ignored: HashSet<PathBuf> = ignored
        .iter()
        .map(|path| absolutize(Path::new(path), base_dir))
        .collect();

    let versioned: Vec<&SizeEntry> = sizes
        .iter()
        .filter(|entry| !ignored.contains(&absolutize(Path::new(&entry.path), base_dir)))
        .collect();

    let flagged = versioned
        .iter()
        .filter(|entry| entry.megabytes() > limits.file_mb)
        .map(|entry| FlaggedFile {
            path: entry.path.clone(),
            megabytes: entry.megabytes(),
        })
        .collect();

    let total_bytes: u64 = versioned.iter().map(|entry| entry.bytes).sum();
    let total_megabytes = total_bytes as f64 / BYTES_PER_MB;
    let total = (total_megabytes > limits.total_mb).then(|| TotalSizeWarning {
        roots: display_roots(roots),
        megabytes: total_megabytes,
    });

    AuditReport {
        flagged,
        total,
        total_megabytes,
    }
}

/// 大小审计器 - 组合大小测量与被忽略文件列举，按阈值给出警告
pub struct SizeAuditor<S> {
    lister: IgnoredFileLister<S>,
    measurer: SizeMeasurer,
    base_dir: PathBuf,
}

impl<S: StatusSource> SizeAuditor<S> {
    pub fn new(source: S, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            lister: IgnoredFileLister::new(source, base_dir.clone()),
            measurer: SizeMeasurer::new(base_dir.clone()),
            base_dir,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.measurer = self.measurer.with_progress(show_progress);
        self
    }

    pub fn with_git_dir_skipped(mut self, skip_git_dir: bool) -> Self {
        self.measurer = self.measurer.with_git_dir_skipped(skip_git_dir);
        self
    }

    /// 测量大小、列出被忽略文件，再按阈值评估
    pub fn audit(&self, roots: &[RootPath], limits: &SizeLimits) -> Result<AuditReport> {
        let sizes = self.measurer.measure(roots)?;
        let ignored = self.lister.list(roots)?;

        let report = evaluate(&sizes, &ignored, roots, limits, &self.base_dir);
        tracing::info!(
            "审计完成：{} 个文件，{} 个被忽略，{} 个超限文件，待版本化内容 {} MB",
            sizes.len(),
            ignored.len(),
            report.flagged.len(),
            format_megabytes(report.total_megabytes)
        );
        Ok(report)
    }
}

/// 审计当前工作目录中的 `roots`，把警告打印到标准输出
pub fn issue_size_warnings(
    roots: &[RootPath],
    file_mb_limit: f64,
    total_mb_limit: f64,
) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    let limits = SizeLimits::new(file_mb_limit, total_mb_limit);

    let report = SizeAuditor::new(GitStatusCommand::new(), base_dir).audit(roots, &limits)?;
    report.write_to(&mut io::stdout().lock(), true)?;
    Ok(())
}
