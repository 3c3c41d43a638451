use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository, Status, StatusOptions};

use crate::error::{AuditError, Result};

/// 版本控制报告的一条被忽略路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredEntry {
    /// 相对于工作目录的路径（目录不带结尾分隔符）
    pub path: String,

    /// 是否是被整体忽略的目录
    pub is_dir: bool,
}

impl IgnoredEntry {
    /// 从状态输出中的一个路径记号构造；以 `/` 结尾表示目录
    pub fn from_token(token: &str) -> Self {
        match token.strip_suffix('/') {
            Some(dir) => Self {
                path: dir.to_string(),
                is_dir: true,
            },
            None => Self {
                path: token.to_string(),
                is_dir: false,
            },
        }
    }
}

/// 被忽略文件的来源 - 隔离具体的版本控制查询方式
pub trait StatusSource {
    /// 返回 `workdir` 下版本控制正在忽略的路径，按报告顺序排列
    fn ignored_entries(&self, workdir: &Path) -> Result<Vec<IgnoredEntry>>;
}

impl<S: StatusSource + ?Sized> StatusSource for Box<S> {
    fn ignored_entries(&self, workdir: &Path) -> Result<Vec<IgnoredEntry>> {
        (**self).ignored_entries(workdir)
    }
}

/// 解析 `git status --ignored` 的文本输出，提取 "Ignored files" 段中的路径
///
/// 没有该段时返回空列表。
pub fn parse_ignored_section(output: &str) -> Vec<IgnoredEntry> {
    let mut lines = output.lines();

    if !lines.by_ref().any(|line| line.contains("Ignored files")) {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for line in lines {
        let token = line.trim_start_matches([' ', '\t']).trim_end();

        if token.is_empty() {
            if entries.is_empty() {
                continue; // 提示行与路径之间的空行
            }
            break;
        }

        // "(use "git add -f <file>..." ...)" 之类的提示行
        if entries.is_empty() && token.starts_with('(') {
            continue;
        }

        entries.push(IgnoredEntry::from_token(&unquote(token)));
    }

    entries
}

/// 还原 git 为特殊文件名添加的双引号与 C 风格转义（`\"`、`\\`、`\t`、`\n`、八进制字节）
fn unquote(token: &str) -> Cow<'_, str> {
    let Some(inner) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
        return Cow::Borrowed(token);
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        rest = tail;
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }

        let Some((&escaped, tail)) = rest.split_first() else {
            bytes.push(b'\\');
            break;
        };
        rest = tail;
        match escaped {
            b'a' => bytes.push(0x07),
            b'b' => bytes.push(0x08),
            b'f' => bytes.push(0x0c),
            b'n' => bytes.push(b'\n'),
            b'r' => bytes.push(b'\r'),
            b't' => bytes.push(b'\t'),
            b'v' => bytes.push(0x0b),
            b'0'..=b'3' if rest.len() >= 2 && is_octal(rest[0]) && is_octal(rest[1]) => {
                bytes.push(((escaped - b'0') << 6) | ((rest[0] - b'0') << 3) | (rest[1] - b'0'));
                rest = &rest[2..];
            }
            other => bytes.push(other),
        }
    }

    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

fn is_octal(byte: u8) -> bool {
    (b'0'..=b'7').contains(&byte)
}

const STATUS_ARGS: [&str; 10] = [
    "-c",
    "color.status=never",
    "-c",
    "core.quotePath=false",
    "-c",
    "status.relativePaths=true",
    "status",
    "--long",
    "--untracked-files=normal",
    "--ignored",
];

/// 通过 `git status --ignored` 命令获取被忽略的文件
#[derive(Debug, Clone)]
pub struct GitStatusCommand {
    program: String,
}

impl Default for GitStatusCommand {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitStatusCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的 git 可执行文件
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 运行状态命令并返回完整的标准输出
    ///
    /// 用户或仓库配置（`status.short`、`status.showUntrackedFiles`、
    /// `status.relativePaths`、`core.quotePath`）都会被覆盖，保证输出是可解析的长格式。
    pub fn run(&self, workdir: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(STATUS_ARGS)
            // 保证段落标题是英文的 "Ignored files"
            .env("LC_ALL", "C")
            .current_dir(workdir)
            .output()
            .map_err(AuditError::StatusCommand)?;

        if !output.status.success() {
            return Err(AuditError::StatusFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StatusSource for GitStatusCommand {
    fn ignored_entries(&self, workdir: &Path) -> Result<Vec<IgnoredEntry>> {
        let output = self.run(workdir)?;
        let entries = parse_ignored_section(&output);
        tracing::debug!("git status 报告了 {} 个被忽略的路径", entries.len());
        Ok(entries)
    }
}

/// 通过 libgit2 查询被忽略的文件，不依赖 git 命令行
#[derive(Debug, Clone, Default)]
pub struct Git2StatusSource;

impl Git2StatusSource {
    pub fn new() -> Self {
        Self
    }
}

impl StatusSource for Git2StatusSource {
    fn ignored_entries(&self, workdir: &Path) -> Result<Vec<IgnoredEntry>> {
        let repo = Repository::discover(workdir)?;
        let repo_root = match repo.workdir() {
            Some(root) => fs::canonicalize(root)?,
            None => return Ok(Vec::new()), // 裸仓库没有工作区
        };
        let base = fs::canonicalize(workdir)?;

        let mut options = StatusOptions::new();
        options
            .include_ignored(true)
            .include_untracked(true)
            // 未跟踪目录中的被忽略文件也要报告
            .recurse_untracked_dirs(true)
            .recurse_ignored_dirs(false);

        let statuses = repo.statuses(Some(&mut options))?;

        let mut entries = Vec::new();
        for status in statuses.iter() {
            if !status.status().contains(Status::IGNORED) {
                continue;
            }
            let Some(repo_relative) = status.path() else {
                continue; // 非 UTF-8 路径
            };

            let entry = IgnoredEntry::from_token(repo_relative);
            let absolute = repo_root.join(&entry.path);
            entries.push(IgnoredEntry {
                path: relative_to(&absolute, &base),
                is_dir: entry.is_dir || absolute.is_dir(),
            });
        }

        tracing::debug!("libgit2 报告了 {} 个被忽略的路径", entries.len());
        Ok(entries)
    }
}

/// 若 `path` 位于 `base` 之下则返回相对路径，否则返回绝对路径
fn relative_to(path: &Path, base: &Path) -> String {
    let relative: PathBuf = match path.strip_prefix(base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    };
    relative.to_string_lossy().into_owned()
}
