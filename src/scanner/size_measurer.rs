use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::models::{RootPath, SizeRecord};
use crate::scanner::path_relation::{absolutize, display_path, normalize_lexically};

/// 大小测量器 - 统计根目录下每个普通文件的字节数
pub struct SizeMeasurer {
    /// 工作目录，相对根目录以它为基准
    base_dir: PathBuf,

    /// 是否在 stderr 显示进度
    show_progress: bool,

    /// 是否跳过 `.git` 目录
    skip_git_dir: bool,
}

impl SizeMeasurer {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            show_progress: false,
            skip_git_dir: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// 默认与普通目录一样统计 `.git`；开启后整棵 `.git` 子树都不计入
    pub fn with_git_dir_skipped(mut self, skip_git_dir: bool) -> Self {
        self.skip_git_dir = skip_git_dir;
        self
    }

    /// 遍历所有根目录，返回文件大小记录
    ///
    /// 不存在的根目录不计入任何文件；重叠根目录中的同一文件只记录一次。
    pub fn measure(&self, roots: &[RootPath]) -> Result<SizeRecord> {
        let progress = if self.show_progress && !cfg!(test) {
            Self::create_progress_bar()
        } else {
            ProgressBar::hidden()
        };

        let mut record = SizeRecord::new();
        for root in roots {
            self.measure_root(root, &mut record, &progress)?;
        }

        progress.finish_and_clear();
        tracing::debug!(
            "统计了 {} 个文件，共 {} 字节",
            record.len(),
            record.total_bytes()
        );
        Ok(record)
    }

    /// 统计单个根目录
    fn measure_root(
        &self,
        root: &RootPath,
        record: &mut SizeRecord,
        progress: &ProgressBar,
    ) -> Result<()> {
        let root_dir = self.base_dir.join(root.as_path());
        if !root_dir.is_dir() {
            tracing::debug!("跳过不存在的目录: {}", root);
            return Ok(());
        }

        let display_root = normalize_lexically(root.as_path());
        let skip_git_dir = self.skip_git_dir;
        let walker = WalkDir::new(&root_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_git_dir && is_git_directory(entry)));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let inner = entry.path().strip_prefix(&root_dir).unwrap_or(entry.path());
            let display = display_path(&display_root.join(inner));
            let identity = absolutize(entry.path(), &self.base_dir);
            let bytes = entry.metadata()?.len();

            if record.insert(identity, display, bytes) {
                progress.inc(1);
                progress.set_message(format!("已统计 {} 个文件", record.len()));
            }
        }

        Ok(())
    }

    /// 创建进度条
    fn create_progress_bar() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn is_git_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// 统计当前工作目录中 `roots` 下所有文件的大小
pub fn create_size_dictionary(roots: &[RootPath]) -> Result<SizeRecord> {
    let base_dir = std::env::current_dir()?;
    SizeMeasurer::new(base_dir).measure(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_sized(path: &Path, bytes: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; bytes]).unwrap();
    }

    /// 建立测试目录结构：
    /// test_files/root_file.txt (100)
    /// test_files/size_test/test.txt (200)
    /// test_files/size_test/test.pdf (1000)
    /// release/output.txt (16)
    fn create_tree(root: &Path) {
        write_sized(&root.join("test_files/root_file.txt"), 100);
        write_sized(&root.join("test_files/size_test/test.txt"), 200);
        write_sized(&root.join("test_files/size_test/test.pdf"), 1000);
        write_sized(&root.join("release/output.txt"), 16);
    }

    #[test]
    fn test_single_directory() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer.measure(&["test_files".into()]).unwrap();

        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes.get("test_files/root_file.txt"), Some(100));
        assert_eq!(sizes.get("test_files/size_test/test.pdf"), Some(1000));
        assert_eq!(sizes.get("test_files/size_test/test.txt"), Some(200));
    }

    #[test]
    fn test_two_directories() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer
            .measure(&["test_files".into(), "release".into()])
            .unwrap();

        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes.get("release/output.txt"), Some(16));
    }

    #[test]
    fn test_current_directory() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer.measure(&[".".into()]).unwrap();

        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes.get("release/output.txt"), Some(16));
        assert_eq!(sizes.total_bytes(), 1316);
    }

    #[test]
    fn test_overlapping_roots_counted_once() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer
            .measure(&["test_files/size_test".into(), "test_files".into(), ".".into()])
            .unwrap();

        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes.total_bytes(), 1316);
        // 首次遇到的路径作为键
        assert!(sizes.contains("test_files/size_test/test.pdf"));
    }

    #[test]
    fn test_nonexistent_directory() {
        let temp_dir = tempdir().unwrap();
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer.measure(&["nonexistent_directory".into()]).unwrap();

        assert!(sizes.is_empty());
    }

    #[test]
    fn test_git_directory_counted_by_default() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        write_sized(&temp_dir.path().join(".git/objects/pack.idx"), 5000);
        let measurer = SizeMeasurer::new(temp_dir.path());

        let sizes = measurer.measure(&[".".into()]).unwrap();

        assert_eq!(sizes.len(), 5);
        assert_eq!(sizes.get(".git/objects/pack.idx"), Some(5000));
        assert_eq!(sizes.total_bytes(), 6316);
    }

    #[test]
    fn test_git_directory_skipped_when_requested() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path());
        write_sized(&temp_dir.path().join(".git/objects/pack.idx"), 5000);
        let measurer = SizeMeasurer::new(temp_dir.path()).with_git_dir_skipped(true);

        let sizes = measurer.measure(&[".".into()]).unwrap();

        assert_eq!(sizes.len(), 4);
        assert!(sizes.paths().all(|path| !path.starts_with(".git")));

        // 名为 .git 的普通文件（子模块）照常统计
        write_sized(&temp_dir.path().join("release/vendor/.git"), 30);
        let sizes = measurer.measure(&["release".into()]).unwrap();
        assert_eq!(sizes.get("release/vendor/.git"), Some(30));
    }
}
