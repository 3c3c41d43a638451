use std::path::{Component, Path, PathBuf};

/// 判断 `inner` 是否等于 `outer` 或位于其内部（相对于当前工作目录解析）
pub fn is_subpath(inner: &str, outer: &str) -> bool {
    // 无法获取工作目录时退化为纯词法比较
    let base = std::env::current_dir().unwrap_or_default();
    is_subpath_in(inner, outer, &base)
}

/// 判断 `inner` 是否等于 `outer` 或位于其内部，相对路径以 `base` 为基准
pub fn is_subpath_in(inner: &str, outer: &str, base: &Path) -> bool {
    let inner = absolutize(Path::new(inner), base);
    let outer = absolutize(Path::new(outer), base);

    // starts_with 按路径组件比较，release2 不会被视为 release 的子路径
    inner.starts_with(&outer)
}

/// 将路径转换为以 `base` 为基准的规范化绝对路径（不解析符号链接）
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// 词法规范化：去掉 `.`，折叠 `..`，不越过根目录
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if last_is_normal {
                    normalized.pop();
                } else if !normalized.has_root() {
                    // 相对路径开头的 .. 需要保留
                    normalized.push("..");
                }
            }
            Component::Normal(name) => normalized.push(name),
        }
    }

    normalized
}

/// 将路径转为显示用字符串；空路径显示为 `.`
pub fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/home/user/project")
    }

    #[test]
    fn test_subpaths_recognised() {
        let expect_true = [
            (".", ".."),
            ("release", "."),
            ("release", ""),
            ("./release", "."),
            ("release", "/"),
            ("release/subdir", "."),
            ("release/subdir", "release"),
            ("release/subdir", "./release"),
            ("release/../release/subdir", "release"),
            ("release", "release"),
            ("/home/user/project/release/a.txt", "release"),
        ];

        for (inner, outer) in expect_true {
            assert!(
                is_subpath_in(inner, outer, &base()),
                "{inner} should be under {outer}"
            );
        }
    }

    #[test]
    fn test_non_subpaths_rejected() {
        let expect_false = [
            (".", "release"),
            ("/release", "."),
            ("release2/file.txt", "release"),
            ("release/../raw", "release"),
        ];

        for (inner, outer) in expect_false {
            assert!(
                !is_subpath_in(inner, outer, &base()),
                "{inner} should not be under {outer}"
            );
        }
    }

    #[test]
    fn test_is_subpath_uses_working_directory() {
        assert!(is_subpath("release", ""));
        assert!(is_subpath("release", "."));
        assert!(is_subpath("release", "/"));
        assert!(!is_subpath(".", "release"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(normalize_lexically(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_lexically(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_lexically(Path::new("./")), PathBuf::new());
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(Path::new("")), ".");
        assert_eq!(display_path(Path::new("raw/a.txt")), "raw/a.txt");
    }
}
