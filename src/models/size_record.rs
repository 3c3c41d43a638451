use std::collections::HashSet;
use std::path::PathBuf;

/// 字节数换算为（十进制）兆字节的除数
pub const BYTES_PER_MB: f64 = 1_000_000.0;

/// 大小记录 - 文件路径到字节数的有序映射
///
/// 同一个文件（按规范化绝对路径判断）只记录一次。
#[derive(Debug, Clone, Default)]
pub struct SizeRecord {
    entries: Vec<SizeEntry>,
    seen: HashSet<PathBuf>,
}

/// 单个文件的大小
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    /// 显示用路径（根目录 + 根目录内的相对路径）
    pub path: String,

    /// 文件字节数
    pub bytes: u64,
}

impl SizeEntry {
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / BYTES_PER_MB
    }
}

impl SizeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个文件；`identity` 已存在时忽略并返回 false
    pub fn insert(&mut self, identity: PathBuf, path: String, bytes: u64) -> bool {
        if !self.seen.insert(identity) {
            return false;
        }
        self.entries.push(SizeEntry { path, bytes });
        true
    }

    /// 查询某个显示路径的字节数
    pub fn get(&self, path: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.bytes)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeEntry> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    /// 所有文件的总字节数
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|entry| entry.bytes).sum()
    }

    /// 所有文件的总大小（MB）
    pub fn total_megabytes(&self) -> f64 {
        self.total_bytes() as f64 / BYTES_PER_MB
    }
}

impl FromIterator<(String, u64)> for SizeRecord {
    /// 以显示路径作为身份构造记录，主要用于测试与手工组装
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (path, bytes) in iter {
            record.insert(PathBuf::from(&path), path, bytes);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates_by_identity() {
        let mut record = SizeRecord::new();

        assert!(record.insert(PathBuf::from("/p/a.txt"), "a.txt".to_string(), 10));
        assert!(!record.insert(PathBuf::from("/p/a.txt"), "./a.txt".to_string(), 10));
        assert!(record.insert(PathBuf::from("/p/b.txt"), "b.txt".to_string(), 5));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a.txt"), Some(10));
        assert!(!record.contains("./a.txt"));
        assert_eq!(record.total_bytes(), 15);
    }

    #[test]
    fn test_megabytes_use_decimal_units() {
        let record: SizeRecord = vec![
            ("large.txt".to_string(), 3_000_000),
            ("small.txt".to_string(), 1_000_000),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.total_megabytes(), 4.0);
        let first = record.iter().next().unwrap();
        assert_eq!(first.megabytes(), 3.0);
    }
}
