use crate::models::RootPath;

pub struct DefaultConfig;

impl DefaultConfig {
    /// 默认审计的根目录（研究项目中会被版本化的目录）
    pub fn default_roots() -> Vec<RootPath> {
        ["source", "raw", "release"]
            .into_iter()
            .map(RootPath::from)
            .collect()
    }
}
