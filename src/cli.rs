use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StatusSourceKind;

#[derive(Parser)]
#[command(name = "repo-size-audit")]
#[command(about = "检查研究项目目录中的文件大小，对过大的文件与内容总量给出警告")]
#[command(version = "0.1.0")]
pub struct Cli {
    // 未指定子命令时按配置执行 audit
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 审计所在的工作目录（默认为当前目录）
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 审计文件大小并输出警告
    Audit(AuditArgs),

    /// 列出根目录下被 git 忽略的文件
    Ignored {
        /// 要检查的目录（默认使用配置中的目录）
        roots: Vec<String>,

        /// 被忽略文件的来源
        #[arg(long, value_enum)]
        source: Option<StatusSourceKind>,
    },

    /// 列出根目录下每个文件的字节数
    Sizes {
        /// 要统计的目录（默认使用配置中的目录）
        roots: Vec<String>,
    },

    /// 管理配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Default)]
pub struct AuditArgs {
    /// 要审计的目录（默认使用配置中的目录）
    pub roots: Vec<String>,

    /// 单个文件的大小上限（MB）
    #[arg(long = "file-limit-mb")]
    pub file_mb_limit: Option<f64>,

    /// 所有文件合计的大小上限（MB）
    #[arg(long = "total-limit-mb")]
    pub total_mb_limit: Option<f64>,

    /// 被忽略文件的来源
    #[arg(long, value_enum)]
    pub source: Option<StatusSourceKind>,

    /// 不输出颜色
    #[arg(long)]
    pub no_color: bool,

    /// 在 stderr 显示统计进度
    #[arg(long)]
    pub progress: bool,

    /// 统计时跳过 .git 目录
    #[arg(long)]
    pub skip_git_dir: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前生效的配置
    Show,

    /// 显示默认配置文件路径
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_audit() {
        let cli = Cli::try_parse_from(["repo-size-audit", "-v"]).unwrap();

        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_audit_subcommand() {
        let cli = Cli::try_parse_from([
            "repo-size-audit",
            "-C",
            "/tmp/project",
            "audit",
            ".",
            "--source",
            "library",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/project")));
        match cli.command {
            Some(Commands::Audit(args)) => {
                assert_eq!(args.roots, vec!["."]);
                assert_eq!(args.source, Some(StatusSourceKind::Library));
                assert!(args.no_color);
            }
            _ => panic!("expected audit subcommand"),
        }
    }

    #[test]
    fn test_global_flags_before_other_subcommands() {
        let cli =
            Cli::try_parse_from(["repo-size-audit", "-C", "/tmp/project", "sizes", "raw"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/project")));
        assert!(matches!(cli.command, Some(Commands::Sizes { roots }) if roots == vec!["raw"]));

        let cli = Cli::try_parse_from([
            "repo-size-audit",
            "--config",
            "audit.toml",
            "ignored",
            "--source",
            "command",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("audit.toml")));
        match cli.command {
            Some(Commands::Ignored { roots, source }) => {
                assert!(roots.is_empty());
                assert_eq!(source, Some(StatusSourceKind::Command));
            }
            _ => panic!("expected ignored subcommand"),
        }
    }

    #[test]
    fn test_audit_limits_and_git_dir_flag() {
        let cli = Cli::try_parse_from([
            "repo-size-audit",
            "audit",
            "raw",
            "release",
            "--file-limit-mb",
            "1.5",
            "--skip-git-dir",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Audit(args)) => {
                assert_eq!(args.roots, vec!["raw", "release"]);
                assert_eq!(args.file_mb_limit, Some(1.5));
                assert_eq!(args.total_mb_limit, None);
                assert!(args.skip_git_dir);
            }
            _ => panic!("expected audit subcommand"),
        }
    }
}
