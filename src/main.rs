use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use repo_size_audit::cli::{AuditArgs, Cli, Commands, ConfigAction};
use repo_size_audit::config::{Config, StatusSourceKind};
use repo_size_audit::models::RootPath;
use repo_size_audit::operations::SizeAuditor;
use repo_size_audit::scanner::{
    Git2StatusSource, GitStatusCommand, IgnoredFileLister, SizeMeasurer, StatusSource,
};
use repo_size_audit::utils::size_format::format_megabytes;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志写到 stderr，stdout 只保留警告
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // 加载配置
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_file(config_path)?
    } else {
        Config::load_or_default()?
    };

    let base_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("无法获取当前工作目录")?,
    };

    // 根据命令执行相应操作
    match cli.command {
        None => run_audit(&config, &base_dir, AuditArgs::default()),
        Some(Commands::Audit(args)) => run_audit(&config, &base_dir, args),
        Some(Commands::Ignored { roots, source }) => {
            let roots = resolve_roots(&config, roots);
            let source = make_source(source.unwrap_or(config.audit.source));
            let ignored = IgnoredFileLister::new(source, base_dir).list(&roots)?;

            let mut out = io::stdout().lock();
            for path in ignored {
                writeln!(out, "{}", path)?;
            }
            Ok(())
        }
        Some(Commands::Sizes { roots }) => {
            let roots = resolve_roots(&config, roots);
            let sizes = SizeMeasurer::new(base_dir)
                .with_progress(config.audit.progress)
                .with_git_dir_skipped(config.audit.skip_git_dir)
                .measure(&roots)?;

            let mut out = io::stdout().lock();
            for entry in sizes.iter() {
                writeln!(out, "{}\t{}", entry.bytes, entry.path)?;
            }
            writeln!(
                out,
                "total: {} files, {} MB",
                sizes.len(),
                format_megabytes(sizes.total_megabytes())
            )?;
            Ok(())
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", Config::default_config_path()?.display());
                Ok(())
            }
        },
    }
}

/// 执行大小审计；警告只是提示，审计完成即正常退出
fn run_audit(config: &Config, base_dir: &Path, args: AuditArgs) -> Result<()> {
    let mut limits = config.audit.limits();
    if let Some(file_mb) = args.file_mb_limit {
        limits.file_mb = file_mb;
    }
    if let Some(total_mb) = args.total_mb_limit {
        limits.total_mb = total_mb;
    }

    let roots = resolve_roots(config, args.roots);
    let source = make_source(args.source.unwrap_or(config.audit.source));
    let color = config.audit.color && !args.no_color;

    tracing::debug!(
        "审计目录 {:?}，单文件上限 {} MB，总上限 {} MB",
        roots,
        limits.file_mb,
        limits.total_mb
    );

    let report = SizeAuditor::new(source, base_dir)
        .with_progress(config.audit.progress || args.progress)
        .with_git_dir_skipped(config.audit.skip_git_dir || args.skip_git_dir)
        .audit(&roots, &limits)
        .context("大小审计失败")?;

    report.write_to(&mut io::stdout().lock(), color)?;
    Ok(())
}

/// 命令行未给出根目录时使用配置中的根目录
fn resolve_roots(config: &Config, roots: Vec<String>) -> Vec<RootPath> {
    if roots.is_empty() {
        config.audit.roots.clone()
    } else {
        roots.into_iter().map(RootPath::from).collect()
    }
}

fn make_source(kind: StatusSourceKind) -> Box<dyn StatusSource> {
    match kind {
        StatusSourceKind::Command => Box::new(GitStatusCommand::new()),
        StatusSourceKind::Library => Box::new(Git2StatusSource::new()),
    }
}
