use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use lintgate_core::{
    render_annotations, render_markdown_for_receipt, run_analysis, run_scan, ScanPlan,
};
use lintgate_domain::{classify_all, classify_changed, SourcePathSpec};
use lintgate_types::ClassifiedFileSet;

mod config_loader;
mod git;

use config_loader::{load_scan_config, ScanConfig};

#[derive(Parser)]
#[command(name = "lintgate")]
#[command(about = "CI code-quality gate over external static analyzers", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify files, run the analyzers, diff the baseline, and evaluate
    /// thresholds.
    Scan(ScanArgs),

    /// Run the analyzers and write the violation set as the next baseline
    /// snapshot.
    Baseline(BaselineArgs),

    /// Parse and sanity-check the configuration file.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Path to the config file. Defaults to ./lintgate.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base git ref for the change list.
    #[arg(long, default_value = "origin/main")]
    base: String,

    /// Head git ref for the change list.
    #[arg(long, default_value = "HEAD")]
    head: String,

    /// Read the candidate file list from a file ('-' for stdin) instead of
    /// asking git.
    #[arg(long, value_name = "PATH")]
    files_from: Option<PathBuf>,

    /// Where to write the JSON receipt.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write a Markdown summary.
    #[arg(long, value_name = "PATH")]
    md: Option<PathBuf>,

    /// Emit GitHub Actions annotations to stdout.
    #[arg(long)]
    github_annotations: bool,
}

#[derive(Parser, Debug)]
struct BaselineArgs {
    /// Path to the config file. Defaults to ./lintgate.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the candidate file list from a file ('-' for stdin) instead of
    /// asking git.
    #[arg(long, value_name = "PATH")]
    files_from: Option<PathBuf>,

    /// Where to write the baseline snapshot.
    #[arg(long, default_value = "baseline.json")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to the config file. Defaults to ./lintgate.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(not(test))]
fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Scan(args) => cmd_scan(args),
        Commands::Baseline(args) => {
            cmd_baseline(args)?;
            Ok(0)
        }
        Commands::Validate(args) => {
            cmd_validate(args)?;
            Ok(0)
        }
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_scan(args: ScanArgs) -> Result<i32> {
    let config = load_scan_config(args.config.as_deref())?;
    log_config(&config);

    let classified = collect_files(&config, args.files_from.as_deref(), &args.base, &args.head)?;
    info!(
        "found {} files matching source path ({} new, {} modified) out of {}",
        classified.filtered_files.len(),
        classified.new_files.len(),
        classified.modified_files.len(),
        classified.total_count
    );

    let plan = ScanPlan {
        file_types: config.file_types.clone(),
        thresholds: config.thresholds.clone(),
        cache_enabled: config.enable_scan_cache,
        previous_violations_file: config.previous_violations_file.clone(),
    };

    let run = run_scan(&plan, &classified, Utc::now().to_rfc3339());

    if let Some(out) = &args.out {
        write_artifact(out, &serde_json::to_string_pretty(&run.receipt).context("render receipt")?)?;
        info!("wrote receipt to {}", out.display());
    }

    if let Some(md) = &args.md {
        write_artifact(md, &render_markdown_for_receipt(&run.receipt))?;
        info!("wrote markdown summary to {}", md.display());
    }

    if args.github_annotations {
        for annotation in render_annotations(&run.receipt.violations) {
            println!("{annotation}");
        }
    }

    let verdict = &run.receipt.verdict;
    if verdict.should_fail && config.thresholds.fail_on_quality_issues {
        warn!("quality issues found:");
        for reason in &verdict.failure_reasons {
            warn!("  {reason}");
        }
        Ok(2)
    } else {
        if verdict.total_violations > 0 {
            warn!("found {} code quality violations", verdict.total_violations);
        } else {
            info!("no violations found");
        }
        Ok(0)
    }
}

fn cmd_baseline(args: BaselineArgs) -> Result<()> {
    let config = load_scan_config(args.config.as_deref())?;

    // A baseline snapshot covers the whole tree, so change scoping and the
    // previous baseline are both ignored here.
    let classified = match args.files_from.as_deref() {
        Some(path) => classify_all(&read_file_list(path)?, &SourcePathSpec::parse(&config.source_path)),
        None => classify_all(&git::tracked_files()?, &SourcePathSpec::parse(&config.source_path)),
    };

    let violations = run_analysis(
        &config.file_types,
        &classified.filtered_files,
        config.enable_scan_cache,
    );

    write_artifact(
        &args.out,
        &serde_json::to_string_pretty(&violations).context("render baseline")?,
    )?;
    info!(
        "wrote {} violations to baseline {}",
        violations.len(),
        args.out.display()
    );

    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let config = load_scan_config(args.config.as_deref())?;

    println!("configuration OK");
    println!("  source path: {}", config.source_path);
    println!("  file types: {}", config.file_types.len());
    for file_type in &config.file_types {
        println!(
            "    {} -> {} ({} extension(s))",
            file_type.name,
            file_type.analyzer.as_str(),
            file_type.file_extensions.len()
        );
    }

    Ok(())
}

fn log_config(config: &ScanConfig) {
    info!("source path: {}", config.source_path);
    info!(
        "scan changed files only: {}",
        if config.scan_changed_files_only { "yes" } else { "no" }
    );
    info!(
        "scan cache: {}",
        if config.enable_scan_cache { "enabled" } else { "disabled" }
    );
    match &config.previous_violations_file {
        Some(path) => info!("baseline file: {}", path.display()),
        None => info!("baseline file: none"),
    }
    info!("max critical violations: {}", config.thresholds.max_critical_violations);
    info!("max medium violations: {}", config.thresholds.max_medium_violations);
    info!(
        "strict rules for new files: {}",
        if config.thresholds.strict_new_files { "yes" } else { "no" }
    );
}

fn collect_files(
    config: &ScanConfig,
    files_from: Option<&Path>,
    base: &str,
    head: &str,
) -> Result<ClassifiedFileSet> {
    let spec = SourcePathSpec::parse(&config.source_path);

    if let Some(path) = files_from {
        let files = read_file_list(path)?;
        // An explicit listing carries no change context.
        return Ok(classify_all(&files, &spec));
    }

    if config.scan_changed_files_only {
        let changes = git::changed_files(base, head)?;
        Ok(classify_changed(&changes, &spec))
    } else {
        Ok(classify_all(&git::tracked_files()?, &spec))
    }
}

fn read_file_list(path: &Path) -> Result<Vec<String>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read file list from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read file list '{}'", path.display()))?
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory '{}'", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_file_list_trims_and_drops_blanks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("files.txt");
        std::fs::write(&path, "src/a.js\n\n  src/b.js  \n").expect("write list");

        let files = read_file_list(&path).expect("read list");
        assert_eq!(files, vec!["src/a.js", "src/b.js"]);
    }

    #[test]
    fn write_artifact_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("artifacts/lintgate/report.json");

        write_artifact(&path, "{}").expect("write artifact");
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "{}");
    }
}
