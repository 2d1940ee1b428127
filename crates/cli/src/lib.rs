use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use codegraph_engine::{Analyzer, ProjectStructure};
use codegraph_scanner::FileScanner;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FileConfig;
use crate::flags::{ScheduleFlag, StrategyFlag};

mod config;
mod flags;

#[derive(Parser)]
#[command(name = "codegraph")]
#[command(about = "Build a code graph of a Go project", long_about = None)]
#[command(version)]
struct Cli {
    /// Root directory of the Go project
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Project name used as the top-level key [default: MyProject]
    #[arg(short, long)]
    name: Option<String>,

    /// Output JSON file
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// When function bodies are resolved [default: deferred]
    #[arg(long, value_enum)]
    schedule: Option<ScheduleFlag>,

    /// Reference resolution strategy [default: syntactic]
    #[arg(long, value_enum)]
    strategy: Option<StrategyFlag>,

    /// TOML configuration file (flags take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip files matched by .gitignore
    #[arg(long)]
    respect_gitignore: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let mut config = file_config.analyzer();
    if let Some(name) = cli.name {
        config.project_name = name;
    }
    if let Some(schedule) = cli.schedule {
        config.schedule = schedule.as_domain();
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.as_domain();
    }

    let mut scan = file_config.scan;
    if cli.respect_gitignore {
        scan.respect_gitignore = true;
    }

    let root = absolute(&cli.path)?;
    let files = FileScanner::new(&root)
        .with_options(scan)
        .scan()
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let analyzer = Analyzer::new(config)?;
    let structure = analyzer
        .analyze_files(&root, &files)
        .context("Failed to analyze project")?;

    write_output(&cli.output, &structure)?;
    println!(
        "Analysis complete. Results written to {}",
        cli.output.display()
    );
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn write_output(path: &Path, structure: &ProjectStructure) -> Result<()> {
    let json = serde_json::to_string_pretty(structure).context("Failed to serialize output")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
