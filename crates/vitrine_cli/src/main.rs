//! Vitrine CLI
//!
//! Replays scripted sessions against a portfolio page headlessly.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use vitrine_cli::init::create_project;
use vitrine_cli::session::{replay, Session};
use vitrine_page::{tech_info, Page, PageConfig, PageSpec};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Vitrine - headless portfolio page interactions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page, replay a session and print the final state
    Simulate {
        /// Page description (TOML)
        page: PathBuf,

        /// Session script to replay
        #[arg(short, long)]
        session: Option<PathBuf>,

        /// Settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for decorative randomness
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Include inline styles in text output
        #[arg(long)]
        styles: bool,

        /// Keep the clock running until this time (ms)
        #[arg(long)]
        until: Option<u64>,

        /// Also write the JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Create a sample page, session and settings file
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Show the description shown for a technology
    Tech {
        /// Technology name
        name: Option<String>,

        /// List every known technology
        #[arg(short, long)]
        list: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            page,
            session,
            config,
            seed,
            format,
            styles,
            until,
            report,
        } => cmd_simulate(
            &page,
            session.as_deref(),
            config.as_deref(),
            seed,
            format,
            styles,
            until,
            report.as_deref(),
        ),
        Commands::Init { path, force } => create_project(&path, force),
        Commands::Tech { name, list } => cmd_tech(name.as_deref(), list),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_simulate(
    page_path: &Path,
    session_path: Option<&Path>,
    config_path: Option<&Path>,
    seed: Option<u64>,
    format: OutputFormat,
    styles: bool,
    until: Option<u64>,
    report_path: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(page_path)
        .with_context(|| format!("failed to read page {}", page_path.display()))?;
    let spec = PageSpec::from_toml_str(&raw)
        .with_context(|| format!("invalid page {}", page_path.display()))?;

    let mut config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            PageConfig::from_toml_str(&raw)
                .with_context(|| format!("invalid settings {}", path.display()))?
        }
        None => PageConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let mut session = match session_path {
        Some(path) => Session::from_path(path)?,
        None => Session::default(),
    };
    if until.is_some() {
        session.run_until_ms = until;
    }

    tracing::info!(
        page = %page_path.display(),
        steps = session.steps.len(),
        "replaying session"
    );
    let mut page = Page::from_spec(&spec, config);
    let report = replay(&mut page, &session)?;

    match format {
        OutputFormat::Text => print!("{}", report.render_text(styles)),
        OutputFormat::Json => report.write_to_writer(&mut std::io::stdout().lock())?,
    }
    if let Some(path) = report_path {
        report.write_to_path(path)?;
    }

    if report.is_failed() {
        bail!(
            "session failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }
    Ok(())
}

fn cmd_tech(name: Option<&str>, list: bool) -> Result<()> {
    if list {
        for name in tech_info::names() {
            println!("{name}: {}", tech_info::describe(name));
        }
        return Ok(());
    }
    match name {
        Some(name) => {
            if tech_info::lookup(name).is_none() {
                tracing::warn!(name, "unknown technology, showing the generic description");
            }
            println!("{}", tech_info::announcement(name));
            Ok(())
        }
        None => bail!("pass a technology name or --list"),
    }
}
