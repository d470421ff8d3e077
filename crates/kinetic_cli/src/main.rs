//! Kinetic CLI
//!
//! Runs scripted gesture scenarios against a headless tilt/bounce list and
//! manages `kinetic.toml` files.

mod checks;
mod report;
mod runner;
mod scenario;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use kinetic_list::KineticFile;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

/// Tilt/bounce list scenario runner
#[derive(Parser, Debug)]
#[command(name = "kinetic")]
#[command(about = "Run tilt/bounce list gesture scenarios headlessly")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and print a JSON report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// List configuration (kinetic.toml, or a directory containing one).
        /// Overrides the scenario's embedded config.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Manage list configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a default kinetic.toml
    Init {
        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load a config file and print it with defaults filled in
    Show {
        /// Config file or directory
        path: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => cmd_run(scenario, config, report),
        Commands::Config { action } => match action {
            ConfigAction::Init { output, force } => cmd_config_init(output, force),
            ConfigAction::Show { path } => cmd_config_show(path),
        },
    }
}

fn cmd_run(
    scenario_path: PathBuf,
    config: Option<PathBuf>,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let scenario = Scenario::from_path(&scenario_path)?;
    let file = match config {
        Some(path) => KineticFile::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => scenario.config.unwrap_or_default(),
    };

    tracing::info!(
        "running {} ({} steps)",
        scenario_path.display(),
        scenario.steps.len()
    );
    let report = runner::run_scenario(&file, &scenario);

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(&path)?;
        tracing::info!("report written to {}", path.display());
    }

    if report.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_config_init(output: Option<PathBuf>, force: bool) -> Result<()> {
    let text = KineticFile::default().to_toml()?;

    let Some(path) = output else {
        print!("{text}");
        return Ok(());
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn cmd_config_show(path: PathBuf) -> Result<()> {
    let file = KineticFile::load(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    print!("{}", file.to_toml()?);
    Ok(())
}
