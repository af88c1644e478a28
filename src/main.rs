mod collectors;
mod config;
mod models;
mod util;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use collectors::arcconf::Arcconf;
use config::{Config, ReportFormat};
use models::smart::ControllerId;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcsmart", about = "SMART attribute audit for Adaptec RAID controllers", version)]
struct Cli {
    /// Path to the arcconf executable (default: arcconf on PATH)
    #[arg(long, value_name = "PATH")]
    arcconf: Option<String>,

    /// Audit only this controller; repeat for several. Skips GETVERSION.
    #[arg(short = 'c', long = "controller", value_name = "N")]
    controllers: Vec<ControllerId>,

    /// Print a one-shot JSON snapshot instead of the text report
    #[arg(long)]
    json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "arcsmart", &mut io::stdout());
        return Ok(());
    }

    let cfg = resolve_config(&cli)?;

    if cli.print_config {
        return run_print_config(&cfg);
    }

    let tool = Arcconf::system(cfg.arcconf.path.clone());
    log::debug!(
        "using {} ({} attribute descriptors)",
        tool.program(), models::attributes::known_count()
    );

    let reports = collectors::audit(&tool, &cfg.arcconf.controllers);

    match cfg.report.format {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&util::report::snapshot(&reports))?);
        }
        ReportFormat::Text => {
            print!("{}", util::report::generate(&reports, cfg.report.show_codes));
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Config file first, then command-line overrides on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };

    if let Some(path) = &cli.arcconf {
        cfg.arcconf.path = path.clone();
    }
    if !cli.controllers.is_empty() {
        cfg.arcconf.controllers = cli.controllers.clone();
    }
    if cli.json {
        cfg.report.format = ReportFormat::Json;
    }
    Ok(cfg)
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("# Default config location: {}", path);
    println!();
    print!("{}", cfg.to_toml()?);
    Ok(())
}
