//! entryscan: list Java entry classes by annotation or interface.
//!
//! Reads a scan configuration document, walks the configured source root and
//! prints `{ "count": N, "files": [...] }` to stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use entryscan::{run_scan, ConfigError, ScanConfig, DEFAULT_CONFIG_FILE};

/// Exit codes for the CLI
///
/// - 0: Success, including scans that match nothing
/// - 1: Configuration document missing or invalid
/// - 2: Any other failure (result could not be written)
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG_ERROR: u8 = 1;
    pub const ERROR: u8 = 2;
}

/// Find Java entry classes by marker annotation or (transitively) implemented interface
#[derive(Parser)]
#[command(name = "entryscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration document (JSON, or TOML by extension)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory to scan (overrides scanDir from the config)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging (stderr: stdout carries the result document)
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    if error.downcast_ref::<ConfigError>().is_some() {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::ERROR
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let config = load_config(cli)?;
    tracing::debug!("Scanning {:?}", config.scan_dir);

    let result = run_scan(&config);
    let json = result.to_json().context("Failed to serialize scan result")?;
    println!("{}", json);

    Ok(exit_codes::SUCCESS)
}

fn load_config(cli: &Cli) -> Result<ScanConfig, ConfigError> {
    let config = ScanConfig::load(&cli.config)?;
    Ok(match &cli.dir {
        Some(dir) => config.with_scan_dir(dir.clone()),
        None => config,
    })
}
