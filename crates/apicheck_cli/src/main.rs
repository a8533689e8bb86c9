//! apicheck CLI - conformance checks for the EduCanvas CRUD API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "apicheck")]
#[command(about = "Exercise the EduCanvas CRUD API and report pass/fail", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./apicheck.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:3001
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every resource endpoint rejects requests without a token
    Guard,
    /// Log in and walk the CRUD endpoints of every resource
    Crud {
        /// Fraction of cases that must pass (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,
        /// Only check that DELETE returns no error
        #[arg(long)]
        no_verify_soft_delete: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Log lines are the primary output, so they go to stdout.
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%H:%M:%S".to_string(),
        ))
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    let cli = Cli::parse();
    let overrides = commands::Overrides {
        config: cli.config,
        base_url: cli.base_url,
        timeout: cli.timeout,
    };

    match cli.command {
        Commands::Guard => commands::guard::run(&overrides),
        Commands::Crud {
            threshold,
            no_verify_soft_delete,
        } => commands::crud::run(&overrides, threshold, no_verify_soft_delete),
    }
}
