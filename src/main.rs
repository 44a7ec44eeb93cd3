mod app;
mod checks;
mod client;
mod config;
mod db;
mod report;
mod worker;

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::Error as DotenvError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::report::CheckReport;

#[derive(Debug, Parser)]
#[command(author, version, about = "nexis-doctor — Dark-Nexis backend diagnostics")]
struct Cli {
    /// Path to YAML configuration file. Defaults to env NEXIS_DOCTOR_CONFIG or built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the application database on the Postgres server if it is missing.
    CreateDb,
    /// Probe backend health, the frontend proxy, and analyze-endpoint reachability.
    Workflow,
    /// Probe the API roots, log in, and issue one authenticated request.
    Connection,
    /// Verify the mock analysis worker resolves from every search context.
    Worker,
    /// Drive one analysis end-to-end through the application database.
    E2e,
    /// Run every check in sequence, continuing past failures.
    All,
}

impl Command {
    fn check_name(&self) -> Option<&'static str> {
        match self {
            Command::CreateDb => Some(checks::BOOTSTRAP_CHECK),
            Command::Workflow => Some(checks::WORKFLOW_CHECK),
            Command::Connection => Some(checks::CONNECTION_CHECK),
            Command::Worker => Some(checks::WORKER_CHECK),
            Command::E2e => Some(checks::E2E_CHECK),
            Command::All => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    load_env();
    init_tracing();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    let reports = match cli.command.check_name() {
        Some(name) => {
            // Registered names always resolve; the enum and the table are kept in step.
            let check_fn = checks::find_check(name)
                .ok_or_else(|| anyhow::anyhow!("unknown check {name}"))?;
            vec![checks::run_check(ctx, name, check_fn).await]
        }
        None => {
            let mut reports = Vec::with_capacity(checks::ALL_CHECKS.len());
            for (name, check_fn) in checks::ALL_CHECKS {
                reports.push(checks::run_check(ctx.clone(), name, *check_fn).await);
            }
            reports
        }
    };

    for report in &reports {
        report.print();
        println!();
    }

    let failed: Vec<&CheckReport> = reports.iter().filter(|report| !report.passed()).collect();
    if failed.is_empty() {
        info!("all checks passed");
        Ok(ExitCode::SUCCESS)
    } else {
        for report in failed {
            info!(check = %report.check, "check failed");
        }
        Ok(ExitCode::FAILURE)
    }
}

fn load_env() {
    if let Err(err) = dotenvy::dotenv() {
        match err {
            DotenvError::Io(io_err) if io_err.kind() == ErrorKind::NotFound => {}
            other => eprintln!("warning: failed to load .env file: {other}"),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nexis_doctor=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
