use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info};

use crate::app::AppContext;
use crate::report::CheckReport;

pub mod bootstrap;
pub mod connection;
pub mod e2e;
pub mod worker;
pub mod workflow;

pub const BOOTSTRAP_CHECK: &str = "create-db";
pub const WORKFLOW_CHECK: &str = "workflow";
pub const CONNECTION_CHECK: &str = "connection";
pub const WORKER_CHECK: &str = "worker";
pub const E2E_CHECK: &str = "e2e";

pub type CheckFuture = Pin<Box<dyn Future<Output = Result<CheckReport>> + Send>>;
pub type CheckFn = fn(AppContext) -> CheckFuture;

/// All checks in the order `all` runs them: bootstrap first so the e2e check
/// finds its database, HTTP probes in between.
pub const ALL_CHECKS: &[(&str, CheckFn)] = &[
    (BOOTSTRAP_CHECK, run_bootstrap),
    (WORKFLOW_CHECK, run_workflow),
    (CONNECTION_CHECK, run_connection),
    (WORKER_CHECK, run_worker),
    (E2E_CHECK, run_e2e),
];

pub fn find_check(name: &str) -> Option<CheckFn> {
    ALL_CHECKS
        .iter()
        .find(|(check_name, _)| *check_name == name)
        .map(|(_, check_fn)| *check_fn)
}

/// Run one check, timing it and turning any error into a failed report so a
/// broken environment never crashes the CLI.
pub async fn run_check(ctx: AppContext, name: &'static str, check_fn: CheckFn) -> CheckReport {
    info!(check = name, "starting check");
    let start = Instant::now();

    match check_fn(ctx).await {
        Ok(report) => {
            info!(
                check = name,
                elapsed = ?start.elapsed(),
                passed = report.passed(),
                "check finished"
            );
            report
        }
        Err(err) => {
            error!(check = name, error = ?err, "check aborted");
            let mut report = CheckReport::new(name);
            report.fail("check", format!("{err:#}"));
            report
        }
    }
}

fn run_bootstrap(ctx: AppContext) -> CheckFuture {
    Box::pin(async move { bootstrap::run(&ctx).await })
}

fn run_workflow(ctx: AppContext) -> CheckFuture {
    Box::pin(async move { workflow::run(&ctx).await })
}

fn run_connection(ctx: AppContext) -> CheckFuture {
    Box::pin(async move { connection::run(&ctx).await })
}

fn run_worker(ctx: AppContext) -> CheckFuture {
    Box::pin(async move { worker::run(&ctx).await })
}

fn run_e2e(ctx: AppContext) -> CheckFuture {
    Box::pin(async move { e2e::run(&ctx).await })
}
