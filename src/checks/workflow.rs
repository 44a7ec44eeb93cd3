use anyhow::Result;
use reqwest::StatusCode;

use crate::app::AppContext;
use crate::report::{CheckReport, CheckStatus};

/// Interpret the analyze endpoint's response to an unauthenticated trigger.
/// 401 and 422 both mean the route is wired up; only an unexpected status is
/// worth a warning.
pub fn classify_analyze_status(status: StatusCode) -> (CheckStatus, String) {
    match status {
        StatusCode::UNAUTHORIZED => (
            CheckStatus::Pass,
            "endpoint reachable, authentication required".to_string(),
        ),
        StatusCode::UNPROCESSABLE_ENTITY => (
            CheckStatus::Pass,
            "endpoint reachable, request validation active".to_string(),
        ),
        StatusCode::OK => (
            CheckStatus::Warn,
            "endpoint accepted an unauthenticated trigger".to_string(),
        ),
        other => (CheckStatus::Warn, format!("unexpected status {other}")),
    }
}

/// The "analysis stuck at 0%" triage: backend health first (fatal if down),
/// then the frontend proxy, then analyze-endpoint reachability, closing with
/// the usual suspects for a stalled analysis.
pub async fn run(ctx: &AppContext) -> Result<CheckReport> {
    let mut report = CheckReport::new(super::WORKFLOW_CHECK);
    let client = &ctx.client;

    match client.backend_health().await {
        Ok(resp) if resp.status.is_success() => {
            report.pass("backend health", format!("{} is healthy", client.backend_url()));
        }
        Ok(resp) => {
            report.fail("backend health", format!("unhealthy status {}", resp.status));
            return Ok(report);
        }
        Err(err) => {
            // Nothing downstream is meaningful with the backend unreachable.
            report.fail("backend health", format!("{err:#}"));
            return Ok(report);
        }
    }

    match client.frontend_health().await {
        Ok(resp) if resp.status.is_success() && resp.body.contains("healthy") => {
            report.pass(
                "frontend proxy",
                format!("{} forwards /health to the backend", client.frontend_url()),
            );
        }
        Ok(resp) => {
            report.warn(
                "frontend proxy",
                format!("status {}, body did not report healthy", resp.status),
            );
        }
        Err(err) => {
            report.warn("frontend proxy", format!("{err:#}"));
        }
    }

    match client.trigger_analysis(1).await {
        Ok(resp) => {
            let (status, detail) = classify_analyze_status(resp.status);
            report.record("analyze endpoint", status, detail);
        }
        Err(err) => {
            report.fail("analyze endpoint", format!("{err:#}"));
            return Ok(report);
        }
    }

    report.note("if analysis still sticks at 0%, check in order:");
    report.note("- the user is logged in before triggering analysis");
    report.note("- backend logs for worker resolution errors (run the worker check)");
    report.note("- the upload completed before analysis was triggered");
    report.note("- the application database is reachable (run create-db / e2e)");

    Ok(report)
}
