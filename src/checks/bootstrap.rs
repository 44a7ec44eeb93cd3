use anyhow::Result;

use crate::app::AppContext;
use crate::db::{self, BootstrapOutcome};
use crate::report::CheckReport;

/// Create the application database if the server does not have it yet.
/// Connection or query errors become a failed step, never a crash.
pub async fn run(ctx: &AppContext) -> Result<CheckReport> {
    let mut report = CheckReport::new(super::BOOTSTRAP_CHECK);
    let database = &ctx.config.database;

    let mut conn = match db::connect_maintenance(database).await {
        Ok(conn) => conn,
        Err(err) => {
            report.fail("server connection", format!("{err:#}"));
            return Ok(report);
        }
    };
    report.pass(
        "server connection",
        format!("connected to {}:{}", database.host, database.port),
    );

    match db::ensure_database(&mut conn, &database.database).await {
        Ok(BootstrapOutcome::Created) => {
            report.pass(
                "database",
                format!("database '{}' created", database.database),
            );
        }
        Ok(BootstrapOutcome::AlreadyExists) => {
            report.pass(
                "database",
                format!("database '{}' already exists", database.database),
            );
        }
        Err(err) => {
            report.fail("database", format!("{err:#}"));
        }
    }

    Ok(report)
}
