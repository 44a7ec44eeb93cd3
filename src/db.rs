use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = PgPool;

/// Maintenance database every Postgres cluster ships with; `CREATE DATABASE`
/// must run from a connection that is not attached to the target database.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Outcome of the bootstrap run. Distinguishing the two lets callers report
/// idempotent re-runs instead of pretending a creation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyExists,
}

impl fmt::Display for BootstrapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapOutcome::Created => write!(f, "created"),
            BootstrapOutcome::AlreadyExists => write!(f, "already exists"),
        }
    }
}

fn base_connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(config.password()?)
        .application_name("nexis-doctor");
    Ok(options)
}

/// Open a single connection to the cluster's maintenance database.
pub async fn connect_maintenance(config: &DatabaseConfig) -> Result<PgConnection> {
    let conn = base_connect_options(config)?
        .database(MAINTENANCE_DATABASE)
        .connect()
        .await
        .with_context(|| {
            format!(
                "failed to connect to postgres at {}:{}",
                config.host, config.port
            )
        })?;
    Ok(conn)
}

/// Create the named database if the catalog does not already list it.
///
/// Safe to run repeatedly: the catalog probe decides whether DDL is issued at
/// all, so a second run is a no-op.
pub async fn ensure_database(conn: &mut PgConnection, name: &str) -> Result<BootstrapOutcome> {
    validate_database_name(name)?;

    let exists: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM pg_catalog.pg_database WHERE datname = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .context("failed to query pg_catalog.pg_database")?;

    if exists.is_some() {
        info!(database = name, "database already exists");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    // DDL cannot take bind parameters; the identifier was validated above.
    sqlx::query(&format!(r#"CREATE DATABASE "{name}""#))
        .execute(&mut *conn)
        .await
        .with_context(|| format!("failed to create database {name}"))?;

    info!(database = name, "database created");
    Ok(BootstrapOutcome::Created)
}

/// Restrict database names to plain identifiers so they can be inlined into DDL.
pub fn validate_database_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_tail = name
        .chars()
        .skip(1)
        .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_head || !valid_tail {
        bail!("invalid database name {name:?}: expected [A-Za-z_][A-Za-z0-9_]*");
    }
    Ok(())
}

/// Build a small connection pool against the application database for the
/// end-to-end check.
pub async fn app_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let connect_options = base_connect_options(config)?.database(&config.database);

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.database))?;

    info!(database = %config.database, "connected to application database");
    Ok(pool)
}
