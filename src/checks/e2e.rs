use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::Row;
use tracing::info;

use crate::app::AppContext;
use crate::db::{self, DbPool};
use crate::report::CheckReport;
use crate::worker::mock_analysis_task;

const TEST_EMAIL: &str = "doctor@darknexis.local";
const TEST_FILENAME: &str = "test_video.mp4";
const TEST_FILE_SIZE: i64 = 1_024_000;
const TEST_MIME: &str = "video/mp4";

/// End-to-end analysis trigger over the in-process route: skip HTTP entirely,
/// write the user/file records the backend would have created, run the mock
/// analysis, store its verdict, and read the record back. The schema belongs
/// to the backend; any missing table is a failed step here, not a crash.
pub async fn run(ctx: &AppContext) -> Result<CheckReport> {
    let mut report = CheckReport::new(super::E2E_CHECK);

    let pool = match db::app_pool(&ctx.config.database).await {
        Ok(pool) => pool,
        Err(err) => {
            report.fail("database connection", format!("{err:#}"));
            return Ok(report);
        }
    };
    report.pass(
        "database connection",
        format!("connected to '{}'", ctx.config.database.database),
    );

    let user_id = match ensure_test_user(&pool).await {
        Ok(user_id) => {
            report.pass("test user", format!("{TEST_EMAIL} (id {user_id})"));
            user_id
        }
        Err(err) => {
            report.fail("test user", format!("{err:#}"));
            return Ok(report);
        }
    };

    let file_id = match insert_test_file(&pool, user_id).await {
        Ok(file_id) => {
            report.pass("test file", format!("{TEST_FILENAME} (id {file_id})"));
            file_id
        }
        Err(err) => {
            report.fail("test file", format!("{err:#}"));
            return Ok(report);
        }
    };

    let verdict = mock_analysis_task(TEST_FILENAME, i64::from(file_id));
    let analysis_id = match record_analysis(&pool, file_id, &verdict).await {
        Ok(analysis_id) => {
            report.pass("analysis", format!("verdict stored (id {analysis_id})"));
            analysis_id
        }
        Err(err) => {
            report.fail("analysis", format!("{err:#}"));
            return Ok(report);
        }
    };

    match poll_analysis(&pool, file_id).await {
        Ok(Some(record)) => {
            info!(analysis_id, status = %record.status, "analysis record read back");
            if record.status == "COMPLETED" {
                report.pass(
                    "analysis record",
                    format!(
                        "status={} deepfake={:?} confidence={:?}",
                        record.status, record.is_deepfake, record.confidence
                    ),
                );
            } else {
                report.fail(
                    "analysis record",
                    format!("stuck at status {}", record.status),
                );
            }
        }
        Ok(None) => report.fail("analysis record", "no record found for the test file"),
        Err(err) => report.fail("analysis record", format!("{err:#}")),
    }

    Ok(report)
}

struct AnalysisRecord {
    status: String,
    is_deepfake: Option<bool>,
    confidence: Option<f64>,
}

/// Find or create the throwaway diagnostics user.
async fn ensure_test_user(pool: &DbPool) -> Result<i32> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(TEST_EMAIL)
        .fetch_optional(pool)
        .await
        .context("failed to look up test user")?;

    if let Some(user_id) = existing {
        return Ok(user_id);
    }

    let user_id: i32 = sqlx::query_scalar(
        "INSERT INTO users (email, username, first_name, last_name, is_active, created_at) \
         VALUES ($1, $2, $3, $4, TRUE, $5) RETURNING id",
    )
    .bind(TEST_EMAIL)
    .bind("nexis-doctor")
    .bind("Diagnostics")
    .bind("User")
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .context("failed to create test user")?;

    Ok(user_id)
}

async fn insert_test_file(pool: &DbPool, user_id: i32) -> Result<i32> {
    let now = Utc::now();
    let s3_key = format!("diagnostics/{}/{TEST_FILENAME}", now.timestamp_millis());

    let file_id: i32 = sqlx::query_scalar(
        "INSERT INTO files (user_id, filename, s3_key, file_size, mime_type, status, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, 'UPLOADED', $6, $6) RETURNING id",
    )
    .bind(user_id)
    .bind(TEST_FILENAME)
    .bind(s3_key)
    .bind(TEST_FILE_SIZE)
    .bind(TEST_MIME)
    .bind(now)
    .fetch_one(pool)
    .await
    .context("failed to create test file record")?;

    Ok(file_id)
}

async fn record_analysis(
    pool: &DbPool,
    file_id: i32,
    verdict: &crate::worker::AnalysisVerdict,
) -> Result<i32> {
    let now = Utc::now();

    let analysis_id: i32 = sqlx::query_scalar(
        "INSERT INTO analyses (file_id, status, is_deepfake, confidence, created_at, updated_at) \
         VALUES ($1, 'COMPLETED', $2, $3, $4, $4) RETURNING id",
    )
    .bind(file_id)
    .bind(verdict.is_deepfake)
    .bind(verdict.confidence)
    .bind(now)
    .fetch_one(pool)
    .await
    .context("failed to store analysis record")?;

    Ok(analysis_id)
}

async fn poll_analysis(pool: &DbPool, file_id: i32) -> Result<Option<AnalysisRecord>> {
    let row = sqlx::query(
        "SELECT status, is_deepfake, confidence FROM analyses \
         WHERE file_id = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(file_id)
    .fetch_optional(pool)
    .await
    .context("failed to read analysis record")?;

    Ok(row.map(|row| AnalysisRecord {
        status: row.get("status"),
        is_deepfake: row.get("is_deepfake"),
        confidence: row.get("confidence"),
    }))
}
