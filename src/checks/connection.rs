use anyhow::Result;

use crate::app::AppContext;
use crate::report::CheckReport;

const UPLOAD_FILENAME: &str = "test.mp4";
const UPLOAD_SIZE: u64 = 1024;
const UPLOAD_MIME: &str = "video/mp4";

/// Connectivity and auth smoke test: both API roots, a password-grant login,
/// and one authenticated request reusing the bearer token. Root probes are
/// independent; the upload step only runs with a token in hand.
pub async fn run(ctx: &AppContext) -> Result<CheckReport> {
    let mut report = CheckReport::new(super::CONNECTION_CHECK);
    let client = &ctx.client;

    match client.api_root().await {
        Ok(resp) if resp.status.is_success() => {
            report.pass("api root", format!("status {}", resp.status));
        }
        Ok(resp) => report.warn("api root", format!("status {}", resp.status)),
        Err(err) => report.fail("api root", format!("{err:#}")),
    }

    match client.api_v1_root().await {
        Ok(resp) if resp.status.is_success() => {
            report.pass("api v1 root", format!("status {}", resp.status));
        }
        Ok(resp) => report.warn("api v1 root", format!("status {}", resp.status)),
        Err(err) => report.fail("api v1 root", format!("{err:#}")),
    }

    let auth = &ctx.config.auth;
    let password = match auth.password() {
        Ok(password) => password,
        Err(err) => {
            report.fail("login", err.to_string());
            report.skip("authenticated upload", "no token available");
            return Ok(report);
        }
    };

    let token = match client.login(&auth.username, password).await {
        Ok(token) => {
            report.pass(
                "login",
                format!("obtained {} token for {}", token.token_type, auth.username),
            );
            token
        }
        Err(err) => {
            report.fail("login", format!("{err:#}"));
            report.skip("authenticated upload", "no token available");
            return Ok(report);
        }
    };

    match client
        .request_upload_slot(&token, UPLOAD_FILENAME, UPLOAD_SIZE, UPLOAD_MIME)
        .await
    {
        Ok(media) => {
            report.pass(
                "authenticated upload",
                format!("upload slot granted, media_id={}", media.media_id),
            );
        }
        Err(err) => {
            report.fail("authenticated upload", format!("{err:#}"));
        }
    }

    Ok(report)
}
