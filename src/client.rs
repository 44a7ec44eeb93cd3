use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;

/// Bearer token returned by the password-grant login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Response from the presigned media-upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUpload {
    pub media_id: String,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Status code plus body text for probes that classify responses loosely
/// instead of deserializing them.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Thin client over the backend and the frontend dev proxy. Each method maps
/// to one endpoint the diagnostics exercise; callers decide what a given
/// status code means.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    backend_url: String,
    frontend_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            backend_url: config.backend_url.trim_end_matches('/').to_string(),
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    async fn probe_get(&self, url: String) -> Result<ProbeResponse> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        Self::into_probe(response).await
    }

    async fn into_probe(response: Response) -> Result<ProbeResponse> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(ProbeResponse { status, body })
    }

    pub async fn backend_health(&self) -> Result<ProbeResponse> {
        self.probe_get(format!("{}/health", self.backend_url)).await
    }

    pub async fn frontend_health(&self) -> Result<ProbeResponse> {
        self.probe_get(format!("{}/health", self.frontend_url))
            .await
    }

    pub async fn api_root(&self) -> Result<ProbeResponse> {
        self.probe_get(format!("{}/", self.backend_url)).await
    }

    pub async fn api_v1_root(&self) -> Result<ProbeResponse> {
        self.probe_get(format!("{}/api/v1/", self.backend_url)).await
    }

    /// Password-grant login; the backend expects a form-encoded body.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken> {
        let url = format!("{}/api/v1/auth/login/access-token", self.backend_url);
        debug!(%url, %username, "POST login");

        let response = self
            .http
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("login rejected with status {status}");
        }

        response
            .json::<AccessToken>()
            .await
            .context("login response was not a token payload")
    }

    /// Authenticated upload-slot request, reusing a previously obtained token.
    pub async fn request_upload_slot(
        &self,
        token: &AccessToken,
        filename: &str,
        file_size: u64,
        mime_type: &str,
    ) -> Result<MediaUpload> {
        let url = format!("{}/api/v1/media/upload", self.backend_url);
        debug!(%url, filename, "POST upload slot");

        let response = self
            .http
            .post(&url)
            .query(&[
                ("filename", filename),
                ("file_size", &file_size.to_string()),
                ("mime_type", mime_type),
            ])
            .bearer_auth(&token.access_token)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("upload-slot request rejected with status {status}");
        }

        response
            .json::<MediaUpload>()
            .await
            .context("upload-slot response was not a media payload")
    }

    /// Unauthenticated analyze trigger through the frontend proxy. The probe
    /// expects a 401/422 here; a success would mean the endpoint is open.
    pub async fn trigger_analysis(&self, file_id: i64) -> Result<ProbeResponse> {
        let url = format!("{}/api/v1/analyze", self.frontend_url);
        debug!(%url, file_id, "POST analyze");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "file_id": file_id }))
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;
        Self::into_probe(response).await
    }
}
