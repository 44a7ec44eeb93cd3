use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "/config/nexis-doctor.yaml";

/// Top-level configuration for the diagnostics CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Backend API base URL (no trailing slash).
    #[serde(default = "AppConfig::default_backend_url")]
    pub backend_url: String,
    /// Frontend dev-server base URL; its proxy forwards /health and /api to the backend.
    #[serde(default = "AppConfig::default_frontend_url")]
    pub frontend_url: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub timeouts: RequestTimeouts,
}

impl AppConfig {
    fn default_backend_url() -> String {
        "http://localhost:8000".to_string()
    }

    fn default_frontend_url() -> String {
        "http://localhost:3003".to_string()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: Self::default_backend_url(),
            frontend_url: Self::default_frontend_url(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            timeouts: RequestTimeouts::default(),
        }
    }
}

/// Postgres server coordinates. The password never lives in YAML; it is injected
/// through `NEXIS_DB_PASSWORD` only.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_host")]
    pub host: String,
    #[serde(default = "DatabaseConfig::default_port")]
    pub port: u16,
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Application database the bootstrapper creates and the e2e check connects to.
    #[serde(default = "DatabaseConfig::default_database")]
    pub database: String,
}

impl DatabaseConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    const fn default_port() -> u16 {
        5432
    }

    fn default_user() -> String {
        "postgres".to_string()
    }

    fn default_database() -> String {
        "darknexis".to_string()
    }

    pub fn password(&self) -> Result<&str> {
        self.password.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Missing database password. Set the NEXIS_DB_PASSWORD environment variable (see .env.sample)."
            )
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            user: Self::default_user(),
            password: None,
            database: Self::default_database(),
        }
    }
}

/// Demo login used by the connection probe. Password is env-only
/// (`NEXIS_AUTH_PASSWORD`), same policy as the database password.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_username")]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthConfig {
    fn default_username() -> String {
        "demo@example.com".to_string()
    }

    pub fn password(&self) -> Result<&str> {
        self.password.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Missing login password. Set the NEXIS_AUTH_PASSWORD environment variable (see .env.sample)."
            )
        })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: Self::default_username(),
            password: None,
        }
    }
}

/// HTTP client timeouts (with friendly duration parsing).
#[derive(Debug, Clone, Deserialize)]
pub struct RequestTimeouts {
    #[serde(default = "RequestTimeouts::default_request", with = "humantime_serde")]
    pub request: Duration,
    #[serde(default = "RequestTimeouts::default_connect", with = "humantime_serde")]
    pub connect: Duration,
}

impl RequestTimeouts {
    const fn default_request() -> Duration {
        Duration::from_secs(5)
    }

    const fn default_connect() -> Duration {
        Duration::from_secs(3)
    }
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self {
            request: Self::default_request(),
            connect: Self::default_connect(),
        }
    }
}

/// Load configuration from a YAML file, falling back to defaults + env overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let target_path = if let Some(path) = path {
        path.to_path_buf()
    } else if let Ok(env_path) = env::var("NEXIS_DOCTOR_CONFIG") {
        PathBuf::from(env_path)
    } else {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    };

    let mut config = match try_parse_file(&target_path)? {
        Some(cfg) => {
            info!(path = %target_path.display(), "loaded configuration");
            cfg
        }
        None => {
            warn!(path = %target_path.display(), "config file not found; using built-in defaults");
            AppConfig::default()
        }
    };

    enforce_yaml_policy(&config)?;
    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn try_parse_file(path: &Path) -> Result<Option<AppConfig>> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let cfg = serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse YAML config at {}", path.display()))?;
            Ok(Some(cfg))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config file at {}", path.display()))
        }
    }
}

/// Secrets must not be stored in YAML; they arrive through the environment only.
pub fn enforce_yaml_policy(config: &AppConfig) -> Result<()> {
    if config.database.password.is_some() {
        bail!(
            "Remove `database.password` from the YAML config; set it via the NEXIS_DB_PASSWORD environment variable (see .env.sample)."
        );
    }
    if config.auth.password.is_some() {
        bail!(
            "Remove `auth.password` from the YAML config; set it via the NEXIS_AUTH_PASSWORD environment variable (see .env.sample)."
        );
    }
    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Some(url) = non_empty_env("NEXIS_BACKEND_URL")? {
        config.backend_url = url;
    }
    if let Some(url) = non_empty_env("NEXIS_FRONTEND_URL")? {
        config.frontend_url = url;
    }
    if let Some(host) = non_empty_env("NEXIS_DB_HOST")? {
        config.database.host = host;
    }
    if let Some(port) = non_empty_env("NEXIS_DB_PORT")? {
        config.database.port = port.parse().context("NEXIS_DB_PORT is not a port number")?;
    }
    if let Some(user) = non_empty_env("NEXIS_DB_USER")? {
        config.database.user = user;
    }
    if let Some(password) = non_empty_env("NEXIS_DB_PASSWORD")? {
        config.database.password = Some(password);
    }
    if let Some(database) = non_empty_env("NEXIS_DB_NAME")? {
        config.database.database = database;
    }
    if let Some(username) = non_empty_env("NEXIS_AUTH_USERNAME")? {
        config.auth.username = username;
    }
    if let Some(password) = non_empty_env("NEXIS_AUTH_PASSWORD")? {
        config.auth.password = Some(password);
    }
    Ok(())
}

fn non_empty_env(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => {
            if value.trim().is_empty() {
                bail!(
                    "Environment variable {name} is set but empty; populate it in your .env file."
                );
            }
            Ok(Some(value))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
