use std::sync::Arc;

use anyhow::Result;

use crate::client::ApiClient;
use crate::config::AppConfig;

/// Shared context passed to every check.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub client: ApiClient,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}
