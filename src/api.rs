//! Grafana API facade
//!
//! Wires every resource group to one shared [`GrafanaClient`].

use crate::client::GrafanaClient;
use crate::config::ConnectionConfig;
use crate::elements::datasource::Datasource;
use crate::elements::folder::Folder;
use crate::elements::health::Health;
use crate::elements::organization::{Organization, Organizations};
use crate::error::{GrafanaError, Result};

/// Async entry point to the Grafana HTTP API
#[derive(Clone, Debug)]
pub struct GrafanaApi {
    client: GrafanaClient,
}

impl GrafanaApi {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Ok(Self {
            client: GrafanaClient::new(config)?,
        })
    }

    /// Connect using a URL, see [`ConnectionConfig::from_url`]
    pub fn from_url(url: &str) -> Result<Self> {
        Self::new(ConnectionConfig::from_url(url)?)
    }

    /// Connect using `GRAFANA_URL` and friends, see [`ConnectionConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::new(ConnectionConfig::from_env()?)
    }

    pub fn client(&self) -> &GrafanaClient {
        &self.client
    }

    pub fn folder(&self) -> Folder<'_> {
        Folder::new(&self.client)
    }

    pub fn organization(&self) -> Organization<'_> {
        Organization::new(&self.client)
    }

    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(&self.client)
    }

    pub fn health(&self) -> Health<'_> {
        Health::new(&self.client)
    }

    pub fn datasource(&self) -> Datasource<'_> {
        Datasource::new(&self.client)
    }

    /// Grafana version, as reported by the health endpoint
    pub async fn version(&self) -> Result<String> {
        let health = self.health().check().await?;
        version_from_health(&health)
    }
}

pub(crate) fn version_from_health(health: &serde_json::Value) -> Result<String> {
    health
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| GrafanaError::InvalidResponse("health response carries no version".to_string()))
}
