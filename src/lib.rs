//! Grafana HTTP API client
//!
//! Translates method calls into requests against Grafana's REST API and
//! returns the parsed JSON responses. Non-2xx responses are mapped to
//! [`GrafanaError`] variants by status code.
//!
//! # Module Structure
//!
//! - [`api`] - Async facade exposing the resource groups
//! - [`blocking`] - Synchronous mirror of the facade
//! - [`client`] - HTTP transport and authentication
//! - [`config`] - Connection settings and the CLI profile
//! - [`elements`] - Resource groups (folders, organizations, health, datasources)
//! - [`knowledge`] - Per-datasource-type defaults, probes and query shapes
//! - [`model`] - Value objects
//!
//! # Example
//!
//! ```ignore
//! use grafana_client::{ConnectionConfig, Credentials, GrafanaApi};
//!
//! async fn example() -> grafana_client::Result<()> {
//!     let config = ConnectionConfig::new("localhost")
//!         .with_port(3000)
//!         .with_credentials(Credentials::basic("admin", "admin"));
//!     let grafana = GrafanaApi::new(config)?;
//!     let folder = grafana.folder().create_folder("Infra", None, None).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod blocking;
pub mod client;
pub mod config;
pub mod elements;
pub mod error;
pub mod knowledge;
pub mod model;

pub use api::GrafanaApi;
pub use client::auth::Credentials;
pub use client::{ApiRequest, GrafanaClient};
pub use config::ConnectionConfig;
pub use elements::datasource::DatasourceHealth;
pub use elements::folder::FolderUpdate;
pub use error::{GrafanaError, Result};
pub use knowledge::{
    datasource_factory, datasource_healthcheck_expression, get_healthcheck_expression, query_factory,
    KnowledgeError,
    SUPPORTED_DATASOURCE_TYPES,
};
pub use model::{DatasourceModel, PersonalPreferences};
