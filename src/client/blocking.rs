//! Blocking HTTP transport
//!
//! Same request shaping and error mapping as the async client, executed
//! with `reqwest::blocking`. Must not be called from within an async
//! runtime; use `spawn_blocking` there.

use super::{handle_response, ApiRequest};
use crate::config::{ConnectionConfig, ORG_ID_HEADER};
use crate::error::Result;
use reqwest::blocking::Client;
use serde_json::Value;

/// Blocking HTTP client bound to one Grafana instance
#[derive(Clone, Debug)]
pub struct GrafanaClient {
    client: Client,
    config: ConnectionConfig,
    base_url: String,
}

impl GrafanaClient {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let base_url = config.base_url();
        url::Url::parse(&base_url)?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify)
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a request and return the parsed response body
    pub fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = request.url(&self.base_url);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        builder = self.config.credentials.apply_blocking(builder);
        if let Some(org_id) = self.config.organization_id {
            builder = builder.header(ORG_ID_HEADER, org_id.to_string());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        handle_response(&request.method, &url, status, body)
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::get(path))
    }

    pub fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::post(path);
        request.body = body;
        self.send(request)
    }

    pub fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::put(path).body(body))
    }

    pub fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::patch(path).body(body))
    }

    pub fn delete(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::delete(path))
    }
}
