//! HTTP transport for the Grafana REST API
//!
//! Resource groups describe each call as an [`ApiRequest`]; the async
//! [`GrafanaClient`] and the [`blocking::GrafanaClient`] both execute those
//! descriptions, so request shaping and error mapping are shared.

pub mod auth;
pub mod blocking;

use crate::config::{ConnectionConfig, ORG_ID_HEADER};
use crate::error::{GrafanaError, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// One call against the API, independent of how it is sent
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API root, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an already built JSON value
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Full URL below `base_url`, with percent-encoded query parameters
    pub fn url(&self, base_url: &str) -> String {
        let url = format!("{}{}", base_url, self.path);
        if self.query.is_empty() {
            return url;
        }

        let query_parts: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect();

        format!("{}?{}", url, query_parts.join("&"))
    }
}

/// Map a finished exchange to the parsed body or a typed error.
///
/// Empty bodies become `null`, bodies that are not JSON are returned as a
/// JSON string.
pub(crate) fn handle_response(method: &Method, url: &str, status: StatusCode, body: String) -> Result<Value> {
    if !status.is_success() {
        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("{} {} failed: {} - {}", method, url, status, sanitize_for_log(&body));
        return Err(GrafanaError::from_status(status.as_u16(), &body));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
}

/// Async HTTP client bound to one Grafana instance
#[derive(Clone, Debug)]
pub struct GrafanaClient {
    client: Client,
    config: ConnectionConfig,
    base_url: String,
}

impl GrafanaClient {
    /// Create a client for the given connection
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
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = request.url(&self.base_url);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        builder = self.config.credentials.apply(builder);
        if let Some(org_id) = self.config.organization_id {
            builder = builder.header(ORG_ID_HEADER, org_id.to_string());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        handle_response(&request.method, &url, status, body)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::get(path)).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::post(path);
        request.body = body;
        self.send(request).await
    }

    /// Make a PUT request
    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::put(path).body(body)).await
    }

    /// Make a PATCH request
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::patch(path).body(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::delete(path)).await
    }
}
