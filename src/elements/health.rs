//! Instance health

use crate::client::GrafanaClient;
use crate::error::Result;
use serde_json::Value;

pub(crate) mod request {
    use crate::client::ApiRequest;

    pub fn check() -> ApiRequest {
        ApiRequest::get("/health")
    }
}

pub struct Health<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Health<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    /// Database and version status of the instance
    pub async fn check(&self) -> Result<Value> {
        self.client.send(request::check()).await
    }
}
