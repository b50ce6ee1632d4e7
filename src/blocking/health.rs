use super::GrafanaClient;
use crate::elements::health::request;
use crate::error::Result;
use serde_json::Value;

pub struct Health<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Health<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn check(&self) -> Result<Value> {
        self.client.send(request::check())
    }
}
