use super::GrafanaClient;
use crate::elements::datasource::{assess_probe, request, DatasourceHealth};
use crate::error::Result;
use crate::model::DatasourceModel;
use serde_json::Value;
use std::time::Instant;

/// Blocking datasource API, see [`crate::elements::datasource::Datasource`]
pub struct Datasource<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Datasource<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn list_datasources(&self) -> Result<Value> {
        self.client.send(request::list_datasources())
    }

    pub fn get_datasource_by_uid(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_datasource_by_uid(uid))
    }

    pub fn get_datasource_by_name(&self, name: &str) -> Result<Value> {
        self.client.send(request::get_datasource_by_name(name))
    }

    pub fn create_datasource(&self, datasource: &DatasourceModel) -> Result<Value> {
        self.client.send(request::create_datasource(datasource)?)
    }

    pub fn delete_datasource_by_uid(&self, uid: &str) -> Result<Value> {
        self.client.send(request::delete_datasource_by_uid(uid))
    }

    pub fn query(&self, datasource: &DatasourceModel, expression: &str) -> Result<Value> {
        self.client.send(request::query(datasource, expression)?)
    }

    pub fn health_inquiry(&self, uid: &str) -> Result<DatasourceHealth> {
        let datasource = self.get_datasource_by_uid(uid)?;
        let (model, probe) = request::health_probe(&datasource)?;

        let started = Instant::now();
        let outcome = self.client.send(probe);

        Ok(assess_probe(&model, outcome, started.elapsed()))
    }
}
