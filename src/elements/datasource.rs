//! Datasources
//!
//! CRUD on configured datasources plus ad hoc queries through `/ds/query`.
//! Query bodies and health probes come from the [`knowledge`](crate::knowledge)
//! table, so only supported datasource types can be queried.

use crate::client::GrafanaClient;
use crate::error::Result;
use crate::model::DatasourceModel;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Outcome of a datasource health inquiry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasourceHealth {
    pub uid: String,
    #[serde(rename = "type")]
    pub datasource_type: String,
    pub success: bool,
    pub message: String,
    #[serde(rename = "duration_secs", serialize_with = "as_secs")]
    pub duration: Duration,
    /// Raw `/ds/query` response, when the probe got one
    pub response: Option<Value>,
}

fn as_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

pub(crate) mod request {
    use crate::client::ApiRequest;
    use crate::error::Result;
    use crate::knowledge::{datasource_healthcheck_expression, query_factory};
    use crate::model::DatasourceModel;
    use serde_json::{json, Value};

    /// Time range probe and ad hoc queries run against
    const QUERY_FROM: &str = "now-5m";
    const QUERY_TO: &str = "now";

    pub fn list_datasources() -> ApiRequest {
        ApiRequest::get("/datasources")
    }

    pub fn get_datasource_by_uid(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/datasources/uid/{}", uid))
    }

    pub fn get_datasource_by_name(name: &str) -> ApiRequest {
        ApiRequest::get(format!("/datasources/name/{}", name))
    }

    pub fn create_datasource(datasource: &DatasourceModel) -> Result<ApiRequest> {
        ApiRequest::post("/datasources").json(datasource)
    }

    pub fn delete_datasource_by_uid(uid: &str) -> ApiRequest {
        ApiRequest::delete(format!("/datasources/uid/{}", uid))
    }

    pub fn query(datasource: &DatasourceModel, expression: &str) -> Result<ApiRequest> {
        let query = query_factory(datasource, expression)?;
        Ok(ApiRequest::post("/ds/query").body(json!({
            "queries": [query],
            "from": QUERY_FROM,
            "to": QUERY_TO,
        })))
    }

    /// Parse a datasource document and build its health probe query
    pub fn health_probe(datasource: &Value) -> Result<(DatasourceModel, ApiRequest)> {
        let model: DatasourceModel = serde_json::from_value(datasource.clone())?;
        let expression = datasource_healthcheck_expression(&model)?;
        let request = query(&model, expression)?;
        Ok((model, request))
    }
}

/// First error reported inside a `/ds/query` response
fn query_error(response: &Value) -> Option<String> {
    response
        .get("results")?
        .as_object()?
        .values()
        .find_map(|result| result.get("error").and_then(|e| e.as_str()).map(str::to_string))
}

/// Judge the probe outcome. HTTP and per-query errors count as unhealthy.
pub(crate) fn assess_probe(model: &DatasourceModel, outcome: Result<Value>, duration: Duration) -> DatasourceHealth {
    let (success, message, response) = match outcome {
        Ok(response) => match query_error(&response) {
            Some(error) => (false, error, Some(response)),
            None => (true, "Success".to_string(), Some(response)),
        },
        Err(err) => (false, err.message().map(str::to_string).unwrap_or_else(|| err.to_string()), None),
    };

    if !success {
        tracing::warn!("Datasource {} failed health inquiry: {}", model.name, message);
    }

    DatasourceHealth {
        uid: model.uid.clone().unwrap_or_default(),
        datasource_type: model.r#type.clone(),
        success,
        message,
        duration,
        response,
    }
}

/// Datasource API
pub struct Datasource<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Datasource<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub async fn list_datasources(&self) -> Result<Value> {
        self.client.send(request::list_datasources()).await
    }

    pub async fn get_datasource_by_uid(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_datasource_by_uid(uid)).await
    }

    pub async fn get_datasource_by_name(&self, name: &str) -> Result<Value> {
        self.client.send(request::get_datasource_by_name(name)).await
    }

    pub async fn create_datasource(&self, datasource: &DatasourceModel) -> Result<Value> {
        self.client
            .send(request::create_datasource(datasource)?)
            .await
    }

    pub async fn delete_datasource_by_uid(&self, uid: &str) -> Result<Value> {
        self.client
            .send(request::delete_datasource_by_uid(uid))
            .await
    }

    /// Run `expression` against a datasource
    pub async fn query(&self, datasource: &DatasourceModel, expression: &str) -> Result<Value> {
        self.client.send(request::query(datasource, expression)?).await
    }

    /// Probe a datasource with a trivial query.
    ///
    /// Failing to fetch the datasource is an error; a failing probe is
    /// reported as an unhealthy [`DatasourceHealth`].
    pub async fn health_inquiry(&self, uid: &str) -> Result<DatasourceHealth> {
        let datasource = self.get_datasource_by_uid(uid).await?;
        let (model, probe) = request::health_probe(&datasource)?;

        let started = Instant::now();
        let outcome = self.client.send(probe).await;

        Ok(assess_probe(&model, outcome, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrafanaError;
    use crate::knowledge::KnowledgeError;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_query_request_shape() {
        let ds = DatasourceModel::new("prom", "prometheus").with_uid("p1");
        let req = request::query(&ds, "up").unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/ds/query");

        let body = req.body.unwrap();
        assert_eq!(body["from"], "now-5m");
        assert_eq!(body["queries"][0]["expr"], "up");
        assert_eq!(body["queries"][0]["datasource"]["uid"], "p1");
    }

    #[test]
    fn test_query_unknown_type_fails() {
        let ds = DatasourceModel::new("x", "graphite");
        assert!(matches!(request::query(&ds, "a.b"), Err(GrafanaError::Knowledge(_))));
    }

    #[test]
    fn test_health_probe_uses_dialect() {
        let datasource = json!({
            "uid": "flux",
            "name": "influx",
            "type": "influxdb",
            "jsonData": {"version": "Flux"}
        });
        let (model, req) = request::health_probe(&datasource).unwrap();
        assert_eq!(model.uid.as_deref(), Some("flux"));
        assert_eq!(req.body.unwrap()["queries"][0]["query"], "buckets()");
    }

    #[test]
    fn test_health_probe_rejects_numeric_version() {
        let datasource = json!({
            "uid": "influx",
            "name": "influx",
            "type": "influxdb",
            "jsonData": {"version": 2}
        });
        assert!(matches!(
            request::health_probe(&datasource),
            Err(GrafanaError::Knowledge(KnowledgeError::UnknownDialect { .. }))
        ));
    }

    #[test]
    fn test_assess_probe() {
        let model = DatasourceModel::new("pg", "postgres").with_uid("pg1");

        let health = assess_probe(&model, Ok(json!({"results": {"test": {"frames": []}}})), Duration::ZERO);
        assert!(health.success);
        assert_eq!(health.message, "Success");

        let health = assess_probe(
            &model,
            Ok(json!({"results": {"test": {"error": "db is down"}}})),
            Duration::ZERO,
        );
        assert!(!health.success);
        assert_eq!(health.message, "db is down");

        let health = assess_probe(
            &model,
            Err(GrafanaError::from_status(500, r#"{"message": "boom"}"#)),
            Duration::ZERO,
        );
        assert!(!health.success);
        assert_eq!(health.message, "boom");
        assert_eq!(health.uid, "pg1");
    }
}
