//! Datasource knowledge base
//!
//! Per-type rules for datasources Grafana can talk to: which defaults a new
//! datasource needs, which trivial query proves it is reachable, and how a
//! query against it is shaped for the `/ds/query` endpoint.
//!
//! Type strings may carry a dialect suffix (`influxdb+flux`). Plain
//! `influxdb` takes its dialect from `jsonData.version`, defaulting to
//! InfluxQL.

use crate::model::DatasourceModel;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Every datasource type string the knowledge base understands
pub const SUPPORTED_DATASOURCE_TYPES: &[&str] = &[
    "cratedb",
    "elasticsearch",
    "influxdb",
    "influxdb+influxql",
    "influxdb+flux",
    "postgres",
    "prometheus",
    "testdata",
];

/// Reference id used for probe and ad hoc queries
const QUERY_REF_ID: &str = "test";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Datasource type not implemented: {datasource_type}")]
    NotImplemented { datasource_type: String },

    #[error("Unknown dialect for {datasource_type}: {dialect}")]
    UnknownDialect {
        datasource_type: String,
        dialect: String,
    },
}

/// InfluxDB query language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluxDialect {
    InfluxQl,
    Flux,
}

impl InfluxDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InfluxQl => "InfluxQL",
            Self::Flux => "Flux",
        }
    }
}

impl FromStr for InfluxDialect {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InfluxQL" => Ok(Self::InfluxQl),
            "Flux" => Ok(Self::Flux),
            other => Err(KnowledgeError::UnknownDialect {
                datasource_type: "influxdb".to_string(),
                dialect: other.to_string(),
            }),
        }
    }
}

/// Closed set of supported datasource types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasourceKind {
    CrateDb,
    Elasticsearch,
    /// `None` when the type string carries no dialect suffix
    InfluxDb(Option<InfluxDialect>),
    Postgres,
    Prometheus,
    TestData,
}

impl FromStr for DatasourceKind {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cratedb" => Ok(Self::CrateDb),
            "elasticsearch" => Ok(Self::Elasticsearch),
            "influxdb" => Ok(Self::InfluxDb(None)),
            "influxdb+influxql" => Ok(Self::InfluxDb(Some(InfluxDialect::InfluxQl))),
            "influxdb+flux" => Ok(Self::InfluxDb(Some(InfluxDialect::Flux))),
            "postgres" => Ok(Self::Postgres),
            "prometheus" => Ok(Self::Prometheus),
            "testdata" => Ok(Self::TestData),
            other => Err(KnowledgeError::NotImplemented {
                datasource_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DatasourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CrateDb => "cratedb",
            Self::Elasticsearch => "elasticsearch",
            Self::InfluxDb(None) => "influxdb",
            Self::InfluxDb(Some(InfluxDialect::InfluxQl)) => "influxdb+influxql",
            Self::InfluxDb(Some(InfluxDialect::Flux)) => "influxdb+flux",
            Self::Postgres => "postgres",
            Self::Prometheus => "prometheus",
            Self::TestData => "testdata",
        };
        f.write_str(s)
    }
}

impl DatasourceKind {
    /// Type name Grafana itself uses for this kind
    pub fn grafana_type(self) -> &'static str {
        match self {
            Self::CrateDb | Self::Postgres => "postgres",
            Self::Elasticsearch => "elasticsearch",
            Self::InfluxDb(_) => "influxdb",
            Self::Prometheus => "prometheus",
            Self::TestData => "testdata",
        }
    }

    fn default_access(self) -> Option<&'static str> {
        match self {
            Self::Elasticsearch | Self::InfluxDb(_) | Self::Prometheus => Some("proxy"),
            Self::CrateDb | Self::Postgres | Self::TestData => None,
        }
    }

    fn default_json_data(self) -> Option<Value> {
        match self {
            Self::CrateDb | Self::Postgres => Some(json!({
                "postgresVersion": 1200,
                "sslmode": "disable",
            })),
            Self::Elasticsearch => Some(json!({
                "esVersion": "7.10.0",
                "timeField": "@timestamp",
                "maxConcurrentShardRequests": 256,
            })),
            Self::InfluxDb(None) | Self::InfluxDb(Some(InfluxDialect::InfluxQl)) => Some(json!({
                "httpMode": "POST",
                "version": InfluxDialect::InfluxQl.as_str(),
            })),
            Self::InfluxDb(Some(InfluxDialect::Flux)) => Some(json!({
                "httpMode": "POST",
                "version": InfluxDialect::Flux.as_str(),
                "organization": "example",
                "defaultBucket": "db",
            })),
            Self::Prometheus | Self::TestData => None,
        }
    }

    /// Normalize a datasource of this kind, filling in defaults the caller
    /// left unset. Values the caller did set are kept.
    pub fn apply_defaults(self, mut datasource: DatasourceModel) -> DatasourceModel {
        datasource.r#type = self.grafana_type().to_string();

        if datasource.access.is_none() {
            datasource.access = self.default_access().map(str::to_string);
        }

        if let Some(Value::Object(defaults)) = self.default_json_data() {
            let json_data = datasource.json_data.get_or_insert_with(Map::new);
            for (key, value) in defaults {
                json_data.entry(key).or_insert(value);
            }
        }

        datasource
    }

    /// Trivial probe expression for this kind.
    ///
    /// `dialect` only matters for InfluxDB without a dialect suffix.
    pub fn healthcheck_expression(
        self,
        dialect: Option<&str>,
    ) -> Result<&'static str, KnowledgeError> {
        let expression = match self {
            Self::CrateDb | Self::Postgres => "SELECT 1;",
            Self::Elasticsearch => "*:*",
            Self::InfluxDb(fixed) => match resolve_dialect(fixed, dialect)? {
                InfluxDialect::InfluxQl => "SHOW RETENTION POLICIES on _internal",
                InfluxDialect::Flux => "buckets()",
            },
            Self::Prometheus => "1+1",
            Self::TestData => "random_walk",
        };
        Ok(expression)
    }

    /// Build a `/ds/query` query object embedding `expression`
    pub fn query(
        self,
        datasource: &DatasourceModel,
        expression: &str,
    ) -> Result<Value, KnowledgeError> {
        let mut query = json!({
            "refId": QUERY_REF_ID,
            "datasource": {
                "type": datasource.r#type,
                "uid": datasource.uid,
            },
        });

        let fields = match self {
            Self::CrateDb | Self::Postgres => json!({
                "format": "table",
                "rawSql": expression,
            }),
            Self::Elasticsearch => json!({
                "query": expression,
                "alias": "",
                "metrics": [{"type": "count", "id": "1"}],
                "bucketAggs": [{
                    "type": "date_histogram",
                    "id": "2",
                    "field": "@timestamp",
                    "settings": {"interval": "auto"},
                }],
                "timeField": "@timestamp",
            }),
            Self::InfluxDb(fixed) => {
                match configured_dialect(fixed, datasource)? {
                    InfluxDialect::InfluxQl => json!({
                        "query": expression,
                        "rawQuery": true,
                        "resultFormat": "table",
                    }),
                    InfluxDialect::Flux => json!({
                        "query": expression,
                    }),
                }
            },
            Self::Prometheus => json!({
                "expr": expression,
                "instant": true,
                "range": false,
            }),
            Self::TestData => json!({
                "scenarioId": expression,
            }),
        };

        if let (Value::Object(query), Value::Object(fields)) = (&mut query, fields) {
            query.extend(fields);
        }

        Ok(query)
    }
}

/// A dialect fixed by the type string wins, otherwise the given one is
/// parsed, otherwise InfluxQL.
fn resolve_dialect(
    fixed: Option<InfluxDialect>,
    requested: Option<&str>,
) -> Result<InfluxDialect, KnowledgeError> {
    match (fixed, requested) {
        (Some(dialect), _) => Ok(dialect),
        (None, Some(requested)) => requested.parse(),
        (None, None) => Ok(InfluxDialect::InfluxQl),
    }
}

/// Dialect for an InfluxDB datasource. A suffix in the type wins, then
/// `jsonData.version`, then InfluxQL. A missing or `null` version is unset,
/// any other non-string version is an unknown dialect.
fn configured_dialect(
    fixed: Option<InfluxDialect>,
    datasource: &DatasourceModel,
) -> Result<InfluxDialect, KnowledgeError> {
    if let Some(dialect) = fixed {
        return Ok(dialect);
    }
    match datasource.json_data.as_ref().and_then(|data| data.get("version")) {
        None | Some(Value::Null) => Ok(InfluxDialect::InfluxQl),
        Some(Value::String(version)) => version.parse(),
        Some(other) => Err(KnowledgeError::UnknownDialect {
            datasource_type: "influxdb".to_string(),
            dialect: other.to_string(),
        }),
    }
}

/// Probe expression for a configured datasource, honoring its
/// `jsonData.version`
pub fn datasource_healthcheck_expression(datasource: &DatasourceModel) -> Result<&'static str, KnowledgeError> {
    let kind: DatasourceKind = datasource.r#type.parse()?;
    match kind {
        DatasourceKind::InfluxDb(fixed) => {
            let dialect = configured_dialect(fixed, datasource)?;
            kind.healthcheck_expression(Some(dialect.as_str()))
        }
        _ => kind.healthcheck_expression(None),
    }
}

/// Return `datasource` normalized for its requested type.
///
/// Fails with [`KnowledgeError::NotImplemented`] for unknown types.
pub fn datasource_factory(datasource: DatasourceModel) -> Result<DatasourceModel, KnowledgeError> {
    let kind: DatasourceKind = datasource.r#type.parse()?;
    Ok(kind.apply_defaults(datasource))
}

/// Probe expression used to check that a datasource answers queries
pub fn get_healthcheck_expression(
    datasource_type: &str,
    dialect: Option<&str>,
) -> Result<&'static str, KnowledgeError> {
    let kind: DatasourceKind = datasource_type.parse()?;
    kind.healthcheck_expression(dialect)
}

/// Build a type-appropriate query for `datasource` embedding `expression`
pub fn query_factory(datasource: &DatasourceModel, expression: &str) -> Result<Value, KnowledgeError> {
    let kind: DatasourceKind = datasource.r#type.parse()?;
    kind.query(datasource, expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory(datasource_type: &str) -> DatasourceModel {
        datasource_factory(DatasourceModel::new("foo", datasource_type)).unwrap()
    }

    #[test]
    fn test_datasource_factory_all_supported() {
        for datasource_type in SUPPORTED_DATASOURCE_TYPES {
            let ds = datasource_factory(DatasourceModel::new("foo", *datasource_type));
            assert!(ds.is_ok(), "factory failed for {}", datasource_type);
        }
    }

    #[test]
    fn test_datasource_factory_unknown() {
        let err = datasource_factory(DatasourceModel::new("foo", "unknown")).unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::NotImplemented {
                datasource_type: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_cratedb_becomes_postgres() {
        let ds = factory("cratedb");
        assert_eq!(ds.r#type, "postgres");
        assert_eq!(ds.json_data_str("sslmode"), Some("disable"));
    }

    #[test]
    fn test_influxdb_flux_defaults() {
        let ds = factory("influxdb+flux");
        assert_eq!(ds.r#type, "influxdb");
        assert_eq!(ds.access.as_deref(), Some("proxy"));
        assert_eq!(ds.json_data_str("version"), Some("Flux"));
        assert_eq!(ds.json_data_str("defaultBucket"), Some("db"));
    }

    #[test]
    fn test_factory_keeps_caller_values() {
        let mut ds = DatasourceModel::new("foo", "prometheus").with_access("direct");
        ds.json_data = Some(Map::new());
        let ds = datasource_factory(ds).unwrap();
        assert_eq!(ds.access.as_deref(), Some("direct"));

        let mut ds = DatasourceModel::new("foo", "postgres");
        let mut json_data = Map::new();
        json_data.insert("sslmode".to_string(), json!("require"));
        ds.json_data = Some(json_data);
        let ds = datasource_factory(ds).unwrap();
        assert_eq!(ds.json_data_str("sslmode"), Some("require"));
        assert_eq!(ds.json_data.unwrap()["postgresVersion"], 1200);
    }

    #[test]
    fn test_query_factory_all_supported() {
        for datasource_type in SUPPORTED_DATASOURCE_TYPES {
            let ds = factory(datasource_type);
            let query = query_factory(&ds, "bar").unwrap();
            assert!(query.is_object(), "query for {} is not an object", datasource_type);
            assert_eq!(query["refId"], "test");
        }
    }

    #[test]
    fn test_query_factory_unknown_type() {
        let mut ds = factory("prometheus");
        ds.r#type = "unknown".to_string();
        assert!(matches!(
            query_factory(&ds, "bar"),
            Err(KnowledgeError::NotImplemented { .. })
        ));
    }

    #[test]
    fn test_query_factory_unknown_influxdb_dialect() {
        let mut ds = factory("influxdb");
        if let Some(json_data) = ds.json_data.as_mut() {
            json_data.insert("version".to_string(), json!("unknown"));
        }
        assert_eq!(
            query_factory(&ds, "bar").unwrap_err(),
            KnowledgeError::UnknownDialect {
                datasource_type: "influxdb".to_string(),
                dialect: "unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_query_factory_non_string_influxdb_version() {
        for version in [json!(2), json!(true), json!({})] {
            let mut ds = factory("influxdb");
            if let Some(json_data) = ds.json_data.as_mut() {
                json_data.insert("version".to_string(), version.clone());
            }
            assert_eq!(
                query_factory(&ds, "bar").unwrap_err(),
                KnowledgeError::UnknownDialect {
                    datasource_type: "influxdb".to_string(),
                    dialect: version.to_string(),
                }
            );
            assert!(datasource_healthcheck_expression(&ds).is_err());
        }
    }

    #[test]
    fn test_null_influxdb_version_is_unset() {
        let mut ds = factory("influxdb");
        if let Some(json_data) = ds.json_data.as_mut() {
            json_data.insert("version".to_string(), Value::Null);
        }
        assert_eq!(query_factory(&ds, "bar").unwrap()["rawQuery"], true);
        assert_eq!(
            datasource_healthcheck_expression(&ds).unwrap(),
            "SHOW RETENTION POLICIES on _internal"
        );
    }

    #[test]
    fn test_type_suffix_beats_configured_version() {
        let mut ds = factory("influxdb+flux");
        ds.r#type = "influxdb+flux".to_string();
        if let Some(json_data) = ds.json_data.as_mut() {
            json_data.insert("version".to_string(), json!(2));
        }
        assert_eq!(datasource_healthcheck_expression(&ds).unwrap(), "buckets()");
    }

    #[test]
    fn test_query_shapes() {
        let mut ds = factory("postgres");
        ds.uid = Some("pg".to_string());
        let query = query_factory(&ds, "SELECT 1;").unwrap();
        assert_eq!(query["rawSql"], "SELECT 1;");
        assert_eq!(query["datasource"], json!({"type": "postgres", "uid": "pg"}));

        let query = query_factory(&factory("prometheus"), "up").unwrap();
        assert_eq!(query["expr"], "up");
        assert_eq!(query["instant"], true);

        let query = query_factory(&factory("influxdb+flux"), "buckets()").unwrap();
        assert_eq!(query["query"], "buckets()");
        assert!(query.get("rawQuery").is_none());

        let query = query_factory(&factory("influxdb"), "SHOW DATABASES").unwrap();
        assert_eq!(query["rawQuery"], true);
    }

    #[test]
    fn test_healthcheck_expression_all_supported() {
        for datasource_type in SUPPORTED_DATASOURCE_TYPES {
            let expression = get_healthcheck_expression(datasource_type, None).unwrap();
            assert!(expression.len() > 1);
        }
    }

    #[test]
    fn test_healthcheck_expression_influxdb_flux() {
        assert_eq!(get_healthcheck_expression("influxdb", Some("Flux")).unwrap(), "buckets()");
        assert_eq!(get_healthcheck_expression("influxdb+flux", None).unwrap(), "buckets()");
        assert_eq!(
            get_healthcheck_expression("influxdb", None).unwrap(),
            "SHOW RETENTION POLICIES on _internal"
        );
    }

    #[test]
    fn test_healthcheck_expression_failures() {
        assert!(matches!(
            get_healthcheck_expression("foobar", None),
            Err(KnowledgeError::NotImplemented { .. })
        ));
        assert!(matches!(
            get_healthcheck_expression("influxdb", Some("SQL")),
            Err(KnowledgeError::UnknownDialect { .. })
        ));
    }

    #[test]
    fn test_kind_display_round_trips_supported_list() {
        for datasource_type in SUPPORTED_DATASOURCE_TYPES {
            let kind: DatasourceKind = datasource_type.parse().unwrap();
            assert_eq!(kind.to_string(), *datasource_type);
        }
    }
}
