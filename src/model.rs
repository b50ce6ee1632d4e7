//! Value objects exchanged with the Grafana API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configured data source.
///
/// Serialized with Grafana's field names (`jsonData`, `secureJsonData`, ...).
/// Unset optional fields are left out of the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceModel {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_json_data: Option<Map<String, Value>>,
}

impl DatasourceModel {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
            url: None,
            access: None,
            uid: None,
            database: None,
            user: None,
            basic_auth: None,
            basic_auth_user: None,
            json_data: None,
            secure_json_data: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Look up a string value in `jsonData`
    pub fn json_data_str(&self, key: &str) -> Option<&str> {
        self.json_data.as_ref()?.get(key)?.as_str()
    }

    /// JSON mapping of this model
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// User, team or organization preferences.
///
/// Only fields that are set get serialized. On a full update (PUT) Grafana
/// resets every omitted field to its default, on a partial update (PATCH)
/// omitted fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_dashboard_id: Option<i64>,
    #[serde(
        default,
        rename = "homeDashboardUID",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_dashboard_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<String>,
}
