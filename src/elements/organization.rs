//! Organizations
//!
//! [`Organization`] acts on the organization the credentials are currently
//! bound to, [`Organizations`] administers all organizations of the instance.

use crate::client::GrafanaClient;
use crate::error::Result;
use crate::model::PersonalPreferences;
use serde_json::Value;

pub(crate) mod request {
    use crate::client::ApiRequest;
    use crate::error::Result;
    use crate::model::PersonalPreferences;
    use serde_json::{json, Value};

    const PREFERENCES_PATH: &str = "/org/preferences";

    pub fn find_organization(org_name: &str) -> ApiRequest {
        ApiRequest::get(format!("/orgs/name/{}", org_name))
    }

    pub fn get_current_organization() -> ApiRequest {
        ApiRequest::get("/org")
    }

    pub fn create_organization(name: &str) -> ApiRequest {
        ApiRequest::post("/orgs").body(json!({ "name": name }))
    }

    pub fn update_current_organization(organization: &Value) -> ApiRequest {
        ApiRequest::put("/org").body(organization.clone())
    }

    pub fn get_current_organization_users() -> ApiRequest {
        ApiRequest::get("/org/users")
    }

    pub fn add_user_current_organization(user: &Value) -> ApiRequest {
        ApiRequest::post("/org/users").body(user.clone())
    }

    pub fn update_user_current_organization(user_id: i64, user: &Value) -> ApiRequest {
        ApiRequest::patch(format!("/org/users/{}", user_id)).body(user.clone())
    }

    pub fn delete_user_current_organization(user_id: i64) -> ApiRequest {
        ApiRequest::delete(format!("/org/users/{}", user_id))
    }

    pub fn get_preferences() -> ApiRequest {
        ApiRequest::get(PREFERENCES_PATH)
    }

    pub fn update_preferences(preferences: &PersonalPreferences) -> Result<ApiRequest> {
        ApiRequest::put(PREFERENCES_PATH).json(preferences)
    }

    pub fn patch_preferences(preferences: &PersonalPreferences) -> Result<ApiRequest> {
        ApiRequest::patch(PREFERENCES_PATH).json(preferences)
    }

    pub fn update_organization(organization_id: i64, organization: &Value) -> ApiRequest {
        ApiRequest::put(format!("/orgs/{}", organization_id)).body(organization.clone())
    }

    pub fn delete_organization(organization_id: i64) -> ApiRequest {
        ApiRequest::delete(format!("/orgs/{}", organization_id))
    }

    pub fn list_organization() -> ApiRequest {
        ApiRequest::get("/orgs")
    }

    pub fn switch_organization(organization_id: i64) -> ApiRequest {
        ApiRequest::post(format!("/user/using/{}", organization_id))
    }

    pub fn organization_user_list(organization_id: i64) -> ApiRequest {
        ApiRequest::get(format!("/orgs/{}/users", organization_id))
    }

    pub fn organization_user_add(organization_id: i64, user: &Value) -> ApiRequest {
        ApiRequest::post(format!("/orgs/{}/users", organization_id)).body(user.clone())
    }

    pub fn organization_user_update(organization_id: i64, user_id: i64, user_role: &str) -> ApiRequest {
        ApiRequest::patch(format!("/orgs/{}/users/{}", organization_id, user_id))
            .body(json!({ "role": user_role }))
    }

    pub fn organization_user_delete(organization_id: i64, user_id: i64) -> ApiRequest {
        ApiRequest::delete(format!("/orgs/{}/users/{}", organization_id, user_id))
    }
}

/// Preferences sent by the deprecated `organization_preference_update`
pub(crate) fn legacy_preferences(theme: &str, home_dashboard_id: i64, timezone: &str) -> PersonalPreferences {
    PersonalPreferences {
        theme: Some(theme.to_string()),
        home_dashboard_id: Some(home_dashboard_id),
        timezone: Some(timezone.to_string()),
        ..Default::default()
    }
}

/// Current organization API
pub struct Organization<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Organization<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub async fn find_organization(&self, org_name: &str) -> Result<Value> {
        self.client.send(request::find_organization(org_name)).await
    }

    pub async fn get_current_organization(&self) -> Result<Value> {
        self.client.send(request::get_current_organization()).await
    }

    pub async fn create_organization(&self, name: &str) -> Result<Value> {
        self.client.send(request::create_organization(name)).await
    }

    pub async fn update_current_organization(&self, organization: &Value) -> Result<Value> {
        self.client
            .send(request::update_current_organization(organization))
            .await
    }

    pub async fn get_current_organization_users(&self) -> Result<Value> {
        self.client
            .send(request::get_current_organization_users())
            .await
    }

    pub async fn add_user_current_organization(&self, user: &Value) -> Result<Value> {
        self.client
            .send(request::add_user_current_organization(user))
            .await
    }

    pub async fn update_user_current_organization(&self, user_id: i64, user: &Value) -> Result<Value> {
        self.client
            .send(request::update_user_current_organization(user_id, user))
            .await
    }

    pub async fn delete_user_current_organization(&self, user_id: i64) -> Result<Value> {
        self.client
            .send(request::delete_user_current_organization(user_id))
            .await
    }

    /// Preferences of the current organization
    pub async fn get_preferences(&self) -> Result<Value> {
        self.client.send(request::get_preferences()).await
    }

    /// Replace the preferences of the current organization as a whole.
    ///
    /// Only fields that are set are sent, but Grafana resets every field
    /// left out to its default. Use [`Self::patch_preferences`] to change
    /// single fields.
    pub async fn update_preferences(&self, preferences: &PersonalPreferences) -> Result<Value> {
        self.client
            .send(request::update_preferences(preferences)?)
            .await
    }

    /// Update only the preference fields that are set, leaving the others
    /// untouched.
    pub async fn patch_preferences(&self, preferences: &PersonalPreferences) -> Result<Value> {
        self.client
            .send(request::patch_preferences(preferences)?)
            .await
    }
}

/// Organization administration API
pub struct Organizations<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Organizations<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub async fn update_organization(&self, organization_id: i64, organization: &Value) -> Result<Value> {
        self.client
            .send(request::update_organization(organization_id, organization))
            .await
    }

    pub async fn delete_organization(&self, organization_id: i64) -> Result<Value> {
        self.client
            .send(request::delete_organization(organization_id))
            .await
    }

    pub async fn list_organization(&self) -> Result<Value> {
        self.client.send(request::list_organization()).await
    }

    /// Switch the signed in user's active organization
    pub async fn switch_organization(&self, organization_id: i64) -> Result<Value> {
        self.client
            .send(request::switch_organization(organization_id))
            .await
    }

    pub async fn organization_user_list(&self, organization_id: i64) -> Result<Value> {
        self.client
            .send(request::organization_user_list(organization_id))
            .await
    }

    pub async fn organization_user_add(&self, organization_id: i64, user: &Value) -> Result<Value> {
        self.client
            .send(request::organization_user_add(organization_id, user))
            .await
    }

    pub async fn organization_user_update(
        &self,
        organization_id: i64,
        user_id: i64,
        user_role: &str,
    ) -> Result<Value> {
        self.client
            .send(request::organization_user_update(organization_id, user_id, user_role))
            .await
    }

    pub async fn organization_user_delete(&self, organization_id: i64, user_id: i64) -> Result<Value> {
        self.client
            .send(request::organization_user_delete(organization_id, user_id))
            .await
    }

    #[deprecated(note = "use `Organization::get_preferences`")]
    pub async fn organization_preference_get(&self) -> Result<Value> {
        tracing::warn!("organization_preference_get is deprecated, use organization().get_preferences()");
        Organization::new(self.client).get_preferences().await
    }

    #[deprecated(note = "use `Organization::update_preferences`")]
    pub async fn organization_preference_update(
        &self,
        theme: &str,
        home_dashboard_id: i64,
        timezone: &str,
    ) -> Result<Value> {
        tracing::warn!(
            "organization_preference_update is deprecated, use organization().update_preferences()"
        );
        let preferences = legacy_preferences(theme, home_dashboard_id, timezone);
        Organization::new(self.client)
            .update_preferences(&preferences)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_preferences_put_and_patch_stay_distinct() {
        let prefs = PersonalPreferences {
            theme: Some("light".to_string()),
            ..Default::default()
        };

        let put = request::update_preferences(&prefs).unwrap();
        let patch = request::patch_preferences(&prefs).unwrap();

        assert_eq!(put.method, Method::PUT);
        assert_eq!(patch.method, Method::PATCH);
        assert_eq!(put.path, "/org/preferences");
        assert_eq!(patch.path, "/org/preferences");
        assert_eq!(put.body, Some(json!({"theme": "light"})));
        assert_eq!(patch.body, put.body);
    }

    #[test]
    fn test_legacy_preferences() {
        let prefs = legacy_preferences("", 0, "utc");
        assert_eq!(
            serde_json::to_value(&prefs).unwrap(),
            json!({"theme": "", "homeDashboardId": 0, "timezone": "utc"})
        );
    }

    #[test]
    fn test_organization_user_update() {
        let req = request::organization_user_update(2, 7, "Editor");
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.path, "/orgs/2/users/7");
        assert_eq!(req.body, Some(json!({"role": "Editor"})));
    }

    #[test]
    fn test_create_and_switch() {
        let req = request::create_organization("Main");
        assert_eq!(req.body, Some(json!({"name": "Main"})));

        let req = request::switch_organization(3);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/user/using/3");
        assert!(req.body.is_none());
    }
}
