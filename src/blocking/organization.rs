use super::GrafanaClient;
use crate::elements::organization::{legacy_preferences, request};
use crate::error::Result;
use crate::model::PersonalPreferences;
use serde_json::Value;

/// Blocking current organization API, see [`crate::elements::organization::Organization`]
pub struct Organization<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Organization<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn find_organization(&self, org_name: &str) -> Result<Value> {
        self.client.send(request::find_organization(org_name))
    }

    pub fn get_current_organization(&self) -> Result<Value> {
        self.client.send(request::get_current_organization())
    }

    pub fn create_organization(&self, name: &str) -> Result<Value> {
        self.client.send(request::create_organization(name))
    }

    pub fn update_current_organization(&self, organization: &Value) -> Result<Value> {
        self.client
            .send(request::update_current_organization(organization))
    }

    pub fn get_current_organization_users(&self) -> Result<Value> {
        self.client.send(request::get_current_organization_users())
    }

    pub fn add_user_current_organization(&self, user: &Value) -> Result<Value> {
        self.client.send(request::add_user_current_organization(user))
    }

    pub fn update_user_current_organization(&self, user_id: i64, user: &Value) -> Result<Value> {
        self.client
            .send(request::update_user_current_organization(user_id, user))
    }

    pub fn delete_user_current_organization(&self, user_id: i64) -> Result<Value> {
        self.client
            .send(request::delete_user_current_organization(user_id))
    }

    pub fn get_preferences(&self) -> Result<Value> {
        self.client.send(request::get_preferences())
    }

    /// Full update, Grafana resets omitted fields to defaults
    pub fn update_preferences(&self, preferences: &PersonalPreferences) -> Result<Value> {
        self.client.send(request::update_preferences(preferences)?)
    }

    /// Partial update, omitted fields are left untouched
    pub fn patch_preferences(&self, preferences: &PersonalPreferences) -> Result<Value> {
        self.client.send(request::patch_preferences(preferences)?)
    }
}

/// Blocking organization administration API, see [`crate::elements::organization::Organizations`]
pub struct Organizations<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Organizations<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn update_organization(&self, organization_id: i64, organization: &Value) -> Result<Value> {
        self.client
            .send(request::update_organization(organization_id, organization))
    }

    pub fn delete_organization(&self, organization_id: i64) -> Result<Value> {
        self.client.send(request::delete_organization(organization_id))
    }

    pub fn list_organization(&self) -> Result<Value> {
        self.client.send(request::list_organization())
    }

    pub fn switch_organization(&self, organization_id: i64) -> Result<Value> {
        self.client.send(request::switch_organization(organization_id))
    }

    pub fn organization_user_list(&self, organization_id: i64) -> Result<Value> {
        self.client
            .send(request::organization_user_list(organization_id))
    }

    pub fn organization_user_add(&self, organization_id: i64, user: &Value) -> Result<Value> {
        self.client
            .send(request::organization_user_add(organization_id, user))
    }

    pub fn organization_user_update(&self, organization_id: i64, user_id: i64, user_role: &str) -> Result<Value> {
        self.client
            .send(request::organization_user_update(organization_id, user_id, user_role))
    }

    pub fn organization_user_delete(&self, organization_id: i64, user_id: i64) -> Result<Value> {
        self.client
            .send(request::organization_user_delete(organization_id, user_id))
    }

    #[deprecated(note = "use `Organization::get_preferences`")]
    pub fn organization_preference_get(&self) -> Result<Value> {
        tracing::warn!("organization_preference_get is deprecated, use organization().get_preferences()");
        Organization::new(self.client).get_preferences()
    }

    #[deprecated(note = "use `Organization::update_preferences`")]
    pub fn organization_preference_update(&self, theme: &str, home_dashboard_id: i64, timezone: &str) -> Result<Value> {
        tracing::warn!(
            "organization_preference_update is deprecated, use organization().update_preferences()"
        );
        let preferences = legacy_preferences(theme, home_dashboard_id, timezone);
        Organization::new(self.client).update_preferences(&preferences)
    }
}
