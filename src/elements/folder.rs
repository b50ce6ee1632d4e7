//! Folders
//!
//! Folders group dashboards and carry permissions. With nested folders
//! enabled a folder may have a parent, referenced by `parentUid`.

use crate::client::GrafanaClient;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Changes for [`Folder::update_folder`].
///
/// Empty strings, a zero version and `overwrite = false` are left out of
/// the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderUpdate {
    #[serde(rename = "uid", skip_serializing_if = "is_blank")]
    pub new_uid: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    /// Current version, lets the server reject stale writes
    #[serde(skip_serializing_if = "is_unset_version")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overwrite: bool,
}

impl FolderUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn new_uid(mut self, uid: impl Into<String>) -> Self {
        self.new_uid = Some(uid.into());
        self
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_unset_version(value: &Option<i64>) -> bool {
    matches!(value, None | Some(0))
}

pub(crate) mod request {
    use super::FolderUpdate;
    use crate::client::ApiRequest;
    use crate::error::Result;
    use serde::Serialize;
    use serde_json::{json, Value};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct CreateFolderRequest<'a> {
        title: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        uid: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_uid: Option<&'a str>,
    }

    pub fn get_all_folders(parent_uid: Option<&str>) -> ApiRequest {
        let request = ApiRequest::get("/folders");
        match parent_uid {
            Some(parent_uid) if !parent_uid.is_empty() => request.query("parentUid", parent_uid),
            _ => request,
        }
    }

    pub fn get_folder(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/folders/{}", uid))
    }

    pub fn get_folder_by_id(folder_id: i64) -> ApiRequest {
        ApiRequest::get(format!("/folders/id/{}", folder_id))
    }

    pub fn create_folder(title: &str, uid: Option<&str>, parent_uid: Option<&str>) -> Result<ApiRequest> {
        ApiRequest::post("/folders").json(&CreateFolderRequest {
            title,
            uid,
            parent_uid,
        })
    }

    pub fn move_folder(uid: &str, parent_uid: &str) -> ApiRequest {
        ApiRequest::post(format!("/folders/{}/move", uid)).body(json!({ "parentUid": parent_uid }))
    }

    pub fn update_folder(uid: &str, update: &FolderUpdate) -> Result<ApiRequest> {
        ApiRequest::put(format!("/folders/{}", uid)).json(update)
    }

    pub fn delete_folder(uid: &str) -> ApiRequest {
        ApiRequest::delete(format!("/folders/{}", uid))
    }

    pub fn get_folder_permissions(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/folders/{}/permissions", uid))
    }

    pub fn update_folder_permissions(uid: &str, items: &Value) -> ApiRequest {
        ApiRequest::post(format!("/folders/{}/permissions", uid)).body(items.clone())
    }

    pub fn update_folder_permissions_for_user(uid: &str, user_id: i64, items: &Value) -> ApiRequest {
        ApiRequest::post(format!("/access-control/folders/{}/users/{}", uid, user_id)).body(items.clone())
    }
}

/// Folder API
pub struct Folder<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Folder<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    /// List folders, optionally only the children of `parent_uid`
    pub async fn get_all_folders(&self, parent_uid: Option<&str>) -> Result<Value> {
        self.client.send(request::get_all_folders(parent_uid)).await
    }

    pub async fn get_folder(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_folder(uid)).await
    }

    pub async fn get_folder_by_id(&self, folder_id: i64) -> Result<Value> {
        self.client.send(request::get_folder_by_id(folder_id)).await
    }

    /// Create a folder. `uid` and `parent_uid` are only sent when given.
    pub async fn create_folder(
        &self,
        title: &str,
        uid: Option<&str>,
        parent_uid: Option<&str>,
    ) -> Result<Value> {
        self.client
            .send(request::create_folder(title, uid, parent_uid)?)
            .await
    }

    /// Move a folder beneath another parent folder.
    ///
    /// Only relevant when nested folders are enabled.
    pub async fn move_folder(&self, uid: &str, parent_uid: &str) -> Result<Value> {
        self.client.send(request::move_folder(uid, parent_uid)).await
    }

    pub async fn update_folder(&self, uid: &str, update: &FolderUpdate) -> Result<Value> {
        self.client.send(request::update_folder(uid, update)?).await
    }

    pub async fn delete_folder(&self, uid: &str) -> Result<Value> {
        self.client.send(request::delete_folder(uid)).await
    }

    pub async fn get_folder_permissions(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_folder_permissions(uid)).await
    }

    /// Replace the permission list of a folder
    pub async fn update_folder_permissions(&self, uid: &str, items: &Value) -> Result<Value> {
        self.client
            .send(request::update_folder_permissions(uid, items))
            .await
    }

    /// Set one user's permission on a folder, e.g. `{"permission": "View"}`
    pub async fn update_folder_permissions_for_user(
        &self,
        uid: &str,
        user_id: i64,
        items: &Value,
    ) -> Result<Value> {
        self.client
            .send(request::update_folder_permissions_for_user(uid, user_id, items))
            .await
    }
}
