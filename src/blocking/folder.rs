use super::GrafanaClient;
use crate::elements::folder::{request, FolderUpdate};
use crate::error::Result;
use serde_json::Value;

/// Blocking folder API, see [`crate::elements::folder::Folder`]
pub struct Folder<'a> {
    client: &'a GrafanaClient,
}

impl<'a> Folder<'a> {
    pub(crate) fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn get_all_folders(&self, parent_uid: Option<&str>) -> Result<Value> {
        self.client.send(request::get_all_folders(parent_uid))
    }

    pub fn get_folder(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_folder(uid))
    }

    pub fn get_folder_by_id(&self, folder_id: i64) -> Result<Value> {
        self.client.send(request::get_folder_by_id(folder_id))
    }

    pub fn create_folder(&self, title: &str, uid: Option<&str>, parent_uid: Option<&str>) -> Result<Value> {
        self.client
            .send(request::create_folder(title, uid, parent_uid)?)
    }

    pub fn move_folder(&self, uid: &str, parent_uid: &str) -> Result<Value> {
        self.client.send(request::move_folder(uid, parent_uid))
    }

    pub fn update_folder(&self, uid: &str, update: &FolderUpdate) -> Result<Value> {
        self.client.send(request::update_folder(uid, update)?)
    }

    pub fn delete_folder(&self, uid: &str) -> Result<Value> {
        self.client.send(request::delete_folder(uid))
    }

    pub fn get_folder_permissions(&self, uid: &str) -> Result<Value> {
        self.client.send(request::get_folder_permissions(uid))
    }

    pub fn update_folder_permissions(&self, uid: &str, items: &Value) -> Result<Value> {
        self.client
            .send(request::update_folder_permissions(uid, items))
    }

    pub fn update_folder_permissions_for_user(&self, uid: &str, user_id: i64, items: &Value) -> Result<Value> {
        self.client
            .send(request::update_folder_permissions_for_user(uid, user_id, items))
    }
}
