//! Resource groups of the Grafana API
//!
//! Each module describes its calls as [`ApiRequest`](crate::client::ApiRequest)
//! values in a `request` submodule and exposes them through an async struct
//! borrowing the shared [`GrafanaClient`](crate::client::GrafanaClient).
//! The blocking mirrors in [`crate::blocking`] reuse the same `request`
//! functions.
//!
//! # Module Structure
//!
//! - [`datasource`] - Datasource CRUD, ad hoc queries and health inquiries
//! - [`folder`] - Folders and folder permissions
//! - [`health`] - Instance health
//! - [`organization`] - Current organization and organization administration

pub mod datasource;
pub mod folder;
pub mod health;
pub mod organization;
