//! Integration tests for the blocking facade
//!
//! The blocking client must not run on an async worker, so every call goes
//! through `spawn_blocking` while wiremock serves from the test runtime.

use grafana_client::blocking::GrafanaApi;
use grafana_client::{FolderUpdate, GrafanaError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_blocking<T, F>(uri: String, f: F) -> T
where
    F: FnOnce(GrafanaApi) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let api = GrafanaApi::from_url(&uri).expect("client should build");
        f(api)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_create_folder_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .and(body_json(json!({"title": "X", "uid": "A", "parentUid": "B"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "A", "parentUid": "B", "title": "X"})))
        .expect(1)
        .mount(&server)
        .await;

    let folder = run_blocking(server.uri(), |api| api.folder().create_folder("X", Some("A"), Some("B")))
        .await
        .expect("create should succeed");

    assert_eq!(folder["uid"], "A");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_update_folder_title_only() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/folders/abc"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "abc", "title": "Renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let folder = run_blocking(server.uri(), |api| {
        api.folder()
            .update_folder("abc", &FolderUpdate::new().title("Renamed"))
    })
    .await
    .expect("update should succeed");

    assert_eq!(folder["title"], "Renamed");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_error_mapping_matches_async() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Folder title cannot be empty"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/folders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "folder not found"})))
        .mount(&server)
        .await;

    let (create, get) = run_blocking(server.uri(), |api| {
        (
            api.folder().create_folder("", None, None),
            api.folder().get_folder("missing"),
        )
    })
    .await;

    assert!(matches!(create, Err(GrafanaError::BadInput { status: 400, .. })));
    assert!(matches!(get, Err(GrafanaError::Client { status: 404, .. })));
}

#[tokio::test(flavor = "multi_thread")]
#[allow(deprecated)]
async fn test_blocking_deprecated_preference_update() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/org/preferences"))
        .and(body_json(json!({"theme": "dark", "homeDashboardId": 5, "timezone": "utc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Preferences updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = run_blocking(server.uri(), |api| {
        api.organizations()
            .organization_preference_update("dark", 5, "utc")
    })
    .await
    .expect("update should succeed");

    assert_eq!(response["message"], "Preferences updated");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_version() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"database": "ok", "version": "11.0.0"})))
        .mount(&server)
        .await;

    let version = run_blocking(server.uri(), |api| api.version())
        .await
        .expect("version should resolve");

    assert_eq!(version, "11.0.0");
}
