use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use todos_core::{MemoryStore, Task, TaskManager, TaskStore};
use todos_web::serve::{router, AppState};

fn create_test_app(csrf: bool) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = TaskManager::new(store.clone());
    let app = router(Arc::new(AppState::new(manager, csrf)));
    (app, store)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirects_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_index_renders_empty_list() {
    let (app, _store) = create_test_app(true);

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("csrf_token="));

    let body = body_string(response).await;
    assert!(body.contains("No tasks yet"));
    assert!(body.contains("name=\"csrf_token\""));
}

#[tokio::test]
async fn test_create_redirects_and_persists() {
    let (app, store) = create_test_app(false);

    let response = send(&app, post_form("id=t1&title=Buy+milk", None)).await;
    assert_redirects_home(&response);

    assert_eq!(
        serde_json::Value::Object(store.get("t1").await.unwrap()),
        json!({ "_id": "t1", "title": "Buy milk", "status": "Open" })
    );

    let body = body_string(send(&app, get("/")).await).await;
    assert!(body.contains("<td>Buy milk</td>"));
    assert!(body.contains("href=\"/changes_status/t1/Open\""));
}

#[tokio::test]
async fn test_create_replaces_closed_task() {
    let (app, store) = create_test_app(false);
    let mut closed = Task::new("t1", "Old");
    closed.status = todos_core::TaskStatus::Close;
    store.insert_or_replace(&closed).await.unwrap();

    let response = send(&app, post_form("id=t1&title=New", None)).await;
    assert_redirects_home(&response);

    let doc = store.get("t1").await.unwrap();
    assert_eq!(doc["title"], "New");
    assert_eq!(doc["status"], "Open");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_with_empty_title_rerenders() {
    let (app, store) = create_test_app(false);

    let response = send(&app, post_form("id=t1&title=", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("This field is required."));
    assert!(body.contains("value=\"t1\""));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_with_missing_fields_rerenders() {
    let (app, store) = create_test_app(false);

    let response = send(&app, post_form("title=Only+title", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This field is required."));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_invalid_form_still_lists_tasks() {
    let (app, store) = create_test_app(false);
    store.insert_or_replace(&Task::new("t1", "Existing")).await.unwrap();

    let body = body_string(send(&app, post_form("id=&title=", None)).await).await;
    assert!(body.contains("<td>Existing</td>"));
}

#[tokio::test]
async fn test_csrf_token_required() {
    let (app, store) = create_test_app(true);

    let response = send(&app, post_form("id=t1&title=Buy+milk", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("The CSRF token is missing."));

    let response = send(
        &app,
        post_form("id=t1&title=Buy+milk&csrf_token=other", Some("csrf_token=abc123")),
    )
    .await;
    assert!(body_string(response).await.contains("The CSRF tokens do not match."));
    assert!(store.is_empty().await);

    let response = send(
        &app,
        post_form("id=t1&title=Buy+milk&csrf_token=abc123", Some("csrf_token=abc123")),
    )
    .await;
    assert_redirects_home(&response);
    assert!(store.get("t1").await.is_some());
}

#[tokio::test]
async fn test_change_status_flips_on_path_value() {
    let (app, store) = create_test_app(false);
    store.insert_or_replace(&Task::new("t1", "Buy milk")).await.unwrap();

    let response = send(&app, get("/changes_status/t1/Open")).await;
    assert_redirects_home(&response);
    assert_eq!(store.get("t1").await.unwrap()["status"], "Close");

    send(&app, get("/changes_status/t1/Close")).await;
    assert_eq!(store.get("t1").await.unwrap()["status"], "Open");

    send(&app, get("/changes_status/t1/whatever")).await;
    assert_eq!(store.get("t1").await.unwrap()["status"], "Close");
}

#[tokio::test]
async fn test_change_status_decodes_id() {
    let (app, store) = create_test_app(false);
    store.insert_or_replace(&Task::new("a b", "spaced")).await.unwrap();

    let response = send(&app, get("/changes_status/a%20b/Open")).await;
    assert_redirects_home(&response);
    assert_eq!(store.get("a b").await.unwrap()["status"], "Close");
}

#[tokio::test]
async fn test_change_status_missing_task() {
    let (app, store) = create_test_app(false);

    let response = send(&app, get("/changes_status/ghost/Open")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_string(response).await.contains("ghost"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_list_shows_open_tasks_first() {
    let (app, store) = create_test_app(false);
    for (id, title) in [("a", "alpha"), ("b", "beta"), ("c", "gamma")] {
        store.insert_or_replace(&Task::new(id, title)).await.unwrap();
    }
    send(&app, get("/changes_status/a/Open")).await;

    let body = body_string(send(&app, get("/")).await).await;
    let alpha = body.find("<td>alpha</td>").unwrap();
    let beta = body.find("<td>beta</td>").unwrap();
    let gamma = body.find("<td>gamma</td>").unwrap();

    assert!(beta < gamma);
    assert!(gamma < alpha);
}

#[tokio::test]
async fn test_end_to_end_example() {
    let (app, store) = create_test_app(false);

    assert_redirects_home(&send(&app, post_form("id=t1&title=Buy+milk", None)).await);
    assert_eq!(store.get("t1").await.unwrap()["status"], "Open");

    assert_redirects_home(&send(&app, get("/changes_status/t1/Open")).await);
    assert_eq!(store.get("t1").await.unwrap()["status"], "Close");

    assert_redirects_home(&send(&app, get("/changes_status/t1/Close")).await);
    let doc = store.get("t1").await.unwrap();
    assert_eq!(
        serde_json::Value::Object(doc),
        json!({ "_id": "t1", "title": "Buy milk", "status": "Open" })
    );
}
