//! End-to-end tests driving the full router, one request at a time.
//!
//! Every test builds its own server (and therefore its own freshly seeded
//! store), so ordering between tests does not matter.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mockrest::http_server::HttpServer;

fn app() -> Router {
    HttpServer::new().router()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed = serde_json::from_slice(&bytes).unwrap();
    (status, parsed)
}

/// Envelope `code` must always mirror the HTTP status.
fn assert_envelope(status: StatusCode, body: &Value) {
    assert_eq!(body["code"], status.as_u16());
    assert_eq!(body["success"], status.is_success());
}

#[tokio::test]
async fn index_returns_greeting() {
    let (status, body) = send(&app(), "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": 200,
            "success": true,
            "message": "",
            "result": {"content": "hello world!"}
        })
    );
}

#[tokio::test]
async fn health_is_alive() {
    let (status, body) = send(&app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn mirror_echoes_path_segment() {
    let (status, body) = send(&app(), "GET", "/mirror/Tim", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(status, &body);
    assert_eq!(body["result"]["name"], "Tim");
}

#[tokio::test]
async fn list_returns_all_seeded_users() {
    let (status, body) = send(&app(), "GET", "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body["result"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["name"], "Aria");
}

#[tokio::test]
async fn list_filters_by_team() {
    let (status, body) = send(&app(), "GET", "/users?team=LWB", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body["result"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Aria");
    assert_eq!(users[1]["name"], "Tim");
}

#[tokio::test]
async fn list_filters_age_as_string() {
    let (_, body) = send(&app(), "GET", "/users?age=20", None).await;
    let users = body["result"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Tim");
}

#[tokio::test]
async fn list_combines_filters_with_and() {
    let (_, body) = send(&app(), "GET", "/users?team=LWB&age=19", None).await;
    let users = body["result"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Aria");
}

#[tokio::test]
async fn list_with_unmatched_filter_is_empty() {
    let (status, body) = send(&app(), "GET", "/users?team=nobody", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn get_user_wraps_record_under_user_key() {
    let (status, body) = send(&app(), "GET", "/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(status, &body);
    let user = &body["result"]["user"];
    assert_eq!(user["id"], 1);
    assert_eq!(user["name"], "Aria");
    assert_eq!(user["age"], 19);
}

#[tokio::test]
async fn get_unknown_user_is_404_with_null_result() {
    let (status, body) = send(&app(), "GET", "/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(status, &body);
    assert_eq!(body["message"], "user cannot be found");
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn get_with_non_integer_id_is_client_error() {
    let (status, body) = send(&app(), "GET", "/users/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(status, &body);
}

#[tokio::test]
async fn post_creates_and_returns_record_directly() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "shaqued", "age": 24, "team": "good"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(status, &body);
    let created = &body["result"];
    assert_eq!(created["id"], 5);
    assert_eq!(created["name"], "shaqued");
    assert_eq!(created["age"], 24);
    assert_eq!(created["team"], "good");

    // read-after-write through the same store
    let (status, body) = send(&app, "GET", "/users/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["user"], *created);
}

#[tokio::test]
async fn post_accepts_arbitrary_fields_verbatim() {
    let (status, body) = send(
        &app(),
        "POST",
        "/users",
        Some(json!({"name": "x", "favorite_color": "blue"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["favorite_color"], "blue");
}

#[tokio::test]
async fn post_without_body_is_400_envelope() {
    let (status, body) = send(&app(), "POST", "/users", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(status, &body);
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn post_with_non_object_body_is_400() {
    let (status, body) = send(&app(), "POST", "/users", Some(json!([1, 2, 3]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("expected a JSON object"));
}

#[tokio::test]
async fn put_applies_partial_update_only() {
    let app = app();
    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({"team": "NNB"}))).await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["result"];
    assert_eq!(updated["team"], "NNB");
    assert_eq!(updated["name"], "Aria");
    assert_eq!(updated["age"], 19);
    assert_eq!(updated["id"], 1);
}

#[tokio::test]
async fn put_drops_non_whitelisted_fields() {
    let (status, body) = send(
        &app(),
        "PUT",
        "/users/2",
        Some(json!({"name": "Timothy", "id": 99, "favorite_color": "red"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["result"];
    assert_eq!(updated["name"], "Timothy");
    assert_eq!(updated["id"], 2);
    assert!(updated.get("favorite_color").is_none());
}

#[tokio::test]
async fn put_unknown_user_is_404() {
    let (status, body) = send(&app(), "PUT", "/users/999", Some(json!({"name": "x"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user to update cannot be found");
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn delete_is_effective_and_immediate() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(status, &body);
    assert_eq!(body["message"], "deleted user successfully");
    assert!(body["result"].is_null());

    let (status, _) = send(&app, "GET", "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_user_is_404() {
    let (status, body) = send(&app(), "DELETE", "/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user to delete cannot be found");
}

#[tokio::test]
async fn deleted_id_is_never_reassigned() {
    let app = app();
    send(&app, "DELETE", "/users/4", None).await;

    let (_, body) = send(&app, "POST", "/users", Some(json!({"name": "next"}))).await;
    assert_eq!(body["result"]["id"], 5);
}
