//! # User Routes
//!
//! Route handlers for the `users` resource plus the demo endpoints.
//! Each handler is a stateless, single-pass translation from HTTP input
//! to store calls to an envelope.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::observability::Logger;
use crate::store::{MemoryStore, USERS_TABLE};

use super::envelope::{json_type_name, Envelope};
use super::errors::{ApiError, ApiResult};

/// Fields a PUT is allowed to touch. POST deliberately has no such list;
/// the asymmetry is inherited behavior, kept until a product decision says
/// otherwise.
const UPDATE_FIELDS: [&str; 3] = ["name", "age", "team"];

// ==================
// Shared State
// ==================

/// State shared across user route handlers
pub struct AppState {
    pub store: MemoryStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::seeded(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state type
type ServerState = Arc<AppState>;

/// Build the user API router
pub fn user_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/mirror/:name", get(mirror_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(state)
}

// ==================
// Request Types
// ==================

/// Filter parameters accepted by `GET /users`
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub team: Option<String>,
    pub age: Option<String>,
}

// ==================
// Handlers
// ==================

/// Static greeting
async fn index_handler() -> ApiResult<Envelope> {
    Envelope::ok(json!({"content": "hello world!"}))
}

/// Echo the path segment back
async fn mirror_handler(Path(name): Path<String>) -> ApiResult<Envelope> {
    Envelope::ok(json!({"name": name}))
}

/// List users, optionally filtered by `team` and/or `age`.
///
/// Filters compare the stringified stored value against the raw query
/// string, applied one field after the other (logical AND). Relative
/// order of the surviving records is preserved.
async fn list_users_handler(
    State(state): State<ServerState>,
    Query(query): Query<UsersQuery>,
) -> ApiResult<Envelope> {
    let mut users = state.store.get(USERS_TABLE)?;

    for (field, wanted) in [("team", &query.team), ("age", &query.age)] {
        if let Some(wanted) = wanted {
            users.retain(|user| field_matches(user, field, wanted));
        }
    }

    Envelope::ok(json!({"users": users}))
}

/// Fetch a single user by id
async fn get_user_handler(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Envelope> {
    let Path(id) = id?;

    match state.store.get_by_id(USERS_TABLE, id)? {
        Some(user) => Envelope::ok(json!({"user": user})),
        None => Ok(Envelope::status(
            StatusCode::NOT_FOUND,
            "user cannot be found",
        )),
    }
}

/// Create a user from the request body, forwarded verbatim.
/// The created record comes back directly as `result`, not under a key.
async fn create_user_handler(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope> {
    let fields = object_body(body)?;
    let user = state.store.create(USERS_TABLE, fields)?;

    Logger::info("user_created", &[("id", &user["id"].to_string())]);
    Envelope::ok(user)
}

/// Partial update; only `name`, `age`, and `team` are applied,
/// anything else in the body is silently dropped.
async fn update_user_handler(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope> {
    let Path(id) = id?;
    let fields = object_body(body)?;

    let props: Map<String, Value> = fields
        .into_iter()
        .filter(|(key, _)| UPDATE_FIELDS.contains(&key.as_str()))
        .collect();

    match state.store.update_by_id(USERS_TABLE, id, props)? {
        Some(user) => {
            Logger::info("user_updated", &[("id", &id.to_string())]);
            Envelope::ok(user)
        }
        None => Ok(Envelope::status(
            StatusCode::NOT_FOUND,
            "user to update cannot be found",
        )),
    }
}

/// Delete a user by id. Existence is checked first; the store's delete
/// itself treats an absent id as a no-op.
async fn delete_user_handler(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Envelope> {
    let Path(id) = id?;

    if state.store.get_by_id(USERS_TABLE, id)?.is_none() {
        return Ok(Envelope::status(
            StatusCode::NOT_FOUND,
            "user to delete cannot be found",
        ));
    }

    state.store.delete_by_id(USERS_TABLE, id)?;
    Logger::info("user_deleted", &[("id", &id.to_string())]);

    Ok(Envelope::status(StatusCode::OK, "deleted user successfully"))
}

// ==================
// Helpers
// ==================

/// Unwrap a JSON body extractor, requiring an object.
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    let Json(value) = body?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Exact string comparison against the stringified stored value. A JSON
/// string contributes its raw content, any other value its JSON rendering
/// (`19` stringifies to `"19"`). No numeric coercion. A record lacking the
/// field never matches.
fn field_matches(record: &Value, field: &str, wanted: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == wanted,
        Some(other) => other.to_string() == wanted,
        None => false,
    }
}
