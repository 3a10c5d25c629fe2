//! # Response Envelope
//!
//! Fixed-shape wrapper around every API payload:
//! `{code, success, message, result}` with `success == (200..300)`.
//!
//! The `result` payload, when present, must be a JSON object whose key names
//! the kind of data inside (`{"users": [...]}`, `{"user": {...}}`). Handing
//! the builder anything else is a caller bug, not a runtime condition.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};

/// The envelope every endpoint responds with
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub code: u16,
    pub success: bool,
    pub message: String,
    pub result: Option<Value>,
}

impl Envelope {
    /// Build an envelope around an optional payload.
    ///
    /// Fails fast with `ContractViolation` when the payload is not a JSON
    /// object.
    pub fn build(
        result: Option<Value>,
        status: StatusCode,
        message: impl Into<String>,
    ) -> ApiResult<Self> {
        if let Some(payload) = &result {
            if !payload.is_object() {
                return Err(ApiError::ContractViolation(json_type_name(payload)));
            }
        }

        Ok(Self {
            code: status.as_u16(),
            success: status.is_success(),
            message: message.into(),
            result,
        })
    }

    /// 200 with a payload and an empty message
    pub fn ok(result: Value) -> ApiResult<Self> {
        Self::build(Some(result), StatusCode::OK, "")
    }

    /// Payload-free envelope carrying only a status and message
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            success: status.is_success(),
            message: message.into(),
            result: None,
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Human-readable JSON type name, for contract violation messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
