//! Demo dataset loaded at startup.

use serde_json::{json, Value};

/// Name of the only table this service serves
pub const USERS_TABLE: &str = "users";

/// The four demo users.
pub fn demo_users() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Aria", "age": 19, "team": "LWB"}),
        json!({"id": 2, "name": "Tim", "age": 20, "team": "LWB"}),
        json!({"id": 3, "name": "Varun", "age": 23, "team": "NNB"}),
        json!({"id": 4, "name": "Alex", "age": 24, "team": "C1"}),
    ]
}
