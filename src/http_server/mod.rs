//! # HTTP Server Module
//!
//! Axum surface for the users API: envelope formatting, route handlers,
//! error mapping, and server assembly.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use envelope::Envelope;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use user_routes::{user_routes, AppState};
