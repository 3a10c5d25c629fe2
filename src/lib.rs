//! mockrest - a minimal mock-backed users REST service
//!
//! Reference implementation of a conventional request/response API:
//! route dispatch, query-parameter filtering, JSON envelope formatting,
//! and basic not-found handling over an in-memory store.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
