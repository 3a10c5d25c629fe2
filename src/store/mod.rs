//! # Mock Store
//!
//! In-memory substitute for a persistent database. State lives for the
//! process lifetime only.

pub mod memory;
pub mod seed;

pub use memory::{MemoryStore, StoreError, StoreResult};
pub use seed::USERS_TABLE;
