//! # In-Memory Store
//!
//! Table-keyed record storage with auto-incrementing integer ids.
//!
//! "Not found" is always `Ok(None)`, never an error; the only failure the
//! store itself can produce is a poisoned lock. Ids are assigned by the
//! store, monotonically increasing per table, and never reused even after
//! a delete.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::{Map, Value};
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A previous writer panicked while holding the store lock
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// A single table: insertion-ordered records plus the next id to assign.
#[derive(Debug)]
struct Table {
    records: Vec<Value>,
    next_id: u64,
}

impl Table {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory table map, shared across handlers behind a single lock.
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store preloaded with the demo `users` table
    pub fn seeded() -> Self {
        let store = Self::new();
        store.load_table(super::seed::USERS_TABLE, super::seed::demo_users());
        store
    }

    /// Replace a table's contents, setting `next_id` past the highest
    /// existing id so seeded ids are never handed out again.
    pub fn load_table(&self, table: &str, records: Vec<Value>) {
        let next_id = records
            .iter()
            .filter_map(record_id)
            .max()
            .map_or(1, |max| max + 1);

        let mut tables = match self.tables.write() {
            Ok(tables) => tables,
            Err(poisoned) => poisoned.into_inner(),
        };
        tables.insert(table.to_string(), Table { records, next_id });
    }

    /// Full collection in insertion order; missing table yields an empty vec.
    pub fn get(&self, table: &str) -> StoreResult<Vec<Value>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .get(table)
            .map(|t| t.records.clone())
            .unwrap_or_default())
    }

    /// Linear scan for a matching id.
    pub fn get_by_id(&self, table: &str, id: u64) -> StoreResult<Option<Value>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(table).and_then(|t| {
            t.records
                .iter()
                .find(|r| record_id(r) == Some(id))
                .cloned()
        }))
    }

    /// Assign the next id, merge it over the caller's fields, append, and
    /// return the stored record. A caller-supplied `id` is overwritten.
    pub fn create(&self, table: &str, fields: Map<String, Value>) -> StoreResult<Value> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let entry = tables.entry(table.to_string()).or_insert_with(Table::new);

        let id = entry.next_id;
        entry.next_id += 1;

        let mut record = fields;
        record.insert("id".to_string(), Value::from(id));
        let record = Value::Object(record);
        entry.records.push(record.clone());

        Ok(record)
    }

    /// Merge only the supplied fields into the existing record; fields not
    /// present in the input are left untouched. Absent id gives `Ok(None)`.
    pub fn update_by_id(
        &self,
        table: &str,
        id: u64,
        fields: Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let Some(entry) = tables.get_mut(table) else {
            return Ok(None);
        };

        let Some(record) = entry
            .records
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
        else {
            return Ok(None);
        };

        if let Some(obj) = record.as_object_mut() {
            for (key, value) in fields {
                obj.insert(key, value);
            }
        }

        Ok(Some(record.clone()))
    }

    /// Remove the matching record if present; silent no-op if absent.
    /// Callers wanting a not-found response check existence beforehand.
    pub fn delete_by_id(&self, table: &str, id: u64) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(entry) = tables.get_mut(table) {
            if let Some(idx) = entry.records.iter().position(|r| record_id(r) == Some(id)) {
                entry.records.remove(idx);
            }
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}
