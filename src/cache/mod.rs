//! # Cache Index
//!
//! Derived, rebuildable projection of the todos table: one flat record per
//! todo plus a single shared sorted index used to answer list queries in
//! rank order without touching the primary store.
//!
//! ## Wire layout
//!
//! - Record key `"task:<id>"` holds a field map `{Id, Description, Status,
//!   Priority, CreatedAt, UpdatedAt}`, all values as strings, timestamps in
//!   RFC 3339.
//! - Sorted index key `"tasks_sorted"` holds base64-encoded record keys,
//!   scored by [`crate::ranking::rank_score`].
//!
//! The cache is never a source of truth. `delete` removes only the flat
//! record; a rank entry pointing at a missing record can therefore linger
//! and is skipped when the index is read.

pub mod memory;
pub mod redis;

use std::collections::HashMap;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::{Result, TodoError};
use crate::models::{Priority, Status, Todo, TodoFilter};

pub use self::memory::InMemoryTodoCache;
pub use self::redis::RedisTodoCache;

/// Key of the single shared sorted index.
pub const SORTED_INDEX_KEY: &str = "tasks_sorted";

/// Flat string-valued projection of a todo, as stored at a record key.
pub type CacheRecord = HashMap<String, String>;

/// Record key for a todo id.
pub fn todo_key(id: i64) -> String {
    format!("task:{id}")
}

/// Sorted-index member for a record key.
pub fn index_member(key: &str) -> String {
    BASE64.encode(key.as_bytes())
}

/// Decode a sorted-index member back into a record key.
pub fn decode_member(member: &str) -> Result<String> {
    let bytes = BASE64
        .decode(member)
        .map_err(|e| TodoError::Cache(format!("invalid index member: {e}")))?;
    String::from_utf8(bytes).map_err(|e| TodoError::Cache(format!("invalid index member: {e}")))
}

/// Flatten a todo into its cache record.
pub fn encode_record(todo: &Todo) -> CacheRecord {
    HashMap::from([
        ("Id".to_string(), todo.id.to_string()),
        ("Description".to_string(), todo.task.clone()),
        ("Status".to_string(), todo.status.to_string()),
        ("Priority".to_string(), todo.priority.to_string()),
        ("CreatedAt".to_string(), todo.created_at.to_rfc3339()),
        ("UpdatedAt".to_string(), todo.updated_at.to_rfc3339()),
    ])
}

/// Decode a cache record back into a todo.
///
/// Missing fields or unparseable values are a `Cache` error; callers treat
/// an undecodable record like a miss and fall back to the primary store.
pub fn decode_record(record: &CacheRecord) -> Result<Todo> {
    fn field<'a>(record: &'a CacheRecord, name: &str) -> Result<&'a str> {
        record
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TodoError::Cache(format!("record missing field: {name}")))
    }

    fn timestamp(value: &str, name: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| TodoError::Cache(format!("unparseable {name}: {e}")))
    }

    let id = field(record, "Id")?
        .parse::<i64>()
        .map_err(|e| TodoError::Cache(format!("unparseable Id: {e}")))?;
    let status: Status = field(record, "Status")?
        .parse()
        .map_err(TodoError::Cache)?;
    let priority: Priority = field(record, "Priority")?
        .parse()
        .map_err(TodoError::Cache)?;

    Ok(Todo {
        id,
        task: field(record, "Description")?.to_string(),
        status,
        priority,
        created_at: timestamp(field(record, "CreatedAt")?, "CreatedAt")?,
        updated_at: timestamp(field(record, "UpdatedAt")?, "UpdatedAt")?,
    })
}

/// Cache Index operations.
///
/// All methods surface transport failures as [`TodoError::Cache`]; whether
/// such a failure is fatal is decided by the calling service, not here.
#[async_trait]
pub trait TodoCache: Send + Sync {
    /// Fetch the flat record at `key`. `Ok(None)` means the record is absent.
    async fn get(&self, key: &str) -> Result<Option<CacheRecord>>;

    /// Write the flat record for `todo` at `key` and upsert its rank entry
    /// into the sorted index. Both writes are attempted; failure of either
    /// fails the call. There is no rollback across the two writes.
    async fn put(&self, key: &str, todo: &Todo) -> Result<()>;

    /// Remove the flat record at `key`. The corresponding rank entry is left
    /// in place; readers skip entries that no longer resolve.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Read the sorted index in descending score order and resolve each
    /// member to a decoded todo, applying `filter`.
    ///
    /// Returns `Ok(None)` when the sorted index itself is empty, even if
    /// stray records exist; callers must treat that as a miss and fall back
    /// to the primary store. Members that fail to decode or point at a
    /// missing record are skipped.
    async fn list_all(&self, filter: &TodoFilter) -> Result<Option<Vec<Todo>>>;

    /// Drop every record and the entire sorted index.
    async fn flush_all(&self) -> Result<()>;
}
