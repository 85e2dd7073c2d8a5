//! # Todo Service
//!
//! The coordination layer between the authoritative primary store and the
//! derived cache. Each operation is atomic only in its store phase; cache
//! effects are applied afterward, non-transactionally, and the store is
//! never rolled back on a cache failure.
//!
//! ## Consistency policy
//!
//! The cache is a latency optimization, never a correctness dependency.
//! Cache failures are logged and swallowed in `create`, `find`, and
//! `update`. Two paths deliberately do surface them: the record removal in
//! `delete`, and the repopulation loop in `find_all`. That asymmetry is the
//! established reliability policy of this service and must not be
//! normalized in either direction.

use std::sync::Arc;

use tracing::warn;

use crate::cache::{decode_record, todo_key, TodoCache};
use crate::error::{Result, TodoError};
use crate::models::{CreateTodo, NewTodo, Status, Todo, TodoFilter, UpdateTodo};
use crate::repository::TodoRepository;

/// Sync Orchestrator for todo operations.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    cache: Arc<dyn TodoCache>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>, cache: Arc<dyn TodoCache>) -> Self {
        Self { repository, cache }
    }

    /// Create a new todo.
    ///
    /// Validation failures produce no side effects. A store failure is
    /// fatal; a cache failure after a successful store write is logged and
    /// swallowed, and the stored todo is still returned.
    pub async fn create(&self, input: CreateTodo) -> Result<Todo> {
        if input.task.is_empty() {
            return Err(TodoError::Validation("task cannot be empty".to_string()));
        }
        let priority = input
            .priority
            .parse()
            .map_err(TodoError::Validation)?;

        let todo = self
            .repository
            .create(NewTodo {
                task: input.task,
                status: Status::Created,
                priority,
            })
            .await?;

        let key = todo_key(todo.id);
        if let Err(error) = self.cache.put(&key, &todo).await {
            warn!(todo_id = todo.id, %error, "failed to cache created todo");
        }

        tracing::info!(todo_id = todo.id, "todo created");
        Ok(todo)
    }

    /// Fetch a todo by id, read-through.
    ///
    /// A decodable cache hit short-circuits the primary store. An absent
    /// key, an undecodable record, and a cache transport error all fall
    /// through to the store, after which the fresh todo is written back
    /// best-effort.
    pub async fn find(&self, id: i64) -> Result<Todo> {
        let key = todo_key(id);

        match self.cache.get(&key).await {
            Ok(Some(record)) => match decode_record(&record) {
                Ok(todo) => return Ok(todo),
                Err(error) => {
                    warn!(todo_id = id, %error, "undecodable cache record, falling back to store");
                }
            },
            Ok(None) => {}
            Err(error) => {
                warn!(todo_id = id, %error, "cache read failed, falling back to store");
            }
        }

        let todo = self.repository.find(id).await?;

        if let Err(error) = self.cache.put(&key, &todo).await {
            warn!(todo_id = id, %error, "failed to repopulate cache after store read");
        }

        Ok(todo)
    }

    /// Apply a partial update.
    ///
    /// Unset or empty patch fields keep the current value; priority and
    /// creation time are never altered. The stale cache record is deleted
    /// and re-added rather than patched in place; both cache steps are
    /// best-effort.
    pub async fn update(&self, patch: UpdateTodo) -> Result<Todo> {
        let status: Option<Status> = match patch.status.as_deref() {
            Some(raw) if !raw.is_empty() => Some(raw.parse().map_err(TodoError::Validation)?),
            _ => None,
        };

        let current = self.find(patch.id).await?;

        let merged = Todo {
            id: current.id,
            task: match patch.task {
                Some(task) if !task.is_empty() => task,
                _ => current.task,
            },
            status: status.unwrap_or(current.status),
            priority: current.priority,
            created_at: current.created_at,
            updated_at: current.updated_at,
        };

        let updated = self.repository.update(&merged).await?;

        let key = todo_key(updated.id);
        if let Err(error) = self.cache.delete(&key).await {
            warn!(todo_id = updated.id, %error, "failed to evict stale cache record");
        }
        if let Err(error) = self.cache.put(&key, &updated).await {
            warn!(todo_id = updated.id, %error, "failed to cache updated todo");
        }

        tracing::info!(todo_id = updated.id, "todo updated");
        Ok(updated)
    }

    /// Delete a todo by id.
    ///
    /// The store delete is authoritative; if it fails the cache is left
    /// untouched. Unlike every other operation, a failure of the cache
    /// removal is surfaced to the caller rather than swallowed.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await?;

        self.cache.delete(&todo_key(id)).await?;

        tracing::info!(todo_id = id, "todo deleted");
        Ok(())
    }

    /// List todos matching `filter`.
    ///
    /// The cache is flushed before the list is attempted, so the cache
    /// branch always misses and every call is served from the primary
    /// store, which is then re-cached entry by entry. A failure while
    /// re-caching is fatal to the whole call, unlike the fire-and-forget
    /// writes in `create`, `find`, and `update`.
    pub async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        if let Err(error) = self.cache.flush_all().await {
            warn!(%error, "failed to flush cache before list");
        }

        match self.cache.list_all(filter).await {
            Ok(Some(todos)) => return Ok(todos),
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "cache list failed, falling back to store");
            }
        }

        let todos = self.repository.find_all(filter).await?;

        for todo in &todos {
            self.cache.put(&todo_key(todo.id), todo).await?;
        }

        Ok(todos)
    }
}
