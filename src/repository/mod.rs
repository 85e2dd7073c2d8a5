//! # Primary Store
//!
//! The authoritative relational table of todos. The store is the sole owner
//! of todo identity and existence; the cache only ever holds a projection
//! of what lives here.
//!
//! ## List ordering contract
//!
//! `find_all` returns, deterministically:
//! 1. all non-done todos before all done todos,
//! 2. non-done todos by priority (high, medium, low), then by creation time
//!    descending,
//! 3. done todos by last-updated time ascending.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoFilter};

pub use memory::InMemoryTodoRepository;
pub use postgres::PgTodoRepository;

/// Primary Store operations.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo; the store assigns id and timestamps.
    async fn create(&self, new_todo: NewTodo) -> Result<Todo>;

    /// Fetch a todo by id. A missing row is [`crate::error::TodoError::NotFound`].
    async fn find(&self, id: i64) -> Result<Todo>;

    /// Persist the task and status of an already-merged todo, refreshing
    /// `updated_at`. Priority and creation time are never written.
    async fn update(&self, todo: &Todo) -> Result<Todo>;

    /// Delete a todo by id. Zero rows affected is
    /// [`crate::error::TodoError::NotFound`].
    async fn delete(&self, id: i64) -> Result<()>;

    /// List todos matching `filter` under the ordering contract above.
    async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>>;
}
