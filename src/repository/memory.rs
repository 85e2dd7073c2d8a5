//! In-memory primary store adapter.
//!
//! Implements the same ordering contract as the PostgreSQL adapter over a
//! mutex-guarded map. Ids are assigned from a monotonically increasing
//! counter, mirroring a serial column.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::TodoRepository;
use crate::error::{Result, TodoError};
use crate::models::{NewTodo, Priority, Status, Todo, TodoFilter};

struct RepositoryState {
    todos: HashMap<i64, Todo>,
    next_id: i64,
}

/// Primary Store adapter over in-process state.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    state: Arc<Mutex<RepositoryState>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RepositoryState {
                todos: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Insert a todo verbatim, keeping its id and timestamps. Intended for
    /// tests that need fixed creation times.
    pub async fn seed(&self, todo: Todo) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(todo.id + 1);
        state.todos.insert(todo.id, todo);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.todos.is_empty()
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoRepository").finish_non_exhaustive()
    }
}

fn priority_position(priority: Priority) -> u8 {
    match priority {
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

fn list_order(a: &Todo, b: &Todo) -> Ordering {
    let a_done = a.status == Status::Done;
    let b_done = b.status == Status::Done;
    match (a_done, b_done) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => priority_position(a.priority)
            .cmp(&priority_position(b.priority))
            .then_with(|| b.created_at.cmp(&a.created_at)),
        (true, true) => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;

        let now = Utc::now();
        let todo = Todo {
            id,
            task: new_todo.task,
            status: new_todo.status,
            priority: new_todo.priority,
            created_at: now,
            updated_at: now,
        };
        state.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: i64) -> Result<Todo> {
        let state = self.state.lock().await;
        state
            .todos
            .get(&id)
            .cloned()
            .ok_or(TodoError::NotFound { id })
    }

    async fn update(&self, todo: &Todo) -> Result<Todo> {
        let mut state = self.state.lock().await;
        let current = state
            .todos
            .get_mut(&todo.id)
            .ok_or(TodoError::NotFound { id: todo.id })?;

        current.task = todo.task.clone();
        current.status = todo.status;
        current.updated_at = Utc::now();
        Ok(current.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoError::NotFound { id })
    }

    async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let state = self.state.lock().await;
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect();
        todos.sort_by(list_order);
        Ok(todos)
    }
}
