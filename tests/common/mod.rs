//! Shared fixtures for integration tests.
#![allow(dead_code)] // each test binary compiles this module independently

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use todo_core::cache::{CacheRecord, InMemoryTodoCache, TodoCache};
use todo_core::error::{Result, TodoError};
use todo_core::models::{Priority, Status, Todo, TodoFilter};

pub fn at(unix_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(unix_seconds, 0).unwrap()
}

pub fn todo(id: i64, task: &str, status: Status, priority: Priority, created: i64) -> Todo {
    Todo {
        id,
        task: task.to_string(),
        status,
        priority,
        created_at: at(created),
        updated_at: at(created),
    }
}

/// Cache wrapper with per-operation fault injection, for exercising the
/// service's error-swallowing policy.
#[derive(Default)]
pub struct FlakyCache {
    pub inner: InMemoryTodoCache,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
    fail_delete: AtomicBool,
    fail_list: AtomicBool,
    fail_flush: AtomicBool,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_flush(&self, fail: bool) {
        self.fail_flush.store(fail, Ordering::SeqCst);
    }

    fn injected() -> TodoError {
        TodoError::Cache("injected failure".to_string())
    }
}

#[async_trait]
impl TodoCache for FlakyCache {
    async fn get(&self, key: &str) -> Result<Option<CacheRecord>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, todo: &Todo) -> Result<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.put(key, todo).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.delete(key).await
    }

    async fn list_all(&self, filter: &TodoFilter) -> Result<Option<Vec<Todo>>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.list_all(filter).await
    }

    async fn flush_all(&self) -> Result<()> {
        if self.fail_flush.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.flush_all().await
    }
}
