//! In-memory cache adapter.
//!
//! Same wire semantics as the Redis adapter (flat records, one member→score
//! index, orphan-skipping reads) over mutex-guarded maps. Used by tests and
//! by embedded callers that want the coordination behavior without a cache
//! server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{decode_member, decode_record, encode_record, TodoCache, CacheRecord};
use crate::error::Result;
use crate::models::{Todo, TodoFilter};
use crate::ranking::rank_score;

struct CacheState {
    /// Flat records by record key.
    records: HashMap<String, CacheRecord>,
    /// The shared sorted index: member → score.
    index: HashMap<String, f64>,
}

/// Cache Index adapter over in-process maps.
#[derive(Clone)]
pub struct InMemoryTodoCache {
    state: Arc<Mutex<CacheState>>,
}

impl InMemoryTodoCache {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState {
                records: HashMap::new(),
                index: HashMap::new(),
            })),
        }
    }

    /// Number of rank entries currently in the sorted index. The count can
    /// exceed the number of records when deletes have left orphans behind.
    pub async fn index_len(&self) -> usize {
        self.state.lock().await.index.len()
    }

    /// Number of flat records currently stored.
    pub async fn record_count(&self) -> usize {
        self.state.lock().await.records.len()
    }
}

impl Default for InMemoryTodoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoCache").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TodoCache for InMemoryTodoCache {
    async fn get(&self, key: &str) -> Result<Option<CacheRecord>> {
        let state = self.state.lock().await;
        Ok(state.records.get(key).cloned())
    }

    async fn put(&self, key: &str, todo: &Todo) -> Result<()> {
        let mut state = self.state.lock().await;
        state.records.insert(key.to_string(), encode_record(todo));
        state
            .index
            .insert(super::index_member(key), rank_score(todo));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // Only the record is removed; the rank entry stays behind, matching
        // the wire adapter.
        let mut state = self.state.lock().await;
        state.records.remove(key);
        Ok(())
    }

    async fn list_all(&self, filter: &TodoFilter) -> Result<Option<Vec<Todo>>> {
        let state = self.state.lock().await;
        if state.index.is_empty() {
            return Ok(None);
        }

        // Descending score; ties break on reverse-lexicographic member
        // order, like ZREVRANGE.
        let mut members: Vec<(&String, f64)> =
            state.index.iter().map(|(m, s)| (m, *s)).collect();
        members.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        });

        let mut todos = Vec::with_capacity(members.len());
        for (member, _) in members {
            let key = match decode_member(member) {
                Ok(key) => key,
                Err(error) => {
                    tracing::warn!(%member, %error, "skipping unreadable index member");
                    continue;
                }
            };

            let Some(record) = state.records.get(&key) else {
                tracing::debug!(%key, "skipping rank entry with no record");
                continue;
            };

            match decode_record(record) {
                Ok(todo) => {
                    if filter.matches(&todo) {
                        todos.push(todo);
                    }
                }
                Err(error) => {
                    tracing::warn!(%key, %error, "skipping undecodable cache record");
                }
            }
        }

        Ok(Some(todos))
    }

    async fn flush_all(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.records.clear();
        state.index.clear();
        Ok(())
    }
}
