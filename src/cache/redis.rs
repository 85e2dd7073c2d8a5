//! Redis-backed cache adapter.
//!
//! Records are hashes, the shared index is a sorted set, and `flush_all`
//! maps to FLUSHDB, so the cache should own its logical database.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use super::{decode_member, decode_record, encode_record, TodoCache, CacheRecord, SORTED_INDEX_KEY};
use crate::config::RedisConfig;
use crate::error::Result;
use crate::models::{Todo, TodoFilter};
use crate::ranking::rank_score;

/// Cache Index adapter over a Redis database.
#[derive(Clone)]
pub struct RedisTodoCache {
    client: redis::Client,
}

impl RedisTodoCache {
    /// Create an adapter from connection parameters. Connections are
    /// established lazily per call.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url())?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

impl std::fmt::Debug for RedisTodoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTodoCache").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TodoCache for RedisTodoCache {
    async fn get(&self, key: &str) -> Result<Option<CacheRecord>> {
        let mut conn = self.connection().await?;
        // HGETALL yields an empty map for a missing key.
        let record: CacheRecord = conn.hgetall(key).await?;
        if record.is_empty() {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn put(&self, key: &str, todo: &Todo) -> Result<()> {
        let mut conn = self.connection().await?;

        let record = encode_record(todo);
        let fields: Vec<(String, String)> = record.into_iter().collect();
        let _: () = conn.hset_multiple(key, &fields).await?;

        let score = rank_score(todo);
        let member = super::index_member(key);
        let _: () = conn.zadd(SORTED_INDEX_KEY, member, score).await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: i64 = conn.del(key).await?;
        Ok(())
    }

    async fn list_all(&self, filter: &TodoFilter) -> Result<Option<Vec<Todo>>> {
        let mut conn = self.connection().await?;

        let members: Vec<String> = conn.zrevrange(SORTED_INDEX_KEY, 0, -1).await?;
        if members.is_empty() {
            return Ok(None);
        }

        let mut todos = Vec::with_capacity(members.len());
        for member in members {
            let key = match decode_member(&member) {
                Ok(key) => key,
                Err(error) => {
                    tracing::warn!(%member, %error, "skipping unreadable index member");
                    continue;
                }
            };

            let record: CacheRecord = conn.hgetall(&key).await?;
            if record.is_empty() {
                // Orphaned rank entry: the record was deleted out from
                // under the index.
                tracing::debug!(%key, "skipping rank entry with no record");
                continue;
            }

            match decode_record(&record) {
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
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}
