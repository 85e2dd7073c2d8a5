//! PostgreSQL-backed primary store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use super::TodoRepository;
use crate::config::DatabaseConfig;
use crate::error::{Result, TodoError};
use crate::models::{NewTodo, Priority, Status, Todo, TodoFilter};

const TODO_COLUMNS: &str = "id, task, status, priority, created_at, updated_at";

/// Raw row shape; status and priority are converted to their enums after
/// fetch so a corrupted row surfaces as a store error instead of panicking.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    task: String,
    status: String,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(row: TodoRow) -> Result<Todo> {
        let status: Status = row
            .status
            .parse()
            .map_err(|e: String| TodoError::Store(format!("row {}: {e}", row.id)))?;
        let priority: Priority = row
            .priority
            .parse()
            .map_err(|e: String| TodoError::Store(format!("row {}: {e}", row.id)))?;

        Ok(Todo {
            id: row.id,
            task: row.task,
            status,
            priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Primary Store adapter over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool)
            .connect(&config.database_url())
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the todos table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id BIGSERIAL PRIMARY KEY,
                task TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo> {
        let sql = format!(
            "INSERT INTO todos (task, status, priority) VALUES ($1, $2, $3) \
             RETURNING {TODO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TodoRow>(&sql)
            .bind(&new_todo.task)
            .bind(new_todo.status.to_string())
            .bind(new_todo.priority.to_string())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn find(&self, id: i64) -> Result<Todo> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1");
        let row = sqlx::query_as::<_, TodoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TodoError::NotFound { id })?;

        row.try_into()
    }

    async fn update(&self, todo: &Todo) -> Result<Todo> {
        let sql = format!(
            "UPDATE todos SET task = $2, status = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {TODO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TodoRow>(&sql)
            .bind(todo.id)
            .bind(&todo.task)
            .bind(todo.status.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TodoError::NotFound { id: todo.id })?;

        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound { id });
        }
        Ok(())
    }

    async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        // Non-done todos first, by priority then recency; done todos last,
        // oldest update first.
        let sql = format!(
            r#"
            SELECT {TODO_COLUMNS} FROM todos
            WHERE ($1::TEXT IS NULL OR task LIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY
                CASE WHEN status <> 'done' THEN 0 ELSE 1 END ASC,
                CASE WHEN status <> 'done' THEN
                    CASE priority
                        WHEN 'high' THEN 1
                        WHEN 'medium' THEN 2
                        WHEN 'low' THEN 3
                        ELSE 4
                    END
                END ASC,
                CASE WHEN status <> 'done' THEN created_at END DESC,
                CASE WHEN status = 'done' THEN updated_at END ASC
            "#
        );

        let rows = sqlx::query_as::<_, TodoRow>(&sql)
            .bind(filter.task.as_deref())
            .bind(filter.status.map(|s| s.to_string()))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }
}
