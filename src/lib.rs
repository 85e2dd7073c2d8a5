//! # Todo Core
//!
//! Backend core for a task-list service: an authoritative PostgreSQL store
//! coordinated with a derived Redis cache that keeps a custom-ranked
//! ordering of todos for list queries.
//!
//! ## Architecture
//!
//! - [`models`] - canonical todo entity and boundary input types
//! - [`ranking`] - pure rank scoring for the cache's sorted index
//! - [`cache`] - the Cache Index: trait plus Redis and in-memory adapters
//! - [`repository`] - the Primary Store: trait plus PostgreSQL and
//!   in-memory adapters
//! - [`services`] - the coordination layer sequencing store and cache per
//!   operation
//! - [`config`] - connection parameters for both stores
//! - [`error`] - structured error handling
//! - [`logging`] - tracing subscriber setup
//!
//! The primary store owns todo identity and existence; the cache is a
//! rebuildable projection that trades strict consistency for read latency.
//! Cache unavailability degrades latency, not the correctness of creates,
//! reads, or updates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todo_core::cache::RedisTodoCache;
//! use todo_core::config::TodoConfig;
//! use todo_core::models::CreateTodo;
//! use todo_core::repository::PgTodoRepository;
//! use todo_core::services::TodoService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TodoConfig::load()?;
//! let repository = PgTodoRepository::connect(&config.database).await?;
//! repository.migrate().await?;
//! let cache = RedisTodoCache::new(&config.redis)?;
//!
//! let service = TodoService::new(Arc::new(repository), Arc::new(cache));
//! let todo = service
//!     .create(CreateTodo {
//!         task: "write the report".to_string(),
//!         priority: "high".to_string(),
//!     })
//!     .await?;
//! println!("created todo {}", todo.id);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ranking;
pub mod repository;
pub mod services;

pub use error::{Result, TodoError};
pub use models::{CreateTodo, Priority, Status, Todo, TodoFilter, UpdateTodo};
pub use services::TodoService;
