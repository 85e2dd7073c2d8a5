//! # Data Models
//!
//! Canonical todo entity plus the boundary input types for the service layer.

pub mod todo;

pub use todo::{CreateTodo, NewTodo, Priority, Status, Todo, TodoFilter, UpdateTodo};
