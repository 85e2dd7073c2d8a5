//! # Services
//!
//! Business-logic layer. All external callers go through [`TodoService`];
//! nothing else touches the primary store or the cache directly.

pub mod todo_service;

pub use todo_service::TodoService;
