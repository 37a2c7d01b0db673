//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory todo sequence and apply lifecycle operations to it.
//! - Persist the full sequence through a `TodoStore` after each mutation.

pub mod todo_list;
