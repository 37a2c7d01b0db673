//! Domain model for todo items.
//!
//! # Responsibility
//! - Define the canonical todo record and its lifecycle transitions.
//! - Own the expiry window arithmetic used by display and purge paths.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`, never by position.
//! - `completed_at` is set if and only if the item is completed.

pub mod item;
