//! Persistence boundary for the todo list.
//!
//! # Responsibility
//! - Define the whole-document load/save contract used by the list service.
//! - Provide the JSON file store and an in-memory store.
//!
//! # Invariants
//! - `save` always writes the full sequence; there are no partial writes.
//! - A missing document loads as an empty list.
//! - An unparseable document is an error, never silently replaced.

use crate::model::item::{ItemId, TodoItem};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::rc::Rc;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Reading, writing or renaming the document failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document exists but is not a valid item list.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The in-memory list could not be encoded.
    Serialize(serde_json::Error),
    /// The document parsed but violates list-level invariants.
    InvalidData(String),
    /// The store refuses to operate.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "cannot parse todo data in {}: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "cannot encode todo data: {err}"),
            Self::InvalidData(message) => write!(f, "invalid todo data: {message}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

/// Whole-document persistence for the todo list.
pub trait TodoStore {
    /// Loads every persisted item in stored order.
    fn load(&self) -> StoreResult<Vec<TodoItem>>;
    /// Replaces the persisted document with `items`.
    fn save(&self, items: &[TodoItem]) -> StoreResult<()>;
}

impl<S: TodoStore + ?Sized> TodoStore for &S {
    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        (**self).load()
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        (**self).save(items)
    }
}

impl<S: TodoStore + ?Sized> TodoStore for Rc<S> {
    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        (**self).load()
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        (**self).save(items)
    }
}

/// Rejects documents where two items share one id.
pub(crate) fn ensure_unique_ids(items: &[TodoItem]) -> StoreResult<()> {
    let mut seen: HashSet<ItemId> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(StoreError::InvalidData(format!(
                "duplicate item id `{}`",
                item.id()
            )));
        }
    }
    Ok(())
}
