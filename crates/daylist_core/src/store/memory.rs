//! In-memory todo store.

use super::{StoreError, StoreResult, TodoStore};
use crate::model::item::TodoItem;
use std::cell::{Cell, RefCell};

/// Keeps the document in memory and counts saves.
///
/// `set_failing(true)` makes every load and save return
/// `StoreError::Unavailable`, which lets callers exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: RefCell<Vec<TodoItem>>,
    save_count: Cell<usize>,
    failing: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Self::default()
        }
    }

    /// Returns a copy of the last saved document.
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.items.borrow().clone()
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.get() {
            return Err(StoreError::Unavailable(
                "in-memory store is set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

impl TodoStore for InMemoryStore {
    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        self.check_available()?;
        *self.items.borrow_mut() = items.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}
