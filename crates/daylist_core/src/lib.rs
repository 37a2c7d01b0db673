//! Core domain logic for daylist.
//! This crate is the single source of truth for todo item invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, DaylistConfig, DATA_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{
    expiry_window, ItemId, ItemValidationError, TodoItem, EXPIRY_WINDOW_HOURS,
};
pub use service::todo_list::{
    CompleteOutcome, CompleteRequest, ConfirmationToken, ListError, ListResult, PendingAction,
    Resolution, TodoList,
};
pub use store::{InMemoryStore, JsonFileStore, StoreError, StoreResult, TodoStore};
pub use view::{display_rows, partition_for_display, DisplayRow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
