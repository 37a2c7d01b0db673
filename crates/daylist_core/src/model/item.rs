//! Todo item domain model.
//!
//! # Responsibility
//! - Define the record persisted in `todo_data.json`.
//! - Provide complete/reopen/rename transitions that keep invariants intact.
//! - Answer expiry questions for a given point in time.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `text` is never empty or whitespace-only for items created or renamed
//!   here; stored records are accepted as written.
//! - `completed_at.is_some() == completed`.
//! - A completed item is expired once `now - completed_at >= EXPIRY_WINDOW_HOURS`.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo item.
pub type ItemId = Uuid;

/// Hours a completed item stays visible before it expires.
pub const EXPIRY_WINDOW_HOURS: i64 = 24;

/// Returns the expiry window as a duration.
pub fn expiry_window() -> Duration {
    Duration::hours(EXPIRY_WINDOW_HOURS)
}

/// Invariant violations for `TodoItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Item text is empty after trim.
    EmptyText,
    /// Item id is the nil UUID.
    NilId,
    /// Item is completed but has no completion timestamp.
    MissingCompletedAt,
    /// Item is not completed but carries a completion timestamp.
    UnexpectedCompletedAt,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "item text must not be blank"),
            Self::NilId => write!(f, "item id must not be nil"),
            Self::MissingCompletedAt => {
                write!(f, "completed item must carry a completion timestamp")
            }
            Self::UnexpectedCompletedAt => {
                write!(f, "incomplete item must not carry a completion timestamp")
            }
        }
    }
}

impl Error for ItemValidationError {}

/// One entry of the todo list.
///
/// Fields are private so every mutation goes through the lifecycle helpers
/// below; serde routes through [`TodoItemRecord`] and re-validates id and
/// timestamp invariants on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoItemRecord", into = "TodoItemRecord")]
pub struct TodoItem {
    id: ItemId,
    text: String,
    completed: bool,
    completed_at: Option<NaiveDateTime>,
}

/// Wire shape of a persisted item.
///
/// `timestamp` keeps the name used by existing data files. `id` is absent in
/// files written before items had stable ids, so a fresh one is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoItemRecord {
    #[serde(default = "Uuid::new_v4")]
    id: ItemId,
    text: String,
    completed: bool,
    #[serde(default)]
    timestamp: Option<NaiveDateTime>,
}

impl TryFrom<TodoItemRecord> for TodoItem {
    type Error = ItemValidationError;

    fn try_from(record: TodoItemRecord) -> Result<Self, Self::Error> {
        let item = Self {
            id: record.id,
            text: record.text,
            completed: record.completed,
            completed_at: record.timestamp,
        };
        item.validate_stored()?;
        Ok(item)
    }
}

impl From<TodoItem> for TodoItemRecord {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            text: item.text,
            completed: item.completed,
            timestamp: item.completed_at,
        }
    }
}

impl TodoItem {
    /// Creates a new incomplete item with a generated id.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty or whitespace-only.
    pub fn new(text: impl Into<String>) -> Result<Self, ItemValidationError> {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates a new incomplete item with a caller-provided id.
    pub fn with_id(id: ItemId, text: impl Into<String>) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            text: text.into(),
            completed: false,
            completed_at: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks all model invariants, including non-blank text.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if is_blank(&self.text) {
            return Err(ItemValidationError::EmptyText);
        }
        self.validate_stored()
    }

    /// Checks the invariants enforced on persisted records.
    ///
    /// Blank text is only refused when an item is created or renamed; older
    /// data files may hold whitespace-only items and must still load.
    pub fn validate_stored(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        match (self.completed, self.completed_at) {
            (true, None) => Err(ItemValidationError::MissingCompletedAt),
            (false, Some(_)) => Err(ItemValidationError::UnexpectedCompletedAt),
            _ => Ok(()),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    /// Marks the item completed at `at`.
    ///
    /// Completing an already completed item keeps the original timestamp.
    pub fn mark_completed(&mut self, at: NaiveDateTime) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Reverts the item to incomplete and clears its completion timestamp.
    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// Replaces the text when `new_text` is non-blank and differs.
    ///
    /// Returns whether the text changed. Only `text` is touched.
    pub fn rename(&mut self, new_text: &str) -> bool {
        if is_blank(new_text) || new_text == self.text {
            return false;
        }
        self.text = new_text.to_string();
        true
    }

    /// Time left before this item expires, or `None` for incomplete items.
    ///
    /// The value is zero or negative once the item has expired.
    pub fn time_remaining(&self, now: NaiveDateTime) -> Option<Duration> {
        self.completed_at
            .map(|at| expiry_window() - now.signed_duration_since(at))
    }

    /// Returns whether the item is completed and past the expiry window.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.time_remaining(now)
            .is_some_and(|remaining| remaining <= Duration::zero())
    }
}

/// Returns whether `text` is empty after trimming whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{is_blank, TodoItem};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid fixture time")
    }

    #[test]
    fn blank_detection_covers_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let mut item = TodoItem::new("water plants").unwrap();
        item.mark_completed(at(8, 0));

        let just_before = at(8, 0) + Duration::hours(24) - Duration::seconds(1);
        assert!(!item.is_expired(just_before));
        assert!(item.is_expired(at(8, 0) + Duration::hours(24)));
    }

    #[test]
    fn incomplete_items_never_expire() {
        let item = TodoItem::new("someday").unwrap();
        assert!(!item.is_expired(at(8, 0) + Duration::days(365)));
        assert_eq!(item.time_remaining(at(8, 0)), None);
    }

    #[test]
    fn mark_completed_keeps_first_timestamp() {
        let mut item = TodoItem::new("stretch").unwrap();
        item.mark_completed(at(9, 0));
        item.mark_completed(at(10, 0));
        assert_eq!(item.completed_at(), Some(at(9, 0)));
    }
}
