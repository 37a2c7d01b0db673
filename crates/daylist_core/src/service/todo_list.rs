//! Todo list use-case service.
//!
//! # Responsibility
//! - Provide add/complete/rename/delete/purge over an owned item sequence.
//! - Split destructive actions into request + confirmed resolution.
//! - Expose the display projection at the clock's current time.
//!
//! # Invariants
//! - Every effective mutation saves the full sequence exactly once.
//! - No-op calls (blank add, unchanged rename, declined confirmation) never
//!   save.
//! - A failed save leaves the in-memory sequence unchanged.
//! - Items are addressed by `ItemId`; positions are derived on demand.

use crate::clock::Clock;
use crate::logging::error_summary;
use crate::model::item::{ItemId, TodoItem};
use crate::store::{StoreError, TodoStore};
use crate::view::{display_rows, DisplayRow};
use chrono::NaiveDateTime;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Errors from todo list operations.
#[derive(Debug)]
pub enum ListError {
    /// The id does not name an item in the current list.
    ///
    /// Ids come from the list itself, so this signals a caller bug.
    UnknownItem(ItemId),
    /// The confirmed action no longer matches the item it was issued for.
    StaleConfirmation(ConfirmationToken),
    /// Persistence failure; the operation was not applied.
    Store(StoreError),
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownItem(id) => write!(f, "todo item not found: {id}"),
            Self::StaleConfirmation(token) => write!(
                f,
                "confirmation to {} item {} is no longer valid",
                token.action(),
                token.item_id()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ListError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Destructive action awaiting a yes/no decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Revert a completed item to incomplete.
    Reopen,
    /// Remove the item.
    Delete,
}

impl PendingAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Reopen => "reopen",
            Self::Delete => "delete",
        }
    }
}

impl Display for PendingAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle for a pending destructive action, resolved via `TodoList::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationToken {
    item_id: ItemId,
    action: PendingAction,
}

impl ConfirmationToken {
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn action(&self) -> PendingAction {
        self.action
    }
}

/// Result of `TodoList::request_complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteRequest {
    /// The item was incomplete and is now completed.
    Completed { completed_at: NaiveDateTime },
    /// The item is already completed; reverting needs confirmation.
    NeedsConfirmation(ConfirmationToken),
}

/// Result of `TodoList::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Cancelled,
}

/// Result of the one-shot `TodoList::complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    Completed { completed_at: NaiveDateTime },
    Reopened,
    Unchanged,
}

/// Owns the todo sequence and persists it through `S`.
pub struct TodoList<S: TodoStore, C: Clock> {
    store: S,
    clock: C,
    items: Vec<TodoItem>,
}

impl<S: TodoStore, C: Clock> TodoList<S, C> {
    /// Loads the persisted list.
    ///
    /// # Errors
    /// - `ListError::Store` when the document cannot be read or parsed.
    pub fn open(store: S, clock: C) -> ListResult<Self> {
        let items = store.load()?;
        info!(
            "event=list_open module=list status=ok count={}",
            items.len()
        );
        Ok(Self {
            store,
            clock,
            items,
        })
    }

    /// Items in stored order, including expired ones.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of the item in the stored sequence.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Rows to render now: incomplete first, expired items hidden.
    pub fn rows(&self) -> Vec<DisplayRow> {
        display_rows(&self.items, self.clock.now())
    }

    /// Appends a new incomplete item.
    ///
    /// Blank text is ignored and returns `Ok(None)` without saving.
    pub fn add(&mut self, text: &str) -> ListResult<Option<ItemId>> {
        let item = match TodoItem::new(text) {
            Ok(item) => item,
            Err(err) => {
                debug!("event=item_add module=list status=skipped reason={err}");
                return Ok(None);
            }
        };

        let id = item.id();
        let mut next = self.items.clone();
        next.push(item);
        self.commit("item_add", id, next)?;
        Ok(Some(id))
    }

    /// Completes an incomplete item, or asks for confirmation to reopen it.
    pub fn request_complete(&mut self, id: ItemId) -> ListResult<CompleteRequest> {
        let index = self.require(id)?;
        if self.items[index].is_completed() {
            return Ok(CompleteRequest::NeedsConfirmation(ConfirmationToken {
                item_id: id,
                action: PendingAction::Reopen,
            }));
        }

        let completed_at = self.clock.now();
        let mut next = self.items.clone();
        next[index].mark_completed(completed_at);
        self.commit("item_complete", id, next)?;
        Ok(CompleteRequest::Completed { completed_at })
    }

    /// Issues a token for deleting `id`; nothing changes until resolved.
    pub fn request_delete(&self, id: ItemId) -> ListResult<ConfirmationToken> {
        self.require(id)?;
        Ok(ConfirmationToken {
            item_id: id,
            action: PendingAction::Delete,
        })
    }

    /// Applies a pending action when `confirmed`, otherwise drops it.
    ///
    /// # Errors
    /// - `StaleConfirmation` when the target is gone or, for reopen, no longer
    ///   completed.
    /// - `Store` when saving fails; the list is left unchanged.
    pub fn resolve(&mut self, token: ConfirmationToken, confirmed: bool) -> ListResult<Resolution> {
        if !confirmed {
            debug!(
                "event=confirmation module=list status=cancelled action={} item_id={}",
                token.action, token.item_id
            );
            return Ok(Resolution::Cancelled);
        }

        let index = match self.index_of(token.item_id) {
            Some(index) => index,
            None => return Err(self.stale(token)),
        };

        let mut next = self.items.clone();
        match token.action {
            PendingAction::Reopen => {
                if !next[index].is_completed() {
                    return Err(self.stale(token));
                }
                next[index].mark_incomplete();
                self.commit("item_reopen", token.item_id, next)?;
            }
            PendingAction::Delete => {
                next.remove(index);
                self.commit("item_delete", token.item_id, next)?;
            }
        }
        Ok(Resolution::Applied)
    }

    /// Toggles completion with a decision already in hand.
    ///
    /// `confirmed` is consulted only when reverting a completed item.
    pub fn complete(&mut self, id: ItemId, confirmed: bool) -> ListResult<CompleteOutcome> {
        match self.request_complete(id)? {
            CompleteRequest::Completed { completed_at } => {
                Ok(CompleteOutcome::Completed { completed_at })
            }
            CompleteRequest::NeedsConfirmation(token) => match self.resolve(token, confirmed)? {
                Resolution::Applied => Ok(CompleteOutcome::Reopened),
                Resolution::Cancelled => Ok(CompleteOutcome::Unchanged),
            },
        }
    }

    /// Deletes `id` when `confirmed`. Returns whether the item was removed.
    pub fn delete(&mut self, id: ItemId, confirmed: bool) -> ListResult<bool> {
        let token = self.request_delete(id)?;
        Ok(self.resolve(token, confirmed)? == Resolution::Applied)
    }

    /// Renames `id` when `new_text` is non-blank and differs.
    ///
    /// Returns whether the text changed; unchanged calls do not save.
    pub fn rename(&mut self, id: ItemId, new_text: &str) -> ListResult<bool> {
        let index = self.require(id)?;
        let mut next = self.items.clone();
        if !next[index].rename(new_text) {
            debug!("event=item_rename module=list status=skipped item_id={id}");
            return Ok(false);
        }
        self.commit("item_rename", id, next)?;
        Ok(true)
    }

    /// Removes expired completed items from storage.
    ///
    /// Display already hides them; this reclaims them from the document.
    /// Returns the number removed and saves only when it is non-zero.
    pub fn purge_expired(&mut self) -> ListResult<usize> {
        let now = self.clock.now();
        let next: Vec<TodoItem> = self
            .items
            .iter()
            .filter(|item| !item.is_expired(now))
            .cloned()
            .collect();
        let removed = self.items.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.store.save(&next).map_err(|err| {
            error!(
                "event=list_purge module=list status=error error={}",
                error_summary(&err)
            );
            ListError::Store(err)
        })?;
        self.items = next;
        info!("event=list_purge module=list status=ok removed={removed}");
        Ok(removed)
    }

    fn require(&self, id: ItemId) -> ListResult<usize> {
        self.index_of(id).ok_or_else(|| {
            error!(
                "event=item_lookup module=list status=error error_code=unknown_item item_id={id}"
            );
            ListError::UnknownItem(id)
        })
    }

    fn stale(&self, token: ConfirmationToken) -> ListError {
        error!(
            "event=confirmation module=list status=error error_code=stale_confirmation action={} item_id={}",
            token.action, token.item_id
        );
        ListError::StaleConfirmation(token)
    }

    fn commit(&mut self, event: &str, id: ItemId, next: Vec<TodoItem>) -> ListResult<()> {
        match self.store.save(&next) {
            Ok(()) => {
                self.items = next;
                info!(
                    "event={event} module=list status=ok item_id={id} count={}",
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=list status=error item_id={id} error_code=store_failed error={}",
                    error_summary(&err)
                );
                Err(err.into())
            }
        }
    }
}
