//! Display projection of the todo list.
//!
//! # Responsibility
//! - Order items for display: incomplete first, then completed.
//! - Hide completed items whose expiry window has elapsed.
//!
//! # Invariants
//! - Ordering is an explicit two-pass partition; each group keeps its stored
//!   relative order.
//! - Projection never mutates or drops stored items.

use crate::model::item::{ItemId, TodoItem};
use chrono::NaiveDateTime;

/// One rendered row, addressed by item id rather than position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Whole hours left before expiry; `None` for incomplete items.
    pub hours_remaining: Option<i64>,
}

impl DisplayRow {
    /// Row text with the `(Nh remaining)` suffix for completed items.
    pub fn label(&self) -> String {
        match self.hours_remaining {
            Some(hours) => format!("{} ({hours}h remaining)", self.text),
            None => self.text.clone(),
        }
    }
}

/// Places incomplete items before completed ones, keeping relative order.
pub fn partition_for_display(items: &[TodoItem]) -> Vec<&TodoItem> {
    let mut ordered = Vec::with_capacity(items.len());
    ordered.extend(items.iter().filter(|item| !item.is_completed()));
    ordered.extend(items.iter().filter(|item| item.is_completed()));
    ordered
}

/// Builds the rows shown at `now`: partitioned, with expired items removed.
pub fn display_rows(items: &[TodoItem], now: NaiveDateTime) -> Vec<DisplayRow> {
    partition_for_display(items)
        .into_iter()
        .filter(|item| !item.is_expired(now))
        .map(|item| DisplayRow {
            id: item.id(),
            text: item.text().to_string(),
            completed: item.is_completed(),
            hours_remaining: item
                .time_remaining(now)
                .map(|remaining| remaining.num_seconds().div_euclid(3600)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{display_rows, partition_for_display};
    use crate::model::item::TodoItem;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn done(text: &str, at: NaiveDateTime) -> TodoItem {
        let mut item = TodoItem::new(text).unwrap();
        item.mark_completed(at);
        item
    }

    #[test]
    fn partition_keeps_group_order() {
        let items = vec![
            done("b", noon()),
            TodoItem::new("a").unwrap(),
            done("d", noon()),
            TodoItem::new("c").unwrap(),
        ];
        let texts: Vec<&str> = partition_for_display(&items)
            .into_iter()
            .map(TodoItem::text)
            .collect();
        assert_eq!(texts, ["a", "c", "b", "d"]);
    }

    #[test]
    fn hours_remaining_rounds_down() {
        let items = vec![done("laundry", noon())];
        let rows = display_rows(&items, noon() + Duration::minutes(90));
        assert_eq!(rows[0].hours_remaining, Some(22));
        assert_eq!(rows[0].label(), "laundry (22h remaining)");
    }

    #[test]
    fn last_hour_shows_zero_remaining() {
        let items = vec![done("laundry", noon())];
        let rows = display_rows(&items, noon() + Duration::hours(23) + Duration::minutes(59));
        assert_eq!(rows[0].hours_remaining, Some(0));
    }

    #[test]
    fn incomplete_label_has_no_suffix() {
        let items = vec![TodoItem::new("plain").unwrap()];
        let rows = display_rows(&items, noon());
        assert_eq!(rows[0].label(), "plain");
        assert_eq!(rows[0].hours_remaining, None);
    }
}
