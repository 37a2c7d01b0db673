//! Command handlers and terminal rendering.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use daylist_core::{
    CompleteRequest, DisplayRow, ItemId, Resolution, SystemClock, TodoList, TodoStore,
};
use std::io::{self, BufRead, Write};

type List<S> = TodoList<S, SystemClock>;

pub fn add<S: TodoStore>(list: &mut List<S>, text: &str) -> Result<()> {
    if list.add(text).context("failed to save todo list")?.is_none() {
        eprintln!("nothing to add");
    }
    Ok(())
}

pub fn toggle<S: TodoStore>(list: &mut List<S>, row: usize, assume_yes: bool) -> Result<()> {
    let id = row_id(&list.rows(), row)?;
    match list.request_complete(id).context("failed to save todo list")? {
        CompleteRequest::Completed { .. } => {}
        CompleteRequest::NeedsConfirmation(token) => {
            let confirmed = confirm("Mark this item as unfinished?", assume_yes)?;
            list.resolve(token, confirmed)
                .context("failed to save todo list")?;
        }
    }
    Ok(())
}

pub fn rename<S: TodoStore>(list: &mut List<S>, row: usize, text: &str) -> Result<()> {
    let id = row_id(&list.rows(), row)?;
    list.rename(id, text).context("failed to save todo list")?;
    Ok(())
}

pub fn delete<S: TodoStore>(list: &mut List<S>, row: usize, assume_yes: bool) -> Result<()> {
    let id = row_id(&list.rows(), row)?;
    let token = list
        .request_delete(id)
        .context("failed to prepare delete")?;
    let confirmed = confirm("Delete this item?", assume_yes)?;
    if list.resolve(token, confirmed).context("failed to save todo list")? == Resolution::Cancelled
    {
        eprintln!("kept");
    }
    Ok(())
}

pub fn purge<S: TodoStore>(list: &mut List<S>) -> Result<()> {
    let removed = list.purge_expired().context("failed to save todo list")?;
    eprintln!("purged {removed} expired item(s)");
    Ok(())
}

pub fn print_rows(rows: &[DisplayRow]) {
    if rows.is_empty() {
        println!("{}", "nothing to do".dimmed());
        return;
    }
    for (index, row) in rows.iter().enumerate() {
        println!("{}", format_row(index + 1, row));
    }
}

fn format_row(number: usize, row: &DisplayRow) -> String {
    if row.completed {
        format!(
            "{number:>3}. {} {}",
            "✓".green(),
            row.label().strikethrough().dimmed()
        )
    } else {
        format!("{number:>3}. {} {}", "·", row.label())
    }
}

/// Maps a 1-based row number from the rendered list to an item id.
fn row_id(rows: &[DisplayRow], row: usize) -> Result<ItemId> {
    match row.checked_sub(1).and_then(|index| rows.get(index)) {
        Some(found) => Ok(found.id),
        None => bail!("no row {row}; the list has {} row(s)", rows.len()),
    }
}

fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
