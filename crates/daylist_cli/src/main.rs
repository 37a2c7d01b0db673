//! Terminal front-end for daylist.
//!
//! # Responsibility
//! - Parse command-line input into list operations.
//! - Resolve startup configuration and initialize logging.
//! - Ask the user before destructive actions and render the list afterwards.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daylist_core::{init_logging, DaylistConfig, SystemClock, TodoList};
use log::info;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "daylist")]
#[command(about = "Todo list whose completed items fade out after a day", long_about = None)]
struct Cli {
    /// Data file to use instead of todo_data.json next to the executable
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, value_name = "PATH")]
    log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the list (default)
    List,
    /// Add an item
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Complete an item, or reopen a completed one after confirmation
    Toggle {
        /// Row number as shown by `list`
        row: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename an item
    Rename {
        row: usize,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete an item after confirmation
    Delete {
        row: usize,
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove expired completed items from the data file
    Purge,
}

fn resolve_config(cli: &Cli) -> Result<DaylistConfig> {
    let mut config = DaylistConfig::beside_executable()?;
    if let Some(path) = &cli.data_file {
        config = config.with_data_file(path.clone());
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level.clone());
    }
    Ok(config)
}

fn start_logging(config: &DaylistConfig) {
    let result = config
        .absolute_log_dir()
        .map_err(|err| err.to_string())
        .and_then(|dir| init_logging(&config.log_level, &dir));
    if let Err(err) = result {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    start_logging(&config);
    info!(
        "event=cli_start module=cli status=ok data_file={}",
        config.data_file.display()
    );

    let mut list = TodoList::open(config.open_store(), SystemClock).with_context(|| {
        format!(
            "failed to load todo list from {}",
            config.data_file.display()
        )
    })?;

    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { text } => commands::add(&mut list, &text.join(" "))?,
        Command::Toggle { row, yes } => commands::toggle(&mut list, row, yes)?,
        Command::Rename { row, text } => commands::rename(&mut list, row, &text.join(" "))?,
        Command::Delete { row, yes } => commands::delete(&mut list, row, yes)?,
        Command::Purge => commands::purge(&mut list)?,
    }

    commands::print_rows(&list.rows());
    Ok(())
}
