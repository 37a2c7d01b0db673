//! JSON document store on the local filesystem.
//!
//! # Responsibility
//! - Read and write the todo list as one JSON array.
//! - Replace the document through temp file + fsync + rename.
//!
//! # Invariants
//! - Readers never observe a half-written document.
//! - Item text is never logged; events carry counts and durations only.

use super::{ensure_unique_ids, StoreError, StoreResult, TodoStore};
use crate::logging::error_summary;
use crate::model::item::TodoItem;
use log::{error, info};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Todo store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&self) -> StoreResult<Vec<TodoItem>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<TodoItem> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        ensure_unique_ids(&items)?;
        Ok(items)
    }

    fn write_document(&self, items: &[TodoItem]) -> StoreResult<()> {
        let payload = serde_json::to_vec(items).map_err(StoreError::Serialize)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|err| self.io_error(err))?;
        temp.write_all(&payload)
            .map_err(|err| self.io_error(err))?;
        temp.as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        temp.persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl TodoStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        let started_at = Instant::now();
        match self.read_document() {
            Ok(items) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(items)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    error_summary(&err)
                );
                Err(err)
            }
        }
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_document(items) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok count={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error count={} duration_ms={} error={}",
                    items.len(),
                    started_at.elapsed().as_millis(),
                    error_summary(&err)
                );
                Err(err)
            }
        }
    }
}
