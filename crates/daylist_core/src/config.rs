//! Startup configuration.
//!
//! # Responsibility
//! - Resolve the data file and log locations once at startup.
//! - Replace process-global paths with an explicit value passed to callers.
//!
//! # Invariants
//! - The default data file is `todo_data.json` next to the executable.
//! - Logs default to a `logs/` directory beside the data file.

use crate::logging::default_log_level;
use crate::store::JsonFileStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_FILE_NAME: &str = "todo_data.json";
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    /// The running executable path could not be determined.
    ExecutablePath(std::io::Error),
    /// The executable path has no parent directory.
    NoParentDir(PathBuf),
    /// The working directory could not be read to absolutize a path.
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExecutablePath(err) => write!(f, "cannot locate executable: {err}"),
            Self::NoParentDir(path) => {
                write!(f, "executable path has no parent: {}", path.display())
            }
            Self::CurrentDir(err) => write!(f, "cannot read working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ExecutablePath(err) | Self::CurrentDir(err) => Some(err),
            Self::NoParentDir(_) => None,
        }
    }
}

/// Paths and log level used by one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaylistConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl DaylistConfig {
    /// Defaults rooted in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DATA_FILE_NAME),
            log_dir: dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }

    /// Defaults rooted next to the running executable.
    pub fn beside_executable() -> Result<Self, ConfigError> {
        let exe = std::env::current_exe().map_err(ConfigError::ExecutablePath)?;
        let dir = exe
            .parent()
            .ok_or_else(|| ConfigError::NoParentDir(exe.clone()))?;
        Ok(Self::in_dir(dir))
    }

    /// Points at another data file; the log directory follows it.
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self.log_dir = match self.data_file.parent() {
            Some(parent) => parent.join(LOG_DIR_NAME),
            None => PathBuf::from(LOG_DIR_NAME),
        };
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Log directory as an absolute path, as `init_logging` requires.
    pub fn absolute_log_dir(&self) -> Result<PathBuf, ConfigError> {
        if self.log_dir.is_absolute() {
            return Ok(self.log_dir.clone());
        }
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(cwd.join(&self.log_dir))
    }

    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.data_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{DaylistConfig, DATA_FILE_NAME, LOG_DIR_NAME};
    use std::path::Path;

    #[test]
    fn in_dir_uses_default_file_names() {
        let config = DaylistConfig::in_dir("/opt/daylist");
        assert_eq!(config.data_file, Path::new("/opt/daylist").join(DATA_FILE_NAME));
        assert_eq!(config.log_dir, Path::new("/opt/daylist").join(LOG_DIR_NAME));
    }

    #[test]
    fn log_dir_follows_data_file_unless_overridden() {
        let config = DaylistConfig::in_dir("/opt/daylist").with_data_file("/srv/todo/list.json");
        assert_eq!(config.log_dir, Path::new("/srv/todo").join(LOG_DIR_NAME));

        let config = config.with_log_dir("/var/log/daylist");
        assert_eq!(config.log_dir, Path::new("/var/log/daylist"));
        assert_eq!(config.data_file, Path::new("/srv/todo/list.json"));
    }

    #[test]
    fn relative_log_dir_is_absolutized() {
        let config = DaylistConfig::in_dir("relative");
        let absolute = config.absolute_log_dir().unwrap();
        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("relative/logs"));
    }

    #[test]
    fn beside_executable_resolves_a_data_file() {
        let config = DaylistConfig::beside_executable().unwrap();
        assert!(config.data_file.ends_with(DATA_FILE_NAME));
    }
}
