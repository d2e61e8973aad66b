//! Configuration management for the mejournal application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MEJOURNAL_DIR`: Path to the data directory (defaults to ~/Documents/mejournal)
//! - `MEJOURNAL_WEEK_START`: Weekday weeks start on, e.g. `monday` or `sun` (defaults to Monday)
//! - `HOME`: Used for expanding the default data directory path

use crate::calendar::parse_weekday;
use crate::constants::{
    DEFAULT_DATA_SUBDIR, ENV_VAR_HOME, ENV_VAR_MEJOURNAL_DIR, ENV_VAR_WEEK_START,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use chrono::Weekday;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the mejournal application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use chrono::Weekday;
/// use mejournal::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/journal"),
///     week_starts_on: Weekday::Sun,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory where the entry and summary snapshots are stored.
    pub data_dir: PathBuf,

    /// The weekday every week window starts on.
    pub week_starts_on: Weekday,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("week_starts_on", &self.week_starts_on)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            week_starts_on: Weekday::Mon,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand`, so `~` and
    /// `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - `MEJOURNAL_WEEK_START` is set but isn't a weekday name
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_MEJOURNAL_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let week_starts_on = match env::var(ENV_VAR_WEEK_START) {
            Ok(raw) if !raw.trim().is_empty() => parse_weekday(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "Invalid {} value '{}'. Use a weekday name such as 'monday' or 'sun'",
                    ENV_VAR_WEEK_START, raw
                ))
            })?,
            _ => Weekday::Mon,
        };

        Ok(Config {
            data_dir,
            week_starts_on,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the data directory is empty or relative.
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}
