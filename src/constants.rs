//! Constants used throughout the application.
//!
//! This module contains all constants used in the mejournal application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mejournal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Capture your thoughts each day, reflect each week";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_MEJOURNAL_DIR: &str = "MEJOURNAL_DIR";
/// Environment variable for specifying the weekday a week starts on.
pub const ENV_VAR_WEEK_START: &str = "MEJOURNAL_WEEK_START";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the data directory within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Documents/mejournal";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Snapshot file holding daily entries.
pub const ENTRIES_FILE_NAME: &str = "journal_entries.json";
/// Snapshot file holding weekly reflections.
pub const SUMMARIES_FILE_NAME: &str = "weekly_summaries.json";
/// Advisory lock file guarding snapshot writes.
pub const LOCK_FILE_NAME: &str = ".mejournal.lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Long date format used when printing a single day.
pub const DATE_FORMAT_LONG: &str = "%A, %B %-d, %Y";
/// Number of days in a week window.
pub const DAYS_PER_WEEK: i64 = 7;
/// A week whose start lies more than this many days before today is past.
pub const PAST_WEEK_THRESHOLD_DAYS: i64 = 7;

// Notifications
/// How long a notification should stay visible, in milliseconds.
pub const NOTIFICATION_DURATION_MS: u64 = 3000;
/// Title of the notification emitted after an entry is saved.
pub const ENTRY_SAVED_TITLE: &str = "Entry saved!";
/// Body of the notification emitted after an entry is saved.
pub const ENTRY_SAVED_DESCRIPTION: &str =
    "The entry was saved, you're one step closer to your goal.";
/// Title of the notification emitted after a weekly reflection is completed.
pub const REFLECTION_COMPLETED_TITLE: &str = "Weekly reflection completed!";
/// Body of the notification emitted after a weekly reflection is completed.
pub const REFLECTION_COMPLETED_DESCRIPTION: &str =
    "Great job reflecting on your week and setting intentions for the next.";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "mejournal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
