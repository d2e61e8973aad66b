/*!
# mejournal

mejournal records one free-text entry per calendar day and, once a week has
passed, a structured weekly reflection on it.

## Core Features

- One entry per calendar day, created on first save and updated in place after
- Week windows starting on a configurable weekday, classified as past, current or future
- Weekly reflections that can only be completed once their week has elapsed, and
  are read-only afterwards
- Whole-snapshot persistence after every change, tolerant of missing or corrupt data

## Architecture

- `calendar`: Pure week and day arithmetic, plus the `Clock` capability
- `store`: Keyed entry and weekly summary collections
- `session`: Selection state and the mutation API the front end calls
- `persistence`: Load-all/save-all adapters (JSON files, in-memory)
- `config`, `errors`, `cli`: Configuration, error types and the command-line front end

## Usage Example

```rust,no_run
use mejournal::persistence::JsonFileAdapter;
use mejournal::session::{JournalSession, SessionOptions};
use mejournal::Config;

fn main() -> mejournal::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let adapter = JsonFileAdapter::open(&config.data_dir)?;
    let options = SessionOptions {
        week_starts_on: config.week_starts_on,
        ..SessionOptions::default()
    };
    let mut session = JournalSession::init(adapter, options);
    let _ = session.save_active_entry("Went for a long walk.");
    session.close();
    Ok(())
}
```
*/

/// Week boundaries, day offsets and week classification
pub mod calendar;
/// Command-line argument parsing and text rendering
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Snapshot persistence adapters
pub mod persistence;
/// Journal session orchestration
pub mod session;
/// Entry and weekly summary stores
pub mod store;

// Re-export important types for convenience
pub use calendar::WeekClass;
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use session::JournalSession;
