//! Durable storage for journal snapshots.
//!
//! The session never talks to a storage medium directly. It hands a full
//! [`Snapshot`] to a [`PersistenceAdapter`] after every mutation and asks for
//! one back at startup.
//!
//! Loading never fails: a collection that is missing or can't be parsed comes
//! back empty, independently of the other one. Saving may fail; the session
//! logs the error and carries on.
//!
//! # Module Structure
//!
//! - `file`: [`JsonFileAdapter`], two JSON files in a data directory
//! - [`MemoryAdapter`]: serialized snapshots held in memory

pub mod file;

pub use file::JsonFileAdapter;

use crate::errors::{AppResult, PersistenceError};
use crate::store::{JournalEntry, WeeklySummary};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Collection label for daily entries, used in logs and errors.
pub const ENTRIES_COLLECTION: &str = "journalEntries";
/// Collection label for weekly reflections, used in logs and errors.
pub const SUMMARIES_COLLECTION: &str = "weeklySummaries";

/// Every record of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub entries: Vec<JournalEntry>,
    pub summaries: Vec<WeeklySummary>,
}

/// Load-all/save-all storage for journal snapshots.
pub trait PersistenceAdapter {
    /// Reads both collections. Absent or corrupt data yields empty collections.
    fn load_all(&self) -> Snapshot;

    /// Replaces the stored collections with `snapshot`.
    fn save_all(&self, snapshot: &Snapshot) -> AppResult<()>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<A> {
    fn load_all(&self) -> Snapshot {
        (**self).load_all()
    }

    fn save_all(&self, snapshot: &Snapshot) -> AppResult<()> {
        (**self).save_all(snapshot)
    }
}

/// Parses one serialized collection, substituting an empty one on failure.
pub fn decode_collection<T: DeserializeOwned>(raw: Option<&str>, collection: &str) -> Vec<T> {
    let Some(raw) = raw else {
        debug!("No stored {} snapshot, starting empty", collection);
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(records) => {
            debug!("Loaded {} {} records", records.len(), collection);
            records
        }
        Err(e) => {
            warn!(
                "Discarding malformed {} snapshot, starting empty: {}",
                collection, e
            );
            Vec::new()
        }
    }
}

/// Serializes one collection as a JSON array.
pub fn encode_collection<T: Serialize>(
    records: &[T],
    collection: &'static str,
) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(records).map_err(|source| PersistenceError::Serialize {
        collection,
        source,
    })
}

#[derive(Debug, Default)]
struct MemorySlots {
    entries: Option<String>,
    summaries: Option<String>,
    saves: usize,
}

/// Keeps serialized snapshots in memory.
///
/// Clones share the same slots, so a test can keep one handle and give the
/// other to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    slots: Arc<Mutex<MemorySlots>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the raw serialized collections, as if written by an earlier run.
    pub fn with_raw(entries: Option<&str>, summaries: Option<&str>) -> Self {
        let adapter = Self::new();
        {
            let mut slots = adapter.lock();
            slots.entries = entries.map(str::to_string);
            slots.summaries = summaries.map(str::to_string);
        }
        adapter
    }

    /// The raw serialized entries collection, if any has been written.
    pub fn raw_entries(&self) -> Option<String> {
        self.lock().entries.clone()
    }

    /// The raw serialized summaries collection, if any has been written.
    pub fn raw_summaries(&self) -> Option<String> {
        self.lock().summaries.clone()
    }

    /// How many times `save_all` has succeeded.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load_all(&self) -> Snapshot {
        let slots = self.lock();
        Snapshot {
            entries: decode_collection(slots.entries.as_deref(), ENTRIES_COLLECTION),
            summaries: decode_collection(slots.summaries.as_deref(), SUMMARIES_COLLECTION),
        }
    }

    fn save_all(&self, snapshot: &Snapshot) -> AppResult<()> {
        let entries = encode_collection(&snapshot.entries, ENTRIES_COLLECTION)?;
        let summaries = encode_collection(&snapshot.summaries, SUMMARIES_COLLECTION)?;
        let mut slots = self.lock();
        slots.entries = Some(entries);
        slots.summaries = Some(summaries);
        slots.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntryStore, ReflectionField, SummaryStore};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_snapshot() -> Snapshot {
        let mut entries = EntryStore::new();
        entries.upsert(day(2024, 6, 12), "Wednesday thoughts");
        entries.upsert(day(2024, 6, 13), "Thursday\nwith two lines");

        let mut summaries = SummaryStore::new();
        let mut draft = summaries.draft_for(day(2024, 6, 3));
        draft.set_field(ReflectionField::DifferentOrSpecial, "X");
        draft.set_field(ReflectionField::Learned, "Y");
        draft.set_field(ReflectionField::WantToLearn, "Z");
        summaries.complete(draft);

        Snapshot {
            entries: entries.to_records(),
            summaries: summaries.to_records(),
        }
    }

    #[test]
    fn test_memory_round_trip() {
        let adapter = MemoryAdapter::new();
        let snapshot = sample_snapshot();

        adapter.save_all(&snapshot).unwrap();
        assert_eq!(adapter.load_all(), snapshot);
        assert_eq!(adapter.save_count(), 1);
    }

    #[test]
    fn test_memory_empty_when_nothing_stored() {
        let adapter = MemoryAdapter::new();
        assert_eq!(adapter.load_all(), Snapshot::default());
    }

    #[test]
    fn test_malformed_collection_is_replaced_independently() {
        let adapter = MemoryAdapter::with_raw(
            Some("{not json"),
            Some(r#"[{"id":"2024-06-03","weekStartDate":"2024-06-03","weekEndDate":"2024-06-09","differentOrSpecial":"a","learned":"b","wantToLearn":"c","completed":true}]"#),
        );

        let snapshot = adapter.load_all();
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.summaries.len(), 1);
        assert!(snapshot.summaries[0].completed);
    }

    #[test]
    fn test_decode_wrong_shape_is_empty() {
        let records: Vec<JournalEntry> =
            decode_collection(Some(r#"{"id":"x"}"#), ENTRIES_COLLECTION);
        assert!(records.is_empty());

        let records: Vec<JournalEntry> = decode_collection(Some("   "), ENTRIES_COLLECTION);
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_accepts_browser_timestamps() {
        let raw = r#"[{"id":"2024-06-13T09:30:00.000","date":"2024-06-13T09:30:00.000","content":"from the web"}]"#;
        let records: Vec<JournalEntry> = decode_collection(Some(raw), ENTRIES_COLLECTION);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, day(2024, 6, 13));
        assert_eq!(records[0].id, "2024-06-13T09:30:00.000");
    }
}
