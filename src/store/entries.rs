//! Daily entry store.
//!
//! Entries are keyed by calendar day. Writing to a day that already has an
//! entry replaces its content in place, so the store can never hold two
//! entries for the same day.

use crate::calendar::{week_end, week_start};
use crate::constants::DATE_FORMAT_ISO;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A single day's free-text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Stable identifier assigned when the entry is first created.
    pub id: String,
    /// The calendar day this entry belongs to.
    #[serde(with = "super::calendar_day")]
    pub date: NaiveDate,
    pub content: String,
}

impl JournalEntry {
    fn new(date: NaiveDate, content: &str) -> Self {
        JournalEntry {
            id: entry_id_for(date),
            date,
            content: content.to_string(),
        }
    }
}

/// Derives the identifier of a newly created entry from its day.
pub fn entry_id_for(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_ISO).to_string()
}

/// Keyed collection of daily entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: BTreeMap<NaiveDate, JournalEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted records.
    ///
    /// Records that share a day collapse into one; the later record wins.
    pub fn from_records(records: Vec<JournalEntry>) -> Self {
        let mut entries = BTreeMap::new();
        for record in records {
            if let Some(previous) = entries.insert(record.date, record) {
                warn!(
                    "Dropping duplicate entry {} for {}",
                    previous.id, previous.date
                );
            }
        }
        EntryStore { entries }
    }

    /// Returns the records in ascending day order, ready to persist.
    pub fn to_records(&self) -> Vec<JournalEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn get(&self, day: NaiveDate) -> Option<&JournalEntry> {
        self.entries.get(&day)
    }

    pub fn has(&self, day: NaiveDate) -> bool {
        self.entries.contains_key(&day)
    }

    /// Writes `content` to the entry for `day`.
    ///
    /// An existing entry keeps its id and has its content replaced. A missing
    /// entry is created only when `content` has something besides whitespace;
    /// otherwise nothing changes and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use mejournal::store::EntryStore;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
    /// let mut store = EntryStore::new();
    ///
    /// assert!(store.upsert(day, "   ").is_none());
    /// assert!(!store.has(day));
    ///
    /// store.upsert(day, "first draft");
    /// let entry = store.upsert(day, "second draft").unwrap();
    /// assert_eq!(entry.content, "second draft");
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn upsert(&mut self, day: NaiveDate, content: &str) -> Option<&JournalEntry> {
        if !self.entries.contains_key(&day) && content.trim().is_empty() {
            debug!("Skipping blank entry for {}", day);
            return None;
        }

        let entry = self
            .entries
            .entry(day)
            .and_modify(|existing| {
                debug!("Updating entry {} for {}", existing.id, day);
                existing.content = content.to_string();
            })
            .or_insert_with(|| {
                debug!("Creating entry for {}", day);
                JournalEntry::new(day, content)
            });
        Some(&*entry)
    }

    /// Iterates entries in ascending day order.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.values()
    }

    /// Entries that fall inside the week containing `day`.
    pub fn entries_in_week(
        &self,
        day: NaiveDate,
        week_starts_on: Weekday,
    ) -> impl Iterator<Item = &JournalEntry> {
        let start = week_start(day, week_starts_on);
        self.entries.range(start..=week_end(start)).map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
