//! Weekly reflection store.
//!
//! Summaries are keyed by the first day of their week. A week's reflection
//! only becomes a stored record when it is completed; before that it lives as
//! a draft handed out by [`SummaryStore::draft_for`].

use crate::calendar::{week_end, week_start};
use crate::constants::DATE_FORMAT_ISO;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The three free-text prompts of a weekly reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionField {
    /// "Did you do something different or special last week?"
    DifferentOrSpecial,
    /// "Is there something you learned?"
    Learned,
    /// "What do you want to learn next week?"
    WantToLearn,
}

impl ReflectionField {
    /// The question shown to the user for this field.
    pub fn prompt(&self) -> &'static str {
        match self {
            ReflectionField::DifferentOrSpecial => {
                "Did you do something different or special last week?"
            }
            ReflectionField::Learned => "Is there something you learned?",
            ReflectionField::WantToLearn => "What do you want to learn next week?",
        }
    }
}

/// A week's structured reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub id: String,
    #[serde(with = "super::calendar_day")]
    pub week_start_date: NaiveDate,
    #[serde(with = "super::calendar_day")]
    pub week_end_date: NaiveDate,
    #[serde(default)]
    pub different_or_special: String,
    #[serde(default)]
    pub learned: String,
    #[serde(default)]
    pub want_to_learn: String,
    /// Once set, never cleared.
    #[serde(default)]
    pub completed: bool,
}

impl WeeklySummary {
    /// An empty, incomplete reflection for the week beginning on `week_start`.
    pub fn draft(week_start: NaiveDate) -> Self {
        WeeklySummary {
            id: week_start.format(DATE_FORMAT_ISO).to_string(),
            week_start_date: week_start,
            week_end_date: week_end(week_start),
            different_or_special: String::new(),
            learned: String::new(),
            want_to_learn: String::new(),
            completed: false,
        }
    }

    pub fn field(&self, field: ReflectionField) -> &str {
        match field {
            ReflectionField::DifferentOrSpecial => &self.different_or_special,
            ReflectionField::Learned => &self.learned,
            ReflectionField::WantToLearn => &self.want_to_learn,
        }
    }

    /// Overwrites one text field. Callers are responsible for respecting the
    /// completion lock.
    pub fn set_field(&mut self, field: ReflectionField, value: &str) {
        let slot = match field {
            ReflectionField::DifferentOrSpecial => &mut self.different_or_special,
            ReflectionField::Learned => &mut self.learned,
            ReflectionField::WantToLearn => &mut self.want_to_learn,
        };
        *slot = value.to_string();
    }
}

/// Keyed collection of completed weekly reflections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStore {
    summaries: BTreeMap<NaiveDate, WeeklySummary>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted records.
    ///
    /// Records that share a week start collapse into one; a completed record
    /// is never displaced by an incomplete one.
    pub fn from_records(records: Vec<WeeklySummary>) -> Self {
        let mut summaries: BTreeMap<NaiveDate, WeeklySummary> = BTreeMap::new();
        for record in records {
            let week = record.week_start_date;
            let existing_completed = summaries.get(&week).map(|existing| existing.completed);
            match existing_completed {
                Some(true) if !record.completed => {
                    warn!("Ignoring incomplete duplicate summary for week {}", week);
                    continue;
                }
                Some(_) => warn!("Replacing duplicate summary for week {}", week),
                None => {}
            }
            summaries.insert(week, record);
        }
        SummaryStore { summaries }
    }

    /// Returns the records in ascending week order, ready to persist.
    pub fn to_records(&self) -> Vec<WeeklySummary> {
        self.summaries.values().cloned().collect()
    }

    pub fn get(&self, week_start: NaiveDate) -> Option<&WeeklySummary> {
        self.summaries.get(&week_start)
    }

    /// Stored week starts that aren't the first day of a week under
    /// `week_starts_on`. [`Self::draft_for`] never reaches those records.
    pub fn misaligned_weeks(&self, week_starts_on: Weekday) -> Vec<NaiveDate> {
        self.summaries
            .keys()
            .copied()
            .filter(|&week| week_start(week, week_starts_on) != week)
            .collect()
    }

    /// Returns the stored summary for the week, or a fresh draft.
    ///
    /// The draft is not inserted.
    pub fn draft_for(&self, week_start: NaiveDate) -> WeeklySummary {
        self.summaries
            .get(&week_start)
            .cloned()
            .unwrap_or_else(|| WeeklySummary::draft(week_start))
    }

    /// Stores `draft` as a completed reflection.
    ///
    /// Any incomplete record for the same week is replaced wholesale. A week
    /// that is already completed keeps its stored values and the draft is
    /// discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use mejournal::store::{ReflectionField, SummaryStore};
    ///
    /// let week = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    /// let mut store = SummaryStore::new();
    ///
    /// let mut draft = store.draft_for(week);
    /// draft.set_field(ReflectionField::Learned, "patience");
    /// store.complete(draft);
    ///
    /// let stored = store.draft_for(week);
    /// assert!(stored.completed);
    /// assert_eq!(stored.learned, "patience");
    /// ```
    pub fn complete(&mut self, draft: WeeklySummary) -> &WeeklySummary {
        let week = draft.week_start_date;
        if self.summaries.get(&week).is_some_and(|s| s.completed) {
            debug!("Week {} already completed, keeping stored reflection", week);
        } else {
            debug!("Completing reflection for week {}", week);
            self.summaries.insert(
                week,
                WeeklySummary {
                    completed: true,
                    ..draft
                },
            );
        }
        &self.summaries[&week]
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
