//! In-memory keyed collections for daily entries and weekly reflections.
//!
//! # Module Structure
//!
//! - `entries`: one [`JournalEntry`] per calendar day, upserted by day
//! - `summaries`: one [`WeeklySummary`] per week start, with a one-way
//!   completion flag
//!
//! Both stores are plain owned collections. Nothing here touches the disk;
//! [`crate::persistence`] moves whole snapshots in and out.

pub mod entries;
pub mod summaries;

pub use entries::{EntryStore, JournalEntry};
pub use summaries::{ReflectionField, SummaryStore, WeeklySummary};

/// Serde adapter for calendar-day fields.
///
/// Writes `YYYY-MM-DD`. Reads that form, a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp, or an RFC 3339 timestamp, which is projected onto the local
/// calendar day.
pub(crate) mod calendar_day {
    use crate::calendar::local_day;
    use crate::constants::DATE_FORMAT_ISO;
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT_ISO))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid calendar day: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO) {
            return Some(date);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(local_day(&instant));
        }
        raw.parse::<NaiveDateTime>().ok().map(|naive| naive.date())
    }

}
