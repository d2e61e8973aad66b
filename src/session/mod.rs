//! The journal session: selection state and the mutation API.
//!
//! A [`JournalSession`] owns both stores, rehydrated once from a
//! [`PersistenceAdapter`] at [`JournalSession::init`]. Every mutation reads
//! the authoritative stores, writes a full snapshot back through the adapter,
//! and then recomputes the derived views (the active entry buffer and the
//! active weekly summary). Nothing is cached apart from those two views.
//!
//! Actions the user isn't allowed to take right now are not errors. They come
//! back as [`Outcome::Skipped`] with a [`SkipReason`] and leave the state
//! untouched.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use mejournal::calendar::FixedClock;
//! use mejournal::persistence::MemoryAdapter;
//! use mejournal::session::{
//!     Direction, JournalSession, Outcome, SessionOptions, SilentNotifier, SkipReason,
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
//! let options = SessionOptions {
//!     clock: Box::new(FixedClock(today)),
//!     notifier: Box::new(SilentNotifier),
//!     week_starts_on: Weekday::Mon,
//! };
//! let mut session = JournalSession::init(MemoryAdapter::new(), options);
//!
//! assert_eq!(session.save_active_entry("A good day."), Outcome::Applied);
//! assert!(session.has_entry(today));
//! assert_eq!(
//!     session.navigate_day(Direction::Forward),
//!     Outcome::Skipped(SkipReason::AtToday)
//! );
//! ```

pub mod notify;

pub use notify::{LogNotifier, Notification, Notifier, SilentNotifier};

use crate::calendar::{
    add_days, add_weeks, classify_week, sub_days, sub_weeks, week_days, week_end, week_start,
    Clock, SystemClock, WeekClass,
};
use crate::persistence::{PersistenceAdapter, Snapshot};
use crate::store::{EntryStore, JournalEntry, ReflectionField, SummaryStore, WeeklySummary};
use chrono::{NaiveDate, Weekday};
use tracing::{debug, info, warn};

/// Which way to move the day or week cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Why an action was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry text was empty or whitespace only.
    BlankContent,
    /// The selected day is today; the session doesn't step past it.
    AtToday,
    /// The week cursor is on the current week; the session doesn't step past it.
    AtCurrentWeek,
    /// Reflections can only be completed once their week has elapsed.
    WeekNotElapsed,
    /// The reflection is completed and read-only.
    ReflectionLocked,
    /// The move would leave the representable calendar.
    OutOfRange,
}

/// Result of a session action.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// What the weekly reflection panel should offer for the active week.
///
/// Time moves a week from `Future` to `Current` to `PastIncomplete`; only
/// completing the reflection moves it to `PastComplete`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionState {
    Future,
    Current,
    PastIncomplete,
    PastComplete,
}

impl ReflectionState {
    /// True when the three reflection fields accept input.
    pub fn is_editable(&self) -> bool {
        matches!(self, ReflectionState::PastIncomplete)
    }
}

/// One day of the week strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatus {
    pub day: NaiveDate,
    pub has_entry: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Everything the presentation layer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub today: NaiveDate,
    pub selected_day: NaiveDate,
    pub active_entry_content: String,
    pub current_week_start: NaiveDate,
    pub current_week_end: NaiveDate,
    pub active_summary: WeeklySummary,
    pub week_class: WeekClass,
    pub reflection_state: ReflectionState,
    pub can_go_forward: bool,
    pub can_go_forward_week: bool,
    pub week_days: Vec<DayStatus>,
}

/// Collaborators and conventions a session is built with.
pub struct SessionOptions {
    pub clock: Box<dyn Clock>,
    pub notifier: Box<dyn Notifier>,
    pub week_starts_on: Weekday,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
            week_starts_on: Weekday::Mon,
        }
    }
}

/// Selection state plus the entry and summary stores.
pub struct JournalSession<A: PersistenceAdapter> {
    adapter: A,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    week_starts_on: Weekday,
    entries: EntryStore,
    summaries: SummaryStore,
    selected_day: NaiveDate,
    current_week_start: NaiveDate,
    active_entry_content: String,
    active_summary: WeeklySummary,
    /// Set while a store mutation has not reached the adapter.
    unsaved: bool,
}

impl<A: PersistenceAdapter> JournalSession<A> {
    /// Loads both collections from `adapter` and selects today.
    pub fn init(adapter: A, options: SessionOptions) -> Self {
        let snapshot = adapter.load_all();
        let entries = EntryStore::from_records(snapshot.entries);
        let summaries = SummaryStore::from_records(snapshot.summaries);
        info!(
            "Session loaded {} entries and {} weekly summaries",
            entries.len(),
            summaries.len()
        );
        for week in summaries.misaligned_weeks(options.week_starts_on) {
            warn!(
                "Weekly summary for {} doesn't start on {}, it won't be shown",
                week, options.week_starts_on
            );
        }

        let today = options.clock.today();
        let current_week_start = week_start(today, options.week_starts_on);
        let mut session = JournalSession {
            adapter,
            clock: options.clock,
            notifier: options.notifier,
            week_starts_on: options.week_starts_on,
            entries,
            summaries,
            selected_day: today,
            current_week_start,
            active_entry_content: String::new(),
            active_summary: WeeklySummary::draft(current_week_start),
            unsaved: false,
        };
        session.select_day(today);
        session
    }

    /// Ends the session and hands the adapter back.
    ///
    /// Retries the snapshot write only if the last one failed; a session
    /// without mutations never writes.
    pub fn close(mut self) -> A {
        debug!("Closing journal session");
        if self.unsaved {
            self.persist();
        }
        self.adapter
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn week_starts_on(&self) -> Weekday {
        self.week_starts_on
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    /// The entry text for the selected day, including unsaved edits.
    pub fn active_entry_content(&self) -> &str {
        &self.active_entry_content
    }

    pub fn current_week_start(&self) -> NaiveDate {
        self.current_week_start
    }

    pub fn current_week_end(&self) -> NaiveDate {
        week_end(self.current_week_start)
    }

    /// The reflection for the week under the cursor: stored or draft.
    pub fn active_summary(&self) -> &WeeklySummary {
        &self.active_summary
    }

    /// False while the selected day is today.
    pub fn can_go_forward(&self) -> bool {
        self.selected_day != self.today()
    }

    /// False while the week cursor is on the current week.
    pub fn can_go_forward_week(&self) -> bool {
        self.week_class() != WeekClass::Current
    }

    pub fn week_class(&self) -> WeekClass {
        classify_week(self.current_week_start, self.today(), self.week_starts_on)
    }

    pub fn reflection_state(&self) -> ReflectionState {
        match self.week_class() {
            WeekClass::Future => ReflectionState::Future,
            WeekClass::Current => ReflectionState::Current,
            WeekClass::Past if self.active_summary.completed => ReflectionState::PastComplete,
            WeekClass::Past => ReflectionState::PastIncomplete,
        }
    }

    pub fn is_today(&self, day: NaiveDate) -> bool {
        day == self.today()
    }

    pub fn has_entry(&self, day: NaiveDate) -> bool {
        self.entries.has(day)
    }

    pub fn entry_for(&self, day: NaiveDate) -> Option<&JournalEntry> {
        self.entries.get(day)
    }

    pub fn entry_store(&self) -> &EntryStore {
        &self.entries
    }

    pub fn summary_store(&self) -> &SummaryStore {
        &self.summaries
    }

    /// The seven days of the week under the cursor with their entry markers.
    pub fn week_days(&self) -> Vec<DayStatus> {
        let today = self.today();
        week_days(self.current_week_start)
            .into_iter()
            .map(|day| DayStatus {
                day,
                has_entry: self.entries.has(day),
                is_today: day == today,
                is_selected: day == self.selected_day,
            })
            .collect()
    }

    /// A snapshot of every derived value, recomputed now.
    pub fn view(&self) -> SessionView {
        SessionView {
            today: self.today(),
            selected_day: self.selected_day,
            active_entry_content: self.active_entry_content.clone(),
            current_week_start: self.current_week_start,
            current_week_end: self.current_week_end(),
            active_summary: self.active_summary.clone(),
            week_class: self.week_class(),
            reflection_state: self.reflection_state(),
            can_go_forward: self.can_go_forward(),
            can_go_forward_week: self.can_go_forward_week(),
            week_days: self.week_days(),
        }
    }

    /// Selects `day` and moves the week cursor to the week containing it.
    ///
    /// Reloads the entry buffer and the active summary from the stores,
    /// discarding unsaved edits to either.
    pub fn select_day(&mut self, day: NaiveDate) {
        debug!("Selecting {}", day);
        self.selected_day = day;
        self.current_week_start = week_start(day, self.week_starts_on);
        self.refresh_active_entry();
        self.refresh_active_summary();
    }

    /// Replaces the unsaved entry buffer without touching the store.
    pub fn edit_active_entry(&mut self, content: &str) {
        self.active_entry_content = content.to_string();
    }

    /// Saves `content` as the entry for the selected day.
    pub fn save_active_entry(&mut self, content: &str) -> Outcome {
        if content.trim().is_empty() {
            debug!("Not saving blank entry for {}", self.selected_day);
            return Outcome::Skipped(SkipReason::BlankContent);
        }

        self.entries.upsert(self.selected_day, content);
        info!("Saved entry for {}", self.selected_day);
        self.persist();
        self.refresh_active_entry();
        self.notifier.notify(&Notification::entry_saved());
        Outcome::Applied
    }

    /// Saves whatever is in the entry buffer.
    pub fn save_edited_entry(&mut self) -> Outcome {
        let content = self.active_entry_content.clone();
        self.save_active_entry(&content)
    }

    /// Moves the selection one day. Forward is refused while on today.
    pub fn navigate_day(&mut self, direction: Direction) -> Outcome {
        let target = match direction {
            Direction::Backward => sub_days(self.selected_day, 1),
            Direction::Forward if !self.can_go_forward() => {
                return Outcome::Skipped(SkipReason::AtToday);
            }
            Direction::Forward => add_days(self.selected_day, 1),
        };
        match target {
            Some(day) => {
                self.select_day(day);
                Outcome::Applied
            }
            None => Outcome::Skipped(SkipReason::OutOfRange),
        }
    }

    /// Moves the week cursor one week, leaving the selected day alone.
    /// Forward is refused while on the current week.
    pub fn navigate_week(&mut self, direction: Direction) -> Outcome {
        let target = match direction {
            Direction::Backward => sub_weeks(self.current_week_start, 1),
            Direction::Forward if !self.can_go_forward_week() => {
                return Outcome::Skipped(SkipReason::AtCurrentWeek);
            }
            Direction::Forward => add_weeks(self.current_week_start, 1),
        };
        let Some(target) = target else {
            return Outcome::Skipped(SkipReason::OutOfRange);
        };
        self.current_week_start = target;
        debug!("Week cursor moved to {}", self.current_week_start);
        self.refresh_active_summary();
        Outcome::Applied
    }

    /// Changes one field of the active reflection draft.
    pub fn update_draft_field(&mut self, field: ReflectionField, value: &str) -> Outcome {
        if self.active_summary.completed {
            return Outcome::Skipped(SkipReason::ReflectionLocked);
        }
        self.active_summary.set_field(field, value);
        Outcome::Applied
    }

    /// Stores the active draft as the completed reflection for its week.
    ///
    /// Refused when the reflection is already completed or the week has not
    /// yet elapsed.
    pub fn complete_weekly_reflection(&mut self) -> Outcome {
        if self.active_summary.completed {
            return Outcome::Skipped(SkipReason::ReflectionLocked);
        }
        let class = self.week_class();
        if class != WeekClass::Past {
            debug!(
                "Week {} is {:?}, reflection not completable yet",
                self.current_week_start, class
            );
            return Outcome::Skipped(SkipReason::WeekNotElapsed);
        }

        self.summaries.complete(self.active_summary.clone());
        info!("Completed reflection for week {}", self.current_week_start);
        self.persist();
        self.refresh_active_summary();
        self.notifier.notify(&Notification::reflection_completed());
        Outcome::Applied
    }

    fn refresh_active_entry(&mut self) {
        self.active_entry_content = self
            .entries
            .get(self.selected_day)
            .map(|entry| entry.content.clone())
            .unwrap_or_default();
    }

    fn refresh_active_summary(&mut self) {
        self.active_summary = self.summaries.draft_for(self.current_week_start);
    }

    fn persist(&mut self) {
        let snapshot = Snapshot {
            entries: self.entries.to_records(),
            summaries: self.summaries.to_records(),
        };
        match self.adapter.save_all(&snapshot) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                warn!("Failed to persist journal snapshot: {}", e);
                self.unsaved = true;
            }
        }
    }
}
