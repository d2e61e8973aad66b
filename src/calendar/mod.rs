//! Calendar arithmetic without I/O operations.
//!
//! This module contains pure functions for week boundaries, day offsets and
//! week classification. Everything works on `NaiveDate` calendar days in the
//! host's local calendar; time-of-day never participates.
//!
//! The only impure piece is the [`Clock`] trait, which yields "today" and is
//! injected wherever the current day matters so the rest stays deterministic.

use crate::constants::{DAYS_PER_WEEK, PAST_WEEK_THRESHOLD_DAYS};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone, Weekday};

/// Where a week window lies relative to the week containing today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekClass {
    /// The week started more than seven days before today.
    Past,
    /// The week contains today.
    Current,
    /// Everything else, including the previous week when today is its
    /// following week's first day.
    Future,
}

/// Source of the current calendar day.
pub trait Clock {
    /// Returns today's date in the host's local calendar.
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Returns the first day of the week containing `date`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use mejournal::calendar::week_start;
///
/// let thursday = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(week_start(thursday, Weekday::Mon), monday);
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
/// assert_eq!(week_start(thursday, Weekday::Sun), sunday);
/// ```
pub fn week_start(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_starts_on.num_days_from_monday())
        % 7;
    // Clamped at the first representable day.
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the last day of the week that begins on `week_start`, clamped at
/// the last representable day.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    add_days(week_start, DAYS_PER_WEEK - 1).unwrap_or(NaiveDate::MAX)
}

/// Returns the days of the week that begins on `week_start`.
///
/// Always seven, except for a week running past the last representable day.
pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_PER_WEEK)
        .filter_map(|offset| add_days(week_start, offset))
        .collect()
}

/// True when both timestamps fall on the same local calendar day.
pub fn same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    local_day(a) == local_day(b)
}

/// Projects a timestamp onto the host's local calendar day.
pub fn local_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Signed number of days from `b` to `a` (`a - b`).
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// Classifies the week beginning on `week_start` relative to `today`.
///
/// A week is `Current` when it is the week containing `today` and `Past` when
/// it started more than seven days before `today`. Anything else is `Future`.
/// That makes the previous week `Future` on the first day of a new week,
/// since it started exactly seven days earlier.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use mejournal::calendar::{classify_week, WeekClass};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
/// let this_week = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let last_week = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
///
/// assert_eq!(classify_week(this_week, today, Weekday::Mon), WeekClass::Current);
/// assert_eq!(classify_week(last_week, today, Weekday::Mon), WeekClass::Past);
/// ```
pub fn classify_week(
    week_start_day: NaiveDate,
    today: NaiveDate,
    week_starts_on: Weekday,
) -> WeekClass {
    if week_start_day == week_start(today, week_starts_on) {
        WeekClass::Current
    } else if days_between(today, week_start_day) > PAST_WEEK_THRESHOLD_DAYS {
        WeekClass::Past
    } else {
        WeekClass::Future
    }
}

/// Shifts `date` by `days`, or `None` when the result isn't representable.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

pub fn sub_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    add_days(date, days.checked_neg()?)
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(DAYS_PER_WEEK)?)
}

pub fn sub_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_weeks(date, weeks.checked_neg()?)
}

/// Parses a weekday name such as `monday`, `Mon` or `sun`.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}
