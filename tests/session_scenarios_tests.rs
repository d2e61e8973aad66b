use chrono::{NaiveDate, Weekday};
use mejournal::calendar::{classify_week, week_start, FixedClock, WeekClass};
use mejournal::persistence::{JsonFileAdapter, MemoryAdapter, PersistenceAdapter, Snapshot};
use mejournal::session::{
    Direction, JournalSession, Notification, Outcome, ReflectionState, SessionOptions,
    SilentNotifier, SkipReason,
};
use mejournal::store::{EntryStore, ReflectionField, SummaryStore, WeeklySummary};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options_on(today: NaiveDate) -> SessionOptions {
    SessionOptions {
        clock: Box::new(FixedClock(today)),
        notifier: Box::new(SilentNotifier),
        week_starts_on: Weekday::Mon,
    }
}

#[test]
fn test_previous_week_reflection_scenario() {
    let today = day(2024, 6, 13);
    let titles = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&titles);
    let adapter = MemoryAdapter::new();

    let mut session = JournalSession::init(
        adapter.clone(),
        SessionOptions {
            clock: Box::new(FixedClock(today)),
            notifier: Box::new(move |n: &Notification| {
                sink.lock().unwrap().push(n.title.clone());
            }),
            week_starts_on: Weekday::Mon,
        },
    );

    session.select_day(today);
    assert_eq!(session.current_week_start(), day(2024, 6, 10));
    assert_eq!(session.week_class(), WeekClass::Current);
    assert_eq!(session.reflection_state(), ReflectionState::Current);

    assert_eq!(session.navigate_week(Direction::Backward), Outcome::Applied);
    assert_eq!(session.current_week_start(), day(2024, 6, 3));
    assert_eq!(session.current_week_end(), day(2024, 6, 9));
    assert_eq!(session.week_class(), WeekClass::Past);
    assert!(session.reflection_state().is_editable());
    // The selected day stays put while the week cursor moves.
    assert_eq!(session.selected_day(), today);

    for (field, value) in [
        (ReflectionField::DifferentOrSpecial, "X"),
        (ReflectionField::Learned, "Y"),
        (ReflectionField::WantToLearn, "Z"),
    ] {
        assert_eq!(session.update_draft_field(field, value), Outcome::Applied);
    }
    assert_eq!(session.complete_weekly_reflection(), Outcome::Applied);

    let stored = session.summary_store().get(day(2024, 6, 3)).unwrap().clone();
    assert!(stored.completed);
    assert_eq!(stored.different_or_special, "X");
    assert_eq!(stored.learned, "Y");
    assert_eq!(stored.want_to_learn, "Z");
    assert_eq!(session.reflection_state(), ReflectionState::PastComplete);

    let saves = adapter.save_count();
    assert_eq!(
        session.complete_weekly_reflection(),
        Outcome::Skipped(SkipReason::ReflectionLocked)
    );
    assert_eq!(
        session.update_draft_field(ReflectionField::Learned, "changed"),
        Outcome::Skipped(SkipReason::ReflectionLocked)
    );
    assert_eq!(session.summary_store().get(day(2024, 6, 3)), Some(&stored));
    assert_eq!(adapter.save_count(), saves);
    assert_eq!(
        titles.lock().unwrap().as_slice(),
        ["Weekly reflection completed!".to_string()]
    );
}

#[test]
fn test_cannot_navigate_past_today() {
    let today = day(2024, 6, 13);
    let mut session = JournalSession::init(MemoryAdapter::new(), options_on(today));

    session.select_day(today);
    assert!(!session.can_go_forward());
    assert_eq!(
        session.navigate_day(Direction::Forward),
        Outcome::Skipped(SkipReason::AtToday)
    );
    assert_eq!(session.selected_day(), today);

    assert_eq!(session.navigate_day(Direction::Backward), Outcome::Applied);
    assert_eq!(session.selected_day(), day(2024, 6, 12));
    assert!(session.can_go_forward());
    assert_eq!(session.navigate_day(Direction::Forward), Outcome::Applied);
    assert_eq!(session.selected_day(), today);
}

#[test]
fn test_cannot_navigate_past_current_week() {
    let today = day(2024, 6, 13);
    let mut session = JournalSession::init(MemoryAdapter::new(), options_on(today));

    assert!(!session.can_go_forward_week());
    assert_eq!(
        session.navigate_week(Direction::Forward),
        Outcome::Skipped(SkipReason::AtCurrentWeek)
    );
    assert_eq!(session.current_week_start(), day(2024, 6, 10));

    let _ = session.navigate_week(Direction::Backward);
    assert!(session.can_go_forward_week());
    assert_eq!(session.navigate_week(Direction::Forward), Outcome::Applied);
    assert_eq!(session.current_week_start(), day(2024, 6, 10));
}

#[test]
fn test_upsert_keys_by_calendar_day() {
    let mut store = EntryStore::new();
    let _ = store.upsert(day(2024, 6, 12), "same");
    let _ = store.upsert(day(2024, 6, 13), "same");
    assert_eq!(store.len(), 2);

    let _ = store.upsert(day(2024, 6, 13), "first");
    let _ = store.upsert(day(2024, 6, 13), "second");
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(day(2024, 6, 13)).unwrap().content, "second");

    assert!(store.upsert(day(2024, 6, 14), "").is_none());
    assert!(!store.has(day(2024, 6, 14)));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_week_start_properties_hold_for_a_year() {
    let mut date = day(2024, 1, 1);
    while date < day(2025, 1, 1) {
        for wso in [Weekday::Mon, Weekday::Sun, Weekday::Sat] {
            let ws = week_start(date, wso);
            assert_eq!(week_start(ws, wso), ws);
            assert!(ws <= date && (date - ws).num_days() < 7);
            assert_eq!(classify_week(ws, date, wso), WeekClass::Current);
        }
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_completed_summary_is_stable() {
    let ws = day(2024, 6, 3);
    let mut store = SummaryStore::new();
    let mut draft = store.draft_for(ws);
    draft.set_field(ReflectionField::Learned, "patience");
    let _ = store.complete(draft);

    let mut again = store.draft_for(ws);
    assert!(again.completed);
    assert_eq!(again.learned, "patience");

    again.set_field(ReflectionField::Learned, "overwritten");
    let _ = store.complete(again);
    assert_eq!(store.draft_for(ws).learned, "patience");
}

#[test]
fn test_json_file_round_trip_across_sessions() {
    let temp_dir = tempdir().unwrap();
    let today = day(2024, 6, 13);

    {
        let adapter = JsonFileAdapter::open(temp_dir.path()).unwrap();
        let mut session = JournalSession::init(adapter, options_on(today));
        assert!(session.save_active_entry("Thursday thoughts").is_applied());
        let _ = session.navigate_day(Direction::Backward);
        assert!(session.save_active_entry("Wednesday thoughts").is_applied());
        let _ = session.navigate_week(Direction::Backward);
        let _ = session.update_draft_field(ReflectionField::WantToLearn, "Rust");
        assert!(session.complete_weekly_reflection().is_applied());
        session.close();
    }

    let adapter = JsonFileAdapter::open(temp_dir.path()).unwrap();
    let session = JournalSession::init(adapter, options_on(today));
    assert_eq!(session.active_entry_content(), "Thursday thoughts");
    assert_eq!(
        session.entry_for(day(2024, 6, 12)).unwrap().content,
        "Wednesday thoughts"
    );
    let summary = session.summary_store().get(day(2024, 6, 3)).unwrap();
    assert!(summary.completed);
    assert_eq!(summary.want_to_learn, "Rust");
    assert_eq!(summary.week_end_date, day(2024, 6, 9));
}

#[test]
fn test_adapter_round_trip_preserves_records() {
    let temp_dir = tempdir().unwrap();
    let adapter = JsonFileAdapter::open(temp_dir.path()).unwrap();

    let mut entries = EntryStore::new();
    let _ = entries.upsert(day(2024, 2, 29), "Leap day\nwith two lines");
    let _ = entries.upsert(day(2024, 3, 1), "March");
    let mut summary = WeeklySummary::draft(day(2024, 2, 26));
    summary.set_field(ReflectionField::DifferentOrSpecial, "Snow \"day\"");
    let mut summaries = SummaryStore::new();
    let _ = summaries.complete(summary);

    let snapshot = Snapshot {
        entries: entries.to_records(),
        summaries: summaries.to_records(),
    };
    adapter.save_all(&snapshot).unwrap();
    assert_eq!(adapter.load_all(), snapshot);
}

#[test]
fn test_corrupt_collection_does_not_affect_the_other() {
    let summaries = r#"[{"id":"2024-06-03","weekStartDate":"2024-06-03","weekEndDate":"2024-06-09","learned":"Y","completed":true}]"#;
    let adapter = MemoryAdapter::with_raw(Some("{not json"), Some(summaries));
    let mut session = JournalSession::init(adapter, options_on(day(2024, 6, 13)));

    assert!(session.entry_store().is_empty());
    let _ = session.navigate_week(Direction::Backward);
    assert_eq!(session.reflection_state(), ReflectionState::PastComplete);
    assert_eq!(session.active_summary().learned, "Y");
}
