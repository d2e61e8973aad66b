//! Command-line front end.
//!
//! Argument parsing lives in [`CliArgs`]; the `render_*` functions turn
//! session views into the text the binary prints.

use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, DATE_FORMAT_LONG, DEFAULT_LOG_LEVEL,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::session::{ReflectionState, SessionView, SkipReason};
use crate::store::{JournalEntry, ReflectionField};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;

/// Command-line arguments for mejournal.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
pub struct CliArgs {
    /// Log output format
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON], default_value = LOG_FORMAT_TEXT)]
    pub log_format: String,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Treat this date as today (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Save the entry for a day
    Write {
        /// Day to write (format: YYYY-MM-DD or YYYYMMDD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Entry text; read from stdin when omitted
        text: Option<String>,
    },

    /// Print the entry for a day
    Show {
        /// Day to show (format: YYYY-MM-DD or YYYYMMDD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Print a week's entries and reflection
    Week {
        /// Any day inside the week (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Number of weeks to step back from that week
        #[arg(short, long, default_value_t = 0)]
        back: u32,
    },

    /// Complete the weekly reflection for an elapsed week
    Reflect {
        /// Any day inside the reference week (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Number of weeks to step back from the reference week
        #[arg(short, long, default_value_t = 1)]
        back: u32,

        /// Did you do something different or special last week?
        #[arg(long)]
        different: Option<String>,

        /// Is there something you learned?
        #[arg(long)]
        learned: Option<String>,

        /// What do you want to learn next week?
        #[arg(long)]
        want: Option<String>,
    },
}

impl Commands {
    /// The raw `--date` argument, if the subcommand takes one.
    pub fn date_arg(&self) -> Option<&str> {
        match self {
            Commands::Write { date, .. }
            | Commands::Show { date }
            | Commands::Week { date, .. }
            | Commands::Reflect { date, .. } => date.as_deref(),
        }
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}

/// Explains a skipped action to the user.
pub fn skip_message(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::BlankContent => "The entry is empty; nothing was saved.",
        SkipReason::AtToday => "Already at today.",
        SkipReason::AtCurrentWeek => "Already at the current week.",
        SkipReason::WeekNotElapsed => {
            "This week hasn't finished yet. You'll be able to complete your weekly reflection at the end of the week."
        }
        SkipReason::ReflectionLocked => "This week's reflection is already completed.",
        SkipReason::OutOfRange => "That date is outside the supported calendar range.",
    }
}

/// Formats a week range such as `Jun 3 - Jun 9, 2024`.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
}

/// Renders a single day's entry.
pub fn render_entry(day: NaiveDate, today: NaiveDate, entry: Option<&JournalEntry>) -> String {
    let mut out = String::new();
    if day == today {
        let _ = writeln!(out, "Today's Reflection ({})", day.format(DATE_FORMAT_LONG));
    } else {
        let _ = writeln!(out, "Reflection for {}", day.format("%B %-d, %Y"));
    }
    let _ = writeln!(out);
    match entry {
        Some(entry) => {
            let _ = writeln!(out, "{}", entry.content);
        }
        None => {
            let _ = writeln!(out, "No entry yet.");
        }
    }
    out
}

/// Renders the week strip and the reflection panel.
pub fn render_week(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Weekly Reflection: {}",
        format_date_range(view.current_week_start, view.current_week_end)
    );
    let _ = writeln!(out);

    for status in &view.week_days {
        let marker = if status.has_entry { "[x]" } else { "[ ]" };
        let today = if status.is_today { " (today)" } else { "" };
        let _ = writeln!(out, "  {} {}{}", marker, status.day.format("%a %-d"), today);
    }
    let _ = writeln!(out);

    match view.reflection_state {
        ReflectionState::Future => {
            let _ = writeln!(out, "Future Week");
            let _ = writeln!(
                out,
                "This week hasn't happened yet. Check back later to add entries and reflections."
            );
        }
        ReflectionState::Current => {
            let _ = writeln!(out, "Current Week in Progress");
            let _ = writeln!(
                out,
                "Continue adding daily entries. You'll be able to complete your weekly reflection at the end of the week."
            );
        }
        ReflectionState::PastIncomplete | ReflectionState::PastComplete => {
            for field in [
                ReflectionField::DifferentOrSpecial,
                ReflectionField::Learned,
                ReflectionField::WantToLearn,
            ] {
                let answer = view.active_summary.field(field);
                let _ = writeln!(out, "{}", field.prompt());
                let _ = writeln!(out, "  {}", if answer.is_empty() { "-" } else { answer });
            }
            let _ = writeln!(out);
            if view.reflection_state == ReflectionState::PastComplete {
                let _ = writeln!(out, "Weekly reflection completed");
            } else {
                let _ = writeln!(out, "Reflection not completed yet");
            }
        }
    }

    out
}
