/*!
# mejournal

Command-line front end for the daily journal and weekly reflection engine.

## Usage

```text
mejournal [OPTIONS] <COMMAND>

Commands:
  write    Save the entry for a day
  show     Print the entry for a day
  week     Print a week's entries and reflection
  reflect  Complete the weekly reflection for an elapsed week

Options:
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
      --log-level <LOG_LEVEL>    Log level filter (overridden by RUST_LOG) [default: warn]
      --today <TODAY>            Treat this date as today (format: YYYY-MM-DD or YYYYMMDD)
```

## Configuration

- `MEJOURNAL_DIR`: where the snapshots are stored (defaults to "~/Documents/mejournal")
- `MEJOURNAL_WEEK_START`: weekday a week starts on (defaults to "monday")
*/

use clap::Parser;
use mejournal::calendar::{sub_weeks, Clock, FixedClock, SystemClock};
use mejournal::cli::{self, CliArgs, Commands};
use mejournal::config::Config;
use mejournal::constants::{LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use mejournal::errors::{AppError, AppResult};
use mejournal::persistence::JsonFileAdapter;
use mejournal::session::{JournalSession, Notification, Outcome, SessionOptions, SkipReason};
use mejournal::store::ReflectionField;
use std::io::{self, Read};
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();
    init_tracing(&args.log_format, &args.log_level);

    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays clean.
fn init_tracing(format: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let clock: Box<dyn Clock> = match args.today.as_deref() {
        Some(raw) => Box::new(FixedClock(parse_date_arg(raw)?)),
        None => Box::new(SystemClock),
    };
    let mut target_day = match args.command.date_arg() {
        Some(raw) => parse_date_arg(raw)?,
        None => clock.today(),
    };
    if let Commands::Week { back, .. } | Commands::Reflect { back, .. } = &args.command {
        target_day = weeks_before(target_day, *back)?;
    }

    let adapter = JsonFileAdapter::open(&config.data_dir)?;
    let options = SessionOptions {
        clock,
        notifier: Box::new(|n: &Notification| println!("{}\n{}", n.title, n.description)),
        week_starts_on: config.week_starts_on,
    };
    let mut session = JournalSession::init(adapter, options);
    session.select_day(target_day);

    match args.command {
        Commands::Write { text, .. } => {
            let content = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            ensure_applied(session.save_active_entry(&content))?;
        }
        Commands::Show { .. } => {
            let day = session.selected_day();
            print!(
                "{}",
                cli::render_entry(day, session.today(), session.entry_for(day))
            );
        }
        Commands::Week { .. } => {
            print!("{}", cli::render_week(&session.view()));
        }
        Commands::Reflect {
            different,
            learned,
            want,
            ..
        } => {
            let answers = [
                (ReflectionField::DifferentOrSpecial, different),
                (ReflectionField::Learned, learned),
                (ReflectionField::WantToLearn, want),
            ];
            for (field, value) in answers {
                if let Some(value) = value {
                    ensure_applied(session.update_draft_field(field, &value))?;
                }
            }
            ensure_applied(session.complete_weekly_reflection())?;
            print!("{}", cli::render_week(&session.view()));
        }
    }

    session.close();
    Ok(())
}

fn weeks_before(day: chrono::NaiveDate, weeks: u32) -> AppResult<chrono::NaiveDate> {
    sub_weeks(day, i64::from(weeks)).ok_or_else(|| {
        AppError::Journal(format!(
            "Cannot go back {} weeks from {}: {}",
            weeks,
            day,
            cli::skip_message(SkipReason::OutOfRange)
        ))
    })
}

fn ensure_applied(outcome: Outcome) -> AppResult<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Skipped(reason) => Err(AppError::Journal(cli::skip_message(reason).to_string())),
    }
}

fn parse_date_arg(raw: &str) -> AppResult<chrono::NaiveDate> {
    cli::parse_date(raw).map_err(|e| AppError::Journal(format!("Invalid date format: {}", e)))
}
