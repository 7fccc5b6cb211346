//! `chronos` CLI: render month grids, list timezones, convert instants and
//! count nights from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Current month in the default zone (Asia/Kolkata)
//! chronos month
//!
//! # A specific month with a selected day and bounds
//! chronos month --year 2026 --month 2 --selected 2026-02-14 --min 2026-02-05 --max 2026-02-25
//!
//! # A range with built-in holidays, as JSON
//! chronos month -y 2026 -m 1 --range-start 2026-01-24 --range-end 2026-01-27 \
//!     --default-holidays --json
//!
//! # Curated zones with their current offsets
//! chronos zones
//!
//! # Re-zone an instant (epoch millis or ISO)
//! chronos convert 1767225600000 --to America/New_York
//!
//! # Nights between two dates
//! chronos nights 2026-02-10 2026-02-14
//! ```
//!
//! Set `RUST_LOG` or pass `-v` for diagnostic output on stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chronos_core::calendar::{self, CalendarCell, GridOptions, Week};
use chronos_core::holidays::{self, HolidayEntry};
use chronos_core::timezone::{self, COMMON_TIMEZONES, DEFAULT_TIMEZONE};
use chronos_core::{DateInput, ZonedInstant};
use clap::{Parser, Subcommand};
use log::{debug, info};

#[derive(Parser)]
#[command(
    name = "chronos",
    version,
    about = "Timezone-aware calendar grids and date arithmetic"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log state transitions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the day grid for one month
    Month {
        /// Year to show (defaults to the current year in the zone)
        #[arg(short, long)]
        year: Option<i32>,
        /// Month to show, 1-12 (defaults to the current month in the zone)
        #[arg(short, long)]
        month: Option<u32>,
        /// IANA timezone the grid is viewed from
        #[arg(short = 'z', long, default_value = DEFAULT_TIMEZONE)]
        timezone: String,
        /// Selected date (ISO string or epoch millis)
        #[arg(long)]
        selected: Option<String>,
        /// Range start (ISO string or epoch millis)
        #[arg(long)]
        range_start: Option<String>,
        /// Range end (ISO string or epoch millis)
        #[arg(long)]
        range_end: Option<String>,
        /// Earliest selectable date
        #[arg(long)]
        min: Option<String>,
        /// Latest selectable date
        #[arg(long)]
        max: Option<String>,
        /// JSON file with an array of {date, name, type?} holidays
        #[arg(long = "holidays", value_name = "FILE")]
        holidays_file: Option<String>,
        /// Include the built-in holidays for the zone
        #[arg(long)]
        default_holidays: bool,
        /// First day of the week (e.g. Sun, Mon)
        #[arg(long, default_value = "Sun")]
        week_start: Weekday,
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Print the grid as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the curated timezones with their UTC offsets
    Zones {
        /// Instant the offsets are computed at (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show an instant in another timezone
    Convert {
        /// Epoch millis or ISO string
        value: String,
        /// Target timezone
        #[arg(long, default_value = DEFAULT_TIMEZONE)]
        to: String,
        /// Zone used to read values without an offset
        #[arg(long, default_value = "UTC")]
        from: String,
        /// strftime pattern for the output (defaults to RFC 3339)
        #[arg(short, long)]
        format: Option<String>,
        /// Print {iso, timezone, timestamp} as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count the nights between two dates
    Nights {
        start: String,
        end: String,
        /// Zone the dates are read in
        #[arg(short = 'z', long, default_value = DEFAULT_TIMEZONE)]
        timezone: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Month {
            year,
            month,
            timezone,
            selected,
            range_start,
            range_end,
            min,
            max,
            holidays_file,
            default_holidays,
            week_start,
            today,
            json,
        } => {
            let now = ZonedInstant::now(&timezone).context("Failed to read the current date")?;
            let year = year.unwrap_or_else(|| now.year());
            let month = month.unwrap_or_else(|| now.month());
            let today = today.unwrap_or_else(|| now.date());

            let mut entries = match holidays_file.as_deref() {
                Some(path) => read_holidays(path)?,
                None => Vec::new(),
            };
            if default_holidays {
                entries.extend(holidays::default_holidays_for_timezone(&timezone));
            }
            debug!("{} holiday entries supplied", entries.len());

            let options = GridOptions {
                selected: resolve(selected.as_deref(), &timezone)?,
                min: resolve(min.as_deref(), &timezone)?,
                max: resolve(max.as_deref(), &timezone)?,
                range_start: resolve(range_start.as_deref(), &timezone)?,
                range_end: resolve(range_end.as_deref(), &timezone)?,
                holidays: &entries,
                week_start: Some(week_start),
            };
            let weeks = calendar::generate_month_at(year, month, &timezone, &options, today)
                .with_context(|| format!("Failed to generate grid for {year:04}-{month:02}"))?;
            info!("generated {} weeks for {year:04}-{month:02}", weeks.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&weeks)?);
            } else {
                let first_cell = weeks
                    .first()
                    .map(|week| week[0].instant.to_utc())
                    .unwrap_or_else(Utc::now);
                let offset = timezone::format_timezone_offset(&timezone, first_cell)?;
                let month_name = calendar::month_names()[month as usize - 1];
                let title = format!("{month_name} {year}  {timezone} ({offset})");
                print!("{}", render_month(&title, calendar::weekday_names(week_start), &weeks));
                if let (Some(start), Some(end)) = (&options.range_start, &options.range_end) {
                    let nights = chronos_core::nights_between(start, end);
                    println!("{nights} {}", if nights == 1 { "night" } else { "nights" });
                }
            }
        }
        Commands::Zones { at, json } => {
            let at = match at.as_deref() {
                Some(text) => resolve_required(text, "UTC")?.to_utc(),
                None => Utc::now(),
            };
            let rows = zone_rows(at)?;
            if json {
                let value: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|(value, label, offset)| {
                        serde_json::json!({ "value": value, "label": label, "offset": offset })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for (value, label, offset) in rows {
                    println!("{value:<22}{offset:<11}{label}");
                }
            }
        }
        Commands::Convert {
            value,
            to,
            from,
            format,
            json,
        } => {
            let instant = resolve_required(&value, &from)?
                .with_zone(&to)
                .with_context(|| format!("Failed to convert to '{}'", to))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&instant)?);
            } else {
                match format.as_deref() {
                    Some(pattern) => println!("{}", instant.format(pattern)?),
                    None => println!("{}", instant.to_iso()),
                }
            }
        }
        Commands::Nights { start, end, timezone } => {
            let start = resolve_required(&start, &timezone)?;
            let end = resolve_required(&end, &timezone)?;
            println!("{}", chronos_core::nights_between(&start, &end));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Numeric arguments are epoch millis; everything else is parsed as ISO.
fn date_input(text: &str) -> DateInput {
    match text.parse::<i64>() {
        Ok(millis) => DateInput::Millis(millis),
        Err(_) => DateInput::Text(text.to_string()),
    }
}

fn resolve_required(text: &str, zone: &str) -> Result<ZonedInstant> {
    timezone::convert_to_timezone(&date_input(text), zone)
        .with_context(|| format!("Failed to read date '{}' in {}", text, zone))
}

fn resolve(text: Option<&str>, zone: &str) -> Result<Option<ZonedInstant>> {
    text.map(|t| resolve_required(t, zone)).transpose()
}

fn read_holidays(path: &str) -> Result<Vec<HolidayEntry>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    holidays::holidays_from_json(&json)
        .with_context(|| format!("Failed to parse holidays in {}", path))
}

fn zone_rows(at: DateTime<Utc>) -> Result<Vec<(&'static str, &'static str, String)>> {
    COMMON_TIMEZONES
        .iter()
        .map(|zone| Ok((zone.value, zone.label, timezone::format_timezone_offset(zone.value, at)?)))
        .collect()
}

/// Plain-text grid. Each cell is five columns wide:
/// `[14]` selected or range end, `(15)` inside a range, then one flag column
/// (`*` holiday, `!` today, `x` disabled). Days outside the month are blank.
fn render_month(title: &str, weekday_names: [&str; 7], weeks: &[Week]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for name in weekday_names {
        out.push_str(&format!(" {name:<4}"));
    }
    out.push('\n');

    let mut holidays = Vec::new();
    for week in weeks {
        let line: String = week.iter().map(render_cell).collect();
        out.push_str(line.trim_end());
        out.push('\n');
        holidays.extend(
            week.iter()
                .filter(|cell| cell.in_current_month)
                .filter_map(|cell| cell.holiday.as_ref().map(|h| (cell.day(), h.name.as_str()))),
        );
    }

    for (day, name) in holidays {
        out.push_str(&format!("  *{day:>2} {name}\n"));
    }
    out
}

fn render_cell(cell: &CalendarCell) -> String {
    if !cell.in_current_month {
        return " ".repeat(5);
    }
    let (open, close) = if cell.is_selected || cell.is_range_start || cell.is_range_end {
        ('[', ']')
    } else if cell.is_in_range {
        ('(', ')')
    } else {
        (' ', ' ')
    };
    let flag = if cell.is_disabled {
        'x'
    } else if cell.holiday.is_some() {
        '*'
    } else if cell.is_today {
        '!'
    } else {
        ' '
    };
    format!("{open}{:>2}{close}{flag}", cell.day())
}
