use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shift_core::calculations::common::format_percent;
use shift_core::calculations::{
    DEFAULT_MAX_OCCURRENCES, OvertimeMultiplier, PayCalculator, occurrences_in_range, overtime_pay,
    pay_period_for, summarize_pay, upcoming,
};
use shift_core::{EventKind, JurisdictionTable, RecurringEvent};
use shift_data::{EventLoader, ShiftLoader, load_jurisdiction_table, month_range};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Pay day, pay card and pay calculations for shift workers.
#[derive(Debug, Parser)]
#[command(name = "shift-pay")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the next occurrence of each recurring event, soonest first.
    Next {
        /// CSV file of recurring events
        #[arg(short, long)]
        events: PathBuf,

        /// Reference date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Maximum number of events to show
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// List the occurrences of each recurring event within a month.
    Calendar {
        /// CSV file of recurring events
        #[arg(short, long)]
        events: PathBuf,

        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,

        /// Maximum occurrences per event
        #[arg(long, default_value_t = DEFAULT_MAX_OCCURRENCES)]
        max: usize,
    },

    /// Break a gross annual income down into taxes, contributions and net pay.
    Breakdown {
        /// Gross annual income
        #[arg(short, long)]
        gross: Decimal,

        /// Jurisdiction table (TOML); the built-in Ontario 2023 table if omitted
        #[arg(short, long)]
        table: Option<PathBuf>,
    },

    /// Compute regular and overtime pay.
    Overtime {
        #[arg(long)]
        regular: Decimal,

        #[arg(long)]
        overtime: Decimal,

        /// Base hourly rate
        #[arg(long)]
        rate: Decimal,

        /// Overtime multiplier: 1.5 or 2
        #[arg(short, long, default_value = "1.5")]
        multiplier: OvertimeMultiplier,
    },

    /// Total hours and pay for shifts in a date window or pay period.
    ///
    /// Give either --from and --to, or --events and --payday to use the pay
    /// period ending at the next payday.
    Summary {
        /// CSV file of worked shifts
        #[arg(short, long)]
        shifts: PathBuf,

        /// Base hourly rate
        #[arg(long)]
        rate: Decimal,

        /// Overtime multiplier: 1.5 or 2
        #[arg(short, long, default_value = "1.5")]
        multiplier: OvertimeMultiplier,

        /// First day of the window
        #[arg(long, requires = "to", conflicts_with = "payday")]
        from: Option<NaiveDate>,

        /// Day after the last day of the window
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        /// CSV file of recurring events
        #[arg(short, long, requires = "payday")]
        events: Option<PathBuf>,

        /// Id of the payday event defining the pay period
        #[arg(short, long, requires = "events")]
        payday: Option<String>,

        /// Reference date for the pay period (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_events(path: &Path) -> Result<Vec<RecurringEvent>> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let events = EventLoader::parse(file)
        .with_context(|| format!("Failed to parse events: {}", path.display()))?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

fn read_table(path: Option<&Path>) -> Result<JurisdictionTable> {
    match path {
        Some(path) => load_jurisdiction_table(path)
            .with_context(|| format!("Failed to load jurisdiction table: {}", path.display())),
        None => {
            debug!("using built-in Ontario 2023 table");
            Ok(JurisdictionTable::ontario_2023())
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_next(
    events_path: &Path,
    date: NaiveDate,
    limit: usize,
) -> Result<()> {
    let events = read_events(events_path)?;

    for occurrence in upcoming(&events, date, limit)? {
        println!("{}", occurrence.description);
    }
    Ok(())
}

fn run_calendar(
    events_path: &Path,
    month: &str,
    max: usize,
) -> Result<()> {
    let events = read_events(events_path)?;
    let (start, end) = month_range(month)?;

    println!("{}", start.format("%B %Y"));
    for event in &events {
        let dates = occurrences_in_range(event, start, end, max)?;
        if dates.is_empty() {
            continue;
        }
        let days = dates
            .iter()
            .map(|d| d.format("%a %-d").to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<20} {:<8} {}", event.title, event.kind.as_str(), days);
    }
    Ok(())
}

fn run_breakdown(
    gross: Decimal,
    table_path: Option<&Path>,
) -> Result<()> {
    let table = read_table(table_path)?;
    let breakdown = PayCalculator::new(&table).compute_breakdown(gross)?;

    println!("Jurisdiction:           {} ({})", table.jurisdiction, table.tax_year);
    println!("Gross income:           {:.2}", breakdown.gross_income);
    println!(
        "Federal tax:            {:.2} (bracket {})",
        breakdown.federal_tax, breakdown.federal_bracket
    );
    println!(
        "Provincial tax:         {:.2} (bracket {})",
        breakdown.provincial_tax, breakdown.provincial_bracket
    );
    println!("Pension contribution:   {:.2}", breakdown.pension_contribution);
    println!("Insurance contribution: {:.2}", breakdown.insurance_contribution);
    println!("Total deductions:       {:.2}", breakdown.total_deductions);
    println!("Net income:             {:.2}", breakdown.net_income);
    println!("Effective rate:         {}", format_percent(breakdown.effective_rate));
    Ok(())
}

fn print_pay(
    regular_pay: Decimal,
    overtime_pay: Decimal,
    total_pay: Decimal,
) {
    println!("Regular pay:  {regular_pay:.2}");
    println!("Overtime pay: {overtime_pay:.2}");
    println!("Total pay:    {total_pay:.2}");
}

/// Resolves the `[start, end)` window for `summary`, either given directly or
/// as the pay period of a payday event.
fn summary_window(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    events_path: Option<&Path>,
    payday: Option<&str>,
    date: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    match (from, to, events_path, payday) {
        (Some(from), Some(to), _, _) => {
            if to <= from {
                bail!("--to ({to}) must be after --from ({from})");
            }
            Ok((from, to))
        }
        (_, _, Some(events_path), Some(payday)) => {
            let events = read_events(events_path)?;
            let Some(event) = events.iter().find(|e| e.id == payday) else {
                bail!("no event with id '{payday}' in {}", events_path.display());
            };
            if event.kind != EventKind::Payday {
                bail!("event '{payday}' is a {} event, not a payday", event.kind.as_str());
            }
            let period = pay_period_for(event, date)?;
            Ok((period.start, period.end))
        }
        _ => bail!("give either --from and --to, or --events and --payday"),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_summary(
    shifts_path: &Path,
    rate: Decimal,
    multiplier: OvertimeMultiplier,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    events_path: Option<&Path>,
    payday: Option<&str>,
    date: NaiveDate,
) -> Result<()> {
    let (start, end) = summary_window(from, to, events_path, payday, date)?;

    let file = File::open(shifts_path)
        .with_context(|| format!("Failed to open: {}", shifts_path.display()))?;
    let shifts = ShiftLoader::parse(file)
        .with_context(|| format!("Failed to parse shifts: {}", shifts_path.display()))?;

    let summary = summarize_pay(&shifts, start, end, rate, multiplier)?;

    println!("Period:         {start} to {end} (exclusive)");
    println!("Shifts:         {}", summary.hours.shift_count);
    println!("Regular hours:  {}", summary.hours.regular_hours);
    println!("Overtime hours: {} at {multiplier}", summary.hours.overtime_hours);
    print_pay(
        summary.pay.regular_pay,
        summary.pay.overtime_pay,
        summary.pay.total_pay,
    );
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Next {
            events,
            date,
            limit,
        } => run_next(&events, date.unwrap_or_else(today), limit),
        Command::Calendar { events, month, max } => run_calendar(&events, &month, max),
        Command::Breakdown { gross, table } => run_breakdown(gross, table.as_deref()),
        Command::Overtime {
            regular,
            overtime,
            rate,
            multiplier,
        } => {
            let pay = overtime_pay(regular, overtime, rate, multiplier)?;
            print_pay(pay.regular_pay, pay.overtime_pay, pay.total_pay);
            Ok(())
        }
        Command::Summary {
            shifts,
            rate,
            multiplier,
            from,
            to,
            events,
            payday,
            date,
        } => run_summary(
            &shifts,
            rate,
            multiplier,
            from,
            to,
            events.as_deref(),
            payday.as_deref(),
            date.unwrap_or_else(today),
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // summary_window tests
    // =========================================================================

    #[test]
    fn summary_window_accepts_explicit_range() {
        let window = summary_window(
            Some(date(2025, 5, 2)),
            Some(date(2025, 5, 16)),
            None,
            None,
            date(2025, 5, 10),
        )
        .unwrap();

        assert_eq!(window, (date(2025, 5, 2), date(2025, 5, 16)));
    }

    #[test]
    fn summary_window_rejects_inverted_range() {
        let err = summary_window(
            Some(date(2025, 5, 16)),
            Some(date(2025, 5, 2)),
            None,
            None,
            date(2025, 5, 10),
        )
        .unwrap_err();

        assert!(err.to_string().contains("must be after"), "got: {err}");
    }

    #[test]
    fn summary_window_rejects_empty_range() {
        let day = date(2025, 5, 2);

        assert!(summary_window(Some(day), Some(day), None, None, day).is_err());
    }

    #[test]
    fn summary_window_requires_a_source() {
        assert!(summary_window(None, None, None, None, date(2025, 5, 10)).is_err());
    }
}
