//! Calendar Tools CLI.
//!
//! Generates demo calendars and runs the agent-facing calendar operations
//! against them. Calendar state lives only for the life of the process, so
//! every operation runs against a freshly seeded calendar.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate, TimeDelta};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use appointment_kernel::{Calendar, MeetingRequest, ScheduleConfig, parse_date};
use calendar_tools::{CalendarTools, RandomScheduleGenerator};

#[derive(Parser)]
#[command(name = "calendar-tools")]
#[command(about = "Random demo calendars and conflict-free meeting booking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule config file (JSON); overrides --preset
    #[arg(long, env = "CALENDAR_CONFIG")]
    config: Option<PathBuf>,

    /// Preset: default, very-busy, busy, light
    #[arg(long, default_value = "very-busy")]
    preset: String,

    /// Random seed (omit for a different calendar every run)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a calendar and print a summary.
    Generate {
        /// First date (YYYY-MM-DD), defaults to tomorrow
        #[arg(long)]
        start: Option<String>,
        /// Last date, inclusive (YYYY-MM-DD), defaults to two weeks after start
        #[arg(long)]
        end: Option<String>,
        /// Place meetings around the seeded calendar instead of replacing the range
        #[arg(long)]
        keep_existing: bool,
    },

    /// List tomorrow's appointments.
    Tomorrow,

    /// List every appointment, grouped by date.
    All,

    /// List open meeting slots on a date.
    Slots {
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Meeting length in minutes
        #[arg(long, default_value = "60")]
        duration: i64,
    },

    /// Book a meeting.
    Book {
        #[arg(long)]
        title: String,
        /// Start (YYYY-MM-DD HH:MM)
        #[arg(long)]
        start: String,
        /// End (YYYY-MM-DD HH:MM)
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Attendee name (repeatable)
        #[arg(long = "attendee")]
        attendees: Vec<String>,
    },
}

fn load_config(cli: &Cli) -> Result<ScheduleConfig> {
    if let Some(path) = &cli.config {
        return Ok(ScheduleConfig::from_json_file(path)?);
    }

    Ok(ScheduleConfig::preset(&cli.preset).unwrap_or_else(|| {
        eprintln!("Unknown preset: {}. Using 'very-busy'.", cli.preset);
        ScheduleConfig::very_busy()
    }))
}

/// Populate the calendar the operations run against.
fn seed_calendar(tools: &CalendarTools, generator: &mut RandomScheduleGenerator, today: NaiveDate) {
    let seeded = tools.seed_calendar(generator, today);
    info!(
        days = seeded.day_count(),
        meetings = seeded.total_meetings(),
        "Calendar data generated"
    );
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;
    let calendar = Calendar::new(config.business_hours());
    let tools = CalendarTools::new(calendar);
    let mut generator = match cli.seed {
        Some(seed) => RandomScheduleGenerator::seeded(config, seed),
        None => RandomScheduleGenerator::new(config),
    };

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Generate {
            start,
            end,
            keep_existing,
        } => {
            let start = match start {
                Some(start) => parse_date(&start)?,
                None => today + TimeDelta::days(1),
            };
            let end = match end {
                Some(end) => parse_date(&end)?,
                None => start + TimeDelta::days(14),
            };

            let schedule =
                tools.generate_over_seeded(&mut generator, today, start, end, keep_existing);
            println!("{}", schedule);
        }

        Commands::Tomorrow => {
            seed_calendar(&tools, &mut generator, today);
            print_json(&tools.get_tomorrow_appointments())?;
        }

        Commands::All => {
            seed_calendar(&tools, &mut generator, today);
            print_json(&tools.get_all_appointments())?;
        }

        Commands::Slots { date, duration } => {
            seed_calendar(&tools, &mut generator, today);
            print_json(&tools.get_open_meeting_slots(&date, Some(duration)))?;
        }

        Commands::Book {
            title,
            start,
            end,
            description,
            attendees,
        } => {
            seed_calendar(&tools, &mut generator, today);
            let request = MeetingRequest::new(title, start, end, description, attendees);
            print_json(&tools.set_meeting(&request))?;
        }
    }

    Ok(())
}
