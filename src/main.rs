mod commands;
mod reporter;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use calstats_core::config::StatsConfig;
use calstats_core::filter::EventFilter;
use clap::{Args, Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::reporter::ConsoleReporter;

#[derive(Parser)]
#[command(name = "calstats")]
#[command(about = "Summarize time spent in meetings per ISO week from an .ics calendar export")]
struct Cli {
    /// More verbose log
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hours of meetings per week, and the weekly average of each year
    Weeks {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Unique event names (A-Z)
    Names {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file (ics). Defaults to calendar_file from the config
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Leave out events whose summary contains any of these
    #[arg(short = 'e', long = "event-exceptions", num_args = 1..)]
    event_exceptions: Vec<String>,

    /// Only use events from these years
    #[arg(long = "filter-year", num_args = 1..)]
    filter_year: Vec<i32>,
}

impl InputArgs {
    /// Merge the command line with ~/.config/calstats/config.toml.
    fn resolve(self) -> Result<(PathBuf, EventFilter)> {
        let config = StatsConfig::load()?;

        let Some(file) = self.file.or_else(|| config.calendar_path()) else {
            anyhow::bail!(
                "No calendar file given.\n\n\
                Pass one with:\n  \
                calstats weeks --file <path/to/calendar.ics>\n\n\
                or set calendar_file in {}",
                StatsConfig::config_path()?.display()
            );
        };

        let mut exclusions = config.exclusions;
        exclusions.extend(self.event_exceptions);

        let years = if self.filter_year.is_empty() {
            config.years
        } else {
            self.filter_year
        };

        Ok((file, EventFilter::new(exclusions, years)))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose);

    let started = Instant::now();
    let mut reporter = ConsoleReporter;

    let result = match cli.command {
        Commands::Weeks { input } => {
            let (file, filter) = input.resolve()?;
            let events = commands::read_events(&file, &filter, &mut reporter)?;
            commands::weeks::run(events, &mut reporter)
        }
        Commands::Names { input } => {
            let (file, filter) = input.resolve()?;
            let events = commands::read_events(&file, &filter, &mut reporter)?;
            commands::names::run(&events, &mut reporter)
        }
    };

    tracing::info!("Execution took {:.2?}", started.elapsed());
    result
}

/// Log to stderr, and at debug level to a daily file under ~/calstats/logs.
///
/// The returned guard flushes the file log when dropped.
fn init_logging(verbose: bool) -> Option<WorkerGuard> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_filter(rust_log.as_deref(), verbose));

    let (file, guard) = match file_log_writer() {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

/// RUST_LOG when it is set and valid, otherwise debug with `-v` and warn without.
fn console_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(Ok(filter)) = rust_log.map(EnvFilter::try_new) {
        return filter;
    }

    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    EnvFilter::new(level.to_string())
}

fn log_dir_in(home: &Path) -> PathBuf {
    home.join("calstats").join("logs")
}

fn file_log_writer() -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let log_dir = log_dir_in(&dirs::home_dir()?);
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Could not create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(log_dir, "calstats.log");
    Some(tracing_appender::non_blocking(appender))
}
