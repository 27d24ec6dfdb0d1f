use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::{ReportError, Result};

/// Input file read when none is given on the command line.
pub const DEFAULT_INPUT: &str = "subscription_report.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Subscription cadence and yearly revenue report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "subscription-report",
    about = "Subscription cadence and yearly revenue report",
    version
)]
pub struct Settings {
    /// Transaction file (id, subscriber, revenue, MM/DD/YYYY date per row)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Report to print; omit to choose interactively
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format for printed reports
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// What to do with a row that cannot be parsed
    #[arg(long = "on-error", value_enum, default_value_t = ErrorPolicy::Abort, global = true)]
    pub on_error: ErrorPolicy,

    /// First year of the gained/retained tracking window (1-9999)
    #[arg(long, default_value = "2010", value_parser = clap::value_parser!(i32).range(1..=9999), global = true)]
    pub window_start: i32,

    /// Number of years in the gained/retained tracking window (1-200)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=200), global = true)]
    pub window_years: u32,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"], global = true)]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Report selection.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Per-subscriber cadence and duration
    Info,
    /// Yearly revenue with growth and loss
    Revenue,
    /// Subscribers gained and retained per tracked year
    Growth,
    /// Prompt for reports until `exit`
    Interactive,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Handling of rows whose revenue or date cannot be parsed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the run at the first malformed row.
    #[default]
    Abort,
    /// Log the row and carry on.
    Skip,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::parse()
    }

    /// Parse an explicit argument list; the first item is the program name.
    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| ReportError::Config(e.to_string()))
    }

    /// Report to run, defaulting to the interactive menu.
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Interactive)
    }

    /// Level name after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
