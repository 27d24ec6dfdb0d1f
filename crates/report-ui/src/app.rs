//! Report dispatch and the interactive menu.
//!
//! The menu reads one command per line and prints the selected report until
//! it sees `exit` or the input ends. Commands must match exactly (ignoring
//! case and surrounding whitespace); anything else re-prompts.

use std::io::{BufRead, Write};
use std::str::FromStr;

use report_core::error::Result;
use report_core::settings::OutputFormat;
use report_data::analysis::AnalysisResult;
use tracing::debug;

use crate::growth_view::{render_growth, render_growth_json};
use crate::revenue_view::{render_revenue, render_revenue_json};
use crate::subscriber_view::{render_subscribers, render_subscribers_json};

pub const PROMPT: &str = "Enter info to view subscriber info, enter revenue to view revenue numbers, \
growth to view subscriber counts, exit to escape.";

// ── Report ────────────────────────────────────────────────────────────────────

/// A printable report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Info,
    Revenue,
    Growth,
}

/// Render `report` as output lines. JSON comes back as a single element.
pub fn render_report(
    report: Report,
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<Vec<String>> {
    let lines = match (report, format) {
        (Report::Info, OutputFormat::Text) => render_subscribers(&result.engine),
        (Report::Info, OutputFormat::Json) => vec![render_subscribers_json(&result.engine)?],
        (Report::Revenue, OutputFormat::Text) => render_revenue(&result.yearly.compute_deltas()),
        (Report::Revenue, OutputFormat::Json) => {
            vec![render_revenue_json(&result.yearly.compute_deltas())?]
        }
        (Report::Growth, OutputFormat::Text) => render_growth(&result.yearly.growth_rows()),
        (Report::Growth, OutputFormat::Json) => {
            vec![render_growth_json(&result.yearly.growth_rows())?]
        }
    };
    Ok(lines)
}

/// Write a rendered report to `out`, one line at a time.
pub fn write_report<W: Write>(
    out: &mut W,
    report: Report,
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<()> {
    for line in render_report(report, result, format)? {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

// ── MenuCommand ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Show(Report),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for MenuCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(MenuCommand::Show(Report::Info)),
            "revenue" => Ok(MenuCommand::Show(Report::Revenue)),
            "growth" => Ok(MenuCommand::Show(Report::Growth)),
            "exit" => Ok(MenuCommand::Exit),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}

// ── Menu loop ─────────────────────────────────────────────────────────────────

/// Prompt on `output`, read commands from `input`, print reports until exit.
///
/// End of input is treated like `exit`.
pub fn run_menu<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<()> {
    let mut line = String::new();
    loop {
        writeln!(output)?;
        writeln!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed; leaving menu");
            return Ok(());
        }

        match line.parse::<MenuCommand>() {
            Ok(MenuCommand::Exit) => return Ok(()),
            Ok(MenuCommand::Show(report)) => write_report(output, report, result, format)?,
            Err(UnknownCommand(cmd)) => debug!(command = %cmd, "unknown menu command"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
