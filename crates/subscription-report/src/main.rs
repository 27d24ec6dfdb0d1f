mod bootstrap;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use report_core::settings::{Command, Settings};
use report_data::analysis::{analyze_file, IngestOptions};
use report_ui::app::{run_menu, write_report, Report};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("Subscription Report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Report: {:?}, Format: {:?}",
        settings.input.display(),
        settings.selected_command(),
        settings.format
    );

    let options = IngestOptions::from_settings(&settings);
    let result = analyze_file(&settings.input, &options)
        .with_context(|| format!("could not build report from {}", settings.input.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match settings.selected_command() {
        Command::Info => write_report(&mut out, Report::Info, &result, settings.format)?,
        Command::Revenue => write_report(&mut out, Report::Revenue, &result, settings.format)?,
        Command::Growth => write_report(&mut out, Report::Growth, &result, settings.format)?,
        Command::Interactive => {
            let stdin = io::stdin();
            run_menu(stdin.lock(), &mut out, &result, settings.format)?;
        }
    }

    out.flush()?;
    Ok(())
}
