//! Ingestion pipeline for the subscription report.
//!
//! Streams transactions from the reader through the classification engine
//! and the yearly aggregator, returning an [`AnalysisResult`] ready for the
//! report views.

use std::path::Path;

use report_core::error::Result;
use report_core::models::Transaction;
use report_core::settings::{ErrorPolicy, Settings};
use tracing::info;

use crate::aggregator::{TrackedWindow, YearlyAggregator};
use crate::analyzer::ClassificationEngine;
use crate::reader::{ReadStats, TransactionReader};

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub policy: ErrorPolicy,
    pub window: TrackedWindow,
}

impl IngestOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            policy: settings.on_error,
            window: TrackedWindow::new(settings.window_start, settings.window_years),
        }
    }
}

/// Counters gathered while ingesting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisMetadata {
    /// Transactions fed through the engine.
    pub transactions_processed: usize,
    /// Records passed over because they carried no date.
    pub rows_ignored: usize,
    /// Malformed rows dropped under [`ErrorPolicy::Skip`].
    pub rows_skipped: usize,
}

/// The complete output of an ingestion run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub engine: ClassificationEngine,
    pub yearly: YearlyAggregator,
    pub metadata: AnalysisMetadata,
}

// ── Ingestor ──────────────────────────────────────────────────────────────────

/// Owned run state threaded through the ingestion loop.
///
/// Transactions must arrive in file order; how they are chunked into
/// [`Ingestor::ingest_batch`] calls does not change the result.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    engine: ClassificationEngine,
    yearly: YearlyAggregator,
    processed: usize,
}

impl Ingestor {
    pub fn new(window: TrackedWindow) -> Self {
        Self {
            engine: ClassificationEngine::new(),
            yearly: YearlyAggregator::new(window),
            processed: 0,
        }
    }

    /// Book one transaction's revenue and advance its subscriber.
    pub fn ingest(&mut self, tx: &Transaction) {
        self.yearly.record_revenue(tx.year(), tx.amount);
        self.engine.observe(tx, &mut self.yearly);
        self.processed += 1;
    }

    pub fn ingest_batch(&mut self, batch: &[Transaction]) {
        for tx in batch {
            self.ingest(tx);
        }
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    pub fn yearly(&self) -> &YearlyAggregator {
        &self.yearly
    }

    pub fn finish(self) -> AnalysisResult {
        AnalysisResult {
            engine: self.engine,
            yearly: self.yearly,
            metadata: AnalysisMetadata {
                transactions_processed: self.processed,
                ..AnalysisMetadata::default()
            },
        }
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Ingest an in-memory, ordered sequence of transactions.
pub fn analyze_transactions<'a, I>(transactions: I, window: TrackedWindow) -> AnalysisResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut ingestor = Ingestor::new(window);
    for tx in transactions {
        ingestor.ingest(tx);
    }
    ingestor.finish()
}

/// Run the full pipeline over the file at `path`.
///
/// Fails if the file cannot be opened, or on the first malformed row when
/// `options.policy` is [`ErrorPolicy::Abort`].
pub fn analyze_file(path: &Path, options: &IngestOptions) -> Result<AnalysisResult> {
    let start = std::time::Instant::now();
    let mut reader = TransactionReader::open(path, options.policy)?;
    let mut ingestor = Ingestor::new(options.window);

    for tx in reader.by_ref() {
        ingestor.ingest(&tx?);
    }

    let mut result = ingestor.finish();
    apply_read_stats(&mut result.metadata, reader.stats());

    info!(
        transactions = result.metadata.transactions_processed,
        subscribers = result.engine.len(),
        ignored = result.metadata.rows_ignored,
        skipped = result.metadata.rows_skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Ingested {}",
        path.display()
    );

    Ok(result)
}

fn apply_read_stats(metadata: &mut AnalysisMetadata, stats: ReadStats) {
    metadata.rows_ignored = stats.ignored;
    metadata.rows_skipped = stats.skipped;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
