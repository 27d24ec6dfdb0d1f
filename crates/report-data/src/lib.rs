//! Data ingestion layer for the subscription report.
//!
//! Responsible for reading transaction rows from CSV, classifying each
//! subscriber's cadence, accumulating yearly revenue and subscriber counts,
//! and running the top-level ingestion pipeline.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod reader;

pub use report_core as core;
