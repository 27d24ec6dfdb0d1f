//! Domain types and pure logic for the subscription report.
//!
//! Holds the `MM/DD/YYYY` date arithmetic, the per-subscriber cadence state
//! machine, report text helpers, the shared error type and CLI settings.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ReportError, Result};
