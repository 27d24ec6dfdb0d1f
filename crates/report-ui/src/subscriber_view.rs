//! Per-subscriber cadence report ("info").

use chrono::NaiveDate;
use report_core::error::Result;
use report_core::models::SubscriptionType;
use report_core::time_utils::DurationBreakdown;
use report_data::analyzer::ClassificationEngine;
use serde::Serialize;

/// JSON shape of one subscriber.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberRow<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub duration_days: i64,
    pub duration: DurationBreakdown,
}

/// One `Subscription <id><duration text>` line per subscriber, sorted by id.
pub fn render_subscribers(engine: &ClassificationEngine) -> Vec<String> {
    engine
        .iter()
        .map(|(id, state)| format!("Subscription {}{}", id, state.duration_text()))
        .collect()
}

pub fn subscriber_rows(engine: &ClassificationEngine) -> Vec<SubscriberRow<'_>> {
    engine
        .iter()
        .map(|(id, state)| SubscriberRow {
            id,
            subscription_type: state.subscription_type(),
            first_day: state.first_day(),
            last_day: state.last_day(),
            duration_days: state.duration_days(),
            duration: state.duration(),
        })
        .collect()
}

pub fn render_subscribers_json(engine: &ClassificationEngine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&subscriber_rows(engine))?)
}
