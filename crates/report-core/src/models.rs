use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::classify;
use crate::formatting::format_duration;
use crate::time_utils::{days_between_dates, DurationBreakdown};

/// Inferred billing cadence of a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    /// Only one transaction seen so far, or no span has triggered a rule yet.
    OneOff,
    Daily,
    Monthly,
    Yearly,
}

impl SubscriptionType {
    /// Capitalised name used in report sentences.
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionType::OneOff => "One-Off",
            SubscriptionType::Daily => "Daily",
            SubscriptionType::Monthly => "Monthly",
            SubscriptionType::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single dated payment read from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub subscriber_id: String,
    /// Amount in whatever currency unit the file uses; may be negative.
    pub amount: i64,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(subscriber_id: impl Into<String>, amount: i64, date: NaiveDate) -> Self {
        Self {
            subscriber_id: subscriber_id.into(),
            amount,
            date,
        }
    }

    /// Calendar year the transaction falls in.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// What changed when a subscriber recorded another transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Days from the first day to the anchor day used for classification.
    pub elapsed_days: i64,
    pub previous_type: SubscriptionType,
    pub new_type: SubscriptionType,
    /// Year of the anchor day before it moved to this transaction.
    pub anchor_year: i32,
    /// `true` when this transaction's year differs from `anchor_year`.
    pub crossed_year: bool,
}

impl TransitionOutcome {
    pub fn type_changed(&self) -> bool {
        self.previous_type != self.new_type
    }
}

/// Per-subscriber cadence and date markers.
///
/// `recent_day` lags one transaction behind `last_day`: classification
/// measures from `first_day` to `recent_day`, while the reported duration runs
/// from `first_day` to `last_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberState {
    #[serde(rename = "type")]
    subscription_type: SubscriptionType,
    first_day: NaiveDate,
    last_day: NaiveDate,
    recent_day: NaiveDate,
}

impl SubscriberState {
    /// State for a subscriber whose first transaction falls on `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            subscription_type: SubscriptionType::OneOff,
            first_day: date,
            last_day: date,
            recent_day: date,
        }
    }

    pub fn subscription_type(&self) -> SubscriptionType {
        self.subscription_type
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn recent_day(&self) -> NaiveDate {
        self.recent_day
    }

    /// Apply a second-or-later transaction dated `date`.
    ///
    /// Moves `last_day` first, classifies against the current anchor, then
    /// moves the anchor to `date`.
    pub fn record_transaction(&mut self, date: NaiveDate) -> TransitionOutcome {
        self.last_day = date;

        let elapsed_days = days_between_dates(self.first_day, self.recent_day);
        let previous_type = self.subscription_type;
        self.subscription_type = classify(previous_type, elapsed_days);

        let anchor_year = self.recent_day.year();
        let crossed_year = date.year() != anchor_year;

        self.recent_day = date;

        TransitionOutcome {
            elapsed_days,
            previous_type,
            new_type: self.subscription_type,
            anchor_year,
            crossed_year,
        }
    }

    /// Days from the first to the most recently processed transaction.
    pub fn duration_days(&self) -> i64 {
        days_between_dates(self.first_day, self.last_day)
    }

    pub fn duration(&self) -> DurationBreakdown {
        DurationBreakdown::from_days(self.duration_days())
    }

    /// Sentence fragment describing the account, meant to follow its id.
    ///
    /// One-off accounts get a fixed fragment with no duration.
    pub fn duration_text(&self) -> String {
        if self.subscription_type == SubscriptionType::OneOff {
            return " is a One-Off Account".to_string();
        }
        format!(
            " is a {} Account that has been open for {}",
            self.subscription_type.label(),
            format_duration(&self.duration())
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
