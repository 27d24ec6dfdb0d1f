use crate::models::SubscriptionType;

/// Span at or beyond which a one-off account is reclassified as yearly.
pub const YEARLY_THRESHOLD_DAYS: i64 = 365;

/// Spans strictly above this (and below a year) mark an account as monthly.
pub const MONTHLY_THRESHOLD_DAYS: i64 = 30;

// ── Cadence transitions ───────────────────────────────────────────────────────

/// Decide an account's cadence after one more transaction.
///
/// `elapsed_days` is measured from the account's first day to its anchor day
/// (the transaction before the current one). Rules are tried in order and the
/// first match wins:
///
/// 1. `elapsed >= 365` while still [`SubscriptionType::OneOff`] → yearly.
/// 2. `30 < elapsed < 365` unless already daily → monthly.
/// 3. `0 < elapsed < 30` → daily, whatever the current cadence.
/// 4. Otherwise the cadence is unchanged.
///
/// Rule 3 carries no guard, so monthly and yearly accounts fall back to daily
/// on a short span. An account never returns to one-off.
///
/// ```
/// use report_core::calculations::classify;
/// use report_core::models::SubscriptionType;
///
/// assert_eq!(classify(SubscriptionType::OneOff, 400), SubscriptionType::Yearly);
/// assert_eq!(classify(SubscriptionType::Yearly, 12), SubscriptionType::Daily);
/// assert_eq!(classify(SubscriptionType::Daily, 400), SubscriptionType::Daily);
/// ```
pub fn classify(current: SubscriptionType, elapsed_days: i64) -> SubscriptionType {
    if elapsed_days >= YEARLY_THRESHOLD_DAYS && current == SubscriptionType::OneOff {
        SubscriptionType::Yearly
    } else if elapsed_days > MONTHLY_THRESHOLD_DAYS
        && elapsed_days < YEARLY_THRESHOLD_DAYS
        && current != SubscriptionType::Daily
    {
        SubscriptionType::Monthly
    } else if elapsed_days > 0 && elapsed_days < MONTHLY_THRESHOLD_DAYS {
        SubscriptionType::Daily
    } else {
        current
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
