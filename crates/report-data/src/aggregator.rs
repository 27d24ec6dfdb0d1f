//! Yearly revenue totals and per-year subscriber gain / retention counts.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

// ── TrackedWindow ─────────────────────────────────────────────────────────────

/// Span of calendar years for which gained / retained counts are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackedWindow {
    pub start_year: i32,
    pub years: u32,
}

impl TrackedWindow {
    pub const DEFAULT_START_YEAR: i32 = 2010;
    pub const DEFAULT_YEARS: u32 = 5;

    pub fn new(start_year: i32, years: u32) -> Self {
        Self { start_year, years }
    }

    /// Last year inside the window, inclusive. Clamped to `i32::MAX`.
    pub fn end_year(&self) -> i32 {
        let end = i64::from(self.start_year) + i64::from(self.years) - 1;
        i32::try_from(end).unwrap_or(i32::MAX)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years > 0 && year >= self.start_year && year <= self.end_year()
    }

    pub fn iter_years(&self) -> impl Iterator<Item = i32> {
        let start = self.start_year;
        (0..self.years).map_while(move |offset| {
            i32::try_from(offset).ok().and_then(|o| start.checked_add(o))
        })
    }
}

impl Default for TrackedWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_YEAR, Self::DEFAULT_YEARS)
    }
}

// ── Report types ──────────────────────────────────────────────────────────────

/// Totals are kept as `i128` so that summing `i64` amounts cannot overflow.
pub type Revenue = i128;

/// Revenue for one year and its change from the previous recorded year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRevenue {
    pub year: i32,
    pub total: Revenue,
    /// `None` for the earliest year.
    pub delta: Option<Revenue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearDelta {
    pub year: i32,
    pub delta: Revenue,
}

/// Chronological revenue rows with the extreme year-over-year changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    pub years: Vec<YearRevenue>,
    /// Largest strictly positive change; first year wins ties.
    pub highest_growth: Option<YearDelta>,
    /// Largest strictly negative change; first year wins ties.
    pub highest_loss: Option<YearDelta>,
}

/// Gained and retained subscriber counts for one tracked year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearGrowth {
    pub year: i32,
    pub gained: u64,
    pub retained: u64,
}

// ── YearlyAggregator ──────────────────────────────────────────────────────────

/// Running per-year totals fed by every ingested transaction.
#[derive(Debug, Clone, Default)]
pub struct YearlyAggregator {
    window: TrackedWindow,
    revenue: BTreeMap<i32, Revenue>,
    gained: BTreeMap<i32, u64>,
    retained: BTreeMap<i32, u64>,
}

impl YearlyAggregator {
    pub fn new(window: TrackedWindow) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn window(&self) -> TrackedWindow {
        self.window
    }

    /// Add `amount` to `year`'s total. Negative amounts reduce it.
    pub fn record_revenue(&mut self, year: i32, amount: i64) {
        self.add_revenue(year, Revenue::from(amount));
    }

    fn add_revenue(&mut self, year: i32, amount: Revenue) {
        let total = self.revenue.entry(year).or_insert(0);
        *total = total.saturating_add(amount);
    }

    /// Count a subscriber whose first transaction falls in `year`.
    pub fn record_gain(&mut self, year: i32) {
        if self.window.contains(year) {
            *self.gained.entry(year).or_insert(0) += 1;
        } else {
            trace!(year, "gain outside tracked window ignored");
        }
    }

    /// Count a returning subscriber's first transaction in `year`.
    pub fn record_retention(&mut self, year: i32) {
        if self.window.contains(year) {
            *self.retained.entry(year).or_insert(0) += 1;
        } else {
            trace!(year, "retention outside tracked window ignored");
        }
    }

    /// Revenue total per year in chronological order.
    pub fn revenue(&self) -> &BTreeMap<i32, Revenue> {
        &self.revenue
    }

    pub fn revenue_for(&self, year: i32) -> Option<Revenue> {
        self.revenue.get(&year).copied()
    }

    pub fn gained(&self, year: i32) -> u64 {
        self.gained.get(&year).copied().unwrap_or(0)
    }

    pub fn retained(&self, year: i32) -> u64 {
        self.retained.get(&year).copied().unwrap_or(0)
    }

    /// One row per year of the tracked window, zeros included.
    pub fn growth_rows(&self) -> Vec<YearGrowth> {
        self.window
            .iter_years()
            .map(|year| YearGrowth {
                year,
                gained: self.gained(year),
                retained: self.retained(year),
            })
            .collect()
    }

    /// Year-over-year revenue changes and the extreme growth / loss years.
    ///
    /// Each year is compared with the previous year present in the map, not
    /// the previous calendar year. Both extremes start at zero and only a
    /// strictly larger change replaces them.
    pub fn compute_deltas(&self) -> RevenueSummary {
        let mut summary = RevenueSummary::default();
        let mut highest_growth: Revenue = 0;
        let mut highest_loss: Revenue = 0;
        let mut previous: Option<Revenue> = None;

        for (&year, &total) in &self.revenue {
            let delta = previous.map(|prev| total.saturating_sub(prev));

            if let Some(change) = delta {
                if change > highest_growth {
                    highest_growth = change;
                    summary.highest_growth = Some(YearDelta { year, delta: change });
                }
                if change < highest_loss {
                    highest_loss = change;
                    summary.highest_loss = Some(YearDelta { year, delta: change });
                }
            }

            summary.years.push(YearRevenue { year, total, delta });
            previous = Some(total);
        }

        summary
    }

    /// Fold another aggregator's counts into this one.
    ///
    /// Every field is a sum, so partial aggregates built from disjoint
    /// subscriber sets combine to the same totals as a single pass.
    pub fn merge(&mut self, other: &YearlyAggregator) {
        for (&year, &amount) in &other.revenue {
            self.add_revenue(year, amount);
        }
        for (&year, &count) in &other.gained {
            *self.gained.entry(year).or_insert(0) += count;
        }
        for (&year, &count) in &other.retained {
            *self.retained.entry(year).or_insert(0) += count;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
