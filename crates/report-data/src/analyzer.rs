//! Per-subscriber cadence classification.
//!
//! [`ClassificationEngine`] owns one [`SubscriberState`] per identifier and
//! advances it as transactions arrive, reporting first sightings and
//! year-crossing returns to a [`YearlyAggregator`].

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use report_core::models::{SubscriberState, SubscriptionType, Transaction};
use tracing::debug;

use crate::aggregator::YearlyAggregator;

/// Subscriber states keyed by identifier, iterated in identifier order.
#[derive(Debug, Clone, Default)]
pub struct ClassificationEngine {
    subscribers: BTreeMap<String, SubscriberState>,
}

impl ClassificationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transaction for its subscriber.
    ///
    /// The first transaction for an identifier creates a one-off state and
    /// counts a gain for its year. Later ones advance the state and count a
    /// retention when the transaction's year differs from the anchor's year.
    /// Revenue is not touched here.
    pub fn observe(&mut self, tx: &Transaction, yearly: &mut YearlyAggregator) {
        match self.subscribers.entry(tx.subscriber_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(SubscriberState::new(tx.date));
                yearly.record_gain(tx.year());
            }
            Entry::Occupied(mut slot) => {
                let outcome = slot.get_mut().record_transaction(tx.date);
                if outcome.type_changed() {
                    debug!(
                        subscriber = %tx.subscriber_id,
                        elapsed_days = outcome.elapsed_days,
                        from = %outcome.previous_type,
                        to = %outcome.new_type,
                        "cadence changed"
                    );
                }
                if outcome.crossed_year {
                    yearly.record_retention(tx.year());
                }
            }
        }
    }

    pub fn get(&self, subscriber_id: &str) -> Option<&SubscriberState> {
        self.subscribers.get(subscriber_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubscriberState)> {
        self.subscribers.iter().map(|(id, state)| (id.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Number of subscribers currently classified as `kind`.
    pub fn count_of(&self, kind: SubscriptionType) -> usize {
        self.subscribers
            .values()
            .filter(|s| s.subscription_type() == kind)
            .count()
    }

    pub fn subscribers(&self) -> &BTreeMap<String, SubscriberState> {
        &self.subscribers
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
