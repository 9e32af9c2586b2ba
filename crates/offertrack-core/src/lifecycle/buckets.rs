use chrono::NaiveDate;

use super::classify::{FollowupStatus, classify};
use crate::model::Offer;

/// List-level partition of offers by follow-up state.
///
/// Offers with status [`FollowupStatus::None`] are excluded entirely.
/// `overdue`/`today`/`upcoming` hold offers with a pending follow-up, sorted
/// ascending by its date; `completed` holds offers with only history, sorted
/// by most recent completion first.
#[derive(Debug, Clone, Default)]
pub struct FollowupBuckets<'a> {
    pub overdue: Vec<&'a Offer>,
    pub today: Vec<&'a Offer>,
    pub upcoming: Vec<&'a Offer>,
    pub completed: Vec<&'a Offer>,
}

impl FollowupBuckets<'_> {
    /// Count of offers still needing action (overdue + today + upcoming).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.overdue.len() + self.today.len() + self.upcoming.len()
    }

    /// True when no offer has any follow-up state at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0 && self.completed.is_empty()
    }
}

/// Partition `offers` into follow-up buckets relative to `today`.
#[must_use]
pub fn bucketize(offers: &[Offer], today: NaiveDate) -> FollowupBuckets<'_> {
    let mut buckets = FollowupBuckets::default();

    for offer in offers {
        match classify(offer, today) {
            FollowupStatus::None => {}
            FollowupStatus::Overdue => buckets.overdue.push(offer),
            FollowupStatus::DueToday => buckets.today.push(offer),
            FollowupStatus::Active => buckets.upcoming.push(offer),
            FollowupStatus::Completed => buckets.completed.push(offer),
        }
    }

    let by_active_date = |offer: &&Offer| offer.active_followup().map(|a| a.date());
    buckets.overdue.sort_by_key(by_active_date);
    buckets.today.sort_by_key(by_active_date);
    buckets.upcoming.sort_by_key(by_active_date);
    buckets
        .completed
        .sort_by_key(|offer| std::cmp::Reverse(offer.last_completed_at()));

    buckets
}
