use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::offer::Offer;

/// One scheduled or completed follow-up event, owned by exactly one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupItem {
    /// Unique within the owning offer.
    pub id: String,
    /// Calendar date the follow-up is/was due.
    pub date: NaiveDate,
    /// Text snapshot, usually copied from the offer's notes at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Set exactly when `completed` flips to true; absent while false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// The single pending follow-up that counts as "the" next one for an offer.
///
/// Resolved from `followups` when the list is non-empty, or synthesized from
/// the legacy `followupDate` field when it is empty. A legacy date sitting
/// next to a non-empty list is ignored (the list wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFollowup<'a> {
    /// Earliest-dated incomplete entry in `followups`.
    Entry(&'a FollowupItem),
    /// Implicit entry carried only by the legacy `followupDate` field.
    Legacy(NaiveDate),
}

impl ActiveFollowup<'_> {
    /// Due date of the pending follow-up.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Entry(item) => item.date,
            Self::Legacy(date) => *date,
        }
    }
}

impl Offer {
    /// Resolve the active follow-up, if any.
    ///
    /// Earliest-dated incomplete entry wins; equal dates break to the
    /// lexicographically smaller id. Two incomplete entries on the same date
    /// cannot arise through the public operations, but direct data edits and
    /// imports can produce them, so resolution stays deterministic.
    #[must_use]
    pub fn active_followup(&self) -> Option<ActiveFollowup<'_>> {
        if self.followups.is_empty() {
            return self.followup_date.map(ActiveFollowup::Legacy);
        }

        self.followups
            .iter()
            .filter(|item| !item.completed)
            .min_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)))
            .map(ActiveFollowup::Entry)
    }

    /// True if a pending follow-up exists (modern entry or legacy date).
    #[must_use]
    pub fn has_active_followup(&self) -> bool {
        self.active_followup().is_some()
    }

    /// True if the offer retains at least one completed follow-up.
    #[must_use]
    pub fn has_completed_followup(&self) -> bool {
        self.followups.iter().any(|item| item.completed)
    }

    /// Most recent completion timestamp across the follow-up history.
    #[must_use]
    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.followups
            .iter()
            .filter(|item| item.completed)
            .filter_map(|item| item.completed_at)
            .max()
    }
}
