use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user-facing alert tied to one offer's active follow-up.
///
/// Derived state: the periodic check recreates any notification whose
/// condition still holds after it was dismissed, so the list is a cache,
/// never a source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub offer_id: String,
    pub title: String,
    pub message: String,
    /// Creation time of the notification, not the follow-up due date.
    pub timestamp: DateTime<Utc>,
    /// Due date of the active follow-up this alert was derived from.
    /// One notification exists per (offer, date) pair at most.
    pub followup_date: NaiveDate,
    #[serde(default)]
    pub read: bool,
    /// Due today.
    #[serde(default)]
    pub is_urgent: bool,
    /// Due date before today.
    #[serde(default)]
    pub is_overdue: bool,
}
