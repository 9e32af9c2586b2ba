use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::model::Offer;

/// Mutually exclusive follow-up status of one offer relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FollowupStatus {
    /// No follow-up ever set.
    None,
    /// Pending follow-up dated strictly after today.
    Active,
    /// Pending follow-up dated exactly today.
    DueToday,
    /// Pending follow-up dated before today.
    Overdue,
    /// No pending follow-up remains, but completed history exists.
    Completed,
}

impl FollowupStatus {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Active => "active",
            Self::DueToday => "due-today",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }

    /// True for the statuses that warrant a notification.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::DueToday | Self::Overdue)
    }
}

impl fmt::Display for FollowupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown status filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status '{}': expected one of none, active, due-today, overdue, completed",
            self.raw
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for FollowupStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "active" => Ok(Self::Active),
            "due-today" | "today" => Ok(Self::DueToday),
            "overdue" => Ok(Self::Overdue),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownStatus { raw: s.to_string() }),
        }
    }
}

/// Classify one offer's follow-up state relative to `today`.
///
/// The active follow-up is the earliest-dated incomplete entry (legacy
/// `followupDate` standing in when the list is empty); its date against
/// `today` decides between overdue, due-today, and active. An offer with
/// only completed history classifies as completed; an offer that never had
/// a follow-up classifies as none.
#[must_use]
pub fn classify(offer: &Offer, today: NaiveDate) -> FollowupStatus {
    let Some(active) = offer.active_followup() else {
        if offer.has_completed_followup() {
            return FollowupStatus::Completed;
        }
        return FollowupStatus::None;
    };

    match active.date().cmp(&today) {
        std::cmp::Ordering::Less => FollowupStatus::Overdue,
        std::cmp::Ordering::Equal => FollowupStatus::DueToday,
        std::cmp::Ordering::Greater => FollowupStatus::Active,
    }
}
