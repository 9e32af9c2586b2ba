use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::followup::FollowupItem;
use crate::error::Error;

/// Customer satisfaction rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Csat {
    Positive,
    Neutral,
    Negative,
}

impl Csat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Csat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Csat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(Error::InvalidCsat { raw: s.to_string() }),
        }
    }
}

/// One logged sales interaction.
///
/// Field names are fixed by the persisted record format (camelCase JSON);
/// existing stores must keep loading without a migration pass. In particular
/// `followupDate` is the legacy single-date follow-up field, superseded by
/// `followups` but still read and dual-written by every follow-up mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    pub case_number: String,
    pub channel: String,
    pub offer_type: String,
    /// Creation timestamp, immutable.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csat: Option<Csat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted: Option<bool>,
    /// Required when `converted` is true; on-or-after `date` (validated at
    /// the command layer, the engine does not re-check on mutation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Legacy single follow-up date. See the type-level note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_date: Option<NaiveDate>,
    /// Follow-up history. Insertion order carries no meaning; the active
    /// entry is resolved by date (then id) in [`Offer::active_followup`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followups: Vec<FollowupItem>,
}

impl Offer {
    /// Create a fresh offer with no follow-ups and no rating.
    #[must_use]
    pub fn new(
        id: String,
        case_number: String,
        channel: String,
        offer_type: String,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            case_number,
            channel,
            offer_type,
            date,
            csat: None,
            converted: None,
            conversion_date: None,
            notes: None,
            followup_date: None,
            followups: Vec::new(),
        }
    }

    /// True if the offer converted to a sale.
    #[must_use]
    pub fn is_converted(&self) -> bool {
        self.converted == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Csat, Offer};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_offer() -> Offer {
        Offer::new(
            "of-abc123".into(),
            "CASE-100".into(),
            "phone".into(),
            "upgrade".into(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).single().expect("valid ts"),
        )
    }

    #[test]
    fn csat_round_trips_through_str() {
        for raw in ["positive", "neutral", "negative"] {
            let parsed: Csat = raw.parse().expect("valid csat");
            assert_eq!(parsed.to_string(), raw);
        }
        assert!("great".parse::<Csat>().is_err());
    }

    #[test]
    fn serde_uses_stored_record_field_names() {
        let mut offer = sample_offer();
        offer.followup_date = NaiveDate::from_ymd_opt(2024, 1, 10);

        let json = serde_json::to_value(&offer).expect("serializes");
        assert_eq!(json["caseNumber"], "CASE-100");
        assert_eq!(json["offerType"], "upgrade");
        assert_eq!(json["followupDate"], "2024-01-10");
        // Optional fields absent from the record, not null.
        assert!(json.get("csat").is_none());
        assert!(json.get("followups").is_none());
    }

    #[test]
    fn legacy_records_without_followups_field_deserialize() {
        let raw = r#"{
            "id": "of-old001",
            "caseNumber": "CASE-7",
            "channel": "chat",
            "offerType": "renewal",
            "date": "2023-11-02T14:00:00Z",
            "followupDate": "2023-11-09"
        }"#;
        let offer: Offer = serde_json::from_str(raw).expect("legacy record loads");
        assert!(offer.followups.is_empty());
        assert_eq!(offer.followup_date, NaiveDate::from_ymd_opt(2023, 11, 9));
    }
}
