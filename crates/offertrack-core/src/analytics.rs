//! Derived metrics over the offer list.
//!
//! Everything here is a single linear pass (plus a sort where noted) over
//! in-memory offers; fine at the hundreds-of-offers scale this tool targets.
//! Calendar days are taken from the UTC timestamp of each offer.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::{Csat, Offer};

/// Consecutive qualifying days with at least one offer logged, counting back
/// from today. A streak survives until a full day is missed: logging nothing
/// yet today keeps yesterday's streak alive.
#[must_use]
pub fn current_streak(offers: &[Offer], today: NaiveDate) -> u32 {
    let days = logged_days(offers);
    let start = if days.contains(&today) {
        today
    } else if days.contains(&(today - Duration::days(1))) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut cursor = start;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive logged days anywhere in the history.
#[must_use]
pub fn longest_streak(offers: &[Offer]) -> u32 {
    let days = logged_days(offers);

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

fn logged_days(offers: &[Offer]) -> BTreeSet<NaiveDate> {
    offers.iter().map(|o| o.date.date_naive()).collect()
}

/// Conversion rate and lag over the full offer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub total: usize,
    pub converted: usize,
    /// Converted share of all offers, 0.0 when the list is empty.
    pub rate: f64,
    /// Days from offer creation to conversion, averaged over converted
    /// offers that carry a conversion date.
    pub avg_lag_days: Option<f64>,
    pub min_lag_days: Option<i64>,
    pub max_lag_days: Option<i64>,
}

/// Compute conversion rate and conversion-lag statistics.
#[must_use]
pub fn conversion_stats(offers: &[Offer]) -> ConversionStats {
    let total = offers.len();
    let converted = offers.iter().filter(|o| o.is_converted()).count();

    let lags: Vec<i64> = offers
        .iter()
        .filter(|o| o.is_converted())
        .filter_map(|o| {
            o.conversion_date
                .map(|conv| (conv - o.date.date_naive()).num_days())
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let rate = if total == 0 {
        0.0
    } else {
        converted as f64 / total as f64
    };
    #[allow(clippy::cast_precision_loss)]
    let avg_lag_days = if lags.is_empty() {
        None
    } else {
        Some(lags.iter().sum::<i64>() as f64 / lags.len() as f64)
    };

    ConversionStats {
        total,
        converted,
        rate,
        avg_lag_days,
        min_lag_days: lags.iter().copied().min(),
        max_lag_days: lags.iter().copied().max(),
    }
}

/// Counts of each satisfaction rating over rated offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsatSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl CsatSummary {
    /// Total rated offers.
    #[must_use]
    pub const fn rated(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Tally csat ratings; unrated offers are skipped.
#[must_use]
pub fn csat_summary(offers: &[Offer]) -> CsatSummary {
    let mut summary = CsatSummary::default();
    for offer in offers {
        match offer.csat {
            Some(Csat::Positive) => summary.positive += 1,
            Some(Csat::Neutral) => summary.neutral += 1,
            Some(Csat::Negative) => summary.negative += 1,
            None => {}
        }
    }
    summary
}

/// One week of activity, keyed by its Monday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTrend {
    pub week_start: NaiveDate,
    pub offers: usize,
    pub conversions: usize,
    pub followups_completed: usize,
}

/// Activity per ISO week for the trailing `weeks` weeks, oldest first.
///
/// Offers count toward the week they were logged; conversions toward the
/// week of their conversion date; completions toward the week of their
/// `completedAt` timestamp.
#[must_use]
pub fn weekly_trend(offers: &[Offer], today: NaiveDate, weeks: usize) -> Vec<WeekTrend> {
    let this_week = week_start(today);
    let mut rows: Vec<WeekTrend> = (0..weeks)
        .rev()
        .map(|back| WeekTrend {
            week_start: this_week - Duration::weeks(back.try_into().unwrap_or(0)),
            offers: 0,
            conversions: 0,
            followups_completed: 0,
        })
        .collect();

    let Some(first) = rows.first().map(|r| r.week_start) else {
        return rows;
    };
    let index_of = |day: NaiveDate| -> Option<usize> {
        let start = week_start(day);
        if start < first || start > this_week {
            return None;
        }
        usize::try_from((start - first).num_days() / 7).ok()
    };

    for offer in offers {
        if let Some(i) = index_of(offer.date.date_naive()) {
            rows[i].offers += 1;
        }
        if offer.is_converted() {
            if let Some(i) = offer.conversion_date.and_then(index_of) {
                rows[i].conversions += 1;
            }
        }
        for item in &offer.followups {
            if let Some(i) = item
                .completed_at
                .map(|ts| ts.date_naive())
                .and_then(index_of)
            {
                rows[i].followups_completed += 1;
            }
        }
    }

    rows
}

fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}
