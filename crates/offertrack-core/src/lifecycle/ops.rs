//! Follow-up mutation operations.
//!
//! All three operations are synchronous and report success as a boolean:
//! `false` means validation failed and the offer was left untouched. The
//! single-active rule is enforced here, at the operation layer; the data
//! model itself stays permissive so records produced by direct edits or
//! imports still load.
//!
//! Every mutation dual-writes the legacy `followupDate` field to the date of
//! the remaining active entry (or clears it), keeping old readers working.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::id;
use crate::model::{ActiveFollowup, FollowupItem, Offer};

/// Schedule a new follow-up for `offer` on `date`.
///
/// Fails (no mutation) when a pending follow-up already exists — including
/// one carried only by the legacy field. When `notes` is `None` the offer's
/// own notes are snapshotted onto the new entry.
pub fn add_followup(offer: &mut Offer, date: NaiveDate, notes: Option<String>) -> bool {
    if offer.has_active_followup() {
        debug!(offer = %offer.id, "add_followup rejected: active follow-up exists");
        return false;
    }

    let item = FollowupItem {
        id: id::followup_id(),
        date,
        notes: notes.or_else(|| offer.notes.clone()),
        completed: false,
        completed_at: None,
    };
    debug!(offer = %offer.id, followup = %item.id, %date, "follow-up scheduled");
    offer.followups.push(item);
    offer.followup_date = Some(date);
    true
}

/// Mark the active follow-up of `offer` as completed at `now`.
///
/// Fails when no follow-up is pending. A legacy-only follow-up is completed
/// by synthesizing a completed entry in `followups`, so history survives the
/// legacy field being cleared.
pub fn complete_followup(offer: &mut Offer, now: DateTime<Utc>) -> bool {
    let target = match offer.active_followup() {
        None => {
            debug!(offer = %offer.id, "complete_followup rejected: nothing pending");
            return false;
        }
        Some(ActiveFollowup::Entry(item)) => Some(item.id.clone()),
        Some(ActiveFollowup::Legacy(_)) => None,
    };

    match target {
        Some(entry_id) => {
            if let Some(item) = offer.followups.iter_mut().find(|i| i.id == entry_id) {
                item.completed = true;
                item.completed_at = Some(now);
                debug!(offer = %offer.id, followup = %entry_id, "follow-up completed");
            }
        }
        None => {
            // Legacy-only follow-up: materialize it as a completed entry.
            let date = offer.followup_date.take().unwrap_or_else(|| now.date_naive());
            offer.followups.push(FollowupItem {
                id: id::followup_id(),
                date,
                notes: offer.notes.clone(),
                completed: true,
                completed_at: Some(now),
            });
            debug!(offer = %offer.id, %date, "legacy follow-up completed");
        }
    }

    // Keep the legacy field in sync with whatever is still pending. Under
    // normal operation nothing is, so this clears it.
    offer.followup_date = offer.active_followup().map(|a| a.date());
    true
}

/// Discard all pending follow-ups of `offer`, keeping completed history.
///
/// Fails when there is nothing to clear. Calling twice is harmless.
pub fn clear_followups(offer: &mut Offer) -> bool {
    let had_pending = offer.followups.iter().any(|i| !i.completed);
    let had_legacy = offer.followup_date.is_some();
    if !had_pending && !had_legacy {
        debug!(offer = %offer.id, "clear_followups rejected: nothing to clear");
        return false;
    }

    offer.followups.retain(|i| i.completed);
    offer.followup_date = None;
    debug!(offer = %offer.id, "pending follow-ups cleared");
    true
}
