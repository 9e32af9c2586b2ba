//! Notification derivation.
//!
//! [`NotificationLedger`] turns classifier results into user-facing alerts.
//! The scan is an idempotent linear pass: running it twice with unchanged
//! offers creates nothing new, and a dismissed alert reappears on the next
//! scan for as long as its follow-up stays due or overdue.

mod ticker;

pub use ticker::Ticker;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::id;
use crate::lifecycle::classify;
use crate::model::{Notification, Offer};

/// The set of open notifications, deduplicated by (offer, due date).
#[derive(Debug, Clone, Default)]
pub struct NotificationLedger {
    notifications: Vec<Notification>,
}

impl NotificationLedger {
    /// Wrap an existing notification list (e.g. loaded from the store).
    #[must_use]
    pub const fn from_notifications(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    /// Current notifications, in creation order (the scan appends).
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Give the notification list back, e.g. for persisting.
    #[must_use]
    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }

    /// Count of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Scan `offers` and ensure one notification per due/overdue follow-up.
    ///
    /// Returns how many notifications were created. An existing notification
    /// for the same offer and the same active-followup date suppresses a new
    /// one, read or not.
    pub fn check(&mut self, offers: &[Offer], today: NaiveDate, now: DateTime<Utc>) -> usize {
        let mut created = 0;
        for offer in offers {
            let status = classify(offer, today);
            if !status.needs_attention() {
                continue;
            }
            let Some(due) = offer.active_followup().map(|a| a.date()) else {
                continue;
            };
            if self.has_open(&offer.id, due) {
                debug!(offer = %offer.id, %due, "notification already open, skipping");
                continue;
            }

            self.notifications.push(build_notification(offer, due, today, now));
            created += 1;
        }

        if created > 0 {
            info!(created, "notification check created alerts");
        }
        created
    }

    /// Mark one notification as read. Returns false if the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification as read (panel-opened semantics).
    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    /// Remove one notification. Returns false if the id is unknown.
    ///
    /// Dismissing does not touch the underlying follow-up; the next scan
    /// recreates the alert while the condition persists.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Remove every notification for one offer, used when its follow-up is
    /// completed or cleared.
    pub fn dismiss_for_offer(&mut self, offer_id: &str) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.offer_id != offer_id);
        before - self.notifications.len()
    }

    fn has_open(&self, offer_id: &str, due: NaiveDate) -> bool {
        self.notifications
            .iter()
            .any(|n| n.offer_id == offer_id && n.followup_date == due)
    }
}

fn build_notification(
    offer: &Offer,
    due: NaiveDate,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Notification {
    let is_overdue = due < today;
    let (title, message) = if is_overdue {
        let days = (today - due).num_days();
        let unit = if days == 1 { "day" } else { "days" };
        (
            "Follow-up overdue".to_string(),
            format!(
                "Case {} ({}) has a follow-up {days} {unit} overdue.",
                offer.case_number, offer.channel
            ),
        )
    } else {
        (
            "Follow-up due today".to_string(),
            format!(
                "Case {} ({}) has a follow-up due today.",
                offer.case_number, offer.channel
            ),
        )
    };

    Notification {
        id: id::notification_id(),
        offer_id: offer.id.clone(),
        title,
        message,
        timestamp: now,
        followup_date: due,
        read: false,
        is_urgent: due == today,
        is_overdue,
    }
}
