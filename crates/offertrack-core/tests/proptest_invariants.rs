//! Property tests for the lifecycle invariants.

use chrono::{Duration, TimeZone, Utc};
use offertrack_core::lifecycle::ops::{add_followup, clear_followups, complete_followup};
use offertrack_core::lifecycle::{FollowupStatus, classify};
use offertrack_core::model::{FollowupItem, Offer};
use offertrack_core::notify::NotificationLedger;
use proptest::prelude::*;

use generators::*;

/// One public-operation step applied to an offer.
#[derive(Debug, Clone)]
enum Op {
    Add(chrono::NaiveDate),
    Complete,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> + Clone {
    prop_oneof![
        arb_day().prop_map(Op::Add),
        Just(Op::Complete),
        Just(Op::Clear),
    ]
}

fn fresh_offer() -> Offer {
    Offer::new(
        "of-prop01".into(),
        "CASE-000".into(),
        "phone".into(),
        "new".into(),
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("valid ts"),
    )
}

fn apply(offer: &mut Offer, op: &Op) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid ts");
    match op {
        Op::Add(date) => {
            add_followup(offer, *date, None);
        }
        Op::Complete => {
            complete_followup(offer, now);
        }
        Op::Clear => {
            clear_followups(offer);
        }
    }
}

fn incomplete_count(offer: &Offer) -> usize {
    offer.followups.iter().filter(|i| !i.completed).count()
}

fn completed_count(offer: &Offer) -> usize {
    offer.followups.iter().filter(|i| i.completed).count()
}

proptest! {
    /// Never two incomplete entries after any sequence of public operations.
    #[test]
    fn at_most_one_active_entry(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut offer = fresh_offer();
        for op in &ops {
            apply(&mut offer, op);
            prop_assert!(incomplete_count(&offer) <= 1);
        }
    }

    /// Completed entries only accumulate; no public operation deletes them.
    #[test]
    fn completed_count_is_monotonic(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut offer = fresh_offer();
        let mut prev = 0;
        for op in &ops {
            apply(&mut offer, op);
            let count = completed_count(&offer);
            prop_assert!(count >= prev);
            prev = count;
        }
    }

    /// Right after completing, classification is never a pending status.
    ///
    /// Restricted to single-active offers: multi-active records (only
    /// producible by direct data edits) legitimately stay pending after one
    /// completion.
    #[test]
    fn complete_leaves_no_pending_status(offer in arb_offer(), today in arb_day()) {
        let mut offer = offer;
        prop_assume!(incomplete_count(&offer) <= 1);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid ts");
        if complete_followup(&mut offer, now) {
            let status = classify(&offer, today);
            prop_assert!(
                matches!(status, FollowupStatus::None | FollowupStatus::Completed),
                "got {status} after complete"
            );
        }
    }

    /// Clearing keeps every completed entry, byte for byte.
    #[test]
    fn clear_preserves_completed_history(offer in arb_offer()) {
        let mut offer = offer;
        let history: Vec<FollowupItem> = offer
            .followups
            .iter()
            .filter(|i| i.completed)
            .cloned()
            .collect();

        clear_followups(&mut offer);
        prop_assert_eq!(offer.followups, history);
        prop_assert_eq!(offer.followup_date, None);
    }

    /// Legacy single-date offers classify exactly like their modern twin.
    #[test]
    fn legacy_equivalence(date in arb_day(), offset in -5i64..5) {
        let today = date + Duration::days(offset);

        let mut legacy = fresh_offer();
        legacy.followup_date = Some(date);

        let mut modern = fresh_offer();
        modern.followups = vec![FollowupItem {
            id: "fu-twin01".into(),
            date,
            notes: None,
            completed: false,
            completed_at: None,
        }];

        prop_assert_eq!(classify(&legacy, today), classify(&modern, today));
    }

    /// A repeated notification scan with unchanged offers adds nothing.
    #[test]
    fn notification_check_is_idempotent(offers in arb_offers()) {
        let today = anchor_day();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).single().expect("valid ts");

        let mut ledger = NotificationLedger::default();
        ledger.check(&offers, today, now);
        let after_first = ledger.notifications().to_vec();

        let created = ledger.check(&offers, today, now);
        prop_assert_eq!(created, 0);
        prop_assert_eq!(ledger.notifications(), after_first.as_slice());
    }

    /// Exactly one notification per (offer, due date), however often we scan.
    #[test]
    fn notifications_deduplicate_by_offer_and_date(offers in arb_offers(), scans in 1usize..4) {
        let today = anchor_day();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).single().expect("valid ts");

        let mut ledger = NotificationLedger::default();
        for _ in 0..scans {
            ledger.check(&offers, today, now);
        }

        let mut seen = std::collections::HashSet::new();
        for n in ledger.notifications() {
            prop_assert!(
                seen.insert((n.offer_id.clone(), n.followup_date)),
                "duplicate notification for {} on {}",
                n.offer_id,
                n.followup_date
            );
        }
    }
}
