//! End-to-end scenarios for the follow-up lifecycle engine.

use chrono::{NaiveDate, TimeZone, Utc};
use offertrack_core::lifecycle::ops::{add_followup, clear_followups, complete_followup};
use offertrack_core::lifecycle::{FollowupStatus, classify};
use offertrack_core::model::{FollowupItem, Offer};
use offertrack_core::notify::NotificationLedger;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn offer(id: &str) -> Offer {
    Offer::new(
        id.into(),
        format!("CASE-{id}"),
        "phone".into(),
        "upgrade".into(),
        Utc.with_ymd_and_hms(2023, 12, 1, 9, 0, 0).single().expect("valid ts"),
    )
}

#[test]
fn legacy_date_due_today_classifies_due_today() {
    let mut o = offer("of-a");
    o.followup_date = Some(day(2024, 1, 1));
    assert_eq!(classify(&o, day(2024, 1, 1)), FollowupStatus::DueToday);
}

#[test]
fn modern_entry_past_due_classifies_overdue() {
    let mut o = offer("of-b");
    o.followups = vec![FollowupItem {
        id: "f1".into(),
        date: day(2024, 1, 1),
        notes: None,
        completed: false,
        completed_at: None,
    }];
    assert_eq!(classify(&o, day(2024, 1, 5)), FollowupStatus::Overdue);
}

#[test]
fn add_on_offer_with_active_followup_is_rejected_unchanged() {
    let mut o = offer("of-c");
    assert!(add_followup(&mut o, day(2024, 1, 15), None));
    let snapshot = o.clone();

    assert!(!add_followup(&mut o, day(2024, 2, 1), None));
    assert_eq!(o, snapshot);
}

#[test]
fn completed_only_offer_resists_clearing() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).single().expect("valid ts");
    let mut o = offer("of-d");
    assert!(add_followup(&mut o, day(2024, 1, 1), None));
    assert!(complete_followup(&mut o, now));

    assert_eq!(classify(&o, day(2024, 1, 5)), FollowupStatus::Completed);
    assert!(!clear_followups(&mut o));
    assert_eq!(o.followups.len(), 1);
    assert!(o.followups[0].completed);
}

#[test]
fn completing_a_legacy_followup_synthesizes_history() {
    let now = Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).single().expect("valid ts");
    let mut o = offer("of-e");
    o.followup_date = Some(day(2024, 1, 10));

    assert!(complete_followup(&mut o, now));
    assert_eq!(o.followups.len(), 1);
    assert_eq!(o.followups[0].date, day(2024, 1, 10));
    assert!(o.followups[0].completed);
    assert_eq!(o.followups[0].completed_at, Some(now));
    assert_eq!(o.followup_date, None);
}

#[test]
fn full_lifecycle_schedule_complete_reschedule() {
    let today = day(2024, 1, 15);
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).single().expect("valid ts");
    let mut o = offer("of-f");

    assert_eq!(classify(&o, today), FollowupStatus::None);

    assert!(add_followup(&mut o, day(2024, 1, 15), Some("first call".into())));
    assert_eq!(classify(&o, today), FollowupStatus::DueToday);

    assert!(complete_followup(&mut o, now));
    assert_eq!(classify(&o, today), FollowupStatus::Completed);

    assert!(add_followup(&mut o, day(2024, 1, 22), None));
    assert_eq!(classify(&o, today), FollowupStatus::Active);
    assert_eq!(o.followup_date, Some(day(2024, 1, 22)));
    assert_eq!(o.followups.len(), 2);
}

#[test]
fn completing_a_followup_silences_its_notification_path() {
    let today = day(2024, 1, 15);
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).single().expect("valid ts");

    let mut o = offer("of-g");
    assert!(add_followup(&mut o, day(2024, 1, 10), None));

    let mut ledger = NotificationLedger::default();
    assert_eq!(ledger.check(std::slice::from_ref(&o), today, now), 1);

    assert!(complete_followup(&mut o, now));
    ledger.dismiss_for_offer(&o.id);
    assert!(ledger.notifications().is_empty());

    // Condition gone: the next scan stays quiet.
    assert_eq!(ledger.check(std::slice::from_ref(&o), today, now), 0);
}
