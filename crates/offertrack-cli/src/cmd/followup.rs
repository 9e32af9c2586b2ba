//! `ot followup` — schedule, complete, or clear follow-ups.
//!
//! The three engine operations report validation failure as a boolean; this
//! module maps `false` onto a rendered error and a non-zero exit, leaving
//! the store untouched.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::Path;

use offertrack_core::lifecycle::ops::{add_followup, clear_followups, complete_followup};
use offertrack_core::notify::NotificationLedger;
use offertrack_core::{Clock, SystemClock};

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct FollowupArgs {
    #[command(subcommand)]
    pub command: FollowupCommand,
}

#[derive(Subcommand, Debug)]
pub enum FollowupCommand {
    /// Schedule a follow-up for an offer.
    Add {
        /// Offer ID or unique prefix.
        id: String,
        /// Due date (YYYY-MM-DD).
        date: NaiveDate,
        /// Notes for the follow-up (offer notes are snapshotted when omitted).
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Mark the pending follow-up as completed.
    Done {
        /// Offer ID or unique prefix.
        id: String,
    },
    /// Discard the pending follow-up, keeping completed history.
    Clear {
        /// Offer ID or unique prefix.
        id: String,
    },
}

pub fn run_followup(args: &FollowupArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;

    match &args.command {
        FollowupCommand::Add { id, date, notes } => {
            let (added, offer_id) = match store.with_offer_mut(id, |offer| {
                (add_followup(offer, *date, notes.clone()), offer.id.clone())
            }) {
                Ok(result) => result,
                Err(err) => return Err(super::fail(output, &err)),
            };
            if !added {
                return Err(super::fail_validation(
                    output,
                    &format!("offer {offer_id} already has a pending follow-up"),
                    "Complete or clear it first: `ot followup done` / `ot followup clear`.",
                    "followup_active",
                ));
            }
            store.save().map_err(|e| super::fail(output, &e))?;
            render_success(output, &format!("Follow-up scheduled for {date} on {offer_id}"))?;
        }
        FollowupCommand::Done { id } => {
            let now = SystemClock.now();
            let (completed, offer_id) = match store.with_offer_mut(id, |offer| {
                (complete_followup(offer, now), offer.id.clone())
            }) {
                Ok(result) => result,
                Err(err) => return Err(super::fail(output, &err)),
            };
            if !completed {
                return Err(super::fail_validation(
                    output,
                    &format!("offer {offer_id} has no pending follow-up"),
                    "Schedule one with `ot followup add`.",
                    "nothing_pending",
                ));
            }

            // The alert no longer applies; drop it rather than waiting for
            // the next scan to notice.
            let mut ledger = NotificationLedger::from_notifications(store.take_notifications());
            ledger.dismiss_for_offer(&offer_id);
            store.set_notifications(ledger.into_notifications());

            store.save().map_err(|e| super::fail(output, &e))?;
            render_success(output, &format!("Follow-up completed on {offer_id}"))?;
        }
        FollowupCommand::Clear { id } => {
            let (cleared, offer_id) = match store.with_offer_mut(id, |offer| {
                (clear_followups(offer), offer.id.clone())
            }) {
                Ok(result) => result,
                Err(err) => return Err(super::fail(output, &err)),
            };
            if !cleared {
                return Err(super::fail_validation(
                    output,
                    &format!("offer {offer_id} has nothing to clear"),
                    "Only pending follow-ups can be cleared; history is kept.",
                    "nothing_pending",
                ));
            }

            let mut ledger = NotificationLedger::from_notifications(store.take_notifications());
            ledger.dismiss_for_offer(&offer_id);
            store.set_notifications(ledger.into_notifications());

            store.save().map_err(|e| super::fail(output, &e))?;
            render_success(output, &format!("Pending follow-up cleared on {offer_id}"))?;
        }
    }
    Ok(())
}
