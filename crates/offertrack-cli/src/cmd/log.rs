//! `ot log` — record a new offer.

use chrono::NaiveDate;
use clap::Args;
use std::path::Path;

use offertrack_core::lifecycle::ops::add_followup;
use offertrack_core::{Clock, Csat, Offer, SystemClock, id};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Case number identifying the interaction.
    #[arg(short, long)]
    pub case: String,

    /// Contact channel (e.g. phone, chat, email).
    #[arg(long)]
    pub channel: String,

    /// Offer type (e.g. new, upgrade, renewal).
    #[arg(short = 't', long = "type")]
    pub offer_type: String,

    /// Customer satisfaction: positive, neutral, or negative.
    #[arg(long)]
    pub csat: Option<String>,

    /// Free-text notes.
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Schedule a follow-up for this date (YYYY-MM-DD) right away.
    #[arg(short, long)]
    pub followup: Option<NaiveDate>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Logged {
    id: String,
    case_number: String,
}

pub fn run_log(args: &LogArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let csat = match args.csat.as_deref().map(str::parse::<Csat>).transpose() {
        Ok(csat) => csat,
        Err(err) => return Err(super::fail(output, &err)),
    };

    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;

    let clock = SystemClock;
    let mut offer = Offer::new(
        id::offer_id(),
        args.case.clone(),
        args.channel.clone(),
        args.offer_type.clone(),
        clock.now(),
    );
    offer.csat = csat;
    offer.notes = args.notes.clone();
    if let Some(date) = args.followup {
        // A fresh offer has no active follow-up, so this cannot decline.
        add_followup(&mut offer, date, args.notes.clone());
    }

    let logged = Logged {
        id: offer.id.clone(),
        case_number: offer.case_number.clone(),
    };
    store.add_offer(offer);
    store.save().map_err(|e| super::fail(output, &e))?;

    render(output, &logged, |v, w| {
        writeln!(w, "✓ Logged offer {} (case {})", v.id, v.case_number)
    })?;
    Ok(())
}
