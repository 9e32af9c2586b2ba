//! `ot edit` — update identifying fields, notes, or csat.

use clap::Args;
use std::path::Path;

use offertrack_core::Csat;

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Offer ID or unique prefix.
    pub id: String,

    /// New case number.
    #[arg(long)]
    pub case: Option<String>,

    /// New contact channel.
    #[arg(long)]
    pub channel: Option<String>,

    /// New offer type.
    #[arg(short = 't', long = "type")]
    pub offer_type: Option<String>,

    /// New satisfaction rating: positive, neutral, or negative.
    #[arg(long)]
    pub csat: Option<String>,

    /// Replace the notes text.
    #[arg(short, long)]
    pub notes: Option<String>,
}

pub fn run_edit(args: &EditArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let csat = match args.csat.as_deref().map(str::parse::<Csat>).transpose() {
        Ok(csat) => csat,
        Err(err) => return Err(super::fail(output, &err)),
    };

    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;

    let id = match store.with_offer_mut(&args.id, |offer| {
        if let Some(case) = &args.case {
            offer.case_number.clone_from(case);
        }
        if let Some(channel) = &args.channel {
            offer.channel.clone_from(channel);
        }
        if let Some(offer_type) = &args.offer_type {
            offer.offer_type.clone_from(offer_type);
        }
        if let Some(csat) = csat {
            offer.csat = Some(csat);
        }
        if let Some(notes) = &args.notes {
            offer.notes = Some(notes.clone());
        }
        offer.id.clone()
    }) {
        Ok(id) => id,
        Err(err) => return Err(super::fail(output, &err)),
    };

    store.save().map_err(|e| super::fail(output, &e))?;
    render_success(output, &format!("Updated offer {id}"))?;
    Ok(())
}
