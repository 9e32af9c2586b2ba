//! `ot convert` — mark an offer as converted.
//!
//! Date ordering is validated here: the engine itself trusts its input, so
//! the command layer rejects a conversion date before the offer date.

use chrono::NaiveDate;
use clap::Args;
use std::path::Path;

use offertrack_core::{Clock, Error, SystemClock};

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Offer ID or unique prefix.
    pub id: String,

    /// Conversion date (YYYY-MM-DD), defaults to today.
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

pub fn run_convert(args: &ConvertArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(|| SystemClock.today());

    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;

    let offer_day = match store.find_offer(&args.id) {
        Ok(offer) => offer.date.date_naive(),
        Err(err) => return Err(super::fail(output, &err)),
    };
    if date < offer_day {
        let err = Error::ConversionBeforeOffer {
            conversion: date,
            offer: offer_day,
        };
        return Err(super::fail(output, &err));
    }

    let id = match store.with_offer_mut(&args.id, |offer| {
        offer.converted = Some(true);
        offer.conversion_date = Some(date);
        offer.id.clone()
    }) {
        Ok(id) => id,
        Err(err) => return Err(super::fail(output, &err)),
    };

    store.save().map_err(|e| super::fail(output, &e))?;
    render_success(output, &format!("Offer {id} converted on {date}"))?;
    Ok(())
}
