//! `ot show` — show one offer in full.

use clap::Args;
use std::path::Path;

use offertrack_core::{Clock, Offer, Store, SystemClock, classify};

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Offer ID or unique prefix.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let store = Store::open(root).map_err(|e| super::fail(output, &e))?;
    let offer: Offer = match store.find_offer(&args.id) {
        Ok(offer) => offer.clone(),
        Err(err) => return Err(super::fail(output, &err)),
    };
    let today = SystemClock.today();
    let status = classify(&offer, today);

    render(output, &offer, |o, w| {
        pretty_section(w, &format!("Offer {}", o.id))?;
        pretty_kv(w, "case", &o.case_number)?;
        pretty_kv(w, "channel", &o.channel)?;
        pretty_kv(w, "type", &o.offer_type)?;
        pretty_kv(w, "logged", o.date.format("%Y-%m-%d %H:%M UTC").to_string())?;
        pretty_kv(
            w,
            "csat",
            o.csat.map_or_else(|| "-".into(), |c| c.to_string()),
        )?;
        pretty_kv(
            w,
            "converted",
            match (o.is_converted(), o.conversion_date) {
                (true, Some(date)) => format!("yes ({date})"),
                (true, None) => "yes".into(),
                _ => "no".into(),
            },
        )?;
        pretty_kv(w, "status", status.to_string())?;
        if let Some(notes) = &o.notes {
            pretty_kv(w, "notes", notes)?;
        }
        if let Some(active) = o.active_followup() {
            pretty_kv(w, "next follow-up", active.date().to_string())?;
        }
        if !o.followups.is_empty() {
            writeln!(w)?;
            pretty_section(w, "Follow-up history")?;
            for item in &o.followups {
                let state = if item.completed {
                    item.completed_at
                        .map_or_else(|| "done".into(), |ts| format!("done {}", ts.format("%Y-%m-%d")))
                } else {
                    "pending".into()
                };
                writeln!(w, "  {}  {}  [{}]", item.id, item.date, state)?;
            }
        }
        Ok(())
    })
}
