//! `ot agenda` — follow-up buckets: overdue, today, upcoming, completed.

use clap::Args;
use std::io::Write;
use std::path::Path;

use offertrack_core::{Clock, Offer, Store, SystemClock, bucketize};

use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct AgendaArgs {
    /// Include the completed bucket.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AgendaRow {
    id: String,
    case_number: String,
    channel: String,
    followup_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AgendaView {
    overdue: Vec<AgendaRow>,
    today: Vec<AgendaRow>,
    upcoming: Vec<AgendaRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    completed: Vec<AgendaRow>,
    pending_count: usize,
}

fn row(offer: &Offer) -> AgendaRow {
    AgendaRow {
        id: offer.id.clone(),
        case_number: offer.case_number.clone(),
        channel: offer.channel.clone(),
        followup_date: offer.active_followup().map(|a| a.date()),
    }
}

fn write_bucket(w: &mut dyn Write, heading: &str, rows: &[AgendaRow]) -> std::io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    pretty_section(w, heading)?;
    for r in rows {
        writeln!(
            w,
            "  {}  {}  {}  {}",
            r.id,
            r.case_number,
            r.channel,
            r.followup_date.map_or_else(|| "-".into(), |d| d.to_string()),
        )?;
    }
    writeln!(w)
}

pub fn run_agenda(args: &AgendaArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let store = Store::open(root).map_err(|e| super::fail(output, &e))?;
    let today = SystemClock.today();
    let buckets = bucketize(store.offers(), today);

    let view = AgendaView {
        overdue: buckets.overdue.iter().map(|o| row(o)).collect(),
        today: buckets.today.iter().map(|o| row(o)).collect(),
        upcoming: buckets.upcoming.iter().map(|o| row(o)).collect(),
        completed: if args.all {
            buckets.completed.iter().map(|o| row(o)).collect()
        } else {
            Vec::new()
        },
        pending_count: buckets.pending_count(),
    };

    render_mode(
        output,
        &view,
        |v, w| {
            for (label, rows) in [
                ("overdue", &v.overdue),
                ("today", &v.today),
                ("upcoming", &v.upcoming),
                ("completed", &v.completed),
            ] {
                for r in rows {
                    writeln!(
                        w,
                        "{label}\t{}\t{}\t{}",
                        r.id,
                        r.case_number,
                        r.followup_date.map_or_else(|| "-".into(), |d| d.to_string()),
                    )?;
                }
            }
            Ok(())
        },
        |v, w| {
            if v.pending_count == 0 && v.completed.is_empty() {
                return writeln!(w, "Nothing on the agenda");
            }
            write_bucket(w, &format!("Overdue ({})", v.overdue.len()), &v.overdue)?;
            write_bucket(w, &format!("Due today ({})", v.today.len()), &v.today)?;
            write_bucket(w, &format!("Upcoming ({})", v.upcoming.len()), &v.upcoming)?;
            write_bucket(w, &format!("Completed ({})", v.completed.len()), &v.completed)?;
            writeln!(w, "{} follow-up(s) pending", v.pending_count)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agenda_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AgendaArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(!w.args.all);
    }
}
