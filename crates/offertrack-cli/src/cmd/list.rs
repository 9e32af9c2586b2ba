//! `ot list` — list offers with filtering.

use clap::Args;
use std::path::Path;

use offertrack_core::{Clock, FollowupStatus, Store, SystemClock, classify, config};

use crate::output::{OutputMode, pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by follow-up status: none, active, due-today, overdue, completed.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by contact channel.
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Only converted offers.
    #[arg(long)]
    pub converted: bool,

    /// Maximum offers to show (config `list.default_limit` when omitted).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    id: String,
    case_number: String,
    channel: String,
    offer_type: String,
    csat: Option<String>,
    converted: bool,
    status: FollowupStatus,
    followup_date: Option<chrono::NaiveDate>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let status_filter = match args
        .status
        .as_deref()
        .map(str::parse::<FollowupStatus>)
        .transpose()
    {
        Ok(filter) => filter,
        Err(err) => {
            return Err(super::fail_validation(
                output,
                &err.to_string(),
                "valid statuses: none, active, due-today, overdue, completed",
                "E2003",
            ));
        }
    };

    let store = Store::open(root).map_err(|e| super::fail(output, &e))?;
    let config = config::load_config(root).map_err(|e| super::fail(output, &e))?;
    let limit = args.limit.unwrap_or(config.list.default_limit);
    let today = SystemClock.today();

    let rows: Vec<Row> = store
        .offers()
        .iter()
        .filter(|o| args.channel.as_deref().is_none_or(|c| o.channel == c))
        .filter(|o| !args.converted || o.is_converted())
        .map(|o| (o, classify(o, today)))
        .filter(|(_, status)| status_filter.is_none_or(|f| *status == f))
        .take(limit)
        .map(|(o, status)| Row {
            id: o.id.clone(),
            case_number: o.case_number.clone(),
            channel: o.channel.clone(),
            offer_type: o.offer_type.clone(),
            csat: o.csat.map(|c| c.to_string()),
            converted: o.is_converted(),
            status,
            followup_date: o.active_followup().map(|a| a.date()),
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.id,
                    row.case_number,
                    row.channel,
                    row.status,
                    row.csat.as_deref().unwrap_or("-"),
                    row.followup_date.map_or_else(|| "-".into(), |d| d.to_string()),
                )?;
            }
            Ok(())
        },
        |rows, w| {
            if rows.is_empty() {
                return writeln!(w, "No offers found");
            }
            writeln!(
                w,
                "{:<10} {:<12} {:<8} {:<10} {:<9} {}",
                "ID", "CASE", "CHANNEL", "STATUS", "CSAT", "FOLLOW-UP"
            )?;
            pretty_rule(w)?;
            for row in rows {
                writeln!(
                    w,
                    "{:<10} {:<12} {:<8} {:<10} {:<9} {}",
                    row.id,
                    row.case_number,
                    row.channel,
                    row.status.to_string(),
                    row.csat.as_deref().unwrap_or("-"),
                    row.followup_date.map_or_else(|| "-".into(), |d| d.to_string()),
                )?;
            }
            Ok(())
        },
    )
}
