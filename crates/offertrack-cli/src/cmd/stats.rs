//! `ot stats` — streaks, conversion, csat, and weekly trend.

use clap::Args;
use std::path::Path;

use offertrack_core::analytics::{
    ConversionStats, CsatSummary, WeekTrend, conversion_stats, csat_summary, current_streak,
    longest_streak, weekly_trend,
};
use offertrack_core::{Clock, Store, SystemClock, config};

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Trailing weeks in the trend table (config `stats.trend_weeks` when omitted).
    #[arg(short, long)]
    pub weeks: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    current_streak: u32,
    longest_streak: u32,
    conversion: ConversionStats,
    csat: CsatSummary,
    trend: Vec<WeekTrend>,
}

pub fn run_stats(args: &StatsArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let store = Store::open(root).map_err(|e| super::fail(output, &e))?;
    let config = config::load_config(root).map_err(|e| super::fail(output, &e))?;
    let weeks = args.weeks.unwrap_or(config.stats.trend_weeks);
    let today = SystemClock.today();
    let offers = store.offers();

    let view = StatsView {
        current_streak: current_streak(offers, today),
        longest_streak: longest_streak(offers),
        conversion: conversion_stats(offers),
        csat: csat_summary(offers),
        trend: weekly_trend(offers, today, weeks),
    };

    render(output, &view, |v, w| {
        pretty_section(w, "Activity")?;
        pretty_kv(w, "offers", v.conversion.total.to_string())?;
        pretty_kv(w, "streak", format!("{} day(s)", v.current_streak))?;
        pretty_kv(w, "best streak", format!("{} day(s)", v.longest_streak))?;
        writeln!(w)?;

        pretty_section(w, "Conversion")?;
        pretty_kv(w, "converted", v.conversion.converted.to_string())?;
        pretty_kv(w, "rate", format!("{:.1}%", v.conversion.rate * 100.0))?;
        if let Some(avg) = v.conversion.avg_lag_days {
            pretty_kv(w, "avg lag", format!("{avg:.1} day(s)"))?;
        }
        writeln!(w)?;

        pretty_section(w, "CSAT")?;
        pretty_kv(w, "positive", v.csat.positive.to_string())?;
        pretty_kv(w, "neutral", v.csat.neutral.to_string())?;
        pretty_kv(w, "negative", v.csat.negative.to_string())?;
        writeln!(w)?;

        pretty_section(w, "Weekly trend")?;
        writeln!(w, "{:<12} {:>7} {:>12} {:>11}", "WEEK", "OFFERS", "CONVERSIONS", "FOLLOW-UPS")?;
        for row in &v.trend {
            writeln!(
                w,
                "{:<12} {:>7} {:>12} {:>11}",
                row.week_start.to_string(),
                row.offers,
                row.conversions,
                row.followups_completed,
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: StatsArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.weeks.is_none());
    }
}
