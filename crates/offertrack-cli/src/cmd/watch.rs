//! `ot watch` — repeating follow-up check.
//!
//! Owns a [`Ticker`] that scans immediately on start and then once per
//! period. The ticker is torn down when the command ends (bounded runs via
//! `--cycles`) or the process is killed.

use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use offertrack_core::{Ticker, config};

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Check period in minutes (config `notify.period_minutes` when omitted).
    #[arg(short, long)]
    pub period: Option<u64>,

    /// Stop after this many checks (runs until killed when omitted).
    #[arg(long)]
    pub cycles: Option<u64>,
}

pub fn run_watch(args: &WatchArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let config = config::load_config(root).map_err(|e| super::fail(output, &e))?;
    let minutes = args.period.unwrap_or(config.notify.period_minutes).max(1);
    let period = Duration::from_secs(minutes * 60);
    let cycles = args.cycles;

    // Fail fast on an uninitialized store before going quiet in the loop.
    offertrack_core::Store::open(root).map_err(|e| super::fail(output, &e))?;

    info!(minutes, "watch started");
    let tick_root: PathBuf = root.to_path_buf();
    let mut completed: u64 = 0;
    let ticker = Ticker::spawn(period, move || {
        match super::notify::check_once(&tick_root) {
            Ok(created) if created > 0 => info!(created, "watch check created alerts"),
            Ok(_) => {}
            Err(err) => warn!(%err, "watch check failed; will retry next tick"),
        }
        completed += 1;
        cycles.is_none_or(|limit| completed < limit)
    });

    ticker.join();
    render_success(output, "Watch finished")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: WatchArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.period.is_none());
        assert!(w.args.cycles.is_none());

        let w = Wrapper::parse_from(["test", "--period", "5", "--cycles", "2"]);
        assert_eq!(w.args.period, Some(5));
        assert_eq!(w.args.cycles, Some(2));
    }
}
