//! `ot notify` — run the follow-up check and manage notifications.

use clap::{Args, Subcommand};
use std::path::Path;

use offertrack_core::notify::NotificationLedger;
use offertrack_core::{Clock, Notification, SystemClock};

use crate::output::{OutputMode, pretty_rule, render_mode, render_success};

#[derive(Args, Debug)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub command: NotifyCommand,
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// Scan offers and create alerts for due/overdue follow-ups.
    Check,
    /// List current notifications.
    List {
        /// Only unread notifications.
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark a notification (or all of them) as read.
    Read {
        /// Notification ID; required unless --all is given.
        id: Option<String>,
        /// Mark every notification as read.
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
    /// Remove a notification. It reappears on the next check while the
    /// follow-up stays due.
    Dismiss {
        /// Notification ID.
        id: String,
    },
}

pub fn run_notify(args: &NotifyArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    match &args.command {
        NotifyCommand::Check => run_check(output, root),
        NotifyCommand::List { unread } => run_list(output, root, *unread),
        NotifyCommand::Read { id, all } => run_read(output, root, id.as_deref(), *all),
        NotifyCommand::Dismiss { id } => run_dismiss(output, root, id),
    }
}

/// One scan: load, check, persist. Also called by `ot watch` on every tick.
pub fn run_check(output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let created = check_once(root).map_err(|e| super::fail(output, &e))?;
    render_success(output, &format!("Check complete: {created} new notification(s)"))?;
    Ok(())
}

/// The scan itself, shared with the watch ticker (which has no output mode).
pub fn check_once(root: &Path) -> Result<usize, offertrack_core::Error> {
    let (_lock, mut store) = super::open_locked(root)?;
    let clock = SystemClock;

    let mut ledger = NotificationLedger::from_notifications(store.take_notifications());
    let created = ledger.check(store.offers(), clock.today(), clock.now());
    store.set_notifications(ledger.into_notifications());
    store.save()?;
    Ok(created)
}

fn run_list(output: OutputMode, root: &Path, unread_only: bool) -> anyhow::Result<()> {
    let store = offertrack_core::Store::open(root).map_err(|e| super::fail(output, &e))?;
    let rows: Vec<Notification> = store
        .notifications()
        .iter()
        .filter(|n| !unread_only || !n.read)
        .cloned()
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for n in rows {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}",
                    n.id,
                    n.offer_id,
                    n.followup_date,
                    if n.is_overdue { "overdue" } else { "due-today" },
                    if n.read { "read" } else { "unread" },
                )?;
            }
            Ok(())
        },
        |rows, w| {
            if rows.is_empty() {
                return writeln!(w, "No notifications");
            }
            for n in rows {
                let marker = if n.read { " " } else { "*" };
                writeln!(w, "{marker} {}  {}", n.id, n.title)?;
                writeln!(w, "    {}", n.message)?;
            }
            pretty_rule(w)?;
            writeln!(w, "{} notification(s)", rows.len())
        },
    )
}

fn run_read(output: OutputMode, root: &Path, id: Option<&str>, all: bool) -> anyhow::Result<()> {
    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;
    let mut ledger = NotificationLedger::from_notifications(store.take_notifications());

    let message = if all {
        ledger.mark_all_read();
        "All notifications marked read".to_string()
    } else {
        let Some(id) = id else {
            return Err(super::fail_validation(
                output,
                "notification id required",
                "Pass an id, or --all to mark everything read.",
                "missing_id",
            ));
        };
        if !ledger.mark_read(id) {
            return Err(super::fail_validation(
                output,
                &format!("no notification '{id}'"),
                "See current ids with `ot notify list`.",
                "notification_not_found",
            ));
        }
        format!("Notification {id} marked read")
    };

    store.set_notifications(ledger.into_notifications());
    store.save().map_err(|e| super::fail(output, &e))?;
    render_success(output, &message)?;
    Ok(())
}

fn run_dismiss(output: OutputMode, root: &Path, id: &str) -> anyhow::Result<()> {
    let (_lock, mut store) = super::open_locked(root).map_err(|e| super::fail(output, &e))?;
    let mut ledger = NotificationLedger::from_notifications(store.take_notifications());

    if !ledger.dismiss(id) {
        return Err(super::fail_validation(
            output,
            &format!("no notification '{id}'"),
            "See current ids with `ot notify list`.",
            "notification_not_found",
        ));
    }

    store.set_notifications(ledger.into_notifications());
    store.save().map_err(|e| super::fail(output, &e))?;
    render_success(output, &format!("Notification {id} dismissed"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_read_all_conflicts_with_id() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: NotifyArgs,
        }
        assert!(Wrapper::try_parse_from(["test", "read", "nt-abc", "--all"]).is_err());

        let w = Wrapper::parse_from(["test", "read", "--all"]);
        match w.args.command {
            NotifyCommand::Read { id, all } => {
                assert!(id.is_none());
                assert!(all);
            }
            other => panic!("expected read, got {other:?}"),
        }
    }
}
