//! One module per `ot` subcommand.

pub mod agenda;
pub mod convert;
pub mod edit;
pub mod followup;
pub mod init;
pub mod list;
pub mod log;
pub mod notify;
pub mod show;
pub mod stats;
pub mod watch;

use std::path::Path;
use std::time::Duration;

use offertrack_core::lock::StoreLock;
use offertrack_core::{Error, Store};

use crate::output::{CliError, OutputMode, Reported, render_error};

/// How long mutating commands wait on the store lock before giving up.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Open the store for a mutating command, holding the advisory lock for the
/// life of the returned guard.
pub fn open_locked(root: &Path) -> Result<(StoreLock, Store), Error> {
    let lock = StoreLock::acquire(&Store::lock_path(root), LOCK_TIMEOUT)?;
    let store = Store::open(root)?;
    Ok((lock, store))
}

/// Render a core error and bail, so the process exits non-zero.
///
/// The returned error is the [`Reported`] sentinel: `main` must not print
/// it again, stderr already carries the rendered form.
pub fn fail(output: OutputMode, err: &Error) -> anyhow::Error {
    let cli_err = CliError::from(err);
    if let Err(render_err) = render_error(output, &cli_err) {
        return render_err;
    }
    anyhow::Error::new(Reported)
}

/// Render a validation failure (boolean `false` from an engine operation)
/// and bail. These are not core errors; the operation simply declined.
pub fn fail_validation(
    output: OutputMode,
    message: &str,
    suggestion: &str,
    code: &str,
) -> anyhow::Error {
    let cli_err = CliError::with_details(message, suggestion, code);
    if let Err(render_err) = render_error(output, &cli_err) {
        return render_err;
    }
    anyhow::Error::new(Reported)
}
