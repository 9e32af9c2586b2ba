//! `ot init` — create the tracker store.

use clap::Args;
use std::path::Path;

use offertrack_core::Store;

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct InitArgs {}

pub fn run_init(_args: &InitArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    match Store::init(root) {
        Ok(_) => {
            render_success(output, &format!("Initialized tracker at {}", root.display()))?;
            Ok(())
        }
        Err(err) => Err(super::fail(output, &err)),
    }
}
