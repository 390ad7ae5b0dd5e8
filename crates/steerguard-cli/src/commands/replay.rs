//! `replay` command

use anyhow::{Context, Result};
use steerguard_safety::SteeringLimits;

use crate::candump;
use crate::commands::ReplayArgs;
use crate::output;
use crate::replay::{self, ReplayOptions};

pub fn execute(args: &ReplayArgs, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .map_err(crate::error::CliError::from)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let records = candump::parse_log(&text)?;
    tracing::info!(frames = records.len(), file = %args.file.display(), "replaying log");

    let options = ReplayOptions {
        stop_on_revoke: args.stop_on_revoke,
        interface: args.interface.clone(),
    };
    let report = replay::run(&records, SteeringLimits::BMW, &options)?;
    output::print_replay(&report, json);
    Ok(())
}
