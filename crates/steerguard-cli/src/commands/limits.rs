//! `limits` command

use anyhow::Result;
use steerguard_safety::SteeringLimits;

use crate::error::CliError;
use crate::output;

pub fn execute(json: bool) -> Result<()> {
    let limits = SteeringLimits::BMW;
    limits.validate().map_err(CliError::from)?;
    output::print_limits(&limits, json);
    Ok(())
}
