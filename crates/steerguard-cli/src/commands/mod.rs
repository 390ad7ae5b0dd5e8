//! Command implementations

pub mod limits;
pub mod replay;

use std::path::PathBuf;

use clap::Args;

/// Arguments of the `replay` subcommand
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// candump log file (`candump -l` format)
    pub file: PathBuf,

    /// Stop at the first revocation of controls
    #[arg(long)]
    pub stop_on_revoke: bool,

    /// Only replay frames captured on this interface
    #[arg(long, value_name = "IFACE")]
    pub interface: Option<String>,
}
