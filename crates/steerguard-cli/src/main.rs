//! steerguard - steering safety replay CLI
//!
//! Replays recorded CAN traffic through the BMW steering safety hooks and
//! reports where the actuation gate opened, closed, or suppressed commands.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod candump;
mod commands;
mod error;
mod output;
mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::ReplayArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "steerguard")]
#[command(about = "Replay CAN logs through the steering safety hooks")]
#[command(version)]
#[command(long_about = "
steerguard feeds a candump log through the BMW steering-angle safety hooks
and reports every change in the actuation gate and in the verdict given to
steering commands. Frames on 0x488 are treated as outgoing commands; all
other frames as incoming vehicle signals.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a candump log through the safety hooks
    Replay(ReplayArgs),

    /// Show the steering limits in effect
    Limits,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("steerguard={log_level},steerguard_safety={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute_command(&cli) {
        if cli.json {
            output::print_error_json(&e);
        } else {
            output::print_error_human(&e);
        }

        let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(exit_code);
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay(args) => commands::replay::execute(args, cli.json),
        Commands::Limits => commands::limits::execute(cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_limits_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["steerguard", "limits"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Limits));
        Ok(())
    }

    #[test]
    fn parse_replay_with_options() -> TestResult {
        let cli = Cli::try_parse_from([
            "steerguard",
            "replay",
            "drive.log",
            "--stop-on-revoke",
            "--interface",
            "can1",
            "--json",
            "-vv",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        let Commands::Replay(args) = cli.command else {
            return Err("expected replay command".into());
        };
        assert_eq!(args.file, std::path::PathBuf::from("drive.log"));
        assert!(args.stop_on_revoke);
        assert_eq!(args.interface.as_deref(), Some("can1"));
        Ok(())
    }

    #[test]
    fn replay_requires_file() {
        assert!(Cli::try_parse_from(["steerguard", "replay"]).is_err());
    }

    #[test]
    fn unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["steerguard", "flash"]).is_err());
    }
}
