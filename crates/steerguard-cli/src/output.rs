//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use steerguard_safety::{ControlTransition, SteeringLimits, TxVerdict};

use crate::replay::{DecisionKind, ReplayReport};

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print a replay report in the requested format
pub fn print_replay(report: &ReplayReport, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "replay": report,
        }));
        return;
    }

    for decision in &report.decisions {
        let what = match decision.kind {
            DecisionKind::Gate {
                transition: ControlTransition::Granted,
            } => "controls allowed".green().to_string(),
            DecisionKind::Gate {
                transition: ControlTransition::Revoked(cause),
            } => format!("controls revoked ({cause})").red().to_string(),
            DecisionKind::Verdict {
                verdict: TxVerdict::Send,
            } => "commands sent".to_string(),
            DecisionKind::Verdict {
                verdict: TxVerdict::Suppress(reason),
            } => format!("commands suppressed ({reason})").yellow().to_string(),
        };
        println!(
            "{:>6}  {:>17.6}  {:03X}  {}",
            decision.line,
            seconds(decision.timestamp_us),
            decision.address,
            what
        );
    }

    let m = &report.metrics;
    println!();
    println!("{}", "Summary:".bold());
    println!("  Frames replayed:   {}", report.frames);
    if report.stopped_early {
        println!("  {}", "Stopped at first revocation".yellow());
    }
    println!("  Inbound frames:    {}", m.rx_frames);
    println!(
        "  Commands:          {} ({} sent, {} suppressed)",
        m.tx_frames, m.tx_allowed, m.tx_suppressed
    );
    println!("  Grants:            {}", m.grants);
    println!(
        "  Revocations:       {} (cruise {}, brake {}, angle {}, command {})",
        m.revocations(),
        m.revoked_cruise,
        m.revoked_brake,
        m.revoked_angle_window,
        m.revoked_command
    );
    println!("  Window re-anchors: {}", m.reanchors);
    let gate = if report.final_state.controls_allowed() {
        "open".green()
    } else {
        "closed".red()
    };
    println!("  Final gate:        {gate}");
}

/// Print steering limits in the requested format
pub fn print_limits(limits: &SteeringLimits, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "limits": limits,
        }));
        return;
    }

    let model = &limits.model;
    println!("{}", "Steering limits (speed in m/s, angles in degrees):".bold());
    for (name, table) in [
        ("rate up", model.rate_up()),
        ("rate down", model.rate_down()),
        ("max angle", model.max_angle()),
    ] {
        let points: Vec<String> = table
            .points()
            .map(|(speed, value)| format!("{speed}: {value}"))
            .collect();
        println!("  {name:<10} {}", points.join(", "));
    }
    println!("  epsilon    {}", model.epsilon());
    println!(
        "  rt window  {} us, rate x{}",
        limits.rt_interval_us, limits.rt_rate_multiplier
    );
}

#[allow(clippy::cast_precision_loss)]
fn seconds(timestamp_us: u64) -> f64 {
    timestamp_us as f64 / 1_000_000.0
}
