//! CLI output formatting.
//!
//! All user-facing text goes to stdout from here; diagnostics go through
//! `tracing` to stderr.

use std::time::Duration;

use serde_json::Value;

use super::commands::VerificationReport;
use crate::algorithms::AlgorithmInfo;
use crate::trace::{Frame, Trace};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Version line, including the git revision when the build captured one.
#[must_use]
pub fn version_string() -> String {
    let version = option_env!("STEPWISE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    match option_env!("GIT_HASH").filter(|hash| !hash.is_empty()) {
        Some(hash) => format!("stepwise {version} ({})", &hash[..hash.len().min(12)]),
        None => format!("stepwise {version}"),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"stepwise - Record algorithm step histories and play them back

USAGE:
    stepwise <COMMAND> [OPTIONS]

COMMANDS:
    list                        List available algorithms

    run <algorithm>             Record a trace and print every frame
        --input <csv|n>         Array values, board size, or n
        --target <N>            Target value (two_sum)
        --second <csv>          Second array (cookie_assignment)
        --seed <N>              Seed for a generated input when --input is absent
        --json                  Print the trace as JSON

    play <session.yaml>         Autoplay a configured session to the end
        --speed <preset>        slowest | slow | normal | fast | fastest

    verify <algorithm>          Check that repeated recordings are identical
        (same input options as run)
        --runs <N>              Number of recordings (default: 3)

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    stepwise run kadane --input -2,1,-3,4,-1,2,1,-5,4
    stepwise run two_sum --input 2,7,11,15 --target 9 --json
    stepwise run n_queens --input 6
    stepwise verify knights_tour --input 6 --runs 5
    stepwise play session.yaml --speed fast

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=stepwise=debug) for diagnostics on stderr.
"
    );
}

/// Print the algorithm catalog.
pub fn print_algorithm_list(infos: &[AlgorithmInfo]) {
    println!("Available algorithms:\n");
    for info in infos {
        println!("  {:<18} [{}] {}", info.name, info.input_kind, info.description);
    }
    println!("\nUsage: stepwise run <algorithm> --input <values>");
}

/// Narrative text of a JSON payload, if it has one.
#[must_use]
pub fn narrative(payload: &Value) -> &str {
    payload.get("narrative").and_then(Value::as_str).unwrap_or("")
}

/// Print one frame as `[seq] narrative`.
pub fn print_frame(frame: &Frame<Value>) {
    println!("[{:>4}] {}", frame.sequence(), narrative(frame.payload()));
}

/// Print one autoplay step with its logical timestamp.
pub fn print_playback_step(elapsed: Duration, frame: &Frame<Value>) {
    println!(
        "{:>7}ms  [{:>4}] {}",
        elapsed.as_millis(),
        frame.sequence(),
        narrative(frame.payload())
    );
}

/// Print the frame count and the terminal frame's payload.
pub fn print_trace_summary(trace: &Trace<Value>) {
    println!("\n{RULE}");
    println!("Frames: {}", trace.len());
    if let Some(last) = trace.last() {
        let mut result = last.payload().clone();
        if let Some(fields) = result.as_object_mut() {
            fields.remove("narrative");
            fields.remove("finished");
        }
        println!("Result: {result}");
    }
    println!("{RULE}");
}

/// Print a determinism report.
pub fn print_verification(report: &VerificationReport) {
    let status = if report.passed() { "PASSED" } else { "FAILED" };
    let sym = if report.passed() { "✓" } else { "✗" };

    println!("{RULE}");
    println!("Determinism Check: {}", report.algorithm);
    println!("{RULE}\n");

    println!("  Runs:      {}", report.fingerprints.len());
    println!("  Frames:    {}", report.frames);
    println!("  Identical: {}", report.identical);
    println!("  Replay:    {}", if report.replay_consistent { "consistent" } else { "MISMATCH" });

    if let Some(reference) = report.fingerprints.first() {
        println!("\n  Reference: {reference}");
        for (i, fingerprint) in report.fingerprints.iter().enumerate().skip(1) {
            let mark = if fingerprint == reference { "=" } else { "!" };
            println!("    Run {}: {fingerprint} {mark}", i + 1);
        }
    }

    println!("\n{RULE}");
    println!("{sym} Result: {status}");
    println!("{RULE}");
}
