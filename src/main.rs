//! stepwise CLI - record algorithm traces and play them back
//!
//! Usage:
//!   stepwise list
//!   stepwise run <algorithm> --input <values>
//!   stepwise play <session.yaml>
//!   stepwise verify <algorithm> --input <values>

use std::process::ExitCode;

use stepwise::cli::{run_cli, Args};

fn main() -> ExitCode {
    stepwise::init_tracing("warn");
    run_cli(Args::parse())
}
