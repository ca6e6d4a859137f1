//! Command-line front end.
//!
//! Argument parsing, command handlers, and output formatting live in
//! separate files so each can be tested without spawning the binary.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, InputArgs};
pub use commands::{
    autoplay_headless, build_input, parse_csv, run_cli, verify_recordings, VerificationReport,
};
pub use output::{print_help, print_version, version_string};
