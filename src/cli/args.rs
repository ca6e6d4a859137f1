//! CLI argument parsing.
//!
//! Hand-rolled so that parsing is a pure function of an argument list and
//! can be tested without touching the process environment.

use std::path::PathBuf;

use crate::playback::SpeedPreset;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Raw input options shared by `run` and `verify`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs {
    /// `--input`: comma-separated values, or a single integer.
    pub input: Option<String>,
    /// `--target`: target for array + target algorithms.
    pub target: Option<i64>,
    /// `--second`: second array for array-pair algorithms.
    pub second: Option<String>,
    /// `--seed`: seed for a generated input when `--input` is absent.
    pub seed: Option<u64>,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered algorithms
    List,
    /// Record and print one trace
    Run {
        /// Algorithm name.
        algorithm: String,
        /// Input options.
        input: InputArgs,
        /// Print the trace as JSON.
        json: bool,
    },
    /// Autoplay a configured session headlessly
    Play {
        /// Path to the session YAML file.
        config_path: PathBuf,
        /// Optional speed override.
        speed: Option<SpeedPreset>,
    },
    /// Check that repeated recordings are identical
    Verify {
        /// Algorithm name.
        algorithm: String,
        /// Input options.
        input: InputArgs,
        /// Number of recordings to compare.
        runs: usize,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "list" | "ls" => Command::List,
            "run" => Self::parse_run_command(args),
            "play" => Self::parse_play_command(args),
            "verify" => Self::parse_verify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse `--input/--target/--second/--seed` from `args[3..]`, handing
    /// anything else to `other`. Returns `None` on a malformed value.
    fn parse_input_options(
        args: &[String],
        mut other: impl FnMut(&str, Option<&String>) -> usize,
    ) -> Option<InputArgs> {
        let mut input = InputArgs::default();
        let mut i = 3;
        while i < args.len() {
            let value = args.get(i + 1);
            match args[i].as_str() {
                "--input" | "-i" => {
                    input.input = Some(value?.clone());
                    i += 2;
                }
                "--target" | "-t" => {
                    input.target = Some(value?.parse().ok()?);
                    i += 2;
                }
                "--second" => {
                    input.second = Some(value?.clone());
                    i += 2;
                }
                "--seed" => {
                    input.seed = Some(value?.parse().ok()?);
                    i += 2;
                }
                flag => i += other(flag, value),
            }
        }
        Some(input)
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an algorithm name");
            return Command::Help;
        }

        let mut json = false;
        let input = Self::parse_input_options(args, |flag, _| {
            if flag == "--json" {
                json = true;
            }
            1
        });

        match input {
            Some(input) => Command::Run {
                algorithm: args[2].clone(),
                input,
                json,
            },
            None => {
                eprintln!("Error: malformed option for 'run'");
                Command::Help
            }
        }
    }

    /// Parse the 'play' command arguments.
    fn parse_play_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'play' command requires a session config path");
            return Command::Help;
        }

        let mut speed = None;
        if args.len() > 4 && args[3] == "--speed" {
            match args[4].parse() {
                Ok(preset) => speed = Some(preset),
                Err(e) => eprintln!("Warning: {e}; using the configured speed"),
            }
        }

        Command::Play {
            config_path: PathBuf::from(&args[2]),
            speed,
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires an algorithm name");
            return Command::Help;
        }

        let mut runs = 3;
        let input = Self::parse_input_options(args, |flag, value| {
            if flag == "--runs" {
                if let Some(n) = value.and_then(|v| v.parse().ok()) {
                    runs = n;
                }
                2
            } else {
                1
            }
        });

        match input {
            Some(input) => Command::Verify {
                algorithm: args[2].clone(),
                input,
                runs: runs.max(2),
            },
            None => {
                eprintln!("Error: malformed option for 'verify'");
                Command::Help
            }
        }
    }
}
