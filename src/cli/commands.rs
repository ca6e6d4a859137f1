//! CLI command handlers.
//!
//! Each handler prints to stdout and maps failures to a non-zero exit code.
//! The pieces with real logic (`build_input`, `verify_recordings`,
//! `autoplay_headless`) return values so they can be tested directly.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tracing::debug;

use super::args::InputArgs;
use super::output::{
    print_algorithm_list, print_frame, print_help, print_playback_step, print_trace_summary,
    print_verification, print_version,
};
use super::{Args, Command};
use crate::algorithms::{AlgorithmInfo, AlgorithmInput, AlgorithmRegistry, InputGenerator, InputKind};
use crate::config::VizConfig;
use crate::error::{VizError, VizResult};
use crate::playback::{PlaybackController, PlaybackState, SpeedPreset};
use crate::session::VisualizationSession;
use crate::trace::{Frame, Trace, TraceFingerprint};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::List => list_algorithms(),
        Command::Run {
            algorithm,
            input,
            json,
        } => run_algorithm(&algorithm, &input, json),
        Command::Play { config_path, speed } => play_session(&config_path, speed),
        Command::Verify {
            algorithm,
            input,
            runs,
        } => verify_determinism(&algorithm, &input, runs),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// List every registered algorithm.
#[must_use]
pub fn list_algorithms() -> ExitCode {
    let registry = AlgorithmRegistry::builtin();
    print_algorithm_list(&registry.infos());
    ExitCode::SUCCESS
}

/// Record one trace and print it.
#[must_use]
pub fn run_algorithm(name: &str, args: &InputArgs, json: bool) -> ExitCode {
    let registry = AlgorithmRegistry::builtin();
    let config = VizConfig::default();

    let result = registry.get(name).and_then(|algorithm| {
        let input = build_input(&algorithm.describe(), args, &config)?;
        registry.record(name, &input, &config.limits).map(|trace| (input, trace))
    });

    match result {
        Ok((input, trace)) => {
            if json {
                match serde_json::to_string_pretty(&trace) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::from(1);
                    }
                }
            } else {
                println!("Algorithm: {name}");
                println!("Input:     {}", describe_input(&input));
                println!();
                for frame in &trace {
                    print_frame(frame);
                }
                print_trace_summary(&trace);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, VizError::UnknownAlgorithm(_)) {
                eprintln!("Run 'stepwise list' to see available algorithms.");
            }
            ExitCode::from(1)
        }
    }
}

/// Load a session from YAML and autoplay it to the end on a logical clock.
#[must_use]
pub fn play_session(path: &Path, speed: Option<SpeedPreset>) -> ExitCode {
    let result = VizConfig::load(path).and_then(|config| {
        if config.session.algorithm.is_none() {
            return Err(VizError::config("session.algorithm is required for 'play'"));
        }
        VisualizationSession::from_config(&config)
    });

    let mut session = match result {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Some(preset) = speed {
        session.controller_mut().set_speed(preset);
    }

    println!(
        "Playing {} at {} per frame\n",
        session.algorithm().unwrap_or_default(),
        session.controller().speed()
    );
    let steps = autoplay_headless(session.controller_mut());
    for (elapsed, frame) in &steps {
        print_playback_step(*elapsed, frame);
    }
    println!("\nState: {}", session.controller().state());
    ExitCode::SUCCESS
}

/// Autoplay `controller` to the end, feeding exactly the time until each
/// tick. Returns the logical timestamp and frame of every position shown,
/// starting with the current one.
pub fn autoplay_headless<P: Clone>(controller: &mut PlaybackController<P>) -> Vec<(Duration, Frame<P>)> {
    let mut steps = Vec::with_capacity(controller.len());
    let mut elapsed = Duration::ZERO;

    if let Some(frame) = controller.current() {
        steps.push((elapsed, frame.clone()));
    }
    controller.play();

    while let Some(dt) = controller.until_next_tick() {
        elapsed += dt;
        if !controller.advance(dt) {
            break;
        }
        if let Some(frame) = controller.current() {
            steps.push((elapsed, frame.clone()));
        }
    }
    debug!(
        shown = steps.len(),
        finished = controller.state() == PlaybackState::Finished,
        "headless autoplay done"
    );
    steps
}

/// Outcome of recording the same input several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Algorithm name.
    pub algorithm: String,
    /// Frames per recording.
    pub frames: usize,
    /// Fingerprint of every recording, in order.
    pub fingerprints: Vec<TraceFingerprint>,
    /// All fingerprints equal the first.
    pub identical: bool,
    /// Stepping through the first trace showed every frame in order.
    pub replay_consistent: bool,
}

impl VerificationReport {
    /// Check if every check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.identical && self.replay_consistent
    }
}

/// Record `input` `runs` times and compare the results.
///
/// # Errors
///
/// Returns error if the algorithm is unknown or the input is rejected.
pub fn verify_recordings(
    registry: &AlgorithmRegistry,
    name: &str,
    input: &AlgorithmInput,
    config: &VizConfig,
    runs: usize,
) -> VizResult<VerificationReport> {
    let traces = (0..runs.max(1))
        .map(|_| registry.record(name, input, &config.limits))
        .collect::<VizResult<Vec<_>>>()?;
    let fingerprints = traces.iter().map(Trace::fingerprint).collect::<VizResult<Vec<_>>>()?;

    let identical = fingerprints.windows(2).all(|w| w[0] == w[1]);
    let replay_consistent = traces.first().is_some_and(replay_matches);

    Ok(VerificationReport {
        algorithm: name.to_string(),
        frames: traces.first().map_or(0, Trace::len),
        fingerprints,
        identical,
        replay_consistent,
    })
}

/// Step a fresh controller through `trace` and compare each frame shown.
fn replay_matches<P: PartialEq>(trace: &Trace<P>) -> bool {
    let mut controller = PlaybackController::new();
    controller.load(trace.clone());

    for (i, expected) in trace.iter().enumerate() {
        if controller.cursor() != Some(i) || controller.current() != Some(expected) {
            return false;
        }
        controller.step_forward();
    }
    controller.cursor() == trace.len().checked_sub(1)
}

/// Verify that an algorithm records identically across runs.
#[must_use]
pub fn verify_determinism(name: &str, args: &InputArgs, runs: usize) -> ExitCode {
    let registry = AlgorithmRegistry::builtin();
    let config = VizConfig::default();

    let result = registry
        .get(name)
        .and_then(|algorithm| build_input(&algorithm.describe(), args, &config))
        .and_then(|input| verify_recordings(&registry, name, &input, &config, runs));

    match result {
        Ok(report) => {
            print_verification(&report);
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Turn CLI input options into an input of the shape `info` expects.
///
/// Without `--input` a random input is generated from `--seed` (or the
/// configured seed).
///
/// # Errors
///
/// Returns `VizError::InvalidInput` if a value does not parse or a required
/// companion option is missing.
pub fn build_input(info: &AlgorithmInfo, args: &InputArgs, config: &VizConfig) -> VizResult<AlgorithmInput> {
    let Some(raw) = args.input.as_deref() else {
        let seed = args.seed.unwrap_or(config.generator.seed);
        return InputGenerator::new(seed).generate(info, &config.generator, &config.limits);
    };

    let reject = |reason: String| VizError::invalid_input(info.name, reason);

    match info.input_kind {
        InputKind::Array => Ok(AlgorithmInput::Array {
            values: parse_csv(raw).map_err(reject)?,
        }),
        InputKind::ArrayTarget => {
            let target = args
                .target
                .ok_or_else(|| reject("--target is required".to_string()))?;
            Ok(AlgorithmInput::ArrayTarget {
                values: parse_csv(raw).map_err(reject)?,
                target,
            })
        }
        InputKind::ArrayPair => {
            let second = args
                .second
                .as_deref()
                .ok_or_else(|| reject("--second is required".to_string()))?;
            Ok(AlgorithmInput::ArrayPair {
                first: parse_csv(raw).map_err(reject)?,
                second: parse_csv(second).map_err(reject)?,
            })
        }
        InputKind::BoardSize => Ok(AlgorithmInput::BoardSize {
            n: raw
                .trim()
                .parse()
                .map_err(|_| reject(format!("'{raw}' is not a board size")))?,
        }),
        InputKind::Number => Ok(AlgorithmInput::Number {
            n: raw
                .trim()
                .parse()
                .map_err(|_| reject(format!("'{raw}' is not a non-negative integer")))?,
        }),
    }
}

/// Parse `"3, -1,4"` into integers. Empty input yields an empty vector.
///
/// # Errors
///
/// Returns the offending token if one does not parse.
pub fn parse_csv(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().map_err(|_| format!("'{token}' is not an integer")))
        .collect()
}

fn describe_input(input: &AlgorithmInput) -> String {
    match input {
        AlgorithmInput::Array { values } => format!("{values:?}"),
        AlgorithmInput::ArrayTarget { values, target } => format!("{values:?}, target {target}"),
        AlgorithmInput::ArrayPair { first, second } => format!("{first:?} / {second:?}"),
        AlgorithmInput::BoardSize { n } => format!("{n}×{n} board"),
        AlgorithmInput::Number { n } => format!("n = {n}"),
    }
}
