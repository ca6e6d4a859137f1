//! Instrumented algorithms.
//!
//! Every visualized algorithm implements [`InstrumentedAlgorithm`]: it runs
//! the textbook algorithm once, synchronously, and emits a frame at each step
//! a learner should be able to observe. The contract:
//!
//! 1. Input is validated by [`InstrumentedAlgorithm::parse`] before `run` starts
//! 2. `run` emits at least one frame per observable step and a terminal frame
//!    with `finished = true` carrying the final answer
//! 3. Payloads own their data (snapshots, never handles to working buffers)
//! 4. `run` terminates; input limits keep traces small enough to scrub
//!
//! # Algorithms
//!
//! | name                | input          | answer in terminal frame   |
//! |---------------------|----------------|----------------------------|
//! | `array_sum`         | array          | `total`                    |
//! | `min_max`           | array          | `min`, `max`               |
//! | `count_zeros`       | array          | `zero_count`               |
//! | `two_sum`           | array + target | `pair`                     |
//! | `kadane`            | array          | `best_sum`                 |
//! | `shell_sort`        | array          | `array` (sorted)           |
//! | `factorial`         | n              | `result`                   |
//! | `n_queens`          | board size     | `solution_count`           |
//! | `knights_tour`      | board size     | `complete`                 |
//! | `cookie_assignment` | pair of arrays | `content_children`         |

pub mod array_sum;
pub mod cookie_assignment;
pub mod count_zeros;
pub mod factorial;
pub mod generator;
pub mod kadane;
pub mod knights_tour;
pub mod min_max;
pub mod n_queens;
pub mod registry;
pub mod shell_sort;
pub mod two_sum;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{VizError, VizResult};
use crate::trace::{Trace, TraceRecorder};

pub use generator::InputGenerator;
pub use registry::{AlgorithmRegistry, DynAlgorithm};

/// Raw algorithm input as supplied by a form, the CLI, or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlgorithmInput {
    /// A numeric array.
    Array {
        /// Array values.
        values: Vec<i64>,
    },
    /// Two numeric arrays.
    ArrayPair {
        /// First array.
        first: Vec<i64>,
        /// Second array.
        second: Vec<i64>,
    },
    /// A numeric array plus a target value.
    ArrayTarget {
        /// Array values.
        values: Vec<i64>,
        /// Target value.
        target: i64,
    },
    /// Side length of a square board.
    BoardSize {
        /// Board side length.
        n: usize,
    },
    /// A single non-negative integer.
    Number {
        /// The integer.
        n: u64,
    },
}

impl AlgorithmInput {
    /// Shape of this input.
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Array { .. } => InputKind::Array,
            Self::ArrayPair { .. } => InputKind::ArrayPair,
            Self::ArrayTarget { .. } => InputKind::ArrayTarget,
            Self::BoardSize { .. } => InputKind::BoardSize,
            Self::Number { .. } => InputKind::Number,
        }
    }
}

/// Input shape an algorithm expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// [`AlgorithmInput::Array`].
    Array,
    /// [`AlgorithmInput::ArrayPair`].
    ArrayPair,
    /// [`AlgorithmInput::ArrayTarget`].
    ArrayTarget,
    /// [`AlgorithmInput::BoardSize`].
    BoardSize,
    /// [`AlgorithmInput::Number`].
    Number,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Array => "array",
            Self::ArrayPair => "array pair",
            Self::ArrayTarget => "array + target",
            Self::BoardSize => "board size",
            Self::Number => "number",
        };
        f.write_str(name)
    }
}

/// Static description of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Registry key.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Expected input shape.
    pub input_kind: InputKind,
    /// Inclusive bounds for `BoardSize`/`Number` inputs, before limits apply.
    pub size_range: (u64, u64),
}

/// Bounds that keep every trace small enough for interactive scrubbing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InputLimits {
    /// Maximum array length.
    #[validate(range(min = 1, max = 1024))]
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Maximum absolute array value.
    #[validate(range(min = 1, max = 1_000_000_000))]
    #[serde(default = "default_max_abs_value")]
    pub max_abs_value: i64,
    /// Maximum board side length.
    #[validate(range(min = 1, max = 8))]
    #[serde(default = "default_max_board_size")]
    pub max_board_size: usize,
    /// Maximum factorial argument.
    #[validate(range(max = 20))]
    #[serde(default = "default_max_factorial")]
    pub max_factorial: u64,
    /// Moves plus backtracks the knight's tour may spend.
    #[validate(range(min = 1, max = 1_000_000))]
    #[serde(default = "default_search_budget")]
    pub search_budget: u64,
}

const fn default_max_array_len() -> usize {
    64
}

const fn default_max_abs_value() -> i64 {
    1_000_000
}

const fn default_max_board_size() -> usize {
    8
}

const fn default_max_factorial() -> u64 {
    12
}

const fn default_search_budget() -> u64 {
    20_000
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_array_len: default_max_array_len(),
            max_abs_value: default_max_abs_value(),
            max_board_size: default_max_board_size(),
            max_factorial: default_max_factorial(),
            search_budget: default_search_budget(),
        }
    }
}

/// Contract every visualized algorithm implements.
pub trait InstrumentedAlgorithm {
    /// Validated, typed input.
    type Input;

    /// Per-step snapshot.
    type Payload: Clone + Serialize;

    /// Static description.
    fn info(&self) -> AlgorithmInfo;

    /// Validate raw input and convert it to the typed form.
    ///
    /// # Errors
    ///
    /// Returns `VizError::InvalidInput` if the shape is wrong or a limit is
    /// exceeded.
    fn parse(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Self::Input>;

    /// Run the algorithm to completion, emitting frames as it goes.
    fn run(&self, input: &Self::Input, limits: &InputLimits, recorder: &mut TraceRecorder<Self::Payload>);

    /// Validate, run once, and return the finished trace.
    ///
    /// # Errors
    ///
    /// Returns error if the input is rejected; nothing is recorded then.
    fn record(&self, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Trace<Self::Payload>> {
        let typed = self.parse(input, limits)?;
        let mut recorder = TraceRecorder::new();
        self.run(&typed, limits, &mut recorder);
        Ok(recorder.finish())
    }
}

// === Shared input checks ===

fn shape_error(info: &AlgorithmInfo, input: &AlgorithmInput) -> VizError {
    VizError::invalid_input(
        info.name,
        format!("expected {} input, got {}", info.input_kind, input.kind()),
    )
}

fn check_values(info: &AlgorithmInfo, label: &str, values: &[i64], limits: &InputLimits) -> VizResult<()> {
    if values.is_empty() {
        return Err(VizError::invalid_input(info.name, format!("{label} must not be empty")));
    }
    if values.len() > limits.max_array_len {
        return Err(VizError::invalid_input(
            info.name,
            format!(
                "{label} has {} values, at most {} allowed",
                values.len(),
                limits.max_array_len
            ),
        ));
    }
    let bound = limits.max_abs_value.unsigned_abs();
    if let Some(v) = values.iter().find(|v| v.unsigned_abs() > bound) {
        return Err(VizError::invalid_input(
            info.name,
            format!("{label} value {v} exceeds ±{}", limits.max_abs_value),
        ));
    }
    Ok(())
}

/// Extract and check an `Array` input.
pub(crate) fn array_input(info: &AlgorithmInfo, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<Vec<i64>> {
    match input {
        AlgorithmInput::Array { values } => {
            check_values(info, "array", values, limits)?;
            Ok(values.clone())
        }
        other => Err(shape_error(info, other)),
    }
}

/// Extract and check an `ArrayPair` input.
pub(crate) fn array_pair_input(
    info: &AlgorithmInfo,
    input: &AlgorithmInput,
    limits: &InputLimits,
) -> VizResult<(Vec<i64>, Vec<i64>)> {
    match input {
        AlgorithmInput::ArrayPair { first, second } => {
            check_values(info, "first array", first, limits)?;
            check_values(info, "second array", second, limits)?;
            Ok((first.clone(), second.clone()))
        }
        other => Err(shape_error(info, other)),
    }
}

/// Extract and check an `ArrayTarget` input.
pub(crate) fn array_target_input(
    info: &AlgorithmInfo,
    input: &AlgorithmInput,
    limits: &InputLimits,
) -> VizResult<(Vec<i64>, i64)> {
    match input {
        AlgorithmInput::ArrayTarget { values, target } => {
            check_values(info, "array", values, limits)?;
            if target.unsigned_abs() > limits.max_abs_value.unsigned_abs().saturating_mul(2) {
                return Err(VizError::invalid_input(
                    info.name,
                    format!("target {target} is out of range"),
                ));
            }
            Ok((values.clone(), *target))
        }
        other => Err(shape_error(info, other)),
    }
}

/// Extract a `BoardSize` within `[info.size_range.0, min(info.size_range.1, limit)]`.
pub(crate) fn board_input(info: &AlgorithmInfo, input: &AlgorithmInput, limits: &InputLimits) -> VizResult<usize> {
    match input {
        AlgorithmInput::BoardSize { n } => {
            let (lo, hi) = info.size_range;
            let hi = hi.min(limits.max_board_size as u64);
            let size = *n as u64;
            if size < lo || size > hi {
                return Err(VizError::invalid_input(
                    info.name,
                    format!("board size {n} must be between {lo} and {hi}"),
                ));
            }
            Ok(*n)
        }
        other => Err(shape_error(info, other)),
    }
}

/// Extract a `Number` within `[info.size_range.0, min(info.size_range.1, limit)]`.
pub(crate) fn number_input(
    info: &AlgorithmInfo,
    input: &AlgorithmInput,
    limit: u64,
) -> VizResult<u64> {
    match input {
        AlgorithmInput::Number { n } => {
            let (lo, hi) = info.size_range;
            let hi = hi.min(limit);
            if *n < lo || *n > hi {
                return Err(VizError::invalid_input(
                    info.name,
                    format!("n = {n} must be between {lo} and {hi}"),
                ));
            }
            Ok(*n)
        }
        other => Err(shape_error(info, other)),
    }
}
