//! # stepwise
//!
//! Step-history recording and deterministic playback for algorithm
//! visualizers.
//!
//! An instrumented algorithm runs once, synchronously, and emits an
//! immutable snapshot at every step a learner should see. The resulting
//! [`trace::Trace`] is handed to a [`playback::PlaybackController`], which
//! scrubs, steps, and autoplays over it on a logical clock. Nothing is ever
//! re-executed during playback, so what is shown is exactly what ran.
//!
//! ## Example
//!
//! ```rust
//! use stepwise::prelude::*;
//!
//! let registry = AlgorithmRegistry::builtin();
//! let input = AlgorithmInput::Array { values: vec![3, -1, 4] };
//! let trace = registry
//!     .record("array_sum", &input, &InputLimits::default())
//!     .unwrap();
//!
//! let mut player = PlaybackController::new();
//! player.load(trace);
//! player.play();
//! player.advance(SpeedPreset::Normal.interval());
//! assert_eq!(player.cursor(), Some(1));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the textbook algorithms
)]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod error;
pub mod playback;
pub mod session;
pub mod trace;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::{
        AlgorithmInfo, AlgorithmInput, AlgorithmRegistry, DynAlgorithm, InputGenerator, InputKind,
        InputLimits, InstrumentedAlgorithm,
    };
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::error::{VizError, VizResult};
    pub use crate::playback::{LoadOutcome, PlaybackController, PlaybackState, SpeedPreset};
    pub use crate::session::VisualizationSession;
    pub use crate::trace::{Frame, Trace, TraceFingerprint, TraceRecorder};
}

/// Re-export for public API
pub use error::{VizError, VizResult};

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Calling
/// this twice is harmless: the second install is ignored.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
