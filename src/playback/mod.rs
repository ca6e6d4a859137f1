//! Playback of a finished trace.
//!
//! [`PlaybackController`] holds one cursor over one live [`Trace`] and
//! implements the playback state machine:
//!
//! ```text
//!            load (len > 0)            play
//! Unloaded ─────────────────▶ Paused ─────────▶ Playing
//!    ▲                         ▲  ▲    pause       │
//!    │ reset (any state)       │  └────────────────┤
//!    │                         │ step back / jump  │ tick at last index
//!    │                       Finished ◀────────────┘
//! ```
//!
//! Every control method is a silent no-op when nothing is loaded, and every
//! cursor movement is clamped to `[0, len - 1]`.

mod speed;
mod timer;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::trace::{Frame, Trace};

pub use speed::{clamp_interval, SpeedPreset, MAX_INTERVAL, MIN_INTERVAL};
pub use timer::AutoplayTimer;

/// Playback state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No trace bound.
    #[default]
    Unloaded,
    /// Trace bound, cursor still, timer stopped.
    Paused,
    /// Timer running, cursor advancing one frame per tick.
    Playing,
    /// Cursor on the last frame, timer stopped.
    Finished,
}

impl PlaybackState {
    /// Check if a trace is bound.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        !matches!(self, Self::Unloaded)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unloaded => "Unloaded",
            Self::Paused => "Loaded-Paused",
            Self::Playing => "Loaded-Playing",
            Self::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// Result of binding a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Trace bound; cursor on frame 0.
    Loaded {
        /// Number of frames in the bound trace.
        frames: usize,
    },
    /// The trace had no frames; nothing to visualize.
    Empty,
}

/// Snapshot handed to the rendering layer.
#[derive(Debug)]
pub struct PlaybackView<'a, P> {
    /// Frame under the cursor (`None` when unloaded).
    pub frame: Option<&'a Frame<P>>,
    /// Cursor position (`None` when unloaded).
    pub cursor: Option<usize>,
    /// Number of frames in the live trace.
    pub len: usize,
    /// Current state.
    pub state: PlaybackState,
}

impl<P> Clone for PlaybackView<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PlaybackView<'_, P> {}

/// Movable read cursor over a finished trace, with autoplay.
///
/// One controller belongs to one visualization session; controllers are
/// never shared.
#[derive(Debug)]
pub struct PlaybackController<P> {
    /// Live trace, if any.
    trace: Option<Trace<P>>,
    /// Index into `trace`; meaningless while unloaded.
    cursor: usize,
    /// State machine state.
    state: PlaybackState,
    /// Autoplay timer.
    timer: AutoplayTimer,
}

impl<P> Default for PlaybackController<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PlaybackController<P> {
    /// Create an unloaded controller at the default speed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(SpeedPreset::default().interval())
    }

    /// Create an unloaded controller with a custom autoplay interval.
    ///
    /// The interval is clamped into `[MIN_INTERVAL, MAX_INTERVAL]`.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            trace: None,
            cursor: 0,
            state: PlaybackState::Unloaded,
            timer: AutoplayTimer::new(clamp_interval(interval)),
        }
    }

    // === Lifecycle ===

    /// Bind a trace, replacing the live one.
    ///
    /// A zero-length trace leaves the controller unloaded.
    pub fn load(&mut self, trace: Trace<P>) -> LoadOutcome {
        self.timer.cancel();
        self.cursor = 0;

        if trace.is_empty() {
            warn!("refusing to bind an empty trace; nothing to visualize");
            self.trace = None;
            self.state = PlaybackState::Unloaded;
            return LoadOutcome::Empty;
        }

        let frames = trace.len();
        debug!(frames, "trace bound");
        self.trace = Some(trace);
        self.state = PlaybackState::Paused;
        LoadOutcome::Loaded { frames }
    }

    /// Discard the trace and cursor.
    pub fn reset(&mut self) {
        if self.trace.is_some() {
            debug!("playback reset");
        }
        self.timer.cancel();
        self.trace = None;
        self.cursor = 0;
        self.state = PlaybackState::Unloaded;
    }

    // === Autoplay ===

    /// Start autoplay from the current frame.
    ///
    /// At the last frame this only marks playback finished.
    pub fn play(&mut self) {
        if self.state != PlaybackState::Paused {
            return;
        }
        if self.at_last() {
            self.state = PlaybackState::Finished;
            return;
        }
        self.timer.arm();
        self.state = PlaybackState::Playing;
        debug!(cursor = self.cursor, interval_ms = self.interval_millis(), "autoplay started");
    }

    /// Stop autoplay, keeping the cursor.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.timer.cancel();
        self.state = PlaybackState::Paused;
        debug!(cursor = self.cursor, "autoplay paused");
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Unloaded | PlaybackState::Finished => {}
        }
    }

    /// Rewind to frame 0 and start autoplay.
    pub fn restart(&mut self) {
        if !self.state.is_loaded() {
            return;
        }
        self.timer.cancel();
        self.cursor = 0;
        self.state = PlaybackState::Paused;
        self.play();
    }

    /// Feed elapsed time to the autoplay timer.
    ///
    /// Moves the cursor at most one frame per call, so every frame is
    /// observable between calls. Time beyond one tick stays on the timer:
    /// after a stall [`until_next_tick`](Self::until_next_tick) reports zero
    /// and the host keeps calling until the backlog is drained. Reaching the
    /// last frame finishes playback and cancels the timer. Returns `true` if
    /// the cursor moved.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != PlaybackState::Playing || !self.timer.advance(dt) {
            return false;
        }

        self.cursor += 1;
        trace!(cursor = self.cursor, "autoplay tick");
        if self.at_last() {
            self.finish_playback();
        }
        true
    }

    /// Time until the next autoplay tick, if playing.
    #[must_use]
    pub fn until_next_tick(&self) -> Option<Duration> {
        if self.state == PlaybackState::Playing {
            self.timer.until_next_tick()
        } else {
            None
        }
    }

    // === Manual navigation ===

    /// Move one frame forward.
    ///
    /// Allowed while playing as a manual nudge; the timer keeps running.
    pub fn step_forward(&mut self) {
        if !self.state.is_loaded() || self.at_last() {
            return;
        }
        self.cursor += 1;
        if self.at_last() {
            self.finish_playback();
        }
    }

    /// Move one frame back.
    ///
    /// Stepping back while playing pauses first, so autoplay never moves
    /// backward.
    pub fn step_backward(&mut self) {
        if !self.state.is_loaded() || self.cursor == 0 {
            return;
        }
        self.pause();
        self.cursor -= 1;
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
    }

    /// Set the cursor directly, clamped into `[0, len - 1]`.
    ///
    /// Jumping while playing keeps playing; the next tick falls one full
    /// interval after the jump.
    pub fn jump_to(&mut self, index: usize) {
        let Some(last) = self.last_index() else {
            return;
        };
        self.cursor = index.min(last);

        if self.cursor == last {
            self.finish_playback();
            return;
        }
        match self.state {
            PlaybackState::Finished => self.state = PlaybackState::Paused,
            PlaybackState::Playing => self.timer.arm(),
            PlaybackState::Paused | PlaybackState::Unloaded => {}
        }
    }

    /// Jump to the first frame.
    pub fn jump_to_start(&mut self) {
        self.jump_to(0);
    }

    /// Jump to the last frame.
    pub fn jump_to_end(&mut self) {
        self.jump_to(usize::MAX);
    }

    // === Speed ===

    /// Select a speed preset. Applies from the next tick.
    pub fn set_speed(&mut self, preset: SpeedPreset) {
        self.set_interval(preset.interval());
    }

    /// Set an arbitrary autoplay interval, clamped into the supported range.
    ///
    /// Applies from the next tick: time accrued under the old interval is
    /// discarded.
    pub fn set_interval(&mut self, interval: Duration) {
        self.timer.set_interval(clamp_interval(interval));
        debug!(interval_ms = self.interval_millis(), "autoplay interval changed");
    }

    /// Current autoplay interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Preset closest to the current interval.
    #[must_use]
    pub fn speed(&self) -> SpeedPreset {
        SpeedPreset::nearest(self.interval())
    }

    // === Observation ===

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Cursor position, or `None` when unloaded.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.trace.as_ref().map(|_| self.cursor)
    }

    /// Number of frames in the live trace (0 when unloaded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    /// Check if no trace is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_none()
    }

    /// The live trace.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace<P>> {
        self.trace.as_ref()
    }

    /// Frame under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Frame<P>> {
        self.trace.as_ref().and_then(|t| t.get(self.cursor))
    }

    /// Everything the renderer needs for one paint.
    #[must_use]
    pub fn view(&self) -> PlaybackView<'_, P> {
        PlaybackView {
            frame: self.current(),
            cursor: self.cursor(),
            len: self.len(),
            state: self.state,
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.trace.as_ref().map(|t| t.len() - 1)
    }

    fn at_last(&self) -> bool {
        self.last_index().is_some_and(|last| self.cursor >= last)
    }

    fn finish_playback(&mut self) {
        self.timer.cancel();
        if self.state != PlaybackState::Finished {
            debug!(cursor = self.cursor, "playback finished");
        }
        self.state = PlaybackState::Finished;
    }

    fn interval_millis(&self) -> u128 {
        self.interval().as_millis()
    }
}
