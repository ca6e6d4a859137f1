//! One visualization session: an algorithm choice, its input, and a player.
//!
//! The session is what a front end drives. Loading validates the input,
//! records a fresh trace, and binds it to the session's own controller. A
//! rejected input leaves the previous trace and selection untouched.

use tracing::{debug, info};

use crate::algorithms::{AlgorithmInput, AlgorithmRegistry, InputGenerator, InputLimits};
use crate::config::{GeneratorConfig, VizConfig};
use crate::error::VizResult;
use crate::playback::{LoadOutcome, PlaybackController};

/// Selected algorithm, input, and the controller replaying its trace.
#[derive(Debug)]
pub struct VisualizationSession {
    registry: AlgorithmRegistry,
    limits: InputLimits,
    generator_settings: GeneratorConfig,
    generator: InputGenerator,
    controller: PlaybackController<serde_json::Value>,
    algorithm: Option<String>,
    input: Option<AlgorithmInput>,
    autoplay: bool,
}

impl Default for VisualizationSession {
    fn default() -> Self {
        Self::new(AlgorithmRegistry::builtin(), &VizConfig::default())
    }
}

impl VisualizationSession {
    /// Create an empty session over `registry`, configured by `config`.
    ///
    /// Nothing is loaded; see [`VisualizationSession::from_config`].
    #[must_use]
    pub fn new(registry: AlgorithmRegistry, config: &VizConfig) -> Self {
        Self {
            registry,
            limits: config.limits.clone(),
            generator_settings: config.generator.clone(),
            generator: InputGenerator::new(config.generator.seed),
            controller: PlaybackController::with_interval(config.playback.interval()),
            algorithm: None,
            input: None,
            autoplay: config.playback.autoplay,
        }
    }

    /// Create a session with the built-in algorithms and load the configured
    /// startup selection, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the configured algorithm is unknown or its input is
    /// rejected.
    pub fn from_config(config: &VizConfig) -> VizResult<Self> {
        let mut session = Self::new(AlgorithmRegistry::builtin(), config);
        if let Some(name) = &config.session.algorithm {
            match &config.session.input {
                Some(input) => session.load(name, input.clone())?,
                None => session.load_generated(name)?,
            };
        }
        Ok(session)
    }

    /// Validate `input`, record a trace for `name`, and bind it.
    ///
    /// Replaces any previous trace. Starts autoplay when configured to.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is unknown or `input` is rejected; the
    /// session is unchanged in that case.
    pub fn load(&mut self, name: &str, input: AlgorithmInput) -> VizResult<LoadOutcome> {
        let trace = self.registry.record(name, &input, &self.limits)?;
        info!(algorithm = name, frames = trace.len(), "session loaded");

        self.algorithm = Some(name.to_string());
        self.input = Some(input);
        let outcome = self.controller.load(trace);
        if self.autoplay {
            self.controller.play();
        }
        Ok(outcome)
    }

    /// Generate a random input for `name` and load it.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is unknown or the limits leave no input it
    /// accepts.
    pub fn load_generated(&mut self, name: &str) -> VizResult<LoadOutcome> {
        let info = self.registry.get(name)?.describe();
        let input = self.generator.generate(&info, &self.generator_settings, &self.limits)?;
        debug!(algorithm = name, seed = self.generator.seed(), "generated input");
        self.load(name, input)
    }

    /// Re-run the current algorithm on the current input.
    ///
    /// Returns `Ok(None)` when nothing has been selected yet.
    ///
    /// # Errors
    ///
    /// Returns error if recording fails.
    pub fn reload(&mut self) -> VizResult<Option<LoadOutcome>> {
        let (Some(name), Some(input)) = (self.algorithm.clone(), self.input.clone()) else {
            return Ok(None);
        };
        self.load(&name, input).map(Some)
    }

    /// Unload the trace and forget the selection.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.algorithm = None;
        self.input = None;
    }

    /// Selected algorithm name.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Selected input.
    #[must_use]
    pub const fn input(&self) -> Option<&AlgorithmInput> {
        self.input.as_ref()
    }

    /// Algorithms this session can load.
    #[must_use]
    pub const fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Input bounds in force.
    #[must_use]
    pub const fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// The session's player.
    #[must_use]
    pub const fn controller(&self) -> &PlaybackController<serde_json::Value> {
        &self.controller
    }

    /// The session's player, for issuing controls.
    pub fn controller_mut(&mut self) -> &mut PlaybackController<serde_json::Value> {
        &mut self.controller
    }
}
