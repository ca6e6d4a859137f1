//! Configuration with YAML schema and validation.
//!
//! A config file can preselect an algorithm and input, tune playback, tighten
//! input limits, and seed the random input generator. Every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```yaml
//! session:
//!   algorithm: two_sum
//!   input: { kind: array_target, values: [2, 7, 11, 15], target: 9 }
//! playback:
//!   speed: fast
//!   autoplay: true
//! generator:
//!   seed: 7
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::algorithms::{AlgorithmInput, InputLimits};
use crate::error::{VizError, VizResult};
use crate::playback::{clamp_interval, SpeedPreset};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Algorithm and input to load at startup.
    #[validate(nested)]
    #[serde(default)]
    pub session: SessionConfig,

    /// Autoplay settings.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Input bounds.
    #[validate(nested)]
    #[serde(default)]
    pub limits: InputLimits,

    /// Random input generation.
    #[validate(nested)]
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            session: SessionConfig::default(),
            playback: PlaybackConfig::default(),
            limits: InputLimits::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> VizResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Cross-field checks the derive cannot express.
    fn validate_semantic(&self) -> VizResult<()> {
        if self.generator.min_value > self.generator.max_value {
            return Err(VizError::config(format!(
                "generator.min_value ({}) exceeds generator.max_value ({})",
                self.generator.min_value, self.generator.max_value
            )));
        }
        if self.session.input.is_some() && self.session.algorithm.is_none() {
            return Err(VizError::config("session.input given without session.algorithm"));
        }
        Ok(())
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    algorithm: Option<String>,
    input: Option<AlgorithmInput>,
    speed: Option<SpeedPreset>,
    interval: Option<Duration>,
    autoplay: Option<bool>,
    seed: Option<u64>,
    limits: Option<InputLimits>,
}

impl VizConfigBuilder {
    /// Select the startup algorithm.
    #[must_use]
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }

    /// Set the startup input.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // AlgorithmInput owns heap data
    pub fn input(mut self, input: AlgorithmInput) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the autoplay speed preset.
    #[must_use]
    pub const fn speed(mut self, speed: SpeedPreset) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set an explicit autoplay interval (overrides the preset).
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Start playing as soon as a trace is loaded.
    #[must_use]
    pub const fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    /// Set the input generator seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the input limits.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn limits(mut self, limits: InputLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(algorithm) = self.algorithm {
            config.session.algorithm = Some(algorithm);
        }
        if let Some(input) = self.input {
            config.session.input = Some(input);
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if let Some(interval) = self.interval {
            let ms = u64::try_from(clamp_interval(interval).as_millis()).unwrap_or(u64::MAX);
            config.playback.interval_ms = Some(ms);
        }
        if let Some(autoplay) = self.autoplay {
            config.playback.autoplay = autoplay;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        if let Some(limits) = self.limits {
            config.limits = limits;
        }

        config
    }
}

/// Startup selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Registry name of the algorithm.
    #[validate(length(min = 1))]
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Input; generated from `generator` when absent.
    #[serde(default)]
    pub input: Option<AlgorithmInput>,
}

/// Autoplay settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Speed preset.
    #[serde(default)]
    pub speed: SpeedPreset,
    /// Explicit interval in milliseconds; overrides `speed`.
    #[validate(range(min = 250, max = 1500))]
    #[serde(default)]
    pub interval_ms: Option<u64>,
    /// Start playing as soon as a trace is loaded.
    #[serde(default)]
    pub autoplay: bool,
}

impl PlaybackConfig {
    /// Effective autoplay interval, always within the supported range.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval_ms
            .map_or_else(|| self.speed.interval(), |ms| clamp_interval(Duration::from_millis(ms)))
    }
}

/// Random input generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// PCG seed; the same seed always produces the same inputs.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Length of generated arrays (capped by `limits.max_array_len`).
    #[validate(range(min = 2, max = 1024))]
    #[serde(default = "default_array_len")]
    pub array_len: usize,
    /// Smallest generated value.
    #[serde(default = "default_min_value")]
    pub min_value: i64,
    /// Largest generated value.
    #[serde(default = "default_max_value")]
    pub max_value: i64,
}

const fn default_seed() -> u64 {
    42
}

const fn default_array_len() -> usize {
    8
}

const fn default_min_value() -> i64 {
    -20
}

const fn default_max_value() -> i64 {
    20
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            array_len: default_array_len(),
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}
