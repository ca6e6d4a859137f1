//! Discrete autoplay speed presets.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest autoplay interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(250);

/// Longest autoplay interval.
pub const MAX_INTERVAL: Duration = Duration::from_millis(1500);

/// Autoplay speed, as offered by the speed selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedPreset {
    /// 1500 ms per frame.
    Slowest,
    /// 1000 ms per frame.
    Slow,
    /// 750 ms per frame.
    #[default]
    Normal,
    /// 500 ms per frame.
    Fast,
    /// 250 ms per frame.
    Fastest,
}

impl SpeedPreset {
    /// All presets, slowest first.
    pub const ALL: [Self; 5] = [
        Self::Slowest,
        Self::Slow,
        Self::Normal,
        Self::Fast,
        Self::Fastest,
    ];

    /// Interval between autoplay ticks.
    #[must_use]
    pub const fn interval(self) -> Duration {
        match self {
            Self::Slowest => Duration::from_millis(1500),
            Self::Slow => Duration::from_millis(1000),
            Self::Normal => Duration::from_millis(750),
            Self::Fast => Duration::from_millis(500),
            Self::Fastest => Duration::from_millis(250),
        }
    }

    /// Next faster preset (saturates at [`SpeedPreset::Fastest`]).
    #[must_use]
    pub const fn faster(self) -> Self {
        match self {
            Self::Slowest => Self::Slow,
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast | Self::Fastest => Self::Fastest,
        }
    }

    /// Next slower preset (saturates at [`SpeedPreset::Slowest`]).
    #[must_use]
    pub const fn slower(self) -> Self {
        match self {
            Self::Slowest | Self::Slow => Self::Slowest,
            Self::Normal => Self::Slow,
            Self::Fast => Self::Normal,
            Self::Fastest => Self::Fast,
        }
    }

    /// Preset whose interval is closest to `interval`.
    #[must_use]
    pub fn nearest(interval: Duration) -> Self {
        Self::ALL
            .into_iter()
            .min_by_key(|p| p.interval().as_millis().abs_diff(interval.as_millis()))
            .unwrap_or_default()
    }
}

impl std::str::FromStr for SpeedPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slowest" => Ok(Self::Slowest),
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            "fastest" => Ok(Self::Fastest),
            other => Err(format!("unknown speed '{other}'")),
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.interval().as_millis())
    }
}

/// Clamp an arbitrary interval into the supported autoplay range.
#[must_use]
pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
}
