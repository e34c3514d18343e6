//! Small option enums whose serialized form mixes booleans, numbers and
//! keywords (`freemode = "sticky"`, `throttle = "auto"`, `slide_size = 320`).

use serde::{Deserialize, Serialize};

use crate::constants::{inertia, transition};

/// Whether the track is pulled toward magnets while idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FreemodeRepr", into = "FreemodeRepr")]
pub enum FreemodeSetting {
    /// Always magnetic when idle.
    #[default]
    Off,
    /// Free motion; inertia runs until the hard edges.
    Free,
    /// Free during the gesture, snapping on short gestures and after inertia.
    Sticky,
}

impl FreemodeSetting {
    pub fn is_free(self) -> bool {
        !matches!(self, Self::Off)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FreemodeRepr {
    Flag(bool),
    Named(String),
}

impl TryFrom<FreemodeRepr> for FreemodeSetting {
    type Error = String;

    fn try_from(value: FreemodeRepr) -> Result<Self, Self::Error> {
        match value {
            FreemodeRepr::Flag(false) => Ok(Self::Off),
            FreemodeRepr::Flag(true) => Ok(Self::Free),
            FreemodeRepr::Named(name) => match name.as_str() {
                "sticky" => Ok(Self::Sticky),
                "free" => Ok(Self::Free),
                "off" => Ok(Self::Off),
                other => Err(format!(
                    "unknown freemode `{other}` (expected true, false or \"sticky\")"
                )),
            },
        }
    }
}

impl From<FreemodeSetting> for FreemodeRepr {
    fn from(value: FreemodeSetting) -> Self {
        match value {
            FreemodeSetting::Off => FreemodeRepr::Flag(false),
            FreemodeSetting::Free => FreemodeRepr::Flag(true),
            FreemodeSetting::Sticky => FreemodeRepr::Named("sticky".into()),
        }
    }
}

/// Cooldown between discrete wheel advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThrottleRepr", into = "ThrottleRepr")]
pub enum WheelThrottle {
    /// Suppress while a transition runs, otherwise a fixed cooldown.
    #[default]
    Auto,
    /// Explicit cooldown in milliseconds (0 disables throttling).
    Millis(u64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ThrottleRepr {
    Millis(u64),
    Named(String),
}

impl TryFrom<ThrottleRepr> for WheelThrottle {
    type Error = String;

    fn try_from(value: ThrottleRepr) -> Result<Self, Self::Error> {
        match value {
            ThrottleRepr::Millis(ms) => Ok(Self::Millis(ms)),
            ThrottleRepr::Named(name) if name == "auto" => Ok(Self::Auto),
            ThrottleRepr::Named(other) => Err(format!(
                "unknown wheel throttle `{other}` (expected \"auto\" or milliseconds)"
            )),
        }
    }
}

impl From<WheelThrottle> for ThrottleRepr {
    fn from(value: WheelThrottle) -> Self {
        match value {
            WheelThrottle::Auto => ThrottleRepr::Named("auto".into()),
            WheelThrottle::Millis(ms) => ThrottleRepr::Millis(ms),
        }
    }
}

/// How slide extents are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlideSizeRepr", into = "SlideSizeRepr")]
pub enum SlideSize {
    /// Measured by the geometry collaborator (virtual slides use their own size).
    #[default]
    Auto,
    /// Every slide spans the container.
    Stretch,
    /// Every slide has this extent (px).
    Fixed(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SlideSizeRepr {
    Fixed(f64),
    Named(String),
}

impl TryFrom<SlideSizeRepr> for SlideSize {
    type Error = String;

    fn try_from(value: SlideSizeRepr) -> Result<Self, Self::Error> {
        match value {
            SlideSizeRepr::Fixed(px) => Ok(Self::Fixed(px)),
            SlideSizeRepr::Named(name) => match name.as_str() {
                "auto" => Ok(Self::Auto),
                "stretch" => Ok(Self::Stretch),
                other => Err(format!(
                    "unknown slide size `{other}` (expected \"auto\", \"stretch\" or pixels)"
                )),
            },
        }
    }
}

impl From<SlideSize> for SlideSizeRepr {
    fn from(value: SlideSize) -> Self {
        match value {
            SlideSize::Auto => SlideSizeRepr::Named("auto".into()),
            SlideSize::Stretch => SlideSizeRepr::Named("stretch".into()),
            SlideSize::Fixed(px) => SlideSizeRepr::Fixed(px),
        }
    }
}

/// Animation length: fixed, or derived from the travelled distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSetting {
    /// Always this many milliseconds.
    Fixed(u64),
    /// `clamp(distance * factor, min_ms, max_ms)`.
    Distance {
        #[serde(default = "default_factor")]
        factor: f64,
        min_ms: u64,
        max_ms: u64,
    },
}

fn default_factor() -> f64 {
    1.0
}

impl DurationSetting {
    /// Default duration for inertia releases.
    pub const fn inertia_default() -> Self {
        Self::Distance {
            factor: 1.0,
            min_ms: inertia::MIN_DURATION_MS,
            max_ms: inertia::MAX_DURATION_MS,
        }
    }

    /// Default duration for programmatic transitions.
    pub const fn transition_default() -> Self {
        Self::Fixed(transition::DURATION_MS)
    }

    /// Duration in milliseconds for a move of `distance` px.
    pub fn resolve_ms(&self, distance: f64) -> f64 {
        match *self {
            Self::Fixed(ms) => ms as f64,
            Self::Distance {
                factor,
                min_ms,
                max_ms,
            } => {
                let (lo, hi) = (min_ms as f64, max_ms.max(min_ms) as f64);
                (distance.abs() * factor).clamp(lo, hi)
            }
        }
    }
}
