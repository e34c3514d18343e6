use glissade_model::Axis;
use serde::{Deserialize, Serialize};

use super::settings::WheelThrottle;
use crate::constants::wheel;

/// Which wheel component drives the track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelAxis {
    /// Follow the carousel direction, falling back to the dominant component.
    #[default]
    Auto,
    X,
    Y,
}

impl WheelAxis {
    pub fn fixed(self) -> Option<Axis> {
        match self {
            Self::Auto => None,
            Self::X => Some(Axis::X),
            Self::Y => Some(Axis::Y),
        }
    }
}

/// Wheel input handling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub enabled: bool,
    /// Move the track with every delta instead of advancing whole slides.
    pub follow: bool,
    /// Track units per wheel pixel in follow mode.
    pub speed: f64,
    pub axis: WheelAxis,
    pub throttle: WheelThrottle,
    /// Snap (or advance) once the wheel goes quiet in follow mode.
    pub stick_on_end: bool,
    /// Travel (px) into a slide past which wheel end advances instead of sticking.
    pub stick_on_end_threshold: f64,
    pub heuristics: WheelHeuristics,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            follow: true,
            speed: wheel::SPEED,
            axis: WheelAxis::Auto,
            throttle: WheelThrottle::Auto,
            stick_on_end: true,
            stick_on_end_threshold: wheel::STICK_ON_END_THRESHOLD,
            heuristics: WheelHeuristics::default(),
        }
    }
}

/// Empirically tuned touchpad-vs-wheel constants.
///
/// These have no derivation beyond hardware testing; keep them overridable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelHeuristics {
    pub history_len: usize,
    pub stable_ratio: f64,
    pub touchpad_delta: f64,
    pub gain_multiplier: f64,
    pub auto_cooldown_ms: u64,
    pub end_silence_ms: u64,
    pub end_sample_count: usize,
    pub line_height: f64,
    pub page_fallback: f64,
}

impl Default for WheelHeuristics {
    fn default() -> Self {
        Self {
            history_len: wheel::HISTORY_LEN,
            stable_ratio: wheel::STABLE_RATIO,
            touchpad_delta: wheel::TOUCHPAD_DELTA,
            gain_multiplier: wheel::platform_gain_multiplier(),
            auto_cooldown_ms: wheel::AUTO_COOLDOWN_MS,
            end_silence_ms: wheel::END_SILENCE_MS,
            end_sample_count: wheel::END_SAMPLE_COUNT,
            line_height: wheel::LINE_HEIGHT,
            page_fallback: wheel::PAGE_FALLBACK,
        }
    }
}
