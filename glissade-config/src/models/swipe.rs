use glissade_model::{Axis, Easing};
use serde::{Deserialize, Serialize};

use super::settings::DurationSetting;
use crate::constants::{inertia, swipe};

/// Pointer-drag recognition and inertia release.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Accept pointer input at all.
    pub enabled: bool,
    /// Locked axis. `None` lets the carousel use its layout direction; a
    /// standalone recognizer treats `None` as "any direction".
    pub axis: Option<Axis>,
    /// Track units per swipe pixel.
    pub speed: f64,
    /// Travel (px) along the axis before a drag is promoted to a swipe.
    pub threshold: f64,
    /// Minimum gesture age (ms) before promotion.
    pub min_time_ms: u64,
    /// Coordinates and angles relative to the container instead of the viewport.
    pub relative: bool,
    /// Continue motion after release.
    pub inertia: bool,
    /// Inertia length, usually derived from release distance.
    pub inertia_duration: DurationSetting,
    pub inertia_easing: Easing,
    /// Release velocity multiplier.
    pub inertia_ratio: f64,
    /// Release velocity (px/s, after the ratio) below which inertia fails.
    pub inertia_distance_threshold: f64,
    /// Travel (px) needed for a released swipe to report its direction.
    pub direction_threshold: f64,
    /// Let quick flicks advance one slide.
    pub short_swipes: bool,
    pub short_swipes_duration_ms: u64,
    pub short_swipes_threshold: f64,
    pub min_pointers: usize,
    pub max_pointers: usize,
    /// Mouse buttons that may start a swipe (0 = primary).
    pub buttons: Vec<u8>,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            axis: None,
            speed: swipe::SPEED,
            threshold: swipe::THRESHOLD,
            min_time_ms: swipe::MIN_TIME_MS,
            relative: false,
            inertia: true,
            inertia_duration: DurationSetting::inertia_default(),
            inertia_easing: Easing::EaseOutCubic,
            inertia_ratio: inertia::RATIO,
            inertia_distance_threshold: inertia::DISTANCE_THRESHOLD,
            direction_threshold: swipe::DIRECTION_THRESHOLD,
            short_swipes: true,
            short_swipes_duration_ms: swipe::SHORT_SWIPES_DURATION_MS,
            short_swipes_threshold: swipe::SHORT_SWIPES_THRESHOLD,
            min_pointers: swipe::MIN_POINTERS,
            max_pointers: swipe::MAX_POINTERS,
            buttons: swipe::BUTTONS.to_vec(),
        }
    }
}
