use glissade_model::{Direction, Easing};
use serde::{Deserialize, Serialize};

use super::settings::{DurationSetting, FreemodeSetting, SlideSize};
use super::swipe::SwipeConfig;
use super::wheel::WheelConfig;
use crate::constants::track;
use crate::error::{ConfigError, Result};

/// Top-level carousel options.
///
/// Every field falls back to `constants`, so a document only needs to name
/// what it changes:
///
/// ```toml
/// loop = true
/// centered = true
/// freemode = "sticky"
///
/// [wheel]
/// follow = false
/// throttle = 400
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub direction: Direction,
    /// Wraparound scrolling.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Rest slides in the middle of the container instead of at its start.
    pub centered: bool,
    pub freemode: FreemodeSetting,
    /// Non-loop `next()`/`prev()` wrap to the other end.
    pub rewind: bool,
    pub gap: f64,
    /// Per-frame interpolation factor at 60 Hz.
    pub lerp: f64,
    /// Idle pull toward the nearest magnet.
    pub friction: f64,
    /// Resistance past the bounds (1 = hard wall).
    pub edge_friction: f64,
    pub slide_size: SlideSize,
    pub slides_to_scroll: usize,
    /// Schedule a `stick()` after every reflow.
    pub stick_on_resize: bool,
    /// Length of programmatic transitions.
    pub duration: DurationSetting,
    pub easing: Easing,
    pub swipe: SwipeConfig,
    pub wheel: WheelConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            looping: false,
            centered: false,
            freemode: FreemodeSetting::Off,
            rewind: false,
            gap: track::GAP,
            lerp: track::LERP,
            friction: track::FRICTION,
            edge_friction: track::EDGE_FRICTION,
            slide_size: SlideSize::Auto,
            slides_to_scroll: track::SLIDES_TO_SCROLL,
            stick_on_resize: true,
            duration: DurationSetting::transition_default(),
            easing: Easing::EaseOutCubic,
            swipe: SwipeConfig::default(),
            wheel: WheelConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Range-check every numeric option.
    pub fn validate(&self) -> Result<()> {
        if !(self.lerp > 0.0 && self.lerp <= 1.0) {
            return Err(ConfigError::invalid(
                "lerp",
                format!("{} is outside (0, 1]", self.lerp),
            ));
        }
        unit_interval("friction", self.friction)?;
        unit_interval("edge_friction", self.edge_friction)?;
        non_negative("gap", self.gap)?;
        non_negative("swipe.threshold", self.swipe.threshold)?;
        non_negative("swipe.inertia_ratio", self.swipe.inertia_ratio)?;
        non_negative(
            "swipe.inertia_distance_threshold",
            self.swipe.inertia_distance_threshold,
        )?;
        if !self.swipe.speed.is_finite() {
            return Err(ConfigError::invalid("swipe.speed", "must be finite"));
        }
        if !self.wheel.speed.is_finite() {
            return Err(ConfigError::invalid("wheel.speed", "must be finite"));
        }
        if self.slides_to_scroll == 0 {
            return Err(ConfigError::invalid(
                "slides_to_scroll",
                "must be at least 1",
            ));
        }
        if self.swipe.min_pointers == 0
            || self.swipe.max_pointers < self.swipe.min_pointers
        {
            return Err(ConfigError::invalid(
                "swipe.max_pointers",
                format!(
                    "pointer range {}..={} is empty",
                    self.swipe.min_pointers, self.swipe.max_pointers
                ),
            ));
        }
        if let SlideSize::Fixed(px) = self.slide_size {
            non_negative("slide_size", px)?;
        }
        let h = &self.wheel.heuristics;
        if h.history_len < 2 {
            return Err(ConfigError::invalid(
                "wheel.heuristics.history_len",
                "needs at least two samples",
            ));
        }
        unit_interval("wheel.heuristics.stable_ratio", h.stable_ratio)?;
        Ok(())
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} is outside [0, 1]")))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} must be >= 0")))
    }
}
