use std::time::Instant;

use glissade_model::Vec2;

/// Unit of a raw wheel delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta: Vec2,
    pub mode: DeltaMode,
    pub timestamp: Instant,
}

impl WheelInput {
    pub fn pixels(x: f64, y: f64, timestamp: Instant) -> Self {
        Self {
            delta: Vec2::new(x, y),
            mode: DeltaMode::Pixel,
            timestamp,
        }
    }

    pub fn lines(x: f64, y: f64, timestamp: Instant) -> Self {
        Self {
            delta: Vec2::new(x, y),
            mode: DeltaMode::Line,
            timestamp,
        }
    }
}

/// What the carousel should do with one wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    Ignore,
    /// Move the track target by `delta` and clamp.
    Follow { delta: f64 },
    /// Advance exactly one step.
    Advance { forward: bool },
    /// Scroll inside a slide larger than the container, bounded by its
    /// magnets.
    ScrollWithin { delta: f64, lo: f64, hi: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelOutcome {
    /// First event of a new wheel gesture.
    pub started: bool,
    /// Normalized pixel delta along the carousel axis.
    pub delta: f64,
    pub action: WheelAction,
}

/// Decision taken once the wheel has gone quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelEndAction {
    None,
    Stick,
    Advance { forward: bool },
}
