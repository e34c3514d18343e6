use glissade_config::DurationSetting;
use glissade_model::Easing;

use super::messages::TransitionKind;
use crate::snap::SnapDirection;

/// Which motion driver currently owns the track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionState {
    #[default]
    Idle,
    /// Pointer down, start gates not yet passed.
    Tracking,
    Swiping,
    /// Inertial release after a swipe.
    Releasing,
    /// Animated snap to the nearest magnet.
    Sticking,
    DiscreteAdvance,
    Navigating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    WheelEnd,
    Stick,
}

/// Overrides for one programmatic move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavigateOptions {
    pub duration: Option<DurationSetting>,
    pub easing: Option<Easing>,
    /// Which of the slide's magnets (and, when looping, which lap) to aim at.
    pub direction: Option<SnapDirection>,
}

impl NavigateOptions {
    /// Jump without animating.
    pub fn instant() -> Self {
        Self {
            duration: Some(DurationSetting::Fixed(0)),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: DurationSetting) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_direction(mut self, direction: SnapDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Programmatic move in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transition {
    pub from: f64,
    pub to: f64,
    pub kind: TransitionKind,
}

impl Transition {
    pub fn motion_state(&self) -> MotionState {
        match self.kind {
            TransitionKind::Navigate => MotionState::Navigating,
            TransitionKind::Stick => MotionState::Sticking,
            TransitionKind::Wheel => MotionState::DiscreteAdvance,
        }
    }

    pub fn at(&self, eased: f64) -> f64 {
        self.from + (self.to - self.from) * eased
    }
}
