//! Single-shot eased timeline.
//!
//! The clock starts on the first `tick`, so callers can request an animation
//! from input handlers that carry no frame timestamp.

use std::time::{Duration, Instant};

use glissade_model::Easing;

/// One timeline sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineFrame {
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// `easing(progress)`.
    pub eased: f64,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    active: bool,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
    progress: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            active: false,
            started_at: None,
            duration: Duration::ZERO,
            easing: Easing::EaseOutCubic,
            progress: 0.0,
        }
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Arm the timeline; the clock starts at the next `tick`.
    pub fn start(&mut self, duration: Duration, easing: Easing) {
        self.active = true;
        self.started_at = None;
        self.duration = duration;
        self.easing = easing;
        self.progress = 0.0;
    }

    /// Returns `None` when inactive.
    pub fn tick(&mut self, now: Instant) -> Option<TimelineFrame> {
        if !self.active {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);

        if self.duration.is_zero() || elapsed >= self.duration {
            self.active = false;
            self.progress = 1.0;
            return Some(TimelineFrame {
                progress: 1.0,
                eased: 1.0,
                finished: true,
            });
        }

        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64())
            .clamp(0.0, 1.0);
        self.progress = t;
        Some(TimelineFrame {
            progress: t,
            eased: self.easing.apply(t),
            finished: false,
        })
    }

    /// Stop early. Returns `true` if the timeline was interrupted before
    /// reaching the end.
    pub fn cancel(&mut self) -> bool {
        let interrupted = self.active && self.progress < 1.0;
        self.active = false;
        interrupted
    }
}
