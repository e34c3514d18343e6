//! Scalar position model of a carousel.
//!
//! Input handlers only ever move `target`; the frame tick moves `current`
//! toward it with [`Track::interpolate`]. In non-loop mode the target may
//! overshoot the bounds by `edge_slack`, and the overshoot is rendered with
//! progressive resistance rather than stored.

use glissade_config::constants::track as defaults;
use glissade_model::math::{clamp, lerp, lerp_factor, loop_value, scoped};

/// Decaying signed scalar following recent movement direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Influence {
    pub current: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    current: f64,
    target: f64,
    min: f64,
    max: f64,
    looping: bool,
    container_size: f64,
    edge_friction: f64,
    influence: Influence,
}

impl Default for Track {
    fn default() -> Self {
        Self::new(false, defaults::EDGE_FRICTION)
    }
}

impl Track {
    pub fn new(looping: bool, edge_friction: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            min: 0.0,
            max: 0.0,
            looping,
            container_size: 0.0,
            edge_friction: clamp(edge_friction, 0.0, 1.0),
            influence: Influence::default(),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Lower bound; always `0` when looping.
    pub fn min(&self) -> f64 {
        if self.looping { 0.0 } else { self.min }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn container_size(&self) -> f64 {
        self.container_size
    }

    pub fn influence(&self) -> Influence {
        self.influence
    }

    /// Update the scrollable range after a reflow.
    pub fn set_bounds(&mut self, min: f64, max: f64, container_size: f64) {
        self.min = if min.is_finite() { min } else { 0.0 };
        self.max = if max.is_finite() { max.max(self.min) } else { self.min };
        self.container_size = if container_size.is_finite() {
            container_size.max(0.0)
        } else {
            0.0
        };
        if !self.looping {
            self.target = self.clamp_to_slack(self.target);
            self.current = self.clamp_to_slack(self.current);
        }
        log::trace!(
            "track bounds [{:.1}, {:.1}] container {:.1}",
            self.min(),
            self.max,
            self.container_size
        );
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        if !looping {
            self.target = self.clamp_to_slack(self.target);
            self.current = self.clamp_to_slack(self.current);
        }
    }

    pub fn set_edge_friction(&mut self, edge_friction: f64) {
        self.edge_friction = clamp(edge_friction, 0.0, 1.0);
    }

    /// Maximum distance the target may overshoot a bound.
    pub fn edge_slack(&self) -> f64 {
        ((1.0 - self.edge_friction) * self.container_size).max(0.0)
    }

    fn clamp_to_slack(&self, value: f64) -> f64 {
        let slack = self.edge_slack();
        clamp(value, self.min - slack, self.max + slack)
    }

    /// `current` wrapped into `[min, max)` when looping.
    pub fn looped_current(&self) -> f64 {
        if self.looping {
            loop_value(self.current, self.min(), self.max)
        } else {
            self.current
        }
    }

    /// Number of full laps `current` is away from the first one.
    pub fn loop_count(&self) -> i64 {
        if !self.looping || self.max <= 0.0 {
            return 0;
        }
        (self.current / self.max).floor() as i64
    }

    pub fn set_target(&mut self, value: f64) -> f64 {
        self.target = if self.looping {
            value
        } else {
            self.clamp_to_slack(value)
        };
        self.target
    }

    /// Move the target by `delta` and feed the influence accumulator.
    pub fn iterate_target(&mut self, delta: f64) -> f64 {
        if !delta.is_finite() {
            return self.target;
        }
        if self.container_size > 0.0 {
            self.influence.target = clamp(
                self.influence.target + delta / self.container_size,
                -defaults::INFLUENCE_LIMIT,
                defaults::INFLUENCE_LIMIT,
            );
        }
        self.set_target(self.target + delta)
    }

    /// Pull the target back inside `[min, max]` (non-loop only).
    pub fn clamp_target(&mut self) -> f64 {
        if !self.looping {
            self.target = clamp(self.target, self.min, self.max);
        }
        self.target
    }

    /// Jump: set both `current` and `target`.
    pub fn set(&mut self, value: f64) {
        let value = if self.looping {
            value
        } else {
            self.clamp_to_slack(value)
        };
        self.current = value;
        self.target = value;
    }

    /// Target as rendered, with edge resistance applied past the bounds.
    pub fn apparent_target(&self) -> f64 {
        if self.looping {
            return self.target;
        }
        let slack = self.edge_slack();
        let size = self.container_size;
        let target = self.target;

        let apparent = if target < self.min {
            let progress = clamp(1.0 - scoped(target, self.min - size, self.min), 0.0, 1.0);
            self.min - progress * slack
        } else if target > self.max {
            let progress = clamp(scoped(target, self.max, self.max + size), 0.0, 1.0);
            self.max + progress * slack
        } else {
            target
        };
        clamp(apparent, self.min - slack, self.max + slack)
    }

    /// Advance `current` one frame toward the apparent target.
    ///
    /// Returns `true` while still moving.
    pub fn interpolate(&mut self, ease: f64, frame_ms: f64) -> bool {
        let base = lerp_factor(ease, frame_ms);
        let target = self.apparent_target();
        let rest = (target - self.current).abs();

        let mut factor = base;
        if rest < defaults::TAIL_BOOST_DISTANCE {
            factor += ((1.0 - factor) / defaults::TAIL_BOOST_DIVISOR)
                * (1.0 - rest / defaults::TAIL_BOOST_DISTANCE);
        }

        self.current = lerp(self.current, target, factor, defaults::LERP_EPSILON);
        if !self.looping {
            self.current = self.clamp_to_slack(self.current);
        }

        self.influence.current = lerp(
            self.influence.current,
            self.influence.target,
            base,
            defaults::LERP_EPSILON,
        );
        self.influence.target = lerp(self.influence.target, 0.0, base, defaults::LERP_EPSILON);

        self.current != target
    }

    /// `current` has reached the (apparent) target.
    pub fn is_settled(&self) -> bool {
        self.current == self.apparent_target()
    }

    pub fn is_start(&self) -> bool {
        !self.looping && self.target.floor() <= self.min.floor()
    }

    pub fn is_end(&self) -> bool {
        !self.looping && self.target.floor() >= self.max.floor()
    }

    /// Scroll progress in `[0, 1]` across the range (per lap when looping).
    pub fn progress(&self) -> f64 {
        if self.looping {
            return scoped(self.looped_current(), 0.0, self.max);
        }
        clamp(scoped(self.current, self.min, self.max), 0.0, 1.0)
    }
}
