//! Release velocity estimation and the inertial continuation that follows.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use glissade_config::constants::inertia as defaults;
use glissade_config::{DurationSetting, SwipeConfig};
use glissade_model::{Easing, Matrix, VelocitySample};

use crate::timeline::Timeline;

pub type VelocityModifier = Box<dyn Fn(Matrix) -> Matrix>;
pub type DurationFn = Box<dyn Fn(f64) -> f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct InertiaSettings {
    pub enabled: bool,
    pub duration: DurationSetting,
    pub easing: Easing,
    pub ratio: f64,
    pub distance_threshold: f64,
}

impl Default for InertiaSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: DurationSetting::inertia_default(),
            easing: Easing::EaseOutCubic,
            ratio: defaults::RATIO,
            distance_threshold: defaults::DISTANCE_THRESHOLD,
        }
    }
}

impl InertiaSettings {
    pub fn from_swipe(config: &SwipeConfig) -> Self {
        Self {
            enabled: config.inertia,
            duration: config.inertia_duration,
            easing: config.inertia_easing,
            ratio: config.inertia_ratio,
            distance_threshold: config.inertia_distance_threshold,
        }
    }
}

/// Outcome of [`InertiaEngine::release`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Started { velocity: Matrix, duration_ms: f64 },
    Failed,
}

/// One inertia tick: offset from the released position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaFrame {
    pub add: Matrix,
    pub finished: bool,
}

pub struct InertiaEngine {
    settings: InertiaSettings,
    samples: VecDeque<VelocitySample>,
    capacity: usize,
    velocity_modifier: Option<VelocityModifier>,
    duration_fn: Option<DurationFn>,
    timeline: Timeline,
    velocity: Matrix,
}

impl fmt::Debug for InertiaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InertiaEngine")
            .field("settings", &self.settings)
            .field("samples", &self.samples.len())
            .field("active", &self.timeline.is_active())
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

impl Default for InertiaEngine {
    fn default() -> Self {
        Self::new(InertiaSettings::default())
    }
}

impl InertiaEngine {
    pub fn new(settings: InertiaSettings) -> Self {
        Self {
            settings,
            samples: VecDeque::with_capacity(defaults::SAMPLE_CAPACITY),
            capacity: defaults::SAMPLE_CAPACITY,
            velocity_modifier: None,
            duration_fn: None,
            timeline: Timeline::new(),
            velocity: Matrix::ZERO,
        }
    }

    /// Transform the release velocity before the distance check.
    pub fn with_velocity_modifier(
        mut self,
        modifier: impl Fn(Matrix) -> Matrix + 'static,
    ) -> Self {
        self.velocity_modifier = Some(Box::new(modifier));
        self
    }

    /// Replace the configured duration with `f(distance) -> ms`.
    pub fn with_duration_fn(mut self, f: impl Fn(f64) -> f64 + 'static) -> Self {
        self.duration_fn = Some(Box::new(f));
        self
    }

    pub fn set_velocity_modifier(&mut self, modifier: Option<VelocityModifier>) {
        self.velocity_modifier = modifier;
    }

    pub fn set_duration_fn(&mut self, f: Option<DurationFn>) {
        self.duration_fn = f;
    }

    pub fn settings(&self) -> &InertiaSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: InertiaSettings) {
        self.settings = settings;
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    pub fn is_active(&self) -> bool {
        self.timeline.is_active()
    }

    pub fn progress(&self) -> f64 {
        self.timeline.progress()
    }

    pub fn samples(&self) -> impl Iterator<Item = &VelocitySample> {
        self.samples.iter()
    }

    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    /// Record a sample. Timestamps must not go backwards: older samples are
    /// dropped and a repeated timestamp replaces the previous sample.
    pub fn push_sample(&mut self, matrix: Matrix, timestamp: Instant) {
        if let Some(last) = self.samples.back_mut() {
            if timestamp < last.timestamp {
                log::trace!("dropping out-of-order velocity sample");
                return;
            }
            if timestamp == last.timestamp {
                last.matrix = matrix;
                return;
            }
        }
        self.samples.push_back(VelocitySample::new(matrix, timestamp));
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Move the newest sample's timestamp forward to `now`, so a pointer that
    /// rested before release does not report its last stale speed.
    pub fn refresh_last_timestamp(&mut self, now: Instant) {
        if let Some(last) = self.samples.back_mut()
            && now > last.timestamp
        {
            last.timestamp = now;
        }
    }

    /// Weighted average of per-pair velocities, in units per second.
    ///
    /// Each pair is weighted by `exp(0.1 * dt_ms)`. Weights are normalized
    /// against the largest `dt` before exponentiation so long pauses cannot
    /// overflow.
    pub fn velocity(&self) -> Matrix {
        if self.samples.len() < 2 {
            return Matrix::ZERO;
        }

        let pairs: Vec<(f64, Matrix)> = self
            .samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .filter_map(|(a, b)| {
                let dt = b.timestamp.saturating_duration_since(a.timestamp);
                let dt_ms = dt.as_secs_f64() * 1000.0;
                if dt_ms <= 0.0 {
                    return None;
                }
                let delta = b.matrix.diff(&a.matrix);
                Some((dt_ms, delta.scale(1000.0 / dt_ms)))
            })
            .collect();

        let Some(max_dt) = pairs.iter().map(|(dt, _)| *dt).reduce(f64::max) else {
            return Matrix::ZERO;
        };

        let mut total = 0.0;
        let mut sum = Matrix::ZERO;
        for (dt, v) in &pairs {
            let weight = (defaults::WEIGHT_PER_MS * (dt - max_dt)).exp();
            total += weight;
            sum = sum.offset(&v.scale(weight));
        }
        if total <= 0.0 || !total.is_finite() {
            return Matrix::ZERO;
        }
        sum.scale(1.0 / total)
    }

    /// Compute the release velocity and, if it is large enough, start the
    /// inertial timeline. The clock starts at the first [`tick`](Self::tick).
    pub fn release(&mut self) -> Release {
        self.timeline.cancel();

        let mut velocity = self.velocity().scale(self.settings.ratio);
        if let Some(modifier) = &self.velocity_modifier {
            velocity = modifier(velocity);
        }
        let distance = velocity.x.hypot(velocity.y);

        if !distance.is_finite() || distance < self.settings.distance_threshold {
            log::debug!(
                "inertia failed: release distance {distance:.1} below {:.1}",
                self.settings.distance_threshold
            );
            return Release::Failed;
        }

        let duration_ms = match &self.duration_fn {
            Some(f) => f(distance),
            None => self.settings.duration.resolve_ms(distance),
        };
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            log::warn!("inertia failed: invalid duration {duration_ms}");
            return Release::Failed;
        }
        let duration = match Duration::try_from_secs_f64(duration_ms / 1000.0) {
            Ok(duration) => duration,
            Err(err) => {
                log::warn!("inertia failed: duration {duration_ms}ms out of range: {err}");
                return Release::Failed;
            }
        };

        self.velocity = velocity;
        self.timeline.start(duration, self.settings.easing);
        log::debug!(
            "inertia started: velocity ({:.1}, {:.1}) for {duration_ms:.0}ms",
            velocity.x,
            velocity.y
        );
        Release::Started {
            velocity,
            duration_ms,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<InertiaFrame> {
        let frame = self.timeline.tick(now)?;
        Some(InertiaFrame {
            add: self.velocity.scale(frame.eased),
            finished: frame.finished,
        })
    }

    /// Stop a running release. Returns `true` if it was cut short.
    pub fn cancel(&mut self) -> bool {
        self.timeline.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fewer_than_two_samples_is_zero_velocity() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        assert_eq!(engine.velocity(), Matrix::ZERO);
        engine.push_sample(Matrix::new(10.0, 0.0, 0.0), t0);
        assert_eq!(engine.velocity(), Matrix::ZERO);
    }

    #[test]
    fn velocity_is_units_per_second() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(10.0, -5.0, 0.0), t0 + ms(10));
        let v = engine.velocity();
        assert!((v.x - 1000.0).abs() < 1e-6);
        assert!((v.y + 500.0).abs() < 1e-6);
    }

    #[test]
    fn longer_pairs_weigh_more() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::ZERO, t0);
        // 1000 px/s over 10ms
        engine.push_sample(Matrix::new(10.0, 0.0, 0.0), t0 + ms(10));
        // 100 px/s over 30ms
        engine.push_sample(Matrix::new(13.0, 0.0, 0.0), t0 + ms(40));
        let v = engine.velocity();
        let w_short = (0.1_f64 * (10.0 - 30.0)).exp();
        let expected = (1000.0 * w_short + 100.0) / (w_short + 1.0);
        assert!((v.x - expected).abs() < 1e-6);
    }

    #[test]
    fn angle_velocity_uses_normalized_delta() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::new(0.0, 0.0, 175.0), t0);
        engine.push_sample(Matrix::new(0.0, 0.0, -175.0), t0 + ms(100));
        assert!((engine.velocity().angle - 100.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_order_samples_are_ignored() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::ZERO, t0 + ms(20));
        engine.push_sample(Matrix::new(50.0, 0.0, 0.0), t0);
        assert_eq!(engine.samples().count(), 1);
    }

    #[test]
    fn buffer_keeps_most_recent_samples() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        for i in 0..10u64 {
            engine.push_sample(Matrix::new(i as f64, 0.0, 0.0), t0 + ms(i * 10));
        }
        let xs: Vec<f64> = engine.samples().map(|s| s.matrix.x).collect();
        assert_eq!(xs, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn slow_release_fails() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(40.0, 0.0, 0.0), t0 + ms(16));
        engine.refresh_last_timestamp(t0 + ms(1000));
        assert_eq!(engine.release(), Release::Failed);
        assert!(!engine.is_active());
    }

    #[test]
    fn release_runs_additive_timeline() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::new(InertiaSettings {
            duration: DurationSetting::Fixed(100),
            easing: Easing::Linear,
            ratio: 1.0,
            ..InertiaSettings::default()
        });
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(10.0, 0.0, 0.0), t0 + ms(10));

        let Release::Started { velocity, .. } = engine.release() else {
            panic!("expected inertia to start");
        };
        assert!((velocity.x - 1000.0).abs() < 1e-6);

        let first = engine.tick(t0 + ms(20)).unwrap();
        assert_eq!(first.add.x, 0.0);
        let mid = engine.tick(t0 + ms(70)).unwrap();
        assert!((mid.add.x - 500.0).abs() < 1e-6);
        let end = engine.tick(t0 + ms(200)).unwrap();
        assert!(end.finished);
        assert!((end.add.x - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_duration_fails() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default().with_duration_fn(|_| f64::NAN);
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(100.0, 0.0, 0.0), t0 + ms(10));
        assert_eq!(engine.release(), Release::Failed);
    }

    #[test]
    fn unrepresentable_duration_fails() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default().with_duration_fn(|_| 1e30);
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(100.0, 0.0, 0.0), t0 + ms(10));
        assert_eq!(engine.release(), Release::Failed);
        assert!(!engine.is_active());
    }

    #[test]
    fn modifier_can_suppress_release() {
        let t0 = Instant::now();
        let mut engine =
            InertiaEngine::default().with_velocity_modifier(|v| Matrix::new(0.0, v.y, 0.0));
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(100.0, 0.0, 0.0), t0 + ms(10));
        assert_eq!(engine.release(), Release::Failed);
    }

    #[test]
    fn cancel_reports_interruption() {
        let t0 = Instant::now();
        let mut engine = InertiaEngine::default();
        engine.push_sample(Matrix::ZERO, t0);
        engine.push_sample(Matrix::new(100.0, 0.0, 0.0), t0 + ms(10));
        assert!(matches!(engine.release(), Release::Started { .. }));
        engine.tick(t0 + ms(20));
        assert!(engine.cancel());
        assert!(!engine.cancel());
    }
}
