//! Wheel events to track motion.
//!
//! In follow mode every delta moves the track directly. In discrete mode a
//! wheel gesture advances one slide at a time, with touchpad momentum
//! filtered out and a cooldown between advances.

use std::time::{Duration, Instant};

use glissade_config::{FreemodeSetting, WheelConfig, WheelThrottle};
use glissade_model::Axis;

use super::heuristics::WheelHistory;
use super::messages::{DeltaMode, WheelAction, WheelEndAction, WheelInput, WheelOutcome};

/// Carousel facts a wheel event is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelContext {
    pub axis: Axis,
    pub container: f64,
    pub target: f64,
    pub transitioning: bool,
    /// Magnet range of the active slide when it is larger than the container.
    pub scroll_range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEndContext {
    pub freemode: FreemodeSetting,
    /// Progress of the active slide (positive once scrolled past its start).
    pub active_progress: f64,
    pub active_size: f64,
}

#[derive(Debug, Clone)]
pub struct WheelAdapter {
    config: WheelConfig,
    history: WheelHistory,
    active: bool,
    advanced: bool,
    last_advance: Option<Instant>,
    last_event: Option<Instant>,
}

impl WheelAdapter {
    pub fn new(config: WheelConfig) -> Self {
        let history = WheelHistory::new(config.heuristics.history_len);
        Self {
            config,
            history,
            active: false,
            advanced: false,
            last_advance: None,
            last_event: None,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    /// A wheel gesture is in progress (no end decided yet).
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_event(&self) -> Option<Instant> {
        self.last_event
    }

    /// When the current gesture counts as finished if nothing else arrives.
    pub fn end_deadline(&self) -> Option<Instant> {
        self.last_event
            .map(|at| at + Duration::from_millis(self.config.heuristics.end_silence_ms))
    }

    pub fn history(&self) -> &WheelHistory {
        &self.history
    }

    fn reset(&mut self) {
        self.history.clear();
        self.active = false;
        self.advanced = false;
    }

    /// Pixel delta along the carousel axis.
    pub fn normalize(&self, input: &WheelInput, ctx: &WheelContext) -> f64 {
        let heuristics = &self.config.heuristics;
        let unit = match input.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => heuristics.line_height,
            DeltaMode::Page if ctx.container > 0.0 => ctx.container,
            DeltaMode::Page => heuristics.page_fallback,
        };
        let delta = input.delta.scale(unit);
        let value = match self.config.axis.fixed() {
            Some(axis) => delta.along(axis),
            None => {
                let primary = delta.along(ctx.axis);
                if primary != 0.0 {
                    primary
                } else {
                    delta.along(match ctx.axis {
                        Axis::X => Axis::Y,
                        Axis::Y => Axis::X,
                    })
                }
            }
        };
        if value.is_finite() { value } else { 0.0 }
    }

    pub fn handle(&mut self, input: &WheelInput, ctx: &WheelContext) -> WheelOutcome {
        let ignore = WheelOutcome {
            started: false,
            delta: 0.0,
            action: WheelAction::Ignore,
        };
        if !self.config.enabled {
            return ignore;
        }
        let delta = self.normalize(input, ctx);
        if delta == 0.0 {
            return ignore;
        }

        let started = !self.active;
        if started {
            self.history.clear();
            self.advanced = false;
            self.active = true;
        }
        self.last_event = Some(input.timestamp);
        self.history.push(delta);

        let action = if self.config.follow {
            WheelAction::Follow {
                delta: delta * self.config.speed,
            }
        } else {
            self.discrete(delta, input.timestamp, ctx)
        };
        log::trace!("wheel delta {delta:.1} -> {action:?}");

        WheelOutcome {
            started,
            delta,
            action,
        }
    }

    fn discrete(&mut self, delta: f64, now: Instant, ctx: &WheelContext) -> WheelAction {
        if let Some((lo, hi)) = ctx.scroll_range {
            let inside = (delta > 0.0 && ctx.target < hi) || (delta < 0.0 && ctx.target > lo);
            if inside {
                return WheelAction::ScrollWithin { delta, lo, hi };
            }
        }

        let heuristics = &self.config.heuristics;
        if self.advanced && self.history.is_touchpad(heuristics) {
            if !self.history.is_gaining(heuristics.gain_multiplier) {
                return WheelAction::Ignore;
            }
            log::debug!("touchpad delta is gaining; treating as a new swipe");
        }

        let within = |ms: u64| {
            self.last_advance.is_some_and(|at| {
                now.saturating_duration_since(at) < Duration::from_millis(ms)
            })
        };
        let throttled = match self.config.throttle {
            WheelThrottle::Millis(0) => false,
            WheelThrottle::Millis(ms) => within(ms),
            WheelThrottle::Auto => ctx.transitioning || within(heuristics.auto_cooldown_ms),
        };
        if throttled {
            return WheelAction::Ignore;
        }

        self.last_advance = Some(now);
        self.advanced = true;
        WheelAction::Advance {
            forward: delta > 0.0,
        }
    }

    /// Close the current wheel gesture and decide how to settle.
    pub fn end(&mut self, ctx: &WheelEndContext) -> WheelEndAction {
        if !self.active {
            return WheelEndAction::None;
        }
        let sum = self.history.recent_sum(self.config.heuristics.end_sample_count);
        self.reset();

        if !self.config.follow || !self.config.stick_on_end {
            return WheelEndAction::None;
        }
        match ctx.freemode {
            FreemodeSetting::Free => WheelEndAction::None,
            FreemodeSetting::Sticky => WheelEndAction::Stick,
            FreemodeSetting::Off => {
                let threshold = if ctx.active_size > 0.0 {
                    self.config.stick_on_end_threshold / ctx.active_size
                } else {
                    f64::INFINITY
                };
                if sum > 0.0 && ctx.active_progress > threshold {
                    WheelEndAction::Advance { forward: true }
                } else if sum < 0.0 && ctx.active_progress < -threshold {
                    WheelEndAction::Advance { forward: false }
                } else {
                    WheelEndAction::Stick
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn ctx() -> WheelContext {
        WheelContext {
            axis: Axis::X,
            container: 900.0,
            target: 0.0,
            transitioning: false,
            scroll_range: None,
        }
    }

    fn discrete(throttle: WheelThrottle) -> WheelAdapter {
        WheelAdapter::new(WheelConfig {
            follow: false,
            throttle,
            ..WheelConfig::default()
        })
    }

    #[test]
    fn auto_axis_falls_back_to_other_component() {
        let t0 = Instant::now();
        let adapter = WheelAdapter::new(WheelConfig::default());
        assert_eq!(adapter.normalize(&WheelInput::pixels(0.0, 30.0, t0), &ctx()), 30.0);
        assert_eq!(adapter.normalize(&WheelInput::pixels(12.0, 30.0, t0), &ctx()), 12.0);
    }

    #[test]
    fn delta_modes_scale_to_pixels() {
        let t0 = Instant::now();
        let adapter = WheelAdapter::new(WheelConfig::default());
        assert_eq!(adapter.normalize(&WheelInput::lines(2.0, 0.0, t0), &ctx()), 80.0);
        let page = WheelInput {
            mode: DeltaMode::Page,
            ..WheelInput::pixels(1.0, 0.0, t0)
        };
        assert_eq!(adapter.normalize(&page, &ctx()), 900.0);
        let empty = WheelContext {
            container: 0.0,
            ..ctx()
        };
        assert_eq!(adapter.normalize(&page, &empty), 800.0);
    }

    #[test]
    fn follow_mode_scales_by_speed() {
        let t0 = Instant::now();
        let mut adapter = WheelAdapter::new(WheelConfig {
            speed: 2.0,
            ..WheelConfig::default()
        });
        let out = adapter.handle(&WheelInput::pixels(0.0, 50.0, t0), &ctx());
        assert!(out.started);
        assert_eq!(out.action, WheelAction::Follow { delta: 100.0 });
        let out = adapter.handle(&WheelInput::pixels(0.0, 50.0, t0 + ms(16)), &ctx());
        assert!(!out.started);
    }

    #[test]
    fn auto_throttle_blocks_during_transition_and_cooldown() {
        let t0 = Instant::now();
        let mut adapter = discrete(WheelThrottle::Auto);
        let first = adapter.handle(&WheelInput::pixels(100.0, 0.0, t0), &ctx());
        assert_eq!(first.action, WheelAction::Advance { forward: true });

        let busy = WheelContext {
            transitioning: true,
            ..ctx()
        };
        let during = adapter.handle(&WheelInput::pixels(100.0, 0.0, t0 + ms(600)), &busy);
        assert_eq!(during.action, WheelAction::Ignore);

        let soon = adapter.handle(&WheelInput::pixels(100.0, 0.0, t0 + ms(300)), &ctx());
        assert_eq!(soon.action, WheelAction::Ignore);
        let later = adapter.handle(&WheelInput::pixels(-100.0, 0.0, t0 + ms(700)), &ctx());
        assert_eq!(later.action, WheelAction::Advance { forward: false });
    }

    #[test]
    fn touchpad_momentum_is_ignored_after_advancing() {
        let t0 = Instant::now();
        let mut adapter = discrete(WheelThrottle::Millis(0));
        let deltas = [30.0, 28.0, 24.0, 19.0, 15.0, 11.0];
        let actions: Vec<WheelAction> = deltas
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                adapter
                    .handle(&WheelInput::pixels(d, 0.0, t0 + ms(i as u64 * 16)), &ctx())
                    .action
            })
            .collect();
        assert_eq!(actions[0], WheelAction::Advance { forward: true });
        assert!(actions[1..].iter().all(|a| *a == WheelAction::Ignore));
    }

    #[test]
    fn accelerating_touchpad_counts_as_a_new_swipe() {
        let t0 = Instant::now();
        let mut adapter = discrete(WheelThrottle::Millis(0));
        let deltas = [30.0, 12.0, 6.0, 4.0, 40.0, 48.0];
        let actions: Vec<WheelAction> = deltas
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                adapter
                    .handle(&WheelInput::pixels(d, 0.0, t0 + ms(i as u64 * 16)), &ctx())
                    .action
            })
            .collect();
        assert_eq!(actions[0], WheelAction::Advance { forward: true });
        assert!(actions[1..5].iter().all(|a| *a == WheelAction::Ignore));
        assert_eq!(actions[5], WheelAction::Advance { forward: true });
    }

    #[test]
    fn large_slide_scrolls_before_advancing() {
        let t0 = Instant::now();
        let mut adapter = discrete(WheelThrottle::Millis(0));
        let inside = WheelContext {
            target: 300.0,
            scroll_range: Some((300.0, 600.0)),
            ..ctx()
        };
        let out = adapter.handle(&WheelInput::pixels(40.0, 0.0, t0), &inside);
        assert_eq!(out.action, WheelAction::ScrollWithin {
            delta: 40.0,
            lo: 300.0,
            hi: 600.0
        });
        let at_end = WheelContext {
            target: 600.0,
            ..inside
        };
        let out = adapter.handle(&WheelInput::pixels(40.0, 0.0, t0 + ms(16)), &at_end);
        assert_eq!(out.action, WheelAction::Advance { forward: true });
    }

    #[test]
    fn end_advances_past_threshold_or_sticks() {
        let t0 = Instant::now();
        let mut adapter = WheelAdapter::new(WheelConfig::default());
        adapter.handle(&WheelInput::pixels(20.0, 0.0, t0), &ctx());
        adapter.handle(&WheelInput::pixels(20.0, 0.0, t0 + ms(16)), &ctx());
        let end = WheelEndContext {
            freemode: FreemodeSetting::Off,
            active_progress: 40.0 / 300.0,
            active_size: 300.0,
        };
        assert_eq!(adapter.end(&end), WheelEndAction::Advance { forward: true });
        assert!(!adapter.is_active());

        adapter.handle(&WheelInput::pixels(20.0, 0.0, t0 + ms(500)), &ctx());
        let short = WheelEndContext {
            active_progress: 10.0 / 300.0,
            ..end
        };
        assert_eq!(adapter.end(&short), WheelEndAction::Stick);
    }

    #[test]
    fn disabled_adapter_ignores_input() {
        let t0 = Instant::now();
        let mut adapter = WheelAdapter::new(WheelConfig::default());
        adapter.set_enabled(false);
        let out = adapter.handle(&WheelInput::pixels(20.0, 0.0, t0), &ctx());
        assert_eq!(out.action, WheelAction::Ignore);
        assert!(!adapter.is_active());
    }
}
