//! Pointer samples in, swipe lifecycle events out.
//!
//! A pressed pointer first enters `Tracking`. It is promoted to `Swiping`
//! once it has travelled `threshold` along the locked axis for at least
//! `min_time`, and its direction stays within the axis tolerance. The
//! recognizer owns the [`InertiaEngine`] and drives it from [`tick`].
//!
//! [`tick`]: GestureRecognizer::tick

use std::fmt;
use std::time::{Duration, Instant};

use glissade_config::SwipeConfig;
use glissade_config::constants::swipe as defaults;
use glissade_model::{Axis, Matrix, Rect, Size, SwipeDirection, Vec2};

use super::inertia::{InertiaEngine, InertiaSettings, Release};
use super::messages::{AbortQuery, GestureEvent, GestureState, PointerId, PointerInput};
use super::pointer::{PointerTracker, TrackerEvent};
use crate::events::EventQueue;

pub type AbortPredicate = Box<dyn Fn(&AbortQuery) -> bool>;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    pub enabled: bool,
    /// Lock swipes to this axis; `None` accepts any direction.
    pub axis: Option<Axis>,
    pub threshold: f64,
    pub min_time: Duration,
    /// Measure positions relative to the container instead of the viewport.
    pub relative: bool,
    pub direction_threshold: f64,
    pub min_pointers: usize,
    pub max_pointers: usize,
    pub buttons: Vec<u8>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self::from_swipe(&SwipeConfig::default())
    }
}

impl GestureSettings {
    pub fn from_swipe(config: &SwipeConfig) -> Self {
        Self {
            enabled: config.enabled,
            axis: config.axis,
            threshold: config.threshold,
            min_time: Duration::from_millis(config.min_time_ms),
            relative: config.relative,
            direction_threshold: config.direction_threshold,
            min_pointers: config.min_pointers,
            max_pointers: config.max_pointers,
            buttons: config.buttons.clone(),
        }
    }

    pub fn with_axis(mut self, axis: Option<Axis>) -> Self {
        self.axis = axis;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Pressed, start gates not yet passed.
    Tracking {
        first: Matrix,
        first_at: Instant,
        last: Matrix,
        accum: Vec2,
    },
    /// Vetoed; the rest of this press is ignored.
    Aborted,
    Swiping,
}

pub struct GestureRecognizer {
    settings: GestureSettings,
    tracker: PointerTracker,
    inertia: InertiaEngine,
    will_abort: Option<AbortPredicate>,
    phase: Phase,
    state: Option<GestureState>,
    /// Position the inertial offset is added to.
    released_at: Option<Matrix>,
    viewport: Size,
    container: Rect,
    events: EventQueue<GestureEvent>,
}

impl fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("settings", &self.settings)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("inertia", &self.inertia)
            .field("will_abort", &self.will_abort.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureSettings::default(), InertiaSettings::default())
    }
}

impl GestureRecognizer {
    pub fn new(settings: GestureSettings, inertia: InertiaSettings) -> Self {
        let tracker = PointerTracker::new(
            settings.min_pointers,
            settings.max_pointers,
            settings.buttons.clone(),
        );
        Self {
            settings,
            tracker,
            inertia: InertiaEngine::new(inertia),
            will_abort: None,
            phase: Phase::Idle,
            state: None,
            released_at: None,
            viewport: Size::default(),
            container: Rect::default(),
            events: EventQueue::new(),
        }
    }

    pub fn from_swipe(config: &SwipeConfig) -> Self {
        Self::new(
            GestureSettings::from_swipe(config),
            InertiaSettings::from_swipe(config),
        )
    }

    /// Veto promotion when the predicate returns `true`.
    pub fn with_will_abort(mut self, f: impl Fn(&AbortQuery) -> bool + 'static) -> Self {
        self.will_abort = Some(Box::new(f));
        self
    }

    pub fn set_will_abort(&mut self, f: Option<AbortPredicate>) {
        self.will_abort = f;
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn set_axis(&mut self, axis: Option<Axis>) {
        self.settings.axis = axis;
    }

    pub fn inertia(&self) -> &InertiaEngine {
        &self.inertia
    }

    pub fn inertia_mut(&mut self) -> &mut InertiaEngine {
        &mut self.inertia
    }

    /// Viewport extent and container rectangle used for angle decoding.
    pub fn set_bounds(&mut self, viewport: Size, container: Rect) {
        self.viewport = viewport;
        self.container = container;
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Disabling ends any gesture in progress (without inertia), stops a
    /// running release and ignores further input.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.settings.enabled == enabled {
            return;
        }
        self.settings.enabled = enabled;
        if !enabled {
            self.cancel_pointers(None);
            self.cancel_inertia();
        }
    }

    pub fn is_swiping(&self) -> bool {
        self.phase == Phase::Swiping
    }

    /// Pressed but not yet promoted.
    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, Phase::Tracking { .. })
    }

    pub fn is_inertia_active(&self) -> bool {
        self.inertia.is_active()
    }

    pub fn state(&self) -> Option<&GestureState> {
        self.state.as_ref()
    }

    pub fn pointers(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn drain_events(&mut self) -> Vec<GestureEvent> {
        self.events.drain()
    }

    fn decode(&self, position: Vec2) -> Matrix {
        if self.settings.relative {
            let point = position - self.container.origin();
            Matrix::from_point(point, self.container.size().center())
        } else {
            Matrix::from_point(position, self.viewport.center())
        }
    }

    fn forward(&mut self, events: Vec<TrackerEvent>, at: Instant, with_inertia: bool) {
        for event in events {
            match event {
                TrackerEvent::PointerStart(id) => {
                    self.events.emit(GestureEvent::PointerStart(id));
                }
                TrackerEvent::PointerEnd(id) => {
                    self.events.emit(GestureEvent::PointerEnd(id));
                }
                TrackerEvent::Start => {
                    if let Some(primary) = self.tracker.primary() {
                        let first = self.decode(primary.current);
                        self.phase = Phase::Tracking {
                            first,
                            first_at: at,
                            last: first,
                            accum: Vec2::ZERO,
                        };
                    }
                }
                TrackerEvent::End => self.finish(at, with_inertia),
            }
        }
    }

    pub fn pointer_down(&mut self, input: &PointerInput) {
        if !self.settings.enabled {
            return;
        }
        let events = self.tracker.down(input);
        self.forward(events, input.timestamp, true);
    }

    pub fn pointer_move(&mut self, input: &PointerInput) {
        if !self.settings.enabled {
            return;
        }
        if !self.tracker.moved(input) {
            if self.tracker.is_empty() {
                log::trace!("ignoring hover move from pointer {}", input.id);
            } else {
                log::warn!("dropping move for unknown pointer {}", input.id);
            }
            return;
        }
        if self.tracker.primary().map(|p| p.id) != Some(input.id) {
            return;
        }
        let matrix = self.decode(input.position);

        match self.phase {
            Phase::Idle | Phase::Aborted => {}
            Phase::Tracking {
                first,
                first_at,
                last,
                accum,
            } => {
                let step = matrix.diff(&last);
                let accum = accum + Vec2::new(step.x, step.y).abs();
                self.phase = Phase::Tracking {
                    first,
                    first_at,
                    last: matrix,
                    accum,
                };
                self.try_promote(matrix, first, first_at, accum, input.timestamp);
            }
            Phase::Swiping => {
                if let Some(state) = self.state.as_mut() {
                    state.advance(matrix);
                    let snapshot = *state;
                    self.inertia.push_sample(matrix, input.timestamp);
                    self.events.emit(GestureEvent::Move(snapshot));
                }
            }
        }
    }

    pub fn pointer_up(&mut self, input: &PointerInput) {
        let events = self.tracker.up(input.id);
        self.forward(events, input.timestamp, true);
    }

    /// Pointer cancel from the host: end everything without inertia.
    pub fn pointer_cancel(&mut self, at: Instant) {
        self.cancel_pointers(Some(at));
    }

    fn cancel_pointers(&mut self, at: Option<Instant>) {
        let events = self.tracker.release_all();
        match at.or(self.state.map(|s| s.timestamp)) {
            Some(at) => self.forward(events, at, false),
            // nothing is swiping, so only the pointer ends are reported
            None => {
                for event in events {
                    if let TrackerEvent::PointerEnd(id) = event {
                        self.events.emit(GestureEvent::PointerEnd(id));
                    }
                }
            }
        }
        self.phase = Phase::Idle;
    }

    fn try_promote(
        &mut self,
        matrix: Matrix,
        first: Matrix,
        first_at: Instant,
        accum: Vec2,
        now: Instant,
    ) {
        let total = accum.length();
        if total <= self.settings.threshold {
            return;
        }
        if now.saturating_duration_since(first_at) < self.settings.min_time {
            return;
        }

        let diff = matrix.diff(&first);
        if let Some(axis) = self.settings.axis {
            let deviation = axis_deviation(diff, axis);
            if deviation > defaults::AXIS_TOLERANCE_DEG {
                log::debug!("swipe aborted: {deviation:.0} degrees off {axis:?}");
                self.abort();
                return;
            }
        }
        let travelled = self.settings.axis.map_or(total, |axis| accum.along(axis));
        if travelled <= self.settings.threshold {
            return;
        }
        if let Some(will_abort) = &self.will_abort {
            let query = AbortQuery {
                matrix,
                start: first,
                diff,
            };
            if will_abort(&query) {
                log::debug!("swipe vetoed by will_abort");
                self.abort();
                return;
            }
        }

        self.cancel_inertia();
        let state = GestureState::new(matrix, now);
        self.state = Some(state);
        self.phase = Phase::Swiping;
        self.inertia.clear_samples();
        self.inertia.push_sample(matrix, now);
        log::debug!("swipe started after {travelled:.1}px");
        self.events.emit(GestureEvent::Start(state));
    }

    fn abort(&mut self) {
        self.phase = Phase::Aborted;
        self.state = None;
        self.events.emit(GestureEvent::Abort);
    }

    fn finish(&mut self, at: Instant, with_inertia: bool) {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        if phase != Phase::Swiping {
            return;
        }
        let Some(state) = self.state else {
            return;
        };

        self.events.emit(GestureEvent::End { state, at });
        for direction in swipe_directions(state.diff, self.settings.direction_threshold) {
            self.events.emit(GestureEvent::Direction(direction));
        }

        if !with_inertia || !self.inertia.is_enabled() {
            self.state = None;
            return;
        }

        self.inertia.refresh_last_timestamp(at);
        match self.inertia.release() {
            Release::Started {
                velocity,
                duration_ms,
            } => {
                self.released_at = Some(state.current);
                self.events.emit(GestureEvent::InertiaStart {
                    velocity,
                    duration_ms,
                });
            }
            Release::Failed => {
                self.state = None;
                self.events.emit(GestureEvent::InertiaFail);
            }
        }
    }

    /// Drive a running inertial release.
    pub fn tick(&mut self, now: Instant) {
        let Some(frame) = self.inertia.tick(now) else {
            return;
        };
        let (Some(origin), Some(state)) = (self.released_at, self.state.as_mut()) else {
            self.inertia.cancel();
            return;
        };
        state.advance(origin.offset(&frame.add));
        let snapshot = *state;
        self.events.emit(GestureEvent::Inertia(snapshot));

        if frame.finished {
            self.released_at = None;
            self.state = None;
            self.events.emit(GestureEvent::InertiaEnd);
        }
    }

    /// Stop a running release; emits `InertiaCancel` if it was cut short.
    pub fn cancel_inertia(&mut self) -> bool {
        let interrupted = self.inertia.cancel();
        if self.released_at.take().is_some() {
            if self.phase != Phase::Swiping {
                self.state = None;
            }
            if interrupted {
                self.events.emit(GestureEvent::InertiaCancel);
            }
        }
        interrupted
    }

    /// Primary pointer id, if any pointer is pressed.
    pub fn primary_pointer(&self) -> Option<PointerId> {
        self.tracker.primary().map(|p| p.id)
    }
}

/// Angle in degrees between the travelled vector and `axis`, in `[0, 90]`.
fn axis_deviation(diff: Matrix, axis: Axis) -> f64 {
    let from_x = diff.y.abs().atan2(diff.x.abs()).to_degrees();
    match axis {
        Axis::X => from_x,
        Axis::Y => 90.0 - from_x,
    }
}

fn swipe_directions(diff: Matrix, threshold: f64) -> Vec<SwipeDirection> {
    let mut out = Vec::new();
    if diff.x < -threshold {
        out.push(SwipeDirection::ToLeft);
    } else if diff.x > threshold {
        out.push(SwipeDirection::ToRight);
    }
    if diff.y < -threshold {
        out.push(SwipeDirection::ToTop);
    } else if diff.y > threshold {
        out.push(SwipeDirection::ToBottom);
    }
    out
}
