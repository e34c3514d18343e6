//! The carousel orchestrator.
//!
//! Input handlers (pointer, wheel, navigation) only move the track target or
//! start a transition. [`Carousel::tick`] is the single writer of `current`,
//! slide coordinates and the active index.

use std::time::{Duration, Instant};

use glissade_config::{CarouselConfig, FreemodeSetting, SlideSpec, validate_slides};
use glissade_model::math::{REFERENCE_FRAME_MS, clamp, lerp_factor};
use glissade_model::{Axis, Matrix};

use super::geometry::GeometryProvider;
use super::layout::{self, LayoutMetrics};
use super::messages::{CarouselEvent, TransitionKind};
use super::state::{MotionState, TimerKind, Transition};
use crate::error::Result;
use crate::events::EventQueue;
use crate::gesture::{
    AbortQuery, GestureEvent, GestureRecognizer, GestureSettings, GestureState,
    InertiaSettings, PointerInput,
};
use crate::scheduler::{Deadline, TimerQueue};
use crate::snap::{MagnetIndex, MagnetLayout, Slide, SlideFrame};
use crate::timeline::Timeline;
use crate::track::Track;
use crate::wheel::{
    WheelAction, WheelAdapter, WheelContext, WheelEndAction, WheelEndContext, WheelInput,
};

#[derive(Debug)]
pub struct Carousel<G: GeometryProvider> {
    pub(super) config: CarouselConfig,
    geometry: G,
    pub(super) axis: Axis,
    pub(super) slides: Vec<Slide>,
    pub(super) magnets: MagnetIndex,
    pub(super) metrics: LayoutMetrics,
    pub(super) track: Track,
    gesture: GestureRecognizer,
    wheel: WheelAdapter,
    pub(super) timeline: Timeline,
    pub(super) transition: Option<Transition>,
    pub(super) timers: TimerQueue<TimerKind>,
    pub(super) events: EventQueue<CarouselEvent>,
    motion: MotionState,
    pub(super) active_index: usize,
    pub(super) pending_index: Option<usize>,
    last_frame: Option<Instant>,
    pub(super) destroyed: bool,
}

impl<G: GeometryProvider> Carousel<G> {
    /// Validate the options and slide declarations, then run the first
    /// reflow.
    pub fn new(config: CarouselConfig, slides: Vec<SlideSpec>, geometry: G) -> Result<Self> {
        config.validate()?;
        validate_slides(&slides)?;

        let axis = config.direction.axis();
        let gesture_settings =
            GestureSettings::from_swipe(&config.swipe).with_axis(config.swipe.axis.or(Some(axis)));
        let mut inertia = InertiaSettings::from_swipe(&config.swipe);
        inertia.enabled = config.swipe.inertia && config.freemode.is_free();

        let mut carousel = Self {
            axis,
            slides: slides
                .into_iter()
                .enumerate()
                .map(|(index, spec)| Slide::new(index, spec))
                .collect(),
            magnets: MagnetIndex::default(),
            metrics: LayoutMetrics::default(),
            track: Track::new(config.looping, config.edge_friction),
            gesture: GestureRecognizer::new(gesture_settings, inertia),
            wheel: WheelAdapter::new(config.wheel.clone()),
            timeline: Timeline::new(),
            transition: None,
            timers: TimerQueue::new(),
            events: EventQueue::new(),
            motion: MotionState::Idle,
            active_index: 0,
            pending_index: None,
            last_frame: None,
            destroyed: false,
            geometry,
            config,
        };
        log::info!(
            "carousel created with {} slides (loop: {}, centered: {}, freemode: {:?})",
            carousel.slides.len(),
            carousel.config.looping,
            carousel.config.centered,
            carousel.config.freemode
        );
        carousel.resize();
        Ok(carousel)
    }

    /// Veto swipe starts with a predicate over `(matrix, start, diff)`.
    pub fn with_will_abort(mut self, f: impl Fn(&AbortQuery) -> bool + 'static) -> Self {
        self.gesture.set_will_abort(Some(Box::new(f)));
        self
    }

    /// Transform the inertia release velocity.
    pub fn with_velocity_modifier(mut self, f: impl Fn(Matrix) -> Matrix + 'static) -> Self {
        self.gesture
            .inertia_mut()
            .set_velocity_modifier(Some(Box::new(f)));
        self
    }

    /// Replace the configured inertia duration with `f(distance) -> ms`.
    pub fn with_inertia_duration(mut self, f: impl Fn(f64) -> f64 + 'static) -> Self {
        self.gesture.inertia_mut().set_duration_fn(Some(Box::new(f)));
        self
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable geometry access; call [`resize`](Self::resize) afterwards.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn magnets(&self) -> &MagnetIndex {
        &self.magnets
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Scroll progress across the whole range, `0..=1`.
    pub fn progress(&self) -> f64 {
        self.track.progress()
    }

    pub fn is_start(&self) -> bool {
        self.track.is_start()
    }

    pub fn is_end(&self) -> bool {
        self.track.is_end()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_swiping(&self) -> bool {
        self.gesture.is_swiping()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        self.events.drain()
    }

    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        if self.destroyed {
            return;
        }
        self.gesture.set_enabled(enabled);
        self.process_gesture_events();
        self.refresh_motion();
    }

    pub fn set_wheel_enabled(&mut self, enabled: bool) {
        if self.destroyed {
            return;
        }
        self.wheel.set_enabled(enabled);
        if !enabled {
            self.timers.cancel(TimerKind::WheelEnd);
        }
    }

    /// Re-measure slides and rebuild bounds and magnets.
    ///
    /// Runs to completion before the next frame reads the slide list.
    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        let container_rect = self.geometry.container();
        let container = container_rect.size().along(self.axis);
        if container <= 0.0 {
            log::warn!("container has no extent along {:?}; nothing can scroll", self.axis);
        }

        for slide in &mut self.slides {
            let measured = self
                .geometry
                .slide_size(slide.index)
                .map(|size| size.along(self.axis));
            slide.size =
                layout::resolve_size(slide.spec, self.config.slide_size, measured, container);
        }

        self.metrics = layout::reflow(
            &mut self.slides,
            container,
            self.config.gap,
            self.config.centered,
            self.config.looping,
        );
        self.track
            .set_bounds(self.metrics.min, self.metrics.max, container);
        self.magnets = MagnetIndex::build(
            &mut self.slides,
            &MagnetLayout {
                container,
                centered: self.config.centered,
                looping: self.config.looping,
                min: self.metrics.min,
                max: self.metrics.max,
            },
        );
        self.gesture
            .set_bounds(self.geometry.viewport(), container_rect);

        log::info!(
            "carousel resized: container {container:.1}, range [{:.1}, {:.1}], {} magnets",
            self.metrics.min,
            self.metrics.max,
            self.magnets.len()
        );
        self.events.emit(CarouselEvent::Resize);

        if self.config.stick_on_resize {
            self.timers.schedule(TimerKind::Stick, Deadline::NextPoll);
        }
        self.render();
    }

    // ---- frame -----------------------------------------------------------

    /// Advance one frame: fire due timers, drive inertia or the running
    /// transition, interpolate the track and render.
    pub fn tick(&mut self, now: Instant) -> Vec<SlideFrame> {
        if self.destroyed {
            return Vec::new();
        }
        let frame_ms = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f64() * 1000.0)
            .unwrap_or(REFERENCE_FRAME_MS);
        self.last_frame = Some(now);

        for timer in self.timers.take_due(now) {
            log::debug!("timer fired: {timer:?}");
            match timer {
                TimerKind::WheelEnd => self.on_wheel_end(),
                TimerKind::Stick => {
                    self.stick();
                }
            }
        }

        self.gesture.tick(now);
        self.process_gesture_events();

        match self.timeline.tick(now) {
            Some(frame) => {
                if let Some(transition) = self.transition {
                    self.track.set(transition.at(frame.eased));
                    if frame.finished {
                        self.finish_transition();
                    }
                }
            }
            None => {
                self.apply_friction(frame_ms);
                self.track.interpolate(self.config.lerp, frame_ms);
            }
        }

        let frames = self.render();
        self.events.emit(CarouselEvent::Update);
        self.refresh_motion();
        frames
    }

    /// Recompute slide coordinates and progress from the track, and update
    /// the active slide. Idempotent for an unchanged track.
    pub fn render(&mut self) -> Vec<SlideFrame> {
        let base = self.track.looped_current();
        for slide in &mut self.slides {
            slide.coord = layout::slide_coord(slide, base, &self.metrics);
            slide.progress = layout::slide_progress(slide.coord, slide.size, &self.metrics);
        }
        self.update_active(base);
        self.frames()
    }

    /// Per-slide output of the last render.
    pub fn frames(&self) -> Vec<SlideFrame> {
        self.slides
            .iter()
            .map(|slide| slide.frame(self.metrics.container))
            .collect()
    }

    fn update_active(&mut self, coord: f64) {
        let Some(hit) = self.magnets.nearest(coord) else {
            return;
        };
        if hit.slide == self.active_index {
            return;
        }
        if self.pending_index.is_some_and(|pending| pending != hit.slide) {
            return;
        }
        let strictly_nearer = self
            .magnets
            .nearest_of_slide(self.active_index, coord)
            .is_none_or(|active| hit.distance < active.distance);
        if strictly_nearer {
            self.set_active(hit.slide);
        }
    }

    pub(super) fn set_active(&mut self, index: usize) {
        if index == self.active_index {
            return;
        }
        let previous = self.active_index;
        self.active_index = index;
        log::debug!("active slide {previous} -> {index}");
        self.events
            .emit(CarouselEvent::ActiveSlide { index, previous });
    }

    fn apply_friction(&mut self, frame_ms: f64) {
        if self.config.freemode != FreemodeSetting::Off
            || self.config.friction <= 0.0
            || self.motion != MotionState::Idle
            || self.wheel.is_active()
            || self.is_edge_scrolling()
        {
            return;
        }
        let Some(hit) = self.magnets.nearest(self.track.looped_current()) else {
            return;
        };
        let factor = self.config.friction * lerp_factor(self.config.lerp, frame_ms);
        let goal = self.track.current() + hit.diff;
        let target = self.track.target();
        self.track.set_target(target + (goal - target) * factor);
    }

    /// The active slide is larger than the container and the track is
    /// somewhere between its start and end magnets.
    pub(super) fn is_edge_scrolling(&self) -> bool {
        self.active_scroll_range().is_some_and(|(lo, hi)| {
            let at = self.track.looped_current();
            at > lo && at < hi
        })
    }

    /// Magnet range of the active slide, in looped coordinates, when it is
    /// larger than the container.
    pub(super) fn active_scroll_range(&self) -> Option<(f64, f64)> {
        let slide = self.slides.get(self.active_index)?;
        if !slide.is_scrollable(self.metrics.container) {
            return None;
        }
        let lo = slide.magnets.iter().copied().reduce(f64::min)?;
        let hi = slide.magnets.iter().copied().reduce(f64::max)?;
        Some((lo, hi))
    }

    pub(super) fn refresh_motion(&mut self) {
        self.motion = if self.gesture.is_swiping() {
            MotionState::Swiping
        } else if self.gesture.is_tracking() {
            MotionState::Tracking
        } else if self.gesture.is_inertia_active() {
            MotionState::Releasing
        } else if let Some(transition) = &self.transition {
            transition.motion_state()
        } else {
            MotionState::Idle
        };
    }

    // ---- pointer input ---------------------------------------------------

    pub fn pointer_down(&mut self, input: &PointerInput) {
        if self.destroyed {
            return;
        }
        self.gesture.pointer_down(input);
        self.process_gesture_events();
        self.refresh_motion();
    }

    pub fn pointer_move(&mut self, input: &PointerInput) {
        if self.destroyed {
            return;
        }
        self.gesture.pointer_move(input);
        self.process_gesture_events();
        self.refresh_motion();
    }

    pub fn pointer_up(&mut self, input: &PointerInput) {
        if self.destroyed {
            return;
        }
        self.gesture.pointer_up(input);
        self.process_gesture_events();
        self.refresh_motion();
    }

    pub fn pointer_cancel(&mut self, at: Instant) {
        if self.destroyed {
            return;
        }
        self.gesture.pointer_cancel(at);
        self.process_gesture_events();
        self.refresh_motion();
    }

    fn process_gesture_events(&mut self) {
        loop {
            let events = self.gesture.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.on_gesture_event(event);
            }
        }
    }

    fn swipe_delta(&self, state: &GestureState) -> f64 {
        -state.step.along(self.axis) * self.config.swipe.speed
    }

    fn on_gesture_event(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::PointerStart(_) | GestureEvent::PointerEnd(_) => {}
            GestureEvent::Start(state) => {
                self.cancel_transition();
                self.timers.cancel(TimerKind::Stick);
                self.events.emit(CarouselEvent::SwipeStart(state));
            }
            GestureEvent::Move(state) => {
                self.track.iterate_target(self.swipe_delta(&state));
                self.events.emit(CarouselEvent::Swipe(state));
            }
            GestureEvent::End { state, at } => {
                self.events.emit(CarouselEvent::SwipeEnd(state));
                self.on_swipe_end(&state, at);
            }
            GestureEvent::Abort => self.events.emit(CarouselEvent::SwipeAbort),
            GestureEvent::Direction(direction) => {
                self.events.emit(CarouselEvent::SwipeDirection(direction));
            }
            GestureEvent::InertiaStart { .. } => {
                self.events.emit(CarouselEvent::InertiaStart);
            }
            GestureEvent::Inertia(state) => {
                let delta = self.swipe_delta(&state);
                let target = self.track.iterate_target(delta);
                // Only stop on an outward push; a flick back out of the
                // overscroll keeps running.
                let outward = (delta < 0.0 && target < self.track.min())
                    || (delta > 0.0 && target > self.track.max());
                if !self.track.is_looping() && outward {
                    let clamped = self.track.clamp_target();
                    if clamped != target {
                        log::debug!("inertia reached the edge at {clamped:.1}");
                        self.gesture.cancel_inertia();
                        if self.config.freemode == FreemodeSetting::Sticky {
                            self.timers.schedule(TimerKind::Stick, Deadline::NextPoll);
                        }
                    }
                }
                self.events.emit(CarouselEvent::Inertia);
            }
            GestureEvent::InertiaEnd => {
                self.track.clamp_target();
                self.events.emit(CarouselEvent::InertiaEnd);
                if self.config.freemode == FreemodeSetting::Sticky {
                    self.timers.schedule(TimerKind::Stick, Deadline::NextPoll);
                }
            }
            GestureEvent::InertiaFail => {
                self.events.emit(CarouselEvent::InertiaFail);
                if self.config.freemode == FreemodeSetting::Sticky && self.transition.is_none() {
                    self.timers.schedule(TimerKind::Stick, Deadline::NextPoll);
                }
            }
            GestureEvent::InertiaCancel => {
                self.events.emit(CarouselEvent::InertiaCancel);
            }
        }
    }

    fn on_swipe_end(&mut self, state: &GestureState, at: Instant) {
        let swipe = &self.config.swipe;
        let short_swipes = swipe.short_swipes;
        let duration = at.saturating_duration_since(state.timestamp);
        let quick = duration < Duration::from_millis(swipe.short_swipes_duration_ms);
        let travel = state.diff.along(self.axis);
        let far = travel.abs() >= swipe.short_swipes_threshold;

        match self.config.freemode {
            FreemodeSetting::Off => {
                let advanced = if short_swipes && quick && far {
                    log::debug!("short swipe of {travel:.1}px in {duration:?}");
                    self.advance(travel < 0.0, TransitionKind::Navigate)
                } else {
                    false
                };
                if !advanced {
                    self.stick();
                }
            }
            FreemodeSetting::Sticky => {
                if quick && !far {
                    self.gesture.cancel_inertia();
                    self.stick();
                } else if !self.gesture.inertia().is_enabled() {
                    self.stick();
                }
            }
            FreemodeSetting::Free => {
                if !self.gesture.is_inertia_active() {
                    self.track.clamp_target();
                }
            }
        }
    }

    // ---- wheel input -----------------------------------------------------

    pub fn wheel(&mut self, input: &WheelInput) {
        if self.destroyed {
            return;
        }
        let scroll_range = self.active_scroll_range().map(|(lo, hi)| {
            let lap = if self.track.is_looping() {
                self.track.loop_count() as f64 * self.track.max()
            } else {
                0.0
            };
            (lo + lap, hi + lap)
        });
        let ctx = WheelContext {
            axis: self.axis,
            container: self.metrics.container,
            target: self.track.target(),
            transitioning: self.transition.is_some(),
            scroll_range,
        };
        let outcome = self.wheel.handle(input, &ctx);
        if outcome.started {
            self.events.emit(CarouselEvent::WheelStart);
        }

        match outcome.action {
            WheelAction::Ignore => {}
            WheelAction::Follow { delta } => {
                self.cancel_transition();
                self.timers.cancel(TimerKind::Stick);
                self.gesture.cancel_inertia();
                self.process_gesture_events();
                self.track.iterate_target(delta);
                self.track.clamp_target();
            }
            WheelAction::Advance { forward } => {
                self.advance(forward, TransitionKind::Wheel);
            }
            WheelAction::ScrollWithin { delta, lo, hi } => {
                self.cancel_transition();
                let target = clamp(self.track.target() + delta, lo, hi);
                self.track.set_target(target);
            }
        }
        if outcome.delta != 0.0 {
            self.events.emit(CarouselEvent::Wheel {
                delta: outcome.delta,
            });
        }
        if let Some(deadline) = self.wheel.end_deadline()
            && self.wheel.is_active()
        {
            self.timers.schedule_at(TimerKind::WheelEnd, deadline);
        }
        self.refresh_motion();
    }

    fn on_wheel_end(&mut self) {
        let (active_progress, active_size) = self
            .slides
            .get(self.active_index)
            .map_or((0.0, 0.0), |s| (s.progress, s.size));
        let action = self.wheel.end(&WheelEndContext {
            freemode: self.config.freemode,
            active_progress,
            active_size,
        });
        self.events.emit(CarouselEvent::WheelEnd);
        match action {
            WheelEndAction::None => {}
            WheelEndAction::Stick => {
                self.stick();
            }
            WheelEndAction::Advance { forward } => {
                if !self.advance(forward, TransitionKind::Navigate) {
                    self.stick();
                }
            }
        }
    }

    // ---- teardown --------------------------------------------------------

    /// Cancel every timer, release and transition, then ignore all further
    /// calls. Emits `Destroy`.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.cancel_all();
        self.gesture.set_enabled(false);
        self.gesture.cancel_inertia();
        self.gesture.drain_events();
        self.wheel.set_enabled(false);
        self.timeline.cancel();
        self.transition = None;
        self.pending_index = None;
        self.motion = MotionState::Idle;
        self.destroyed = true;
        log::info!("carousel destroyed");
        self.events.emit(CarouselEvent::Destroy);
    }

    /// A transition owns the track; any running release stops here.
    pub(super) fn cancel_inertia_for_transition(&mut self) {
        self.gesture.cancel_inertia();
        self.process_gesture_events();
    }
}
