//! Programmatic navigation: slide steps, absolute moves and snapping.

use std::time::Duration;

use glissade_model::math::{clamp, loop_value};

use super::Carousel;
use super::geometry::GeometryProvider;
use super::messages::{CarouselEvent, TransitionKind};
use super::state::{NavigateOptions, TimerKind, Transition};
use crate::error::{CarouselError, Result};
use crate::snap::{MagnetIndex, SnapDirection};

/// Below this distance the track is considered to be on a magnet.
const SNAP_EPSILON: f64 = 1e-3;

impl<G: GeometryProvider> Carousel<G> {
    /// Move `slides_to_scroll` slides forward. Returns `false` when there is
    /// nowhere to go (non-loop end without `rewind`).
    pub fn next(&mut self, opts: NavigateOptions) -> bool {
        self.step(true, opts, TransitionKind::Navigate)
    }

    /// Move `slides_to_scroll` slides back.
    pub fn prev(&mut self, opts: NavigateOptions) -> bool {
        self.step(false, opts, TransitionKind::Navigate)
    }

    pub(super) fn advance(&mut self, forward: bool, kind: TransitionKind) -> bool {
        self.step(forward, NavigateOptions::default(), kind)
    }

    fn step(&mut self, forward: bool, opts: NavigateOptions, kind: TransitionKind) -> bool {
        if self.destroyed || self.slides.is_empty() {
            return false;
        }
        let len = self.slides.len();
        let by = self.config.slides_to_scroll.max(1);
        let from = self.pending_index.unwrap_or(self.active_index);

        let index = if self.config.looping {
            if forward {
                (from + by % len) % len
            } else {
                (from + len - by % len) % len
            }
        } else if forward {
            if self.track.is_end() || from + 1 >= len {
                if !self.config.rewind {
                    return false;
                }
                0
            } else {
                from.saturating_add(by).min(len - 1)
            }
        } else if self.track.is_start() || from == 0 {
            if !self.config.rewind {
                return false;
            }
            len - 1
        } else {
            from.saturating_sub(by)
        };

        let direction = opts.direction.unwrap_or(if forward {
            SnapDirection::Next
        } else {
            SnapDirection::Prev
        });
        self.go_to_slide(index, direction, opts, kind)
    }

    /// Animate to slide `index`.
    pub fn to_slide(&mut self, index: usize, opts: NavigateOptions) -> Result<bool> {
        if self.destroyed {
            return Err(CarouselError::Destroyed);
        }
        if index >= self.slides.len() {
            return Err(CarouselError::SlideOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        let direction = opts.direction.unwrap_or_default();
        Ok(self.go_to_slide(index, direction, opts, TransitionKind::Navigate))
    }

    fn go_to_slide(
        &mut self,
        index: usize,
        direction: SnapDirection,
        opts: NavigateOptions,
        kind: TransitionKind,
    ) -> bool {
        let Some(slide) = self.slides.get(index) else {
            return false;
        };
        let Some(coord) = MagnetIndex::directional(
            slide,
            direction,
            self.track.current(),
            self.track.is_looping(),
            self.track.max(),
        ) else {
            return false;
        };
        let started = self.start_transition(coord, opts, kind);
        self.pending_index = Some(index);
        started
    }

    /// Animate the track to an absolute coordinate (clamped to the bounds
    /// unless looping).
    pub fn to_coord(&mut self, value: f64, opts: NavigateOptions) -> Result<bool> {
        if self.destroyed {
            return Err(CarouselError::Destroyed);
        }
        if !value.is_finite() {
            return Ok(false);
        }
        let started = self.start_transition(value, opts, TransitionKind::Navigate);
        self.pending_index = None;
        Ok(started)
    }

    /// Snap to the nearest magnet. The active slide wins ties.
    ///
    /// Returns `false` when already resting on it.
    pub fn stick(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.timers.cancel(TimerKind::Stick);

        let target = self.track.target();
        let coord = if self.track.is_looping() {
            loop_value(target, self.track.min(), self.track.max())
        } else {
            target
        };
        let Some(mut hit) = self.magnets.nearest(coord) else {
            return false;
        };
        if let Some(active) = self.magnets.nearest_of_slide(self.active_index, coord)
            && active.distance <= hit.distance
        {
            hit = active;
        }

        let goal = target + hit.diff;
        if self.transition.is_none() && (goal - self.track.current()).abs() < SNAP_EPSILON {
            self.track.set(goal);
            return false;
        }
        self.start_transition(goal, NavigateOptions::default(), TransitionKind::Stick)
    }

    /// Stop a running transition where it is. Returns `true` if one was
    /// interrupted.
    pub fn cancel_transition(&mut self) -> bool {
        if self.transition.take().is_none() {
            return false;
        }
        let interrupted = self.timeline.cancel();
        self.pending_index = None;
        let current = self.track.current();
        self.track.set_target(current);
        log::debug!("transition cancelled at {current:.1}");
        self.events.emit(CarouselEvent::TransitionCancel);
        self.refresh_motion();
        interrupted
    }

    fn start_transition(&mut self, coord: f64, opts: NavigateOptions, kind: TransitionKind) -> bool {
        let to = if self.track.is_looping() {
            coord
        } else {
            clamp(coord, self.track.min(), self.track.max())
        };

        self.cancel_transition();
        self.timers.cancel(TimerKind::Stick);
        self.cancel_inertia_for_transition();

        let from = self.track.current();
        let ms = opts
            .duration
            .unwrap_or(self.config.duration)
            .resolve_ms(to - from);
        let duration = if ms.is_finite() && ms > 0.0 {
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_else(|err| {
                log::warn!("transition duration {ms}ms out of range, jumping: {err}");
                Duration::ZERO
            })
        } else {
            Duration::ZERO
        };

        self.timeline
            .start(duration, opts.easing.unwrap_or(self.config.easing));
        self.track.set_target(to);
        self.transition = Some(Transition { from, to, kind });
        log::debug!("{kind:?} transition {from:.1} -> {to:.1} over {ms:.0}ms");
        self.events
            .emit(CarouselEvent::TransitionStart { target: to, kind });
        self.refresh_motion();
        true
    }

    pub(super) fn finish_transition(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        self.track.set(transition.to);
        if let Some(index) = self.pending_index.take() {
            self.set_active(index);
        }
        self.events.emit(CarouselEvent::TransitionEnd);
        self.refresh_motion();
    }
}
