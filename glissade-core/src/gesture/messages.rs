use std::time::Instant;

use glissade_model::{Matrix, SwipeDirection, Vec2};

pub type PointerId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Raw pointer sample from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub id: PointerId,
    pub kind: PointerKind,
    /// Mouse button (0 = primary); ignored for touch and pen.
    pub button: u8,
    /// Viewport coordinates.
    pub position: Vec2,
    pub timestamp: Instant,
}

impl PointerInput {
    pub fn mouse(position: Vec2, timestamp: Instant) -> Self {
        Self {
            id: 1,
            kind: PointerKind::Mouse,
            button: 0,
            position,
            timestamp,
        }
    }

    pub fn touch(id: PointerId, position: Vec2, timestamp: Instant) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            button: 0,
            position,
            timestamp,
        }
    }

    pub fn at(self, position: Vec2, timestamp: Instant) -> Self {
        Self {
            position,
            timestamp,
            ..self
        }
    }
}

/// Live matrices of one swipe. Created on promotion, dropped after end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// When the swipe was promoted.
    pub timestamp: Instant,
    pub start: Matrix,
    pub prev: Matrix,
    pub current: Matrix,
    /// `current - start`.
    pub diff: Matrix,
    /// `current - prev`.
    pub step: Matrix,
    /// Running sum of absolute per-step deltas.
    pub accum: Vec2,
}

impl GestureState {
    pub fn new(matrix: Matrix, timestamp: Instant) -> Self {
        Self {
            timestamp,
            start: matrix,
            prev: matrix,
            current: matrix,
            diff: Matrix::ZERO,
            step: Matrix::ZERO,
            accum: Vec2::ZERO,
        }
    }

    /// Advance to `matrix`, updating diff/step/accum.
    pub fn advance(&mut self, matrix: Matrix) {
        self.prev = self.current;
        self.current = matrix;
        self.diff = self.current.diff(&self.start);
        self.step = self.current.diff(&self.prev);
        self.accum = self.accum + Vec2::new(self.step.x, self.step.y).abs();
    }
}

/// Arguments handed to a `will_abort` predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbortQuery {
    pub matrix: Matrix,
    pub start: Matrix,
    pub diff: Matrix,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerStart(PointerId),
    PointerEnd(PointerId),
    /// Movement passed every start gate.
    Start(GestureState),
    Move(GestureState),
    End { state: GestureState, at: Instant },
    /// Axis-lock violation or `will_abort` veto before promotion.
    Abort,
    Direction(SwipeDirection),
    InertiaStart { velocity: Matrix, duration_ms: f64 },
    Inertia(GestureState),
    InertiaEnd,
    InertiaFail,
    InertiaCancel,
}
