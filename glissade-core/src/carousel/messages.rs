use glissade_model::SwipeDirection;

use crate::gesture::GestureState;

/// What started a programmatic transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// `next`/`prev`/`to_slide`/`to_coord`.
    Navigate,
    /// Snap to the nearest magnet.
    Stick,
    /// Discrete wheel advance.
    Wheel,
}

/// Notifications drained with [`Carousel::drain_events`].
///
/// [`Carousel::drain_events`]: super::Carousel::drain_events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    ActiveSlide { index: usize, previous: usize },
    /// A frame was rendered.
    Update,
    Resize,

    SwipeStart(GestureState),
    Swipe(GestureState),
    SwipeEnd(GestureState),
    SwipeAbort,
    SwipeDirection(SwipeDirection),

    InertiaStart,
    Inertia,
    InertiaEnd,
    InertiaFail,
    InertiaCancel,

    WheelStart,
    Wheel { delta: f64 },
    WheelEnd,

    TransitionStart { target: f64, kind: TransitionKind },
    TransitionEnd,
    TransitionCancel,

    Destroy,
}
