//! Pointer gestures: tracking, swipe recognition and inertial release.

pub mod inertia;
pub mod messages;
pub mod pointer;
pub mod recognizer;

pub use inertia::{InertiaEngine, InertiaFrame, InertiaSettings, Release};
pub use messages::{
    AbortQuery, GestureEvent, GestureState, PointerId, PointerInput, PointerKind,
};
pub use pointer::{Pointer, PointerTracker, TrackerEvent};
pub use recognizer::{AbortPredicate, GestureRecognizer, GestureSettings};
