//! Wheel and touchpad scrolling.

pub mod adapter;
pub mod heuristics;
pub mod messages;

pub use adapter::{WheelAdapter, WheelContext, WheelEndContext};
pub use heuristics::WheelHistory;
pub use messages::{DeltaMode, WheelAction, WheelEndAction, WheelInput, WheelOutcome};
