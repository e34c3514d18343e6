//! The carousel orchestrator and its collaborators.

mod controller;
pub mod geometry;
pub mod layout;
pub mod messages;
mod navigation;
pub mod state;

pub use controller::Carousel;
pub use geometry::{GeometryProvider, StaticGeometry};
pub use layout::LayoutMetrics;
pub use messages::{CarouselEvent, TransitionKind};
pub use state::{MotionState, NavigateOptions};
