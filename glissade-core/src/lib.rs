//! Motion engine for carousels and sliders.
//!
//! The engine is headless: hosts feed it pointer and wheel input plus a
//! frame clock, and read back per-slide coordinates and progress. Nothing
//! here touches a DOM, a windowing system or a real timer.
//!
//! ```no_run
//! use std::time::Instant;
//!
//! use glissade_config::{CarouselConfig, SlideSpec};
//! use glissade_core::carousel::{Carousel, NavigateOptions, StaticGeometry};
//! use glissade_model::Size;
//!
//! let geometry = StaticGeometry::uniform(Size::new(900.0, 400.0), Size::new(300.0, 400.0), 5);
//! let mut carousel = Carousel::new(
//!     CarouselConfig::default(),
//!     vec![SlideSpec::Measured; 5],
//!     geometry,
//! )?;
//! carousel.next(NavigateOptions::default());
//! let frames = carousel.tick(Instant::now());
//! # let _ = frames;
//! # Ok::<(), glissade_core::CarouselError>(())
//! ```

pub mod carousel;
pub mod error;
pub mod events;
pub mod gesture;
pub mod scheduler;
pub mod snap;
pub mod timeline;
pub mod track;
pub mod wheel;

pub use carousel::{
    Carousel, CarouselEvent, GeometryProvider, MotionState, NavigateOptions, StaticGeometry,
    TransitionKind,
};
pub use error::{CarouselError, Result};
pub use events::EventQueue;
pub use scheduler::{Deadline, TimerQueue};
pub use timeline::{Timeline, TimelineFrame};
pub use track::Track;
