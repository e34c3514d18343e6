//! Configuration for glissade carousels.
//!
//! This crate owns the option models, their compiled defaults, validation,
//! and loading from TOML/JSON documents or the environment. The core engine
//! consumes [`CarouselConfig`] by value and never reads files itself.

pub mod constants;
pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, Result};
pub use loader::ConfigSource;
pub use models::{
    CarouselConfig, DurationSetting, FreemodeSetting, SlideSize, SlideSpec,
    SwipeConfig, WheelAxis, WheelConfig, WheelHeuristics, WheelThrottle,
    validate_slides,
};
