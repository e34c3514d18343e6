pub mod carousel;
pub mod settings;
pub mod slides;
pub mod swipe;
pub mod wheel;

pub use carousel::CarouselConfig;
pub use settings::{DurationSetting, FreemodeSetting, SlideSize, WheelThrottle};
pub use slides::{SlideSpec, validate_slides};
pub use swipe::SwipeConfig;
pub use wheel::{WheelAxis, WheelConfig, WheelHeuristics};
