//! Compiled defaults for every carousel option.
//!
//! Tuning should happen here so every carousel picks up the change; the
//! serde models fall back to these values for any field a document omits.

/// Track interpolation and edge behaviour.
pub mod track {
    /// Per-frame interpolation factor at 60 Hz.
    pub const LERP: f64 = 0.2;
    /// Idle pull toward the nearest magnet (0 disables).
    pub const FRICTION: f64 = 0.0;
    /// Resistance past the scroll bounds; 1 means a hard wall.
    pub const EDGE_FRICTION: f64 = 0.85;
    /// Interpolation snaps to the target once closer than this.
    pub const LERP_EPSILON: f64 = 1e-6;
    /// Below this distance (px) the lerp factor is boosted to kill creeping tails.
    pub const TAIL_BOOST_DISTANCE: f64 = 3.0;
    /// Divisor for the tail boost.
    pub const TAIL_BOOST_DIVISOR: f64 = 15.0;
    /// Influence is kept within `[-INFLUENCE_LIMIT, INFLUENCE_LIMIT]`.
    pub const INFLUENCE_LIMIT: f64 = 0.2;
    /// Default gap between slides (px).
    pub const GAP: f64 = 0.0;
    /// Slides advanced per `next()` / `prev()`.
    pub const SLIDES_TO_SCROLL: usize = 1;
}

/// Swipe recognition and release.
pub mod swipe {
    /// Distance (px) along the axis before a drag becomes a swipe.
    pub const THRESHOLD: f64 = 5.0;
    /// Minimum gesture age (ms) before promotion.
    pub const MIN_TIME_MS: u64 = 0;
    /// Maximum deviation (deg) from the locked axis.
    pub const AXIS_TOLERANCE_DEG: f64 = 45.0;
    /// Travel (px) needed for a released swipe to report a direction.
    pub const DIRECTION_THRESHOLD: f64 = 50.0;
    /// Track units per swipe pixel.
    pub const SPEED: f64 = 1.0;
    /// Gestures shorter than this (ms) count as short swipes.
    pub const SHORT_SWIPES_DURATION_MS: u64 = 300;
    /// Minimum travel (px) for a short swipe to advance a slide.
    pub const SHORT_SWIPES_THRESHOLD: f64 = 30.0;
    /// Pointer count bounds for a swipe.
    pub const MIN_POINTERS: usize = 1;
    pub const MAX_POINTERS: usize = 1;
    /// Primary mouse button only.
    pub const BUTTONS: [u8; 1] = [0];
}

/// Inertia release.
pub mod inertia {
    /// Velocity samples kept for the weighted estimate.
    pub const SAMPLE_CAPACITY: usize = 4;
    /// Weight exponent per millisecond between samples.
    pub const WEIGHT_PER_MS: f64 = 0.1;
    /// Release velocity multiplier.
    pub const RATIO: f64 = 0.5;
    /// Releases slower than this (px/s after ratio) do not animate.
    pub const DISTANCE_THRESHOLD: f64 = 50.0;
    /// Distance-derived duration bounds (ms).
    pub const MIN_DURATION_MS: u64 = 500;
    pub const MAX_DURATION_MS: u64 = 2000;
}

/// Wheel adaptation and touchpad heuristics.
pub mod wheel {
    /// Track units per wheel pixel.
    pub const SPEED: f64 = 1.0;
    /// Samples inspected by the stability and gain heuristics.
    pub const HISTORY_LEN: usize = 6;
    /// Share of zero consecutive differences that marks a mouse wheel.
    pub const STABLE_RATIO: f64 = 0.8;
    /// Deltas below this (px) are assumed to come from a touchpad.
    pub const TOUCHPAD_DELTA: f64 = 50.0;
    /// Acceleration multiplier on Apple platforms.
    pub const GAIN_MULTIPLIER_APPLE: f64 = 1.5;
    /// Acceleration multiplier elsewhere.
    pub const GAIN_MULTIPLIER_OTHER: f64 = 1.2;
    /// Cooldown (ms) between discrete advances in `auto` throttle.
    pub const AUTO_COOLDOWN_MS: u64 = 500;
    /// Silence (ms) that ends a wheel gesture.
    pub const END_SILENCE_MS: u64 = 200;
    /// Deltas summed to decide the end-of-gesture direction.
    pub const END_SAMPLE_COUNT: usize = 3;
    /// Travel (px) into a slide before wheel end advances instead of sticking.
    pub const STICK_ON_END_THRESHOLD: f64 = 30.0;
    /// Pixels per line for line-mode deltas.
    pub const LINE_HEIGHT: f64 = 40.0;
    /// Page size used when the container has no extent.
    pub const PAGE_FALLBACK: f64 = 800.0;

    /// Gain multiplier for the platform this crate was compiled for.
    pub const fn platform_gain_multiplier() -> f64 {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            GAIN_MULTIPLIER_APPLE
        } else {
            GAIN_MULTIPLIER_OTHER
        }
    }
}

/// Programmatic transitions.
pub mod transition {
    /// Default transition length (ms).
    pub const DURATION_MS: u64 = 500;
}
