//! Shared data types for the glissade motion engine.
//!
//! Everything here is plain data plus the scalar helpers the engines share:
//! gesture matrices, axes and directions, easing curves, and the handful of
//! interpolation/wrapping functions that the track and gesture code agree on.
//!
//! Enable the `serde` feature to (de)serialize the enums used by
//! configuration files.

pub mod easing;
pub mod geometry;
pub mod math;
pub mod matrix;

pub use easing::Easing;
pub use geometry::{Axis, Direction, Rect, Size, SwipeDirection};
pub use matrix::{Matrix, Vec2, VelocitySample};

pub mod prelude {
    //! Convenience re-exports for engine crates.
    pub use crate::easing::Easing;
    pub use crate::geometry::{Axis, Direction, Rect, Size, SwipeDirection};
    pub use crate::math::{
        clamp, lerp, lerp_factor, loop_value, normalize_angle, scoped,
    };
    pub use crate::matrix::{Matrix, Vec2, VelocitySample};
}
