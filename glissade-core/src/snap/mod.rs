//! Slides and their magnetic resting points.

pub mod magnet;
pub mod slide;

pub use magnet::{Magnet, MagnetHit, MagnetIndex, MagnetLayout, SnapDirection};
pub use slide::{Slide, SlideFrame};
