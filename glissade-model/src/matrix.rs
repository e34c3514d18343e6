//! Gesture matrices: a 2D position plus a polar angle.

use std::ops::{Add, Sub};
use std::time::Instant;

use crate::math::normalize_angle;

/// Plain 2D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    pub fn along(self, axis: crate::Axis) -> f64 {
        match axis {
            crate::Axis::X => self.x,
            crate::Axis::Y => self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Position plus angle (degrees) around the gesture's reference center.
///
/// Differences between matrices always carry a normalized angle in
/// `(-180, 180]`, so a pointer crossing the ±180° seam reads as a small
/// rotation instead of a full turn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Matrix {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl Matrix {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        angle: 0.0,
    };

    pub const fn new(x: f64, y: f64, angle: f64) -> Self {
        Self { x, y, angle }
    }

    /// Build a matrix from a point, deriving the angle about `center`.
    pub fn from_point(point: Vec2, center: Vec2) -> Self {
        let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
        Self::new(point.x, point.y, angle)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// `self - other` with the angle wrapped into `(-180, 180]`.
    pub fn diff(&self, other: &Matrix) -> Matrix {
        Matrix::new(
            self.x - other.x,
            self.y - other.y,
            normalize_angle(self.angle - other.angle),
        )
    }

    /// Additive offset, used when inertia pushes a released gesture further.
    pub fn offset(&self, add: &Matrix) -> Matrix {
        Matrix::new(self.x + add.x, self.y + add.y, self.angle + add.angle)
    }

    pub fn scale(&self, k: f64) -> Matrix {
        Matrix::new(self.x * k, self.y * k, self.angle * k)
    }

    /// Component along the given axis.
    pub fn along(&self, axis: crate::Axis) -> f64 {
        match axis {
            crate::Axis::X => self.x,
            crate::Axis::Y => self.y,
        }
    }
}

/// A gesture matrix observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    pub matrix: Matrix,
    pub timestamp: Instant,
}

impl VelocitySample {
    pub const fn new(matrix: Matrix, timestamp: Instant) -> Self {
        Self { matrix, timestamp }
    }
}
