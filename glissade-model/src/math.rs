//! Scalar helpers shared by the track and gesture engines.

/// Nominal frame duration the `lerp` option is tuned against (60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Frame durations outside this range are clamped before deriving a lerp
/// factor so a stalled tab does not teleport the track.
pub const FRAME_MS_RANGE: (f64, f64) = (1.0, 100.0);

/// Clamp that tolerates `min > max` (returns `min`), unlike `f64::clamp`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        return min;
    }
    value.max(min).min(max)
}

/// Linear interpolation that snaps to `b` once within `epsilon`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64, epsilon: f64) -> f64 {
    let value = a + (b - a) * t;
    if (value - b).abs() < epsilon {
        b
    } else {
        value
    }
}

/// Map `value` linearly so that `min -> 0` and `max -> 1` (unclamped).
///
/// A degenerate range yields `0.0`.
#[inline]
pub fn scoped(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    (value - min) / span
}

/// Wrap `value` into `[min, max)`.
///
/// An empty or inverted range returns `min`.
pub fn loop_value(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() || !value.is_finite() {
        return min;
    }
    let wrapped = (value - min).rem_euclid(span) + min;
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if wrapped >= max { min } else { wrapped }
}

/// Normalize an angle in degrees into `(-180, 180]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Frame-rate independent interpolation factor.
///
/// `ease` is the per-frame factor at 60 Hz; longer frames compound it so
/// motion speed does not depend on the display refresh rate.
pub fn lerp_factor(ease: f64, frame_ms: f64) -> f64 {
    let ease = clamp(ease, 0.0, 1.0);
    if ease >= 1.0 {
        return 1.0;
    }
    let frame_ms = if frame_ms.is_finite() {
        clamp(frame_ms, FRAME_MS_RANGE.0, FRAME_MS_RANGE.1)
    } else {
        REFERENCE_FRAME_MS
    };
    let factor = 1.0 - (1.0 - ease).powf(frame_ms / REFERENCE_FRAME_MS);
    clamp(factor, 0.0, 1.0)
}
