//! Reflow and per-frame placement math.

use glissade_config::{SlideSize, SlideSpec};
use glissade_model::math::{clamp, loop_value, scoped};

use crate::snap::Slide;

/// Layout facts shared by reflow and render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutMetrics {
    pub container: f64,
    pub gap: f64,
    pub centered: bool,
    pub looping: bool,
    pub min: f64,
    pub max: f64,
    pub first_size: f64,
}

impl LayoutMetrics {
    /// Shift applied to every slide so the resting slide sits in the middle.
    pub fn center_offset(&self) -> f64 {
        if self.centered {
            self.container / 2.0 - self.first_size / 2.0
        } else {
            0.0
        }
    }
}

/// Extent of one slide along the carousel axis.
pub fn resolve_size(
    spec: SlideSpec,
    setting: SlideSize,
    measured: Option<f64>,
    container: f64,
) -> f64 {
    let size = match (spec, setting) {
        (SlideSpec::Virtual { size: Some(px) }, _) => px,
        (SlideSpec::Virtual { size: None }, _) => 0.0,
        (SlideSpec::Measured, SlideSize::Fixed(px)) => px,
        (SlideSpec::Measured, SlideSize::Stretch) => container,
        (SlideSpec::Measured, SlideSize::Auto) => measured.unwrap_or(0.0),
    };
    if size.is_finite() { size.max(0.0) } else { 0.0 }
}

/// Assign static coordinates from sizes and compute the scroll bounds.
pub fn reflow(
    slides: &mut [Slide],
    container: f64,
    gap: f64,
    centered: bool,
    looping: bool,
) -> LayoutMetrics {
    let mut coord = 0.0;
    for slide in slides.iter_mut() {
        slide.static_coord = coord;
        coord += slide.size + gap;
    }

    let first_size = slides.first().map_or(0.0, |s| s.size);
    let sizes: f64 = slides.iter().map(|s| s.size).sum();
    let count = slides.len() as f64;

    let max = match slides.last() {
        _ if container <= 0.0 || sizes <= 0.0 => 0.0,
        None => 0.0,
        Some(_) if looping => sizes + count * gap,
        Some(last) if centered => {
            (last.static_coord + last.size / 2.0 - first_size / 2.0).max(0.0)
        }
        Some(_) => (sizes + (count - 1.0) * gap - container).max(0.0),
    };

    LayoutMetrics {
        container,
        gap,
        centered,
        looping,
        min: 0.0,
        max,
        first_size,
    }
}

/// Coordinate of `slide` relative to the container start for a track at
/// `base` (already wrapped when looping).
pub fn slide_coord(slide: &Slide, base: f64, metrics: &LayoutMetrics) -> f64 {
    let coord = slide.static_coord - base + metrics.center_offset();
    if !metrics.looping || metrics.max <= 0.0 {
        return coord;
    }
    // keep each slide within half a lap of the container center
    let lo = metrics.container / 2.0 - metrics.max / 2.0 - slide.size / 2.0;
    loop_value(coord, lo, lo + metrics.max)
}

/// `0` at rest, `1` one slide-length past it toward the start, `-1` one
/// slide-length toward the end.
pub fn slide_progress(coord: f64, size: f64, metrics: &LayoutMetrics) -> f64 {
    if size <= 0.0 {
        return 0.0;
    }
    let rest = if metrics.centered {
        metrics.container / 2.0 - size / 2.0
    } else {
        0.0
    };
    clamp(scoped(coord, rest, rest - size), -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(sizes: &[f64]) -> Vec<Slide> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let mut s = Slide::new(i, SlideSpec::Measured);
                s.size = size;
                s
            })
            .collect()
    }

    #[test]
    fn start_aligned_bounds() {
        let mut s = slides(&[300.0; 5]);
        let m = reflow(&mut s, 900.0, 0.0, false, false);
        assert_eq!(m.max, 600.0);
        assert_eq!(s[4].static_coord, 1200.0);
    }

    #[test]
    fn gaps_extend_bounds() {
        let mut s = slides(&[300.0; 5]);
        let m = reflow(&mut s, 900.0, 10.0, false, false);
        assert_eq!(m.max, 640.0);
        let m = reflow(&mut s, 900.0, 10.0, false, true);
        assert_eq!(m.max, 1550.0);
    }

    #[test]
    fn centered_bounds_reach_last_center() {
        let mut s = slides(&[300.0, 300.0, 500.0]);
        let m = reflow(&mut s, 900.0, 0.0, true, false);
        assert_eq!(m.max, 600.0 + 250.0 - 150.0);
        assert_eq!(m.center_offset(), 300.0);
    }

    #[test]
    fn content_smaller_than_container_does_not_scroll() {
        let mut s = slides(&[100.0, 100.0]);
        assert_eq!(reflow(&mut s, 900.0, 0.0, false, false).max, 0.0);
    }

    #[test]
    fn zero_container_has_no_range() {
        let mut s = slides(&[300.0; 3]);
        assert_eq!(reflow(&mut s, 0.0, 0.0, false, true).max, 0.0);
    }

    #[test]
    fn looped_coords_wrap_around_the_container() {
        let mut s = slides(&[300.0; 5]);
        let m = reflow(&mut s, 900.0, 0.0, false, true);
        // track at 1400: the first slide has come round again at +100
        assert_eq!(slide_coord(&s[0], 1400.0, &m), 100.0);
        assert_eq!(slide_coord(&s[4], 1400.0, &m), -200.0);
    }

    #[test]
    fn progress_is_zero_at_rest() {
        let m = LayoutMetrics {
            container: 900.0,
            ..LayoutMetrics::default()
        };
        assert_eq!(slide_progress(0.0, 300.0, &m), 0.0);
        assert_eq!(slide_progress(-150.0, 300.0, &m), 0.5);
        assert_eq!(slide_progress(900.0, 300.0, &m), -1.0);
    }

    #[test]
    fn resolve_size_prefers_declared_extent() {
        let virt = SlideSpec::virtual_sized(120.0);
        assert_eq!(resolve_size(virt, SlideSize::Stretch, Some(50.0), 900.0), 120.0);
        assert_eq!(
            resolve_size(SlideSpec::Measured, SlideSize::Stretch, Some(50.0), 900.0),
            900.0
        );
        assert_eq!(
            resolve_size(SlideSpec::Measured, SlideSize::Auto, None, 900.0),
            0.0
        );
    }
}
