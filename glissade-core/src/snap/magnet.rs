//! Resting points and the lookups that pick between them.

use glissade_model::math::clamp;

use super::slide::Slide;

/// Which candidate to prefer when a slide has several magnets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapDirection {
    #[default]
    Nearest,
    Next,
    Prev,
}

/// Layout facts magnet generation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetLayout {
    pub container: f64,
    pub centered: bool,
    pub looping: bool,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnet {
    pub slide: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetHit {
    pub slide: usize,
    pub magnet: f64,
    /// `magnet - coord`.
    pub diff: f64,
    pub distance: f64,
}

/// Flattened `(slide, magnet)` pairs in slide order, then declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagnetIndex {
    magnets: Vec<Magnet>,
}

impl MagnetIndex {
    /// Fill every slide's `magnets` and index them.
    pub fn build(slides: &mut [Slide], layout: &MagnetLayout) -> Self {
        let first_size = slides.first().map_or(0.0, |s| s.size);
        let container = layout.container;

        for slide in slides.iter_mut() {
            let mut magnets = Vec::with_capacity(3);
            if layout.centered {
                let base = slide.static_coord + slide.size / 2.0 - first_size / 2.0;
                if slide.is_scrollable(container) {
                    let half = (slide.size - container) / 2.0;
                    magnets.push(base - half);
                    magnets.push(base + half);
                } else {
                    magnets.push(base);
                }
            } else {
                let base = slide.static_coord;
                magnets.push(base);
                if slide.is_scrollable(container) {
                    magnets.push(base + slide.size - container);
                }
            }

            if slide.index == 0 && layout.looping && layout.max > 0.0 {
                magnets.push(layout.max);
            }
            if !layout.looping {
                for m in magnets.iter_mut() {
                    *m = clamp(*m, layout.min, layout.max);
                }
                magnets.dedup();
            }
            slide.magnets = magnets;
        }

        let magnets = slides
            .iter()
            .flat_map(|slide| {
                slide.magnets.iter().map(move |&value| Magnet {
                    slide: slide.index,
                    value,
                })
            })
            .collect();
        Self { magnets }
    }

    pub fn is_empty(&self) -> bool {
        self.magnets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.magnets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Magnet> {
        self.magnets.iter()
    }

    /// Closest magnet to `coord`. Ties go to the first one in index order.
    pub fn nearest(&self, coord: f64) -> Option<MagnetHit> {
        nearest_of(self.magnets.iter().copied(), coord)
    }

    /// Closest magnet of one slide.
    pub fn nearest_of_slide(&self, slide: usize, coord: f64) -> Option<MagnetHit> {
        nearest_of(
            self.magnets.iter().copied().filter(|m| m.slide == slide),
            coord,
        )
    }

    /// Coordinate to travel to for `slide`, given where the track is now.
    ///
    /// `Next` takes the slide's first magnet and `Prev` its last. When
    /// looping, the periodic copies one lap either side are considered and
    /// only those reachable in the requested direction are kept.
    pub fn directional(
        slide: &Slide,
        direction: SnapDirection,
        current: f64,
        looping: bool,
        max: f64,
    ) -> Option<f64> {
        let magnet = match direction {
            SnapDirection::Next => slide.magnets.first().copied(),
            SnapDirection::Prev => slide.magnets.last().copied(),
            SnapDirection::Nearest => {
                let coord = if looping && max > 0.0 {
                    current.rem_euclid(max)
                } else {
                    current
                };
                nearest_of(
                    slide.magnets.iter().map(|&value| Magnet {
                        slide: slide.index,
                        value,
                    }),
                    coord,
                )
                .map(|hit| hit.magnet)
            }
        }?;

        if !looping || max <= 0.0 {
            return Some(magnet);
        }

        let lap = (current / max).floor() * max;
        let base = magnet + lap;
        let copies = [base - max, base, base + max];
        let reachable = copies.iter().copied().filter(|&c| match direction {
            SnapDirection::Next => c >= current,
            SnapDirection::Prev => c <= current,
            SnapDirection::Nearest => true,
        });

        closest(reachable, current).or_else(|| closest(copies.into_iter(), current))
    }
}

/// First value nearest to `to`.
fn closest(values: impl Iterator<Item = f64>, to: f64) -> Option<f64> {
    values.fold(None, |best, v| match best {
        Some(b) if (b - to).abs() <= (v - to).abs() => Some(b),
        _ => Some(v),
    })
}

fn nearest_of(magnets: impl Iterator<Item = Magnet>, coord: f64) -> Option<MagnetHit> {
    let mut best: Option<MagnetHit> = None;
    for magnet in magnets {
        let diff = magnet.value - coord;
        let distance = diff.abs();
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(MagnetHit {
                slide: magnet.slide,
                magnet: magnet.value,
                diff,
                distance,
            });
        }
    }
    best
}
