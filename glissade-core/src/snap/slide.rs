use glissade_config::SlideSpec;

/// One slide as the engine sees it.
///
/// `static_coord`, `size` and `magnets` are rebuilt on every reflow;
/// `coord` and `progress` on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub index: usize,
    pub spec: SlideSpec,
    pub static_coord: f64,
    pub size: f64,
    pub coord: f64,
    /// `-1..=1`; `0` when the slide sits on its resting point.
    pub progress: f64,
    pub magnets: Vec<f64>,
}

impl Slide {
    pub fn new(index: usize, spec: SlideSpec) -> Self {
        Self {
            index,
            spec,
            static_coord: 0.0,
            size: 0.0,
            coord: 0.0,
            progress: 0.0,
            magnets: Vec::new(),
        }
    }

    /// Larger than the container, so it scrolls internally between its
    /// start and end magnets.
    pub fn is_scrollable(&self, container: f64) -> bool {
        self.size > container
    }

    pub fn frame(&self, container: f64) -> SlideFrame {
        SlideFrame {
            index: self.index,
            coord: self.coord,
            progress: self.progress,
            size: self.size,
            is_visible: self.size > 0.0
                && self.coord < container
                && self.coord + self.size > 0.0,
        }
    }
}

/// Per-frame output for the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub index: usize,
    /// Offset from the container start along the carousel axis.
    pub coord: f64,
    pub progress: f64,
    pub size: f64,
    /// Intersects the container.
    pub is_visible: bool,
}
