//! Geometry collaborator seam.

use glissade_model::{Rect, Size};

/// Supplies the measurements a reflow reads.
///
/// Implementations are queried only from [`Carousel::resize`], so a host
/// that changes layout must call it afterwards.
///
/// [`Carousel::resize`]: super::Carousel::resize
pub trait GeometryProvider {
    /// Container rectangle in viewport coordinates.
    fn container(&self) -> Rect;

    /// Viewport extent, used as the gesture reference frame.
    fn viewport(&self) -> Size;

    /// Measured extent of slide `index`, if it has one.
    fn slide_size(&self, index: usize) -> Option<Size>;
}

/// Fixed measurements, for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticGeometry {
    pub container: Rect,
    pub viewport: Size,
    pub slides: Vec<Size>,
}

impl StaticGeometry {
    /// Container at the viewport origin, filling it.
    pub fn new(container: Size, slides: Vec<Size>) -> Self {
        Self {
            container: Rect::new(0.0, 0.0, container.width, container.height),
            viewport: container,
            slides,
        }
    }

    /// `count` slides of the same size.
    pub fn uniform(container: Size, slide: Size, count: usize) -> Self {
        Self::new(container, vec![slide; count])
    }

    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }
}

impl GeometryProvider for StaticGeometry {
    fn container(&self) -> Rect {
        self.container
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn slide_size(&self, index: usize) -> Option<Size> {
        self.slides.get(index).copied()
    }
}
