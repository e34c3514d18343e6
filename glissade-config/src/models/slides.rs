use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Declared source of a slide's extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlideSpec {
    /// Extent comes from the geometry collaborator on every reflow.
    #[default]
    Measured,
    /// Not backed by a measurable element; the extent must be declared.
    Virtual { size: Option<f64> },
}

impl SlideSpec {
    pub const fn virtual_sized(size: f64) -> Self {
        Self::Virtual { size: Some(size) }
    }
}

/// Reject virtual slides that do not declare a usable extent.
pub fn validate_slides(slides: &[SlideSpec]) -> Result<()> {
    for (index, spec) in slides.iter().enumerate() {
        if let SlideSpec::Virtual { size } = spec {
            match size {
                None => {
                    return Err(ConfigError::VirtualSlideWithoutSize { index });
                }
                Some(px) if !px.is_finite() || *px < 0.0 => {
                    return Err(ConfigError::invalid(
                        "slides",
                        format!("virtual slide {index} has invalid size {px}"),
                    ));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
