use glissade_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarouselError {
    /// Invalid options or slide declarations; raised at construction.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("slide {index} is out of range ({len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("carousel has been destroyed")]
    Destroyed,
}

pub type Result<T> = std::result::Result<T, CarouselError>;
