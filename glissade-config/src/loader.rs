//! Loading `CarouselConfig` from documents and the environment.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::error::{ConfigError, Result};
use crate::models::CarouselConfig;

/// Environment variable naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "GLISSADE_CONFIG_PATH";
/// Environment variable holding an inline JSON document.
pub const CONFIG_JSON_ENV: &str = "GLISSADE_CONFIG_JSON";

/// Source that produced a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl CarouselConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a file; `.json` is parsed as JSON, anything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Load overrides using environment variables.
    /// Evaluation order:
    /// 1) `$GLISSADE_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$GLISSADE_CONFIG_JSON` (inline JSON),
    /// 3) defaults if neither is set.
    pub fn load_from_env() -> Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let cfg = Self::from_path(&path)?;
            log::info!("loaded carousel config from {}", path.display());
            return Ok((cfg, ConfigSource::EnvPath(path)));
        }

        if let Ok(inline) = env::var(CONFIG_JSON_ENV)
            && !inline.trim().is_empty()
        {
            let cfg = Self::from_json_str(&inline)?;
            log::info!("loaded carousel config from ${CONFIG_JSON_ENV}");
            return Ok((cfg, ConfigSource::EnvInline));
        }

        log::debug!("no carousel config override found; using defaults");
        Ok((Self::default(), ConfigSource::Default))
    }
}
