//! Render configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files. Every
//! field has a default, so an empty file `()` renders the stock scene.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::TintConfig;
use crate::rasterizer::{DepthBrightnessShader, PolarBackgroundShader, Projection, BACKGROUND_DEPTH, RASTER_SIZE};

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Which procedural background fills the pixels the mesh leaves uncovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundStyle {
    /// Polar spiral with pi and 2*pi
    #[default]
    Spiral,
    /// Polar spiral with 3.14 and 6.28
    LegacySpiral,
    /// No background pass
    None,
}

impl BackgroundStyle {
    pub fn shader(self) -> Option<PolarBackgroundShader> {
        match self {
            BackgroundStyle::Spiral => Some(PolarBackgroundShader::new()),
            BackgroundStyle::LegacySpiral => Some(PolarBackgroundShader::legacy()),
            BackgroundStyle::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub style: BackgroundStyle,
    /// Depth of the full-raster quad; must sit behind the mesh
    pub depth: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            style: BackgroundStyle::default(),
            depth: BACKGROUND_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mesh: PathBuf,
    pub output: PathBuf,
    pub raster_size: usize,
    pub projection: Projection,
    pub shading: DepthBrightnessShader,
    pub background: BackgroundConfig,
    pub tint: TintConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mesh: PathBuf::from("bunny.obj"),
            output: PathBuf::from("bunny.bmp"),
            raster_size: RASTER_SIZE,
            projection: Projection::default(),
            shading: DepthBrightnessShader::default(),
            background: BackgroundConfig::default(),
            tint: TintConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse and validate a RON string
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save the config to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raster_size == 0 {
            return Err(ConfigError::Invalid("raster_size must be positive".into()));
        }
        // Image dimensions are signed 32-bit and the color raster is size * size * 3 bytes
        let fits = i32::try_from(self.raster_size).is_ok()
            && self
                .raster_size
                .checked_mul(self.raster_size)
                .and_then(|n| n.checked_mul(3))
                .is_some();
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "raster_size {} is too large",
                self.raster_size
            )));
        }
        if !self.projection.scale.is_finite() || self.projection.scale == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "projection.scale must be finite and non-zero, got {}",
                self.projection.scale
            )));
        }
        if !self.projection.offset.is_finite() {
            return Err(ConfigError::Invalid("projection.offset must be finite".into()));
        }
        if self.shading.depth_range == 0.0 {
            return Err(ConfigError::Invalid("shading.depth_range must be non-zero".into()));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.tint.min) || !unit.contains(&self.tint.max) || self.tint.min > self.tint.max {
            return Err(ConfigError::Invalid(format!(
                "tint range [{}, {}] must be ordered and inside [0, 1]",
                self.tint.min, self.tint.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RenderConfig::from_ron("()").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.raster_size, 1000);
        assert_eq!(config.projection.offset, 0.12);
        assert_eq!(config.projection.scale, 5000.0);
        assert_eq!(config.background.depth, -1000.0);
        assert_eq!(config.background.style, BackgroundStyle::Spiral);
    }

    #[test]
    fn test_partial_config() {
        let config = RenderConfig::from_ron(
            r#"(
                mesh: "teapot.obj",
                raster_size: 256,
                background: (style: LegacySpiral),
                tint: (min: 1.0, max: 1.0, seed: Some(4)),
            )"#,
        )
        .unwrap();
        assert_eq!(config.mesh, PathBuf::from("teapot.obj"));
        assert_eq!(config.output, PathBuf::from("bunny.bmp"));
        assert_eq!(config.raster_size, 256);
        assert_eq!(config.background.style, BackgroundStyle::LegacySpiral);
        assert_eq!(config.background.depth, -1000.0);
        assert_eq!(config.tint.seed, Some(4));
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = RenderConfig::default();
        config.background.style = BackgroundStyle::None;
        config.tint.seed = Some(12345);
        let text = config.to_ron().unwrap();
        assert_eq!(RenderConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(RenderConfig::from_ron("(raster_size: 0)"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            RenderConfig::from_ron("(projection: (offset: 0.12, scale: 0.0))"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RenderConfig::from_ron("(tint: (min: 0.9, max: 0.2, seed: None))"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_raster_size_upper_bound() {
        assert!(matches!(
            RenderConfig::from_ron("(raster_size: 3000000000)"),
            Err(ConfigError::Invalid(_))
        ));
        let just_over = format!("(raster_size: {})", i32::MAX as u64 + 1);
        assert!(matches!(RenderConfig::from_ron(&just_over), Err(ConfigError::Invalid(_))));
        assert_eq!(RenderConfig::from_ron("(raster_size: 4096)").unwrap().raster_size, 4096);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(RenderConfig::from_ron("(raster_size: \"big\")"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_background_shader_choice() {
        assert_eq!(BackgroundStyle::Spiral.shader(), Some(PolarBackgroundShader::new()));
        assert_eq!(BackgroundStyle::LegacySpiral.shader(), Some(PolarBackgroundShader::legacy()));
        assert_eq!(BackgroundStyle::None.shader(), None);
    }
}
