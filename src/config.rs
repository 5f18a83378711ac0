use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::gif::{EncodeOptions, DEFAULT_FRAME_DURATION_MS, MIN_ENCODE_DURATION_MS};
use crate::compositor::stack::{Align, StackOptions};
use crate::error::{ConfigError, Result};
use crate::sequence::frame::{Color, TRANSPARENT};

/// Main configuration for gifweave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Codec boundary settings
    pub codec: CodecConfig,

    /// Compositor defaults
    pub compositor: CompositorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            compositor: CompositorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.codec.validate()?;
        self.compositor.validate()?;
        Ok(())
    }

    /// Encoder options derived from the codec section
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            speed: self.codec.encoder_speed,
            min_duration_ms: self.codec.min_encode_duration_ms,
        }
    }

    /// Stack options derived from the compositor section
    pub fn stack_options(&self) -> StackOptions {
        StackOptions {
            spacing: self.compositor.spacing,
            align: self.compositor.align,
            background: self.compositor.background,
            frame_duration_ms: self.compositor.frame_duration_ms,
        }
    }
}

/// Codec boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Duration assumed for frames whose container delay is absent or zero
    pub default_frame_duration_ms: u32,

    /// Floor applied to frame durations before encoding
    pub min_encode_duration_ms: u32,

    /// Quantization speed/quality trade-off, 1 (best) to 30 (fastest)
    pub encoder_speed: i32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
            min_encode_duration_ms: MIN_ENCODE_DURATION_MS,
            encoder_speed: 10,
        }
    }
}

impl CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.default_frame_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "codec.default_frame_duration_ms".to_string(),
                value: self.default_frame_duration_ms.to_string(),
            }
            .into());
        }

        if self.min_encode_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "codec.min_encode_duration_ms".to_string(),
                value: self.min_encode_duration_ms.to_string(),
            }
            .into());
        }

        if !(1..=30).contains(&self.encoder_speed) {
            return Err(ConfigError::InvalidValue {
                key: "codec.encoder_speed".to_string(),
                value: self.encoder_speed.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Compositor defaults used when the caller does not override them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositorConfig {
    /// Gap in pixels between stacked sources
    pub spacing: u32,

    /// Perpendicular alignment for stacking
    pub align: Align,

    /// Background fill for uncovered canvas area (RGBA)
    pub background: Color,

    /// Fixed per-frame duration for stacked output
    pub frame_duration_ms: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            spacing: 0,
            align: Align::Center,
            background: TRANSPARENT,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }
}

impl CompositorConfig {
    fn validate(&self) -> Result<()> {
        if self.frame_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "compositor.frame_duration_ms".to_string(),
                value: self.frame_duration_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("gifweave.toml");

        let mut original = Config::default();
        original.compositor.spacing = 4;
        original.codec.encoder_speed = 3;

        original.save_to_file(&file_path).unwrap();
        let loaded = Config::from_file(&file_path).unwrap();

        assert_eq!(loaded.compositor.spacing, 4);
        assert_eq!(loaded.codec.encoder_speed, 3);
        assert_eq!(loaded.compositor.align, Align::Center);
    }

    #[test]
    fn invalid_encoder_speed_is_rejected() {
        let mut config = Config::default();
        config.codec.encoder_speed = 0;
        assert!(config.validate().is_err());

        config.codec.encoder_speed = 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_durations_are_rejected() {
        let mut config = Config::default();
        config.compositor.frame_duration_ms = 0;
        assert!(config.validate().is_err());
    }
}
