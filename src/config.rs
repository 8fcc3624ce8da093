//! Configuration file handling for asciicam.
//!
//! Loads configuration from `<config dir>/asciicam/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::{CharSet, GlyphRamp, DEFAULT_CHAR_ASPECT, DEFAULT_SCALE_MARGIN, MAX_SCALE_MARGIN};
use crate::camera::Resolution;

/// Default configuration written by `asciicam config init`.
pub const DEFAULT_CONFIG: &str = r#"# asciicam configuration

[camera]
# Camera device index (see `asciicam list-cameras`)
device = 0
# Mirror horizontally (selfie mode)
mirror = true
# Capture resolution (lower = faster)
resolution = "640x480"
# Requested frame rate
fps = 30

[render]
# Character set: standard, blocks, minimal
charset = "standard"
# Custom ramp, darkest first (overrides charset)
# ramp = " .oO@"
# 24-bit color output
color = false
# Invert brightness (for light terminals)
invert = false
# Width / height of one terminal character cell
char_aspect = 0.5
# Extra downscale on top of the tight fit
scale_margin = 2

[terminal]
# Size to assume when the terminal cannot be queried
# fallback_cols = 80
# fallback_rows = 24
"#;

/// Configuration file structure for asciicam.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub mirror: bool,
    pub resolution: Option<String>,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: true,
            resolution: None,
            fps: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub charset: Option<String>,
    pub ramp: Option<String>,
    pub color: bool,
    pub invert: bool,
    pub char_aspect: f32,
    pub scale_margin: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            charset: None,
            ramp: None,
            color: false,
            invert: false,
            char_aspect: DEFAULT_CHAR_ASPECT,
            scale_margin: DEFAULT_SCALE_MARGIN,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct TerminalConfig {
    pub fallback_cols: Option<u16>,
    pub fallback_rows: Option<u16>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { source, .. } => ConfigError::ParseError {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, mid-stream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolution()?;
        self.ramp()?;

        let aspect = self.render.char_aspect;
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "render.char_aspect must be positive, got {}",
                aspect
            )));
        }
        if self.render.scale_margin > MAX_SCALE_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "render.scale_margin must be at most {}, got {}",
                MAX_SCALE_MARGIN, self.render.scale_margin
            )));
        }
        if self.camera.fps == 0 {
            return Err(ConfigError::Invalid("camera.fps must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Requested capture resolution.
    pub fn resolution(&self) -> Result<Resolution, ConfigError> {
        match &self.camera.resolution {
            Some(s) => s
                .parse::<Resolution>()
                .map_err(|e| ConfigError::Invalid(format!("camera.resolution: {}", e))),
            None => Ok(Resolution::default()),
        }
    }

    /// Glyph ramp selected by `render.ramp` or `render.charset`.
    pub fn ramp(&self) -> Result<GlyphRamp, ConfigError> {
        if let Some(ramp) = &self.render.ramp {
            return ramp
                .parse::<GlyphRamp>()
                .map_err(|e| ConfigError::Invalid(format!("render.ramp: {}", e)));
        }
        match &self.render.charset {
            Some(name) => name
                .parse::<CharSet>()
                .map(|set| set.ramp())
                .map_err(|e| ConfigError::Invalid(format!("render.charset: {}", e))),
            None => Ok(GlyphRamp::default()),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("asciicam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/asciicam/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_text_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.camera.device, 0);
        assert!(config.camera.mirror);
        assert_eq!(config.resolution().unwrap(), Resolution::MEDIUM);
        assert_eq!(config.ramp().unwrap(), GlyphRamp::default());
        assert_eq!(config.render.char_aspect, 0.5);
        assert_eq!(config.render.scale_margin, 2);
        assert!(config.terminal.fallback_cols.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.camera.mirror);
        assert_eq!(config.camera.fps, 30);
    }

    #[test]
    fn test_partial_section() {
        let config = Config::parse("[render]\ncolor = true\n").unwrap();
        assert!(config.render.color);
        assert_eq!(config.render.char_aspect, DEFAULT_CHAR_ASPECT);
        assert_eq!(config.render.scale_margin, DEFAULT_SCALE_MARGIN);
    }

    #[test]
    fn test_custom_ramp_overrides_charset() {
        let config = Config::parse("[render]\ncharset = \"blocks\"\nramp = \" xX\"\n").unwrap();
        assert_eq!(config.ramp().unwrap().glyphs(), &[' ', 'x', 'X']);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::parse("[render]\nchar_aspect = 0.0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[render]\nramp = \"\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[render]\ncharset = \"braille\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[camera]\nresolution = \"big\"\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            Config::parse("[render\ncolor = true"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("asciicam/config.toml"));
    }
}
