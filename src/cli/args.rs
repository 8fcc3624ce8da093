//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::ascii::{CharSet, GlyphMapper, GlyphRamp, ScaleOptions, MAX_SCALE_MARGIN};
use crate::camera::{CameraSettings, Resolution};
use crate::config::{Config, ConfigError};
use crate::player::RenderSettings;
use crate::terminal::TerminalSize;

/// Parse and validate resolution (WIDTHxHEIGHT format)
fn parse_resolution(s: &str) -> Result<Resolution, String> {
    s.parse()
}

/// Parse and validate the scale margin (0-MAX_SCALE_MARGIN)
fn parse_margin(s: &str) -> Result<u32, String> {
    let margin: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid margin", s))?;
    if margin > MAX_SCALE_MARGIN {
        return Err(format!(
            "Margin must be at most {}, got {}",
            MAX_SCALE_MARGIN, margin
        ));
    }
    Ok(margin)
}

/// Parse and validate character aspect ratio (0.1-4.0)
fn parse_aspect(s: &str) -> Result<f32, String> {
    let aspect: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.1..=4.0).contains(&aspect) {
        return Err(format!(
            "Character aspect must be between 0.1 and 4.0, got {}",
            aspect
        ));
    }
    Ok(aspect)
}

/// Render your webcam as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "asciicam")]
#[command(version, about = "Live webcam as ASCII art in your terminal", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Default camera, grayscale ramp
    asciicam

    # True-color output with Unicode blocks
    asciicam --color --charset blocks

    # Custom ramp, light terminal
    asciicam --ramp ' .oO@' --invert

    # List available cameras
    asciicam list-cameras")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Emit 24-bit color escape sequences
    #[arg(long)]
    pub color: bool,

    /// ASCII character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom glyph ramp, darkest first (overrides --charset)
    #[arg(long)]
    pub ramp: Option<String>,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Do not mirror the camera horizontally
    #[arg(long)]
    pub no_mirror: bool,

    /// Capture resolution (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<Resolution>,

    /// Extra downscale added to the tight fit
    #[arg(long, value_parser = parse_margin)]
    pub margin: Option<u32>,

    /// Character cell width / height
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<f32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Merge command-line flags over the loaded configuration.
    pub fn camera_settings(&self, config: &Config) -> Result<CameraSettings, ConfigError> {
        Ok(CameraSettings {
            device_index: self.camera.unwrap_or(config.camera.device),
            resolution: match self.resolution {
                Some(res) => res,
                None => config.resolution()?,
            },
            fps: config.camera.fps,
            mirror: config.camera.mirror && !self.no_mirror,
        })
    }

    /// Merge command-line flags over the loaded configuration.
    pub fn render_settings(&self, config: &Config) -> Result<RenderSettings, ConfigError> {
        let ramp = match (&self.ramp, self.charset) {
            (Some(ramp), _) => ramp
                .parse::<GlyphRamp>()
                .map_err(|e| ConfigError::Invalid(format!("--ramp: {}", e)))?,
            (None, Some(set)) => CharSet::from(set).ramp(),
            (None, None) => config.ramp()?,
        };

        let fallback = match (config.terminal.fallback_cols, config.terminal.fallback_rows) {
            (Some(cols), Some(rows)) => Some(TerminalSize::new(cols, rows)),
            _ => None,
        };

        Ok(RenderSettings {
            mapper: GlyphMapper {
                ramp,
                color: self.color || config.render.color,
                invert: self.invert || config.render.invert,
            },
            scale: ScaleOptions {
                char_aspect: self.aspect.unwrap_or(config.render.char_aspect),
                margin: self.margin.unwrap_or(config.render.scale_margin),
            },
            fallback,
        })
    }
}
