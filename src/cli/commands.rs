//! Subcommand handlers for list-cameras, config actions, and playback.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::args::{Args, ConfigAction};
use crate::camera::{self, Webcam};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG};
use crate::player::{setup_ctrlc_handler, Player, PlayerError};
use crate::terminal::{query_size, FrameWriter, ScreenGuard};

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), PlayerError> {
    let devices = camera::list_devices()?;

    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, args: &Args) -> Result<(), PlayerError> {
    let config_path = args.config.clone().unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            let camera = args.camera_settings(&config)?;
            let render = args.render_settings(&config)?;

            println!("Current configuration:");
            println!("  Camera: {}", camera.device_index);
            println!("  Resolution: {}", camera.resolution);
            println!("  FPS: {}", camera.fps);
            println!("  Mirror: {}", yes_no(camera.mirror));
            println!("  Ramp: \"{}\"", render.mapper.ramp);
            println!("  Color: {}", yes_no(render.mapper.color));
            println!("  Invert: {}", yes_no(render.mapper.invert));
            println!("  Char aspect: {}", render.scale.char_aspect);
            println!("  Scale margin: {}", render.scale.margin);
            match render.fallback {
                Some(size) => println!("  Fallback terminal: {}", size),
                None => println!("  Fallback terminal: none"),
            }
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            let path = init_config(&config_path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the default config file, refusing to overwrite an existing one.
pub fn init_config(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        return Err(ConfigError::Invalid(format!(
            "config file already exists: {} (use 'asciicam config show' to view it)",
            path.display()
        )));
    }

    let io_err = |source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)?;

    Ok(path.to_path_buf())
}

/// Open the camera and draw frames until Ctrl+C.
pub fn play(args: &Args, config: &Config) -> Result<(), PlayerError> {
    let camera_settings = args.camera_settings(config)?;
    let render_settings = args.render_settings(config)?;

    let stop = Arc::new(AtomicBool::new(false));
    setup_ctrlc_handler(Arc::clone(&stop))?;

    let mut webcam = Webcam::open(camera_settings)?;
    log::info!(
        "camera {} streaming at {} @ {} fps",
        webcam.settings().device_index,
        webcam.resolution(),
        webcam.fps()
    );
    let player = Player::new(render_settings);

    let _screen = ScreenGuard::enter()?;
    let mut writer = FrameWriter::new(io::stdout().lock());
    player.run(&mut webcam, &mut writer, query_size, &stop)?;

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
