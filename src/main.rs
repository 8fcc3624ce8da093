use asciicam::cli::{self, Args, Command};
use asciicam::config::Config;
use asciicam::player::PlayerError;
use clap::Parser;

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PlayerError> {
    match &args.command {
        Some(Command::ListCameras) => cli::list_cameras(),
        Some(Command::Config { action }) => cli::handle_config_action(action.clone(), args),
        None => {
            let config = Config::load(args.config.as_deref())?;
            cli::play(args, &config)
        }
    }
}
