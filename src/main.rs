//! Main application entry point.
//!
//! Usage: `discplayer [AUDIO_FILE]`. Without an argument the audio file comes
//! from the config (see `DISC_PLAYER_CONFIG`).

use std::path::PathBuf;
use std::process::ExitCode;
use discplayer::config::{PlayerConfig, CONFIG_ENV};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = PlayerConfig::discover(std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_audio_path(path);
    }

    match discplayer::ui::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "player exited with an error");
            ExitCode::FAILURE
        }
    }
}
