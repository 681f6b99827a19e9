#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_saver::{LifeEngine, Settings};
use log::info;
use pixels_main_support::{animate, log_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const SETTINGS_FILE: &str = "life-saver.json";

fn main() -> ExitCode {
    env_logger::init();

    let settings_path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(SETTINGS_FILE), PathBuf::from);
    let settings = match Settings::load_or_default(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            log_error("load_settings", err);
            return ExitCode::FAILURE;
        }
    };
    let config = match settings.snapshot() {
        Ok(config) => config,
        Err(err) => {
            log_error("snapshot", err);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Starting with {:?} speed, {:?} squares, preset {:?}",
        settings.animation_speed, settings.square_size, settings.selected_preset_title
    );

    let result = animate(|window_size| {
        LifeEngine::for_display(
            config.clone(),
            window_size.width,
            window_size.height,
            settings.random(),
        )
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("animate", err);
            ExitCode::FAILURE
        }
    }
}
