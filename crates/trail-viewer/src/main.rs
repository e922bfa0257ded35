#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::process::ExitCode;
use trail_viewer::Settings;

fn main() -> ExitCode {
    let settings = Settings::from_cli();
    match trail_viewer::run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging is not up yet when settings are rejected
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
