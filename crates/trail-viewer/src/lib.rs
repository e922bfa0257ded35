//! Robodog trail viewer
//!
//! Polls a `/data` endpoint for the robot's recent coordinates and draws them
//! as a fading trail on an auto-scaled canvas with a background grid.

mod app;
pub mod poller;

pub use app::TrailViewerApp;
pub use app::settings::{DATA_URL_ENV, DEFAULT_DATA_URL, Settings};
pub use app::state::{PollStats, SharedTrailState, TrailState};
pub use poller::{OverlapPolicy, PollError, PollOutcome, Poller, PollerConfig};

use viewer_entrypoints::{EntrypointError, WindowOptions};

pub const APP_NAME: &str = "Robodog Trail";

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Invalid canvas settings: {0}")]
    Canvas(#[from] trail_lib::TrailError),

    #[error(transparent)]
    Poller(#[from] PollError),

    #[error(transparent)]
    Entrypoint(#[from] EntrypointError),
}

/// Open the viewer window and poll until it is closed
pub fn run(settings: Settings) -> Result<(), ViewerError> {
    let canvas = settings.canvas()?;
    let state = TrailState::shared();
    let poller = Poller::new(settings.poller_config(), state.clone())?;

    let window = WindowOptions::new(APP_NAME, settings.window_size());
    viewer_entrypoints::run_native(window, move |cc| {
        poller.with_repaint(cc.egui_ctx.clone()).spawn();
        Box::new(TrailViewerApp::new(cc, &settings, canvas, state))
    })?;
    Ok(())
}
