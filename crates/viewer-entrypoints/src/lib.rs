//! Native entry point for the robodog trail viewer
//!
//! This crate owns process startup so the viewer crate only has to describe its
//! window and build its app:
//!
//! - a multi-threaded tokio runtime that stays alive for the whole UI session,
//!   so the app can spawn background tasks from its constructor
//! - logging (and optional chrome tracing) initialised before anything logs
//! - build metadata logged once at startup
//!
//! # Usage
//!
//! ```ignore
//! fn main() -> Result<(), viewer_entrypoints::EntrypointError> {
//!     let window = viewer_entrypoints::WindowOptions::new("My Viewer", [800.0, 600.0]);
//!     viewer_entrypoints::run_native(window, |cc| Box::new(MyApp::new(cc)))
//! }
//! ```

pub mod async_runtime;
pub mod cli;
pub mod profiling;

// Re-export commonly used types
pub use cli::{get_env, parse_args};
pub use profiling::profiling_ui;

mod metadata;
pub use metadata::{log_version_info, short_version_info};

/// Errors that abort startup
#[derive(Debug, thiserror::Error)]
pub enum EntrypointError {
    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Failed to run the native window: {0}")]
    Eframe(#[from] eframe::Error),
}

/// Native window description
#[derive(Clone, Debug)]
pub struct WindowOptions {
    /// Window title, also used as the eframe app id
    pub title: String,
    /// Initial inner size in logical pixels
    pub inner_size: [f32; 2],
}

impl WindowOptions {
    pub fn new(title: impl Into<String>, inner_size: [f32; 2]) -> Self {
        Self {
            title: title.into(),
            inner_size,
        }
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.inner_size)
                .with_min_inner_size(self.inner_size)
                .with_title(&self.title),
            ..Default::default()
        }
    }
}

/// Run an eframe app on native (desktop) platforms.
///
/// Blocks until the window is closed. The tokio runtime is entered for the
/// whole session, so `async_runtime::spawn` works from inside `app_creator`.
pub fn run_native(
    window: WindowOptions,
    app_creator: impl FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App>,
) -> Result<(), EntrypointError> {
    // Must happen before any logging so the fmt and chrome layers share one subscriber
    profiling::setup_logging_and_profiling();

    log_version_info(&window.title);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("trail-worker")
        .build()?;

    let result = rt.block_on(async {
        eframe::run_native(
            &window.title,
            window.native_options(),
            Box::new(move |cc| Ok(app_creator(cc))),
        )
    });

    // Flush any trace still being recorded
    if profiling::is_profiling_enabled() {
        profiling::stop_profiling();
    }

    result.map_err(EntrypointError::from)
}
