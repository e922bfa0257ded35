/*!
Logging and profiling setup for the trail viewer.

The API is the same whether or not the `profiling` feature is compiled in:

- with the feature, a reloadable `tracing-chrome` layer sits next to the fmt
  layer and can be switched on and off at runtime; every session writes a
  `trace-<unix time>.json` file into the working directory that can be opened in
  Perfetto or `chrome://tracing`.
- without it, only the fmt layer is installed and the profiling calls are no-ops.

Top-level API (always available):
- `setup_logging_and_profiling()`
- `start_profiling()`
- `stop_profiling()`
- `is_profiling_enabled() -> bool`
- `profiling_ui(&mut egui::Ui)`
*/

use tracing_subscriber::EnvFilter;

/// Filter used in debug builds when `RUST_LOG` is not set
const DEFAULT_FILTER_DEBUG: &str = "debug,eframe=warn,egui=warn,egui_wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn,winit=warn,hyper_util=info,reqwest=info";

/// Filter used in release builds when `RUST_LOG` is not set
const DEFAULT_FILTER_RELEASE: &str = "info,eframe=warn,egui=warn,wgpu_core=warn,wgpu_hal=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cfg!(debug_assertions) {
            DEFAULT_FILTER_DEBUG
        } else {
            DEFAULT_FILTER_RELEASE
        })
    })
}

#[cfg(feature = "profiling")]
mod inner {
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    use tracing_chrome::{ChromeLayer, ChromeLayerBuilder, FlushGuard};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{Registry, fmt, reload};

    struct ProfilingState {
        /// Reload handle for the chrome layer
        reload_handle: reload::Handle<Option<ChromeLayer<Registry>>, Registry>,
        /// Flushes the trace file when dropped
        guard: Option<FlushGuard>,
        /// File of the session currently being recorded
        trace_file: Option<PathBuf>,
    }

    static PROFILING_STATE: Mutex<Option<ProfilingState>> = Mutex::new(None);

    fn lock_state() -> MutexGuard<'static, Option<ProfilingState>> {
        PROFILING_STATE.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Profiling state mutex poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Install the fmt layer and a disabled, reloadable chrome layer.
    ///
    /// Setting `ENABLE_PROFILING` starts a session right away.
    pub fn setup_logging_and_profiling() {
        let (reload_layer, reload_handle) = reload::Layer::new(None::<ChromeLayer<Registry>>);
        let fmt_layer = fmt::layer().with_filter(super::env_filter());

        let registry = tracing_subscriber::registry()
            .with(reload_layer)
            .with(fmt_layer);

        *lock_state() = Some(ProfilingState {
            reload_handle,
            guard: None,
            trace_file: None,
        });

        if registry.try_init().is_err() {
            tracing::warn!("A global tracing subscriber was already installed");
        }
        tracing::info!("Tracing initialized with reloadable chrome profiling layer");

        if std::env::var("ENABLE_PROFILING").is_ok() {
            tracing::info!("ENABLE_PROFILING set - starting profiling session at startup");
            start_profiling();
        }
    }

    /// Start recording spans into a new trace file.
    pub fn start_profiling() {
        let mut state_opt = lock_state();
        let Some(state) = state_opt.as_mut() else {
            tracing::error!("Profiling state not initialized");
            return;
        };

        if state.guard.is_some() {
            tracing::warn!("Profiling already enabled");
            return;
        }

        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let trace_file = PathBuf::from(format!("trace-{stamp}.json"));

        let (chrome_layer, guard) = ChromeLayerBuilder::new()
            .file(trace_file.clone())
            .include_args(true)
            .build();

        if let Err(e) = state.reload_handle.reload(Some(chrome_layer)) {
            tracing::error!("Failed to enable chrome layer: {e:?}");
            return;
        }

        state.guard = Some(guard);
        state.trace_file = Some(trace_file);
        tracing::info!("Profiling session started");
    }

    /// Stop recording and flush the trace file.
    pub fn stop_profiling() {
        let mut state_opt = lock_state();
        let Some(state) = state_opt.as_mut() else {
            tracing::error!("Profiling state not initialized");
            return;
        };

        if state.guard.is_none() {
            tracing::warn!("Profiling not enabled");
            return;
        }

        if let Err(e) = state.reload_handle.reload(None::<ChromeLayer<Registry>>) {
            tracing::error!("Failed to disable chrome layer: {e:?}");
        }

        // Dropping the guard flushes the file
        state.guard = None;
        if let Some(trace_file) = state.trace_file.take() {
            tracing::info!(
                "Profiling session written to {} (open it in https://ui.perfetto.dev)",
                trace_file.display()
            );
        }
    }

    pub fn is_profiling_enabled() -> bool {
        lock_state()
            .as_ref()
            .map(|s| s.guard.is_some())
            .unwrap_or(false)
    }

    pub fn profiling_ui(ui: &mut egui::Ui) {
        egui::warn_if_debug_build(ui);

        let mut enabled = is_profiling_enabled();
        if ui.checkbox(&mut enabled, "Record chrome trace").changed() {
            if enabled {
                start_profiling();
            } else {
                stop_profiling();
            }
        }

        if enabled {
            ui.label("⏺ Recording active");
        } else {
            ui.label("Traces are written to the working directory.");
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod inner {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    /// Initialize logging with sensible defaults; profiling is a no-op here.
    pub fn setup_logging_and_profiling() {
        let fmt_layer = fmt::layer().with_filter(super::env_filter());
        if tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .is_err()
        {
            tracing::warn!("A global tracing subscriber was already installed");
        }

        tracing::info!("Logging initialized (profiling disabled in this build)");
    }

    pub fn start_profiling() {
        tracing::info!("start_profiling() called but profiling is disabled in this build");
    }

    pub fn stop_profiling() {
        tracing::info!("stop_profiling() called but profiling is disabled in this build");
    }

    pub fn is_profiling_enabled() -> bool {
        false
    }

    pub fn profiling_ui(ui: &mut egui::Ui) {
        ui.label("Profiling feature not enabled in this build.");
    }
}

// Re-export a stable API surface regardless of which `inner` module was compiled.
pub use inner::{
    is_profiling_enabled, profiling_ui, setup_logging_and_profiling, start_profiling,
    stop_profiling,
};
