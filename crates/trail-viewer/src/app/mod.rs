//! Application module
//!
//! A single fixed-size canvas with the current position above it and the poll
//! status below. The trail is re-rendered only when the poller publishes a new
//! history, otherwise the cached frame is painted again.

mod canvas;
pub(crate) mod settings;
pub(crate) mod state;
mod ui_panels;

use crate::app::settings::Settings;
use crate::app::state::{PollStats, SharedTrailState, TrailState};
use eframe::egui;
use std::time::Duration;
use trail_lib::{Canvas, Frame, TrailStyle, render};

/// Upper bound between repaints so the "last poll" age keeps ticking
const IDLE_REPAINT: Duration = Duration::from_secs(1);

/// Last rendered picture and the text that goes with it
struct FrameCache {
    canvas: Canvas,
    style: TrailStyle,
    frame: Frame,
    /// Generation of the history `frame` was rendered from
    generation: u64,
    label: Option<String>,
    points: usize,
}

/// A new history was published since the cached frame was rendered
fn needs_render(cached_generation: u64, current_generation: u64) -> bool {
    cached_generation != current_generation
}

impl FrameCache {
    fn new(canvas: Canvas, style: TrailStyle) -> Self {
        Self {
            canvas,
            style,
            frame: Frame::blank(canvas, style),
            generation: 0,
            label: None,
            points: 0,
        }
    }

    /// Re-render if `state` holds a newer history. Returns whether it did.
    fn refresh(&mut self, state: &TrailState) -> bool {
        if !needs_render(self.generation, state.generation) {
            return false;
        }

        self.frame = render(&state.history, &self.canvas, &self.style);
        self.generation = state.generation;
        self.label = state.label.clone();
        self.points = state.history.len();
        tracing::trace!(
            "Rendered generation {} with {} dots",
            self.generation,
            self.frame.dots.len()
        );
        true
    }
}

pub struct TrailViewerApp {
    state: SharedTrailState,
    cache: FrameCache,
    stats: PollStats,
    data_url: String,
}

impl TrailViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        canvas: Canvas,
        state: SharedTrailState,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            state,
            cache: FrameCache::new(canvas, TrailStyle::default()),
            stats: PollStats::default(),
            data_url: settings.data_url(),
        }
    }

    /// Copy the stats out of the shared state and re-render on a new history
    fn sync(&mut self) {
        // Use try_read for non-blocking UI polling; a busy lock keeps the cached frame
        let Ok(state) = self.state.try_read() else {
            return;
        };

        self.stats = state.stats.clone();
        self.cache.refresh(&state);
    }
}

#[profiling::all_functions]
impl eframe::App for TrailViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui_panels::position_label(ui, self.cache.label.as_deref());
            ui.add_space(4.0);
            canvas::paint_frame(ui, &self.cache.frame);
            ui.add_space(4.0);
            ui_panels::status_line(ui, &self.stats, self.cache.points);
            ui_panels::diagnostics(ui, &self.stats, &self.data_url);
        });

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_lib::Coordinate;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_needs_render() {
        assert!(!needs_render(3, 3));
        assert!(needs_render(3, 4));
        assert!(!needs_render(0, 0));
    }

    #[test]
    fn test_cache_starts_blank() {
        let mut cache = FrameCache::new(Canvas::default(), TrailStyle::default());
        assert!(!cache.refresh(&TrailState::default()));
        assert!(cache.frame.is_blank());
        assert_eq!(cache.label, None);
    }

    #[test]
    fn test_cached_frame_survives_empty_response() {
        let mut cache = FrameCache::new(Canvas::default(), TrailStyle::default());
        let mut state = TrailState::default();

        state.replace_history(vec![c(37.0, -122.0), c(37.001, -122.001)]);
        assert!(cache.refresh(&state));
        let rendered = cache.frame.clone();
        assert_eq!(rendered.dots.len(), 2);

        state.replace_history(Vec::new());
        assert!(!cache.refresh(&state));
        assert_eq!(cache.frame, rendered);
        assert_eq!(cache.points, 2);
        assert_eq!(cache.label.as_deref(), Some("Lat: 37.001, Lon: -122.001"));
    }

    #[test]
    fn test_new_generation_re_renders() {
        let mut cache = FrameCache::new(Canvas::default(), TrailStyle::default());
        let mut state = TrailState::default();

        state.replace_history(vec![c(37.0, -122.0)]);
        cache.refresh(&state);
        let first = cache.frame.clone();

        state.replace_history(vec![c(37.0, -122.0), c(37.002, -122.0), c(37.004, -122.0)]);
        assert!(cache.refresh(&state));
        assert_ne!(cache.frame, first);
        assert_eq!(cache.frame.dots.len(), 3);
        assert_eq!(cache.generation, 2);
        assert_eq!(cache.points, 3);
    }
}
