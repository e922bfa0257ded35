//! Text around the canvas: position label, poll status and diagnostics

use crate::app::state::PollStats;
use egui::{RichText, Ui};

/// "Current position" line above the canvas
pub fn position_label(ui: &mut Ui, label: Option<&str>) {
    let text = label.unwrap_or("Waiting for data...");
    ui.label(RichText::new(text).monospace().size(16.0));
}

/// One-line poll summary below the canvas
pub fn status_line(ui: &mut Ui, stats: &PollStats, points: usize) {
    ui.horizontal_wrapped(|ui| {
        for (i, part) in status_parts(stats, points).into_iter().enumerate() {
            if i > 0 {
                ui.separator();
            }
            ui.label(part);
        }
    });
}

/// Pieces of the status line. Failed polls never show up here, they are only logged.
fn status_parts(stats: &PollStats, points: usize) -> Vec<String> {
    let mut parts = vec![
        format!("{points} points"),
        format!("{} updates", stats.successes),
        format!("{} empty", stats.empty_responses),
    ];
    if stats.rejected_points > 0 {
        parts.push(format!("{} invalid points dropped", stats.rejected_points));
    }
    if let Some(last) = stats.last_success {
        parts.push(format!("last poll {:.0}s ago", last.elapsed().as_secs_f64()));
    }
    parts
}

/// Collapsible section with the data source and the profiling toggle
pub fn diagnostics(ui: &mut Ui, stats: &PollStats, data_url: &str) {
    egui::CollapsingHeader::new("Diagnostics")
        .default_open(false)
        .show(ui, |ui| {
            ui.label(format!("Source: {data_url}"));
            if stats.skipped_ticks > 0 {
                ui.label(format!(
                    "{} polls skipped while a request was in flight",
                    stats.skipped_ticks
                ));
            }
            ui.separator();
            viewer_entrypoints::profiling_ui(ui);
        });
}
