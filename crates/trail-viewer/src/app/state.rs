//! State shared between the poller and the UI
//!
//! The poller is the only writer. The UI reads with `try_read` and keeps
//! showing its cached frame when the lock is busy.

use std::sync::Arc;
use trail_lib::{Coordinate, History};
use viewer_entrypoints::async_runtime::RwLock;

pub type SharedTrailState = Arc<RwLock<TrailState>>;

#[derive(Debug, Default)]
pub struct TrailState {
    /// Latest trail received from the server, oldest first
    pub history: History,

    /// Bumped on every history replacement
    pub generation: u64,

    /// "Current position" text of the newest point
    pub label: Option<String>,

    pub stats: PollStats,
}

/// Poll counters shown in the status line
///
/// Failed polls are only logged, never counted here.
#[derive(Clone, Debug, Default)]
pub struct PollStats {
    pub successes: u64,
    pub empty_responses: u64,
    /// Points dropped because they failed validation
    pub rejected_points: u64,
    /// Ticks skipped because a request was still in flight
    pub skipped_ticks: u64,
    pub last_success: Option<instant::Instant>,
}

impl TrailState {
    pub fn shared() -> SharedTrailState {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Replace the whole trail. Empty lists are ignored so the previous picture stays.
    ///
    /// Returns whether anything changed.
    pub fn replace_history(&mut self, points: Vec<Coordinate>) -> bool {
        if points.is_empty() {
            return false;
        }
        self.history.replace(points);
        self.generation += 1;
        self.label = self.history.latest().map(Coordinate::label);
        true
    }
}
