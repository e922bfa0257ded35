//! Background poller
//!
//! Fetches the full coordinate list on a fixed cadence and swaps it into the
//! shared [`TrailState`](crate::TrailState). Failures are logged and otherwise
//! ignored, so the last good trail stays on screen.

use crate::app::state::SharedTrailState;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use trail_lib::{Ingested, RawCoordinate, sanitize};
use viewer_entrypoints::async_runtime;

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid coordinate list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What to do when a tick fires while the previous request is still running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Start another request anyway
    #[default]
    Concurrent,
    /// Skip the tick
    SkipWhileInFlight,
}

#[derive(Clone, Debug)]
pub struct PollerConfig {
    pub url: String,
    /// Delay before the first poll
    pub warmup: Duration,
    pub interval: Duration,
    pub overlap: OverlapPolicy,
    /// Per-request timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
}

/// Result of one poll
#[derive(Debug)]
pub enum PollOutcome {
    /// The trail was replaced
    Replaced { points: usize, rejected: usize },
    /// No valid point in the response; nothing changed
    Empty { rejected: usize },
    Failed(PollError),
}

#[derive(Clone)]
pub struct Poller {
    client: reqwest::Client,
    config: Arc<PollerConfig>,
    state: SharedTrailState,
    in_flight: Arc<AtomicBool>,
    repaint: Option<egui::Context>,
}

/// Clears the in-flight flag when the request finishes, even on panic
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Poller {
    pub fn new(config: PollerConfig, state: SharedTrailState) -> Result<Self, PollError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PollError::Client)?;

        Ok(Self {
            client,
            config: Arc::new(config),
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
            repaint: None,
        })
    }

    /// Ask `ctx` for a repaint whenever the trail changes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Fetch the coordinate list once and apply it to the shared state
    pub async fn poll_once(&self) -> PollOutcome {
        let raw = match self.fetch().await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!("Error fetching data from {}: {err}", self.config.url);
                return PollOutcome::Failed(err);
            }
        };

        let Ingested { points, rejected } = sanitize(raw);
        let count = points.len();

        let replaced = {
            let mut state = self.state.write().await;
            state.stats.rejected_points += rejected as u64;
            state.stats.last_success = Some(instant::Instant::now());
            if state.replace_history(points) {
                state.stats.successes += 1;
                true
            } else {
                state.stats.empty_responses += 1;
                false
            }
        };

        if !replaced {
            tracing::debug!("Empty coordinate list, keeping the previous trail");
            return PollOutcome::Empty { rejected };
        }

        tracing::debug!("Trail replaced with {count} points");
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        PollOutcome::Replaced {
            points: count,
            rejected,
        }
    }

    async fn fetch(&self) -> Result<Vec<RawCoordinate>, PollError> {
        profiling::scope!("poller::fetch");
        let response = self.client.get(&self.config.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Poll forever: first after `warmup`, then every `interval`.
    ///
    /// Each poll runs in its own task so a slow request never delays the cadence.
    pub async fn run(self) {
        tracing::info!(
            "Polling {} every {:?} (first poll in {:?}, overlap: {:?})",
            self.config.url,
            self.config.interval,
            self.config.warmup,
            self.config.overlap
        );

        let mut ticker = tokio::time::interval_at(
            Instant::now() + self.config.warmup,
            self.config.interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let guard = match self.config.overlap {
                OverlapPolicy::Concurrent => None,
                OverlapPolicy::SkipWhileInFlight => {
                    if self.in_flight.swap(true, Ordering::AcqRel) {
                        tracing::debug!("Previous poll still running, skipping this tick");
                        self.state.write().await.stats.skipped_ticks += 1;
                        continue;
                    }
                    Some(InFlight(self.in_flight.clone()))
                }
            };

            let poller = self.clone();
            async_runtime::spawn(async move {
                let _guard = guard;
                poller.poll_once().await;
            });
        }
    }

    /// Start [`Poller::run`] on the current runtime
    pub fn spawn(self) -> JoinHandle<()> {
        async_runtime::spawn(self.run())
    }
}
