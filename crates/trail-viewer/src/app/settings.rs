use crate::poller::{OverlapPolicy, PollerConfig};
use clap::Parser;
use std::time::Duration;
use trail_lib::Canvas;
use viewer_entrypoints::{cli::parse_args_or_exit, get_env};

/// Endpoint polled when neither `--data-url` nor `TRAIL_DATA_URL` is given
pub const DEFAULT_DATA_URL: &str = "http://127.0.0.1:5000/data";

/// Environment variable overriding the default data url
pub const DATA_URL_ENV: &str = "TRAIL_DATA_URL";

/// Vertical room reserved around the canvas for the label and status lines
const CHROME_HEIGHT: f32 = 140.0;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Robodog trail viewer - draws the robot's recent positions as a fading trail
pub struct Settings {
    /// Url returning the coordinate list as JSON [default: http://127.0.0.1:5000/data]
    #[clap(long, value_name = "URL")]
    pub data_url: Option<String>,

    /// Delay before the first poll, in milliseconds
    #[clap(long, default_value = "1000")]
    pub warmup_ms: u64,

    /// Time between polls, in milliseconds
    #[clap(long, default_value = "3000")]
    pub interval_ms: u64,

    /// Per-request timeout in milliseconds (none by default)
    #[clap(long)]
    pub request_timeout_ms: Option<u64>,

    /// Skip a poll while the previous request is still outstanding
    #[clap(long)]
    pub skip_overlapping: bool,

    /// Canvas width in pixels
    #[clap(long, default_value = "800")]
    pub canvas_width: f64,

    /// Canvas height in pixels
    #[clap(long, default_value = "600")]
    pub canvas_height: f64,

    /// Margin kept free on each canvas edge, in pixels
    #[clap(long, default_value = "50")]
    pub padding: f64,
}

impl Settings {
    pub fn from_cli() -> Self {
        parse_args_or_exit::<Settings>()
    }

    /// `--data-url`, then `TRAIL_DATA_URL`, then [`DEFAULT_DATA_URL`]
    pub fn data_url(&self) -> String {
        self.data_url
            .clone()
            .or_else(|| get_env(DATA_URL_ENV))
            .unwrap_or_else(|| DEFAULT_DATA_URL.to_owned())
    }

    pub fn canvas(&self) -> trail_lib::Result<Canvas> {
        Canvas::new(self.canvas_width, self.canvas_height, self.padding)
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            url: self.data_url(),
            warmup: Duration::from_millis(self.warmup_ms),
            interval: Duration::from_millis(self.interval_ms.max(1)),
            overlap: if self.skip_overlapping {
                OverlapPolicy::SkipWhileInFlight
            } else {
                OverlapPolicy::Concurrent
            },
            timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Window size fitting the canvas plus the text around it
    pub fn window_size(&self) -> [f32; 2] {
        [
            self.canvas_width as f32 + 32.0,
            self.canvas_height as f32 + CHROME_HEIGHT,
        ]
    }
}
