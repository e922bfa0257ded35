use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Serves robot coordinates to the trail viewer
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Settings {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Number of most recent coordinates returned by `/data`
    #[arg(long, default_value_t = 100)]
    pub history_limit: usize,

    /// Number of coordinates kept in memory
    #[arg(long, default_value_t = 10_000)]
    pub retain: usize,

    /// Do not run the built-in robot simulator
    #[arg(long)]
    pub no_simulator: bool,

    /// Milliseconds between simulated positions
    #[arg(long, default_value_t = 3_000)]
    pub simulator_period_ms: u64,

    /// Seed for a reproducible simulated walk
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn simulator_period(&self) -> Duration {
        Duration::from_millis(self.simulator_period_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["trail-server"]);
        assert_eq!(settings.bind, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(settings.history_limit, 100);
        assert_eq!(settings.retain, 10_000);
        assert!(!settings.no_simulator);
        assert_eq!(settings.simulator_period(), Duration::from_secs(3));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::parse_from([
            "trail-server",
            "--bind",
            "0.0.0.0:8080",
            "--history-limit",
            "5",
            "--no-simulator",
            "--seed",
            "9",
        ]);
        assert_eq!(settings.bind.port(), 8080);
        assert_eq!(settings.history_limit, 5);
        assert!(settings.no_simulator);
        assert_eq!(settings.seed, Some(9));
    }
}
