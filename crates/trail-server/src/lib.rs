//! Coordinate server for the robodog trail viewer
//!
//! Stores robot positions in memory and serves the most recent ones as JSON on
//! `GET /data`. Positions arrive through `POST /location` or from the built-in
//! [`simulator::RobotSimulator`].

pub mod api;
pub mod settings;
pub mod simulator;
pub mod store;

pub use api::{ServerState, routes};
pub use settings::Settings;
pub use store::{CoordinateStore, SharedStore, StoredCoordinate};

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server stopped: {0}")]
    Serve(#[from] std::io::Error),
}

/// Install the global fmt subscriber
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::warn!("A global tracing subscriber was already installed");
    }
}

/// Bind `addr` and serve the routes in a background task.
///
/// Returns the bound address, which differs from `addr` when port 0 was asked for.
pub async fn start(
    addr: SocketAddr,
    state: ServerState,
) -> Result<(SocketAddr, JoinHandle<Result<(), ServerError>>), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;

    let app = routes(state);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    });

    Ok((local_addr, handle))
}

/// Run the server until it fails
pub async fn serve(settings: Settings) -> Result<(), ServerError> {
    let store = CoordinateStore::shared(settings.retain);

    if settings.no_simulator {
        tracing::info!("Simulator disabled, waiting for POST /location");
    } else {
        let robot = simulator::RobotSimulator::new(settings.seed);
        tokio::spawn(robot.run(store.clone(), settings.simulator_period()));
    }

    let state = ServerState::new(store, settings.history_limit);
    let (addr, handle) = start(settings.bind, state).await?;
    tracing::info!("Listening on http://{addr}");

    match handle.await {
        Ok(result) => result,
        Err(join_err) => Err(ServerError::Serve(std::io::Error::other(join_err))),
    }
}
