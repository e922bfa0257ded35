//! HTTP routes
//!
//! - `GET /data`: the most recent coordinates, oldest first
//! - `GET /`: the latest position as plain text
//! - `POST /location`: ingest one position

use crate::store::SharedStore;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use trail_lib::{Coordinate, RawCoordinate, TrailError};

#[derive(Clone)]
pub struct ServerState {
    pub store: SharedStore,
    /// Maximum number of coordinates returned by `/data`
    pub history_limit: usize,
}

impl ServerState {
    pub fn new(store: SharedStore, history_limit: usize) -> Self {
        Self {
            store,
            history_limit,
        }
    }
}

pub fn routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/data", get(data))
        .route("/location", post(ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<ServerState>) -> String {
    match state.store.read().await.latest() {
        Some(entry) => entry.coordinate.label(),
        None => "No data yet".to_owned(),
    }
}

async fn data(State(state): State<ServerState>) -> Json<Vec<Coordinate>> {
    Json(state.store.read().await.recent(state.history_limit))
}

async fn ingest(
    State(state): State<ServerState>,
    Json(raw): Json<RawCoordinate>,
) -> Result<(StatusCode, Json<Coordinate>), ApiError> {
    let coordinate = Coordinate::try_from(raw)?;
    state.store.write().await.insert(coordinate);
    tracing::debug!("Received {}", coordinate.label());
    Ok((StatusCode::CREATED, Json(coordinate)))
}

/// Rejected ingestion payload
#[derive(Debug)]
pub struct ApiError(TrailError);

impl From<TrailError> for ApiError {
    fn from(err: TrailError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected location: {}", self.0);
        (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()).into_response()
    }
}
