//! Trail Library - Core data and math for the robodog trail viewer
//!
//! This library turns the coordinate list served by the `/data` endpoint into a
//! frame of simple drawing primitives. It knows nothing about HTTP or about the
//! UI toolkit, which keeps every step here a plain function of its inputs.
//!
//! # Architecture
//!
//! - **[`Coordinate`]**: A validated latitude/longitude pair
//! - **[`RawCoordinate`]** / [`sanitize`]: The untrusted wire shape and its ingestion boundary
//! - **[`History`]**: The ordered trail, replaced wholesale on every successful poll
//! - **[`Canvas`]** / **[`View`]**: Fixed drawing surface and the auto-fitting projection onto it
//! - **[`Frame`]** / [`render`]: Grid lines and fading dots ready to be painted

mod coordinate;
mod history;
mod render;
mod view;

// Public API exports
pub use coordinate::{Coordinate, Ingested, RawCoordinate, sanitize};
pub use history::History;
pub use render::{Dot, Frame, GridLine, Rgb, TrailStyle, render};
pub use view::{Bounds, Canvas, GRID_SPACING_DEGREES, MIN_AXIS_RANGE, Pixel, View};

/// Error types for the trail library
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrailError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a number: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("Field {field} is not finite")]
    NonFinite { field: &'static str },

    #[error("Field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Invalid canvas {width}x{height} with padding {padding}")]
    InvalidCanvas {
        width: f64,
        height: f64,
        padding: f64,
    },
}

pub type Result<T> = std::result::Result<T, TrailError>;
