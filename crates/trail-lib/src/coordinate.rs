//! Coordinates and the ingestion boundary
//!
//! The server is trusted for ordering but not for content: the `/data` endpoint
//! has been seen to return strings where numbers belong. Every point goes
//! through [`RawCoordinate`] and [`Coordinate::new`] before it reaches the
//! history, so the view math only ever sees finite, in-range values.

use crate::{Result, TrailError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated WGS84 position in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite and out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: check_degrees("latitude", latitude, 90.0)?,
            longitude: check_degrees("longitude", longitude, 180.0)?,
        })
    }

    /// Text shown for the current position
    pub fn label(&self) -> String {
        format!("Lat: {}, Lon: {}", self.latitude, self.longitude)
    }
}

fn check_degrees(field: &'static str, value: f64, limit: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(TrailError::NonFinite { field });
    }
    if value.abs() > limit {
        return Err(TrailError::OutOfRange { field, value });
    }
    Ok(value)
}

/// Untrusted wire shape of one point of the `/data` response
///
/// Fields other than `latitude` and `longitude` are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCoordinate {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

impl RawCoordinate {
    fn number(field: &'static str, value: Option<&Value>) -> Result<f64> {
        match value {
            None | Some(Value::Null) => Err(TrailError::MissingField(field)),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| TrailError::NotANumber {
                field,
                value: n.to_string(),
            }),
            // Numeric strings are coerced, like the browser client always did
            Some(Value::String(s)) => s.trim().parse().map_err(|_| TrailError::NotANumber {
                field,
                value: format!("{s:?}"),
            }),
            Some(other) => Err(TrailError::NotANumber {
                field,
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = TrailError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        let latitude = RawCoordinate::number("latitude", raw.latitude.as_ref())?;
        let longitude = RawCoordinate::number("longitude", raw.longitude.as_ref())?;
        Coordinate::new(latitude, longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: Some(Value::from(coordinate.latitude)),
            longitude: Some(Value::from(coordinate.longitude)),
        }
    }
}

/// Result of passing a server response through the ingestion boundary
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ingested {
    /// Valid points, in the order the server sent them
    pub points: Vec<Coordinate>,
    /// Number of points that were dropped
    pub rejected: usize,
}

/// Validate a raw response, keeping the valid points in order
pub fn sanitize(raw: Vec<RawCoordinate>) -> Ingested {
    let mut ingested = Ingested {
        points: Vec::with_capacity(raw.len()),
        rejected: 0,
    };

    for (index, point) in raw.into_iter().enumerate() {
        match Coordinate::try_from(point) {
            Ok(coordinate) => ingested.points.push(coordinate),
            Err(err) => {
                tracing::debug!("Dropping point {index}: {err}");
                ingested.rejected += 1;
            }
        }
    }

    if ingested.rejected > 0 {
        tracing::warn!(
            "Dropped {} of {} points with invalid coordinates",
            ingested.rejected,
            ingested.rejected + ingested.points.len()
        );
    }

    ingested
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Vec<RawCoordinate> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_accepts_valid() {
        let c = Coordinate::new(48.2082, 16.3738).unwrap();
        assert_eq!(c.latitude, 48.2082);
        assert_eq!(c.longitude, 16.3738);
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert_eq!(
            Coordinate::new(f64::NAN, 0.0),
            Err(TrailError::NonFinite { field: "latitude" })
        );
        assert_eq!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(TrailError::NonFinite { field: "longitude" })
        );
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(TrailError::OutOfRange { field: "latitude", .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5),
            Err(TrailError::OutOfRange { field: "longitude", .. })
        ));
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_label() {
        let c = Coordinate::new(37.001, -122.001).unwrap();
        assert_eq!(c.label(), "Lat: 37.001, Lon: -122.001");
    }

    #[test]
    fn test_sanitize_keeps_order_and_ignores_extra_fields() {
        let raw = parse(json!([
            {"latitude": 37.0, "longitude": -122.0, "timestamp": 1.0},
            {"latitude": 37.001, "longitude": -122.001, "id": 7},
        ]));
        let ingested = sanitize(raw);
        assert_eq!(ingested.rejected, 0);
        assert_eq!(ingested.points.len(), 2);
        assert_eq!(ingested.points[1].latitude, 37.001);
    }

    #[test]
    fn test_sanitize_coerces_numeric_strings() {
        let ingested = sanitize(parse(json!([{"latitude": " 37.5 ", "longitude": "-122"}])));
        assert_eq!(ingested.points, vec![Coordinate::new(37.5, -122.0).unwrap()]);
    }

    #[test]
    fn test_sanitize_drops_invalid_points() {
        let raw = parse(json!([
            {"latitude": "SSTI Vulnerability", "longitude": "49"},
            {"latitude": 1.0},
            {"latitude": null, "longitude": 2.0},
            {"latitude": true, "longitude": 2.0},
            {"latitude": "NaN", "longitude": 2.0},
            {"latitude": 1.0, "longitude": 2.0},
        ]));
        let ingested = sanitize(raw);
        assert_eq!(ingested.rejected, 5);
        assert_eq!(ingested.points, vec![Coordinate::new(1.0, 2.0).unwrap()]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate = serde_json::from_value(json!({"latitude": 1, "longitude": 2})).unwrap();
        assert_eq!(ok, Coordinate::new(1.0, 2.0).unwrap());

        let err = serde_json::from_value::<Coordinate>(json!({"latitude": 100, "longitude": 2}));
        assert!(err.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let c = Coordinate::new(1.5, 2.5).unwrap();
        assert_eq!(
            serde_json::to_value(c).unwrap(),
            json!({"latitude": 1.5, "longitude": 2.5})
        );
    }
}
