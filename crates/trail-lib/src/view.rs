//! Auto-fitting projection from degrees to canvas pixels
//!
//! The view is recomputed for every frame from the full history: a bounding box
//! over all points, one uniform scale for both axes (so the trail keeps its
//! shape), and a fixed margin that is never drawn into.

use crate::{Coordinate, Result, TrailError};
use geo::Rect;

/// Pixel position on the canvas, origin top-left, y pointing down
pub type Pixel = geo::Coord<f64>;

/// Spacing of the background grid, in degrees
pub const GRID_SPACING_DEGREES: f64 = 0.0002;

/// Axis ranges below this many degrees are treated as zero
pub const MIN_AXIS_RANGE: f64 = 1e-12;

/// Fixed drawing surface, captured once at startup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    padding: f64,
}

impl Canvas {
    /// Create a canvas, requiring a positive drawable area inside the padding
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self> {
        let valid = [width, height, padding].iter().all(|v| v.is_finite())
            && padding >= 0.0
            && width - 2.0 * padding > 0.0
            && height - 2.0 * padding > 0.0;

        if !valid {
            return Err(TrailError::InvalidCanvas {
                width,
                height,
                padding,
            });
        }

        Ok(Self {
            width,
            height,
            padding,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Width available for data, excluding padding on both sides
    #[inline]
    pub fn drawable_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height available for data, excluding padding on both sides
    #[inline]
    pub fn drawable_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 50.0,
        }
    }
}

/// Bounding box over a set of coordinates (x = longitude, y = latitude)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds(Rect<f64>);

impl Bounds {
    /// Compute the bounding box, `None` for an empty set
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut found = false;

        for point in points {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
            found = true;
        }

        found.then(|| {
            Self(Rect::new(
                geo::Coord {
                    x: min_lon,
                    y: min_lat,
                },
                geo::Coord {
                    x: max_lon,
                    y: max_lat,
                },
            ))
        })
    }

    #[inline]
    pub fn min_lat(&self) -> f64 {
        self.0.min().y
    }

    #[inline]
    pub fn max_lat(&self) -> f64 {
        self.0.max().y
    }

    #[inline]
    pub fn min_lon(&self) -> f64 {
        self.0.min().x
    }

    #[inline]
    pub fn max_lon(&self) -> f64 {
        self.0.max().x
    }

    #[inline]
    pub fn lat_range(&self) -> f64 {
        self.0.height()
    }

    #[inline]
    pub fn lon_range(&self) -> f64 {
        self.0.width()
    }
}

/// Derived view state for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    canvas: Canvas,
    bounds: Bounds,
    scale: f64,
    /// Extra pixels added on a collapsed axis to centre it in the drawable area
    center_offset: Pixel,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl View {
    /// Fit a view to the given points, `None` if there are none
    pub fn fit<'a>(
        points: impl IntoIterator<Item = &'a Coordinate>,
        canvas: &Canvas,
    ) -> Option<Self> {
        let bounds = Bounds::of(points)?;

        let lon_collapsed = bounds.lon_range() < MIN_AXIS_RANGE;
        let lat_collapsed = bounds.lat_range() < MIN_AXIS_RANGE;
        let lon_range = if lon_collapsed { 1.0 } else { bounds.lon_range() };
        let lat_range = if lat_collapsed { 1.0 } else { bounds.lat_range() };

        let scale =
            (canvas.drawable_width() / lon_range).min(canvas.drawable_height() / lat_range);

        let center_offset = Pixel {
            x: if lon_collapsed {
                canvas.drawable_width() / 2.0
            } else {
                0.0
            },
            y: if lat_collapsed {
                canvas.drawable_height() / 2.0
            } else {
                0.0
            },
        };

        Some(Self {
            canvas: *canvas,
            bounds,
            scale,
            center_offset,
        })
    }

    /// Pixels per degree, shared by both axes
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Horizontal pixel position of a longitude
    #[inline]
    pub fn x(&self, longitude: f64) -> f64 {
        self.canvas.padding + self.center_offset.x + (longitude - self.bounds.min_lon()) * self.scale
    }

    /// Vertical pixel position of a latitude (north is up)
    #[inline]
    pub fn y(&self, latitude: f64) -> f64 {
        self.canvas.height
            - self.canvas.padding
            - self.center_offset.y
            - (latitude - self.bounds.min_lat()) * self.scale
    }

    /// Map a coordinate onto the canvas
    #[inline]
    pub fn project(&self, coordinate: &Coordinate) -> Pixel {
        Pixel {
            x: self.x(coordinate.longitude),
            y: self.y(coordinate.latitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_canvas_validation() {
        assert!(Canvas::new(800.0, 600.0, 50.0).is_ok());
        assert!(Canvas::new(100.0, 600.0, 50.0).is_err());
        assert!(Canvas::new(800.0, 0.0, 0.0).is_err());
        assert!(Canvas::new(f64::NAN, 600.0, 50.0).is_err());
        assert!(Canvas::new(800.0, 600.0, -1.0).is_err());
    }

    #[test]
    fn test_canvas_default() {
        let canvas = Canvas::default();
        assert_eq!(canvas.drawable_width(), 700.0);
        assert_eq!(canvas.drawable_height(), 500.0);
    }

    #[test]
    fn test_bounds() {
        let points = [c(37.0, -122.0), c(37.001, -122.001)];
        let bounds = Bounds::of(&points).unwrap();
        assert_eq!(bounds.min_lat(), 37.0);
        assert_eq!(bounds.max_lat(), 37.001);
        assert_eq!(bounds.min_lon(), -122.001);
        assert_eq!(bounds.max_lon(), -122.0);
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn test_fit_empty() {
        assert!(View::fit(&[], &Canvas::default()).is_none());
    }

    #[test]
    fn test_scale_uses_tighter_axis() {
        let points = [c(37.0, -122.0), c(37.001, -122.001)];
        let view = View::fit(&points, &Canvas::default()).unwrap();
        // 500 px of height over 0.001 degrees is tighter than 700 px of width
        assert!(approx(view.scale(), 500.0 / (37.001 - 37.0)));
    }

    #[test]
    fn test_mapping_corners() {
        let points = [c(37.0, -122.0), c(37.001, -122.001)];
        let canvas = Canvas::default();
        let view = View::fit(&points, &canvas).unwrap();

        let oldest = view.project(&points[0]);
        let newest = view.project(&points[1]);

        // Minimum latitude sits on the bottom padding line
        assert!(approx(oldest.y, canvas.height() - canvas.padding()));
        // Maximum latitude sits on the top padding line
        assert!(approx(newest.y, canvas.padding()));
        // Minimum longitude sits on the left padding line
        assert!(approx(newest.x, canvas.padding()));
        assert!(oldest.x > newest.x);
    }

    #[test]
    fn test_single_point_is_centered() {
        let canvas = Canvas::default();
        let view = View::fit(&[c(48.2082, 16.3738)], &canvas).unwrap();
        assert!(view.scale().is_finite() && view.scale() > 0.0);

        let p = view.project(&c(48.2082, 16.3738));
        assert!(approx(p.x, canvas.width() / 2.0));
        assert!(approx(p.y, canvas.height() / 2.0));
    }

    #[test]
    fn test_identical_points_scale_is_finite() {
        let points = vec![c(10.0, 20.0); 25];
        let view = View::fit(&points, &Canvas::default()).unwrap();
        assert!(view.scale().is_finite());
        assert!(view.scale() > 0.0);
    }

    #[test]
    fn test_collapsed_latitude_only_centers_vertically() {
        let canvas = Canvas::default();
        let points = [c(10.0, 20.0), c(10.0, 20.01)];
        let view = View::fit(&points, &canvas).unwrap();

        let west = view.project(&points[0]);
        let east = view.project(&points[1]);
        assert!(approx(west.y, canvas.height() / 2.0));
        assert!(approx(east.y, canvas.height() / 2.0));
        // The collapsed axis counts as one degree, so it bounds the scale
        assert!(approx(view.scale(), canvas.drawable_height()));
        assert!(approx(west.x, canvas.padding()));
        assert!(approx(east.x, canvas.padding() + 0.01 * canvas.drawable_height()));
    }

    #[test]
    fn test_max_latitude_is_topmost() {
        let points = [
            c(37.0002, -122.0),
            c(37.0010, -122.0004),
            c(36.9995, -122.0009),
            c(37.0004, -121.9990),
        ];
        let view = View::fit(&points, &Canvas::default()).unwrap();
        let ys: Vec<f64> = points.iter().map(|p| view.project(p).y).collect();
        let top = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(ys[1], top);
    }
}
