//! Frame rendering: history in, drawing primitives out
//!
//! A [`Frame`] is toolkit independent. The viewer paints it with egui, tests
//! inspect it directly.

use crate::{Canvas, GRID_SPACING_DEGREES, History, Pixel, View};

/// Grid steps narrower than this (in pixels) are not drawn
const MIN_GRID_STEP_PIXELS: f64 = 2.0;

/// An opaque RGB colour; opacity is carried separately
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Visual constants of the trail
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStyle {
    pub dot_radius: f64,
    pub dot_color: Rgb,
    pub grid_color: Rgb,
    pub grid_opacity: f64,
    pub grid_width: f64,
    pub grid_spacing_degrees: f64,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            dot_radius: 5.0,
            dot_color: Rgb::new(37, 143, 255),
            grid_color: Rgb::new(78, 115, 142),
            grid_opacity: 0.3,
            grid_width: 1.0,
            grid_spacing_degrees: GRID_SPACING_DEGREES,
        }
    }
}

/// One straight reference line of the background grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: Pixel,
    pub to: Pixel,
}

/// One filled circle of the trail
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Pixel,
    pub radius: f64,
    pub color: Rgb,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f64,
}

/// Everything to paint for one history snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub canvas: Canvas,
    pub style: TrailStyle,
    pub grid: Vec<GridLine>,
    /// Oldest first, so later dots are painted on top
    pub dots: Vec<Dot>,
}

impl Frame {
    /// A frame that only clears the canvas
    pub fn blank(canvas: Canvas, style: TrailStyle) -> Self {
        Self {
            canvas,
            style,
            grid: Vec::new(),
            dots: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.grid.is_empty() && self.dots.is_empty()
    }
}

/// Render a history onto a canvas
///
/// An empty history gives a blank frame. Otherwise the view is fitted to all
/// points, the grid is laid out from the minimum corner, and every point becomes
/// a dot whose opacity grows linearly from `1/n` (oldest) to `1.0` (newest).
pub fn render(history: &History, canvas: &Canvas, style: &TrailStyle) -> Frame {
    profiling::scope!("render");

    let Some(view) = View::fit(history.iter(), canvas) else {
        return Frame::blank(*canvas, *style);
    };

    let grid = grid_lines(&view, style.grid_spacing_degrees);

    let count = history.len() as f64;
    let dots = history
        .iter()
        .enumerate()
        .map(|(index, point)| Dot {
            center: view.project(point),
            radius: style.dot_radius,
            color: style.dot_color,
            opacity: (index + 1) as f64 / count,
        })
        .collect();

    Frame {
        canvas: *canvas,
        style: *style,
        grid,
        dots,
    }
}

/// Lay out the grid, clipped to the padded drawable region
fn grid_lines(view: &View, spacing: f64) -> Vec<GridLine> {
    let canvas = view.canvas();
    let left = canvas.padding();
    let right = canvas.width() - canvas.padding();
    let top = canvas.padding();
    let bottom = canvas.height() - canvas.padding();

    let step_pixels = spacing * view.scale();
    if step_pixels < MIN_GRID_STEP_PIXELS {
        tracing::trace!("Grid step of {step_pixels:.3} px is too dense, skipping grid");
        return Vec::new();
    }

    let bounds = view.bounds();
    let mut lines = Vec::new();

    // Vertical lines, eastwards from the minimum longitude
    for k in 0..=grid_steps(canvas.drawable_width(), step_pixels) {
        let x = view.x(bounds.min_lon() + k as f64 * spacing);
        if x > right {
            break;
        }
        lines.push(GridLine {
            from: Pixel { x, y: top },
            to: Pixel { x, y: bottom },
        });
    }

    // Horizontal lines, northwards from the minimum latitude
    for k in 0..=grid_steps(canvas.drawable_height(), step_pixels) {
        let y = view.y(bounds.min_lat() + k as f64 * spacing);
        if y < top {
            break;
        }
        if y > bottom {
            continue;
        }
        lines.push(GridLine {
            from: Pixel { x: left, y },
            to: Pixel { x: right, y },
        });
    }

    lines
}

/// Number of grid steps that fit in `drawable` pixels
fn grid_steps(drawable: f64, step_pixels: f64) -> u64 {
    (drawable / step_pixels).ceil() as u64
}
