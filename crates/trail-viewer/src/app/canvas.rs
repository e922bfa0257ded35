//! Paints a rendered [`Frame`] with the egui painter

use egui::{Color32, Pos2, Sense, Stroke, Ui};
use trail_lib::{Frame, Pixel, Rgb};

/// Canvas background, drawn even for a blank frame
const BACKGROUND: Color32 = Color32::from_rgb(12, 20, 28);

pub fn paint_frame(ui: &mut Ui, frame: &Frame) -> egui::Response {
    profiling::scope!("paint_frame");

    let size = egui::vec2(frame.canvas.width() as f32, frame.canvas.height() as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, BACKGROUND);

    let grid_stroke = Stroke::new(
        frame.style.grid_width as f32,
        color(frame.style.grid_color, frame.style.grid_opacity),
    );
    for line in &frame.grid {
        painter.line_segment(
            [to_screen(origin, line.from), to_screen(origin, line.to)],
            grid_stroke,
        );
    }

    for dot in &frame.dots {
        painter.circle_filled(
            to_screen(origin, dot.center),
            dot.radius as f32,
            color(dot.color, dot.opacity),
        );
    }

    response
}

fn to_screen(origin: Pos2, pixel: Pixel) -> Pos2 {
    origin + egui::vec2(pixel.x as f32, pixel.y as f32)
}

fn color(rgb: Rgb, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, alpha)
}
