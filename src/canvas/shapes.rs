use crate::constants::*;
use web_sys::CanvasRenderingContext2d;

/// Rounded rectangle node body with drop shadow, accent strip on the left
/// edge and a border that thickens when selected.
pub fn draw_node_body(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    accent_color: &str,
    selected: bool,
) {
    context.save();

    context.set_shadow_color(SHADOW_COLOR);
    context.set_shadow_blur(8.0);
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(2.0);

    context.set_fill_style_str(NODE_FILL_COLOR);
    rounded_rect_path(context, x, y, NODE_WIDTH, NODE_HEIGHT, 10.0);
    context.fill();

    // Remove shadow for border and accent
    context.set_shadow_blur(0.0);
    context.set_shadow_offset_y(0.0);

    if selected {
        context.set_line_width(2.5);
        context.set_stroke_style_str(NODE_BORDER_SELECTED);
    } else {
        context.set_line_width(1.5);
        context.set_stroke_style_str(NODE_BORDER_DEFAULT);
    }
    context.stroke();

    // Accent strip along the left edge, clipped to the rounded outline.
    rounded_rect_path(context, x, y, NODE_WIDTH, NODE_HEIGHT, 10.0);
    context.clip();
    context.set_fill_style_str(accent_color);
    context.fill_rect(x, y, 5.0, NODE_HEIGHT);

    context.restore();
}

/// Rounded rectangle path without filling or stroking.
pub fn rounded_rect_path(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    context.begin_path();
    context.move_to(x + radius, y);
    context.line_to(x + width - radius, y);
    context.quadratic_curve_to(x + width, y, x + width, y + radius);
    context.line_to(x + width, y + height - radius);
    context.quadratic_curve_to(x + width, y + height, x + width - radius, y + height);
    context.line_to(x + radius, y + height);
    context.quadratic_curve_to(x, y + height, x, y + height - radius);
    context.line_to(x, y + radius);
    context.quadratic_curve_to(x, y, x + radius, y);
    context.close_path();
}

/// A port circle; hovered ports render larger and highlighted.
pub fn draw_port(context: &CanvasRenderingContext2d, x: f64, y: f64, hovered: bool) {
    context.save();
    context.begin_path();
    let radius = if hovered {
        PORT_RADIUS + 2.0
    } else {
        PORT_RADIUS
    };
    let _ = context.arc(x, y, radius, 0.0, std::f64::consts::TAU);
    context.set_fill_style_str(if hovered {
        PORT_HOVER_COLOR
    } else {
        PORT_FILL_COLOR
    });
    context.fill();
    context.set_line_width(1.5);
    context.set_stroke_style_str(NODE_FILL_COLOR);
    context.stroke();
    context.restore();
}

/// Connection curve from an output port down and across to an input port.
pub fn draw_connection_curve(
    context: &CanvasRenderingContext2d,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: &str,
) {
    let bend = ((y2 - y1).abs() * 0.5).max(30.0);
    context.save();
    context.begin_path();
    context.move_to(x1, y1);
    context.bezier_curve_to(x1, y1 + bend, x2, y2 - bend, x2, y2);
    context.set_stroke_style_str(color);
    context.set_line_width(2.0);
    context.stroke();
    context.restore();

    draw_arrow_head(context, x2, y2, color);
}

/// Small triangle pointing into an input port.
pub fn draw_arrow_head(context: &CanvasRenderingContext2d, x: f64, y: f64, color: &str) {
    let size = 6.0;
    context.save();
    context.begin_path();
    context.move_to(x, y);
    context.line_to(x - size * 0.7, y - size);
    context.line_to(x + size * 0.7, y - size);
    context.close_path();
    context.set_fill_style_str(color);
    context.fill();
    context.restore();
}
