//! Frame renderer. Reads the app state, draws the whole scene, writes
//! nothing back — called at most once per animation frame via the dirty
//! flag.

use wasm_bindgen::JsValue;

use crate::canvas::{input_port_center, output_port_center, shapes};
use crate::constants::*;
use crate::models::{NodeInstance, PortRef};
use crate::state::{AppState, DragSession};
use crate::utils::truncate_label;

pub fn draw(state: &AppState) {
    let Some(context) = state.context.as_ref() else {
        return;
    };

    // Background
    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, state.canvas_width, state.canvas_height);

    draw_connections(state, context);
    draw_connection_preview(state, context);

    // Paint in creation order so later nodes sit on top, matching the
    // hit-testing order.
    let mut nodes: Vec<&NodeInstance> = state.graph.nodes().collect();
    nodes.sort_by_key(|n| n.id);
    for node in nodes {
        draw_node(state, context, node);
    }
}

fn draw_connections(state: &AppState, context: &web_sys::CanvasRenderingContext2d) {
    for connection in state.graph.connections() {
        let (Some(source), Some(target)) = (
            state.graph.node(connection.source),
            state.graph.node(connection.target),
        ) else {
            continue;
        };
        let registry = state.graph.registry();
        let (Ok(source_desc), Ok(target_desc)) =
            (registry.describe(source.kind), registry.describe(target.kind))
        else {
            continue;
        };
        let (x1, y1) = output_port_center(source, source_desc, connection.source_port);
        let (x2, y2) = input_port_center(target, target_desc, connection.target_port);
        shapes::draw_connection_curve(context, x1, y1, x2, y2, CONNECTION_LINE_COLOR);
    }
}

fn draw_connection_preview(state: &AppState, context: &web_sys::CanvasRenderingContext2d) {
    let DragSession::ConnectFrom {
        source,
        port,
        current_x,
        current_y,
    } = state.drag
    else {
        return;
    };
    let Some(node) = state.graph.node(source) else {
        return;
    };
    let Ok(descriptor) = state.graph.registry().describe(node.kind) else {
        return;
    };
    let (x1, y1) = output_port_center(node, descriptor, port);

    context.save();
    let dashes = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
    let _ = context.set_line_dash(&dashes);
    context.begin_path();
    context.move_to(x1, y1);
    context.line_to(current_x, current_y);
    context.set_stroke_style_str(CONNECTION_PREVIEW_COLOR);
    context.set_line_width(2.0);
    context.stroke();
    context.restore();
}

fn draw_node(state: &AppState, context: &web_sys::CanvasRenderingContext2d, node: &NodeInstance) {
    let Ok(descriptor) = state.graph.registry().describe(node.kind) else {
        return;
    };
    let x = node.position.x;
    let y = node.position.y;
    let selected = state.graph.selected_node_id() == Some(node.id);

    shapes::draw_node_body(context, x, y, &descriptor.accent_color, selected);

    // Icon + title
    context.save();
    context.set_font("13px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(NODE_TEXT_COLOR);
    context.set_text_baseline("top");
    let title = truncate_label(&descriptor.title, NODE_LABEL_MAX_GRAPHEMES);
    let _ = context.fill_text(&format!("{} {}", descriptor.icon, title), x + 14.0, y + 12.0);

    // First config field as a one-line summary
    if let Some((key, value)) = node.config.iter().next() {
        context.set_font("11px system-ui, -apple-system, sans-serif");
        context.set_fill_style_str(NODE_SUBTEXT_COLOR);
        let summary = truncate_label(
            &format!("{}: {}", key, value.display()),
            NODE_LABEL_MAX_GRAPHEMES + 6,
        );
        let _ = context.fill_text(&summary, x + 14.0, y + 34.0);
    }
    context.restore();

    // Ports: inputs along the top edge, outputs along the bottom.
    for port in 0..descriptor.input_ports {
        let (px, py) = input_port_center(node, descriptor, port);
        let hovered = state.hovered_port == Some((node.id, PortRef::Input(port)));
        shapes::draw_port(context, px, py, hovered);
    }
    for port in 0..descriptor.output_ports {
        let (px, py) = output_port_center(node, descriptor, port);
        let hovered = state.hovered_port == Some((node.id, PortRef::Output(port)));
        shapes::draw_port(context, px, py, hovered);
    }
}
