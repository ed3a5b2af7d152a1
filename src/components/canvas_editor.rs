//! Canvas controller: bridges pointer, keyboard and drag-and-drop events
//! to graph store messages and keeps the rendered canvas sized to its
//! container.
//!
//! No handler mutates graph state directly — everything goes through
//! `dispatch_global_message`, and repaints are batched by the animation
//! loop draining the dirty flag once per frame.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::components::node_palette::PaletteEntry;
use crate::constants::{
    DRAG_MIME_FALLBACK, DRAG_MIME_PALETTE, ID_CANVAS_CONTAINER, ID_WORKFLOW_CANVAS,
};
use crate::messages::Message;
use crate::models::PortRef;
use crate::state::{dispatch_global_message, DragSession, APP_STATE};

pub fn setup_canvas(document: &Document) -> Result<(), JsValue> {
    let canvas = document
        .get_element_by_id(ID_WORKFLOW_CANVAS)
        .ok_or_else(|| JsValue::from_str("workflow canvas element missing"))?
        .dyn_into::<HtmlCanvasElement>()?;

    resize_canvas(&canvas)?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.canvas = Some(canvas.clone());
        state.context = Some(context);
        state.mark_dirty();
    });

    setup_mouse_events(&canvas)?;
    setup_drag_drop(&canvas)?;
    setup_keyboard_events(document)?;
    setup_resize_handler(&canvas)?;
    setup_animation_loop();

    Ok(())
}

/// Match the canvas bitmap to its container, accounting for the device
/// pixel ratio so strokes stay crisp on high-DPI displays.
pub fn resize_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let Some(container) = document.get_element_by_id(ID_CANVAS_CONTAINER) else {
        return Ok(());
    };
    let container_width = container.client_width();
    let container_height = container.client_height();
    let dpr = window.device_pixel_ratio();

    canvas.set_width((container_width as f64 * dpr) as u32);
    canvas.set_height((container_height as f64 * dpr) as u32);
    canvas
        .style()
        .set_property("width", &format!("{}px", container_width))?;
    canvas
        .style()
        .set_property("height", &format!("{}px", container_height))?;

    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.canvas_width = container_width as f64;
        state.canvas_height = container_height as f64;
        if let Some(context) = state.context.as_ref() {
            // Reset first so repeated resizes do not compound the scale.
            let _ = context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            let _ = context.scale(dpr, dpr);
        }
        state.mark_dirty();
    });

    Ok(())
}

fn setup_resize_handler(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let canvas_clone = canvas.clone();
    let resize_callback = Closure::wrap(Box::new(move || {
        let _ = resize_canvas(&canvas_clone);
    }) as Box<dyn FnMut()>);

    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
    resize_callback.forget();
    Ok(())
}

fn setup_mouse_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Mouse down: an output port starts a connection drag; a node body
    // selects and starts a move; empty canvas clears the selection.
    let mousedown_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;

        let port_hit = APP_STATE.with(|state| state.borrow().find_port_at_position(x, y));
        if let Some((node_id, PortRef::Output(port))) = port_hit {
            dispatch_global_message(Message::StartConnectionDrag {
                source: node_id,
                port,
                start_x: x,
                start_y: y,
            });
            return;
        }
        if matches!(port_hit, Some((_, PortRef::Input(_)))) {
            // Connections are drawn from outputs; pressing an input port
            // is a dead zone rather than a selection.
            return;
        }

        let node_hit = APP_STATE.with(|state| state.borrow().find_node_at_position(x, y));
        match node_hit {
            Some((node_id, offset_x, offset_y)) => {
                dispatch_global_message(Message::SelectNode {
                    node_id: Some(node_id),
                });
                dispatch_global_message(Message::StartNodeDrag {
                    node_id,
                    offset_x,
                    offset_y,
                });
            }
            None => {
                dispatch_global_message(Message::SelectNode { node_id: None });
            }
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown_handler.as_ref().unchecked_ref())?;
    mousedown_handler.forget();

    // Mouse move: hover tracking plus whichever drag session is active.
    let mousemove_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;

        let drag = APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            state.update_mouse_position(x, y);
            state.drag
        });

        match drag {
            DragSession::ConnectFrom { .. } => {
                dispatch_global_message(Message::UpdateConnectionDrag {
                    current_x: x,
                    current_y: y,
                });
            }
            DragSession::DragNode {
                node_id,
                offset_x,
                offset_y,
            } => {
                dispatch_global_message(Message::UpdateNodePosition {
                    node_id,
                    x: x - offset_x,
                    y: y - offset_y,
                });
            }
            DragSession::Idle => {}
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", mousemove_handler.as_ref().unchecked_ref())?;
    mousemove_handler.forget();

    // Mouse up: commit or abort the active session.
    let mouseup_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;

        let drag = APP_STATE.with(|state| state.borrow().drag);
        match drag {
            DragSession::ConnectFrom { .. } => {
                dispatch_global_message(Message::EndConnectionDrag { end_x: x, end_y: y });
            }
            DragSession::DragNode { .. } => {
                dispatch_global_message(Message::StopNodeDrag);
            }
            DragSession::Idle => {}
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup_handler.as_ref().unchecked_ref())?;
    mouseup_handler.forget();

    Ok(())
}

fn setup_keyboard_events(document: &Document) -> Result<(), JsValue> {
    let keydown_handler = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        // Never steal Delete/Backspace from form fields.
        if let Some(active) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element())
        {
            let tag = active.node_name();
            if tag == "INPUT" || tag == "TEXTAREA" || tag == "SELECT" {
                return;
            }
        }
        match event.key().as_str() {
            "Delete" | "Backspace" => {
                event.prevent_default();
                dispatch_global_message(Message::DeleteSelection);
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    document
        .add_event_listener_with_callback("keydown", keydown_handler.as_ref().unchecked_ref())?;
    keydown_handler.forget();
    Ok(())
}

fn setup_drag_drop(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let dragover_handler = Closure::wrap(Box::new(move |event: DragEvent| {
        // Prevent default to allow dropping.
        event.prevent_default();
        if let Some(dt) = event.data_transfer() {
            dt.set_drop_effect("copy");
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("dragover", dragover_handler.as_ref().unchecked_ref())?;
    dragover_handler.forget();

    let drop_handler = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();

        let Some(dt) = event.data_transfer() else {
            return;
        };

        // Preferred payload: the serialized palette entry. Fallback: the
        // bare kind identifier.
        let kind = dt
            .get_data(DRAG_MIME_PALETTE)
            .ok()
            .and_then(|json| serde_json::from_str::<PaletteEntry>(&json).ok())
            .map(|entry| entry.kind)
            .or_else(|| dt.get_data(DRAG_MIME_FALLBACK).ok())
            .filter(|kind| !kind.is_empty());
        let Some(kind) = kind else {
            return;
        };

        // Drop position in canvas-local coordinates: subtract the
        // canvas's bounding-box origin from the screen coordinate.
        let (x, y) = match event
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            Some(target) => {
                let rect = target.get_bounding_client_rect();
                (
                    event.client_x() as f64 - rect.left(),
                    event.client_y() as f64 - rect.top(),
                )
            }
            None => (event.offset_x() as f64, event.offset_y() as f64),
        };

        crate::debug_log!("palette drop: {} at ({}, {})", kind, x, y);
        dispatch_global_message(Message::DropPaletteNode { kind, x, y });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("drop", drop_handler.as_ref().unchecked_ref())?;
    drop_handler.forget();

    Ok(())
}

/// Drive `AnimationTick` once per frame. The reducer repaints only when
/// the dirty flag is set, so an idle editor costs nothing per frame.
fn setup_animation_loop() {
    use std::cell::RefCell;
    use std::rc::Rc;

    type TickClosure = Closure<dyn FnMut()>;
    let f: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move || {
        dispatch_global_message(Message::AnimationTick);
        if let Some(window) = web_sys::window() {
            if let Some(cb) = f.borrow().as_ref() {
                let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }));

    if let Some(window) = web_sys::window() {
        if let Some(cb) = g.borrow().as_ref() {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
