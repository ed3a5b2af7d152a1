//! Canvas reducer: every gesture that touches the graph store — placement,
//! dragging, connecting, selecting, config edits, deletion, export.

use crate::debug_log;
use crate::graph::{GraphError, GraphEvent};
use crate::messages::{Command, Message};
use crate::models::{NodeKind, PortRef, Position};
use crate::state::{AppState, DragSession};
use crate::toast;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::DropPaletteNode { kind, x, y } => {
            match NodeKind::parse(kind) {
                None => {
                    // Stale or foreign drag payload — reject with a notice,
                    // leave the graph untouched.
                    toast::error(&format!("Unknown node type \"{}\"", kind));
                }
                Some(kind) => {
                    let overrides = state.live_default_overrides(kind);
                    match state
                        .graph
                        .create_node(kind, Position::new(*x, *y), &overrides)
                    {
                        Ok(id) => debug_log!("placed {} as {}", kind, id),
                        Err(e) => toast::error(&e.to_string()),
                    }
                }
            }
            drain_graph_events(state, cmds);
            true
        }

        Message::StartNodeDrag {
            node_id,
            offset_x,
            offset_y,
        } => {
            state.drag = DragSession::DragNode {
                node_id: *node_id,
                offset_x: *offset_x,
                offset_y: *offset_y,
            };
            true
        }

        Message::UpdateNodePosition { node_id, x, y } => {
            if state.graph.move_node(*node_id, Position::new(*x, *y)).is_ok() {
                // Position is cosmetic; incident connections re-render at
                // the next paint without any data change.
                state.mark_dirty();
            }
            true
        }

        Message::StopNodeDrag => {
            state.drag = DragSession::Idle;
            state.mark_dirty();
            true
        }

        Message::StartConnectionDrag {
            source,
            port,
            start_x,
            start_y,
        } => {
            state.drag = DragSession::ConnectFrom {
                source: *source,
                port: *port,
                current_x: *start_x,
                current_y: *start_y,
            };
            state.mark_dirty();
            true
        }

        Message::UpdateConnectionDrag {
            current_x,
            current_y,
        } => {
            if let DragSession::ConnectFrom { source, port, .. } = state.drag {
                state.drag = DragSession::ConnectFrom {
                    source,
                    port,
                    current_x: *current_x,
                    current_y: *current_y,
                };
                state.mark_dirty();
            }
            true
        }

        Message::EndConnectionDrag { end_x, end_y } => {
            if let DragSession::ConnectFrom { source, port, .. } = state.drag {
                state.drag = DragSession::Idle;
                match state.find_port_at_position(*end_x, *end_y) {
                    Some((target, PortRef::Input(target_port))) => {
                        match state.graph.connect(source, port, target, target_port) {
                            Ok(id) => debug_log!("connected {} -> {} as {}", source, target, id),
                            Err(GraphError::DuplicateConnection) => {
                                toast::info("That connection already exists");
                            }
                            Err(e) => {
                                // Self-loops and anything else invalid end
                                // the gesture as a silent no-op.
                                debug_log!("connection rejected: {}", e);
                            }
                        }
                    }
                    // Released over empty canvas or a non-input port: the
                    // attempt is aborted, not an error.
                    _ => debug_log!("connection drag aborted"),
                }
                state.mark_dirty();
            }
            drain_graph_events(state, cmds);
            true
        }

        Message::SelectNode { node_id } => {
            state.graph.select(*node_id);
            drain_graph_events(state, cmds);
            true
        }

        Message::DeleteNode { node_id } => {
            match state.graph.delete_node(*node_id) {
                Ok(()) => {}
                Err(e) => debug_log!("delete ignored: {}", e),
            }
            drain_graph_events(state, cmds);
            true
        }

        Message::DeleteSelection => {
            if let Some(id) = state.graph.selected_node_id() {
                let _ = state.graph.delete_node(id);
            }
            drain_graph_events(state, cmds);
            true
        }

        Message::RemoveConnection { connection_id } => {
            match state.graph.disconnect(*connection_id) {
                Ok(()) => {}
                Err(e) => debug_log!("disconnect ignored: {}", e),
            }
            drain_graph_events(state, cmds);
            // The panel's connection list just changed.
            cmds.push(Command::UpdateUI(Box::new(|| {
                if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                    let _ = crate::components::config_panel::refresh(&doc);
                }
            })));
            true
        }

        Message::UpdateNodeConfig {
            node_id,
            key,
            value,
        } => {
            match state.graph.update_node_config(*node_id, key, value.clone()) {
                Ok(()) => {}
                Err(e) => debug_log!("config write ignored: {}", e),
            }
            drain_graph_events(state, cmds);
            true
        }

        Message::ClearCanvas => {
            state.graph.clear();
            state.drag = DragSession::Idle;
            state.hovered_port = None;
            drain_graph_events(state, cmds);
            true
        }

        Message::RequestExport => {
            let artifact = state.exporter.export(&state.graph);
            state.last_export = Some(artifact);
            cmds.push(Command::UpdateUI(Box::new(|| {
                if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                    let _ = crate::ui::render_deploy_output(&doc);
                }
            })));
            toast::success("Deployment snippet generated");
            true
        }

        Message::MarkCanvasDirty => {
            state.mark_dirty();
            true
        }

        Message::AnimationTick => {
            if state.dirty {
                state.dirty = false;
                cmds.push(Command::UpdateUI(Box::new(|| {
                    crate::state::APP_STATE.with(|state_rc| {
                        let state = state_rc.borrow();
                        crate::canvas::renderer::draw(&state);
                    });
                })));
            }
            true
        }

        _ => false,
    }
}

/// Translate store events into UI effects: any change repaints; selection
/// changes additionally rebuild the configuration panel (config edits do
/// not, so typing never loses focus).
fn drain_graph_events(state: &mut AppState, cmds: &mut Vec<Command>) {
    let events = state.graph.take_events();
    if events.is_empty() {
        return;
    }
    state.mark_dirty();
    if events
        .iter()
        .any(|e| matches!(e, GraphEvent::SelectionChanged(_)))
    {
        cmds.push(Command::UpdateUI(Box::new(|| {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                let _ = crate::components::config_panel::refresh(&doc);
            }
        })));
    }
}
