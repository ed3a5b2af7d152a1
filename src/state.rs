//! Global application state for the editor session.
//!
//! The graph store is the single source of truth; everything else in here
//! is per-session UI state (drag machine, hover, cached project data,
//! canvas handles). All mutation goes through [`AppState::dispatch`] and
//! the reducer layer.

use std::cell::RefCell;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::{input_port_center, output_port_center};
use crate::constants::{
    DEFAULT_CDN_HOST, NODE_HEIGHT, NODE_WIDTH, PORT_HIT_RADIUS,
};
use crate::export::{ExportArtifact, SnippetExporter};
use crate::graph::GraphStore;
use crate::messages::{Command, Message};
use crate::models::{ConfigValue, NodeId, NodeKind, PortRef};
use crate::network::project_data::{EmbeddingConfig, ModelConfig};
use crate::update;

/// Interaction state machine for a single pointer gesture. Exactly one
/// session is active at a time; an aborted session leaves the graph store
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSession {
    Idle,
    /// Moving a node body; offsets keep the grab point under the pointer.
    DragNode {
        node_id: NodeId,
        offset_x: f64,
        offset_y: f64,
    },
    /// Drawing a connection from an output port; the current pointer
    /// position feeds the preview line.
    ConnectFrom {
        source: NodeId,
        port: usize,
        current_x: f64,
        current_y: f64,
    },
}

pub struct AppState {
    pub graph: GraphStore,

    // Canvas and rendering
    pub canvas: Option<HtmlCanvasElement>,
    pub context: Option<CanvasRenderingContext2d>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Repaint requested; drained once per animation frame.
    pub dirty: bool,

    // Pointer interaction
    pub drag: DragSession,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub hovered_port: Option<(NodeId, PortRef)>,

    // Most recent adapter snapshot; empty until the mount-time fetch
    // resolves (or forever, if it failed).
    pub project_models: Vec<ModelConfig>,
    pub project_indexes: Vec<EmbeddingConfig>,

    pub exporter: SnippetExporter,
    pub last_export: Option<ExportArtifact>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            graph: GraphStore::with_builtin_registry(),
            canvas: None,
            context: None,
            canvas_width: 800.0,
            canvas_height: 600.0,
            dirty: false,
            drag: DragSession::Idle,
            mouse_x: 0.0,
            mouse_y: 0.0,
            hovered_port: None,
            project_models: Vec::new(),
            project_indexes: Vec::new(),
            exporter: SnippetExporter::new(DEFAULT_CDN_HOST),
            last_export: None,
        }
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update::update(self, msg)
    }

    /// Mark the canvas as needing a repaint on the next animation frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------

    /// Topmost node whose body contains (x, y), with the grab offset from
    /// the node's top-left corner. Later-created nodes win overlaps.
    pub fn find_node_at_position(&self, x: f64, y: f64) -> Option<(NodeId, f64, f64)> {
        self.graph
            .nodes()
            .filter(|node| {
                x >= node.position.x
                    && x <= node.position.x + NODE_WIDTH
                    && y >= node.position.y
                    && y <= node.position.y + NODE_HEIGHT
            })
            .max_by_key(|node| node.id)
            .map(|node| (node.id, x - node.position.x, y - node.position.y))
    }

    /// Port circle under (x, y), if any. Inputs sit along the top edge,
    /// outputs along the bottom edge.
    pub fn find_port_at_position(&self, x: f64, y: f64) -> Option<(NodeId, PortRef)> {
        for node in self.graph.nodes() {
            let descriptor = match self.graph.registry().describe(node.kind) {
                Ok(d) => d,
                Err(_) => continue,
            };
            for port in 0..descriptor.input_ports {
                let (px, py) = input_port_center(node, descriptor, port);
                if hit(px, py, x, y) {
                    return Some((node.id, PortRef::Input(port)));
                }
            }
            for port in 0..descriptor.output_ports {
                let (px, py) = output_port_center(node, descriptor, port);
                if hit(px, py, x, y) {
                    return Some((node.id, PortRef::Output(port)));
                }
            }
        }
        None
    }

    /// Track the pointer for port hover highlights; repaints only when the
    /// hover target changes.
    pub fn update_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_x = x;
        self.mouse_y = y;
        let hovered = self.find_port_at_position(x, y);
        if self.hovered_port != hovered {
            self.hovered_port = hovered;
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------
    // Creation defaults
    // -------------------------------------------------------------------

    /// Creation-time overrides resolved from the most recent project data
    /// snapshot: the first configured model for a `model` field, the
    /// first embedding pipeline for an `index` field. With no snapshot
    /// the placeholders from the catalog remain.
    pub fn live_default_overrides(&self, kind: NodeKind) -> Vec<(String, ConfigValue)> {
        let Ok(descriptor) = self.graph.registry().describe(kind) else {
            return Vec::new();
        };
        let mut overrides = Vec::new();
        let has_key = |key: &str| descriptor.default_config.iter().any(|(k, _)| k == key);
        if has_key("model") {
            if let Some(first) = self.project_models.first() {
                overrides.push(("model".to_string(), ConfigValue::text(first.model.clone())));
            }
        }
        if has_key("index") {
            if let Some(first) = self.project_indexes.first() {
                overrides.push(("index".to_string(), ConfigValue::text(first.id.clone())));
            }
        }
        overrides
    }
}

fn hit(px: f64, py: f64, x: f64, y: f64) -> bool {
    let dx = x - px;
    let dy = y - py;
    dx * dx + dy * dy <= PORT_HIT_RADIUS * PORT_HIT_RADIUS
}

// We use thread_local to store the app state: the editor is strictly
// single-threaded and every mutation happens on the UI thread.
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Dispatch a message against the global state, then execute the commands
/// the reducers requested once the state borrow has been released.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.dispatch(msg)
    });

    for cmd in commands {
        match cmd {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::UpdateUI(ui_fn) => ui_fn(),
            Command::NoOp => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn node_hit_testing_returns_grab_offset() {
        let mut state = AppState::new();
        let id = state
            .graph
            .create_node(NodeKind::AgentLlm, Position::new(100.0, 100.0), &[])
            .unwrap();

        let (hit_id, off_x, off_y) = state.find_node_at_position(110.0, 130.0).unwrap();
        assert_eq!(hit_id, id);
        assert_eq!((off_x, off_y), (10.0, 30.0));

        assert!(state.find_node_at_position(10.0, 10.0).is_none());
    }

    #[test]
    fn overlapping_nodes_resolve_to_the_later_one() {
        let mut state = AppState::new();
        let _bottom = state
            .graph
            .create_node(NodeKind::AgentLlm, Position::new(100.0, 100.0), &[])
            .unwrap();
        let top = state
            .graph
            .create_node(NodeKind::ToolHttp, Position::new(120.0, 110.0), &[])
            .unwrap();
        let (hit_id, _, _) = state.find_node_at_position(150.0, 140.0).unwrap();
        assert_eq!(hit_id, top);
    }

    #[test]
    fn port_hit_testing_distinguishes_sides() {
        let mut state = AppState::new();
        let id = state
            .graph
            .create_node(NodeKind::AgentLlm, Position::new(0.0, 0.0), &[])
            .unwrap();

        // Single input port sits centered on the top edge.
        assert_eq!(
            state.find_port_at_position(NODE_WIDTH / 2.0, 0.0),
            Some((id, PortRef::Input(0)))
        );
        // Single output port sits centered on the bottom edge.
        assert_eq!(
            state.find_port_at_position(NODE_WIDTH / 2.0, NODE_HEIGHT),
            Some((id, PortRef::Output(0)))
        );
        assert_eq!(state.find_port_at_position(500.0, 500.0), None);
    }

    #[test]
    fn live_defaults_fill_model_and_index_from_snapshot() {
        let mut state = AppState::new();
        state.project_models = vec![ModelConfig {
            id: "mc-1".to_string(),
            model: "gpt-4o".to_string(),
            system_prompt: None,
        }];
        state.project_indexes = vec![EmbeddingConfig {
            id: "emb-7".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }];

        let overrides = state.live_default_overrides(NodeKind::AgentRetrieval);
        assert_eq!(
            overrides,
            vec![
                ("model".to_string(), ConfigValue::text("gpt-4o")),
                ("index".to_string(), ConfigValue::text("emb-7")),
            ]
        );

        // Kinds without those keys get no overrides.
        assert!(state
            .live_default_overrides(NodeKind::TriggerWebhook)
            .is_empty());
    }

    #[test]
    fn live_defaults_empty_when_adapter_failed() {
        let state = AppState::new();
        assert!(state.live_default_overrides(NodeKind::AgentLlm).is_empty());
    }
}
