// The events that can occur in the editor UI, and the side effects the
// reducers request in response.

use crate::models::{ConfigValue, ConnectionId, NodeId};
use crate::network::project_data::{EmbeddingConfig, ModelConfig};

#[derive(Debug, Clone)]
pub enum Message {
    /// Project model/index lists arrived from the adapter (once per
    /// mount). Failures surface here as empty lists.
    ProjectDataLoaded {
        models: Vec<ModelConfig>,
        indexes: Vec<EmbeddingConfig>,
    },

    /// A palette entry was dropped on the canvas. `kind` is the raw kind
    /// identifier from the drag payload — parsing and registry lookup
    /// happen in the reducer so unknown kinds fail closed with a notice.
    DropPaletteNode {
        kind: String,
        x: f64,
        y: f64,
    },

    // Node body dragging
    StartNodeDrag {
        node_id: NodeId,
        offset_x: f64,
        offset_y: f64,
    },
    UpdateNodePosition {
        node_id: NodeId,
        x: f64,
        y: f64,
    },
    StopNodeDrag,

    // Connection dragging: pointer-down on an output port, release over
    // an input port commits, release anywhere else aborts.
    StartConnectionDrag {
        source: NodeId,
        port: usize,
        start_x: f64,
        start_y: f64,
    },
    UpdateConnectionDrag {
        current_x: f64,
        current_y: f64,
    },
    EndConnectionDrag {
        end_x: f64,
        end_y: f64,
    },

    // Selection
    SelectNode {
        node_id: Option<NodeId>,
    },

    // Node removal
    DeleteNode {
        node_id: NodeId,
    },
    DeleteSelection,

    /// Explicitly remove one connection (the panel lists the selected
    /// node's connections with a remove control).
    RemoveConnection {
        connection_id: ConnectionId,
    },

    /// One config field of one node was edited in the panel. Commits
    /// immediately; there is no draft state.
    UpdateNodeConfig {
        node_id: NodeId,
        key: String,
        value: ConfigValue,
    },

    ClearCanvas,

    /// Toolbar "Deploy" — produce a fresh embed snippet from the graph.
    RequestExport,

    MarkCanvasDirty,
    /// One animation frame elapsed; repaint if anything is dirty.
    AnimationTick,
}

/// Side effects requested by reducers, executed after the state borrow is
/// released.
pub enum Command {
    SendMessage(Message),
    UpdateUI(Box<dyn FnOnce()>),
    NoOp,
}
