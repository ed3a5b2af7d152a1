//! Graph store — the authoritative in-memory representation of the
//! workflow being edited.
//!
//! The store owns every node instance and connection for one editing
//! session plus the exclusive selection. The canvas and the configuration
//! panel are projections of this state; neither keeps a copy of it.
//!
//! All mutations are synchronous and happen on the UI thread via the
//! reducer layer. The store itself knows nothing about the DOM, which is
//! what lets the whole invariant suite run as native unit tests.

use crate::models::{
    ConfigValue, Connection, ConnectionId, NodeConfig, NodeId, NodeInstance, NodeKind, Position,
};
use crate::registry::NodeRegistry;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Recoverable failure conditions signaled back to the canvas layer.
/// None of these may abort the editing session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),
    #[error("{0} not found")]
    NodeNotFound(NodeId),
    #[error("{0} not found")]
    ConnectionNotFound(ConnectionId),
    #[error("{side} port {port} out of range for {node} ({count} ports)")]
    PortOutOfRange {
        node: NodeId,
        side: &'static str,
        port: usize,
        count: usize,
    },
    #[error("identical connection already exists")]
    DuplicateConnection,
    #[error("self-loops are not allowed for `{0}`")]
    SelfLoopDisallowed(NodeKind),
}

/// Change notifications accumulated by the store and drained by the
/// reducer after each mutation batch.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    NodeCreated(NodeId),
    NodeDeleted(NodeId),
    NodeConfigChanged(NodeId),
    ConnectionCreated(ConnectionId),
    ConnectionRemoved(ConnectionId),
    SelectionChanged(Option<NodeId>),
}

/// Serializable view of the graph used by debug hooks and (eventually)
/// full-topology export.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeInstance>,
    pub connections: Vec<Connection>,
}

pub struct GraphStore {
    registry: NodeRegistry,
    nodes: HashMap<NodeId, NodeInstance>,
    connections: Vec<Connection>,
    selected: Option<NodeId>,
    next_node_id: u64,
    next_connection_id: u64,
    events: Vec<GraphEvent>,
}

impl GraphStore {
    pub fn new(registry: NodeRegistry) -> Self {
        Self {
            registry,
            nodes: HashMap::new(),
            connections: Vec::new(),
            selected: None,
            next_node_id: 1,
            next_connection_id: 1,
            events: Vec::new(),
        }
    }

    pub fn with_builtin_registry() -> Self {
        Self::new(NodeRegistry::builtin())
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&NodeInstance> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeInstance> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections with the given node as source or target.
    pub fn connections_of(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| c.source == id || c.target == id)
    }

    pub fn selected_node_id(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&NodeInstance> {
        self.selected.and_then(|id| self.nodes.get(&id))
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<NodeInstance> = self.nodes.values().cloned().collect();
        nodes.sort_by_key(|n| n.id);
        GraphSnapshot {
            nodes,
            connections: self.connections.clone(),
        }
    }

    /// Drain the events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Instantiate a node of `kind` at `position`. The node's config is
    /// seeded from the descriptor's defaults, then `overrides` win per
    /// key (unknown override keys are appended).
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        position: Position,
        overrides: &[(String, ConfigValue)],
    ) -> Result<NodeId, GraphError> {
        let descriptor = self.registry.describe(kind)?;
        let mut config = NodeConfig::from_pairs(&descriptor.default_config);
        for (key, value) in overrides {
            config.set(key, value.clone());
        }

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(
            id,
            NodeInstance {
                id,
                kind,
                position,
                config,
            },
        );
        self.events.push(GraphEvent::NodeCreated(id));
        Ok(id)
    }

    /// Move a node. Incident connections follow at the next repaint; the
    /// position carries no graph semantics.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.position = position;
        Ok(())
    }

    /// Overwrite exactly one config key. The store performs no value
    /// validation — constraining input by field semantics is the
    /// configuration panel's job.
    pub fn update_node_config(
        &mut self,
        id: NodeId,
        key: &str,
        value: ConfigValue,
    ) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.config.set(key, value);
        self.events.push(GraphEvent::NodeConfigChanged(id));
        Ok(())
    }

    /// Connect `source`'s output port to `target`'s input port.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_port: usize,
        target: NodeId,
        target_port: usize,
    ) -> Result<ConnectionId, GraphError> {
        let source_node = self
            .nodes
            .get(&source)
            .ok_or(GraphError::NodeNotFound(source))?;
        let target_node = self
            .nodes
            .get(&target)
            .ok_or(GraphError::NodeNotFound(target))?;

        let source_desc = self.registry.describe(source_node.kind)?;
        let target_desc = self.registry.describe(target_node.kind)?;

        if source_port >= source_desc.output_ports {
            return Err(GraphError::PortOutOfRange {
                node: source,
                side: "output",
                port: source_port,
                count: source_desc.output_ports,
            });
        }
        if target_port >= target_desc.input_ports {
            return Err(GraphError::PortOutOfRange {
                node: target,
                side: "input",
                port: target_port,
                count: target_desc.input_ports,
            });
        }
        if source == target && !source_desc.allows_self_loop {
            return Err(GraphError::SelfLoopDisallowed(source_node.kind));
        }

        let endpoints = (source, source_port, target, target_port);
        if self.connections.iter().any(|c| c.endpoints() == endpoints) {
            return Err(GraphError::DuplicateConnection);
        }

        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        self.connections.push(Connection {
            id,
            source,
            source_port,
            target,
            target_port,
        });
        self.events.push(GraphEvent::ConnectionCreated(id));
        Ok(id)
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or(GraphError::ConnectionNotFound(id))?;
        self.connections.remove(index);
        self.events.push(GraphEvent::ConnectionRemoved(id));
        Ok(())
    }

    /// Remove a node, cascading to every connection that references it so
    /// no dangling endpoint can survive. Clears the selection if the
    /// deleted node was selected.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        if self.nodes.remove(&id).is_none() {
            return Err(GraphError::NodeNotFound(id));
        }
        let mut removed = Vec::new();
        self.connections.retain(|c| {
            let incident = c.source == id || c.target == id;
            if incident {
                removed.push(c.id);
            }
            !incident
        });
        for connection_id in removed {
            self.events.push(GraphEvent::ConnectionRemoved(connection_id));
        }
        if self.selected == Some(id) {
            self.selected = None;
            self.events.push(GraphEvent::SelectionChanged(None));
        }
        self.events.push(GraphEvent::NodeDeleted(id));
        Ok(())
    }

    /// Set the exclusive selection. Always succeeds; selecting an id that
    /// is not live is treated as clearing the selection.
    pub fn select(&mut self, id: Option<NodeId>) {
        let effective = id.filter(|id| self.nodes.contains_key(id));
        if effective != self.selected {
            self.selected = effective;
            self.events.push(GraphEvent::SelectionChanged(effective));
        }
    }

    /// Discard every node, connection and the selection. Used when the
    /// editing session is reset; ids are not reused afterwards.
    pub fn clear(&mut self) {
        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in node_ids {
            let _ = self.delete_node(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GraphStore {
        GraphStore::with_builtin_registry()
    }

    #[test]
    fn created_node_config_keys_match_defaults_exactly() {
        let mut graph = store();
        for descriptor in NodeRegistry::builtin().descriptors() {
            let id = graph
                .create_node(descriptor.kind, Position::default(), &[])
                .unwrap();
            let node = graph.node(id).unwrap();
            let expected: Vec<&str> = descriptor
                .default_config
                .iter()
                .map(|(k, _)| k.as_str())
                .collect();
            let actual: Vec<&str> = node.config.keys().collect();
            assert_eq!(actual, expected, "config keys for {}", descriptor.kind);
        }
    }

    #[test]
    fn overrides_win_per_key_and_preserve_order() {
        let mut graph = store();
        let id = graph
            .create_node(
                NodeKind::AgentLlm,
                Position::default(),
                &[("model".to_string(), ConfigValue::text("gpt-4o"))],
            )
            .unwrap();
        let node = graph.node(id).unwrap();
        assert_eq!(
            node.config.get("model"),
            Some(&ConfigValue::text("gpt-4o"))
        );
        // Non-overridden keys keep their defaults.
        assert_eq!(
            node.config.get("system_prompt"),
            Some(&ConfigValue::text("You are a helpful assistant."))
        );
        assert_eq!(node.config.keys().next(), Some("model"));
    }

    #[test]
    fn unknown_kind_leaves_graph_unchanged() {
        // A kind string arriving from a stale drag payload parses to
        // nothing; a typed kind against a registry that lacks it errors.
        assert_eq!(NodeKind::parse("agent-ghost"), None);

        let mut graph = GraphStore::new(NodeRegistry::empty());
        let err = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownKind("agent-llm".to_string()));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn move_node_is_cosmetic() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::new(10.0, 10.0), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::new(300.0, 10.0), &[])
            .unwrap();
        graph.connect(trigger, 0, agent, 0).unwrap();

        graph.move_node(trigger, Position::new(500.0, 500.0)).unwrap();
        assert_eq!(graph.node(trigger).unwrap().position, Position::new(500.0, 500.0));
        assert_eq!(graph.connection_count(), 1);

        let missing = NodeId(999);
        assert_eq!(
            graph.move_node(missing, Position::default()),
            Err(GraphError::NodeNotFound(missing))
        );
    }

    #[test]
    fn config_update_touches_exactly_one_key() {
        let mut graph = store();
        let id = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        graph
            .update_node_config(id, "model", ConfigValue::text("gpt-4"))
            .unwrap();
        let node = graph.node(id).unwrap();
        assert_eq!(node.config.get("model"), Some(&ConfigValue::text("gpt-4")));
        assert_eq!(
            node.config.get("system_prompt"),
            Some(&ConfigValue::text("You are a helpful assistant."))
        );
        assert_eq!(node.config.get("temperature"), Some(&ConfigValue::Number(0.7)));
        assert_eq!(node.config.len(), 3);
    }

    #[test]
    fn connect_rejects_duplicates_but_keeps_first() {
        let mut graph = store();
        let a = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let b = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        graph.connect(a, 0, b, 0).unwrap();
        assert_eq!(
            graph.connect(a, 0, b, 0),
            Err(GraphError::DuplicateConnection)
        );
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn connect_validates_port_ranges() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();

        // Trigger has a single output port.
        assert!(matches!(
            graph.connect(trigger, 1, agent, 0),
            Err(GraphError::PortOutOfRange { side: "output", port: 1, .. })
        ));
        // Trigger has no input ports, so nothing can target it.
        assert!(matches!(
            graph.connect(agent, 0, trigger, 0),
            Err(GraphError::PortOutOfRange { side: "input", .. })
        ));
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn self_loops_rejected_unless_descriptor_allows() {
        let mut graph = store();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        assert_eq!(
            graph.connect(agent, 0, agent, 0),
            Err(GraphError::SelfLoopDisallowed(NodeKind::AgentLlm))
        );

        let mut registry = NodeRegistry::builtin();
        let mut looping = registry.describe(NodeKind::AgentLlm).unwrap().clone();
        looping.allows_self_loop = true;
        registry.register(looping);
        let mut graph = GraphStore::new(registry);
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        assert!(graph.connect(agent, 0, agent, 0).is_ok());
    }

    #[test]
    fn delete_cascades_and_second_delete_reports_not_found() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::new(100.0, 250.0), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::new(450.0, 250.0), &[])
            .unwrap();
        graph.connect(trigger, 0, agent, 0).unwrap();
        assert_eq!((graph.node_count(), graph.connection_count()), (2, 1));

        graph.delete_node(trigger).unwrap();
        assert_eq!((graph.node_count(), graph.connection_count()), (1, 0));
        assert!(graph.connections_of(trigger).next().is_none());

        assert_eq!(
            graph.delete_node(trigger),
            Err(GraphError::NodeNotFound(trigger))
        );
    }

    #[test]
    fn disconnect_removes_only_the_named_connection() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let llm = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        let rag = graph
            .create_node(NodeKind::AgentRetrieval, Position::default(), &[])
            .unwrap();
        let first = graph.connect(trigger, 0, llm, 0).unwrap();
        graph.connect(llm, 0, rag, 0).unwrap();

        graph.disconnect(first).unwrap();
        assert_eq!(graph.connection_count(), 1);
        assert_eq!(
            graph.disconnect(first),
            Err(GraphError::ConnectionNotFound(first))
        );
    }

    #[test]
    fn selection_is_exclusive_and_guards_dead_ids() {
        let mut graph = store();
        let a = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let b = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();

        graph.select(Some(a));
        graph.select(Some(b));
        assert_eq!(graph.selected_node_id(), Some(b));

        graph.select(None);
        assert_eq!(graph.selected_node_id(), None);

        // Selecting an id that never existed, or no longer exists, is "no
        // selection" rather than an error.
        graph.select(Some(NodeId(404)));
        assert_eq!(graph.selected_node_id(), None);

        graph.select(Some(a));
        graph.delete_node(a).unwrap();
        assert_eq!(graph.selected_node_id(), None);
    }

    #[test]
    fn node_ids_stay_unique_across_deletes() {
        let mut graph = store();
        let a = graph
            .create_node(NodeKind::ToolHttp, Position::default(), &[])
            .unwrap();
        graph.delete_node(a).unwrap();
        let b = graph
            .create_node(NodeKind::ToolHttp, Position::default(), &[])
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn events_report_mutations_in_order() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        let edge = graph.connect(trigger, 0, agent, 0).unwrap();
        graph.select(Some(agent));
        graph
            .update_node_config(agent, "model", ConfigValue::text("gpt-4"))
            .unwrap();

        let events = graph.take_events();
        assert_eq!(
            events,
            vec![
                GraphEvent::NodeCreated(trigger),
                GraphEvent::NodeCreated(agent),
                GraphEvent::ConnectionCreated(edge),
                GraphEvent::SelectionChanged(Some(agent)),
                GraphEvent::NodeConfigChanged(agent),
            ]
        );
        assert!(graph.take_events().is_empty());
    }

    #[test]
    fn clear_empties_the_graph() {
        let mut graph = store();
        let trigger = graph
            .create_node(NodeKind::TriggerSchedule, Position::default(), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentRetrieval, Position::default(), &[])
            .unwrap();
        graph.connect(trigger, 0, agent, 0).unwrap();
        graph.select(Some(agent));

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.selected_node_id(), None);
    }

    #[test]
    fn snapshot_orders_nodes_by_id() {
        let mut graph = store();
        let first = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let second = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();
        let snapshot = graph.snapshot();
        let ids: Vec<NodeId> = snapshot.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first, second]);
    }
}
