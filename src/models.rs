//! Core data model for the workflow graph editor.
//!
//! Everything in here is plain data: no DOM handles, no rendering state.
//! The canvas layer projects these types onto the screen but never stores
//! a second copy of them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The kinds of workflow steps the editor can place. Dispatch over node
/// kinds is a closed enum resolved through the registry rather than
/// string literals scattered through the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    TriggerWebhook,
    TriggerSchedule,
    AgentLlm,
    AgentRetrieval,
    ToolHttp,
    ToolEmail,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::TriggerWebhook => "trigger-webhook",
            NodeKind::TriggerSchedule => "trigger-schedule",
            NodeKind::AgentLlm => "agent-llm",
            NodeKind::AgentRetrieval => "agent-retrieval",
            NodeKind::ToolHttp => "tool-http",
            NodeKind::ToolEmail => "tool-email",
        }
    }

    /// Parse a kind identifier as carried in palette drag payloads.
    pub fn parse(s: &str) -> Option<NodeKind> {
        match s {
            "trigger-webhook" => Some(NodeKind::TriggerWebhook),
            "trigger-schedule" => Some(NodeKind::TriggerSchedule),
            "agent-llm" => Some(NodeKind::AgentLlm),
            "agent-retrieval" => Some(NodeKind::AgentRetrieval),
            "tool-http" => Some(NodeKind::ToolHttp),
            "tool-email" => Some(NodeKind::ToolEmail),
            _ => None,
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::TriggerWebhook | NodeKind::TriggerSchedule => NodeCategory::Triggers,
            NodeKind::AgentLlm | NodeKind::AgentRetrieval => NodeCategory::Agents,
            NodeKind::ToolHttp | NodeKind::ToolEmail => NodeCategory::Tools,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette grouping for node kinds, rendered in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Triggers,
    Agents,
    Tools,
}

impl NodeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            NodeCategory::Triggers => "Triggers",
            NodeCategory::Agents => "Agents",
            NodeCategory::Tools => "Tools",
        }
    }

    pub fn order(&self) -> usize {
        match self {
            NodeCategory::Triggers => 0,
            NodeCategory::Agents => 1,
            NodeCategory::Tools => 2,
        }
    }
}

/// Node identifier, unique within one graph session. Monotonic so ids are
/// never reused even after deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Connection identifier, same uniqueness rules as [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge-{}", self.0)
    }
}

/// Canvas coordinates at which a node is drawn. Purely cosmetic — moving a
/// node never affects graph semantics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A configuration field value: free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Number(f64),
}

impl ConfigValue {
    pub fn text(s: impl Into<String>) -> Self {
        ConfigValue::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            ConfigValue::Number(_) => None,
        }
    }

    /// String form used to pre-fill input widgets.
    pub fn display(&self) -> String {
        match self {
            ConfigValue::Text(s) => s.clone(),
            ConfigValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

/// Ordered field-name → value mapping. Order is declaration order from the
/// node type's default config; the configuration panel renders fields in
/// exactly this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeConfig {
    entries: Vec<(String, ConfigValue)>,
}

impl NodeConfig {
    pub fn from_pairs(pairs: &[(String, ConfigValue)]) -> Self {
        Self {
            entries: pairs.to_vec(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Overwrite one key, preserving its position; unknown keys are
    /// appended at the end.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a JSON object; key order is preserved by serializing the
// entries in declaration order.
impl Serialize for NodeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A placed workflow step.
#[derive(Debug, Clone, Serialize)]
pub struct NodeInstance {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    pub config: NodeConfig,
}

/// A directed link from one node's output port to another node's input
/// port.
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: NodeId,
    pub source_port: usize,
    pub target: NodeId,
    pub target_port: usize,
}

impl Connection {
    /// Identity tuple used for duplicate detection — connections form a
    /// set, not a multiset.
    pub fn endpoints(&self) -> (NodeId, usize, NodeId, usize) {
        (self.source, self.source_port, self.target, self.target_port)
    }
}

/// A port under the pointer, as resolved by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortRef {
    Input(usize),
    Output(usize),
}
