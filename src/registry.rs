//! Node type registry.
//!
//! A static catalog mapping each [`NodeKind`] to its descriptor: display
//! title, icon, port counts, accent color and default configuration.
//! Built once at startup; read-only afterwards. Adding a kind is a catalog
//! change (or a `register` call before the registry is handed to a graph),
//! not a runtime operation exposed to the end user.

use crate::constants::{ACCENT_AGENT, ACCENT_TOOL, ACCENT_TRIGGER};
use crate::graph::GraphError;
use crate::models::{ConfigValue, NodeKind};

/// Immutable description of one node kind.
#[derive(Debug, Clone)]
pub struct NodeTypeDescriptor {
    pub kind: NodeKind,
    pub title: String,
    pub icon: String,
    pub accent_color: String,
    pub input_ports: usize,
    pub output_ports: usize,
    /// Whether a connection may loop back onto the same node. Off for the
    /// whole builtin catalog.
    pub allows_self_loop: bool,
    pub default_config: Vec<(String, ConfigValue)>,
}

/// Catalog of node type descriptors, in palette display order.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    descriptors: Vec<NodeTypeDescriptor>,
}

impl NodeRegistry {
    /// An empty registry. Useful in tests exercising the unknown-kind
    /// path; production code starts from [`NodeRegistry::builtin`].
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// The builtin catalog shipped with the editor.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for descriptor in builtin_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor. Replaces an existing descriptor for the same
    /// kind so startup code can override catalog entries.
    pub fn register(&mut self, descriptor: NodeTypeDescriptor) {
        if let Some(existing) = self
            .descriptors
            .iter_mut()
            .find(|d| d.kind == descriptor.kind)
        {
            *existing = descriptor;
        } else {
            self.descriptors.push(descriptor);
        }
    }

    pub fn describe(&self, kind: NodeKind) -> Result<&NodeTypeDescriptor, GraphError> {
        self.descriptors
            .iter()
            .find(|d| d.kind == kind)
            .ok_or_else(|| GraphError::UnknownKind(kind.as_str().to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &NodeTypeDescriptor> {
        self.descriptors.iter()
    }
}

fn config(pairs: &[(&str, ConfigValue)]) -> Vec<(String, ConfigValue)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn builtin_descriptors() -> Vec<NodeTypeDescriptor> {
    vec![
        NodeTypeDescriptor {
            kind: NodeKind::TriggerWebhook,
            title: "Webhook Trigger".to_string(),
            icon: "🔗".to_string(),
            accent_color: ACCENT_TRIGGER.to_string(),
            input_ports: 0,
            output_ports: 1,
            allows_self_loop: false,
            default_config: config(&[
                ("path", ConfigValue::text("/hooks/run")),
                ("method", ConfigValue::text("POST")),
            ]),
        },
        NodeTypeDescriptor {
            kind: NodeKind::TriggerSchedule,
            title: "Schedule Trigger".to_string(),
            icon: "⏰".to_string(),
            accent_color: ACCENT_TRIGGER.to_string(),
            input_ports: 0,
            output_ports: 1,
            allows_self_loop: false,
            default_config: config(&[("cron", ConfigValue::text("0 * * * *"))]),
        },
        NodeTypeDescriptor {
            kind: NodeKind::AgentLlm,
            title: "LLM Agent".to_string(),
            icon: "🤖".to_string(),
            accent_color: ACCENT_AGENT.to_string(),
            input_ports: 1,
            output_ports: 1,
            allows_self_loop: false,
            default_config: config(&[
                ("model", ConfigValue::text("")),
                (
                    "system_prompt",
                    ConfigValue::text("You are a helpful assistant."),
                ),
                ("temperature", ConfigValue::Number(0.7)),
            ]),
        },
        NodeTypeDescriptor {
            kind: NodeKind::AgentRetrieval,
            title: "Retrieval Agent".to_string(),
            icon: "📚".to_string(),
            accent_color: ACCENT_AGENT.to_string(),
            input_ports: 1,
            output_ports: 1,
            allows_self_loop: false,
            default_config: config(&[
                ("model", ConfigValue::text("")),
                ("index", ConfigValue::text("")),
                ("top_k", ConfigValue::Number(4.0)),
            ]),
        },
        NodeTypeDescriptor {
            kind: NodeKind::ToolHttp,
            title: "HTTP Request".to_string(),
            icon: "🌐".to_string(),
            accent_color: ACCENT_TOOL.to_string(),
            input_ports: 1,
            output_ports: 1,
            allows_self_loop: false,
            default_config: config(&[
                ("url", ConfigValue::text("https://")),
                ("method", ConfigValue::text("GET")),
            ]),
        },
        NodeTypeDescriptor {
            kind: NodeKind::ToolEmail,
            title: "Send Email".to_string(),
            icon: "📧".to_string(),
            accent_color: ACCENT_TOOL.to_string(),
            input_ports: 1,
            output_ports: 0,
            allows_self_loop: false,
            default_config: config(&[
                ("to", ConfigValue::text("")),
                ("subject", ConfigValue::text("")),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_describes_every_kind() {
        let registry = NodeRegistry::builtin();
        for kind in [
            NodeKind::TriggerWebhook,
            NodeKind::TriggerSchedule,
            NodeKind::AgentLlm,
            NodeKind::AgentRetrieval,
            NodeKind::ToolHttp,
            NodeKind::ToolEmail,
        ] {
            assert!(registry.describe(kind).is_ok(), "missing {}", kind);
        }
    }

    #[test]
    fn triggers_have_no_input_ports() {
        let registry = NodeRegistry::builtin();
        for kind in [NodeKind::TriggerWebhook, NodeKind::TriggerSchedule] {
            let descriptor = registry.describe(kind).unwrap();
            assert_eq!(descriptor.input_ports, 0);
            assert!(descriptor.output_ports > 0);
        }
    }

    #[test]
    fn empty_registry_reports_unknown_kind() {
        let registry = NodeRegistry::empty();
        let err = registry.describe(NodeKind::AgentLlm).unwrap_err();
        assert_eq!(err, GraphError::UnknownKind("agent-llm".to_string()));
    }

    #[test]
    fn register_replaces_same_kind() {
        let mut registry = NodeRegistry::builtin();
        let count_before = registry.descriptors().count();
        let mut custom = registry.describe(NodeKind::ToolHttp).unwrap().clone();
        custom.title = "Custom HTTP".to_string();
        registry.register(custom);
        assert_eq!(registry.descriptors().count(), count_before);
        assert_eq!(
            registry.describe(NodeKind::ToolHttp).unwrap().title,
            "Custom HTTP"
        );
    }
}
