//! Deployment snippet serializer.
//!
//! Converts the current graph into the externally consumable artifact: an
//! embeddable `<script>` tag carrying a freshly generated opaque agent id.
//! The id is regenerated on every export and is not derived from graph
//! content, so re-exporting an unchanged graph yields a different id.
//!
//! The artifact does not yet embed the graph topology; the exporter still
//! takes the whole store as input so that contract stays stable when
//! full-graph export lands.

use crate::graph::GraphStore;
use uuid::Uuid;

/// Source of opaque export identifiers. Injected so tests can supply a
/// deterministic sequence instead of process-wide randomness.
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

/// Production generator: random UUIDv4 without hyphens.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Opaque identifier, `AGENT_` prefixed.
    pub agent_id: String,
    /// Copy-pasteable embed snippet for the page shell.
    pub snippet: String,
}

pub struct SnippetExporter<G = UuidIdGenerator> {
    id_gen: G,
    cdn_host: String,
}

impl SnippetExporter<UuidIdGenerator> {
    pub fn new(cdn_host: impl Into<String>) -> Self {
        Self::with_id_generator(UuidIdGenerator, cdn_host)
    }
}

impl<G: IdGenerator> SnippetExporter<G> {
    pub fn with_id_generator(id_gen: G, cdn_host: impl Into<String>) -> Self {
        Self {
            id_gen,
            cdn_host: normalize_host(cdn_host.into()),
        }
    }

    pub fn export(&mut self, graph: &GraphStore) -> ExportArtifact {
        let agent_id = format!("AGENT_{}", self.id_gen.generate());
        // The topology is not part of the payload yet; log the shape so
        // exports are traceable in the console.
        crate::debug_log!(
            "export: {} nodes / {} connections -> {}",
            graph.node_count(),
            graph.connection_count(),
            agent_id
        );
        let snippet = format!(
            r#"<script src="{}/widget.js" data-agent-id="{}" async></script>"#,
            self.cdn_host, agent_id
        );
        ExportArtifact { agent_id, snippet }
    }
}

fn normalize_host(host: String) -> String {
    host.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphStore;
    use crate::models::{NodeKind, Position};

    struct CountingIds(u32);

    impl IdGenerator for CountingIds {
        fn generate(&mut self) -> String {
            self.0 += 1;
            format!("fixed{:04}", self.0)
        }
    }

    #[test]
    fn snippet_embeds_prefixed_id_and_host() {
        let mut exporter =
            SnippetExporter::with_id_generator(CountingIds(0), "https://cdn.example.com/");
        let graph = GraphStore::with_builtin_registry();
        let artifact = exporter.export(&graph);
        assert_eq!(artifact.agent_id, "AGENT_fixed0001");
        assert_eq!(
            artifact.snippet,
            r#"<script src="https://cdn.example.com/widget.js" data-agent-id="AGENT_fixed0001" async></script>"#
        );
    }

    #[test]
    fn every_export_generates_a_fresh_id_for_unchanged_graph() {
        let mut exporter = SnippetExporter::with_id_generator(CountingIds(0), "https://cdn.x");
        let mut graph = GraphStore::with_builtin_registry();
        graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let first = exporter.export(&graph);
        let second = exporter.export(&graph);
        assert_ne!(first.agent_id, second.agent_id);
    }
}
