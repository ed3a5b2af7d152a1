//! Property tests for the graph store invariants that must hold for any
//! editing sequence, not just the scripted scenarios.

use proptest::prelude::*;

use crate::graph::{GraphError, GraphStore};
use crate::models::{NodeId, NodeKind, Position};

const KINDS: [NodeKind; 6] = [
    NodeKind::TriggerWebhook,
    NodeKind::TriggerSchedule,
    NodeKind::AgentLlm,
    NodeKind::AgentRetrieval,
    NodeKind::ToolHttp,
    NodeKind::ToolEmail,
];

fn build_graph(kind_indices: &[usize]) -> (GraphStore, Vec<NodeId>) {
    let mut graph = GraphStore::with_builtin_registry();
    let ids = kind_indices
        .iter()
        .map(|i| {
            graph
                .create_node(KINDS[i % KINDS.len()], Position::default(), &[])
                .expect("builtin kinds always create")
        })
        .collect();
    (graph, ids)
}

proptest! {
    /// After deleting any node from an arbitrarily wired graph, no
    /// surviving connection references it and exactly one node is gone.
    #[test]
    fn cascade_delete_leaves_no_dangling_references(
        kind_indices in prop::collection::vec(0usize..KINDS.len(), 2..12),
        edge_picks in prop::collection::vec(
            (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
            0..40,
        ),
        victim_pick in any::<prop::sample::Index>(),
    ) {
        let (mut graph, ids) = build_graph(&kind_indices);

        // Wire arbitrary pairs; invalid attempts (no input ports,
        // self-loops, duplicates) are rejected and must not corrupt
        // anything.
        for (a, b) in &edge_picks {
            let source = ids[a.index(ids.len())];
            let target = ids[b.index(ids.len())];
            let _ = graph.connect(source, 0, target, 0);
        }

        let victim = ids[victim_pick.index(ids.len())];
        let nodes_before = graph.node_count();
        graph.delete_node(victim).expect("victim is live");

        prop_assert_eq!(graph.node_count(), nodes_before - 1);
        prop_assert!(graph
            .connections()
            .all(|c| c.source != victim && c.target != victim));
        // Every surviving connection still resolves to live nodes.
        prop_assert!(graph
            .connections()
            .all(|c| graph.node(c.source).is_some() && graph.node(c.target).is_some()));
    }

    /// Connections behave as a set: replaying the same connect call any
    /// number of times yields one edge and a duplicate signal afterwards.
    #[test]
    fn repeated_connects_are_duplicate_safe(repeats in 2usize..8) {
        let mut graph = GraphStore::with_builtin_registry();
        let trigger = graph
            .create_node(NodeKind::TriggerWebhook, Position::default(), &[])
            .unwrap();
        let agent = graph
            .create_node(NodeKind::AgentLlm, Position::default(), &[])
            .unwrap();

        graph.connect(trigger, 0, agent, 0).unwrap();
        for _ in 1..repeats {
            prop_assert_eq!(
                graph.connect(trigger, 0, agent, 0),
                Err(GraphError::DuplicateConnection)
            );
        }
        prop_assert_eq!(graph.connection_count(), 1);
    }

    /// Node ids are never reused, whatever interleaving of creates and
    /// deletes happens.
    #[test]
    fn ids_stay_unique_across_create_delete_interleavings(
        ops in prop::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut graph = GraphStore::with_builtin_registry();
        let mut live: Vec<NodeId> = Vec::new();
        let mut seen: Vec<NodeId> = Vec::new();

        for create in ops {
            if create || live.is_empty() {
                let id = graph
                    .create_node(NodeKind::ToolHttp, Position::default(), &[])
                    .unwrap();
                prop_assert!(!seen.contains(&id), "id {} was reused", id);
                seen.push(id);
                live.push(id);
            } else {
                let id = live.pop().unwrap();
                graph.delete_node(id).unwrap();
            }
        }
    }
}
