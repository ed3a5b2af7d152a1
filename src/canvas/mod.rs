//! Canvas drawing layer: a read-only projection of the graph store.
//!
//! Nothing in this module owns graph state — every frame is recomputed
//! from the store, so there is no second copy of truth to drift.

pub mod renderer;
pub mod shapes;

use crate::constants::{NODE_HEIGHT, NODE_WIDTH};
use crate::models::NodeInstance;
use crate::registry::NodeTypeDescriptor;

/// Center of input port `port`, spread evenly along the node's top edge.
pub fn input_port_center(
    node: &NodeInstance,
    descriptor: &NodeTypeDescriptor,
    port: usize,
) -> (f64, f64) {
    let x = node.position.x + port_offset(port, descriptor.input_ports);
    (x, node.position.y)
}

/// Center of output port `port`, spread evenly along the node's bottom
/// edge.
pub fn output_port_center(
    node: &NodeInstance,
    descriptor: &NodeTypeDescriptor,
    port: usize,
) -> (f64, f64) {
    let x = node.position.x + port_offset(port, descriptor.output_ports);
    (x, node.position.y + NODE_HEIGHT)
}

fn port_offset(port: usize, count: usize) -> f64 {
    NODE_WIDTH * (port as f64 + 1.0) / (count as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphStore;
    use crate::models::{NodeKind, Position};

    #[test]
    fn single_ports_sit_on_edge_midpoints() {
        let mut graph = GraphStore::with_builtin_registry();
        let id = graph
            .create_node(NodeKind::AgentLlm, Position::new(100.0, 50.0), &[])
            .unwrap();
        let node = graph.node(id).unwrap();
        let descriptor = graph.registry().describe(node.kind).unwrap();

        assert_eq!(
            input_port_center(node, descriptor, 0),
            (100.0 + NODE_WIDTH / 2.0, 50.0)
        );
        assert_eq!(
            output_port_center(node, descriptor, 0),
            (100.0 + NODE_WIDTH / 2.0, 50.0 + NODE_HEIGHT)
        );
    }

    #[test]
    fn multiple_ports_spread_evenly() {
        // Thirds of the edge for a hypothetical two-port side.
        assert_eq!(port_offset(0, 2), NODE_WIDTH / 3.0);
        assert_eq!(port_offset(1, 2), NODE_WIDTH * 2.0 / 3.0);
    }
}
