//! Unit tests for ew-graph.

#[cfg(test)]
mod builder {
    use ew_core::NodeId;

    use crate::{AdjacencyGraph, Graph, GraphBuilder, GraphError};

    /// 4-node ring 0-1-2-3-0.
    fn ring4() -> AdjacencyGraph {
        AdjacencyGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new(0).build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn ring_neighbours_are_sorted_and_symmetric() {
        let g = ring4();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1), NodeId(3)]);
        assert_eq!(g.neighbors(NodeId(2)), &[NodeId(1), NodeId(3)]);
        for n in 0..4u32 {
            for &m in g.neighbors(NodeId(n)) {
                assert!(g.neighbors(m).contains(&NodeId(n)));
            }
        }
    }

    #[test]
    fn duplicate_edges_collapse() {
        let g = AdjacencyGraph::from_edges(2, [(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn self_loop_is_its_own_neighbour() {
        let g = AdjacencyGraph::from_edges(2, [(0, 0), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(0), NodeId(1)]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn isolated_nodes_are_reported() {
        let g = AdjacencyGraph::from_edges(4, [(0, 1)]).unwrap();
        let iso: Vec<NodeId> = g.isolated_nodes().collect();
        assert_eq!(iso, vec![NodeId(2), NodeId(3)]);
        assert!(g.is_isolated(NodeId(3)));
        assert_eq!(g.degree(NodeId(0)), 1);
    }

    #[test]
    fn out_of_range_endpoint_errors() {
        let err = AdjacencyGraph::from_edges(3, [(0, 3)]).unwrap_err();
        assert!(matches!(err, GraphError::NodeOutOfRange { node: NodeId(3), node_count: 3 }));
    }

    #[test]
    fn borrowed_graph_is_a_graph() {
        fn count<G: Graph>(g: G) -> usize { g.node_count() }
        let g = ring4();
        assert_eq!(count(&g), 4);
        assert!(g.contains(NodeId(3)));
        assert!(!g.contains(NodeId(4)));
    }
}
