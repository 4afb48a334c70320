//! Graph abstraction and the default adjacency implementation.
//!
//! # Data layout
//!
//! [`AdjacencyGraph`] stores neighbour lists in **Compressed Sparse Row (CSR)**
//! form.  The neighbours of `NodeId n` occupy
//!
//! ```text
//! adjacency[ offsets[n] .. offsets[n+1] ]
//! ```
//!
//! sorted ascending and free of duplicates, so `neighbors(n)` is a borrowed
//! contiguous slice and uniform neighbour choice is a single index draw.

use ew_core::NodeId;

use crate::{GraphError, GraphResult};

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Read-only view of a static undirected graph.
///
/// Implementations must be pure: the same node always yields the same
/// neighbour slice, in the same order, for the life of the value.  An empty
/// slice is legal and denotes an isolated node.
pub trait Graph {
    /// Number of nodes.  Nodes are `NodeId(0) .. NodeId(node_count - 1)`.
    fn node_count(&self) -> usize;

    /// Neighbours of `node`.
    ///
    /// # Panics
    /// May panic if `node.index() >= node_count()`.
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    /// `true` if `node` has no neighbours.
    #[inline]
    fn is_isolated(&self, node: NodeId) -> bool {
        self.neighbors(node).is_empty()
    }

    #[inline]
    fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    #[inline]
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    #[inline]
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    #[inline]
    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        (**self).neighbors(node)
    }
}

// ── AdjacencyGraph ────────────────────────────────────────────────────────────

/// Undirected graph in CSR format.  Construct with [`GraphBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyGraph {
    /// CSR row pointer.  Length = `node_count + 1`.
    offsets: Vec<u32>,
    /// Concatenated neighbour lists, sorted per node.
    adjacency: Vec<NodeId>,
}

impl AdjacencyGraph {
    /// Build from an undirected edge list in one call.
    pub fn from_edges<I>(node_count: usize, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut b = GraphBuilder::new(node_count);
        for (a, c) in edges {
            b.add_edge(NodeId(a), NodeId(c));
        }
        b.build()
    }

    /// Number of undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        let loops = (0..self.node_count())
            .filter(|&n| {
                let id = NodeId(n as u32);
                self.neighbors(id).binary_search(&id).is_ok()
            })
            .count();
        (self.adjacency.len() - loops) / 2 + loops
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Iterator over every isolated node, ascending.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count() as u32)
            .map(NodeId)
            .filter(|&n| self.is_isolated(n))
    }
}

impl Graph for AdjacencyGraph {
    #[inline]
    fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.offsets[node.index()] as usize;
        let end   = self.offsets[node.index() + 1] as usize;
        &self.adjacency[start..end]
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Collect undirected edges, then call [`build`](Self::build).
///
/// Duplicate edges collapse into one; a self-loop makes a node its own
/// neighbour (a walker there may "move" in place).
///
/// # Example
///
/// ```
/// use ew_core::NodeId;
/// use ew_graph::{Graph, GraphBuilder};
///
/// let mut b = GraphBuilder::new(3);
/// b.add_edge(NodeId(0), NodeId(1));
/// b.add_edge(NodeId(1), NodeId(2));
/// let g = b.build().unwrap();
/// assert_eq!(g.neighbors(NodeId(1)), &[NodeId(0), NodeId(2)]);
/// assert!(g.neighbors(NodeId(0)).len() == 1);
/// ```
pub struct GraphBuilder {
    node_count: usize,
    edges:      Vec<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, edges: Vec::new() }
    }

    pub fn with_capacity(node_count: usize, edges: usize) -> Self {
        Self { node_count, edges: Vec::with_capacity(edges) }
    }

    /// Add an undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.edges.push((a, b));
        self
    }

    pub fn node_count(&self) -> usize { self.node_count }

    /// Validate endpoints and produce the CSR graph.
    ///
    /// Time complexity: O(E log E).
    pub fn build(self) -> GraphResult<AdjacencyGraph> {
        let n = self.node_count;
        if u32::try_from(n).is_err() {
            return Err(GraphError::TooManyNodes(n));
        }

        // Directed half-edges, both directions.
        let mut half: Vec<(NodeId, NodeId)> = Vec::with_capacity(self.edges.len() * 2);
        for (a, b) in self.edges {
            for node in [a, b] {
                if node.index() >= n {
                    return Err(GraphError::NodeOutOfRange { node, node_count: n });
                }
            }
            half.push((a, b));
            if a != b {
                half.push((b, a));
            }
        }
        half.sort_unstable();
        half.dedup();

        let mut offsets = vec![0u32; n + 1];
        for (from, _) in &half {
            offsets[from.index() + 1] += 1;
        }
        for i in 1..=n {
            offsets[i] += offsets[i - 1];
        }
        debug_assert_eq!(offsets[n] as usize, half.len());

        let adjacency = half.into_iter().map(|(_, to)| to).collect();
        Ok(AdjacencyGraph { offsets, adjacency })
    }
}
