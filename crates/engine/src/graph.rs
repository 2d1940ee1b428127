use crate::error::{EngineError, Result};
use crate::types::{CodeGraph, NodeId, Relation};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Queryable view of a [`CodeGraph`]
pub struct GraphIndex {
    /// Directed graph (node id -> node id with relation)
    graph: DiGraph<NodeId, Relation>,

    /// Node id -> NodeIndex mapping for fast lookup
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphIndex {
    /// Index a graph, failing on the first edge whose endpoint is not a node
    pub fn build(code_graph: &CodeGraph) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(code_graph.nodes.len(), code_graph.edges.len());
        let mut index = HashMap::with_capacity(code_graph.nodes.len());

        for node in &code_graph.nodes {
            index.insert(node.id, graph.add_node(node.id));
        }

        for edge in &code_graph.edges {
            match (index.get(&edge.from), index.get(&edge.to)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, edge.relation);
                }
                _ => {
                    return Err(EngineError::DanglingEdge {
                        from: edge.from,
                        to: edge.to,
                        relation: edge.relation,
                    })
                }
            }
        }

        Ok(Self { graph, index })
    }

    /// Find all nodes that `id` calls (outgoing Calls edges)
    pub fn callees(&self, id: NodeId) -> Vec<NodeId> {
        self.related(id, Relation::Calls, Direction::Outgoing)
    }

    /// Find all nodes that call `id` (incoming Calls edges)
    pub fn callers(&self, id: NodeId) -> Vec<NodeId> {
        self.related(id, Relation::Calls, Direction::Incoming)
    }

    /// Targets of outgoing edges with the given relation
    pub fn targets(&self, id: NodeId, relation: Relation) -> Vec<NodeId> {
        self.related(id, relation, Direction::Outgoing)
    }

    /// Sources of incoming edges with the given relation
    pub fn sources(&self, id: NodeId, relation: Relation) -> Vec<NodeId> {
        self.related(id, relation, Direction::Incoming)
    }

    /// Neighbours over one relation, deduplicated and sorted by id
    fn related(&self, id: NodeId, relation: Relation, direction: Direction) -> Vec<NodeId> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|e| *e.weight() == relation)
            .map(|e| match direction {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            })
            .map(|n| self.graph[n])
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
