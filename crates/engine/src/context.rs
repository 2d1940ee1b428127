use crate::registry::SymbolRegistry;
use crate::types::{Edge, ModuleInfo, Node, NodeId, NodeKind, Relation};
use std::collections::{BTreeMap, HashMap};

/// All graph state of one analysis run
///
/// Created empty, threaded through every phase by `&mut`, and consumed by the
/// assembler.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub registry: SymbolRegistry,
    nodes: HashMap<NodeId, Node>,
    edges: Vec<Edge>,
    /// Module records keyed by path relative to the project root
    pub modules: BTreeMap<String, ModuleInfo>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
    ) {
        let node = Node {
            id,
            kind,
            name: name.into(),
            package: package.into(),
            file: file.into(),
        };
        log::trace!("node {} {:?} {}", node.id, node.kind, node.name);
        self.nodes.insert(id, node);
    }

    /// Append an edge; refused when either endpoint is not a node yet
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, relation: Relation) -> bool {
        if !self.nodes.contains_key(&from) || !self.nodes.contains_key(&to) {
            log::warn!("Refusing {relation:?} edge {from} -> {to}: unknown endpoint");
            return false;
        }
        self.edges.push(Edge { from, to, relation });
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Split into nodes (unordered), edges and module records
    pub(crate) fn into_parts(
        self,
    ) -> (
        HashMap<NodeId, Node>,
        Vec<Edge>,
        BTreeMap<String, ModuleInfo>,
    ) {
        (self.nodes, self.edges, self.modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdPrefix;

    #[test]
    fn refuses_edges_with_unknown_endpoints() {
        let mut ctx = AnalysisContext::new();
        let a = ctx.registry.allocate(IdPrefix::Func);
        let b = ctx.registry.allocate(IdPrefix::Func);
        ctx.add_node(a, NodeKind::Function, "a", "main", "main.go");

        assert!(!ctx.add_edge(a, b, Relation::Calls));
        assert!(ctx.edges().is_empty());

        ctx.add_node(b, NodeKind::Function, "b", "main", "main.go");
        assert!(ctx.add_edge(a, b, Relation::Calls));
        assert!(ctx.add_edge(a, b, Relation::Calls));
        assert_eq!(ctx.edges().len(), 2);
    }
}
