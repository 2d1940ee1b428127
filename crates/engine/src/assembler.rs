use crate::context::AnalysisContext;
use crate::error::Result;
use crate::graph::GraphIndex;
use crate::types::{CodeGraph, PackageInfo, ProjectStructure};
use std::collections::BTreeMap;

/// Turn the finished context into the output document
///
/// Nodes are ordered by identifier, edges keep insertion order, and the graph
/// is verified for dangling endpoints before it is returned.
pub fn assemble(ctx: AnalysisContext, project_name: &str) -> Result<ProjectStructure> {
    let (nodes, edges, modules) = ctx.into_parts();

    let mut nodes: Vec<_> = nodes.into_values().collect();
    nodes.sort_by_key(|node| node.id);
    let code_graph = CodeGraph { nodes, edges };

    let index = GraphIndex::build(&code_graph)?;
    let structural = code_graph
        .edges
        .iter()
        .filter(|edge| edge.relation.is_structural())
        .count();
    log::info!(
        "Built code graph: {} nodes, {} edges ({} structural, {} behavioral)",
        index.node_count(),
        index.edge_count(),
        structural,
        index.edge_count() - structural
    );

    let mut project = BTreeMap::new();
    project.insert(project_name.to_string(), PackageInfo { modules });

    Ok(ProjectStructure {
        project,
        code_graph,
    })
}
