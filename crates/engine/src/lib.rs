//! # Codegraph Engine
//!
//! Builds a code graph of a Go codebase: declared entities plus the
//! relationships between them, without type checking.
//!
//! ## Features
//!
//! - **Package discovery** - directory → package from package clauses only
//! - **Declaration extraction** - structs, interfaces, functions, constants, variables
//! - **Method binding** - methods attached to their struct, across files of a package
//! - **Reference resolution** - calls, literals and local declarations become edges
//! - **Deterministic output** - nodes sorted by id, modules sorted by path
//!
//! ## Architecture
//!
//! ```text
//! Go files
//!     │
//!     ├──> Package Discovery (PackageMap)
//!     │
//!     ├──> Extractor (per unit)
//!     │      ├─ allocate ids, create nodes and records
//!     │      ├─ register names (SymbolRegistry)
//!     │      └─ structural edges: embeds, has_field_of_type, declares, has_type
//!     │
//!     ├──> Binder
//!     │      └─ has_method
//!     │
//!     ├──> Resolver (ResolutionStrategy: syntactic | scoped)
//!     │      └─ calls, instantiates, uses
//!     │
//!     └──> Assembler
//!            ├─ nodes sorted by id, edges in insertion order
//!            └─ GraphIndex (petgraph) check and queries
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codegraph_engine::{Analyzer, AnalyzerConfig, Relation};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
//! let out = analyzer
//!     .analyze_sources(&[(
//!         "main.go",
//!         "package main\n\nfunc helper() {}\n\nfunc main() { helper() }\n",
//!     )])
//!     .unwrap();
//!
//! assert_eq!(out.code_graph.nodes.len(), 2);
//! assert_eq!(out.code_graph.edges[0].relation, Relation::Calls);
//! ```

mod analyzer;
mod assembler;
mod binder;
mod config;
mod context;
mod discovery;
mod error;
mod extractor;
mod graph;
mod registry;
mod render;
mod resolver;
mod strategy;
mod types;

pub use analyzer::Analyzer;
pub use assembler::assemble;
pub use binder::bind_methods;
pub use config::{AnalyzerConfig, ResolutionSchedule, StrategyKind};
pub use context::AnalysisContext;
pub use discovery::PackageMap;
pub use error::{EngineError, Result};
pub use extractor::{BodyJob, Extractor, SourceUnit};
pub use graph::GraphIndex;
pub use registry::{StructSlot, SymbolRegistry, TypeTarget};
pub use render::{render, signature};
pub use resolver::resolve_body;
pub use strategy::{LocalScopes, ResolutionStrategy, ScopedStrategy, SyntacticStrategy};
pub use types::{
    CodeGraph, ConstantInfo, Edge, FunctionInfo, IdPrefix, InterfaceInfo, ModuleInfo, Node,
    NodeId, NodeKind, PackageInfo, ParameterInfo, ProjectStructure, PropertyInfo, Relation,
    StructInfo, VariableInfo,
};
