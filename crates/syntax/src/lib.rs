//! # Codegraph Syntax
//!
//! Go source units as a closed, owned syntax tree.
//!
//! ## Architecture
//!
//! ```text
//! Go source
//!     │
//!     ├──> Package clause scan (regex, no full parse)
//!     │
//!     ├──> Tree-sitter parsing → concrete tree
//!     │      └─> error / missing nodes → SyntaxError::Parse
//!     │
//!     └──> Lowering → SourceFile
//!            ├─> imports, top-level declarations, doc comments
//!            ├─> Expr / Stmt sum types (one variant per shape)
//!            └─> Visitor for body traversal
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codegraph_syntax::{Decl, GoParser};
//!
//! let mut parser = GoParser::new().unwrap();
//! let file = parser
//!     .parse_source("package bank\n\nfunc Open() {}\n")
//!     .unwrap();
//!
//! assert_eq!(file.package, "bank");
//! assert!(matches!(&file.decls[0], Decl::Func(f) if f.name == "Open"));
//! ```

mod ast;
mod error;
mod lower;
mod parser;
pub mod visit;

pub use ast::{
    doc_text, Block, ChanDir, CommentGroup, Decl, Expr, Field, FuncDecl, FuncType, ImportSpec,
    InterfaceElem, SourceFile, Stmt, TypeDecl, TypeSpec, ValueDecl, ValueKind, ValueSpec,
};
pub use error::{Result, SyntaxError};
pub use parser::{read_package_clause, scan_package_clause, GoParser};
pub use visit::Visitor;
