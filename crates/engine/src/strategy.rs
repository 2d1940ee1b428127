//! Pluggable rules for turning references into registry hits.
//!
//! Neither strategy does type inference. Calls through values, interface
//! dispatch and standard library calls stay unresolved and produce no edge.

use crate::config::StrategyKind;
use crate::registry::{SymbolRegistry, TypeTarget};
use crate::types::NodeId;
use codegraph_syntax::Expr;
use std::collections::HashSet;

/// Names bound by enclosing local scopes of the body being resolved
#[derive(Debug, Default)]
pub struct LocalScopes {
    frames: Vec<HashSet<String>>,
}

impl LocalScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(HashSet::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Bind in the innermost frame; `_` never binds
    pub fn bind(&mut self, name: &str) {
        if name == "_" {
            return;
        }
        if self.frames.is_empty() {
            self.push();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string());
        }
    }

    pub fn binds(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains(name))
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Decides which registry lookups a reference may attempt
pub trait ResolutionStrategy {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Function or method a call's callee expression refers to
    fn resolve_call(
        &self,
        callee: &Expr,
        registry: &SymbolRegistry,
        locals: &LocalScopes,
    ) -> Option<NodeId>;

    /// Registered struct or interface a type expression names
    fn resolve_type(
        &self,
        ty: &Expr,
        registry: &SymbolRegistry,
        locals: &LocalScopes,
    ) -> Option<TypeTarget>;
}

/// Strategy instance for a configured kind
pub fn for_kind(kind: StrategyKind) -> Box<dyn ResolutionStrategy> {
    match kind {
        StrategyKind::Syntactic => Box::new(SyntacticStrategy),
        StrategyKind::Scoped => Box::new(ScopedStrategy),
    }
}

/// Name matching with no scope analysis
///
/// A local variable named like a registered function still resolves to that
/// function. Cheap and usually right.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticStrategy;

impl ResolutionStrategy for SyntacticStrategy {
    fn name(&self) -> &'static str {
        "syntactic"
    }

    fn resolve_call(
        &self,
        callee: &Expr,
        registry: &SymbolRegistry,
        _locals: &LocalScopes,
    ) -> Option<NodeId> {
        let key = call_key(callee)?;
        registry.function(&key.lookup())
    }

    fn resolve_type(
        &self,
        ty: &Expr,
        registry: &SymbolRegistry,
        _locals: &LocalScopes,
    ) -> Option<TypeTarget> {
        let (_, name) = named_type(ty)?;
        registry.type_target(name)
    }
}

/// Syntactic lookups, skipped when the name or selector base is bound in an
/// enclosing local scope
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedStrategy;

impl ResolutionStrategy for ScopedStrategy {
    fn name(&self) -> &'static str {
        "scoped"
    }

    fn resolve_call(
        &self,
        callee: &Expr,
        registry: &SymbolRegistry,
        locals: &LocalScopes,
    ) -> Option<NodeId> {
        let key = call_key(callee)?;
        if locals.binds(key.head()) {
            log::trace!("{} is local, not resolving", key.lookup());
            return None;
        }
        registry.function(&key.lookup())
    }

    fn resolve_type(
        &self,
        ty: &Expr,
        registry: &SymbolRegistry,
        locals: &LocalScopes,
    ) -> Option<TypeTarget> {
        let (head, name) = named_type(ty)?;
        if locals.binds(head) {
            return None;
        }
        registry.type_target(name)
    }
}

/// Callee shapes that can be looked up by name
enum CallKey<'a> {
    /// `f(...)`
    Bare(&'a str),
    /// `x.Sel(...)` with an identifier base
    Qualified(&'a str, &'a str),
}

impl CallKey<'_> {
    fn head(&self) -> &str {
        match self {
            CallKey::Bare(name) => name,
            CallKey::Qualified(base, _) => base,
        }
    }

    fn lookup(&self) -> String {
        match self {
            CallKey::Bare(name) => name.to_string(),
            CallKey::Qualified(base, sel) => format!("{base}.{sel}"),
        }
    }
}

fn call_key(callee: &Expr) -> Option<CallKey<'_>> {
    match callee {
        Expr::Ident(name) => Some(CallKey::Bare(name)),
        Expr::Selector { x, sel } => x.as_ident().map(|base| CallKey::Qualified(base, sel)),
        _ => None,
    }
}

/// `T` or `pkg.T`, as (first identifier, type name)
fn named_type(ty: &Expr) -> Option<(&str, &str)> {
    match ty {
        Expr::Ident(name) => Some((name.as_str(), name.as_str())),
        Expr::Selector { x, sel } => x.as_ident().map(|base| (base, sel.as_str())),
        _ => None,
    }
}
