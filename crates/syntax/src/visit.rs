//! Depth-first traversal over function bodies.
//!
//! Override the `visit_*` hooks you care about and call the matching `walk_*`
//! function to keep descending. Scope hooks fire around every construct that
//! opens a lexical block: blocks, compound statements and function literals.

use crate::ast::*;

pub trait Visitor {
    fn visit_block(&mut self, block: &Block) {
        self.enter_scope();
        walk_block(self, block);
        self.exit_scope();
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    /// Local `var`/`const` declaration, before its initializers are walked
    fn visit_value_decl(&mut self, decl: &ValueDecl) {
        walk_value_decl(self, decl);
    }

    /// Local `type` declaration
    fn visit_type_decl(&mut self, _decl: &TypeDecl) {}

    /// Names introduced by `:=`
    fn visit_define(&mut self, _lhs: &[Expr]) {}

    /// Parameters, results and receiver of a function literal
    fn visit_signature(&mut self, _ty: &FuncType) {}

    fn enter_scope(&mut self) {}

    fn exit_scope(&mut self) {}
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_value_decl<V: Visitor + ?Sized>(visitor: &mut V, decl: &ValueDecl) {
    for spec in &decl.specs {
        for value in &spec.values {
            visitor.visit_expr(value);
        }
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Value(decl) => visitor.visit_value_decl(decl),
        Stmt::Type(decl) => visitor.visit_type_decl(decl),
        Stmt::Assign { lhs, rhs, define } => {
            for expr in rhs {
                visitor.visit_expr(expr);
            }
            if *define {
                visitor.visit_define(lhs);
            } else {
                for expr in lhs {
                    visitor.visit_expr(expr);
                }
            }
        }
        Stmt::Expr(expr) => visitor.visit_expr(expr),
        Stmt::Block(block) => visitor.visit_block(block),
        Stmt::Compound { init, exprs, stmts } => {
            visitor.enter_scope();
            for stmt in init {
                visitor.visit_stmt(stmt);
            }
            for expr in exprs {
                visitor.visit_expr(expr);
            }
            for stmt in stmts {
                visitor.visit_stmt(stmt);
            }
            visitor.exit_scope();
        }
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(_) | Expr::BasicLit(_) => {}
        Expr::Selector { x, .. } => visitor.visit_expr(x),
        Expr::Star(inner)
        | Expr::ImplicitArray(inner)
        | Expr::Ellipsis(inner)
        | Expr::Paren(inner) => visitor.visit_expr(inner),
        Expr::Array { len, elem } => {
            if let Some(len) = len {
                visitor.visit_expr(len);
            }
            visitor.visit_expr(elem);
        }
        Expr::Map { key, value } => {
            visitor.visit_expr(key);
            visitor.visit_expr(value);
        }
        Expr::Chan { value, .. } => visitor.visit_expr(value),
        // type shapes carry no executable code
        Expr::Func(_) | Expr::Struct(_) | Expr::Interface(_) => {}
        Expr::Generic { base, args } => {
            visitor.visit_expr(base);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Call { fun, args } => {
            visitor.visit_expr(fun);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::CompositeLit { ty, elts } => {
            if let Some(ty) = ty {
                visitor.visit_expr(ty);
            }
            for elt in elts {
                visitor.visit_expr(elt);
            }
        }
        Expr::KeyValue { key, value } => {
            visitor.visit_expr(key);
            visitor.visit_expr(value);
        }
        Expr::FuncLit { ty, body } => {
            visitor.enter_scope();
            visitor.visit_signature(ty);
            visitor.visit_block(body);
            visitor.exit_scope();
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Other { children, .. } => {
            for child in children {
                visitor.visit_expr(child);
            }
        }
    }
}
