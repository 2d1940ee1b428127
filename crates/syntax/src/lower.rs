//! Lowering from the tree-sitter concrete tree into [`crate::ast`].

use crate::ast::*;
use crate::error::{Result, SyntaxError};
use tree_sitter::Node;

/// Statement-shaped node kinds. Any other kind met in statement position is
/// lowered as an expression, so unknown shapes still get walked.
const STATEMENT_KINDS: &[&str] = &[
    "block",
    "statement_list",
    "if_statement",
    "for_statement",
    "for_clause",
    "range_clause",
    "expression_switch_statement",
    "type_switch_statement",
    "expression_case",
    "type_case",
    "default_case",
    "select_statement",
    "communication_case",
    "receive_statement",
    "go_statement",
    "defer_statement",
    "return_statement",
    "labeled_statement",
    "label_name",
    "send_statement",
    "inc_statement",
    "dec_statement",
    "break_statement",
    "continue_statement",
    "goto_statement",
    "fallthrough_statement",
    "empty_statement",
    "short_var_declaration",
    "assignment_statement",
    "var_declaration",
    "const_declaration",
    "type_declaration",
    "expression_statement",
];

const SNIPPET_LIMIT: usize = 40;

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn is_statement_kind(kind: &str) -> bool {
    STATEMENT_KINDS.contains(&kind)
}

/// `binary_expression` → `BinaryExpression`
fn shape_tag(kind: &str) -> String {
    kind.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Find the first error or missing node, depth first
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

pub(crate) struct Lowerer<'src> {
    source: &'src str,
}

impl<'src> Lowerer<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self { source }
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
            .unwrap_or_default()
    }

    fn field_texts(&self, node: Node<'_>, field: &str) -> Vec<String> {
        field_children(node, field)
            .into_iter()
            .map(|child| self.text(child).to_string())
            .collect()
    }

    fn expr_field(&self, node: Node<'_>, field: &str) -> Expr {
        match node.child_by_field_name(field) {
            Some(child) => self.expr(child),
            None => Expr::Other {
                tag: "Missing".to_string(),
                children: Vec::new(),
            },
        }
    }

    fn first_named_expr(&self, node: Node<'_>) -> Expr {
        match named_children(node).into_iter().next() {
            Some(child) => self.expr(child),
            None => Expr::Other {
                tag: shape_tag(node.kind()),
                children: Vec::new(),
            },
        }
    }

    /// Reject trees containing error or missing nodes
    pub(crate) fn check_errors(&self, root: Node<'_>) -> Result<()> {
        let Some(bad) = first_error(root) else {
            return Ok(());
        };
        let position = bad.start_position();
        let snippet: String = self.text(bad).chars().take(SNIPPET_LIMIT).collect();
        Err(SyntaxError::parse(position.row + 1, position.column + 1, snippet))
    }

    pub(crate) fn source_file(&self, root: Node<'_>) -> Result<SourceFile> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();

        for child in named_children(root) {
            match child.kind() {
                "package_clause" => {
                    package = named_children(child)
                        .into_iter()
                        .next()
                        .map(|name| self.text(name).to_string());
                }
                "import_declaration" => self.import_specs(child, &mut imports),
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.func_decl(child)));
                }
                "type_declaration" => decls.push(Decl::Type(self.type_decl(child))),
                "const_declaration" => {
                    decls.push(Decl::Value(self.value_decl(child, ValueKind::Const)));
                }
                "var_declaration" => {
                    decls.push(Decl::Value(self.value_decl(child, ValueKind::Var)));
                }
                _ => {}
            }
        }

        let package = package.ok_or(SyntaxError::MissingPackageClause)?;
        Ok(SourceFile {
            package,
            imports,
            decls,
        })
    }

    /// Comment group ending on the line right above `node`
    fn doc_comment(&self, node: Node<'_>) -> Option<CommentGroup> {
        let mut lines = Vec::new();
        let mut next_row = node.start_position().row;
        let mut current = node.prev_named_sibling();

        while let Some(prev) = current {
            if prev.kind() != "comment" || prev.end_position().row + 1 != next_row {
                break;
            }
            // trailing comment of the previous declaration
            if let Some(before) = prev.prev_named_sibling() {
                if before.kind() != "comment"
                    && before.end_position().row == prev.start_position().row
                {
                    break;
                }
            }
            lines.push(self.text(prev).to_string());
            next_row = prev.start_position().row;
            current = prev.prev_named_sibling();
        }

        if lines.is_empty() {
            return None;
        }
        lines.reverse();
        Some(CommentGroup { lines })
    }

    fn import_specs(&self, node: Node<'_>, out: &mut Vec<ImportSpec>) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => out.push(ImportSpec {
                    alias: child
                        .child_by_field_name("name")
                        .map(|name| self.text(name).to_string()),
                    path: self.field_text(child, "path"),
                }),
                "import_spec_list" => self.import_specs(child, out),
                _ => {}
            }
        }
    }

    fn func_decl(&self, node: Node<'_>) -> FuncDecl {
        let recv = node
            .child_by_field_name("receiver")
            .and_then(|list| self.parameter_list(list).into_iter().next());

        FuncDecl {
            doc: self.doc_comment(node),
            recv,
            name: self.field_text(node, "name"),
            ty: self.signature(node),
            body: node.child_by_field_name("body").map(|body| self.block(body)),
        }
    }

    /// Parameters and results of anything carrying `parameters`/`result` fields
    fn signature(&self, node: Node<'_>) -> FuncType {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.parameter_list(list))
            .unwrap_or_default();

        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameter_list(result),
            Some(result) => vec![Field {
                doc: None,
                names: Vec::new(),
                ty: self.expr(result),
            }],
            None => Vec::new(),
        };

        FuncType { params, results }
    }

    fn parameter_list(&self, node: Node<'_>) -> Vec<Field> {
        let mut fields = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "parameter_declaration" => fields.push(Field {
                    doc: None,
                    names: self.field_texts(child, "name"),
                    ty: self.expr_field(child, "type"),
                }),
                "variadic_parameter_declaration" => fields.push(Field {
                    doc: None,
                    names: self.field_texts(child, "name"),
                    ty: Expr::Ellipsis(Box::new(self.expr_field(child, "type"))),
                }),
                _ => {}
            }
        }
        fields
    }

    fn type_decl(&self, node: Node<'_>) -> TypeDecl {
        let specs = named_children(node)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "type_spec" | "type_alias" => Some(TypeSpec {
                    name: self.field_text(child, "name"),
                    alias: child.kind() == "type_alias",
                    ty: self.expr_field(child, "type"),
                }),
                _ => None,
            })
            .collect();

        TypeDecl {
            doc: self.doc_comment(node),
            specs,
        }
    }

    fn value_decl(&self, node: Node<'_>, kind: ValueKind) -> ValueDecl {
        let mut specs = Vec::new();
        self.value_specs(node, &mut specs);
        ValueDecl {
            doc: self.doc_comment(node),
            kind,
            specs,
        }
    }

    fn value_specs(&self, node: Node<'_>, out: &mut Vec<ValueSpec>) {
        for child in named_children(node) {
            match child.kind() {
                "const_spec" | "var_spec" => out.push(ValueSpec {
                    names: self.field_texts(child, "name"),
                    ty: child.child_by_field_name("type").map(|ty| self.expr(ty)),
                    values: child
                        .child_by_field_name("value")
                        .map(|value| self.expr_list(value))
                        .unwrap_or_default(),
                }),
                "const_spec_list" | "var_spec_list" => self.value_specs(child, out),
                _ => {}
            }
        }
    }

    fn struct_fields(&self, node: Node<'_>) -> Vec<Field> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };

        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "field_declaration")
            .map(|field| {
                let names = self.field_texts(field, "name");
                let mut ty = self.expr_field(field, "type");
                // embedded `*T` keeps its star as an anonymous token
                if names.is_empty() && has_token(field, "*") {
                    ty = Expr::Star(Box::new(ty));
                }
                Field {
                    doc: self.doc_comment(field),
                    names,
                    ty,
                }
            })
            .collect()
    }

    fn interface_elems(&self, node: Node<'_>) -> Vec<InterfaceElem> {
        named_children(node)
            .into_iter()
            .map(|child| match child.kind() {
                "method_elem" | "method_spec" => InterfaceElem::Method {
                    doc: self.doc_comment(child),
                    name: self.field_text(child, "name"),
                    ty: self.signature(child),
                },
                "type_elem" | "constraint_elem" => {
                    let mut parts = named_children(child);
                    if parts.len() == 1 {
                        InterfaceElem::Embedded(self.expr(parts.remove(0)))
                    } else {
                        InterfaceElem::Embedded(Expr::Other {
                            tag: shape_tag(child.kind()),
                            children: parts.into_iter().map(|part| self.expr(part)).collect(),
                        })
                    }
                }
                _ => InterfaceElem::Embedded(self.expr(child)),
            })
            .collect()
    }

    fn expr_list(&self, node: Node<'_>) -> Vec<Expr> {
        if node.kind() == "expression_list" {
            named_children(node)
                .into_iter()
                .map(|child| self.expr(child))
                .collect()
        } else {
            vec![self.expr(node)]
        }
    }

    fn literal_elements(&self, node: Node<'_>) -> Vec<Expr> {
        named_children(node)
            .into_iter()
            .map(|child| self.expr(child))
            .collect()
    }

    fn chan_dir(node: Node<'_>) -> ChanDir {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|child| !child.is_named())
            .map(|child| child.kind())
            .collect();
        match tokens.as_slice() {
            ["<-", "chan", ..] => ChanDir::Recv,
            ["chan", "<-", ..] => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }

    pub(crate) fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" | "type_identifier" | "field_identifier" | "package_identifier"
            | "blank_identifier" | "true" | "false" | "nil" | "iota" => {
                Expr::Ident(self.text(node).to_string())
            }
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
            | "interpreted_string_literal" | "raw_string_literal" => {
                Expr::BasicLit(self.text(node).to_string())
            }
            "qualified_type" => Expr::Selector {
                x: Box::new(Expr::Ident(self.field_text(node, "package"))),
                sel: self.field_text(node, "name"),
            },
            "selector_expression" => Expr::Selector {
                x: Box::new(self.expr_field(node, "operand")),
                sel: self.field_text(node, "field"),
            },
            "pointer_type" => Expr::Star(Box::new(self.first_named_expr(node))),
            "unary_expression" => {
                let operand = Box::new(self.expr_field(node, "operand"));
                let op = self.field_text(node, "operator");
                if op == "*" {
                    Expr::Star(operand)
                } else {
                    Expr::Unary { op, operand }
                }
            }
            "slice_type" => Expr::Array {
                len: None,
                elem: Box::new(self.expr_field(node, "element")),
            },
            "array_type" => Expr::Array {
                len: Some(Box::new(self.expr_field(node, "length"))),
                elem: Box::new(self.expr_field(node, "element")),
            },
            "implicit_length_array_type" => {
                Expr::ImplicitArray(Box::new(self.expr_field(node, "element")))
            }
            "map_type" => Expr::Map {
                key: Box::new(self.expr_field(node, "key")),
                value: Box::new(self.expr_field(node, "value")),
            },
            "channel_type" => Expr::Chan {
                dir: Self::chan_dir(node),
                value: Box::new(self.expr_field(node, "value")),
            },
            "function_type" => Expr::Func(self.signature(node)),
            "struct_type" => Expr::Struct(self.struct_fields(node)),
            "interface_type" => Expr::Interface(self.interface_elems(node)),
            "generic_type" => Expr::Generic {
                base: Box::new(self.expr_field(node, "type")),
                args: node
                    .child_by_field_name("type_arguments")
                    .map(|args| self.literal_elements(args))
                    .unwrap_or_default(),
            },
            "parenthesized_type" | "parenthesized_expression" => {
                Expr::Paren(Box::new(self.first_named_expr(node)))
            }
            "call_expression" => Expr::Call {
                fun: Box::new(self.expr_field(node, "function")),
                args: node
                    .child_by_field_name("arguments")
                    .map(|args| self.literal_elements(args))
                    .unwrap_or_default(),
            },
            // `T(x)` is a call in Go's own tree
            "type_conversion_expression" => Expr::Call {
                fun: Box::new(self.expr_field(node, "type")),
                args: vec![self.expr_field(node, "operand")],
            },
            "composite_literal" => Expr::CompositeLit {
                ty: node
                    .child_by_field_name("type")
                    .map(|ty| Box::new(self.expr(ty))),
                elts: node
                    .child_by_field_name("body")
                    .map(|body| self.literal_elements(body))
                    .unwrap_or_default(),
            },
            "literal_value" => Expr::CompositeLit {
                ty: None,
                elts: self.literal_elements(node),
            },
            "literal_element" => self.first_named_expr(node),
            "type_elem" if named_children(node).len() == 1 => self.first_named_expr(node),
            "keyed_element" => {
                let mut parts = named_children(node).into_iter().map(|part| self.expr(part));
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) => Expr::KeyValue {
                        key: Box::new(key),
                        value: Box::new(value),
                    },
                    (Some(only), None) => only,
                    _ => Expr::Other {
                        tag: shape_tag(node.kind()),
                        children: Vec::new(),
                    },
                }
            }
            "func_literal" => Expr::FuncLit {
                ty: self.signature(node),
                body: node
                    .child_by_field_name("body")
                    .map(|body| self.block(body))
                    .unwrap_or_default(),
            },
            kind => Expr::Other {
                tag: shape_tag(kind),
                children: self.literal_elements(node),
            },
        }
    }

    fn block(&self, node: Node<'_>) -> Block {
        Block {
            stmts: self.stmts(node),
        }
    }

    fn stmts(&self, node: Node<'_>) -> Vec<Stmt> {
        let mut out = Vec::new();
        for child in named_children(node) {
            if child.kind() == "statement_list" {
                out.extend(self.stmts(child));
            } else {
                out.push(self.stmt(child));
            }
        }
        out
    }

    fn assign(&self, node: Node<'_>, define: bool) -> Stmt {
        Stmt::Assign {
            lhs: node
                .child_by_field_name("left")
                .map(|left| self.expr_list(left))
                .unwrap_or_default(),
            rhs: node
                .child_by_field_name("right")
                .map(|right| self.expr_list(right))
                .unwrap_or_default(),
            define,
        }
    }

    fn stmt(&self, node: Node<'_>) -> Stmt {
        match node.kind() {
            "block" => Stmt::Block(self.block(node)),
            "short_var_declaration" => self.assign(node, true),
            "assignment_statement" => self.assign(node, false),
            "range_clause" | "receive_statement" => self.assign(node, has_token(node, ":=")),
            "var_declaration" => Stmt::Value(self.value_decl(node, ValueKind::Var)),
            "const_declaration" => Stmt::Value(self.value_decl(node, ValueKind::Const)),
            "type_declaration" => Stmt::Type(self.type_decl(node)),
            "expression_statement" => Stmt::Expr(self.first_named_expr(node)),
            "type_switch_statement" => self.type_switch(node),
            kind if is_statement_kind(kind) => self.compound(node),
            _ => Stmt::Expr(self.expr(node)),
        }
    }

    fn compound(&self, node: Node<'_>) -> Stmt {
        let header = node
            .child_by_field_name("initializer")
            .or_else(|| node.child_by_field_name("communication"));
        let mut init = Vec::new();
        let mut exprs = Vec::new();
        let mut stmts = Vec::new();
        for child in named_children(node) {
            if Some(child) == header {
                init.push(self.stmt(child));
                continue;
            }
            match child.kind() {
                "range_clause" => init.push(self.stmt(child)),
                // `for i := 0; i < n; i++`: the clause scopes over the body
                "for_clause" => {
                    if let Stmt::Compound {
                        init: clause_init,
                        exprs: clause_exprs,
                        stmts: clause_stmts,
                    } = self.compound(child)
                    {
                        init.extend(clause_init);
                        exprs.extend(clause_exprs);
                        stmts.extend(clause_stmts);
                    }
                }
                "expression_list" => exprs.extend(self.expr_list(child)),
                "statement_list" => stmts.extend(self.stmts(child)),
                kind if is_statement_kind(kind) => stmts.push(self.stmt(child)),
                _ => exprs.push(self.expr(child)),
            }
        }
        Stmt::Compound { init, exprs, stmts }
    }

    /// `switch v := x.(type)` binds `v` in every clause
    fn type_switch(&self, node: Node<'_>) -> Stmt {
        let initializer = node.child_by_field_name("initializer");
        let alias = node.child_by_field_name("alias");
        let value = node.child_by_field_name("value");
        let mut init = Vec::new();

        if let Some(initializer) = initializer {
            init.push(self.stmt(initializer));
        }
        if let (Some(alias), Some(value)) = (alias, value) {
            init.push(Stmt::Assign {
                lhs: self.expr_list(alias),
                rhs: vec![self.expr(value)],
                define: true,
            });
        }

        let mut exprs = Vec::new();
        let mut stmts = Vec::new();
        for child in named_children(node) {
            if Some(child) == initializer || Some(child) == alias {
                continue;
            }
            if Some(child) == value && alias.is_some() {
                continue;
            }
            match child.kind() {
                "expression_list" => exprs.extend(self.expr_list(child)),
                kind if is_statement_kind(kind) => stmts.push(self.stmt(child)),
                _ => exprs.push(self.expr(child)),
            }
        }
        Stmt::Compound { init, exprs, stmts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_tag_camel_cases_kinds() {
        assert_eq!(shape_tag("binary_expression"), "BinaryExpression");
        assert_eq!(shape_tag("index_expression"), "IndexExpression");
        assert_eq!(shape_tag("iota"), "Iota");
    }
}
