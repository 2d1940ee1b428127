//! Closed syntax tree for one Go source unit.
//!
//! Only the shapes the graph engine looks at get their own variant. Everything
//! else is kept as [`Expr::Other`] with a tag naming the syntax shape and its
//! lowered children, so walkers never lose nested calls or literals.

/// A parsed source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name from the `package` clause
    pub package: String,

    /// Imports in source order
    pub imports: Vec<ImportSpec>,

    /// Top-level declarations in source order (imports excluded)
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Function declarations that carry a receiver
    pub fn methods(&self) -> impl Iterator<Item = (usize, &FuncDecl)> {
        self.decls.iter().enumerate().filter_map(|(idx, decl)| match decl {
            Decl::Func(func) if func.recv.is_some() => Some((idx, func)),
            _ => None,
        })
    }
}

/// One import spec, e.g. `import f "fmt"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name (`f`, `_`, `.`) when given
    pub alias: Option<String>,

    /// Path literal exactly as written, quotes included
    pub path: String,
}

/// Doc comment group preceding a declaration or field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    /// Raw comment texts, markers included (`// x`, `/* y */`)
    pub lines: Vec<String>,
}

impl CommentGroup {
    /// Flatten into one line: `//` markers stripped, each line trimmed,
    /// joined with a single space.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.strip_prefix("//").unwrap_or(line).trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Flatten an optional doc group, empty when absent
pub fn doc_text(doc: Option<&CommentGroup>) -> String {
    doc.map(CommentGroup::text).unwrap_or_default()
}

/// Top-level or local declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeDecl),
    Value(ValueDecl),
}

/// `func (recv) Name(params) results { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    pub recv: Option<Field>,
    pub name: String,
    pub ty: FuncType,
    pub body: Option<Block>,
}

impl FuncDecl {
    /// Base type name of the receiver: `T`, `*T`, `T[P]` and `*T[P]` all give `T`
    pub fn receiver_type_name(&self) -> Option<&str> {
        let recv = self.recv.as_ref()?;
        let mut ty = &recv.ty;
        loop {
            match ty {
                Expr::Star(inner) | Expr::Paren(inner) => ty = inner,
                Expr::Generic { base, .. } => ty = base,
                Expr::Ident(name) => return Some(name),
                _ => return None,
            }
        }
    }
}

/// Parameter and result lists of a function or function type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// A parameter, result, receiver or struct field
///
/// `names` is empty for unnamed parameters and embedded struct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub doc: Option<CommentGroup>,
    pub names: Vec<String>,
    pub ty: Expr,
}

/// `type ...` declaration, single or grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub doc: Option<CommentGroup>,
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    /// `type A = B`
    pub alias: bool,
    pub ty: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Const,
    Var,
}

/// `const ...` or `var ...` declaration, single or grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    pub doc: Option<CommentGroup>,
    pub kind: ValueKind,
    pub specs: Vec<ValueSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// Element of an interface body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method {
        doc: Option<CommentGroup>,
        name: String,
        ty: FuncType,
    },
    /// Embedded interface or type constraint
    Embedded(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Types and expressions share one enum, as Go's grammar does
/// (composite literal types, conversions, `make([]T, n)` arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// `x.Sel`, including qualified types `pkg.T`
    Selector { x: Box<Expr>, sel: String },
    /// Pointer type `*T` or dereference `*p`
    Star(Box<Expr>),
    /// `[]T` when `len` is `None`
    Array {
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    /// `[...]T`
    ImplicitArray(Box<Expr>),
    Map { key: Box<Expr>, value: Box<Expr> },
    Func(FuncType),
    Struct(Vec<Field>),
    Interface(Vec<InterfaceElem>),
    /// Variadic `...T`
    Ellipsis(Box<Expr>),
    /// Direction is recorded for callers; rendered type text omits it
    Chan { dir: ChanDir, value: Box<Expr> },
    /// Number, rune or string literal, source text kept verbatim
    BasicLit(String),
    /// `T[A, B]` generic instantiation in type position
    Generic { base: Box<Expr>, args: Vec<Expr> },
    Paren(Box<Expr>),
    Call { fun: Box<Expr>, args: Vec<Expr> },
    /// `T{...}`; `ty` is `None` for elided inner literals
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    KeyValue { key: Box<Expr>, value: Box<Expr> },
    FuncLit { ty: FuncType, body: Block },
    Unary { op: String, operand: Box<Expr> },
    /// Any other shape; `tag` names it (e.g. `BinaryExpression`)
    Other { tag: String, children: Vec<Expr> },
}

impl Expr {
    /// Shape name used in opaque placeholders
    pub fn tag(&self) -> &str {
        match self {
            Expr::Ident(_) => "Identifier",
            Expr::Selector { .. } => "SelectorExpression",
            Expr::Star(_) => "PointerType",
            Expr::Array { len: None, .. } => "SliceType",
            Expr::Array { .. } => "ArrayType",
            Expr::ImplicitArray(_) => "ImplicitLengthArrayType",
            Expr::Map { .. } => "MapType",
            Expr::Func(_) => "FunctionType",
            Expr::Struct(_) => "StructType",
            Expr::Interface(_) => "InterfaceType",
            Expr::Ellipsis(_) => "Ellipsis",
            Expr::Chan { .. } => "ChannelType",
            Expr::BasicLit(_) => "BasicLiteral",
            Expr::Generic { .. } => "GenericType",
            Expr::Paren(_) => "ParenthesizedExpression",
            Expr::Call { .. } => "CallExpression",
            Expr::CompositeLit { .. } => "CompositeLiteral",
            Expr::KeyValue { .. } => "KeyedElement",
            Expr::FuncLit { .. } => "FuncLiteral",
            Expr::Unary { .. } => "UnaryExpression",
            Expr::Other { tag, .. } => tag,
        }
    }

    /// The identifier text when this is a bare name
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// Statements, reduced to what reference resolution needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Local `var` / `const`
    Value(ValueDecl),
    /// Local `type`
    Type(TypeDecl),
    /// `=`, `op=`, `:=` and `for k, v := range`
    Assign {
        lhs: Vec<Expr>,
        rhs: Vec<Expr>,
        define: bool,
    },
    Expr(Expr),
    Block(Block),
    /// `if`, `for`, `switch`, `select`, `go`, `return`, ...
    ///
    /// `init` holds the header clauses that bind names for the whole
    /// construct: `if`/`switch` initializers, `for` clauses, `range`, the
    /// type switch alias and a `select` case's receive. `exprs` and `stmts`
    /// follow in source order.
    Compound {
        init: Vec<Stmt>,
        exprs: Vec<Expr>,
        stmts: Vec<Stmt>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(recv: Expr) -> FuncDecl {
        FuncDecl {
            doc: None,
            recv: Some(Field {
                doc: None,
                names: vec!["a".to_string()],
                ty: recv,
            }),
            name: "Deposit".to_string(),
            ty: FuncType::default(),
            body: None,
        }
    }

    #[test]
    fn receiver_type_name_unwraps_pointer_and_generics() {
        let value = method(Expr::Ident("Account".into()));
        let pointer = method(Expr::Star(Box::new(Expr::Ident("Account".into()))));
        let generic = method(Expr::Star(Box::new(Expr::Generic {
            base: Box::new(Expr::Ident("List".into())),
            args: vec![Expr::Ident("T".into())],
        })));

        assert_eq!(value.receiver_type_name(), Some("Account"));
        assert_eq!(pointer.receiver_type_name(), Some("Account"));
        assert_eq!(generic.receiver_type_name(), Some("List"));
    }

    #[test]
    fn comment_group_text_strips_line_markers() {
        let doc = CommentGroup {
            lines: vec![
                "// Account holds money.".to_string(),
                "//   Second line".to_string(),
                "/* block */".to_string(),
            ],
        };
        assert_eq!(doc.text(), "Account holds money. Second line /* block */");
        assert_eq!(doc_text(None), "");
    }
}
