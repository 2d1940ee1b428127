//! Textual projection of type expressions.
//!
//! Rendering is structural and total: shapes without a dedicated form come out
//! as `<Tag>` naming the syntax shape.

use crate::types::ParameterInfo;
use codegraph_syntax::{Expr, Field, FuncType};

/// Render a type or expression
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Selector { x, sel } => format!("{}.{}", render(x), sel),
        Expr::Star(inner) => format!("*{}", render(inner)),
        Expr::Array { len: None, elem } => format!("[]{}", render(elem)),
        Expr::Array {
            len: Some(len),
            elem,
        } => format!("[{}]{}", render(len), render(elem)),
        Expr::ImplicitArray(elem) => format!("[...]{}", render(elem)),
        Expr::Map { key, value } => format!("map[{}]{}", render(key), render(value)),
        Expr::Func(ty) => render_func_type(ty),
        Expr::Interface(_) => "interface{}".to_string(),
        Expr::Struct(_) => "struct{...}".to_string(),
        Expr::Ellipsis(elem) => format!("...{}", render(elem)),
        Expr::Chan { value, .. } => format!("chan {}", render(value)),
        Expr::BasicLit(text) => text.clone(),
        Expr::Generic { base, args } => {
            let args: Vec<String> = args.iter().map(render).collect();
            format!("{}[{}]", render(base), args.join(", "))
        }
        Expr::Paren(inner) => format!("({})", render(inner)),
        other => format!("<{}>", other.tag()),
    }
}

/// Parameters as name/type pairs plus the rendered return type
///
/// A field with several names yields one parameter per name; an unnamed
/// field yields one parameter with an empty name. Results render as `void`,
/// the single type, or a parenthesized list with one entry per result field.
pub fn signature(ty: &FuncType) -> (Vec<ParameterInfo>, String) {
    let mut params = Vec::new();
    for field in &ty.params {
        let rendered = render(&field.ty);
        if field.names.is_empty() {
            params.push(ParameterInfo {
                name: String::new(),
                ty: rendered,
            });
        } else {
            params.extend(field.names.iter().map(|name| ParameterInfo {
                name: name.clone(),
                ty: rendered.clone(),
            }));
        }
    }

    (params, return_type(&ty.results))
}

fn return_type(results: &[Field]) -> String {
    match results {
        [] => "void".to_string(),
        [single] => render(&single.ty),
        many => {
            let rendered: Vec<String> = many.iter().map(|field| render(&field.ty)).collect();
            format!("({})", rendered.join(", "))
        }
    }
}

fn render_func_type(ty: &FuncType) -> String {
    let (params, returns) = signature(ty);
    let params: Vec<String> = params
        .into_iter()
        .map(|p| {
            if p.name.is_empty() {
                p.ty
            } else {
                format!("{} {}", p.name, p.ty)
            }
        })
        .collect();
    format!("func({}) {}", params.join(", "), returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_syntax::ChanDir;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Ident(name.to_string()))
    }

    fn field(names: &[&str], ty: Expr) -> Field {
        Field {
            doc: None,
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
        }
    }

    #[test]
    fn renders_type_shapes() {
        let cases = vec![
            (Expr::Star(ident("Account")), "*Account"),
            (
                Expr::Selector {
                    x: ident("time"),
                    sel: "Duration".into(),
                },
                "time.Duration",
            ),
            (
                Expr::Array {
                    len: None,
                    elem: Box::new(Expr::Star(ident("Entry"))),
                },
                "[]*Entry",
            ),
            (
                Expr::Array {
                    len: Some(Box::new(Expr::BasicLit("4".into()))),
                    elem: ident("byte"),
                },
                "[4]byte",
            ),
            (Expr::ImplicitArray(ident("int")), "[...]int"),
            (
                Expr::Map {
                    key: ident("string"),
                    value: Box::new(Expr::Interface(Vec::new())),
                },
                "map[string]interface{}",
            ),
            (Expr::Struct(Vec::new()), "struct{...}"),
            (Expr::Ellipsis(ident("any")), "...any"),
            (
                Expr::Chan {
                    dir: ChanDir::Recv,
                    value: ident("int"),
                },
                "chan int",
            ),
            (
                Expr::Generic {
                    base: ident("Pair"),
                    args: vec![Expr::Ident("K".into()), Expr::Ident("V".into())],
                },
                "Pair[K, V]",
            ),
            (Expr::Paren(ident("T")), "(T)"),
        ];

        for (expr, expected) in cases {
            assert_eq!(render(&expr), expected);
        }
    }

    #[test]
    fn renders_unknown_shapes_as_placeholders() {
        let call = Expr::Call {
            fun: ident("f"),
            args: Vec::new(),
        };
        let binary = Expr::Other {
            tag: "BinaryExpression".into(),
            children: Vec::new(),
        };
        assert_eq!(render(&call), "<CallExpression>");
        assert_eq!(render(&binary), "<BinaryExpression>");
    }

    #[test]
    fn renders_function_types_and_signatures() {
        let ty = FuncType {
            params: vec![
                field(&["a", "b"], Expr::Ident("int".into())),
                field(&[], Expr::Ellipsis(ident("string"))),
            ],
            results: vec![
                field(&[], Expr::Ident("int".into())),
                field(&[], Expr::Ident("error".into())),
            ],
        };

        let (params, returns) = signature(&ty);
        assert_eq!(params.len(), 3);
        assert_eq!(params[1].name, "b");
        assert_eq!(params[2].name, "");
        assert_eq!(params[2].ty, "...string");
        assert_eq!(returns, "(int, error)");

        assert_eq!(
            render(&Expr::Func(ty)),
            "func(a int, b int, ...string) (int, error)"
        );
        assert_eq!(render(&Expr::Func(FuncType::default())), "func() void");
    }

    #[test]
    fn grouped_result_names_count_once() {
        let ty = FuncType {
            params: Vec::new(),
            results: vec![field(&["x", "y"], Expr::Ident("int".into()))],
        };
        assert_eq!(signature(&ty).1, "int");
    }
}
