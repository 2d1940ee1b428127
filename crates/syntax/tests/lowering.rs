use codegraph_syntax::{ChanDir, Decl, Expr, GoParser, InterfaceElem, SourceFile, Stmt, ValueKind};
use pretty_assertions::assert_eq;

const BANK: &str = r#"package bank

import (
	"fmt"
	str "strings"
)

// Account holds a balance.
// It is not safe for concurrent use.
type Account struct {
	// Balance in cents
	Balance int
	Owner, Note string
	*Ledger
	history []Entry
}

type Store interface {
	// Load returns an account.
	Load(id string) (*Account, error)
	Save(*Account) error
}

const (
	Min = 0
	Max int = 100
)

var registry = map[string]*Account{}

func (a *Account) Deposit(n int) {
	a.Balance += n
	fmt.Println(str.ToUpper("ok"))
}
"#;

fn parse(source: &str) -> SourceFile {
    GoParser::new()
        .expect("parser")
        .parse_source(source)
        .expect("valid source")
}

#[test]
fn lowers_imports_with_aliases() {
    let file = parse(BANK);
    let imports: Vec<_> = file
        .imports
        .iter()
        .map(|spec| (spec.alias.clone(), spec.path.clone()))
        .collect();

    assert_eq!(
        imports,
        vec![
            (None, "\"fmt\"".to_string()),
            (Some("str".to_string()), "\"strings\"".to_string()),
        ]
    );
}

#[test]
fn lowers_struct_fields_and_doc_comments() {
    let file = parse(BANK);
    let Decl::Type(decl) = &file.decls[0] else {
        panic!("expected type declaration first");
    };
    assert_eq!(
        decl.doc.as_ref().map(|doc| doc.text()),
        Some("Account holds a balance. It is not safe for concurrent use.".to_string())
    );

    let Expr::Struct(fields) = &decl.specs[0].ty else {
        panic!("expected struct type");
    };
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].names, vec!["Balance"]);
    assert_eq!(
        fields[0].doc.as_ref().map(|doc| doc.text()),
        Some("Balance in cents".to_string())
    );
    assert_eq!(fields[1].names, vec!["Owner", "Note"]);
    assert!(fields[2].names.is_empty());
    assert_eq!(
        fields[2].ty,
        Expr::Star(Box::new(Expr::Ident("Ledger".into())))
    );
    assert_eq!(
        fields[3].ty,
        Expr::Array {
            len: None,
            elem: Box::new(Expr::Ident("Entry".into())),
        }
    );
}

#[test]
fn lowers_interface_methods() {
    let file = parse(BANK);
    let Decl::Type(decl) = &file.decls[1] else {
        panic!("expected interface declaration");
    };
    let Expr::Interface(elems) = &decl.specs[0].ty else {
        panic!("expected interface type");
    };

    let names: Vec<_> = elems
        .iter()
        .filter_map(|elem| match elem {
            InterfaceElem::Method { name, .. } => Some(name.as_str()),
            InterfaceElem::Embedded(_) => None,
        })
        .collect();
    assert_eq!(names, vec!["Load", "Save"]);
}

#[test]
fn lowers_grouped_constants_and_vars() {
    let file = parse(BANK);
    let Decl::Value(consts) = &file.decls[2] else {
        panic!("expected const group");
    };
    assert_eq!(consts.kind, ValueKind::Const);
    assert_eq!(consts.specs.len(), 2);
    assert_eq!(consts.specs[0].values, vec![Expr::BasicLit("0".into())]);
    assert_eq!(consts.specs[1].ty, Some(Expr::Ident("int".into())));

    let Decl::Value(vars) = &file.decls[3] else {
        panic!("expected var declaration");
    };
    assert_eq!(vars.kind, ValueKind::Var);
    assert!(matches!(
        vars.specs[0].values.as_slice(),
        [Expr::CompositeLit { ty: Some(_), .. }]
    ));
}

#[test]
fn lowers_method_receiver_and_body_calls() {
    let file = parse(BANK);
    let methods: Vec<_> = file.methods().collect();
    assert_eq!(methods.len(), 1);

    let (_, deposit) = methods[0];
    assert_eq!(deposit.name, "Deposit");
    assert_eq!(deposit.receiver_type_name(), Some("Account"));

    let body = deposit.body.as_ref().expect("method body");
    assert!(matches!(body.stmts[0], Stmt::Assign { define: false, .. }));
    let Stmt::Expr(Expr::Call { fun, args }) = &body.stmts[1] else {
        panic!("expected call statement");
    };
    assert_eq!(
        **fun,
        Expr::Selector {
            x: Box::new(Expr::Ident("fmt".into())),
            sel: "Println".into(),
        }
    );
    assert!(matches!(args.as_slice(), [Expr::Call { .. }]));
}

#[test]
fn lowers_header_clauses_apart_from_bodies() {
    let file = parse(
        "package relay\n\nfunc pump(ch <-chan int) {\n\tif v := ready(); v {\n\t}\n\tselect {\n\tcase m := <-ch:\n\t\tforward(m)\n\t}\n}\n",
    );
    let Decl::Func(pump) = &file.decls[0] else {
        panic!("expected function");
    };
    assert!(matches!(
        &pump.ty.params[0].ty,
        Expr::Chan {
            dir: ChanDir::Recv,
            ..
        }
    ));

    let body = pump.body.as_ref().expect("function body");
    let Stmt::Compound { init, exprs, .. } = &body.stmts[0] else {
        panic!("expected if statement");
    };
    assert!(matches!(init.as_slice(), [Stmt::Assign { define: true, .. }]));
    assert_eq!(exprs, &vec![Expr::Ident("v".into())]);

    let Stmt::Compound { stmts: cases, .. } = &body.stmts[1] else {
        panic!("expected select statement");
    };
    let Stmt::Compound { init, stmts, .. } = &cases[0] else {
        panic!("expected communication case");
    };
    assert!(matches!(init.as_slice(), [Stmt::Assign { define: true, .. }]));
    assert!(matches!(stmts.as_slice(), [Stmt::Expr(Expr::Call { .. })]));
}
