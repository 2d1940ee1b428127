use crate::context::AnalysisContext;
use crate::strategy::{LocalScopes, ResolutionStrategy};
use crate::types::{NodeId, Relation};
use codegraph_syntax::visit::{walk_expr, walk_value_decl};
use codegraph_syntax::{Block, Expr, Field, FuncType, TypeDecl, ValueDecl, Visitor};

/// Emit `calls`, `instantiates` and `uses` edges for one body
///
/// Everything inside the body, closures included, is attributed to `owner`.
pub fn resolve_body(
    ctx: &mut AnalysisContext,
    strategy: &dyn ResolutionStrategy,
    owner: NodeId,
    recv: Option<&Field>,
    ty: &FuncType,
    body: &Block,
) {
    let before = ctx.edges().len();
    let mut resolver = BodyResolver {
        ctx,
        strategy,
        owner,
        locals: LocalScopes::new(),
    };

    resolver.locals.push();
    if let Some(recv) = recv {
        resolver.bind_fields(std::slice::from_ref(recv));
    }
    resolver.visit_signature(ty);
    resolver.visit_block(body);
    resolver.locals.pop();

    log::trace!(
        "Resolved body of {owner} with {}: {} edges",
        strategy.name(),
        resolver.ctx.edges().len() - before
    );
}

struct BodyResolver<'a> {
    ctx: &'a mut AnalysisContext,
    strategy: &'a dyn ResolutionStrategy,
    owner: NodeId,
    locals: LocalScopes,
}

impl BodyResolver<'_> {
    fn bind_fields(&mut self, fields: &[Field]) {
        for field in fields {
            for name in &field.names {
                self.locals.bind(name);
            }
        }
    }

    fn resolve_call(&mut self, callee: &Expr) {
        if let Some(target) =
            self.strategy
                .resolve_call(callee, &self.ctx.registry, &self.locals)
        {
            self.ctx.add_edge(self.owner, target, Relation::Calls);
        }
    }

    fn resolve_literal(&mut self, ty: &Expr) {
        if let Some(target) = self
            .strategy
            .resolve_type(ty, &self.ctx.registry, &self.locals)
        {
            let relation = if target.is_struct {
                Relation::Instantiates
            } else {
                Relation::Uses
            };
            self.ctx.add_edge(self.owner, target.id, relation);
        }
    }

    fn resolve_declared_type(&mut self, ty: &Expr) {
        let named = match ty {
            Expr::Star(inner) => inner.as_ref(),
            other => other,
        };
        if let Some(target) = self
            .strategy
            .resolve_type(named, &self.ctx.registry, &self.locals)
        {
            self.ctx.add_edge(self.owner, target.id, Relation::Uses);
        }
    }
}

impl Visitor for BodyResolver<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Call { fun, .. } => self.resolve_call(fun),
            Expr::CompositeLit { ty: Some(ty), .. } => self.resolve_literal(ty),
            _ => {}
        }
        walk_expr(self, expr);
    }

    fn visit_value_decl(&mut self, decl: &ValueDecl) {
        for spec in &decl.specs {
            if let Some(ty) = &spec.ty {
                self.resolve_declared_type(ty);
            }
        }
        walk_value_decl(self, decl);
        for spec in &decl.specs {
            for name in &spec.names {
                self.locals.bind(name);
            }
        }
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        for spec in &decl.specs {
            self.locals.bind(&spec.name);
        }
    }

    fn visit_define(&mut self, lhs: &[Expr]) {
        for name in lhs.iter().filter_map(Expr::as_ident) {
            self.locals.bind(name);
        }
    }

    fn visit_signature(&mut self, ty: &FuncType) {
        self.bind_fields(&ty.params);
        self.bind_fields(&ty.results);
    }

    fn enter_scope(&mut self) {
        self.locals.push();
    }

    fn exit_scope(&mut self) {
        self.locals.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StructSlot;
    use crate::strategy::{ScopedStrategy, SyntacticStrategy};
    use crate::types::{IdPrefix, NodeKind};
    use codegraph_syntax::{Decl, GoParser};

    struct Fixture {
        ctx: AnalysisContext,
        owner: NodeId,
        helper: NodeId,
        account: NodeId,
        store: NodeId,
    }

    fn fixture() -> Fixture {
        let mut ctx = AnalysisContext::new();
        let owner = ctx.registry.allocate(IdPrefix::Func);
        ctx.add_node(owner, NodeKind::Function, "run", "main", "main.go");
        let helper = ctx.registry.allocate(IdPrefix::Func);
        ctx.add_node(helper, NodeKind::Function, "helper", "main", "main.go");
        ctx.registry.register_function("main", "helper", helper);
        let account = ctx.registry.allocate(IdPrefix::Struct);
        ctx.add_node(account, NodeKind::Struct, "Account", "main", "main.go");
        ctx.registry.register_struct(
            "Account",
            StructSlot {
                id: account,
                module: "main.go".into(),
                index: 0,
            },
            "main",
        );
        let store = ctx.registry.allocate(IdPrefix::Interface);
        ctx.add_node(store, NodeKind::Interface, "Store", "main", "main.go");
        ctx.registry.register_interface("Store", store);
        Fixture {
            ctx,
            owner,
            helper,
            account,
            store,
        }
    }

    fn run(fixture: &mut Fixture, strategy: &dyn ResolutionStrategy, source: &str) {
        let file = GoParser::new().unwrap().parse_source(source).unwrap();
        let Decl::Func(func) = &file.decls[0] else {
            panic!("expected function");
        };
        resolve_body(
            &mut fixture.ctx,
            strategy,
            fixture.owner,
            func.recv.as_ref(),
            &func.ty,
            func.body.as_ref().unwrap(),
        );
    }

    fn relations(ctx: &AnalysisContext) -> Vec<(NodeId, Relation)> {
        ctx.edges().iter().map(|e| (e.to, e.relation)).collect()
    }

    #[test]
    fn one_calls_edge_per_call_site() {
        let mut f = fixture();
        run(
            &mut f,
            &SyntacticStrategy,
            "package main\nfunc run() {\n\thelper()\n\tif ok := helper(); ok {\n\t\tgo func() { helper() }()\n\t}\n\tfmt.Println(1)\n}\n",
        );
        let calls = relations(&f.ctx);
        assert_eq!(calls, vec![(f.helper, Relation::Calls); 3]);
    }

    #[test]
    fn literals_and_declarations_produce_type_edges() {
        let mut f = fixture();
        run(
            &mut f,
            &SyntacticStrategy,
            "package main\nfunc run() {\n\ta := &Account{}\n\tvar s Store\n\tvar p *Account\n\t_, _, _ = a, s, p\n}\n",
        );
        assert_eq!(
            relations(&f.ctx),
            vec![
                (f.account, Relation::Instantiates),
                (f.store, Relation::Uses),
                (f.account, Relation::Uses),
            ]
        );
    }

    #[test]
    fn scoped_strategy_respects_shadowing() {
        let source = "package main\nfunc run() {\n\thelper := func() int { return 1 }\n\thelper()\n}\n";

        let mut syntactic = fixture();
        run(&mut syntactic, &SyntacticStrategy, source);
        assert_eq!(
            relations(&syntactic.ctx),
            vec![(syntactic.helper, Relation::Calls)]
        );

        let mut scoped = fixture();
        run(&mut scoped, &ScopedStrategy, source);
        assert!(scoped.ctx.edges().is_empty());
    }

    #[test]
    fn scoped_strategy_treats_parameters_as_locals() {
        let mut f = fixture();
        run(
            &mut f,
            &ScopedStrategy,
            "package main\nfunc run(helper func()) {\n\thelper()\n\t{\n\t\tAccount := 1\n\t\t_ = Account\n\t}\n\t_ = Account{}\n}\n",
        );
        assert_eq!(relations(&f.ctx), vec![(f.account, Relation::Instantiates)]);
    }

    #[test]
    fn case_bodies_resolve_in_source_order() {
        let mut f = fixture();
        run(
            &mut f,
            &SyntacticStrategy,
            "package main\nfunc run(n int) {\n\tswitch n {\n\tcase 1:\n\t\thelper()\n\t\tx := Account{}\n\t\t_ = x\n\t}\n}\n",
        );
        assert_eq!(
            relations(&f.ctx),
            vec![
                (f.helper, Relation::Calls),
                (f.account, Relation::Instantiates),
            ]
        );
    }

    #[test]
    fn scoped_strategy_binds_case_locals_after_their_definition() {
        let mut f = fixture();
        run(
            &mut f,
            &ScopedStrategy,
            "package main\nfunc run(n int) {\n\tswitch n {\n\tcase 1:\n\t\thelper()\n\t\thelper := 2\n\t\t_ = helper\n\t}\n}\n",
        );
        assert_eq!(relations(&f.ctx), vec![(f.helper, Relation::Calls)]);
    }

    #[test]
    fn scoped_strategy_binds_header_clauses_over_bodies() {
        let mut f = fixture();
        run(
            &mut f,
            &ScopedStrategy,
            "package main\nfunc run(fns []func()) {\n\tfor _, helper := range fns {\n\t\thelper()\n\t}\n\tif helper := pick(); helper != nil {\n\t\thelper()\n\t}\n\thelper()\n}\n",
        );
        assert_eq!(relations(&f.ctx), vec![(f.helper, Relation::Calls)]);
    }
}
