use crate::config::ResolutionSchedule;
use crate::context::AnalysisContext;
use crate::registry::StructSlot;
use crate::render::{render, signature};
use crate::resolver::resolve_body;
use crate::strategy::ResolutionStrategy;
use crate::types::{
    ConstantInfo, FunctionInfo, IdPrefix, InterfaceInfo, ModuleInfo, NodeId, NodeKind, Relation,
    PropertyInfo, StructInfo, VariableInfo,
};
use codegraph_syntax::{
    doc_text, CommentGroup, Decl, Expr, Field, FuncDecl, ImportSpec, InterfaceElem, SourceFile,
    TypeDecl, TypeSpec, ValueDecl, ValueKind,
};

/// One parsed source unit ready for extraction
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path relative to the project root, used as the module key
    pub module_key: String,
    /// Base name, recorded on nodes
    pub file_name: String,
    /// Package from discovery (or the unit's own clause)
    pub package: String,
    pub file: SourceFile,
}

/// Body waiting for resolution: a declaration of a unit and its owner node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyJob {
    pub decl: usize,
    pub owner: NodeId,
}

/// Walks the top-level declarations of one unit
pub struct Extractor<'a> {
    ctx: &'a mut AnalysisContext,
    unit: &'a SourceUnit,
    schedule: ResolutionSchedule,
    strategy: &'a dyn ResolutionStrategy,
    module: ModuleInfo,
    pending: Vec<BodyJob>,
}

impl<'a> Extractor<'a> {
    pub fn new(
        ctx: &'a mut AnalysisContext,
        unit: &'a SourceUnit,
        schedule: ResolutionSchedule,
        strategy: &'a dyn ResolutionStrategy,
    ) -> Self {
        Self {
            ctx,
            unit,
            schedule,
            strategy,
            module: ModuleInfo::default(),
            pending: Vec::new(),
        }
    }

    /// Extract every declaration, store the module record in the context and
    /// return the function bodies still to be resolved
    pub fn run(mut self) -> Vec<BodyJob> {
        let unit = self.unit;
        self.module.dependencies = unit.file.imports.iter().map(dependency).collect();

        for (idx, decl) in unit.file.decls.iter().enumerate() {
            match decl {
                Decl::Func(func) if func.recv.is_none() => self.function(idx, func),
                // bound once the unit's types are known
                Decl::Func(_) => {}
                Decl::Type(decl) => self.type_decl(decl),
                Decl::Value(decl) => self.value_decl(decl),
            }
        }

        log::debug!(
            "{}: {} structs, {} functions, {} interfaces",
            unit.module_key,
            self.module.structs.len(),
            self.module.functions.len(),
            self.module.interfaces.len()
        );
        self.ctx
            .modules
            .insert(unit.module_key.clone(), self.module);
        self.pending
    }

    fn node(&mut self, id: NodeId, kind: NodeKind, name: &str) {
        let unit = self.unit;
        self.ctx
            .add_node(id, kind, name, unit.package.as_str(), unit.file_name.as_str());
    }

    fn function(&mut self, idx: usize, func: &FuncDecl) {
        let unit = self.unit;
        let id = self.ctx.registry.allocate(IdPrefix::Func);
        let (parameters, return_type) = signature(&func.ty);

        self.ctx
            .registry
            .register_function(&unit.package, &func.name, id);
        self.node(id, NodeKind::Function, &func.name);
        self.module.functions.push(FunctionInfo {
            name: func.name.clone(),
            parameters,
            return_type,
            comment: doc_text(func.doc.as_ref()),
            id,
            package: unit.package.clone(),
            file_path: unit.module_key.clone(),
        });

        let Some(body) = &func.body else {
            return;
        };
        match self.schedule {
            ResolutionSchedule::Interleaved => {
                resolve_body(self.ctx, self.strategy, id, None, &func.ty, body)
            }
            ResolutionSchedule::Deferred => self.pending.push(BodyJob { decl: idx, owner: id }),
        }
    }

    fn type_decl(&mut self, decl: &TypeDecl) {
        for spec in &decl.specs {
            match &spec.ty {
                _ if spec.alias => {
                    log::trace!("Skipping type alias {}", spec.name);
                }
                Expr::Struct(fields) => self.struct_type(spec, fields, decl.doc.as_ref()),
                Expr::Interface(elems) => self.interface_type(spec, elems, decl.doc.as_ref()),
                other => {
                    log::trace!("Skipping type {} ({})", spec.name, other.tag());
                }
            }
        }
    }

    fn struct_type(&mut self, spec: &TypeSpec, fields: &[Field], doc: Option<&CommentGroup>) {
        let unit = self.unit;
        let id = self.ctx.registry.allocate(IdPrefix::Struct);
        let slot = StructSlot {
            id,
            module: unit.module_key.clone(),
            index: self.module.structs.len(),
        };
        self.ctx
            .registry
            .register_struct(&spec.name, slot, &unit.package);
        self.node(id, NodeKind::Struct, &spec.name);

        let mut properties = Vec::new();
        for field in fields {
            let ty = render(&field.ty);
            let comment = doc_text(field.doc.as_ref());
            let target = self.ctx.registry.type_id(&ty);

            if field.names.is_empty() {
                if let Some(target) = target {
                    self.ctx.add_edge(id, target, Relation::Embeds);
                }
                properties.push(PropertyInfo {
                    name: ty.clone(),
                    ty,
                    comment,
                });
                continue;
            }

            for name in &field.names {
                if let Some(target) = target {
                    self.ctx.add_edge(id, target, Relation::HasFieldOfType);
                }
                properties.push(PropertyInfo {
                    name: name.clone(),
                    ty: ty.clone(),
                    comment: comment.clone(),
                });
            }
        }

        self.module.structs.push(StructInfo {
            name: spec.name.clone(),
            functions: Vec::new(),
            properties,
            comment: doc_text(doc),
            id,
        });
    }

    fn interface_type(
        &mut self,
        spec: &TypeSpec,
        elems: &[InterfaceElem],
        doc: Option<&CommentGroup>,
    ) {
        let id = self.ctx.registry.allocate(IdPrefix::Interface);
        self.ctx.registry.register_interface(&spec.name, id);
        self.node(id, NodeKind::Interface, &spec.name);

        let mut functions = Vec::new();
        for elem in elems {
            let InterfaceElem::Method { doc, name, ty } = elem else {
                continue;
            };
            let method_id = self.ctx.registry.allocate(IdPrefix::Method);
            let (parameters, return_type) = signature(ty);
            self.node(method_id, NodeKind::InterfaceMethod, name);
            self.ctx.add_edge(id, method_id, Relation::Declares);
            functions.push(FunctionInfo {
                name: name.clone(),
                parameters,
                return_type,
                comment: doc_text(doc.as_ref()),
                id: method_id,
                package: String::new(),
                file_path: String::new(),
            });
        }

        self.module.interfaces.push(InterfaceInfo {
            name: spec.name.clone(),
            functions,
            comment: doc_text(doc),
            id,
        });
    }

    fn value_decl(&mut self, decl: &ValueDecl) {
        let prefix = match decl.kind {
            ValueKind::Const => IdPrefix::Const,
            ValueKind::Var => IdPrefix::Var,
        };
        let kind = match decl.kind {
            ValueKind::Const => NodeKind::Constant,
            ValueKind::Var => NodeKind::Variable,
        };

        for spec in &decl.specs {
            for (i, name) in spec.names.iter().enumerate() {
                let id = self.ctx.registry.allocate(prefix);
                self.node(id, kind, name);

                let ty = spec.ty.as_ref().map(render).unwrap_or_default();
                if !ty.is_empty() {
                    if let Some(target) = self.ctx.registry.type_id(&ty) {
                        self.ctx.add_edge(id, target, Relation::HasType);
                    }
                }
                let value = spec.values.get(i).map(render).unwrap_or_default();

                match decl.kind {
                    ValueKind::Const => self.module.constants.push(ConstantInfo {
                        name: name.clone(),
                        ty,
                        value,
                        id,
                    }),
                    ValueKind::Var => self.module.variables.push(VariableInfo {
                        name: name.clone(),
                        ty,
                        value,
                        id,
                    }),
                }
            }
        }
    }
}

/// `import "path"` or `import alias "path"`
fn dependency(spec: &ImportSpec) -> String {
    match &spec.alias {
        Some(alias) => format!("import {alias} {}", spec.path),
        None => format!("import {}", spec.path),
    }
}
