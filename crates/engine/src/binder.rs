use crate::context::AnalysisContext;
use crate::extractor::{BodyJob, SourceUnit};
use crate::render::signature;
use crate::types::{FunctionInfo, IdPrefix, NodeKind, Relation};
use codegraph_syntax::doc_text;

/// Attach the methods of one unit to their owning structs
///
/// The receiver `T`, `*T`, `T[P]` or `*T[P]` is looked up as `package.T`, so
/// a method may bind to a struct declared in another unit of the same
/// package, provided that unit was extracted first. Returns the method bodies
/// to resolve.
pub fn bind_methods(ctx: &mut AnalysisContext, unit: &SourceUnit) -> Vec<BodyJob> {
    let mut jobs = Vec::new();

    for (idx, method) in unit.file.methods() {
        let Some(receiver) = method.receiver_type_name() else {
            log::debug!("{}: unsupported receiver on {}", unit.module_key, method.name);
            continue;
        };
        let Some(slot) = ctx.registry.owner(&unit.package, receiver).cloned() else {
            log::debug!(
                "{}: receiver {receiver} of {} is not a known struct",
                unit.module_key,
                method.name
            );
            continue;
        };

        let id = ctx.registry.allocate(IdPrefix::Func);
        let (parameters, return_type) = signature(&method.ty);
        let info = FunctionInfo {
            name: method.name.clone(),
            parameters,
            return_type,
            comment: doc_text(method.doc.as_ref()),
            id,
            package: String::new(),
            file_path: String::new(),
        };

        ctx.add_node(
            id,
            NodeKind::Function,
            method.name.as_str(),
            unit.package.as_str(),
            unit.file_name.as_str(),
        );
        ctx.registry.register_method(receiver, &method.name, id);

        match ctx
            .modules
            .get_mut(&slot.module)
            .and_then(|module| module.structs.get_mut(slot.index))
        {
            Some(owner) => owner.functions.push(info),
            None => log::warn!("Struct record for {receiver} missing in {}", slot.module),
        }
        ctx.add_edge(slot.id, id, Relation::HasMethod);

        if method.body.is_some() {
            jobs.push(BodyJob { decl: idx, owner: id });
        }
    }

    jobs
}
