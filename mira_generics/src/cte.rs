//! `resolveCtValue` and the two `comptime <ident>` modes (SPEC_FULL.md §4.4).

use mira_ir::{Name, Span};
use mira_sema::{ChunkId, CtIdentMode, ResolveContextStack, ResolveError, Resolver, SymKind, SymbolGraph};
use mira_types::{Type, TypeStore};
use mira_values::Value;

use crate::ct_expr::CtExprNode;

/// Evaluate a simple compile-time expression directly. Anything the
/// expression grammar accepts but this function doesn't handle maps to
/// [`ResolveError::UnsupportedNode`] ("compile-time expression unsupported").
pub fn resolve_ct_value(
    node: &CtExprNode,
    types: &mut TypeStore,
    syms: &SymbolGraph,
    ctx: &mut ResolveContextStack,
    module: Name,
    chunk: ChunkId,
) -> Result<Value, ResolveError> {
    match node {
        CtExprNode::Int(n) => Ok(Value::int(*n)),
        CtExprNode::Float(bits) => Ok(Value::Float(f64::from_bits(*bits))),
        CtExprNode::Str(s) | CtExprNode::RawStr(s) => Ok(Value::string(s.clone())),
        CtExprNode::Void => Ok(Value::Void),
        CtExprNode::Ident { name, span } => {
            resolve_ident_ct_value(*name, *span, types, syms, ctx, module, chunk)
        }
        CtExprNode::ComptimeIdent { name, span } => resolve_comptime_ident(*name, *span, types, ctx),
        CtExprNode::TypeExpr(spanned) => {
            let mut resolver = Resolver::new(types, syms, ctx, module, chunk);
            resolver.resolve_ct_value(spanned)
        }
    }
}

fn resolve_ident_ct_value(
    name: Name,
    span: Span,
    types: &mut TypeStore,
    syms: &SymbolGraph,
    ctx: &ResolveContextStack,
    module: Name,
    chunk: ChunkId,
) -> Result<Value, ResolveError> {
    if let Some(v) = ctx.lookup_ct_param(name) {
        return Ok(v.retain());
    }
    let resolver = Resolver::new(types, syms, ctx, module, chunk);
    let sym_id = resolver.resolve_ident_as_sym(name, span)?;
    let sym = syms.get(sym_id);
    match sym.kind {
        SymKind::ObjectT
        | SymKind::StructT
        | SymKind::EnumT
        | SymKind::TraitT
        | SymKind::HostObjT
        | SymKind::DistinctT
        | SymKind::Type
        | SymKind::TypeAlias => match sym.ty {
            Some(ty) => Ok(Value::type_handle(ty)),
            None => Err(ResolveError::MissingInitializer { span, name }),
        },
        // A single (non-overloaded) func symbol folding to a callable value
        // is deferred to the Matcher, which is the component that already
        // needs to distinguish a single-candidate `FuncSym` from a real
        // overload set (SPEC_FULL.md §4.5).
        _ => Err(ResolveError::Unsupported {
            span,
            what: "compile-time expression: non-type identifier",
        }),
    }
}

/// `comptime <ident>`: declares a new ct-parameter in
/// [`CtIdentMode::ParseCtInferredParams`] mode, or looks one up in
/// [`CtIdentMode::ExpandCtInferredParams`] mode.
fn resolve_comptime_ident(
    name: Name,
    span: Span,
    types: &mut TypeStore,
    ctx: &mut ResolveContextStack,
) -> Result<Value, ResolveError> {
    let mode = ctx
        .top()
        .map(|f| f.ct_ident_mode)
        .unwrap_or(CtIdentMode::ParseCtInferredParams);
    match mode {
        CtIdentMode::ParseCtInferredParams => {
            let pos = ctx
                .top()
                .ok_or(ResolveError::Unsupported {
                    span,
                    what: "comptime <ident> outside any resolve frame",
                })?
                .ct_param_count() as u32;
            let ct_ref_ty = types.ensure_ct_ref_type(pos);
            let frame = ctx.top_mut().ok_or(ResolveError::Unsupported {
                span,
                what: "comptime <ident> outside any resolve frame",
            })?;
            let idx = frame.declare_ct_param(name, Value::type_handle(ct_ref_ty));
            let ct_infer_ty = types.push_type(Type::CtInfer(idx));
            Ok(Value::type_handle(ct_infer_ty))
        }
        CtIdentMode::ExpandCtInferredParams => ctx
            .lookup_ct_param(name)
            .map(Value::retain)
            .ok_or(ResolveError::SymNotFound { span, name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mira_sema::{ContextOrigin, ResolveContext, SymbolGraph};
    use mira_types::TypeId;

    fn n(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    #[test]
    fn literals_fold_directly() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let mut ctx = ResolveContextStack::new();
        let v = resolve_ct_value(&CtExprNode::Int(42), &mut types, &syms, &mut ctx, n(0), ChunkId::from_raw(0))
            .unwrap();
        assert_eq!(v.as_int(), Some(42));
    }

    #[test]
    fn void_folds_to_void() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let mut ctx = ResolveContextStack::new();
        let v = resolve_ct_value(&CtExprNode::Void, &mut types, &syms, &mut ctx, n(0), ChunkId::from_raw(0)).unwrap();
        assert!(matches!(v, Value::Void));
    }

    #[test]
    fn comptime_ident_declares_in_parse_mode() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let mut ctx = ResolveContextStack::new();
        ctx.push(ResolveContext::new(ContextOrigin::Func, false));

        let node = CtExprNode::ComptimeIdent {
            name: n(1),
            span: Span::new(0, 1),
        };
        let v = resolve_ct_value(&node, &mut types, &syms, &mut ctx, n(0), ChunkId::from_raw(0)).unwrap();
        let ty = v.as_type_id().expect("comptime <ident> in parse mode folds to a Type value");
        assert!(matches!(types.get(ty), Type::CtInfer(0)));
        assert_eq!(ctx.top().unwrap().ct_param_count(), 1);
    }

    #[test]
    fn comptime_ident_looks_up_in_expand_mode() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let mut ctx = ResolveContextStack::new();
        let mut frame = ResolveContext::new(ContextOrigin::Func, false);
        frame.declare_ct_param(n(1), Value::int(9));
        frame.ct_ident_mode = CtIdentMode::ExpandCtInferredParams;
        ctx.push(frame);

        let node = CtExprNode::ComptimeIdent {
            name: n(1),
            span: Span::new(0, 1),
        };
        let v = resolve_ct_value(&node, &mut types, &syms, &mut ctx, n(0), ChunkId::from_raw(0)).unwrap();
        assert_eq!(v.as_int(), Some(9));
    }

    #[test]
    fn comptime_ident_missing_in_expand_mode_is_sym_not_found() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let mut ctx = ResolveContextStack::new();
        let mut frame = ResolveContext::new(ContextOrigin::Func, false);
        frame.ct_ident_mode = CtIdentMode::ExpandCtInferredParams;
        ctx.push(frame);

        let node = CtExprNode::ComptimeIdent {
            name: n(7),
            span: Span::new(0, 1),
        };
        let err = resolve_ct_value(&node, &mut types, &syms, &mut ctx, n(0), ChunkId::from_raw(0)).unwrap_err();
        assert!(matches!(err, ResolveError::SymNotFound { .. }));
    }

    #[test]
    fn ident_resolving_to_a_declared_type_folds_to_a_type_value() {
        use mira_sema::SymKind;
        let mut types = TypeStore::new();
        let mut syms = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let sym = syms.reserve(n(3), SymKind::StructT, None, chunk, n(0)).unwrap();
        syms.mark_resolved(sym, Some(TypeId::INT));
        let mut ctx = ResolveContextStack::new();
        let node = CtExprNode::Ident {
            name: n(3),
            span: Span::new(0, 1),
        };
        let v = resolve_ct_value(&node, &mut types, &syms, &mut ctx, n(0), chunk).unwrap();
        assert_eq!(v.as_type_id(), Some(TypeId::INT));
    }
}
