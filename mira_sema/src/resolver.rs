//! `resolveTypeSpecNode` and identifier resolution (SPEC_FULL.md §4.3).
//!
//! The [`Resolver`] is the single place that turns surface type syntax and
//! bare identifiers into [`mira_types`] handles and [`SymId`]s. It consults,
//! in order: the active [`ResolveContextStack`] (ct-parameters currently in
//! scope), the [`SymbolGraph`] (declared symbols, walking dotted paths
//! through parents), and finally `mira_types::TypeStore`'s built-in
//! compound-type constructors for sugar forms.

use mira_ir::Name;
use mira_stack::ensure_sufficient_stack;
use mira_types::{Type, TypeId, TypeStore};
use mira_values::Value;

use crate::context::ResolveContextStack;
use crate::error::ResolveError;
use crate::sym::{ChunkId, SymId, SymKind, SymbolGraph};
use crate::type_spec::{Spanned, TypeSpecNode};

/// Resolves type-spec nodes and identifiers against a [`SymbolGraph`] and
/// [`ResolveContextStack`], allocating into a shared [`TypeStore`].
pub struct Resolver<'a> {
    pub types: &'a mut TypeStore,
    pub syms: &'a SymbolGraph,
    pub ctx: &'a ResolveContextStack,
    /// The module the symbol being resolved belongs to, for visibility checks.
    pub module: Name,
    pub chunk: ChunkId,
}

impl<'a> Resolver<'a> {
    pub fn new(
        types: &'a mut TypeStore,
        syms: &'a SymbolGraph,
        ctx: &'a ResolveContextStack,
        module: Name,
        chunk: ChunkId,
    ) -> Self {
        Self {
            types,
            syms,
            ctx,
            module,
            chunk,
        }
    }

    /// Resolve a type-spec AST node to a [`TypeId`].
    ///
    /// Recurses through compound sugar forms, so nested pointer-of-array-of
    /// slice specs are guarded against stack exhaustion the same way IR
    /// lowering and template expansion are (SPEC_FULL.md §1.1).
    pub fn resolve_type_spec(&mut self, node: &Spanned) -> Result<TypeId, ResolveError> {
        ensure_sufficient_stack(|| self.resolve_type_spec_inner(node))
    }

    fn resolve_type_spec_inner(&mut self, node: &Spanned) -> Result<TypeId, ResolveError> {
        match &node.node {
            TypeSpecNode::Null => Ok(TypeId::DYN),
            TypeSpecNode::Ident(name) => self.resolve_ident_as_type(*name, node.span),
            TypeSpecNode::Path(path) => self.resolve_path_as_type(path, node.span),
            TypeSpecNode::Ptr(inner) => {
                let elem = self.resolve_type_spec(inner)?;
                Ok(self.types.get_pointer_type(elem))
            }
            TypeSpecNode::Ref(inner) => {
                let elem = self.resolve_type_spec(inner)?;
                Ok(self.types.get_ref_type(elem))
            }
            TypeSpecNode::ArraySized { len, elem } => {
                let elem = self.resolve_type_spec(elem)?;
                Ok(self.types.get_array_type(*len, elem))
            }
            TypeSpecNode::PtrSlice(inner) => {
                let elem = self.resolve_type_spec(inner)?;
                Ok(self.types.get_ptr_slice_type(elem))
            }
            TypeSpecNode::RefSlice(inner) => {
                let elem = self.resolve_type_spec(inner)?;
                Ok(self.types.get_ref_slice_type(elem))
            }
            TypeSpecNode::Option(inner) => {
                let elem = self.resolve_type_spec(inner)?;
                Ok(self.types.get_option_type(elem))
            }
            TypeSpecNode::Func {
                params,
                ret,
                is_union,
            } => {
                let mut param_ids = Vec::with_capacity(params.len());
                for p in params {
                    param_ids.push(self.resolve_type_spec(p)?);
                }
                let ret_id = self.resolve_type_spec(ret)?;
                let sig = self.types.ensure_func_sig(param_ids, ret_id);
                Ok(if *is_union {
                    self.types.get_func_union_type(sig)
                } else {
                    self.types.get_func_ptr_type(sig)
                })
            }
        }
    }

    /// A bare identifier in type position: a ct-parameter bound to a `Type`
    /// value takes priority over a declared symbol of the same name, since
    /// a template body's own parameter can shadow an outer static type.
    fn resolve_ident_as_type(&mut self, name: Name, span: mira_ir::Span) -> Result<TypeId, ResolveError> {
        if let Some(value) = self.ctx.lookup_ct_param(name) {
            if let Some(id) = value.as_type_id() {
                return Ok(id);
            }
        }
        let sym_id = self.resolve_ident_as_sym(name, span)?;
        self.type_of_resolved_sym(sym_id, name, span)
    }

    fn resolve_path_as_type(&mut self, path: &[Name], span: mira_ir::Span) -> Result<TypeId, ResolveError> {
        let sym_id = self.resolve_path_as_sym(path, span)?;
        let last = *path.last().ok_or(ResolveError::Unsupported {
            span,
            what: "empty type-spec path",
        })?;
        self.type_of_resolved_sym(sym_id, last, span)
    }

    fn type_of_resolved_sym(&self, sym_id: SymId, name: Name, span: mira_ir::Span) -> Result<TypeId, ResolveError> {
        let sym = self.syms.get(sym_id);
        match sym.ty {
            Some(ty) => Ok(ty),
            None => Err(ResolveError::MissingInitializer { span, name }),
        }
    }

    /// Resolve a bare identifier to a symbol, honoring the `sym_cache`
    /// fast-path before falling back to the module-root namespace lookup.
    pub fn resolve_ident_as_sym(&self, name: Name, span: mira_ir::Span) -> Result<SymId, ResolveError> {
        if let Some(id) = self.syms.cached_lookup(self.chunk, name) {
            return self.check_visible(id, span, name);
        }
        match self.syms.lookup_child(None, name) {
            Some(id) => self.check_visible(id, span, name),
            None => Err(ResolveError::SymNotFound { span, name }),
        }
    }

    /// Walk a dotted path through the symbol tree: each segment after the
    /// first resolves as a child of the previous segment's symbol.
    pub fn resolve_path_as_sym(&self, path: &[Name], span: mira_ir::Span) -> Result<SymId, ResolveError> {
        let mut iter = path.iter();
        let head = *iter.next().ok_or(ResolveError::Unsupported {
            span,
            what: "empty symbol path",
        })?;
        let mut cur = self.resolve_ident_as_sym(head, span)?;
        for &segment in iter {
            cur = match self.syms.lookup_child(Some(cur), segment) {
                Some(id) => self.check_visible(id, span, segment)?,
                None => return Err(ResolveError::SymNotFound { span, name: segment }),
            };
        }
        Ok(cur)
    }

    fn check_visible(&self, id: SymId, span: mira_ir::Span, name: Name) -> Result<SymId, ResolveError> {
        if self.syms.is_visible(id, self.module) {
            Ok(id)
        } else {
            Err(ResolveError::NotExported { span, name })
        }
    }

    /// A `distinct` type reference requires the resolved symbol to be a
    /// `DistinctT`, per `getResolvedDistinctSym`.
    pub fn resolve_distinct_sym(&self, name: Name, span: mira_ir::Span) -> Result<SymId, ResolveError> {
        let id = self.resolve_ident_as_sym(name, span)?;
        match self.syms.get(id).kind {
            SymKind::DistinctT => Ok(id),
            _ => Err(ResolveError::NotDistinct { span, name }),
        }
    }

    /// Fold a resolved [`TypeId`] into a compile-time [`Value`], used by
    /// pointer/array/slice type-spec expressions that appear where a value
    /// is expected (SPEC_FULL.md §4.4, "type expressions fold to a Type value").
    pub fn resolve_ct_value(&mut self, node: &Spanned) -> Result<Value, ResolveError> {
        let id = self.resolve_type_spec(node)?;
        Ok(Value::type_handle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ResolveContextStack;
    use mira_ir::Span;

    fn n(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    fn spanned(node: TypeSpecNode) -> Spanned {
        Spanned::new(node, Span::new(0, 1))
    }

    #[test]
    fn null_node_resolves_to_dyn() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, n(0), ChunkId::from_raw(0));
        let id = r.resolve_type_spec(&spanned(TypeSpecNode::Null)).unwrap();
        assert_eq!(id, TypeId::DYN);
    }

    #[test]
    fn pointer_sugar_interns_through_the_store() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, n(0), ChunkId::from_raw(0));
        let node = spanned(TypeSpecNode::Ptr(Box::new(spanned(TypeSpecNode::Ident(n(99))))));
        // Ident(99) isn't declared, so resolving the pointee fails first.
        let err = r.resolve_type_spec(&node).unwrap_err();
        assert!(matches!(err, ResolveError::SymNotFound { .. }));
    }

    #[test]
    fn array_sugar_resolves_declared_elem_type() {
        let mut types = TypeStore::new();
        let mut syms = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let elem_sym = syms
            .reserve(n(1), SymKind::StructT, None, chunk, n(0))
            .unwrap();
        syms.mark_resolved(elem_sym, Some(TypeId::INT));
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, n(0), chunk);
        let node = spanned(TypeSpecNode::ArraySized {
            len: 4,
            elem: Box::new(spanned(TypeSpecNode::Ident(n(1)))),
        });
        let id = r.resolve_type_spec(&node).unwrap();
        assert_eq!(*types.get(id), Type::Array { len: 4, elem: TypeId::INT });
    }

    /// `?int` resolved twice must share one `TypeId` (SPEC_FULL.md §6,
    /// `Option[T]` exists exactly once; §8 memoization invariant).
    #[test]
    fn option_sugar_is_interned_across_resolutions() {
        let mut types = TypeStore::new();
        let syms = SymbolGraph::new();
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, n(0), ChunkId::from_raw(0));
        let node = || spanned(TypeSpecNode::Option(Box::new(spanned(TypeSpecNode::Null))));
        let first = r.resolve_type_spec(&node()).unwrap();
        let second = r.resolve_type_spec(&node()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ct_param_type_binding_shadows_a_declared_symbol() {
        let mut types = TypeStore::new();
        let mut syms = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let sym = syms.reserve(n(5), SymKind::StructT, None, chunk, n(0)).unwrap();
        syms.mark_resolved(sym, Some(TypeId::INT));

        let mut ctx = ResolveContextStack::new();
        let mut frame = crate::context::ResolveContext::new(crate::context::ContextOrigin::Func, false);
        frame.declare_ct_param(n(5), Value::type_handle(TypeId::STR));
        ctx.push(frame);

        let mut r = Resolver::new(&mut types, &syms, &ctx, n(0), chunk);
        let id = r
            .resolve_type_spec(&spanned(TypeSpecNode::Ident(n(5))))
            .unwrap();
        assert_eq!(id, TypeId::STR);
    }

    #[test]
    fn not_exported_symbol_is_rejected_from_other_module() {
        let mut types = TypeStore::new();
        let mut syms = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let home = n(100);
        let other = n(200);
        let sym = syms.reserve(n(1), SymKind::StructT, None, chunk, home).unwrap();
        syms.mark_resolved(sym, Some(TypeId::INT));
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, other, chunk);
        let err = r
            .resolve_type_spec(&spanned(TypeSpecNode::Ident(n(1))))
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotExported { .. }));
    }

    #[test]
    fn dotted_path_walks_children() {
        let mut types = TypeStore::new();
        let mut syms = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let home = n(0);
        let parent = syms.reserve(n(1), SymKind::ObjectT, None, chunk, home).unwrap();
        let field = syms
            .reserve(n(2), SymKind::Field, Some(parent), chunk, home)
            .unwrap();
        syms.mark_resolved(field, Some(TypeId::BOOL));
        let ctx = ResolveContextStack::new();
        let mut r = Resolver::new(&mut types, &syms, &ctx, home, chunk);
        let id = r
            .resolve_type_spec(&spanned(TypeSpecNode::Path(vec![n(1), n(2)])))
            .unwrap();
        assert_eq!(id, TypeId::BOOL);
    }
}
