//! The Symbol Graph: per-chunk trees of declared [`Sym`]s plus the
//! cross-module `sym_cache`.
//!
//! Every symbol is reserved with a stable [`SymId`] before anything about it
//! is known beyond its name and parent -- cycles between symbols (a type that
//! refers to itself, two static vars that reference each other) are tolerated
//! because callers only ever need the *identity*, never the fully-resolved
//! contents, until they actually walk into the symbol's body.

use rustc_hash::FxHashMap;

use mira_ir::Name;
use mira_types::TypeId;

use crate::error::ResolveError;

/// One compilation unit, owning its own symbol tree and IR.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ChunkId(u32);

impl ChunkId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Arena handle into a [`SymbolGraph`]. Stable for the compilation: a
/// placeholder referenced before resolution remains the *same* `SymId` after
/// resolution completes (the one documented exception is `Distinct` template
/// variants, which may re-materialize as a new symbol; see `mira_generics`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct SymId(u32);

impl SymId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// What kind of declaration a [`Sym`] names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymKind {
    Chunk,
    /// A forward reference reserved before its target is known.
    Placeholder,
    UserVar,
    HostVar,
    ContextVar,
    Func,
    /// An overload set: the head of a `Func` linked list via `Sym::next`.
    FuncSym,
    Template,
    FuncTemplate,
    ObjectT,
    StructT,
    EnumT,
    EnumMember,
    TraitT,
    HostObjT,
    Type,
    DistinctT,
    Field,
    TypeAlias,
    UseAlias,
    ModuleAlias,
}

/// A named declaration node.
#[derive(Clone, Debug)]
pub struct Sym {
    pub id: SymId,
    pub name: Name,
    pub kind: SymKind,
    pub parent: Option<SymId>,
    pub chunk: ChunkId,
    /// The module this symbol's identity root belongs to; visibility checks
    /// compare this against the querying module.
    pub module: Name,
    pub exported: bool,
    /// Filled in once `resolve` has run; `false` for a freshly reserved sym.
    pub resolved: bool,
    /// Type assigned during resolution, if this symbol denotes a value/field.
    pub ty: Option<TypeId>,
    /// For `Func` symbols aggregated into a `FuncSym` overload set: the next
    /// func sharing parent + base name, in declaration order.
    pub next: Option<SymId>,
    /// Back-reference to the `Variant` that produced this symbol, if it is a
    /// template expansion leaf. Owned by `mira_generics`; stored here as a
    /// raw index so this crate doesn't depend on the generics crate.
    pub variant_of: Option<u32>,
}

impl Sym {
    fn new(id: SymId, name: Name, kind: SymKind, parent: Option<SymId>, chunk: ChunkId, module: Name) -> Self {
        Self {
            id,
            name,
            kind,
            parent,
            chunk,
            module,
            exported: false,
            resolved: false,
            ty: None,
            next: None,
            variant_of: None,
        }
    }
}

/// Owns every [`Sym`] for one compilation and the maps used to look them up.
#[derive(Default, Debug)]
pub struct SymbolGraph {
    syms: Vec<Sym>,
    /// Per-parent name maps: `(parent, name) -> SymId`. `parent = None` keys
    /// the root (module-level) namespace.
    children: FxHashMap<(Option<SymId>, Name), SymId>,
    /// Cross-module memoization of name -> symbol lookups scoped to a chunk.
    sym_cache: FxHashMap<(ChunkId, Name), SymId>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh symbol with name + parent only. Rejects a duplicate by
    /// path (same parent + name already reserved) with `Redeclaration`,
    /// implementing `resolveLocalObjectSym`'s duplicate check.
    pub fn reserve(
        &mut self,
        name: Name,
        kind: SymKind,
        parent: Option<SymId>,
        chunk: ChunkId,
        module: Name,
    ) -> Result<SymId, ResolveError> {
        if let Some(&existing) = self.children.get(&(parent, name)) {
            return Err(ResolveError::Redeclaration {
                name,
                first: existing,
            });
        }
        let id = SymId::from_raw(self.syms.len() as u32);
        tracing::trace!(id = id.raw(), kind = ?kind, "reserve sym");
        self.syms.push(Sym::new(id, name, kind, parent, chunk, module));
        self.children.insert((parent, name), id);
        self.sym_cache.insert((chunk, name), id);
        Ok(id)
    }

    /// Append `func` to the overload chain of `head` (a `FuncSym`). Both
    /// share parent + base name by construction; callers never observe
    /// individual `Func`s until the matcher selects one.
    pub fn append_overload(&mut self, head: SymId, func: SymId) {
        let mut cursor = head;
        loop {
            let next = self.syms[cursor.raw() as usize].next;
            match next {
                Some(n) => cursor = n,
                None => {
                    self.syms[cursor.raw() as usize].next = Some(func);
                    return;
                }
            }
        }
    }

    pub fn get(&self, id: SymId) -> &Sym {
        &self.syms[id.raw() as usize]
    }

    pub fn get_mut(&mut self, id: SymId) -> &mut Sym {
        &mut self.syms[id.raw() as usize]
    }

    pub fn mark_resolved(&mut self, id: SymId, ty: Option<TypeId>) {
        let sym = self.get_mut(id);
        sym.resolved = true;
        sym.ty = ty;
    }

    pub fn mark_exported(&mut self, id: SymId) {
        self.get_mut(id).exported = true;
    }

    /// `sym_cache` lookup, scoped to a chunk: a name memoized as resolved
    /// inside this chunk resolves instantly on subsequent references.
    pub fn cached_lookup(&self, chunk: ChunkId, name: Name) -> Option<SymId> {
        self.sym_cache.get(&(chunk, name)).copied()
    }

    pub fn lookup_child(&self, parent: Option<SymId>, name: Name) -> Option<SymId> {
        self.children.get(&(parent, name)).copied()
    }

    pub fn len(&self) -> usize {
        self.syms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }

    /// Visibility rule: a symbol is visible from module `from` iff it is
    /// `exported` or its root module equals `from`. Nested symbols inherit
    /// the exportedness of their ancestors.
    pub fn is_visible(&self, id: SymId, from: Name) -> bool {
        let mut cur = id;
        loop {
            let sym = self.get(cur);
            if sym.module == from {
                return true;
            }
            if !sym.exported {
                return false;
            }
            match sym.parent {
                Some(p) => cur = p,
                None => return true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    #[test]
    fn reserve_then_lookup_roundtrips() {
        let mut g = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let id = g
            .reserve(n(1), SymKind::UserVar, None, chunk, n(0))
            .unwrap();
        assert_eq!(g.lookup_child(None, n(1)), Some(id));
        assert_eq!(g.cached_lookup(chunk, n(1)), Some(id));
    }

    #[test]
    fn duplicate_path_is_redeclaration() {
        let mut g = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        g.reserve(n(1), SymKind::UserVar, None, chunk, n(0)).unwrap();
        let err = g
            .reserve(n(1), SymKind::UserVar, None, chunk, n(0))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Redeclaration { .. }));
    }

    #[test]
    fn overload_chain_appends_in_declaration_order() {
        let mut g = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let head = g
            .reserve(n(1), SymKind::FuncSym, None, chunk, n(0))
            .unwrap();
        let f1 = g
            .reserve(n(2), SymKind::Func, Some(head), chunk, n(0))
            .unwrap();
        let f2 = g
            .reserve(n(3), SymKind::Func, Some(head), chunk, n(0))
            .unwrap();
        g.append_overload(head, f1);
        g.append_overload(head, f2);
        assert_eq!(g.get(head).next, Some(f1));
        assert_eq!(g.get(f1).next, Some(f2));
        assert_eq!(g.get(f2).next, None);
    }

    #[test]
    fn exported_nested_symbol_is_visible_from_other_module() {
        let mut g = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let home = n(100);
        let other = n(200);
        let parent = g.reserve(n(1), SymKind::ObjectT, None, chunk, home).unwrap();
        g.mark_exported(parent);
        let field = g
            .reserve(n(2), SymKind::Field, Some(parent), chunk, home)
            .unwrap();
        // field itself isn't marked exported, but its ancestor is.
        assert!(g.is_visible(field, other));
    }

    #[test]
    fn non_exported_symbol_is_hidden_from_other_module() {
        let mut g = SymbolGraph::new();
        let chunk = ChunkId::from_raw(0);
        let home = n(100);
        let other = n(200);
        let id = g.reserve(n(1), SymKind::UserVar, None, chunk, home).unwrap();
        assert!(g.is_visible(id, home));
        assert!(!g.is_visible(id, other));
    }
}
