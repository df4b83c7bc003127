//! The Declaration Pipeline's static-initializer ordering (SPEC_FULL.md §4.7).
//!
//! Reserve/resolve itself is just [`SymbolGraph::reserve`] followed by
//! `mark_resolved` -- there is no separate type for that half. What this
//! module adds is the piece SPEC_FULL.md calls out as its own concrete
//! algorithm: tracking which static variable initializers reference which
//! others, then emitting them in dependency order before `main` runs,
//! rejecting a cycle as `CircularInit`.
//!
//! Grounded on the same small-scale DFS-with-in-progress-marker shape
//! `mira_canon`'s exhaustiveness checker already uses for enum variant
//! trees -- no graph crate, because the graph is per-chunk and built once.

use rustc_hash::{FxHashMap, FxHashSet};

use mira_ir::{Name, Span};
use mira_stack::ensure_sufficient_stack;

use crate::error::ResolveError;
use crate::sym::SymId;

/// The dependency graph among a chunk's static variable initializers.
#[derive(Default, Debug)]
pub struct DeclPipeline {
    /// Declaration order; also the default iteration order for `topo_order`.
    declared: Vec<SymId>,
    info: FxHashMap<SymId, (Name, Span)>,
    /// `var -> the other vars its initializer references`.
    edges: FxHashMap<SymId, Vec<SymId>>,
}

impl DeclPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve-phase registration: record that `sym` is a static var whose
    /// initializer will later be walked for dependencies.
    pub fn register_var(&mut self, sym: SymId, name: Name, span: Span) {
        self.declared.push(sym);
        self.info.insert(sym, (name, span));
        self.edges.entry(sym).or_default();
    }

    /// Resolve-phase bookkeeping: `var`'s initializer references `depends_on`.
    pub fn add_dependency(&mut self, var: SymId, depends_on: SymId) {
        self.edges.entry(var).or_default().push(depends_on);
    }

    /// Emit order for `main`'s static-init preamble: every dependency before
    /// the variable that references it (`semaUserVarInitDeep`'s ordering).
    pub fn topo_order(&self) -> Result<Vec<SymId>, ResolveError> {
        let mut visited = FxHashSet::default();
        let mut in_progress = FxHashSet::default();
        let mut out = Vec::with_capacity(self.declared.len());
        for &start in &self.declared {
            self.visit(start, &mut visited, &mut in_progress, &mut out)?;
        }
        Ok(out)
    }

    fn visit(
        &self,
        sym: SymId,
        visited: &mut FxHashSet<SymId>,
        in_progress: &mut FxHashSet<SymId>,
        out: &mut Vec<SymId>,
    ) -> Result<(), ResolveError> {
        ensure_sufficient_stack(|| self.visit_inner(sym, visited, in_progress, out))
    }

    fn visit_inner(
        &self,
        sym: SymId,
        visited: &mut FxHashSet<SymId>,
        in_progress: &mut FxHashSet<SymId>,
        out: &mut Vec<SymId>,
    ) -> Result<(), ResolveError> {
        if visited.contains(&sym) {
            return Ok(());
        }
        if in_progress.contains(&sym) {
            let (name, span) = self.info.get(&sym).copied().unwrap_or((Name::EMPTY, Span::DUMMY));
            return Err(ResolveError::CircularInit { span, name });
        }
        in_progress.insert(sym);
        if let Some(deps) = self.edges.get(&sym) {
            for &dep in deps {
                self.visit_inner(dep, visited, in_progress, out)?;
            }
        }
        in_progress.remove(&sym);
        visited.insert(sym);
        out.push(sym);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    fn s(raw: u32) -> SymId {
        SymId::from_raw(raw)
    }

    #[test]
    fn independent_vars_keep_declaration_order() {
        let mut p = DeclPipeline::new();
        p.register_var(s(0), n(0), Span::DUMMY);
        p.register_var(s(1), n(1), Span::DUMMY);
        assert_eq!(p.topo_order().unwrap(), vec![s(0), s(1)]);
    }

    #[test]
    fn dependency_is_emitted_before_its_dependent() {
        let mut p = DeclPipeline::new();
        p.register_var(s(0), n(0), Span::DUMMY);
        p.register_var(s(1), n(1), Span::DUMMY);
        // var 0's initializer references var 1.
        p.add_dependency(s(0), s(1));
        assert_eq!(p.topo_order().unwrap(), vec![s(1), s(0)]);
    }

    #[test]
    fn cycle_is_circular_init() {
        let mut p = DeclPipeline::new();
        p.register_var(s(0), n(0), Span::DUMMY);
        p.register_var(s(1), n(1), Span::DUMMY);
        p.add_dependency(s(0), s(1));
        p.add_dependency(s(1), s(0));
        let err = p.topo_order().unwrap_err();
        assert!(matches!(err, ResolveError::CircularInit { .. }));
    }

    #[test]
    fn diamond_dependency_emits_shared_base_once_first() {
        let mut p = DeclPipeline::new();
        p.register_var(s(0), n(0), Span::DUMMY);
        p.register_var(s(1), n(1), Span::DUMMY);
        p.register_var(s(2), n(2), Span::DUMMY);
        p.add_dependency(s(0), s(2));
        p.add_dependency(s(1), s(2));
        let order = p.topo_order().unwrap();
        let pos = |id: SymId| order.iter().position(|&x| x == id).unwrap();
        assert!(pos(s(2)) < pos(s(0)));
        assert!(pos(s(2)) < pos(s(1)));
    }
}
