//! The `Compiler` context: owns every long-lived arena for one compilation
//! (SPEC_FULL.md §9, "Global state").
//!
//! Mirrors the teacher's `CompilerDb`/`Db` split in shape -- one struct
//! holding every shared allocation -- but without Salsa: this pipeline's
//! non-goals rule out incremental recompilation, so there is no query
//! storage to thread through, just plain `&mut` access to the arenas below.

use mira_diagnostic::queue::DiagnosticQueue;
use mira_diagnostic::{Diagnostic, ErrorGuaranteed};
use mira_generics::{Evaluator, ValueStack, VariantCache};
use mira_sema::{ChunkId, FuncLoader, ResolveContextStack, SymbolGraph, TypeLoader, VarLoader};
use mira_types::TypeStore;

/// Owns the Type Store, Symbol Graph, resolve-context stack, template
/// variant cache, diagnostic queue, and the host's loader/evaluator hooks
/// for the lifetime of one compilation.
///
/// Host hooks are optional: a `Compiler` with none set can still run the
/// Declaration Pipeline and Resolver against chunks that declare no host
/// symbols, which is what the crate's own tests exercise.
pub struct Compiler {
    pub types: TypeStore,
    pub syms: SymbolGraph,
    pub ctx: ResolveContextStack,
    pub variants: VariantCache,
    /// Scoped compile-time value-stack windows opened while matching
    /// arguments or expanding templates (SPEC_FULL.md §5, §9).
    pub ct_stack: ValueStack,
    pub diagnostics: DiagnosticQueue,
    next_chunk: u32,
    type_loader: Option<Box<dyn TypeLoader>>,
    func_loader: Option<Box<dyn FuncLoader>>,
    var_loader: Option<Box<dyn VarLoader>>,
    evaluator: Option<Box<dyn Evaluator>>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            types: TypeStore::new(),
            syms: SymbolGraph::new(),
            ctx: ResolveContextStack::new(),
            variants: VariantCache::new(),
            ct_stack: ValueStack::new(),
            diagnostics: DiagnosticQueue::new(),
            next_chunk: 0,
            type_loader: None,
            func_loader: None,
            var_loader: None,
            evaluator: None,
        }
    }

    /// Allocate a fresh `ChunkId` for one compilation unit. Stable for the
    /// life of this `Compiler`, per `mira_sema::ChunkId`'s arena discipline.
    pub fn alloc_chunk(&mut self) -> ChunkId {
        let id = ChunkId::from_raw(self.next_chunk);
        self.next_chunk += 1;
        id
    }

    pub fn set_type_loader(&mut self, loader: Box<dyn TypeLoader>) {
        self.type_loader = Some(loader);
    }

    pub fn set_func_loader(&mut self, loader: Box<dyn FuncLoader>) {
        self.func_loader = Some(loader);
    }

    pub fn set_var_loader(&mut self, loader: Box<dyn VarLoader>) {
        self.var_loader = Some(loader);
    }

    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    pub fn type_loader_mut(&mut self) -> Option<&mut dyn TypeLoader> {
        self.type_loader.as_deref_mut()
    }

    pub fn func_loader_mut(&mut self) -> Option<&mut dyn FuncLoader> {
        self.func_loader.as_deref_mut()
    }

    pub fn var_loader_mut(&mut self) -> Option<&mut dyn VarLoader> {
        self.var_loader.as_deref_mut()
    }

    pub fn evaluator_mut(&mut self) -> Option<&mut dyn Evaluator> {
        self.evaluator.as_deref_mut()
    }

    /// Report a hard error against `source`, returning proof it was queued.
    pub fn report_error(&mut self, diag: Diagnostic, source: &str) -> ErrorGuaranteed {
        self.diagnostics.emit_error_with_source(diag, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mira_ir::Name;
    use mira_types::TypeId;

    #[test]
    fn new_compiler_carries_the_type_stores_built_in_primitives() {
        let compiler = Compiler::new();
        assert_eq!(*compiler.types.get(TypeId::INT), mira_types::Type::Int);
    }

    #[test]
    fn chunk_ids_are_allocated_in_increasing_order() {
        let mut compiler = Compiler::new();
        let a = compiler.alloc_chunk();
        let b = compiler.alloc_chunk();
        assert_ne!(a, b);
        assert_eq!(a.raw() + 1, b.raw());
    }

    struct AlwaysMissing;
    impl TypeLoader for AlwaysMissing {
        fn load_type(&mut self, _module: Name, name: Name) -> Result<mira_sema::TypeLoadResult, Name> {
            Err(name)
        }
    }

    #[test]
    fn host_loaders_round_trip_through_the_setter_and_accessor() {
        let mut compiler = Compiler::new();
        assert!(compiler.type_loader_mut().is_none());
        compiler.set_type_loader(Box::new(AlwaysMissing));
        assert!(compiler.type_loader_mut().is_some());
    }

    #[test]
    fn report_error_is_reflected_in_the_diagnostic_queue() {
        let mut compiler = Compiler::new();
        let diag = mira_diagnostic::Diagnostic::error(mira_diagnostic::ErrorCode::E7001)
            .with_message("boom");
        compiler.report_error(diag, "");
        assert_eq!(compiler.diagnostics.error_count(), 1);
    }
}
