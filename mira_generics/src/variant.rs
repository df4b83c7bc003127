//! Templates and their memoized instantiations (SPEC_FULL.md §4.4).
//!
//! A [`Template`] (object/struct/enum/distinct) or [`FuncTemplate`]
//! (compile-time function) is declared once and expanded on demand. Each
//! unique argument tuple produces one [`Variant`], cached so repeated
//! expansion with the same arguments is free and so a self-referential
//! template (`List[List[int]]` expanding `List[int]` while resolving its own
//! leaf) terminates instead of looping.

use rustc_hash::FxHashMap;

use mira_ir::{Name, Span};
use mira_sema::SymId;
use mira_types::{TypeFlags, TypeStore};
use mira_values::Value;

use crate::error::MatchError;
use crate::evaluator::Evaluator;
use crate::value_stack::ValueStack;

/// A declared template signature: its parameter names, in declaration order,
/// and which of them are `comptime`-inferred rather than explicit.
#[derive(Clone, Debug)]
pub struct Template {
    pub name: Name,
    pub params: Vec<Name>,
    /// `Sym` under which expansions are reserved as children.
    pub decl: SymId,
}

/// A declared compile-time function template -- same shape, but expansion
/// produces a folded [`Value`] rather than a type symbol.
#[derive(Clone, Debug)]
pub struct FuncTemplate {
    pub name: Name,
    pub params: Vec<Name>,
    pub decl: SymId,
}

/// One memoized instantiation of a [`Template`] or [`FuncTemplate`].
#[derive(Clone, Debug)]
pub enum Variant {
    /// Still being resolved -- present in the cache so a recursive reference
    /// to the same argument tuple is detected as [`crate::error::MatchError::CircularExpansion`]
    /// rather than looping forever.
    InProgress,
    /// A type template expansion, resolved to a concrete leaf symbol.
    Type(SymId),
    /// A compile-time function template expansion, materialized to a value
    /// via the VM (`prepCtEval` + `callFunc`).
    Value(Value),
}

/// Deep, type-aware argument-tuple equality key for the variant cache.
///
/// `Value`'s own `equals` already implements the required deep comparison;
/// this wrapper just makes a `Vec<Value>` usable as a hash key by hashing
/// each value's canonical `Debug` rendering (values are small and this path
/// is cold relative to expansion itself).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct ArgKey(Vec<String>);

impl ArgKey {
    fn new(args: &[Value]) -> Self {
        Self(args.iter().map(|v| format!("{v:?}")).collect())
    }
}

/// Per-template memoization table: `(template, args) -> Variant`.
#[derive(Default, Debug)]
pub struct VariantCache {
    entries: FxHashMap<(SymId, ArgKey), Variant>,
    /// Reverse index from a type-template expansion's resolved concrete type
    /// back to the template `SymId` that produced it, populated alongside
    /// [`Self::resolve`] for a type variant. Lets the matcher's
    /// `expectTypeFromTemplate` check (a nested `Template[Args...]` pattern)
    /// confirm an observed type actually came from the expected template
    /// before matching its argument vector position-wise.
    origins: FxHashMap<mira_types::TypeId, SymId>,
}

impl VariantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, template: SymId, args: &[Value]) -> Option<&Variant> {
        self.entries.get(&(template, ArgKey::new(args)))
    }

    /// Insert the in-progress sentinel *before* resolving the leaf, so a
    /// self-referential expansion sees it and terminates via
    /// `CircularExpansion` rather than recursing unboundedly.
    pub fn mark_in_progress(&mut self, template: SymId, args: &[Value]) {
        self.entries
            .insert((template, ArgKey::new(args)), Variant::InProgress);
    }

    /// Replace an in-progress (or absent) entry with its resolved variant.
    pub fn resolve(&mut self, template: SymId, args: &[Value], variant: Variant) {
        self.entries.insert((template, ArgKey::new(args)), variant);
    }

    /// Record that `ty` was produced by expanding `template`, for later
    /// `origin_of` lookups.
    pub fn record_origin(&mut self, ty: mira_types::TypeId, template: SymId) {
        self.origins.insert(ty, template);
    }

    /// The template that produced `ty` by expansion, if any.
    pub fn origin_of(&self, ty: mira_types::TypeId) -> Option<SymId> {
        self.origins.get(&ty).copied()
    }
}

/// `expandCtFuncTemplate(tmpl, args) -> Value` (SPEC_FULL.md §4.4).
///
/// Memoized exactly like a type [`Template`]'s expansion, but the leaf is a
/// compile-time function: a cache miss instantiates the leaf (sema +
/// bytecode emission for the call site, via `instantiate`, which mirrors
/// `mira_sema`'s reserve-then-resolve discipline), then materializes the
/// result by invoking the VM through `evaluator.call_func`
/// (`prepCtEval` + `callFunc`). The result is retained in the cache as
/// `Variant::Value` so every subsequent expansion with the same argument
/// tuple is free.
///
/// A cache hit on a still-`InProgress` entry means this template is
/// expanding itself recursively with the same arguments before its first
/// instantiation finished -- reported as `CircularExpansion`, not looped.
pub fn expand_ct_func_template(
    template: &FuncTemplate,
    args: Vec<Value>,
    cache: &mut VariantCache,
    stack: &mut ValueStack,
    instantiate: impl FnOnce(&[Value]) -> SymId,
    evaluator: &mut dyn Evaluator,
) -> Result<Value, MatchError> {
    if let Some(existing) = cache.get(template.decl, &args) {
        return match existing {
            Variant::Value(v) => Ok(v.retain()),
            Variant::InProgress => Err(MatchError::CircularExpansion {
                span: Span::DUMMY,
                name: template.name,
            }),
            Variant::Type(_) => Err(MatchError::CtEvalFailed {
                span: Span::DUMMY,
                name: template.name,
                reason: "template variant already resolved to a type, not a value".to_string(),
            }),
        };
    }

    cache.mark_in_progress(template.decl, &args);

    // Dup+retain the args into a scoped window for the duration of the
    // expansion; `window` releases its copies on drop regardless of how this
    // function returns, so a `callFunc` failure below leaks nothing.
    let mut window = stack.window();
    for a in &args {
        window.push(a.retain());
    }

    let leaf = instantiate(&args);
    let result = evaluator.call_func(leaf, &args).map_err(|reason| MatchError::CtEvalFailed {
        span: Span::DUMMY,
        name: template.name,
        reason,
    })?;
    cache.resolve(template.decl, &args, Variant::Value(result.retain()));
    Ok(result)
}

/// `expandTemplate(tmpl, args) -> Sym` (SPEC_FULL.md §4.4).
///
/// Mirrors [`expand_ct_func_template`]'s cache discipline but produces a type
/// symbol rather than a folded value, and additionally performs the two
/// steps a compile-time function expansion has no use for:
///
/// 1. dup+retain the argument tuple into a scoped window for the duration
///    of expansion (released on every exit path).
/// 2. scan the args for any `ct_ref`/`ct_infer`-flagged type handle and fold
///    that onto the leaf's own flags -- a `List[T]` expanded with a still-
///    unresolved `T` is itself `ct_ref`.
/// 3. reserve a leaf symbol as a child of the template's declaration and
///    resolve its body (`reserve_and_resolve`, steps 3 and 5 folded into one
///    host-provided closure since both touch the same symbol graph).
/// 4. publish the in-progress sentinel *before* that closure runs, so a
///    self-referential expansion (`List[List[int]]` touching `List[int]`
///    while resolving its own leaf) terminates via `CircularExpansion`
///    rather than recursing.
/// 5. resolution may replace the reserved placeholder outright (`distinct T`
///    folds to `T`'s own sym rather than a fresh one) -- whichever sym
///    `reserve_and_resolve` returns is what the variant remembers, and its
///    origin is recorded so the matcher's `expectTypeFromTemplate` check can
///    later confirm a type came from this template.
pub fn expand_template(
    template: &Template,
    args: Vec<Value>,
    cache: &mut VariantCache,
    stack: &mut ValueStack,
    types: &TypeStore,
    reserve_and_resolve: impl FnOnce(&[Value], TypeFlags) -> Result<(SymId, mira_types::TypeId), MatchError>,
) -> Result<SymId, MatchError> {
    if let Some(existing) = cache.get(template.decl, &args) {
        return match existing {
            Variant::Type(sym) => Ok(*sym),
            Variant::InProgress => Err(MatchError::CircularExpansion {
                span: Span::DUMMY,
                name: template.name,
            }),
            Variant::Value(_) => Err(MatchError::CtEvalFailed {
                span: Span::DUMMY,
                name: template.name,
                reason: "template variant already resolved to a value, not a type".to_string(),
            }),
        };
    }

    cache.mark_in_progress(template.decl, &args);

    let mut window = stack.window();
    for a in &args {
        window.push(a.retain());
    }
    let arg_flags = TypeFlags::propagate_all(
        window.window().iter().filter_map(Value::as_type_id).map(|id| types.flags_of(id)),
    );

    let (resolved, resolved_ty) = reserve_and_resolve(&args, arg_flags)?;
    cache.resolve(template.decl, &args, Variant::Type(resolved));
    cache.record_origin(resolved_ty, template.decl);
    Ok(resolved)
}
