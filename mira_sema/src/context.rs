//! Resolve-context stack.
//!
//! A [`ResolveContext`] is a frame on the resolver's stack carrying
//! compile-time parameter bindings and an origin tag. Frames are pushed when
//! entering a symbol/function body that may reference ct-params (template
//! bodies, `comptime` blocks) and popped deterministically on exit -- never
//! leaked, never reordered.

use rustc_hash::FxHashMap;

use mira_ir::Name;
use mira_values::Value;

/// What kind of thing introduced this resolve frame.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ContextOrigin {
    Sym,
    Func,
    /// A frame still being built; referencing it recursively is an error
    /// the caller must check for explicitly (used for self-referential
    /// static initializers before `CircularInit` is raised).
    Incomplete,
}

/// Governs how a bare `comptime <ident>` is interpreted while this frame is
/// on top of the stack (see `mira_generics`'s CTE §4.4).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum CtIdentMode {
    /// `comptime <ident>` *declares* a new ct-parameter at the current index.
    #[default]
    ParseCtInferredParams,
    /// `comptime <ident>` *looks up* a previously bound ct-parameter.
    ExpandCtInferredParams,
}

/// One frame of the resolver's scope stack.
#[derive(Clone, Debug)]
pub struct ResolveContext {
    ct_params: FxHashMap<Name, Value>,
    /// Position at which each ct-parameter name was declared, assigned in
    /// declaration order starting at 0 (see `parse_ct_inferred_params`).
    ct_param_order: Vec<Name>,
    has_parent_ctx: bool,
    origin: ContextOrigin,
    pub ct_ident_mode: CtIdentMode,
}

impl ResolveContext {
    pub fn new(origin: ContextOrigin, has_parent_ctx: bool) -> Self {
        Self {
            ct_params: FxHashMap::default(),
            ct_param_order: Vec::new(),
            has_parent_ctx,
            origin,
            ct_ident_mode: CtIdentMode::default(),
        }
    }

    pub fn origin(&self) -> ContextOrigin {
        self.origin
    }

    pub fn has_parent_ctx(&self) -> bool {
        self.has_parent_ctx
    }

    /// `parse_ct_inferred_params` mode: bind `name` to a freshly declared
    /// ct-parameter, returning its 0-based position.
    pub fn declare_ct_param(&mut self, name: Name, value: Value) -> u32 {
        let idx = self.ct_param_order.len() as u32;
        self.ct_param_order.push(name);
        self.ct_params.insert(name, value);
        idx
    }

    /// `expand_ct_inferred_params` mode: look up a previously bound value.
    pub fn lookup_ct_param(&self, name: Name) -> Option<&Value> {
        self.ct_params.get(&name)
    }

    pub fn ct_param_count(&self) -> usize {
        self.ct_param_order.len()
    }
}

/// Stack of [`ResolveContext`] frames. Popped deterministically: every
/// `push` performed while resolving a symbol/function is matched by exactly
/// one `pop` on every exit path, success or error.
#[derive(Default, Debug)]
pub struct ResolveContextStack {
    frames: Vec<ResolveContext>,
}

impl ResolveContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ctx: ResolveContext) {
        self.frames.push(ctx);
    }

    pub fn pop(&mut self) -> Option<ResolveContext> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ResolveContext> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ResolveContext> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Walk frames from innermost outward, following `has_parent_ctx`, until
    /// one binds `name`; used by `resolveTypeSpecNode`'s identifier case.
    pub fn lookup_ct_param(&self, name: Name) -> Option<&Value> {
        for frame in self.frames.iter().rev() {
            if let Some(v) = frame.lookup_ct_param(name) {
                return Some(v);
            }
            if !frame.has_parent_ctx() {
                break;
            }
        }
        None
    }
}
