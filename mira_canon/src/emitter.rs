//! IR Emitter (SPEC_FULL.md §4.6).
//!
//! Unlike [`crate::lower`]/[`crate::lower::lower_module`] -- which lower an
//! already-complete, already-type-checked AST in one batch pass -- this
//! module is a *builder*: the Resolver and Matcher push typed
//! expression/statement nodes here while they walk a function body, the
//! same interleaving SPEC_FULL.md §2's data-flow paragraph describes
//! ("per-function bodies are walked, producing IR via the Emitter while the
//! Matcher resolves calls"). It owns a stack of [`Procedure`]s (for lambdas
//! and nested declarations), each with its own stack of lexical blocks,
//! `cur_num_locals`/`max_locals` for stack-frame sizing, a loop
//! save/restore stack for narrowed local types, and capture-lift-on-first-
//! capture bookkeeping across the procedure stack. Control-flow surface
//! forms (`if_unwrap`, `while_*`, `for_iter`, `for_range`, `switch`) lower onto the same
//! handful of primitive [`CanExpr`] variants [`crate::lower`] already
//! targets (`If`, `Loop`, `Break`, `Continue`, `Match`, `Block`) -- both
//! pipelines share one canonical IR, they just build it differently.
//!
//! `TypeId` here is `mira_types::TypeId` (the SPEC_FULL.md Type Store's
//! handle), converted to `mira_ir::TypeId` only at the `CanArena` boundary
//! via `raw()`/`from_raw()` -- the same cross-crate-handle convention
//! `crate::lower::Lowerer::expr_type` already uses between `mira_types::Idx`
//! and `mira_ir::TypeId`.

use std::collections::HashSet;

use mira_ir::canon::{
    CanArena, CanBindingPattern, CanExpr, CanId, CanNode, CanRange, DecisionTreePool,
};
use mira_ir::{BinaryOp, Name, Span};
use mira_types::TypeId;

/// Cast a Type Store handle into the `CanNode.ty` slot. Both are plain
/// 32-bit arena indices; only the owning store differs.
fn to_ir_type(ty: TypeId) -> mira_ir::TypeId {
    mira_ir::TypeId::from_raw(ty.raw())
}

/// Handle to one [`LocalVar`] within its owning [`Procedure`]. Not stable
/// across procedures -- a captured local is referenced from a child
/// procedure via a fresh `ParentLocalAlias` local in the child's own table,
/// never by reusing the owner's `LocalId` out of context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct LocalId(u32);

impl LocalId {
    #[inline]
    const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a [`LocalVar`] slot relates to the value it names (SPEC_FULL.md §3).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LocalKind {
    /// An ordinary local owned by this procedure.
    Local,
    /// Aliases a module-level static variable (no stack slot of its own).
    StaticAlias,
    /// Aliases a local captured from an enclosing procedure. Carries the
    /// captured slot's location via `LocalVar::capture_source`.
    ParentLocalAlias,
}

/// A slot in a procedure (SPEC_FULL.md §3, `LocalVar`).
#[derive(Clone, Debug)]
pub struct LocalVar {
    pub name: Name,
    pub kind: LocalKind,
    pub declared_type: TypeId,
    /// Current narrowed type -- distinct from `declared_type` once flow
    /// narrowing (e.g. an `if_unwrap` binding) refines it; restored by
    /// [`Emitter::exit_loop`] when a loop body never assigns the variable.
    pub narrowed_type: TypeId,
    pub is_param: bool,
    /// Set once a nested procedure references this slot; forces box
    /// semantics at its declaration site.
    pub lifted: bool,
    /// Compiler-synthesized (for_iter's hidden iterator/counter locals);
    /// invisible to name lookup from user source.
    pub hidden: bool,
    /// Only meaningful when `kind == LocalKind::ParentLocalAlias`: the
    /// procedure-stack depth and `LocalId` of the captured slot.
    pub capture_source: Option<(usize, LocalId)>,
}

impl LocalVar {
    fn new(name: Name, ty: TypeId, is_param: bool, hidden: bool) -> Self {
        Self {
            name,
            kind: LocalKind::Local,
            declared_type: ty,
            narrowed_type: ty,
            is_param,
            lifted: false,
            hidden,
            capture_source: None,
        }
    }
}

/// One procedure's (function or lambda body's) emission state.
#[derive(Default)]
pub struct Procedure {
    /// Every local ever declared in this procedure, in declaration order.
    /// Append-only -- a block exit does not remove entries, it only pops
    /// them off `live`.
    pub locals: Vec<LocalVar>,
    /// Stack of currently in-scope locals, innermost-declared last.
    live: Vec<LocalId>,
    /// Each entry is the length `live` had when the corresponding block was
    /// entered; `exit_block` truncates `live` back to it.
    blocks: Vec<usize>,
    /// `live.len()` -- current stack-frame depth.
    pub cur_num_locals: u32,
    /// High-water mark of `cur_num_locals` across the procedure's lifetime.
    pub max_locals: u32,
    /// `ParentLocalAlias` locals this procedure declared to reach an
    /// ancestor's captured slot.
    pub captures: Vec<LocalId>,
    /// `preLoopVarSaveStack`: one snapshot per currently-open loop, each a
    /// `(local, narrowed type at loop entry)` pair for every local live at
    /// that point.
    pre_loop_var_save_stack: Vec<Vec<(LocalId, TypeId)>>,
}

impl Procedure {
    fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, var: LocalVar) -> LocalId {
        let id = LocalId::new(self.locals.len());
        self.locals.push(var);
        self.live.push(id);
        self.cur_num_locals = self.live.len() as u32;
        self.max_locals = self.max_locals.max(self.cur_num_locals);
        id
    }

    /// Find a name among the locals currently in scope, innermost first
    /// (shadowing).
    fn find_live(&self, name: Name) -> Option<LocalId> {
        self.live
            .iter()
            .rev()
            .find(|&&id| !self.locals[id.index()].hidden && self.locals[id.index()].name == name)
            .copied()
    }
}

/// The IR Emitter: a [`CanArena`] under construction plus the stack of
/// [`Procedure`]s being walked to build it.
pub struct Emitter {
    pub arena: CanArena,
    pub decision_trees: DecisionTreePool,
    procedures: Vec<Procedure>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            arena: CanArena::new(),
            decision_trees: DecisionTreePool::new(),
            procedures: Vec::new(),
        }
    }

    #[allow(clippy::expect_used, reason = "invariant: caller must enter_procedure first")]
    fn cur_proc_mut(&mut self) -> &mut Procedure {
        self.procedures.last_mut().expect("emitter: no active procedure")
    }

    #[allow(clippy::expect_used, reason = "invariant: caller must enter_procedure first")]
    fn cur_proc(&self) -> &Procedure {
        self.procedures.last().expect("emitter: no active procedure")
    }

    /// Number of procedures currently on the stack (lambda/nested-decl
    /// nesting depth).
    pub fn depth(&self) -> usize {
        self.procedures.len()
    }

    /// Inspect the local table of the procedure at the given depth (0 =
    /// outermost). Used by callers that need to read back `lifted`/
    /// `max_locals` after [`Self::exit_procedure`] popped it -- call before
    /// popping, or hold on to the returned `Procedure`.
    pub fn procedure_at(&self, depth: usize) -> &Procedure {
        &self.procedures[depth]
    }

    // Procedure / block stack

    pub fn enter_procedure(&mut self) {
        self.procedures.push(Procedure::new());
        self.enter_block();
    }

    /// Pop the current procedure, returning its final local table and
    /// capture/max-locals bookkeeping for the caller to attach to the
    /// enclosing `Func`/`Sym`.
    #[allow(clippy::expect_used, reason = "invariant: caller must enter_procedure first")]
    pub fn exit_procedure(&mut self) -> Procedure {
        self.exit_block();
        self.procedures.pop().expect("emitter: exit_procedure without enter_procedure")
    }

    pub fn enter_block(&mut self) {
        let proc = self.cur_proc_mut();
        let start = proc.live.len();
        proc.blocks.push(start);
    }

    #[allow(clippy::expect_used, reason = "invariant: caller must enter_block first")]
    pub fn exit_block(&mut self) {
        let proc = self.cur_proc_mut();
        let start = proc.blocks.pop().expect("emitter: exit_block without enter_block");
        proc.live.truncate(start);
        proc.cur_num_locals = proc.live.len() as u32;
    }

    // Locals

    pub fn declare_local(&mut self, name: Name, ty: TypeId, is_param: bool) -> LocalId {
        self.cur_proc_mut().declare(LocalVar::new(name, ty, is_param, false))
    }

    /// Declare a compiler-synthesized local (for_iter's hidden iterator and
    /// counter slots) -- invisible to ordinary name lookup.
    pub fn declare_hidden_local(&mut self, name: Name, ty: TypeId) -> LocalId {
        self.cur_proc_mut().declare(LocalVar::new(name, ty, false, true))
    }

    pub fn local(&self, id: LocalId) -> &LocalVar {
        &self.cur_proc().locals[id.index()]
    }

    /// Resolve a name against the procedure stack, innermost first. A hit
    /// in an ancestor procedure marks that slot `lifted` and returns a
    /// freshly declared `ParentLocalAlias` in the *current* procedure
    /// (memoized: a second `resolve_local` for the same captured name in
    /// the same procedure finds the alias already live and returns it
    /// without re-marking the owner).
    pub fn resolve_local(&mut self, name: Name) -> Option<LocalId> {
        let depth = self.procedures.len();
        if depth == 0 {
            return None;
        }
        let cur = depth - 1;
        if let Some(id) = self.procedures[cur].find_live(name) {
            return Some(id);
        }
        for owner_depth in (0..cur).rev() {
            if let Some(owner_id) = self.procedures[owner_depth].find_live(name) {
                self.procedures[owner_depth].locals[owner_id.index()].lifted = true;
                let owner_var = self.procedures[owner_depth].locals[owner_id.index()].clone();
                let alias = LocalVar {
                    name,
                    kind: LocalKind::ParentLocalAlias,
                    declared_type: owner_var.declared_type,
                    narrowed_type: owner_var.narrowed_type,
                    is_param: false,
                    lifted: false,
                    hidden: false,
                    capture_source: Some((owner_depth, owner_id)),
                };
                let alias_id = self.procedures[cur].declare(alias);
                self.procedures[cur].captures.push(alias_id);
                return Some(alias_id);
            }
        }
        None
    }

    // Loop narrowed-type save/restore (preLoopVarSaveStack)

    pub fn enter_loop(&mut self) {
        let proc = self.cur_proc_mut();
        let snapshot = proc.live.iter().map(|&id| (id, proc.locals[id.index()].narrowed_type)).collect();
        proc.pre_loop_var_save_stack.push(snapshot);
    }

    /// Pop the loop's snapshot, restoring every live local's narrowed type
    /// to what it was at loop entry *except* those named in `assigned`
    /// (the loop body reassigned them, so their narrowed type stands).
    #[allow(clippy::expect_used, reason = "invariant: caller must enter_loop first")]
    pub fn exit_loop(&mut self, assigned: &HashSet<LocalId>) {
        let proc = self.cur_proc_mut();
        let snapshot = proc
            .pre_loop_var_save_stack
            .pop()
            .expect("emitter: exit_loop without enter_loop");
        for (id, narrowed) in snapshot {
            if !assigned.contains(&id) {
                proc.locals[id.index()].narrowed_type = narrowed;
            }
        }
    }

    // Raw node push

    pub fn push(&mut self, kind: CanExpr, span: Span, ty: TypeId) -> CanId {
        self.arena.push(CanNode::new(kind, span, to_ir_type(ty)))
    }

    fn let_local(&mut self, name: Name, init: CanId, mutable: bool, span: Span, ty: TypeId) -> CanId {
        let pattern = self.arena.push_binding_pattern(CanBindingPattern::Name { name, mutable });
        self.push(CanExpr::Let { pattern, init, mutable }, span, ty)
    }

    // Control flow (SPEC_FULL.md §4.6: "control-flow constructs lower uniformly")

    pub fn if_stmt(&mut self, cond: CanId, then_branch: CanId, else_branch: CanId, span: Span, ty: TypeId) -> CanId {
        self.push(CanExpr::If { cond, then_branch, else_branch }, span, ty)
    }

    /// `if_unwrap`: `if let Some(bind) = scrutinee { then } else { else_ }`
    /// for a two-variant (`Option`-shaped) scrutinee, lowered as a `Match`
    /// with an explicit arm per variant rather than routed through the
    /// general Maranget decision-tree compiler (`crate::patterns`) -- the
    /// scrutinee shape here is always exactly two known variants.
    #[allow(clippy::too_many_arguments)]
    pub fn if_unwrap(
        &mut self,
        scrutinee: CanId,
        some_name: Name,
        none_name: Name,
        bind: Name,
        then_branch: CanId,
        else_branch: CanId,
        span: Span,
        ty: TypeId,
    ) -> CanId {
        let arms = [
            SwitchArm { variant_name: some_name, variant_index: 0, bind: Some(bind), body: then_branch },
            SwitchArm { variant_name: none_name, variant_index: 1, bind: None, body: else_branch },
        ];
        self.switch(scrutinee, &arms, None, span, ty)
    }

    /// `switch`: a `Match` over a tagged scrutinee, with an explicit arm
    /// per named variant and an optional catch-all `default`.
    pub fn switch(&mut self, scrutinee: CanId, arms: &[SwitchArm], default: Option<CanId>, span: Span, ty: TypeId) -> CanId {
        use mira_ir::canon::{DecisionTree, PathInstruction, TestKind, TestValue};

        let mut edges = Vec::with_capacity(arms.len());
        let mut bodies = Vec::with_capacity(arms.len() + usize::from(default.is_some()));
        for (i, arm) in arms.iter().enumerate() {
            let bindings = match arm.bind {
                Some(name) => vec![(name, vec![PathInstruction::TagPayload(0)])],
                None => Vec::new(),
            };
            edges.push((
                TestValue::Tag { variant_index: arm.variant_index, variant_name: arm.variant_name },
                DecisionTree::Leaf { arm_index: i, bindings },
            ));
            bodies.push(arm.body);
        }
        let default_tree = default.map(|body| {
            bodies.push(body);
            Box::new(DecisionTree::Leaf { arm_index: arms.len(), bindings: Vec::new() })
        });
        let tree = DecisionTree::Switch { path: Vec::new(), test_kind: TestKind::EnumTag, edges, default: default_tree };
        let decision_tree = self.decision_trees.push(tree);
        let arms_range = self.arena.push_expr_list(&bodies);
        self.push(CanExpr::Match { scrutinee, decision_tree, arms: arms_range }, span, ty)
    }

    pub fn try_expr(&mut self, inner: CanId, span: Span, ty: TypeId) -> CanId {
        self.push(CanExpr::Try(inner), span, ty)
    }

    pub fn while_inf(&mut self, body: CanId, span: Span, ty: TypeId) -> CanId {
        self.push(CanExpr::Loop { label: Name::EMPTY, body }, span, ty)
    }

    /// `while cond { body }` ⇒ `loop { if cond { body } else { break } }`.
    pub fn while_cond(&mut self, cond: CanId, body: CanId, span: Span, ty: TypeId) -> CanId {
        let brk = self.push(CanExpr::Break { label: Name::EMPTY, value: CanId::INVALID }, span, ty);
        let guarded = self.if_stmt(cond, body, brk, span, ty);
        self.while_inf(guarded, span, ty)
    }

    /// `while let Some(bind) = scrutinee { body }` ⇒
    /// `loop { if_unwrap scrutinee { body } else { break } }`.
    #[allow(clippy::too_many_arguments)]
    pub fn while_opt(
        &mut self,
        scrutinee: CanId,
        some_name: Name,
        none_name: Name,
        bind: Name,
        body: CanId,
        span: Span,
        ty: TypeId,
    ) -> CanId {
        let brk = self.push(CanExpr::Break { label: Name::EMPTY, value: CanId::INVALID }, span, ty);
        let guarded = self.if_unwrap(scrutinee, some_name, none_name, bind, body, brk, span, ty);
        self.while_inf(guarded, span, ty)
    }

    /// `for_iter`: desugars to a hidden iterator local, a hidden counter
    /// local, and a loop whose body `if`-unwraps `__iter.next()`. Per
    /// SPEC_FULL.md §9's pinned Open Question, the hidden counter
    /// increments *before* the user's loop body runs each iteration, not
    /// after.
    ///
    /// `make_body` receives the bound-element local and the hidden counter
    /// local (for `for i, x in xs` forms that expose the counter) and
    /// returns the lowered body expression; it runs with both locals
    /// already declared and in scope.
    #[allow(clippy::too_many_arguments)]
    pub fn for_iter(
        &mut self,
        iter_init: CanId,
        iter_ty: TypeId,
        idx_ty: TypeId,
        binding: Name,
        binding_ty: TypeId,
        names: &ForIterNames,
        make_body: impl FnOnce(&mut Self, LocalId, LocalId) -> CanId,
        unit_ty: TypeId,
        span: Span,
    ) -> CanId {
        self.enter_block();

        let iter_let = self.let_local(names.iter, iter_init, false, span, iter_ty);
        let iter_local = self.declare_hidden_local(names.iter, iter_ty);

        let zero = self.push(CanExpr::Int(0), span, idx_ty);
        let idx_let = self.let_local(names.idx, zero, true, span, idx_ty);
        let idx_local = self.declare_hidden_local(names.idx, idx_ty);

        self.enter_loop();
        self.enter_block();

        // `__idx = __idx + 1` -- before the body, per the pinned ordering.
        let idx_read = self.push(CanExpr::Ident(names.idx), span, idx_ty);
        let one = self.push(CanExpr::Int(1), span, idx_ty);
        let incremented = self.push(CanExpr::Binary { op: BinaryOp::Add, left: idx_read, right: one }, span, idx_ty);
        let idx_target = self.push(CanExpr::Ident(names.idx), span, idx_ty);
        let bump = self.push(CanExpr::Assign { target: idx_target, value: incremented }, span, unit_ty);

        let iter_recv = self.push(CanExpr::Ident(names.iter), span, iter_ty);
        let next_args = CanRange::EMPTY;
        let next_call = self.push(
            CanExpr::MethodCall { receiver: iter_recv, method: names.next, args: next_args },
            span,
            binding_ty,
        );

        self.enter_block();
        let binding_local = self.declare_local(binding, binding_ty, false);
        let body_result = self.for_iter_call_body(make_body, binding_local, idx_local);
        let continue_ = self.push(CanExpr::Continue { label: Name::EMPTY, value: CanId::INVALID }, span, unit_ty);
        let then_stmts = self.arena.push_expr_list(&[bump, body_result]);
        let then_block = self.push(CanExpr::Block { stmts: then_stmts, result: continue_ }, span, unit_ty);
        self.exit_block();

        let brk = self.push(CanExpr::Break { label: Name::EMPTY, value: CanId::INVALID }, span, unit_ty);
        let guard = self.if_unwrap(next_call, names.some, names.none, binding, then_block, brk, span, unit_ty);
        self.exit_block();

        let mut assigned = HashSet::new();
        assigned.insert(idx_local);
        self.exit_loop(&assigned);

        let loop_expr = self.while_inf(guard, span, unit_ty);
        let outer_stmts = self.arena.push_expr_list(&[iter_let, idx_let]);
        let result = self.push(CanExpr::Block { stmts: outer_stmts, result: loop_expr }, span, unit_ty);
        self.exit_block();
        result
    }

    fn for_iter_call_body(
        &mut self,
        make_body: impl FnOnce(&mut Self, LocalId, LocalId) -> CanId,
        binding_local: LocalId,
        idx_local: LocalId,
    ) -> CanId {
        make_body(self, binding_local, idx_local)
    }

    /// `for_range`: `for i in start..end { body }` (optionally `by step`).
    /// Unlike [`Self::for_iter`] there's no hidden iterator local -- the
    /// bound name itself is the hidden counter, seeded from `start` and
    /// advanced by `step` (defaulting to the literal `1`) at the tail of
    /// each iteration, after the body runs.
    #[allow(clippy::too_many_arguments)]
    pub fn for_range(
        &mut self,
        start: CanId,
        end: CanId,
        step: Option<CanId>,
        binding: Name,
        idx_ty: TypeId,
        make_body: impl FnOnce(&mut Self, LocalId) -> CanId,
        unit_ty: TypeId,
        span: Span,
    ) -> CanId {
        self.enter_block();

        let idx_let = self.let_local(binding, start, true, span, idx_ty);
        let idx_local = self.declare_local(binding, idx_ty, false);

        self.enter_loop();
        self.enter_block();

        let idx_read = self.push(CanExpr::Ident(binding), span, idx_ty);
        let cond = self.push(CanExpr::Binary { op: BinaryOp::Lt, left: idx_read, right: end }, span, TypeId::BOOL);

        self.enter_block();
        let body_result = make_body(self, idx_local);

        let idx_read = self.push(CanExpr::Ident(binding), span, idx_ty);
        let step = step.unwrap_or_else(|| self.push(CanExpr::Int(1), span, idx_ty));
        let advanced = self.push(CanExpr::Binary { op: BinaryOp::Add, left: idx_read, right: step }, span, idx_ty);
        let idx_target = self.push(CanExpr::Ident(binding), span, idx_ty);
        let bump = self.push(CanExpr::Assign { target: idx_target, value: advanced }, span, unit_ty);

        let continue_ = self.push(CanExpr::Continue { label: Name::EMPTY, value: CanId::INVALID }, span, unit_ty);
        let then_stmts = self.arena.push_expr_list(&[body_result, bump]);
        let then_block = self.push(CanExpr::Block { stmts: then_stmts, result: continue_ }, span, unit_ty);
        self.exit_block();

        let brk = self.push(CanExpr::Break { label: Name::EMPTY, value: CanId::INVALID }, span, unit_ty);
        let guard = self.if_stmt(cond, then_block, brk, span, unit_ty);
        self.exit_block();

        let mut assigned = HashSet::new();
        assigned.insert(idx_local);
        self.exit_loop(&assigned);

        let loop_expr = self.while_inf(guard, span, unit_ty);
        let outer_stmts = self.arena.push_expr_list(&[idx_let]);
        let result = self.push(CanExpr::Block { stmts: outer_stmts, result: loop_expr }, span, unit_ty);
        self.exit_block();
        result
    }
}

/// One arm of a [`Emitter::switch`]/[`Emitter::if_unwrap`] lowering.
pub struct SwitchArm {
    pub variant_name: Name,
    pub variant_index: u32,
    pub bind: Option<Name>,
    pub body: CanId,
}

/// Hidden names synthesized for a [`Emitter::for_iter`] desugaring. The
/// emitter doesn't own a string interner, so callers pre-intern these
/// (typically `__iter`/`__idx`/`next`/`Some`/`None`, but any non-colliding
/// synthetic names work).
pub struct ForIterNames {
    pub iter: Name,
    pub idx: Name,
    pub next: Name,
    pub some: Name,
    pub none: Name,
}
