//! End-to-end scenarios spanning the Declaration Pipeline, Resolver,
//! Template/Overload Matcher, and IR Emitter through one `Compiler` context
//! (SPEC_FULL.md §9, scenarios S1-S6). The parser is out of scope
//! (SPEC_FULL.md §1), so each scenario is built directly from
//! hand-constructed symbols and facts rather than surface syntax.

use mira_canon::{CanExpr, Emitter};
use mira_generics::{
    ArgFact, FuncCandidate, ParamKind, StubEvaluator, Template, TypePattern, Variant, expand_ct_func_template,
    expand_template, match_func, match_func_sym,
};
use mira_ir::{Name, Span};
use mira_sema::{DeclPipeline, SymKind};
use mira_types::{CompactType, TypeId};
use mira_values::Value;
use mirac::Compiler;

fn n(raw: u32) -> Name {
    Name::from_raw(raw)
}

/// S1 — Generic type memoization: `use List[int]` twice should resolve the
/// template exactly once and share one concrete type id on the second use.
#[test]
fn s1_generic_type_memoization_resolves_once_and_shares_the_variant() {
    let mut compiler = Compiler::new();
    let chunk = compiler.alloc_chunk();
    let list_template_sym = compiler
        .syms
        .reserve(n(1), SymKind::Template, None, chunk, n(0))
        .unwrap();
    let list_template = Template {
        name: n(1),
        params: vec![n(3)],
        decl: list_template_sym,
    };

    let mut leaf_name = 2;
    let mut expansions = 0;
    let mut expand_list_int = |compiler: &mut Compiler| -> mira_sema::SymId {
        let args = vec![Value::type_handle(TypeId::INT)];
        expand_template(
            &list_template,
            args,
            &mut compiler.variants,
            &mut compiler.ct_stack,
            &compiler.types,
            |_, _flags| {
                expansions += 1;
                let leaf = compiler
                    .syms
                    .reserve(n(leaf_name), SymKind::StructT, Some(list_template_sym), chunk, n(0))
                    .unwrap();
                leaf_name += 1;
                compiler.syms.mark_resolved(leaf, Some(TypeId::INT));
                Ok((leaf, TypeId::INT))
            },
        )
        .unwrap()
    };

    let first = expand_list_int(&mut compiler);
    let second = expand_list_int(&mut compiler);

    assert_eq!(first, second);
    assert_eq!(expansions, 1);
    assert!(compiler.ct_stack.is_empty());
    assert_eq!(compiler.variants.origin_of(TypeId::INT), Some(list_template_sym));
}

/// S3 — Overload disambiguation with a dynamic argument: `add(dyn, 1)`
/// against `add(Int,Int)->Int` / `add(Float,Float)->Float` resolves with
/// `dyn_call = true` and targets the overload set, not a specific `Func`.
#[test]
fn s3_overload_disambiguation_with_dynamic_argument_targets_the_overload_set() {
    let mut compiler = Compiler::new();
    let add_int = FuncCandidate {
        sym: mira_sema::SymId::from_raw(10),
        name: n(5),
        params: vec![ParamKind::Concrete(TypeId::INT), ParamKind::Concrete(TypeId::INT)],
        ret: TypeId::INT,
    };
    let add_float = FuncCandidate {
        sym: mira_sema::SymId::from_raw(11),
        name: n(5),
        params: vec![ParamKind::Concrete(TypeId::FLOAT), ParamKind::Concrete(TypeId::FLOAT)],
        ret: TypeId::FLOAT,
    };
    let overload_head = mira_sema::SymId::from_raw(9);
    let args = vec![
        ArgFact {
            ty: CompactType::static_ty(TypeId::DYN),
            ct_value: None,
        },
        ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: None,
        },
    ];

    let (target, outcome) = match_func_sym(
        &compiler.types,
        overload_head,
        n(5),
        &[add_int, add_float],
        &args,
        false,
        &mut compiler.ct_stack,
        &compiler.variants,
    )
    .unwrap();

    assert!(outcome.dyn_call);
    assert_eq!(target, overload_head);
}

/// S4 — Static-init dependency: `var A = B + 1`, `var B = 2`. `B`'s
/// `init_var_sym` must precede `A`'s.
#[test]
fn s4_static_init_dependency_orders_b_before_a() {
    let mut compiler = Compiler::new();
    let chunk = compiler.alloc_chunk();
    let a = compiler.syms.reserve(n(1), SymKind::UserVar, None, chunk, n(0)).unwrap();
    let b = compiler.syms.reserve(n(2), SymKind::UserVar, None, chunk, n(0)).unwrap();

    let mut pipeline = DeclPipeline::new();
    pipeline.register_var(a, n(1), Span::DUMMY);
    pipeline.register_var(b, n(2), Span::DUMMY);
    pipeline.add_dependency(a, b);

    let order = pipeline.topo_order().unwrap();
    let pos = |id: mira_sema::SymId| order.iter().position(|&x| x == id).unwrap();
    assert!(pos(b) < pos(a));
}

/// S5 — Circular static-init: `var A = B`, `var B = A` raises `CircularInit`
/// with no partial ordering produced for either variable.
#[test]
fn s5_circular_static_init_is_rejected() {
    let mut compiler = Compiler::new();
    let chunk = compiler.alloc_chunk();
    let a = compiler.syms.reserve(n(1), SymKind::UserVar, None, chunk, n(0)).unwrap();
    let b = compiler.syms.reserve(n(2), SymKind::UserVar, None, chunk, n(0)).unwrap();

    let mut pipeline = DeclPipeline::new();
    pipeline.register_var(a, n(1), Span::DUMMY);
    pipeline.register_var(b, n(2), Span::DUMMY);
    pipeline.add_dependency(a, b);
    pipeline.add_dependency(b, a);

    let err = pipeline.topo_order().unwrap_err();
    assert!(matches!(err, mira_sema::ResolveError::CircularInit { .. }));
}

/// S2 — Inferred generic function: `func at[T](xs []T, i int) T` called as
/// `at(["a","b"], 0)`. `T` is inferred to `String` from the `[]T`
/// (`RefSlice[T]`) argument; the binding is memoized so a second call with
/// the same argument shape reuses the one instantiation variant instead of
/// expanding again, and the call site's emitted IR node carries the
/// inferred return type.
#[test]
fn s2_inferred_generic_function_binds_t_and_shares_one_variant() {
    let mut compiler = Compiler::new();
    let chunk = compiler.alloc_chunk();
    let t_name = n(7);
    let at_name = n(8);
    let ref_slice_str = compiler.types.get_ref_slice_type(TypeId::STR);

    let at_template = compiler.syms.reserve(at_name, SymKind::FuncTemplate, None, chunk, n(0)).unwrap();
    let at = FuncCandidate {
        sym: at_template,
        name: at_name,
        params: vec![
            ParamKind::Infer(TypePattern::RefSlice(Box::new(TypePattern::Param(t_name)))),
            ParamKind::Concrete(TypeId::INT),
        ],
        ret: TypeId::ANY,
    };
    let args = vec![
        ArgFact {
            ty: CompactType::static_ty(ref_slice_str),
            ct_value: None,
        },
        ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: None,
        },
    ];

    let mut expansions = 0;
    let mut expand_at = |compiler: &mut Compiler, bound_t: TypeId| -> mira_sema::SymId {
        let variant_args = [Value::type_handle(bound_t)];
        if let Some(Variant::Type(existing)) = compiler.variants.get(at_template, &variant_args) {
            return *existing;
        }
        expansions += 1;
        compiler.variants.mark_in_progress(at_template, &variant_args);
        let leaf = compiler
            .syms
            .reserve(n(9), SymKind::Func, Some(at_template), chunk, n(0))
            .unwrap();
        compiler.syms.mark_resolved(leaf, Some(bound_t));
        compiler.variants.resolve(at_template, &variant_args, Variant::Type(leaf));
        leaf
    };

    let outcome = match_func(&compiler.types, &at, &args, false, &mut compiler.ct_stack, &compiler.variants).unwrap();
    let bound_t = outcome.ct_bindings.get(&t_name).and_then(Value::as_type_id).unwrap();
    assert_eq!(bound_t, TypeId::STR);
    let first = expand_at(&mut compiler, bound_t);

    let outcome2 = match_func(&compiler.types, &at, &args, false, &mut compiler.ct_stack, &compiler.variants).unwrap();
    let bound_t2 = outcome2.ct_bindings.get(&t_name).and_then(Value::as_type_id).unwrap();
    let second = expand_at(&mut compiler, bound_t2);

    assert_eq!(first, second);
    assert_eq!(expansions, 1);

    let mut emitter = Emitter::new();
    emitter.enter_procedure();
    let callee = emitter.push(CanExpr::FunctionRef(at_name), Span::DUMMY, TypeId::ANY);
    let call = emitter.push(CanExpr::Call { func: callee, args: mira_canon::CanRange::EMPTY }, Span::DUMMY, bound_t);
    assert_eq!(emitter.arena.ty(call).raw(), bound_t.raw());
    emitter.exit_procedure();
}

/// S6 — Compile-time value template: `template size[T]() { sizeof(T) }`
/// consumed as `size[Int]`. Expanding it invokes the evaluator exactly
/// once, and the folded result is foldable straight into an integer
/// literal in emitted IR.
#[test]
fn s6_ct_value_template_invokes_the_evaluator_once_and_folds_an_int_literal() {
    let mut compiler = Compiler::new();
    let chunk = compiler.alloc_chunk();
    let size_name = n(20);
    let size_template_sym = compiler
        .syms
        .reserve(size_name, SymKind::FuncTemplate, None, chunk, n(0))
        .unwrap();
    let size_template = mira_generics::FuncTemplate {
        name: size_name,
        params: vec![n(21)],
        decl: size_template_sym,
    };

    let mut evaluator = StubEvaluator::new();
    evaluator.push_result(Ok(Value::int(8)));

    let args = vec![Value::type_handle(TypeId::INT)];
    let mut cache = mira_generics::VariantCache::new();
    let result = expand_ct_func_template(
        &size_template,
        args.clone(),
        &mut cache,
        &mut compiler.ct_stack,
        |_| {
            compiler
                .syms
                .reserve(n(22), SymKind::Func, Some(size_template_sym), chunk, n(0))
                .unwrap()
        },
        &mut evaluator,
    )
    .unwrap();
    assert_eq!(result.as_int(), Some(8));
    assert_eq!(evaluator.calls.len(), 1);
    assert!(compiler.ct_stack.is_empty());

    // Re-expanding `size[Int]` hits the memoized variant -- no second
    // evaluator invocation, so `instantiate` here is never actually called.
    let second = expand_ct_func_template(
        &size_template,
        args,
        &mut cache,
        &mut compiler.ct_stack,
        |_| unreachable!("cache hit should not re-instantiate"),
        &mut evaluator,
    )
    .unwrap();
    assert_eq!(second.as_int(), Some(8));
    assert_eq!(evaluator.calls.len(), 1);
    assert!(compiler.ct_stack.is_empty());

    let mut emitter = Emitter::new();
    emitter.enter_procedure();
    let folded = emitter.push(CanExpr::Int(result.as_int().unwrap()), Span::DUMMY, TypeId::INT);
    assert!(matches!(emitter.arena.kind(folded), CanExpr::Int(8)));
    emitter.exit_procedure();
}
