//! Overload & Template Matcher (SPEC_FULL.md §4.5).
//!
//! Argument nodes here are already-resolved facts (`ArgFact`) rather than raw
//! AST, mirroring how `mira_sema::TypeSpecNode`/`CtExprNode` stand in for the
//! excluded parser elsewhere in this pipeline (SPEC_FULL.md §1): by the time
//! a call reaches the matcher, each argument expression has already been
//! resolved to a static type and, where possible, a folded compile-time
//! value.

use rustc_hash::FxHashMap;

use mira_ir::Name;
use mira_sema::SymId;
use mira_types::{CompactType, TypeError, TypeId, TypeStore};
use mira_values::Value;

use crate::error::{CandidateError, MatchError, RejectedCandidate};
use crate::value_stack::{ValueStack, ValueStackGuard};
use crate::variant::VariantCache;

/// A call-site argument, already resolved to a static type and, where the
/// expression folds, a compile-time value.
#[derive(Clone, Debug)]
pub struct ArgFact {
    pub ty: CompactType,
    pub ct_value: Option<Value>,
}

/// A type-spec pattern appearing in a parameter position that may reference
/// template parameters, used by `infer_ct_args`'s structural walk
/// (`ptr`, `[]`, `[*]`, `T[A,B,...]`).
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypePattern {
    /// A bare reference to a template parameter name.
    Param(Name),
    /// A concrete, non-parametric leaf type.
    Concrete(TypeId),
    Ptr(Box<TypePattern>),
    Ref(Box<TypePattern>),
    PtrSlice(Box<TypePattern>),
    RefSlice(Box<TypePattern>),
    Option(Box<TypePattern>),
    /// `Template[Arg, Arg, ...]`: the observed type must be an expansion of
    /// the same template symbol, argument vectors matched position-wise.
    Application { template: SymId, args: Vec<TypePattern> },
}

/// How a declared parameter position participates in matching.
#[derive(Clone, Debug)]
pub enum ParamKind {
    /// An ordinary, fully concrete parameter type.
    Concrete(TypeId),
    /// `sema_tparam`: this entire parameter is a bare template parameter;
    /// the argument must fold to a compile-time value and becomes the
    /// binding for `name`.
    Template(Name),
    /// `sema_infer_tparam`: the parameter's declared type is a pattern that
    /// may reference template parameters nested inside compound sugar.
    Infer(TypePattern),
}

/// One declared overload candidate.
#[derive(Clone, Debug)]
pub struct FuncCandidate {
    pub sym: SymId,
    pub name: Name,
    pub params: Vec<ParamKind>,
    pub ret: TypeId,
}

/// How one argument was ultimately classified once its parameter matched.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ArgClass {
    Template,
    Ct,
    Runtime,
    /// Accepted only because the parameter or argument is `Dyn`/`Any`; the
    /// emitter must insert an unbox-or-runtime-check node here.
    BoxedDynamic,
}

/// A successful match: the bindings inferred/supplied for any template
/// parameters, the per-argument classification, and whether this candidate
/// was accepted only via the dynamic fallback.
#[derive(Clone, Debug, Default)]
pub struct MatchOutcome {
    pub ct_bindings: FxHashMap<Name, Value>,
    pub arg_classes: Vec<ArgClass>,
    /// Set when, within an *overload set*, any accepted argument was
    /// `Dyn`/`Any` -- the emitter lowers this call as a late-bound dispatch.
    pub dyn_call: bool,
}

/// `matchFunc`: match a single candidate's parameter list against `args`.
///
/// `stack` provides the scoped value-stack window (SPEC_FULL.md §5, §9) that
/// every compile-time argument is retained through for the duration of this
/// match: opened once here, handed down through [`match_arg`], and released
/// in full when the window drops at the end of this call, independent of
/// whether the match succeeded.
pub fn match_func(
    types: &TypeStore,
    candidate: &FuncCandidate,
    args: &[ArgFact],
    ct_call: bool,
    stack: &mut ValueStack,
    origins: &VariantCache,
) -> Result<MatchOutcome, CandidateError> {
    if candidate.params.len() != args.len() {
        return Err(MatchError::ArgCountMismatch {
            span: mira_ir::Span::DUMMY,
            expected: candidate.params.len(),
            found: args.len(),
        }
        .into());
    }
    let mut outcome = MatchOutcome::default();
    let mut window = stack.window();
    for (param, arg) in candidate.params.iter().zip(args.iter()) {
        let class = match_arg(types, param, arg, ct_call, &mut outcome.ct_bindings, &mut window, origins)?;
        if class == ArgClass::BoxedDynamic {
            outcome.dyn_call = true;
        }
        outcome.arg_classes.push(class);
    }
    Ok(outcome)
}

/// `matchArg`/`matchTemplateArg`: the per-argument decision table from
/// SPEC_FULL.md §4.5.
fn match_arg(
    types: &TypeStore,
    param: &ParamKind,
    arg: &ArgFact,
    ct_call: bool,
    bindings: &mut FxHashMap<Name, Value>,
    window: &mut ValueStackGuard<'_>,
    origins: &VariantCache,
) -> Result<ArgClass, CandidateError> {
    match param {
        ParamKind::Template(name) => {
            let value = arg.ct_value.as_ref().ok_or(MatchError::ExpectedCompileTimeArg {
                span: mira_ir::Span::DUMMY,
            })?;
            // Retain through the scoped window so this binding participates
            // in the call's stack-conservation invariant; `bindings` itself
            // gets its own independent retained copy to outlive the window.
            window.push(value.retain());
            bindings.insert(*name, value.retain());
            Ok(ArgClass::Template)
        }
        ParamKind::Infer(pattern) => {
            infer_ct_args(types, pattern, arg.ty.id, bindings, origins)?;
            Ok(ArgClass::Runtime)
        }
        ParamKind::Concrete(param_ty) => {
            if ct_call {
                if arg.ct_value.is_none() {
                    return Err(MatchError::ExpectedCompileTimeArg {
                        span: mira_ir::Span::DUMMY,
                    }
                    .into());
                }
                return Ok(ArgClass::Ct);
            }
            if types.is_type_sym_compat(arg.ty.id, *param_ty) {
                return Ok(ArgClass::Runtime);
            }
            if matches!(types.get(arg.ty.id), mira_types::Type::Dyn | mira_types::Type::Any)
                || matches!(types.get(*param_ty), mira_types::Type::Dyn | mira_types::Type::Any)
            {
                return Ok(ArgClass::BoxedDynamic);
            }
            Err(TypeError::IncompatType {
                span: mira_ir::Span::DUMMY,
                expected: *param_ty,
                found: arg.ty.id,
                context: "argument",
            }
            .into())
        }
    }
}

/// `inferCtArgs`: walk a parameter's type pattern against the argument's
/// observed type, binding template parameter names on first reference and
/// requiring equality on every subsequent one.
///
/// `origins` is the same [`VariantCache`] that resolved any type templates
/// in scope; it backs the `TypePattern::Application` arm's
/// `expectTypeFromTemplate` check.
fn infer_ct_args(
    types: &TypeStore,
    pattern: &TypePattern,
    observed: TypeId,
    bindings: &mut FxHashMap<Name, Value>,
    origins: &VariantCache,
) -> Result<(), CandidateError> {
    match pattern {
        TypePattern::Param(name) => {
            if let Some(bound) = bindings.get(name) {
                let bound_ty = bound.as_type_id().ok_or(MatchError::ParamNotDeclaredInSignature {
                    span: mira_ir::Span::DUMMY,
                    name: *name,
                })?;
                if bound_ty != observed {
                    return Err(TypeError::IncompatType {
                        span: mira_ir::Span::DUMMY,
                        expected: bound_ty,
                        found: observed,
                        context: "template parameter",
                    }
                    .into());
                }
                Ok(())
            } else {
                bindings.insert(*name, Value::type_handle(observed));
                Ok(())
            }
        }
        TypePattern::Concrete(expected) => {
            if *expected == observed {
                Ok(())
            } else {
                Err(TypeError::IncompatType {
                    span: mira_ir::Span::DUMMY,
                    expected: *expected,
                    found: observed,
                    context: "argument",
                }
                .into())
            }
        }
        TypePattern::Ptr(inner) => match types.get(observed) {
            mira_types::Type::Pointer(elem) => infer_ct_args(types, inner, *elem, bindings, origins),
            _ => Err(TypeError::ExpectedPointerType {
                span: mira_ir::Span::DUMMY,
                found: observed,
            }
            .into()),
        },
        TypePattern::Ref(inner) => match types.get(observed) {
            mira_types::Type::Ref(elem) => infer_ct_args(types, inner, *elem, bindings, origins),
            _ => Err(TypeError::ExpectedPointerType {
                span: mira_ir::Span::DUMMY,
                found: observed,
            }
            .into()),
        },
        TypePattern::PtrSlice(inner) => match types.get(observed) {
            mira_types::Type::Array { elem, .. } => match types.get(*elem) {
                mira_types::Type::Pointer(e2) => infer_ct_args(types, inner, *e2, bindings, origins),
                _ => Err(TypeError::ExpectedPointerType {
                    span: mira_ir::Span::DUMMY,
                    found: observed,
                }
                .into()),
            },
            _ => Err(TypeError::ExpectedPointerType {
                span: mira_ir::Span::DUMMY,
                found: observed,
            }
            .into()),
        },
        TypePattern::RefSlice(inner) => match types.get(observed) {
            mira_types::Type::Array { elem, .. } => match types.get(*elem) {
                mira_types::Type::Ref(e2) => infer_ct_args(types, inner, *e2, bindings, origins),
                _ => Err(TypeError::ExpectedPointerType {
                    span: mira_ir::Span::DUMMY,
                    found: observed,
                }
                .into()),
            },
            _ => Err(TypeError::ExpectedPointerType {
                span: mira_ir::Span::DUMMY,
                found: observed,
            }
            .into()),
        },
        TypePattern::Option(inner) => match types.get(observed) {
            mira_types::Type::Option(elem) => infer_ct_args(types, inner, *elem, bindings, origins),
            _ => Err(TypeError::ExpectedPointerType {
                span: mira_ir::Span::DUMMY,
                found: observed,
            }
            .into()),
        },
        TypePattern::Application { template, args: pat_args } => {
            // `expectTypeFromTemplate`: the observed type must itself be an
            // expansion of this exact template, not merely some compound
            // type that happens to share its argument-list arity.
            if origins.origin_of(observed) != Some(*template) {
                return Err(MatchError::NotTemplateExpansion {
                    span: mira_ir::Span::DUMMY,
                    template: *template,
                    found: observed,
                }
                .into());
            }
            let children = types.get(observed).direct_children();
            if children.len() != pat_args.len() {
                return Err(MatchError::ArgCountMismatch {
                    span: mira_ir::Span::DUMMY,
                    expected: pat_args.len(),
                    found: children.len(),
                }
                .into());
            }
            for (p, c) in pat_args.iter().zip(children.iter()) {
                infer_ct_args(types, p, *c, bindings, origins)?;
            }
            Ok(())
        }
    }
}

/// `matchFuncSym`: resolve a call against an overload set.
///
/// A single-candidate set delegates straight to [`match_func`] and its
/// diagnostic is surfaced directly; a multi-candidate set tries each in
/// declaration order and, on total failure, merges every rejection into one
/// [`MatchError::IncompatCall`].
///
/// `overload_head` is the `FuncSym` symbol heading this set's overload
/// chain. A multi-candidate match accepted only through the dynamic
/// fallback (some argument boxed as `Dyn`/`Any`) can't commit to one
/// candidate statically -- the actual target depends on the argument's
/// runtime type tag -- so that case returns `overload_head` instead of the
/// individual `Func` symbol, for the emitter to lower as `call_sym_dyn`.
pub fn match_func_sym(
    types: &TypeStore,
    overload_head: SymId,
    name: Name,
    candidates: &[FuncCandidate],
    args: &[ArgFact],
    ct_call: bool,
    stack: &mut ValueStack,
    origins: &VariantCache,
) -> Result<(SymId, MatchOutcome), CandidateError> {
    match candidates {
        [] => Err(MatchError::IncompatCall {
            span: mira_ir::Span::DUMMY,
            name,
            candidates: Vec::new(),
        }
        .into()),
        [only] => match_func(types, only, args, ct_call, stack, origins).map(|o| (only.sym, o)),
        many => {
            let mut rejected = Vec::with_capacity(many.len());
            for candidate in many {
                match match_func(types, candidate, args, ct_call, stack, origins) {
                    Ok(mut outcome) => {
                        let target = if outcome.arg_classes.contains(&ArgClass::BoxedDynamic) {
                            outcome.dyn_call = true;
                            overload_head
                        } else {
                            candidate.sym
                        };
                        return Ok((target, outcome));
                    }
                    Err(e) => rejected.push(RejectedCandidate {
                        func: candidate.sym,
                        reason: e.short_reason(|id| format!("#{}", id.raw())),
                    }),
                }
            }
            Err(MatchError::IncompatCall {
                span: mira_ir::Span::DUMMY,
                name,
                candidates: rejected,
            }
            .into())
        }
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
    fn concrete_param_accepts_exact_type() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let outcome = match_func(&types, &candidate, &args, false, &mut stack, &origins).unwrap();
        assert_eq!(outcome.arg_classes, vec![ArgClass::Runtime]);
        assert!(!outcome.dyn_call);
        assert!(stack.is_empty());
    }

    #[test]
    fn concrete_param_rejects_incompatible_type() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::STR),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let err = match_func(&types, &candidate, &args, false, &mut stack, &origins).unwrap_err();
        assert!(matches!(err, CandidateError::Type(TypeError::IncompatType { .. })));
    }

    #[test]
    fn dyn_argument_is_accepted_as_boxed_dynamic() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::DYN),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let outcome = match_func(&types, &candidate, &args, false, &mut stack, &origins).unwrap();
        assert_eq!(outcome.arg_classes, vec![ArgClass::BoxedDynamic]);
        assert!(outcome.dyn_call);
    }

    #[test]
    fn template_param_requires_a_compile_time_argument() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Template(n(9))],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let err = match_func(&types, &candidate, &args, false, &mut stack, &origins).unwrap_err();
        assert!(matches!(err, CandidateError::Match(MatchError::ExpectedCompileTimeArg { .. })));
    }

    #[test]
    fn template_param_binds_its_folded_value() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Template(n(9))],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: Some(Value::int(3)),
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let outcome = match_func(&types, &candidate, &args, false, &mut stack, &origins).unwrap();
        assert_eq!(outcome.ct_bindings.get(&n(9)).and_then(Value::as_int), Some(3));
        // The binding's own retained copy survives in `ct_bindings`; the
        // window it was also pushed through released on return.
        assert!(stack.is_empty());
    }

    #[test]
    fn infer_param_binds_on_first_sight_and_checks_equality_after() {
        let mut types = TypeStore::new();
        let ptr_int = types.get_pointer_type(TypeId::INT);
        let pattern = TypePattern::Ptr(Box::new(TypePattern::Param(n(1))));
        let mut bindings = FxHashMap::default();
        let origins = VariantCache::new();
        infer_ct_args(&types, &pattern, ptr_int, &mut bindings, &origins).unwrap();
        assert_eq!(bindings.get(&n(1)).and_then(Value::as_type_id), Some(TypeId::INT));

        // A second reference to the same parameter name demands equality.
        let ptr_str = types.get_pointer_type(TypeId::STR);
        let err = infer_ct_args(&types, &pattern, ptr_str, &mut bindings, &origins).unwrap_err();
        assert!(matches!(err, CandidateError::Type(TypeError::IncompatType { .. })));
    }

    /// Fix for `expectTypeFromTemplate`: a nested `Template[Args...]`
    /// pattern must reject a type that never came from that template, even
    /// when its structural shape happens to have the right arity.
    #[test]
    fn application_pattern_rejects_a_type_not_from_the_required_template() {
        let mut types = TypeStore::new();
        let observed = types.get_option_type(TypeId::INT);
        let origins = VariantCache::new(); // `observed`'s origin was never recorded.
        let pattern = TypePattern::Application {
            template: s(7),
            args: vec![TypePattern::Concrete(TypeId::INT)],
        };
        let mut bindings = FxHashMap::default();
        let err = infer_ct_args(&types, &pattern, observed, &mut bindings, &origins).unwrap_err();
        assert!(matches!(
            err,
            CandidateError::Match(MatchError::NotTemplateExpansion { template, found, .. })
                if template == s(7) && found == observed
        ));
    }

    /// The same check accepts a type recorded as an expansion of the exact
    /// template named in the pattern, then matches its children position-wise.
    #[test]
    fn application_pattern_accepts_a_type_expanded_from_the_same_template() {
        let mut types = TypeStore::new();
        let observed = types.get_option_type(TypeId::INT);
        let mut cache = VariantCache::new();
        cache.record_origin(observed, s(7));
        let pattern = TypePattern::Application {
            template: s(7),
            args: vec![TypePattern::Concrete(TypeId::INT)],
        };
        let mut bindings = FxHashMap::default();
        infer_ct_args(&types, &pattern, observed, &mut bindings, &cache).unwrap();
    }

    #[test]
    fn match_func_sym_single_candidate_propagates_its_diagnostic_directly() {
        let types = TypeStore::new();
        let candidate = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::STR),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let err =
            match_func_sym(&types, s(99), n(0), &[candidate], &args, false, &mut stack, &origins).unwrap_err();
        assert!(matches!(err, CandidateError::Type(_)));
    }

    #[test]
    fn match_func_sym_multi_candidate_merges_all_rejections() {
        let types = TypeStore::new();
        let c1 = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let c2 = FuncCandidate {
            sym: s(1),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::BOOL)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::STR),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let err = match_func_sym(&types, s(99), n(0), &[c1, c2], &args, false, &mut stack, &origins).unwrap_err();
        match err {
            CandidateError::Match(MatchError::IncompatCall { candidates, .. }) => {
                assert_eq!(candidates.len(), 2);
            }
            _ => panic!("expected IncompatCall"),
        }
    }

    #[test]
    fn match_func_sym_picks_first_matching_candidate_in_declaration_order() {
        let types = TypeStore::new();
        let c1 = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::BOOL)],
            ret: TypeId::VOID,
        };
        let c2 = FuncCandidate {
            sym: s(1),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::VOID,
        };
        let args = vec![ArgFact {
            ty: CompactType::static_ty(TypeId::INT),
            ct_value: None,
        }];
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let (sym, _) = match_func_sym(&types, s(99), n(0), &[c1, c2], &args, false, &mut stack, &origins).unwrap();
        assert_eq!(sym, s(1));
    }

    #[test]
    fn match_func_sym_dyn_fallback_targets_the_overload_head_not_one_candidate() {
        let types = TypeStore::new();
        let add_int = FuncCandidate {
            sym: s(0),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::INT), ParamKind::Concrete(TypeId::INT)],
            ret: TypeId::INT,
        };
        let add_float = FuncCandidate {
            sym: s(1),
            name: n(0),
            params: vec![ParamKind::Concrete(TypeId::FLOAT), ParamKind::Concrete(TypeId::FLOAT)],
            ret: TypeId::FLOAT,
        };
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
        let overload_head = s(2);
        let mut stack = ValueStack::new();
        let origins = VariantCache::new();
        let (target, outcome) = match_func_sym(
            &types,
            overload_head,
            n(0),
            &[add_int, add_float],
            &args,
            false,
            &mut stack,
            &origins,
        )
        .unwrap();
        assert!(outcome.dyn_call);
        assert_eq!(target, overload_head);
    }
}
