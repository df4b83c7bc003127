//! Interned function signatures.
//!
//! A `FuncSig` is the parameter/return shape shared by `func_ptr`, `func_union`,
//! `func_sym` types and by every concrete `Func`. Interning means two call
//! sites with identical shapes compare equal in O(1), and `func (T, U) R`
//! syntax always resolves to the same handle.

use crate::typeid::TypeId;

/// Handle into the signature table of a [`crate::store::TypeStore`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct FuncSigId(u32);

impl FuncSigId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An interned function signature.
///
/// `req_call_type_check` and `ct_dep` are computed once at interning time
/// (testable property: re-interning the same `(params, ret)` always yields
/// the same id and the same derived flags).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncSig {
    pub params: Vec<TypeId>,
    pub ret: TypeId,
    /// True if any parameter type is neither `Dyn` nor `Any` -- callers must
    /// runtime-check or statically prove argument compatibility.
    pub req_call_type_check: bool,
    /// True if any parameter type is (or contains) a `ct_ref` sentinel --
    /// this signature can't be fully resolved until a template argument binds it.
    pub ct_dep: bool,
}

impl FuncSig {
    pub(crate) fn compute(
        params: Vec<TypeId>,
        ret: TypeId,
        is_dyn_or_any: impl Fn(TypeId) -> bool,
        is_ct_ref: impl Fn(TypeId) -> bool,
    ) -> Self {
        let req_call_type_check = params.iter().any(|&p| !is_dyn_or_any(p));
        let ct_dep = params.iter().any(|&p| is_ct_ref(p));
        Self {
            params,
            ret,
            req_call_type_check,
            ct_dep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn req_call_type_check_false_when_all_params_dyn() {
        let sig = FuncSig::compute(
            vec![TypeId::from_raw(1), TypeId::from_raw(2)],
            TypeId::from_raw(3),
            |_| true,
            |_| false,
        );
        assert!(!sig.req_call_type_check);
        assert!(!sig.ct_dep);
    }

    #[test]
    fn req_call_type_check_true_when_any_param_concrete() {
        let sig = FuncSig::compute(
            vec![TypeId::from_raw(1)],
            TypeId::from_raw(3),
            |_| false,
            |_| false,
        );
        assert!(sig.req_call_type_check);
    }

    #[test]
    fn ct_dep_true_when_param_is_ct_ref() {
        let sig = FuncSig::compute(
            vec![TypeId::from_raw(1)],
            TypeId::from_raw(3),
            |_| true,
            |t| t == TypeId::from_raw(1),
        );
        assert!(sig.ct_dep);
    }
}
