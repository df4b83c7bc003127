//! The Type Store: one arena of interned [`Type`]s per compilation.
//!
//! Every `TypeId` a compiler component ever sees was handed out by a single
//! `TypeStore`. Pushing the same shape twice is allowed -- the store does not
//! deduplicate structural types by default -- but compound built-ins
//! (pointers, refs, arrays, function types) and `FuncSig`s *are* interned, so
//! two call sites that ask for `ptr[int]` get the same `TypeId` back.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::data::{CompactType, Type};
use crate::flags::TypeFlags;
use crate::funcsig::{FuncSig, FuncSigId};
use crate::typeid::TypeId;

/// One arena of types, function signatures, and their derived flags.
#[derive(Debug)]
pub struct TypeStore {
    types: Vec<Type>,
    flags: Vec<TypeFlags>,
    sigs: Vec<FuncSig>,
    sig_table: FxHashMap<(Vec<TypeId>, TypeId), FuncSigId>,
    ct_refs: FxHashMap<u32, TypeId>,
    pointer_types: FxHashMap<TypeId, TypeId>,
    ref_types: FxHashMap<TypeId, TypeId>,
    array_types: FxHashMap<(u32, TypeId), TypeId>,
    ptr_slice_types: FxHashMap<TypeId, TypeId>,
    ref_slice_types: FxHashMap<TypeId, TypeId>,
    option_types: FxHashMap<TypeId, TypeId>,
    func_ptr_types: FxHashMap<FuncSigId, TypeId>,
    func_union_types: FxHashMap<FuncSigId, TypeId>,
    func_sym_types: FxHashMap<FuncSigId, TypeId>,
}

impl TypeStore {
    /// Build a fresh store with the null slot and every primitive/top
    /// pre-registered at their fixed [`TypeId`] constants.
    pub fn new() -> Self {
        let mut store = Self {
            types: Vec::new(),
            flags: Vec::new(),
            sigs: Vec::new(),
            sig_table: FxHashMap::default(),
            ct_refs: FxHashMap::default(),
            pointer_types: FxHashMap::default(),
            ref_types: FxHashMap::default(),
            array_types: FxHashMap::default(),
            ptr_slice_types: FxHashMap::default(),
            ref_slice_types: FxHashMap::default(),
            option_types: FxHashMap::default(),
            func_ptr_types: FxHashMap::default(),
            func_union_types: FxHashMap::default(),
            func_sym_types: FxHashMap::default(),
        };

        // Slot 0: reserved null.
        store.raw_push(Type::Dummy, TypeFlags::empty());
        debug_assert_eq!(store.types.len() as u32 - 1, TypeId::NULL.raw());

        for (id, ty) in [
            (TypeId::INT, Type::Int),
            (TypeId::FLOAT, Type::Float),
            (TypeId::BOOL, Type::Bool),
            (TypeId::STR, Type::Str),
            (TypeId::CHAR, Type::Char),
            (TypeId::BYTE, Type::Byte),
            (TypeId::VOID, Type::Void),
            (TypeId::NEVER, Type::Never),
            (TypeId::ERROR, Type::Error),
            (TypeId::DYN, Type::Dyn),
            (TypeId::ANY, Type::Any),
        ] {
            let pushed = store.raw_push(ty, TypeFlags::empty());
            debug_assert_eq!(pushed, id);
        }
        debug_assert_eq!(store.types.len() as u32, TypeId::FIRST_FREE);

        store
    }

    fn raw_push(&mut self, ty: Type, flags: TypeFlags) -> TypeId {
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(ty);
        self.flags.push(flags);
        id
    }

    /// Append a fresh slot for `ty`, deriving its flags from its direct children.
    pub fn push_type(&mut self, ty: Type) -> TypeId {
        let children_flags = ty
            .direct_children()
            .into_iter()
            .map(|c| self.flags_of(c));
        let mut flags = TypeFlags::propagate_all(children_flags);
        if ty.is_ct_sentinel() {
            flags |= match ty {
                Type::CtRef(_) => TypeFlags::CT_REF,
                Type::CtInfer(_) => TypeFlags::CT_INFER,
                _ => unreachable!(),
            };
        }
        let id = self.raw_push(ty, flags);
        trace!(type_id = id.raw(), "pushed type");
        id
    }

    /// Push a type with explicitly supplied nominal flags (`customPre`,
    /// `loadAllMethods`) in addition to whatever propagates from its children.
    pub fn push_type_with_flags(&mut self, ty: Type, extra: TypeFlags) -> TypeId {
        let id = self.push_type(ty);
        self.flags[id.raw() as usize] |= extra;
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.raw() as usize]
    }

    pub fn flags_of(&self, id: TypeId) -> TypeFlags {
        self.flags[id.raw() as usize]
    }

    pub fn sig(&self, id: FuncSigId) -> &FuncSig {
        &self.sigs[id.raw() as usize]
    }

    /// Intern a function signature, computing its derived flags once.
    ///
    /// Identity is `(params, ret)`: calling this twice with the same vector
    /// and return type always returns the same `FuncSigId`.
    pub fn ensure_func_sig(&mut self, params: Vec<TypeId>, ret: TypeId) -> FuncSigId {
        let key = (params.clone(), ret);
        if let Some(&id) = self.sig_table.get(&key) {
            return id;
        }
        let sig = FuncSig::compute(
            params,
            ret,
            |t| matches!(self.get(t), Type::Dyn | Type::Any),
            |t| self.flags_of(t).is_ct_ref(),
        );
        let id = FuncSigId::from_raw(self.sigs.len() as u32);
        self.sigs.push(sig);
        self.sig_table.insert(key, id);
        id
    }

    /// Return the (memoized) `ct_ref` sentinel type for compile-time
    /// parameter position `idx`.
    pub fn ensure_ct_ref_type(&mut self, idx: u32) -> TypeId {
        if let Some(&id) = self.ct_refs.get(&idx) {
            return id;
        }
        let id = self.push_type(Type::CtRef(idx));
        self.ct_refs.insert(idx, id);
        id
    }

    pub fn get_pointer_type(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.pointer_types.get(&elem) {
            return id;
        }
        let id = self.push_type(Type::Pointer(elem));
        self.pointer_types.insert(elem, id);
        id
    }

    pub fn get_ref_type(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.ref_types.get(&elem) {
            return id;
        }
        let id = self.push_type(Type::Ref(elem));
        self.ref_types.insert(elem, id);
        id
    }

    pub fn get_array_type(&mut self, len: u32, elem: TypeId) -> TypeId {
        let key = (len, elem);
        if let Some(&id) = self.array_types.get(&key) {
            return id;
        }
        let id = self.push_type(Type::Array { len, elem });
        self.array_types.insert(key, id);
        id
    }

    /// `ptr[T][]`: a pointer-to-slice, used for unsized buffer parameters.
    pub fn get_ptr_slice_type(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.ptr_slice_types.get(&elem) {
            return id;
        }
        let ptr = self.get_pointer_type(elem);
        let id = self.push_type(Type::Array {
            len: 0,
            elem: ptr,
        });
        self.ptr_slice_types.insert(elem, id);
        id
    }

    /// `ref[T][]`: a reference-to-slice.
    pub fn get_ref_slice_type(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.ref_slice_types.get(&elem) {
            return id;
        }
        let r = self.get_ref_type(elem);
        let id = self.push_type(Type::Array { len: 0, elem: r });
        self.ref_slice_types.insert(elem, id);
        id
    }

    /// `?T`: the built-in `Option[T]` template, memoized like every other
    /// compound built-in so `?int` resolved twice shares one `TypeId`.
    pub fn get_option_type(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.option_types.get(&elem) {
            return id;
        }
        let id = self.push_type(Type::Option(elem));
        self.option_types.insert(elem, id);
        id
    }

    pub fn get_func_ptr_type(&mut self, sig: FuncSigId) -> TypeId {
        if let Some(&id) = self.func_ptr_types.get(&sig) {
            return id;
        }
        let id = self.push_type(Type::FuncPtr(sig));
        self.func_ptr_types.insert(sig, id);
        id
    }

    pub fn get_func_union_type(&mut self, sig: FuncSigId) -> TypeId {
        if let Some(&id) = self.func_union_types.get(&sig) {
            return id;
        }
        let id = self.push_type(Type::FuncUnion(sig));
        self.func_union_types.insert(sig, id);
        id
    }

    pub fn get_func_sym_type(&mut self, sig: FuncSigId) -> TypeId {
        if let Some(&id) = self.func_sym_types.get(&sig) {
            return id;
        }
        let id = self.push_type(Type::FuncSym(sig));
        self.func_sym_types.insert(sig, id);
        id
    }

    /// `isTypeSymCompat(a, b)`: does a value of type `a` satisfy a position
    /// declared as `b`?
    ///
    /// `a == b`, or `b` is `Dyn`/`Any` (anything boxes into the dynamic
    /// tops), or `a` is a nominal subtype of / implements `b` -- the latter
    /// is resolved by the caller's registries (traits, `Distinct`
    /// underlying types), this method only covers the structural cases.
    pub fn is_type_sym_compat(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        if matches!(self.get(b), Type::Dyn | Type::Any) {
            return true;
        }
        if let Type::Distinct { underlying, .. } = self.get(a) {
            if self.is_type_sym_compat(*underlying, b) {
                return true;
            }
        }
        false
    }

    pub fn compact(&self, id: TypeId, dynamic: bool) -> CompactType {
        CompactType::new(id, dynamic)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_occupy_fixed_slots() {
        let store = TypeStore::new();
        assert_eq!(*store.get(TypeId::INT), Type::Int);
        assert_eq!(*store.get(TypeId::ANY), Type::Any);
        assert_eq!(store.len() as u32, TypeId::FIRST_FREE);
    }

    #[test]
    fn ensure_func_sig_interns_by_shape() {
        let mut store = TypeStore::new();
        let a = store.ensure_func_sig(vec![TypeId::INT, TypeId::STR], TypeId::BOOL);
        let b = store.ensure_func_sig(vec![TypeId::INT, TypeId::STR], TypeId::BOOL);
        let c = store.ensure_func_sig(vec![TypeId::INT], TypeId::BOOL);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn func_sig_flags_follow_spec_rules() {
        let mut store = TypeStore::new();
        let all_dyn = store.ensure_func_sig(vec![TypeId::DYN, TypeId::ANY], TypeId::VOID);
        assert!(!store.sig(all_dyn).req_call_type_check);

        let concrete = store.ensure_func_sig(vec![TypeId::INT], TypeId::VOID);
        assert!(store.sig(concrete).req_call_type_check);

        let ct_ref = store.ensure_ct_ref_type(0);
        let dep = store.ensure_func_sig(vec![ct_ref], TypeId::VOID);
        assert!(store.sig(dep).ct_dep);
    }

    #[test]
    fn ct_ref_type_is_memoized_per_index() {
        let mut store = TypeStore::new();
        let a = store.ensure_ct_ref_type(3);
        let b = store.ensure_ct_ref_type(3);
        let c = store.ensure_ct_ref_type(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(store.flags_of(a).is_ct_ref());
    }

    #[test]
    fn pointer_type_propagates_ct_ref_flag() {
        let mut store = TypeStore::new();
        let ct_ref = store.ensure_ct_ref_type(0);
        let ptr = store.get_pointer_type(ct_ref);
        assert!(store.flags_of(ptr).is_ct_ref());
    }

    #[test]
    fn built_in_compound_types_are_interned() {
        let mut store = TypeStore::new();
        let p1 = store.get_pointer_type(TypeId::INT);
        let p2 = store.get_pointer_type(TypeId::INT);
        let p3 = store.get_ref_type(TypeId::INT);
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }

    #[test]
    fn option_type_is_interned_like_every_other_built_in() {
        let mut store = TypeStore::new();
        let o1 = store.get_option_type(TypeId::INT);
        let o2 = store.get_option_type(TypeId::INT);
        let o3 = store.get_option_type(TypeId::STR);
        assert_eq!(o1, o2);
        assert_ne!(o1, o3);
        assert_eq!(*store.get(o1), Type::Option(TypeId::INT));
    }

    #[test]
    fn option_type_propagates_ct_ref_flag() {
        let mut store = TypeStore::new();
        let ct_ref = store.ensure_ct_ref_type(0);
        let opt = store.get_option_type(ct_ref);
        assert!(store.flags_of(opt).is_ct_ref());
    }

    #[test]
    fn sym_compat_accepts_dyn_and_any() {
        let store = TypeStore::new();
        assert!(store.is_type_sym_compat(TypeId::INT, TypeId::INT));
        assert!(store.is_type_sym_compat(TypeId::INT, TypeId::ANY));
        assert!(store.is_type_sym_compat(TypeId::INT, TypeId::DYN));
        assert!(!store.is_type_sym_compat(TypeId::INT, TypeId::STR));
    }

    #[test]
    fn sym_compat_follows_distinct_underlying() {
        let mut store = TypeStore::new();
        let distinct = store.push_type(Type::Distinct {
            name: mira_ir::Name::EMPTY,
            underlying: TypeId::INT,
        });
        assert!(store.is_type_sym_compat(distinct, TypeId::INT));
        assert!(!store.is_type_sym_compat(TypeId::INT, distinct));
    }
}
