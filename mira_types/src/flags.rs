//! Pre-computed per-type flags.
//!
//! Computed once when a type is pushed into the store and cached alongside
//! it, so callers never re-derive them by walking the type's structure.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed per-`TypeId` properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u32 {
        /// This type (or a type it wraps) is a `ct_ref` sentinel: an
        /// unresolved compile-time template parameter position.
        const CT_REF = 1 << 0;
        /// This type (or a type it wraps) is a `ct_infer` sentinel bound
        /// during `comptime <ident>` parameter inference.
        const CT_INFER = 1 << 1;
        /// Object/struct type that requests the `customPre` initializer hook
        /// before its declared fields are populated.
        const CUSTOM_PRE = 1 << 2;
        /// Host object/custom type that should load all methods from its
        /// `type_loader` payload rather than an explicit method list.
        const LOAD_ALL_METHODS = 1 << 3;
    }
}

impl TypeFlags {
    /// Flags that propagate from a wrapped type to the wrapper (`Pointer[T]`
    /// is `ct_ref` if `T` is `ct_ref`, and so on). `CUSTOM_PRE` and
    /// `LOAD_ALL_METHODS` are per-nominal-type and never propagate.
    pub const PROPAGATE_MASK: Self = Self::CT_REF.union(Self::CT_INFER);

    #[inline]
    pub const fn is_ct_ref(self) -> bool {
        self.contains(Self::CT_REF)
    }

    #[inline]
    pub const fn is_ct_infer(self) -> bool {
        self.contains(Self::CT_INFER)
    }

    #[inline]
    pub const fn has_custom_pre(self) -> bool {
        self.contains(Self::CUSTOM_PRE)
    }

    #[inline]
    pub const fn loads_all_methods(self) -> bool {
        self.contains(Self::LOAD_ALL_METHODS)
    }

    /// Fold a single child's propagating flags onto a parent.
    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    /// Fold propagating flags from every direct child of a compound type.
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, c| acc.union(Self::propagate_from(c)))
    }
}
