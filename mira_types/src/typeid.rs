//! Type Store handle.
//!
//! `TypeId` is the canonical handle into the [`crate::store::TypeStore`].
//! All types live in one arena and are referenced by this 32-bit index.
//!
//! # Design
//!
//! - 32-bit indices support 4+ billion distinct types per compilation
//! - Type equality is index comparison, never structural comparison
//! - `TypeId(0)` is reserved as the null/uninitialized sentinel -- it is
//!   never returned by `TypeStore::push_type` and must never be dereferenced
//! - Primitives and the two dynamic tops occupy fixed low indices: every
//!   `TypeStore` pushes them in the same order at construction time, so
//!   `TypeId::INT` et al. are valid without holding a store reference

use std::fmt;

/// A 32-bit index into the [`crate::store::TypeStore`].
///
/// Stable for the lifetime of a single compilation. `TypeId::NULL` (index 0)
/// is reserved and never aliases a real type.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Reserved null handle. Never returned by `TypeStore::push_type`.
    pub const NULL: Self = Self(0);

    // Fixed primitive/top slots. `TypeStore::new` pushes `Type` variants in
    // this exact order so these constants are valid without a store handle.
    pub const INT: Self = Self(1);
    pub const FLOAT: Self = Self(2);
    pub const BOOL: Self = Self(3);
    pub const STR: Self = Self(4);
    pub const CHAR: Self = Self(5);
    pub const BYTE: Self = Self(6);
    pub const VOID: Self = Self(7);
    pub const NEVER: Self = Self(8);
    pub const ERROR: Self = Self(9);
    pub const DYN: Self = Self(10);
    pub const ANY: Self = Self(11);

    /// First index available for user/template-generated types.
    pub const FIRST_FREE: u32 = 12;

    /// Construct from a raw index.
    ///
    /// # Safety (logical, not memory)
    /// The caller must ensure `raw` indexes a live slot in the owning `TypeStore`.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "TypeId::NULL")
        } else {
            write!(f, "TypeId({})", self.0)
        }
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::NULL
    }
}

// Compile-time size assertion: TypeId must be exactly 4 bytes.
const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
