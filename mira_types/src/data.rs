//! The `Type` payload stored behind each `TypeId`.
//!
//! Compound types hold `TypeId` children, never `Box<Type>` -- recursion
//! goes through the store, keeping every type Copy-ish and O(1) to compare
//! once interned.

use mira_ir::Name;

use crate::funcsig::FuncSigId;
use crate::typeid::TypeId;

/// A type's kind, interned once per unique shape in a [`crate::store::TypeStore`].
///
/// Structural metadata that doesn't fit in a few inline fields (field lists,
/// enum variants, trait method sets) is *not* stored here -- it lives in the
/// registries (`crate::registry`) keyed by the same `TypeId`. `Type` only
/// carries what's needed to answer "what kind of type is this" and "what are
/// its direct type-level children".
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    // --- Primitives ---
    Int,
    Float,
    Bool,
    Str,
    Char,
    Byte,
    Void,
    Never,
    /// Error placeholder for recovery after a prior diagnostic; propagates silently.
    Error,

    // --- Dynamic tops ---
    /// `Dyn`: the dynamically-typed top. Values carry a runtime type tag.
    Dyn,
    /// `Any`: the statically-typed top permitting boxing without dyn semantics.
    Any,

    // --- Nominal user types (structural payload lives in the registries) ---
    Object { name: Name },
    Struct { name: Name },
    Enum { name: Name, choice: bool },
    Trait { name: Name },
    HostObject { name: Name },
    /// A nominal wrapper whose identity is independent of `underlying`'s structure.
    Distinct { name: Name, underlying: TypeId },

    // --- Compound / built-in-template types ---
    Pointer(TypeId),
    Ref(TypeId),
    Array { len: u32, elem: TypeId },
    Option(TypeId),
    FuncPtr(FuncSigId),
    FuncUnion(FuncSigId),
    FuncSym(FuncSigId),

    // --- Template machinery sentinels ---
    /// Sentinel for an unresolved compile-time parameter at signature position `idx`.
    CtRef(u32),
    /// Sentinel bound during `comptime <ident>` inference at parameter index `idx`.
    CtInfer(u32),

    /// Placeholder pushed for a symbol whose type isn't known yet (forward reference).
    Dummy,
}

impl Type {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Int
                | Type::Float
                | Type::Bool
                | Type::Str
                | Type::Char
                | Type::Byte
                | Type::Void
                | Type::Never
                | Type::Error
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_dyn_top(&self) -> bool {
        matches!(self, Type::Dyn | Type::Any)
    }

    pub fn is_ct_sentinel(&self) -> bool {
        matches!(self, Type::CtRef(_) | Type::CtInfer(_))
    }

    /// The direct `TypeId` children of this type, in a stable left-to-right order.
    ///
    /// Used for dynamic-ness propagation and for generic traversals that don't
    /// need to know the specific kind (flag propagation, display).
    pub fn direct_children(&self) -> Vec<TypeId> {
        match self {
            Type::Distinct { underlying, .. } => vec![*underlying],
            Type::Pointer(t) | Type::Ref(t) | Type::Option(t) => vec![*t],
            Type::Array { elem, .. } => vec![*elem],
            _ => Vec::new(),
        }
    }
}

/// A `TypeId` paired with a dynamic-ness flag, threaded through resolution and IR.
///
/// Dyn-ness is orthogonal to the static type: a value statically typed `int`
/// can still be boxed into a `Dyn` slot (`dynamic = true`), and the emitter
/// inserts box/unbox IR at the boundary. `CompactType` is what the resolver
/// and matcher pass around instead of a bare `TypeId` whenever that boundary
/// matters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CompactType {
    pub id: TypeId,
    pub dynamic: bool,
}

impl CompactType {
    pub const fn new(id: TypeId, dynamic: bool) -> Self {
        Self { id, dynamic }
    }

    pub const fn static_ty(id: TypeId) -> Self {
        Self { id, dynamic: false }
    }
}
