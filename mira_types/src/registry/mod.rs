//! Structural metadata registries backing the Type Store.
//!
//! The pool (`crate::store::TypeStore`) stores every `TypeId` and its tag;
//! registries hold the heavier per-kind payload (field lists, variant lists,
//! trait method sets) that a `TypeId` alone can't carry without ballooning
//! the pool's item representation.
//!
//! # Architecture
//!
//! ```text
//! TypeStore (types as TypeId)
//!     └── TypeRegistry (object/struct/enum field & variant metadata)
//!     └── TraitRegistry (traits and their method sets)
//! ```
//!
//! - Dual indexing: `BTreeMap<Name, _>` (sorted) + `FxHashMap<TypeId, _>` (fast)
//! - Secondary indices for O(1) variant and field lookup

mod traits;
mod types;

// Type registry exports
pub use types::{
    FieldDef, StructDef, TypeEntry, TypeKind, TypeRegistry, VariantDef, VariantFields, Visibility,
};

// Trait registry exports
pub use traits::{
    ImplEntry, ImplMethodDef, MethodLookup, TraitAssocTypeDef, TraitEntry, TraitMethodDef,
    TraitRegistry, WhereConstraint,
};
