//! Module-Level Items
//!
//! Top-level declarations: Module, Function, `TestDef`, `TypeDecl`, `ExternBlock`.

mod extern_def;
mod function;
mod imports;
mod traits;
mod types;

pub use extern_def::{ExternBlock, ExternItem, ExternParam};
pub use function::{
    CapabilityRef, CfgAttr, ConstDef, ExpectedError, FileAttr, Function, Module, Param,
    PostContract, PreContract, TargetAttr, TestDef,
};
pub use imports::{
    ExtensionImport, ExtensionImportItem, ImportErrorKind, ImportPath, UseDef, UseItem,
};
pub use traits::{
    DefImplDef, ExtendDef, GenericParam, ImplAssocType, ImplDef, ImplMethod, TraitAssocType,
    TraitBound, TraitDef, TraitDefaultMethod, TraitItem, TraitMethodSig, WhereClause,
};
pub use types::{StructField, TypeDecl, TypeDeclKind, Variant, VariantField};
