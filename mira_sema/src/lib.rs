//! Symbol graph, resolver, and declaration pipeline (SPEC_FULL.md §4.2-§4.3, §4.7).
//!
//! This crate owns everything between "an AST node exists" and "a stable
//! [`SymId`]/[`mira_types::TypeId`] exists for it": the arena of declared
//! symbols, the resolve-context stack that tracks compile-time parameter
//! bindings while walking into a body, the resolver that turns type-spec
//! syntax and identifiers into handles, the host loader capability
//! contracts, and the static-initializer dependency ordering. Template
//! expansion and overload resolution build on top of this crate but live in
//! `mira_generics`; IR emission builds on top of both and lives in
//! `mira_canon`.

pub mod context;
pub mod decl;
pub mod error;
pub mod host;
pub mod resolver;
pub mod sym;
pub mod type_spec;

pub use context::{ContextOrigin, CtIdentMode, ResolveContext, ResolveContextStack};
pub use decl::DeclPipeline;
pub use error::ResolveError;
pub use host::{FuncLoader, TypeLoadResult, TypeLoader, VarLoader};
pub use resolver::Resolver;
pub use sym::{ChunkId, Sym, SymId, SymKind, SymbolGraph};
pub use type_spec::{NamePath, Spanned, TypeSpecNode};
