//! The thin driver crate: wires the Symbol Graph, Type Store, Declaration
//! Pipeline, Resolver, Template Expander/Matcher, and host hooks into one
//! `Compiler` context (SPEC_FULL.md §9, "Global state").

pub mod compiler;

pub use compiler::Compiler;
