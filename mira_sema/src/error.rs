//! Resolution/declaration-pipeline error taxonomy (SPEC_FULL.md §7,
//! "Resolution" and "Initialization" rows).
//!
//! Every variant here is a way the Symbol Graph, Resolver, or Declaration
//! Pipeline can reject a program. Each carries enough context to build a
//! [`Diagnostic`] without re-walking the AST.

use mira_diagnostic::{Diagnostic, ErrorCode};
use mira_ir::{Name, Span};

use crate::sym::SymId;

/// A single resolution or declaration-pipeline failure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResolveError {
    /// A name did not resolve to any symbol.
    SymNotFound { span: Span, name: Name },
    /// A name resolved to more than one candidate with no disambiguation.
    AmbiguousSymbol {
        span: Span,
        name: Name,
        candidates: Vec<SymId>,
    },
    /// A `distinct` type was required but something else was found.
    NotDistinct { span: Span, name: Name },
    /// A symbol exists but isn't visible from the querying module.
    NotExported { span: Span, name: Name },
    /// Two symbols share the same parent + name.
    Redeclaration { name: Name, first: SymId },
    /// An AST node kind this pipeline doesn't have resolution handling for
    /// (syntax the grammar accepts, semantics the core doesn't implement).
    UnsupportedNode { span: Span, node: &'static str },
    /// An unimplemented path was reached -- always a compiler bug, never
    /// something a user's source can trigger.
    Unsupported { span: Span, what: &'static str },
    /// A static-initializer dependency cycle was detected.
    CircularInit { span: Span, name: Name },
    /// A declaration was reserved but the pipeline never resolved it.
    MissingInitializer { span: Span, name: Name },
    /// A required field was missing from a struct/record initializer.
    FieldMissing { span: Span, field: Name },
    /// A host loader callback (`type_loader`/`func_loader`/`var_loader`) failed.
    LoaderFailed { span: Span, name: Name },
    /// A host loader returned a type/value incompatible with the declared signature.
    LoaderMismatch { span: Span, name: Name },
}

impl ResolveError {
    /// Build a reportable [`Diagnostic`] from this error.
    ///
    /// `name_of` renders a [`Name`] to its source text; callers own the
    /// string interner, so it's passed in rather than threaded through every
    /// variant.
    pub fn to_diagnostic(&self, name_of: impl Fn(Name) -> String) -> Diagnostic {
        match self {
            ResolveError::SymNotFound { span, name } => Diagnostic::error(ErrorCode::E7001)
                .with_message(format!("cannot find `{}` in this scope", name_of(*name)))
                .with_label(*span, "not found"),
            ResolveError::AmbiguousSymbol {
                span,
                name,
                candidates,
            } => {
                let mut diag = Diagnostic::error(ErrorCode::E7002)
                    .with_message(format!("`{}` is ambiguous", name_of(*name)))
                    .with_label(*span, "multiple candidates, no disambiguation");
                for c in candidates {
                    diag = diag.with_note(format!("candidate: sym#{}", c.raw()));
                }
                diag
            }
            ResolveError::NotDistinct { span, name } => Diagnostic::error(ErrorCode::E7003)
                .with_message(format!("`{}` is not a distinct type", name_of(*name)))
                .with_label(*span, "expected a `distinct` type"),
            ResolveError::NotExported { span, name } => Diagnostic::error(ErrorCode::E7004)
                .with_message(format!("`{}` is not exported from its module", name_of(*name)))
                .with_label(*span, "not visible here"),
            ResolveError::Redeclaration { name, first } => Diagnostic::error(ErrorCode::E7005)
                .with_message(format!(
                    "a symbol named `{}` already exists (sym#{})",
                    name_of(*name),
                    first.raw()
                ))
                .with_label(Span::DUMMY, "duplicate declaration"),
            ResolveError::UnsupportedNode { span, node } => Diagnostic::error(ErrorCode::E7006)
                .with_message(format!("`{node}` has no resolution handling"))
                .with_label(*span, "unsupported node kind"),
            ResolveError::Unsupported { span, what } => Diagnostic::error(ErrorCode::E7007)
                .with_message(format!("internal error: unimplemented path `{what}`"))
                .with_label(*span, "reached unimplemented compiler path"),
            ResolveError::CircularInit { span, name } => Diagnostic::error(ErrorCode::E7010)
                .with_message(format!(
                    "circular initializer dependency involving `{}`",
                    name_of(*name)
                ))
                .with_label(*span, "this reference completes a cycle"),
            ResolveError::MissingInitializer { span, name } => Diagnostic::error(ErrorCode::E7011)
                .with_message(format!(
                    "`{}` was reserved but never resolved",
                    name_of(*name)
                ))
                .with_label(*span, "missing initializer"),
            ResolveError::FieldMissing { span, field } => Diagnostic::error(ErrorCode::E7012)
                .with_message(format!("missing field `{}`", name_of(*field)))
                .with_label(*span, "required field not provided"),
            ResolveError::LoaderFailed { span, name } => Diagnostic::error(ErrorCode::E7020)
                .with_message(format!("host loader failed for `{}`", name_of(*name)))
                .with_label(*span, "loader callback returned an error"),
            ResolveError::LoaderMismatch { span, name } => Diagnostic::error(ErrorCode::E7021)
                .with_message(format!(
                    "host loader returned a value incompatible with `{}`'s declared signature",
                    name_of(*name)
                ))
                .with_label(*span, "type/value mismatch"),
        }
    }

    /// Source span this error anchors to, where one exists (`Redeclaration`
    /// carries no span of its own -- the caller anchors it to the duplicate
    /// declaration site).
    pub fn span(&self) -> Option<Span> {
        match self {
            ResolveError::SymNotFound { span, .. }
            | ResolveError::AmbiguousSymbol { span, .. }
            | ResolveError::NotDistinct { span, .. }
            | ResolveError::NotExported { span, .. }
            | ResolveError::UnsupportedNode { span, .. }
            | ResolveError::Unsupported { span, .. }
            | ResolveError::CircularInit { span, .. }
            | ResolveError::MissingInitializer { span, .. }
            | ResolveError::FieldMissing { span, .. }
            | ResolveError::LoaderFailed { span, .. }
            | ResolveError::LoaderMismatch { span, .. } => Some(*span),
            ResolveError::Redeclaration { .. } => None,
        }
    }
}
