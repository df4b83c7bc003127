//! Typing error taxonomy.
//!
//! Every variant here corresponds to a specific way type-checking can reject
//! a program. Each carries enough context (spans, the offending `TypeId`s) to
//! build a rich [`Diagnostic`] without re-walking the AST.

use mira_diagnostic::{Diagnostic, ErrorCode};
use mira_ir::Span;

use crate::typeid::TypeId;

/// A single typing failure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeError {
    /// Two types were required to match (assignment, return, operand) and didn't.
    IncompatType {
        span: Span,
        expected: TypeId,
        found: TypeId,
        context: &'static str,
    },
    /// `&expr` (or an equivalent addressing operation) applied to a non-place expression.
    ExpectedAddressable { span: Span },
    /// A `Pointer[T]`/`Ref[T]` was required but the operand has a non-pointer type.
    ExpectedPointerType { span: Span, found: TypeId },
    /// An enum-choice (tagged union) type was required but the operand isn't one.
    ExpectedChoice { span: Span, found: TypeId },
    /// A trait object position required a `Trait` type but got something else.
    ExpectedTraitType { span: Span, found: TypeId },
    /// `as` (or equivalent) attempted between two types with no defined conversion.
    InvalidCast {
        span: Span,
        from: TypeId,
        to: TypeId,
    },
}

impl TypeError {
    /// Build a reportable [`Diagnostic`] from this error.
    ///
    /// `name_of` renders a `TypeId` to a human-readable type name; callers
    /// own the store, so it's passed in rather than threaded through every
    /// variant.
    pub fn to_diagnostic(&self, name_of: impl Fn(TypeId) -> String) -> Diagnostic {
        match *self {
            TypeError::IncompatType {
                span,
                expected,
                found,
                context,
            } => Diagnostic::error(ErrorCode::E2024)
                .with_message(format!(
                    "incompatible types: expected `{}`, found `{}`",
                    name_of(expected),
                    name_of(found)
                ))
                .with_label(span, context),
            TypeError::ExpectedAddressable { span } => Diagnostic::error(ErrorCode::E2025)
                .with_message("expression is not addressable")
                .with_label(span, "cannot take a reference to this expression"),
            TypeError::ExpectedPointerType { span, found } => Diagnostic::error(ErrorCode::E2026)
                .with_message(format!(
                    "expected a pointer type, found `{}`",
                    name_of(found)
                ))
                .with_label(span, "not a pointer type"),
            TypeError::ExpectedChoice { span, found } => Diagnostic::error(ErrorCode::E2027)
                .with_message(format!(
                    "expected an enum choice type, found `{}`",
                    name_of(found)
                ))
                .with_label(span, "not a choice type"),
            TypeError::ExpectedTraitType { span, found } => Diagnostic::error(ErrorCode::E2028)
                .with_message(format!("expected a trait type, found `{}`", name_of(found)))
                .with_label(span, "not a trait type"),
            TypeError::InvalidCast { span, from, to } => Diagnostic::error(ErrorCode::E2029)
                .with_message(format!(
                    "cannot cast `{}` to `{}`",
                    name_of(from),
                    name_of(to)
                ))
                .with_label(span, "invalid cast"),
        }
    }

    pub fn span(&self) -> Span {
        match *self {
            TypeError::IncompatType { span, .. }
            | TypeError::ExpectedAddressable { span }
            | TypeError::ExpectedPointerType { span, .. }
            | TypeError::ExpectedChoice { span, .. }
            | TypeError::ExpectedTraitType { span, .. }
            | TypeError::InvalidCast { span, .. } => span,
        }
    }
}
