//! Template/overload error taxonomy (SPEC_FULL.md §7, "Template" and
//! "Overload/Call" rows).

use mira_diagnostic::{Diagnostic, ErrorCode};
use mira_ir::{Name, Span};
use mira_sema::SymId;

/// A candidate signature rejected during overload resolution, rendered in
/// canonical `func name(T, T) R` form by the caller's `name_of`/`type_of`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RejectedCandidate {
    pub func: SymId,
    pub reason: String,
}

/// A single template-expansion or overload-matching failure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MatchError {
    /// No candidate in an overload set accepted the supplied arguments.
    IncompatCall {
        span: Span,
        name: Name,
        candidates: Vec<RejectedCandidate>,
    },
    /// A parameter position requiring a compile-time argument received one
    /// that could not be folded to a `Value` at compile time.
    ExpectedCompileTimeArg { span: Span },
    /// A call requiring a non-`void` result resolved to a `void`-returning function.
    ExpectedNonVoidReturn { span: Span, name: Name },
    /// The same template parameter name was declared twice in one signature.
    DuplicateParam { span: Span, name: Name },
    /// A template parameter was referenced in a type pattern but never
    /// declared in the signature it binds against.
    ParamNotDeclaredInSignature { span: Span, name: Name },
    /// A template/function was invoked with the wrong number of arguments.
    ArgCountMismatch {
        span: Span,
        expected: usize,
        found: usize,
    },
    /// Expansion recursed into a variant still being resolved.
    CircularExpansion { span: Span, name: Name },
    /// The evaluator rejected a `callFunc` invocation while materializing a
    /// compile-time function template (`expandCtFuncTemplate`).
    CtEvalFailed { span: Span, name: Name, reason: String },
    /// A nested `Template[Args...]` pattern matched a concrete type that did
    /// not itself originate from that template (`expectTypeFromTemplate`).
    NotTemplateExpansion {
        span: Span,
        template: SymId,
        found: mira_types::TypeId,
    },
}

impl MatchError {
    pub fn to_diagnostic(&self, name_of: impl Fn(Name) -> String) -> Diagnostic {
        match self {
            MatchError::IncompatCall {
                span,
                name,
                candidates,
            } => {
                let mut diag = Diagnostic::error(ErrorCode::E8001)
                    .with_message(format!(
                        "no overload of `{}` accepts these arguments",
                        name_of(*name)
                    ))
                    .with_label(*span, "no matching candidate");
                for c in candidates {
                    diag = diag.with_note(format!("candidate sym#{}: {}", c.func.raw(), c.reason));
                }
                diag
            }
            MatchError::ExpectedCompileTimeArg { span } => Diagnostic::error(ErrorCode::E8002)
                .with_message("expected a compile-time argument here")
                .with_label(*span, "this parameter is compile-time only"),
            MatchError::ExpectedNonVoidReturn { span, name } => Diagnostic::error(ErrorCode::E8003)
                .with_message(format!("`{}` returns `void`, but a value was expected", name_of(*name)))
                .with_label(*span, "used where a non-void result is required"),
            MatchError::DuplicateParam { span, name } => Diagnostic::error(ErrorCode::E8010)
                .with_message(format!("template parameter `{}` declared more than once", name_of(*name)))
                .with_label(*span, "duplicate parameter"),
            MatchError::ParamNotDeclaredInSignature { span, name } => {
                Diagnostic::error(ErrorCode::E8011)
                    .with_message(format!(
                        "`{}` is not declared in this signature",
                        name_of(*name)
                    ))
                    .with_label(*span, "undeclared template parameter")
            }
            MatchError::ArgCountMismatch {
                span,
                expected,
                found,
            } => Diagnostic::error(ErrorCode::E8012)
                .with_message(format!("expected {expected} argument(s), found {found}"))
                .with_label(*span, "wrong number of arguments"),
            MatchError::CircularExpansion { span, name } => Diagnostic::error(ErrorCode::E8013)
                .with_message(format!(
                    "`{}` expansion recursed into itself before its first instantiation finished",
                    name_of(*name)
                ))
                .with_label(*span, "this expansion is still in progress"),
            MatchError::CtEvalFailed { span, name, reason } => Diagnostic::error(ErrorCode::E8014)
                .with_message(format!(
                    "could not materialize compile-time template `{}`: {reason}",
                    name_of(*name)
                ))
                .with_label(*span, "while evaluating this expansion"),
            MatchError::NotTemplateExpansion { span, template, found } => {
                Diagnostic::error(ErrorCode::E8015)
                    .with_message(format!(
                        "type #{} is not an expansion of template sym#{}",
                        found.raw(),
                        template.raw()
                    ))
                    .with_label(*span, "expected an expansion of this call's template")
            }
        }
    }
}

/// A single candidate's rejection reason: either an ordinary typing failure
/// (argument/parameter type mismatch) or a template/overload-specific one.
///
/// Kept distinct from [`MatchError`] because the single-candidate path
/// (`matchFuncSym` step 1) surfaces a `TypeError` diagnostic directly rather
/// than wrapping it in an `IncompatCall` candidate list -- only the
/// multi-candidate path folds every rejection down to one merged error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum CandidateError {
    Type(mira_types::TypeError),
    Match(MatchError),
}

impl CandidateError {
    pub fn to_diagnostic(
        &self,
        name_of: impl Fn(Name) -> String,
        type_name_of: impl Fn(mira_types::TypeId) -> String,
    ) -> Diagnostic {
        match self {
            CandidateError::Type(e) => e.to_diagnostic(type_name_of),
            CandidateError::Match(e) => e.to_diagnostic(name_of),
        }
    }

    /// One-line rendering for an `IncompatCall` candidate-list note.
    pub fn short_reason(&self, type_name_of: impl Fn(mira_types::TypeId) -> String) -> String {
        match self {
            CandidateError::Type(mira_types::TypeError::IncompatType { expected, found, .. }) => {
                format!("expected `{}`, found `{}`", type_name_of(*expected), type_name_of(*found))
            }
            CandidateError::Type(_) => "type mismatch".to_string(),
            CandidateError::Match(MatchError::ArgCountMismatch { expected, found, .. }) => {
                format!("expected {expected} argument(s), found {found}")
            }
            CandidateError::Match(_) => "argument mismatch".to_string(),
        }
    }
}

impl From<mira_types::TypeError> for CandidateError {
    fn from(e: mira_types::TypeError) -> Self {
        CandidateError::Type(e)
    }
}

impl From<MatchError> for CandidateError {
    fn from(e: MatchError) -> Self {
        CandidateError::Match(e)
    }
}
