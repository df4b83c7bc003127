//! Template expansion, compile-time evaluation, and overload resolution
//! (SPEC_FULL.md §4.4, §4.5).

pub mod ct_expr;
pub mod cte;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod value_stack;
pub mod variant;

pub use ct_expr::CtExprNode;
pub use cte::resolve_ct_value;
pub use error::{CandidateError, MatchError, RejectedCandidate};
pub use evaluator::{Evaluator, StubEvaluator};
pub use matcher::{ArgClass, ArgFact, FuncCandidate, MatchOutcome, ParamKind, TypePattern, match_func, match_func_sym};
pub use value_stack::{ValueStack, ValueStackGuard};
pub use variant::{FuncTemplate, Template, Variant, VariantCache, expand_ct_func_template, expand_template};
