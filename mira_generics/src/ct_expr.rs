//! The compile-time-expression AST shape `resolveCtValue` consumes
//! (SPEC_FULL.md §4.4).
//!
//! As with `mira_sema::TypeSpecNode`, the parser is out of scope (SPEC_FULL.md
//! §1); this enum stands in for whatever concrete AST the excluded front end
//! produces, covering exactly the expression forms `resolveCtValue` is
//! specified to fold.

use mira_ir::{Name, Span};
use mira_sema::Spanned as TypeSpanned;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CtExprNode {
    Int(i64),
    /// `f64` isn't `Eq`; compile-time float literals compare by bit pattern.
    Float(u64),
    Str(String),
    RawStr(String),
    Void,
    /// A bare identifier: resolves against ct-params first, then the symbol graph.
    Ident { name: Name, span: Span },
    /// `comptime <ident>`; mode is read off the active `ResolveContext`.
    ComptimeIdent { name: Name, span: Span },
    /// A pointer/ref/array/slice/option/func type-spec expression, folded to
    /// a `Value::Type` via `mira_sema::Resolver::resolve_ct_value`.
    TypeExpr(TypeSpanned),
}

impl CtExprNode {
    pub fn float(f: f64) -> Self {
        CtExprNode::Float(f.to_bits())
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            CtExprNode::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}
