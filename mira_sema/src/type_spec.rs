//! The type-spec AST shape the Resolver consumes (SPEC_FULL.md §4.3).
//!
//! The tokenizer/parser are out of scope for this pipeline (SPEC_FULL.md
//! §1); this module defines the node kinds `resolveTypeSpecNode` is
//! specified against, standing in for whatever concrete AST the excluded
//! front end produces. Sugar forms (`*T`, `[*]T`, `[]T`, `?T`, `[N]T`) are
//! distinct node kinds rather than pre-expanded, so the resolver is the one
//! place that maps surface syntax onto `mira_types`'s built-ins (SPEC_FULL.md
//! §6, "Sugar forms").

use mira_ir::{Name, Span};

/// One segment of a dotted name path (`a.b.c`), as consumed by
/// `resolveTypeSpecNode`'s name-path case.
pub type NamePath = Vec<Name>;

/// A type-spec AST node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeSpecNode {
    /// An absent annotation; resolves to `Dyn`.
    Null,
    /// A single identifier -- may be a ct-parameter, `Self`, or a static sym.
    Ident(Name),
    /// A dotted path through parent symbols (`Self`, the chain of
    /// `getResolvedDistinctSym` lookups in SPEC_FULL.md §4.3).
    Path(NamePath),
    /// `*T` / `ptr T`.
    Ptr(Box<Spanned>),
    /// `ref T`.
    Ref(Box<Spanned>),
    /// `[N]T`: a fixed-size array.
    ArraySized { len: u32, elem: Box<Spanned> },
    /// `[*]T`: a pointer-to-slice.
    PtrSlice(Box<Spanned>),
    /// `[]T`: a reference-to-slice.
    RefSlice(Box<Spanned>),
    /// `?T`.
    Option(Box<Spanned>),
    /// `func (T, ...) R`. `is_union` distinguishes the `FuncUnion[Sig]`
    /// marker from the plain `FuncPtr[Sig]` form.
    Func {
        params: Vec<Spanned>,
        ret: Box<Spanned>,
        is_union: bool,
    },
}

/// A [`TypeSpecNode`] paired with the span it was parsed from.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Spanned {
    pub node: TypeSpecNode,
    pub span: Span,
}

impl Spanned {
    pub fn new(node: TypeSpecNode, span: Span) -> Self {
        Self { node, span }
    }
}
