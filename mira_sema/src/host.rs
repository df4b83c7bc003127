//! Host loader hooks (SPEC_FULL.md §6, "Host hooks").
//!
//! The Declaration Pipeline's reserve phase never assumes a concrete
//! host/runtime crate exists -- it talks to the host only through these
//! trait objects, mirroring the `Evaluator` abstraction `mira_generics` uses
//! for compile-time evaluation (§4.4, §9).

use mira_ir::Name;
use mira_types::{FuncSigId, TypeId};
use mira_values::Value;

/// What a [`TypeLoader`] asked for a `(module, name)` pair returns.
pub enum TypeLoadResult {
    /// Assign the given id outright, or request a fresh one be allocated.
    Decl(Option<TypeId>),
    /// A host object type: the loader supplies no structural payload here,
    /// only the signal that one exists and will be introspected later.
    HostObj,
    /// Like `HostObj`, plus the `loadAllMethods` nominal flag.
    CoreCustom { load_all_methods: bool },
    /// Delegate full symbol creation back to the host; the pipeline does not
    /// reserve anything itself for this declaration.
    Create,
}

/// `type_loader(info) -> {kind, payload}`.
pub trait TypeLoader {
    fn load_type(&mut self, module: Name, name: Name) -> Result<TypeLoadResult, Name>;
}

/// `func_loader(info) -> function pointer`.
pub trait FuncLoader {
    fn load_func(&mut self, module: Name, name: Name, sig: FuncSigId) -> Result<(), Name>;
}

/// `var_loader(info) -> value`. Type-checking the returned value against the
/// declared signature is deferred to the caller.
pub trait VarLoader {
    fn load_var(&mut self, module: Name, name: Name, idx: u32) -> Result<Value, Name>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDecl;
    impl TypeLoader for AlwaysDecl {
        fn load_type(&mut self, _module: Name, _name: Name) -> Result<TypeLoadResult, Name> {
            Ok(TypeLoadResult::Decl(Some(TypeId::INT)))
        }
    }

    #[test]
    fn type_loader_can_assign_a_fixed_id() {
        let mut loader = AlwaysDecl;
        match loader.load_type(Name::EMPTY, Name::EMPTY).unwrap() {
            TypeLoadResult::Decl(Some(id)) => assert_eq!(id, TypeId::INT),
            _ => panic!("expected Decl"),
        }
    }
}
