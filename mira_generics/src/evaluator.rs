//! The abstract VM re-entry point (SPEC_FULL.md §4.4, §9).
//!
//! Compile-time evaluation needs to call back into a running value --
//! materializing a `comptime fn`'s body, folding a constant expression --
//! without this crate depending on a concrete bytecode/VM crate, which is
//! out of this pipeline's scope (SPEC_FULL.md §1). `Evaluator` is held as
//! `&mut dyn Evaluator`, so the crate is testable against a stub.

use mira_sema::SymId;
use mira_values::Value;

/// Something capable of preparing and running compile-time function bodies.
pub trait Evaluator {
    /// Prepare `buf` bytes of bytecode for execution (load constants, fix up
    /// jump targets) ahead of a `call_func`.
    fn prepare(&mut self, buf: &[u8]);

    /// Invoke an already-instantiated function symbol with folded
    /// compile-time arguments, returning its folded result.
    fn call_func(&mut self, func: SymId, args: &[Value]) -> Result<Value, String>;
}

/// A stub evaluator for tests: records every call it received and returns a
/// pre-seeded result in FIFO order.
#[derive(Default)]
pub struct StubEvaluator {
    pub prepared: Vec<Vec<u8>>,
    pub calls: Vec<(SymId, Vec<Value>)>,
    pub results: std::collections::VecDeque<Result<Value, String>>,
}

impl StubEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_result(&mut self, result: Result<Value, String>) {
        self.results.push_back(result);
    }
}

impl Evaluator for StubEvaluator {
    fn prepare(&mut self, buf: &[u8]) {
        self.prepared.push(buf.to_vec());
    }

    fn call_func(&mut self, func: SymId, args: &[Value]) -> Result<Value, String> {
        self.calls.push((func, args.to_vec()));
        self.results
            .pop_front()
            .unwrap_or_else(|| Err("StubEvaluator: no result queued".to_string()))
    }
}
