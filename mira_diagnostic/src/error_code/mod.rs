//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the compiler phase. Used for `--explain` lookups and documentation.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Type errors
/// - E3xxx: Pattern errors
/// - E4xxx: ARC analysis errors
/// - E5xxx: Codegen / LLVM errors
/// - E6xxx: Runtime / eval errors
/// - E7xxx: Symbol resolution / declaration pipeline errors
/// - E8xxx: Template expansion / overload matching errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated character literal
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated template literal
    E0006,
    /// Semicolon (cross-language habit)
    E0007,
    /// Triple-equals (cross-language habit)
    E0008,
    /// Single-quote string (cross-language habit)
    E0009,
    /// Increment/decrement operator (cross-language habit)
    E0010,
    /// Unicode confusable character
    E0011,
    /// Detached doc comment (warning)
    E0012,
    /// Standalone backslash
    E0013,
    /// Decimal not representable as whole base units
    E0014,
    /// Reserved-future keyword used as identifier
    E0015,
    /// Floating-point duration/size literal not supported
    E0911,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Invalid function definition
    E1006,
    /// Missing function body
    E1007,
    /// Invalid pattern syntax
    E1008,
    /// Missing pattern argument
    E1009,
    /// Unknown pattern argument
    E1010,
    /// Multi-arg function call requires named arguments
    E1011,
    /// Invalid `function_seq` syntax
    E1012,
    /// `function_exp` requires named properties
    E1013,
    /// Reserved built-in function name
    E1014,
    /// Unsupported keyword (e.g., `return` is not valid in Mira)
    E1015,

    // Type Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type
    E2002,
    /// Unknown identifier
    E2003,
    /// Argument count mismatch
    E2004,
    /// Cannot infer type
    E2005,
    /// Duplicate definition
    E2006,
    /// Closure self-reference (closure cannot capture itself)
    E2007,
    /// Cyclic type definition
    E2008,
    /// Missing trait bound
    E2009,
    /// Coherence violation (conflicting implementations)
    E2010,
    /// Named arguments required
    E2011,
    /// Unknown capability (uses clause references non-existent trait)
    E2012,
    /// Provider does not implement capability trait
    E2013,
    /// Missing capability declaration (function uses capability without declaring it)
    E2014,
    /// Type parameter ordering violation (non-default after default)
    E2015,
    /// Missing type argument (no default available)
    E2016,
    /// Too many type arguments
    E2017,
    /// Missing associated type (impl missing required associated type)
    E2018,
    /// Never type used as struct field (uninhabited struct)
    E2019,
    /// Unsupported operator (type does not implement operator trait)
    E2020,
    /// Overlapping implementations with equal specificity
    E2021,
    /// Conflicting default methods from multiple super-traits
    E2022,
    /// Ambiguous method call (multiple traits provide same method)
    E2023,
    /// Incompatible types (assignment, return, or operand position)
    E2024,
    /// Expression is not addressable (e.g. `&(1 + 2)`)
    E2025,
    /// Expected a pointer type, found something else
    E2026,
    /// Expected an enum choice type, found something else
    E2027,
    /// Expected a trait type, found something else
    E2028,
    /// Invalid cast between incompatible types
    E2029,

    // Pattern Errors (E3xxx)
    /// Unknown pattern
    E3001,
    /// Invalid pattern arguments
    E3002,
    /// Pattern type error
    E3003,

    // ARC Analysis Errors (E4xxx)
    /// Unsupported expression in ARC IR lowering
    E4001,
    /// Unsupported pattern in ARC IR lowering
    E4002,
    /// ARC internal error (invariant violation)
    E4003,

    // Codegen / LLVM Errors (E5xxx)
    /// LLVM module verification failed (ICE)
    E5001,
    /// Optimization pipeline failed
    E5002,
    /// Object/assembly/bitcode emission failed
    E5003,
    /// Target not supported / target configuration failed
    E5004,
    /// Runtime library (`libori_rt.a`) not found
    E5005,
    /// Linker failed
    E5006,
    /// Debug info creation failed
    E5007,
    /// WASM-specific error
    E5008,
    /// Module target configuration failed
    E5009,

    // Runtime / Eval Errors (E6xxx)
    /// Division by zero
    E6001,
    /// Modulo by zero
    E6002,
    /// Integer overflow
    E6003,
    /// Size subtraction would be negative
    E6004,
    /// Size multiply by negative
    E6005,
    /// Size divide by negative
    E6006,
    /// Type mismatch
    E6010,
    /// Invalid binary operator for type
    E6011,
    /// Binary type mismatch
    E6012,
    /// Undefined variable
    E6020,
    /// Undefined function
    E6021,
    /// Undefined constant
    E6022,
    /// Undefined field
    E6023,
    /// Undefined method
    E6024,
    /// Index out of bounds
    E6025,
    /// Key not found
    E6026,
    /// Immutable binding
    E6027,
    /// Arity mismatch
    E6030,
    /// Stack overflow (recursion limit)
    E6031,
    /// Not callable
    E6032,
    /// Non-exhaustive match
    E6040,
    /// Assertion failed
    E6050,
    /// Panic called
    E6051,
    /// Missing capability
    E6060,
    /// Const-eval budget exceeded
    E6070,
    /// Not implemented feature
    E6080,
    /// Custom runtime error
    E6099,

    // Symbol Resolution / Declaration Pipeline Errors (E7xxx)
    /// Name did not resolve to any symbol
    E7001,
    /// Name resolved to more than one candidate with no disambiguation
    E7002,
    /// Expected a `distinct` type, found something else
    E7003,
    /// Symbol is not exported from its module
    E7004,
    /// A symbol with this name and parent already exists
    E7005,
    /// AST node kind has no resolution handling (syntax accepted, semantics absent)
    E7006,
    /// Unimplemented path reached -- always a compiler bug, not user syntax
    E7007,
    /// Static-initializer dependency cycle detected
    E7010,
    /// Declaration reserved but never resolved
    E7011,
    /// Required field missing from an initializer
    E7012,
    /// Host loader callback failed
    E7020,
    /// Host loader returned a type/value incompatible with the declared signature
    E7021,

    // Template Expansion / Overload Matching Errors (E8xxx)
    /// No candidate in an overload set accepted the supplied arguments
    E8001,
    /// A compile-time-only parameter received a runtime-only argument
    E8002,
    /// A `void`-returning function used where a value was required
    E8003,
    /// Template parameter name declared more than once
    E8010,
    /// Template parameter referenced but never declared in the signature
    E8011,
    /// Template invoked with the wrong number of arguments
    E8012,
    /// Template expansion recursed into its own in-progress variant
    E8013,
    /// The evaluator failed to materialize a compile-time function template
    E8014,
    /// A nested type-application pattern matched a type that did not
    /// originate from the required template
    E8015,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,

    // Parser Warnings (W1xxx)
    /// Detached doc comment
    W1001,
    /// Unknown calling convention in extern block
    W1002,

    // Type Checker Warnings (W2xxx)
    /// Infinite iterator consumed without bound (e.g., `repeat(x).collect()`)
    W2001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    /// When adding a new variant: add it to the enum, `as_str()`, and here.
    /// The `test_all_variants_classified` test catches any omission.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E0012,
        ErrorCode::E0013,
        ErrorCode::E0014,
        ErrorCode::E0015,
        ErrorCode::E0911,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E1015,
        // Type
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E2013,
        ErrorCode::E2014,
        ErrorCode::E2015,
        ErrorCode::E2016,
        ErrorCode::E2017,
        ErrorCode::E2018,
        ErrorCode::E2019,
        ErrorCode::E2020,
        ErrorCode::E2021,
        ErrorCode::E2022,
        ErrorCode::E2023,
        ErrorCode::E2024,
        ErrorCode::E2025,
        ErrorCode::E2026,
        ErrorCode::E2027,
        ErrorCode::E2028,
        ErrorCode::E2029,
        // Pattern
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        // ARC
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        // Codegen / LLVM
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E5003,
        ErrorCode::E5004,
        ErrorCode::E5005,
        ErrorCode::E5006,
        ErrorCode::E5007,
        ErrorCode::E5008,
        ErrorCode::E5009,
        // Runtime / Eval
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E6012,
        ErrorCode::E6020,
        ErrorCode::E6021,
        ErrorCode::E6022,
        ErrorCode::E6023,
        ErrorCode::E6024,
        ErrorCode::E6025,
        ErrorCode::E6026,
        ErrorCode::E6027,
        ErrorCode::E6030,
        ErrorCode::E6031,
        ErrorCode::E6032,
        ErrorCode::E6040,
        ErrorCode::E6050,
        ErrorCode::E6051,
        ErrorCode::E6060,
        ErrorCode::E6070,
        ErrorCode::E6080,
        ErrorCode::E6099,
        // Symbol resolution / declaration pipeline
        ErrorCode::E7001,
        ErrorCode::E7002,
        ErrorCode::E7003,
        ErrorCode::E7004,
        ErrorCode::E7005,
        ErrorCode::E7006,
        ErrorCode::E7007,
        ErrorCode::E7010,
        ErrorCode::E7011,
        ErrorCode::E7012,
        ErrorCode::E7020,
        ErrorCode::E7021,
        // Template expansion / overload matching
        ErrorCode::E8001,
        ErrorCode::E8002,
        ErrorCode::E8003,
        ErrorCode::E8010,
        ErrorCode::E8011,
        ErrorCode::E8012,
        ErrorCode::E8013,
        ErrorCode::E8014,
        ErrorCode::E8015,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
        // Warnings
        ErrorCode::W1001,
        ErrorCode::W1002,
        ErrorCode::W2001,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E0012 => "E0012",
            ErrorCode::E0013 => "E0013",
            ErrorCode::E0014 => "E0014",
            ErrorCode::E0015 => "E0015",
            ErrorCode::E0911 => "E0911",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E1015 => "E1015",
            // Type
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            ErrorCode::E2017 => "E2017",
            ErrorCode::E2018 => "E2018",
            ErrorCode::E2019 => "E2019",
            ErrorCode::E2020 => "E2020",
            ErrorCode::E2021 => "E2021",
            ErrorCode::E2022 => "E2022",
            ErrorCode::E2023 => "E2023",
            ErrorCode::E2024 => "E2024",
            ErrorCode::E2025 => "E2025",
            ErrorCode::E2026 => "E2026",
            ErrorCode::E2027 => "E2027",
            ErrorCode::E2028 => "E2028",
            ErrorCode::E2029 => "E2029",
            // Pattern
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            // ARC
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            // Codegen / LLVM
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E5004 => "E5004",
            ErrorCode::E5005 => "E5005",
            ErrorCode::E5006 => "E5006",
            ErrorCode::E5007 => "E5007",
            ErrorCode::E5008 => "E5008",
            ErrorCode::E5009 => "E5009",
            // Runtime / Eval
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6021 => "E6021",
            ErrorCode::E6022 => "E6022",
            ErrorCode::E6023 => "E6023",
            ErrorCode::E6024 => "E6024",
            ErrorCode::E6025 => "E6025",
            ErrorCode::E6026 => "E6026",
            ErrorCode::E6027 => "E6027",
            ErrorCode::E6030 => "E6030",
            ErrorCode::E6031 => "E6031",
            ErrorCode::E6032 => "E6032",
            ErrorCode::E6040 => "E6040",
            ErrorCode::E6050 => "E6050",
            ErrorCode::E6051 => "E6051",
            ErrorCode::E6060 => "E6060",
            ErrorCode::E6070 => "E6070",
            ErrorCode::E6080 => "E6080",
            ErrorCode::E6099 => "E6099",
            // Symbol resolution / declaration pipeline
            ErrorCode::E7001 => "E7001",
            ErrorCode::E7002 => "E7002",
            ErrorCode::E7003 => "E7003",
            ErrorCode::E7004 => "E7004",
            ErrorCode::E7005 => "E7005",
            ErrorCode::E7006 => "E7006",
            ErrorCode::E7007 => "E7007",
            ErrorCode::E7010 => "E7010",
            ErrorCode::E7011 => "E7011",
            ErrorCode::E7012 => "E7012",
            ErrorCode::E7020 => "E7020",
            ErrorCode::E7021 => "E7021",
            // Template expansion / overload matching
            ErrorCode::E8001 => "E8001",
            ErrorCode::E8002 => "E8002",
            ErrorCode::E8003 => "E8003",
            ErrorCode::E8010 => "E8010",
            ErrorCode::E8011 => "E8011",
            ErrorCode::E8012 => "E8012",
            ErrorCode::E8013 => "E8013",
            ErrorCode::E8014 => "E8014",
            ErrorCode::E8015 => "E8015",
            // Internal
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            // Warnings
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W2001 => "W2001",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001
                | ErrorCode::E0002
                | ErrorCode::E0003
                | ErrorCode::E0004
                | ErrorCode::E0005
                | ErrorCode::E0006
                | ErrorCode::E0007
                | ErrorCode::E0008
                | ErrorCode::E0009
                | ErrorCode::E0010
                | ErrorCode::E0011
                | ErrorCode::E0012
                | ErrorCode::E0013
                | ErrorCode::E0014
                | ErrorCode::E0015
                | ErrorCode::E0911
        )
    }

    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
                | ErrorCode::E1006
                | ErrorCode::E1007
                | ErrorCode::E1008
                | ErrorCode::E1009
                | ErrorCode::E1010
                | ErrorCode::E1011
                | ErrorCode::E1012
                | ErrorCode::E1013
                | ErrorCode::E1014
                | ErrorCode::E1015
        )
    }

    /// Check if this is a type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
                | ErrorCode::E2009
                | ErrorCode::E2010
                | ErrorCode::E2011
                | ErrorCode::E2012
                | ErrorCode::E2013
                | ErrorCode::E2014
                | ErrorCode::E2015
                | ErrorCode::E2016
                | ErrorCode::E2017
                | ErrorCode::E2018
                | ErrorCode::E2019
                | ErrorCode::E2020
                | ErrorCode::E2021
                | ErrorCode::E2022
                | ErrorCode::E2023
                | ErrorCode::E2024
                | ErrorCode::E2025
                | ErrorCode::E2026
                | ErrorCode::E2027
                | ErrorCode::E2028
                | ErrorCode::E2029
        )
    }

    /// Check if this is a pattern error (E3xxx range).
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003)
    }

    /// Check if this is an ARC analysis error (E4xxx range).
    pub fn is_arc_error(&self) -> bool {
        matches!(self, ErrorCode::E4001 | ErrorCode::E4002 | ErrorCode::E4003)
    }

    /// Check if this is a codegen/LLVM error (E5xxx range).
    pub fn is_codegen_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E5001
                | ErrorCode::E5002
                | ErrorCode::E5003
                | ErrorCode::E5004
                | ErrorCode::E5005
                | ErrorCode::E5006
                | ErrorCode::E5007
                | ErrorCode::E5008
                | ErrorCode::E5009
        )
    }

    /// Check if this is a runtime/eval error (E6xxx range).
    pub fn is_eval_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E6001
                | ErrorCode::E6002
                | ErrorCode::E6003
                | ErrorCode::E6004
                | ErrorCode::E6005
                | ErrorCode::E6006
                | ErrorCode::E6010
                | ErrorCode::E6011
                | ErrorCode::E6012
                | ErrorCode::E6020
                | ErrorCode::E6021
                | ErrorCode::E6022
                | ErrorCode::E6023
                | ErrorCode::E6024
                | ErrorCode::E6025
                | ErrorCode::E6026
                | ErrorCode::E6027
                | ErrorCode::E6030
                | ErrorCode::E6031
                | ErrorCode::E6032
                | ErrorCode::E6040
                | ErrorCode::E6050
                | ErrorCode::E6051
                | ErrorCode::E6060
                | ErrorCode::E6070
                | ErrorCode::E6080
                | ErrorCode::E6099
        )
    }

    /// Check if this is a symbol resolution / declaration pipeline error (E7xxx range).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E7001
                | ErrorCode::E7002
                | ErrorCode::E7003
                | ErrorCode::E7004
                | ErrorCode::E7005
                | ErrorCode::E7006
                | ErrorCode::E7007
                | ErrorCode::E7010
                | ErrorCode::E7011
                | ErrorCode::E7012
                | ErrorCode::E7020
                | ErrorCode::E7021
        )
    }

    /// Check if this is a template expansion / overload matching error (E8xxx range).
    pub fn is_generics_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E8001
                | ErrorCode::E8002
                | ErrorCode::E8003
                | ErrorCode::E8010
                | ErrorCode::E8011
                | ErrorCode::E8012
                | ErrorCode::E8013
                | ErrorCode::E8014
                | ErrorCode::E8015
        )
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W1001 | ErrorCode::W1002 | ErrorCode::W2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"W2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`],
/// so it is automatically exhaustive â€” no manual mirroring needed.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
