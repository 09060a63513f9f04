//! Defines [`ExprError`], the unified error type for expression operations.
//!
//! Structural accessors report bad indices and call access on atoms; the
//! normal-form bridge reports sub-expressions that have no rational-function
//! form. Broken encoding invariants are not errors: they panic.

use crate::Expr;
use smartstring::alias::String;
use thiserror::Error;

/// Represents all recoverable errors produced by this crate.
///
/// Normal-form failures carry the offending sub-expression (as an owned
/// copy) so that callers can fall back to an unevaluated representation.
#[derive(Debug, Clone, Error)]
pub enum ExprError {
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Expected a call, found {found}")]
    NotACall { found: &'static str },

    #[error("Unknown builtin symbol {0:?}")]
    UnknownBuiltin(String),

    #[error("Unrecognized sub-expression {0}")]
    UnrecognizedSubexpression(Expr),

    #[error("Exponent is not an integer in {0}")]
    NonRationalExponent(Expr),

    #[error("Exponent too large in {0}")]
    ExponentTooLarge(Expr),

    #[error("Division by zero in {0}")]
    DivisionByZero(Expr),
}
