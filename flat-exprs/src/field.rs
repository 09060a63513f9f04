//! Interface to an exact number engine that represents values as elements
//! of dynamically extended fields, and the reduction rules for `Exp` built
//! on top of it.
//!
//! The engine itself lives outside this crate. It decides special-value
//! predicates (possibly only as [`Truth::Unknown`]) and registers
//! irreducible function applications as new field generators.

use crate::{Builtin, Expr};
use core::fmt;

/// Three-valued answer of a predicate the engine may be unable to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    #[inline]
    pub fn is_true(self) -> bool {
        self == Truth::True
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b { Truth::True } else { Truth::False }
    }
}

/// The special values a predicate can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialValue {
    PosInf,
    NegInf,
    Undefined,
    UnsignedInf,
    Zero,
}

impl fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpecialValue::PosInf => "+inf",
            SpecialValue::NegInf => "-inf",
            SpecialValue::Undefined => "undefined",
            SpecialValue::UnsignedInf => "uinf",
            SpecialValue::Zero => "0",
        })
    }
}

/// The operations this crate consumes from a field engine.
pub trait FieldContext {
    /// A handle to an element of one of the engine's fields.
    type Element;

    /// Decides whether `x` denotes the special value `v`.
    fn check(&self, x: &Expr, v: SpecialValue) -> Truth;

    /// Returns `true` if `x` is stored as a special value (an infinity,
    /// undefined or unknown) rather than as a field element.
    fn is_special(&self, x: &Expr) -> bool;

    /// Registers `f(x)` as a generator of a new field and returns the
    /// element it denotes.
    fn field_generator(&mut self, f: Builtin, x: &Expr) -> Self::Element;
}

/// Result of a reduction: a known constant or special value, or a field
/// element produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<E> {
    Zero,
    One,
    PosInf,
    Undefined,
    Unknown,
    Element(E),
}

/// Reduces `Exp(x)`.
///
/// Special inputs map as `exp(+inf) = +inf`, `exp(-inf) = 0`, and
/// `exp(undefined) = exp(uinf) = undefined`; any other special input gives
/// [`Value::Unknown`]. A provable zero gives one. Anything else becomes a
/// new generator `Exp(x)`.
pub fn exp<C: FieldContext>(ctx: &mut C, x: &Expr) -> Value<C::Element> {
    if ctx.is_special(x) {
        let is = |v| ctx.check(x, v).is_true();
        let value = if is(SpecialValue::PosInf) {
            Value::PosInf
        } else if is(SpecialValue::NegInf) {
            Value::Zero
        } else if is(SpecialValue::Undefined) || is(SpecialValue::UnsignedInf) {
            Value::Undefined
        } else {
            Value::Unknown
        };
        log::trace!("exp of special value {}", x);
        return value;
    }
    if ctx.check(x, SpecialValue::Zero).is_true() {
        return Value::One;
    }
    Value::Element(ctx.field_generator(Builtin::Exp, x))
}
