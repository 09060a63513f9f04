//! Registry of builtin symbols.
//!
//! Builtins are operators and constants with a reserved dense id. A builtin
//! symbol is encoded as a single small-symbol header carrying the id instead
//! of the name bytes, so `Add` or `Pi` never needs name storage.
//!
//! [`Builtin::STRS`] is sorted alphabetically and [`lookup_builtin`] performs
//! a binary search over it; the ordering is checked at compile time.

use crate::word::{BUILTIN_SHIFT, ExprType, TYPE_MASK, Word};
use crate::ExprError;
use core::fmt;
use std::str::FromStr;

/// Header bits between the tag and the id; all zero in a builtin.
const BUILTIN_MARK: Word = ((1 << BUILTIN_SHIFT) - 1) & !TYPE_MASK;

/// A builtin operator or constant.
///
/// Variants are declared in the same (alphabetical) order as
/// [`Builtin::STRS`]; the discriminant is the id embedded in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Builtin {
    Abs,
    Acos,
    Acosh,
    Add,
    AiryAi,
    AiryBi,
    Arg,
    Asin,
    Asinh,
    Atan,
    Atanh,
    BesselI,
    BesselJ,
    BesselK,
    BesselY,
    Ceil,
    Conjugate,
    Cos,
    Cosh,
    Div,
    Erf,
    Erfc,
    Erfi,
    Euler,
    Exp,
    Floor,
    Gamma,
    HurwitzZeta,
    I,
    Im,
    JacobiTheta,
    LambertW,
    Log,
    LogGamma,
    Mul,
    Neg,
    Pi,
    Pos,
    Pow,
    Psi,
    Re,
    RiemannZeta,
    Root,
    RootOfUnity,
    Sign,
    Sin,
    Sinh,
    Sqrt,
    Sub,
    Tan,
    Tanh,
}

impl Builtin {
    /// The total number of builtins.
    pub const COUNT: usize = 51;

    /// Canonical names, sorted alphabetically, indexed by id.
    pub const STRS: &[&str] = &[
        "Abs",
        "Acos",
        "Acosh",
        "Add",
        "AiryAi",
        "AiryBi",
        "Arg",
        "Asin",
        "Asinh",
        "Atan",
        "Atanh",
        "BesselI",
        "BesselJ",
        "BesselK",
        "BesselY",
        "Ceil",
        "Conjugate",
        "Cos",
        "Cosh",
        "Div",
        "Erf",
        "Erfc",
        "Erfi",
        "Euler",
        "Exp",
        "Floor",
        "Gamma",
        "HurwitzZeta",
        "I",
        "Im",
        "JacobiTheta",
        "LambertW",
        "Log",
        "LogGamma",
        "Mul",
        "Neg",
        "Pi",
        "Pos",
        "Pow",
        "Psi",
        "Re",
        "RiemannZeta",
        "Root",
        "RootOfUnity",
        "Sign",
        "Sin",
        "Sinh",
        "Sqrt",
        "Sub",
        "Tan",
        "Tanh",
    ];

    const ALL: [Builtin; Self::COUNT] = [
        Builtin::Abs,
        Builtin::Acos,
        Builtin::Acosh,
        Builtin::Add,
        Builtin::AiryAi,
        Builtin::AiryBi,
        Builtin::Arg,
        Builtin::Asin,
        Builtin::Asinh,
        Builtin::Atan,
        Builtin::Atanh,
        Builtin::BesselI,
        Builtin::BesselJ,
        Builtin::BesselK,
        Builtin::BesselY,
        Builtin::Ceil,
        Builtin::Conjugate,
        Builtin::Cos,
        Builtin::Cosh,
        Builtin::Div,
        Builtin::Erf,
        Builtin::Erfc,
        Builtin::Erfi,
        Builtin::Euler,
        Builtin::Exp,
        Builtin::Floor,
        Builtin::Gamma,
        Builtin::HurwitzZeta,
        Builtin::I,
        Builtin::Im,
        Builtin::JacobiTheta,
        Builtin::LambertW,
        Builtin::Log,
        Builtin::LogGamma,
        Builtin::Mul,
        Builtin::Neg,
        Builtin::Pi,
        Builtin::Pos,
        Builtin::Pow,
        Builtin::Psi,
        Builtin::Re,
        Builtin::RiemannZeta,
        Builtin::Root,
        Builtin::RootOfUnity,
        Builtin::Sign,
        Builtin::Sin,
        Builtin::Sinh,
        Builtin::Sqrt,
        Builtin::Sub,
        Builtin::Tan,
        Builtin::Tanh,
    ];

    /// The six operators understood by the normal-form bridge.
    pub const ARITHMETIC: [Builtin; 6] = [
        Builtin::Neg,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Pow,
    ];

    /// Dense id of this builtin.
    #[inline]
    pub const fn id(self) -> usize {
        self as usize
    }

    /// Returns the builtin with the given id.
    #[inline]
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// Canonical name of this builtin.
    #[inline]
    pub fn name(self) -> &'static str {
        Self::STRS[self.id()]
    }

    /// The one-word encoding of this builtin as a symbol atom.
    #[inline]
    pub const fn header(self) -> Word {
        (ExprType::SmallSymbol as Word) | ((self as Word) << BUILTIN_SHIFT)
    }

    /// Recovers a builtin from a symbol header, if it carries one.
    ///
    /// A builtin header has a zero name byte in position 1, which an inline
    /// name can never have.
    #[inline]
    pub(crate) fn from_header(head: Word) -> Option<Self> {
        if ExprType::from_header(head) != ExprType::SmallSymbol || head & BUILTIN_MARK != 0 {
            return None;
        }
        Self::from_id(head >> BUILTIN_SHIFT)
    }

    /// Returns `true` for the operators recognised by the normal-form bridge.
    #[inline]
    pub fn is_arithmetic(self) -> bool {
        Self::ARITHMETIC.contains(&self)
    }
}

/// Looks up a builtin by name with a binary search over [`Builtin::STRS`].
pub fn lookup_builtin(name: &str) -> Option<Builtin> {
    Builtin::STRS
        .binary_search(&name)
        .ok()
        .and_then(Builtin::from_id)
}

const fn str_less(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
        i += 1;
    }
    a.len() < b.len()
}

const fn strs_sorted(strs: &[&str]) -> bool {
    let mut i = 1;
    while i < strs.len() {
        if !str_less(strs[i - 1], strs[i]) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(strs_sorted(Builtin::STRS), "builtin names must be sorted");
const _: () = assert!(Builtin::STRS.len() == Builtin::COUNT);

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Builtin {
    type Err = ExprError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_builtin(s).ok_or_else(|| ExprError::UnknownBuiltin(s.into()))
    }
}

impl TryFrom<&str> for Builtin {
    type Error = ExprError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
