//! Defines the owning [`Expr`] type and its constructors.
//!
//! An `Expr` exclusively owns a growable word buffer holding exactly one
//! encoded node (see [`crate::word`] for the layout). Capacity only grows,
//! doubling when insufficient; copying an expression duplicates exactly its
//! encoded words into a fresh buffer.

use crate::view::{AsView, ExprView};
use crate::word::{
    COEFF_MAX, COEFF_MIN, ExprType, HEADER_SIZE, SMALL_SYMBOL_LEN, Word, header, pack_small,
    push_bytes, small_int_header, words_for_bytes,
};
use crate::{Builtin, ExprError, lookup_builtin};
use core::fmt;
use core::hash::{Hash, Hasher};
use dashu::base::UnsignedAbs;
use dashu::integer::IBig;
use dashu::rational::RBig;
use std::cmp::Ordering;

/// An owning, self-delimiting encoded expression.
///
/// Equality is word-for-word identity of the encodings, which is stricter
/// than mathematical equality. Ordering is [`ExprView::cmp_fast`].
///
/// Views obtained through [`Expr::view`] borrow the expression; anything that
/// may reallocate or replace the buffer (`set`, `set_call`, `swap`, drop)
/// needs `&mut self` and therefore cannot run while a view is alive.
#[derive(Clone)]
pub struct Expr {
    /// `data.len()` is always the encoded size of the node.
    data: Vec<Word>,
}

impl Default for Expr {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! forward_to_view {
    ($($(#[$meta:meta])* fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {$(
        $(#[$meta])*
        #[inline]
        pub fn $name(&self $(, $arg: $ty)*) -> $ret {
            self.view().$name($($arg),*)
        }
    )*};
}

impl Expr {
    /// Creates the integer zero.
    #[inline]
    pub fn new() -> Self {
        Self { data: vec![0] }
    }

    /// Alias of [`Expr::new`].
    #[inline]
    pub fn zero() -> Self {
        Self::new()
    }

    /// Copies a complete encoded node.
    #[inline]
    pub(crate) fn from_words(words: &[Word]) -> Self {
        Self {
            data: words.to_vec(),
        }
    }

    /// Borrows the expression as a view.
    #[inline]
    pub fn view(&self) -> ExprView<'_> {
        ExprView::new(&self.data)
    }

    /// Number of words the buffer can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Ensures room for at least `size` words. Grows to
    /// `max(size, 2 * capacity)` when the current capacity is insufficient
    /// and keeps the existing content.
    pub fn fit_size(&mut self, size: usize) {
        let alloc = self.data.capacity();
        if alloc < size {
            let target = size.max(2 * alloc);
            self.data.reserve_exact(target - self.data.len());
        }
    }

    /// Overwrites `self` with a copy of `src`, reusing the buffer.
    ///
    /// `src` cannot alias `self`: the shared borrow of the source and the
    /// exclusive borrow of the destination are mutually exclusive.
    pub fn set(&mut self, src: impl AsView) {
        let words = src.as_view().words();
        self.fit_size(words.len());
        self.data.clear();
        self.data.extend_from_slice(words);
    }

    /// Resets `self` to the integer zero, keeping the buffer.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.clear();
        self.data.push(0);
    }

    /// Exchanges the buffers of two expressions without copying.
    #[inline]
    pub fn swap(&mut self, other: &mut Expr) {
        core::mem::swap(&mut self.data, &mut other.data);
    }

    /// Creates an integer, inline when it lies in `[COEFF_MIN, COEFF_MAX]`.
    pub fn from_i64(value: i64) -> Self {
        match isize::try_from(value) {
            Ok(v) if (COEFF_MIN..=COEFF_MAX).contains(&v) => Self {
                data: vec![small_int_header(v)],
            },
            _ => Self::from_integer(&IBig::from(value)),
        }
    }

    /// Creates an integer of any size. Values outside the inline range are
    /// stored as a sign tag followed by little-endian magnitude limbs.
    pub fn from_integer(value: &IBig) -> Self {
        if let Ok(v) = i64::try_from(value.clone()) {
            if let Ok(v) = isize::try_from(v) {
                if (COEFF_MIN..=COEFF_MAX).contains(&v) {
                    return Self {
                        data: vec![small_int_header(v)],
                    };
                }
            }
        }
        let tag = if *value < IBig::ZERO {
            ExprType::BigIntNeg
        } else {
            ExprType::BigIntPos
        };
        let bytes = value.clone().unsigned_abs().to_le_bytes();
        let size = HEADER_SIZE + words_for_bytes(bytes.len());
        let mut data = Vec::with_capacity(size);
        data.push(header(tag, size));
        push_bytes(&mut data, &bytes);
        Self { data }
    }

    /// Creates a rational literal: an integer when the denominator is one,
    /// otherwise `Div(p, q)`.
    pub fn from_rational(value: &RBig) -> Self {
        let p = Self::from_integer(value.numerator());
        if value.denominator().is_one() {
            return p;
        }
        let q = Self::from_integer(&IBig::from(value.denominator().clone()));
        Self::div(&p, &q)
    }

    /// Creates a symbol. Builtin names use their one-word id form; other
    /// names of 1 to [`SMALL_SYMBOL_LEN`] bytes without NUL are stored
    /// inline; anything else is stored with an explicit byte length.
    pub fn symbol(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        match lookup_builtin(name) {
            Some(b) => Self::from(b),
            None => Self::text(ExprType::SmallSymbol, ExprType::BigSymbol, name),
        }
    }

    /// Creates a string literal, using the same inline rule as symbols.
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::text(ExprType::SmallString, ExprType::BigString, s.as_ref())
    }

    fn text(small: ExprType, big: ExprType, s: &str) -> Self {
        let bytes = s.as_bytes();
        if !bytes.is_empty() && bytes.len() <= SMALL_SYMBOL_LEN && !bytes.contains(&0) {
            return Self {
                data: vec![pack_small(small, bytes)],
            };
        }
        let size = HEADER_SIZE + 1 + words_for_bytes(bytes.len());
        let mut data = Vec::with_capacity(size);
        data.push(header(big, size));
        data.push(bytes.len());
        push_bytes(&mut data, bytes);
        Self { data }
    }

    /// Builds the call `func(args[0], ..., args[n-1])`.
    ///
    /// Selects `Call0..Call4` for up to four arguments and `CallN` with an
    /// explicit arity word otherwise.
    pub fn call<F: AsView, A: AsView>(func: F, args: &[A]) -> Self {
        let mut res = Self {
            data: Vec::new(),
        };
        res.set_call(func, args);
        res
    }

    /// Overwrites `self` with the call `func(args...)`, reusing the buffer.
    ///
    /// The total size is computed first, the buffer is sized once, then the
    /// function and each argument are copied in order. Sources are shared
    /// borrows and `self` is an exclusive one, so a source can never be the
    /// destination; to build a call from `self`, copy it first.
    pub fn set_call<F: AsView, A: AsView>(&mut self, func: F, args: &[A]) {
        let func = func.as_view();
        let tag = ExprType::call(args.len());
        let prefix = tag.call_prefix();
        let size = prefix
            + func.size()
            + args.iter().map(|a| a.as_view().size()).sum::<usize>();

        self.fit_size(size);
        self.data.clear();
        self.data.push(header(tag, size));
        if tag == ExprType::CallN {
            self.data.push(args.len());
        }
        self.data.extend_from_slice(func.words());
        for arg in args {
            self.data.extend_from_slice(arg.as_view().words());
        }
        debug_assert_eq!(self.data.len(), size);
    }

    /// A copy of the function of a call.
    #[inline]
    pub fn func(&self) -> Result<Expr, ExprError> {
        self.view().func().map(|f| f.to_expr())
    }

    /// A view of the function of a call.
    #[inline]
    pub fn view_func(&self) -> Result<ExprView<'_>, ExprError> {
        self.view().func()
    }

    /// A copy of the `i`-th argument of a call.
    #[inline]
    pub fn arg(&self, i: usize) -> Result<Expr, ExprError> {
        self.view().arg(i).map(|a| a.to_expr())
    }

    /// A view of the `i`-th argument of a call.
    #[inline]
    pub fn view_arg(&self, i: usize) -> Result<ExprView<'_>, ExprError> {
        self.view().arg(i)
    }

    forward_to_view! {
        /// Type tag of the root node.
        fn expr_type(&self) -> ExprType;
        /// Encoded size in words.
        fn size(&self) -> usize;
        /// Argument count, `-1` for atoms.
        fn arity(&self) -> isize;
        /// Returns `true` if the root is an atom.
        fn is_atom(&self) -> bool;
        /// Returns `true` if the root is a call.
        fn is_call(&self) -> bool;
        /// Returns `true` if the root is an integer.
        fn is_integer(&self) -> bool;
        /// Returns `true` if the root is a symbol.
        fn is_symbol(&self) -> bool;
        /// Returns `true` if the root is a string.
        fn is_string(&self) -> bool;
        /// Returns `true` if the expression is the integer zero.
        fn is_zero(&self) -> bool;
        /// Returns a string describing the kind of the root node.
        fn kind_name(&self) -> &'static str;
        /// The integer value, if the root is an integer.
        fn to_integer(&self) -> Option<IBig>;
        /// The value, if the root is an integer that fits in `i64`.
        fn to_i64(&self) -> Option<i64>;
        /// The name, if the root is a symbol.
        fn symbol_name(&self) -> Option<smartstring::alias::String>;
        /// The value, if the root is a string.
        fn string_value(&self) -> Option<smartstring::alias::String>;
        /// The builtin denoted by the root symbol, if any.
        fn builtin(&self) -> Option<Builtin>;
        /// The builtin at the head of the root call, if any.
        fn head_builtin(&self) -> Option<Builtin>;
        /// Returns `true` if the root is a call of `b`.
        fn is_builtin_call(&self, b: Builtin) -> bool;
        /// Returns `true` if the root is a call of `Pow`.
        fn is_pow(&self) -> bool;
        /// Re-checks the size invariant of every node.
        fn check_sizes(&self) -> bool;
    }

    /// Representation-level total order; see [`ExprView::cmp_fast`].
    #[inline]
    pub fn cmp_fast(&self, other: &Expr) -> Ordering {
        self.view().cmp_fast(&other.view())
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_fast(other)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr")
            .field(&format_args!("{}", self.view()))
            .finish()
    }
}

impl From<ExprView<'_>> for Expr {
    #[inline]
    fn from(view: ExprView<'_>) -> Self {
        view.to_expr()
    }
}

impl From<Builtin> for Expr {
    #[inline]
    fn from(b: Builtin) -> Self {
        Self {
            data: vec![b.header()],
        }
    }
}

impl From<&IBig> for Expr {
    #[inline]
    fn from(v: &IBig) -> Self {
        Self::from_integer(v)
    }
}

impl From<IBig> for Expr {
    #[inline]
    fn from(v: IBig) -> Self {
        Self::from_integer(&v)
    }
}

macro_rules! impl_from_integers_for_expr {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Expr {
            #[inline]
            fn from(v: $t) -> Self { Expr::from_i64(v as i64) }
        }
    )*};
}
impl_from_integers_for_expr!(i8, i16, i32, i64, u8, u16, u32);
