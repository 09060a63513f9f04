//! Defines [`ExprView`], a borrowed, zero-copy alias of an encoded node,
//! and [`Node`], its decoded form.
//!
//! A view borrows the buffer of an owning [`Expr`]. The borrow checker
//! guarantees that the owner is neither mutated, regrown, swapped nor dropped
//! while the view is alive, so a view can never observe a reallocated buffer.

use crate::word::{
    ExprType, HEADER_SIZE, WORD_BYTES, Word, read_bytes, size_of_header, small_int_value,
    unpack_small, words_for_bytes,
};
use crate::{Builtin, Expr, ExprError};
use core::fmt;
use core::hash::{Hash, Hasher};
use dashu::integer::{IBig, UBig};
use smartstring::alias::String;
use std::cmp::Ordering;

/// A read-only alias of one encoded node inside someone else's buffer.
///
/// The view remembers the rest of the buffer after the node so that it can
/// step to the next sibling (see [`ExprView::next_sibling`]). Views are
/// `Copy`; they never allocate and are never freed.
#[derive(Clone, Copy)]
pub struct ExprView<'a> {
    /// Words from the start of the node to the end of the owning buffer.
    region: &'a [Word],
}

/// The decoded form of a node.
///
/// Obtained through [`ExprView::node`]. Integer and name payloads are
/// decoded eagerly; call arguments stay as views.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    /// An integer of any size.
    Integer(IBig),
    /// A symbol, builtin or user defined.
    Symbol(String),
    /// A string literal.
    String(String),
    /// A call of a function on its arguments.
    Call(ExprView<'a>, Args<'a>),
}

/// Iterator over the arguments of a call, walking sibling sizes.
#[derive(Debug, Clone)]
pub struct Args<'a> {
    next: Option<ExprView<'a>>,
    remaining: usize,
}

/// Anything that can lend an [`ExprView`] of itself.
///
/// Implemented for [`Expr`], [`ExprView`] and references to them, so that
/// constructors accept owned expressions and views interchangeably.
pub trait AsView {
    fn as_view(&self) -> ExprView<'_>;
}

impl AsView for Expr {
    #[inline]
    fn as_view(&self) -> ExprView<'_> {
        self.view()
    }
}

impl AsView for ExprView<'_> {
    #[inline]
    fn as_view(&self) -> ExprView<'_> {
        *self
    }
}

impl<T: AsView + ?Sized> AsView for &T {
    #[inline]
    fn as_view(&self) -> ExprView<'_> {
        (**self).as_view()
    }
}

impl<'a> ExprView<'a> {
    /// Creates a view of the node starting at `region[0]`.
    ///
    /// `region` must start at a node boundary of a well-formed buffer.
    #[inline]
    pub(crate) fn new(region: &'a [Word]) -> Self {
        debug_assert!(!region.is_empty());
        debug_assert!(size_of_header(region[0]) <= region.len());
        Self { region }
    }

    /// Creates a view at `offset` words into `self`'s region.
    #[inline]
    fn at(&self, offset: usize) -> ExprView<'a> {
        ExprView::new(&self.region[offset..])
    }

    /// The header word.
    #[inline]
    pub fn header(&self) -> Word {
        self.region[0]
    }

    /// The type tag of the node.
    #[inline]
    pub fn expr_type(&self) -> ExprType {
        ExprType::from_header(self.header())
    }

    /// Size of the node in words, derived from its header alone.
    #[inline]
    pub fn size(&self) -> usize {
        size_of_header(self.header())
    }

    /// The words of this node, exactly [`ExprView::size`] of them.
    #[inline]
    pub fn words(&self) -> &'a [Word] {
        &self.region[..self.size()]
    }

    /// Copies the node into a fresh owning expression.
    #[inline]
    pub fn to_expr(&self) -> Expr {
        Expr::from_words(self.words())
    }

    /// Returns the view of the node that immediately follows this one in the
    /// owning buffer, or `None` at the end of the buffer.
    #[inline]
    pub fn next_sibling(&self) -> Option<ExprView<'a>> {
        let size = self.size();
        (size < self.region.len()).then(|| self.at(size))
    }

    /// Re-points this view past its own node. Returns `false`, leaving the
    /// view unchanged, when no node follows.
    #[inline]
    pub fn advance(&mut self) -> bool {
        match self.next_sibling() {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the node is an atom.
    #[inline]
    pub fn is_atom(&self) -> bool {
        self.expr_type().is_atom()
    }

    /// Returns `true` if the node is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.expr_type().is_call()
    }

    /// Returns `true` if the node is an integer of any size.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(
            self.expr_type(),
            ExprType::SmallInt | ExprType::BigIntPos | ExprType::BigIntNeg
        )
    }

    /// Returns `true` if the node is a small (inline) integer.
    #[inline]
    pub fn is_small_int(&self) -> bool {
        self.expr_type() == ExprType::SmallInt
    }

    /// Returns `true` if the node is a symbol.
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self.expr_type(), ExprType::SmallSymbol | ExprType::BigSymbol)
    }

    /// Returns `true` if the node is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self.expr_type(), ExprType::SmallString | ExprType::BigString)
    }

    /// Returns `true` if the node is the integer zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.header() == 0
    }

    /// Returns a string describing the kind of this node.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        self.expr_type().kind_name()
    }

    /// Number of arguments: `-1` for atoms, `0..=4` for the fixed-arity
    /// calls, the explicit arity word for variable-arity calls.
    #[inline]
    pub fn arity(&self) -> isize {
        match self.expr_type() {
            ExprType::CallN => self.region[1] as isize,
            t if t.is_call() => (t as isize) - (ExprType::Call0 as isize),
            _ => -1,
        }
    }

    /// Number of arguments of a call, or an error for atoms.
    #[inline]
    pub fn nargs(&self) -> Result<usize, ExprError> {
        usize::try_from(self.arity()).map_err(|_| ExprError::NotACall {
            found: self.kind_name(),
        })
    }

    /// The function of a call, as a view.
    #[inline]
    pub fn func(&self) -> Result<ExprView<'a>, ExprError> {
        let t = self.expr_type();
        if t.is_atom() {
            return Err(ExprError::NotACall {
                found: t.kind_name(),
            });
        }
        Ok(self.at(t.call_prefix()))
    }

    /// The `i`-th argument of a call, as a view, found by skipping the
    /// function and the first `i` arguments.
    pub fn arg(&self, i: usize) -> Result<ExprView<'a>, ExprError> {
        let len = self.nargs()?;
        if i >= len {
            return Err(ExprError::IndexOutOfRange { index: i, len });
        }
        self.args()
            .nth(i)
            .ok_or(ExprError::IndexOutOfRange { index: i, len })
    }

    /// Iterator over the arguments. Empty for atoms.
    #[inline]
    pub fn args(&self) -> Args<'a> {
        match self.func() {
            Ok(func) => {
                let remaining = self.arity() as usize;
                Args {
                    next: if remaining > 0 { func.next_sibling() } else { None },
                    remaining,
                }
            }
            Err(_) => Args {
                next: None,
                remaining: 0,
            },
        }
    }

    /// Returns the builtin this node denotes, if it is a builtin symbol.
    #[inline]
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_header(self.header())
    }

    /// Returns `true` if the node is the symbol of builtin `b`.
    #[inline]
    pub fn is_builtin(&self, b: Builtin) -> bool {
        self.header() == b.header()
    }

    /// Returns the builtin at the head of a call, if any.
    #[inline]
    pub fn head_builtin(&self) -> Option<Builtin> {
        self.func().ok().and_then(|f| f.builtin())
    }

    /// Returns `true` if the node is a call whose function is builtin `b`.
    #[inline]
    pub fn is_builtin_call(&self, b: Builtin) -> bool {
        self.func().is_ok_and(|f| f.is_builtin(b))
    }

    /// Returns `true` if the node is a call of [`Builtin::Pow`].
    #[inline]
    pub fn is_pow(&self) -> bool {
        self.is_builtin_call(Builtin::Pow)
    }

    /// Returns the value if the node is an integer.
    pub fn to_integer(&self) -> Option<IBig> {
        match self.expr_type() {
            ExprType::SmallInt => Some(IBig::from(small_int_value(self.header()) as i64)),
            t @ (ExprType::BigIntPos | ExprType::BigIntNeg) => {
                let limbs = &self.words()[HEADER_SIZE..];
                let bytes = read_bytes(limbs, limbs.len() * WORD_BYTES);
                let mag = IBig::from(UBig::from_le_bytes(&bytes));
                Some(if t == ExprType::BigIntNeg { -mag } else { mag })
            }
            _ => None,
        }
    }

    /// Returns the value if the node is an integer that fits in `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        match self.expr_type() {
            ExprType::SmallInt => Some(small_int_value(self.header()) as i64),
            _ => self.to_integer().and_then(|v| i64::try_from(v).ok()),
        }
    }

    /// Returns the name if the node is a symbol.
    pub fn symbol_name(&self) -> Option<String> {
        match self.expr_type() {
            ExprType::SmallSymbol => Some(match self.builtin() {
                Some(b) => b.name().into(),
                None => self.small_text(),
            }),
            ExprType::BigSymbol => Some(self.big_text()),
            _ => None,
        }
    }

    /// Returns the value if the node is a string.
    pub fn string_value(&self) -> Option<String> {
        match self.expr_type() {
            ExprType::SmallString => Some(self.small_text()),
            ExprType::BigString => Some(self.big_text()),
            _ => None,
        }
    }

    fn small_text(&self) -> String {
        let (buf, len) = unpack_small(self.header());
        core::str::from_utf8(&buf[..len])
            .unwrap_or("<invalid utf8>")
            .into()
    }

    fn big_text(&self) -> String {
        let words = self.words();
        let bytes = read_bytes(&words[HEADER_SIZE + 1..], words[HEADER_SIZE]);
        core::str::from_utf8(&bytes)
            .unwrap_or("<invalid utf8>")
            .into()
    }

    /// Decodes the node into a [`Node`].
    pub fn node(&self) -> Node<'a> {
        match self.expr_type() {
            ExprType::SmallInt | ExprType::BigIntPos | ExprType::BigIntNeg => {
                Node::Integer(self.to_integer().unwrap_or_default())
            }
            ExprType::SmallSymbol | ExprType::BigSymbol => {
                Node::Symbol(self.symbol_name().unwrap_or_default())
            }
            ExprType::SmallString | ExprType::BigString => {
                Node::String(self.string_value().unwrap_or_default())
            }
            t => Node::Call(self.at(t.call_prefix()), self.args()),
        }
    }

    /// Representation-level total order: by type tag, then by encoded size,
    /// then lexicographically by raw words.
    ///
    /// This is not a mathematical order. It is consistent with equality and
    /// exists to give sets of sub-expressions a deterministic order.
    #[inline]
    pub fn cmp_fast(&self, other: &ExprView<'_>) -> Ordering {
        self.expr_type()
            .cmp(&other.expr_type())
            .then_with(|| self.size().cmp(&other.size()))
            .then_with(|| self.words().cmp(other.words()))
    }

    /// Checks the size invariant of this node and all of its descendants:
    /// a call's size is its prefix plus the sizes of its children.
    pub fn check_sizes(&self) -> bool {
        let t = self.expr_type();
        match t {
            ExprType::SmallInt | ExprType::SmallSymbol | ExprType::SmallString => true,
            ExprType::BigIntPos | ExprType::BigIntNeg => self.size() > HEADER_SIZE,
            ExprType::BigSymbol | ExprType::BigString => {
                let words = self.words();
                words.len() > HEADER_SIZE
                    && words.len()
                        == HEADER_SIZE + 1 + words_for_bytes(words[HEADER_SIZE])
            }
            _ => {
                let Ok(func) = self.func() else { return false };
                let mut total = t.call_prefix() + func.size();
                for arg in self.args() {
                    if !arg.check_sizes() {
                        return false;
                    }
                    total += arg.size();
                }
                func.check_sizes() && total == self.size()
            }
        }
    }
}

impl<'a> Iterator for Args<'a> {
    type Item = ExprView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.next?;
        self.remaining -= 1;
        self.next = if self.remaining > 0 {
            cur.next_sibling()
        } else {
            None
        };
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Args<'_> {}

/// Two nodes are equal iff their encodings are word-for-word identical.
/// Headers are compared first as a cheap reject.
impl PartialEq for ExprView<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.header() == other.header() && self.words() == other.words()
    }
}

impl Eq for ExprView<'_> {}

impl Hash for ExprView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words().hash(state);
    }
}

impl PartialOrd for ExprView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExprView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_fast(other)
    }
}

impl fmt::Debug for ExprView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExprView")
            .field(&format_args!("{}", self))
            .finish()
    }
}
