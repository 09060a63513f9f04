//! Defines [`ExprVec`], a growable owning sequence of expressions.
//!
//! Slots beyond the logical length stay allocated so that regrowth can reuse
//! their buffers, but they always hold the integer zero: shrinking clears
//! them before truncating.

use crate::view::AsView;
use crate::{Expr, ExprError};
use core::fmt;
use core::ops::Index;

/// An insertion-ordered, owning vector of expressions.
///
/// Used as the variable dictionary of the normal-form bridge and as a
/// general container. Equality compares the logical prefix only.
#[derive(Clone, Default)]
pub struct ExprVec {
    /// Allocated slots. `entries[len..]` are all zero.
    entries: Vec<Expr>,
    len: usize,
}

impl ExprVec {
    /// Creates an empty vector.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty vector with `n` pre-allocated slots.
    pub fn with_capacity(n: usize) -> Self {
        let mut v = Self::new();
        v.fit_length(n);
        v
    }

    /// Logical length.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Ensures at least `n` allocated slots, doubling the slot count when
    /// insufficient. New slots hold zero.
    pub fn fit_length(&mut self, n: usize) {
        let alloc = self.entries.len();
        if n > alloc {
            let target = n.max(2 * alloc);
            self.entries.resize_with(target, Expr::new);
        }
    }

    /// Sets the logical length. Growing pads with zero; shrinking resets the
    /// released entries to zero before truncating.
    pub fn set_length(&mut self, n: usize) {
        self.fit_length(n);
        for e in &mut self.entries[n..self.len.max(n)] {
            e.set_zero();
        }
        self.len = n;
    }

    /// Appends a deep copy of `e`.
    pub fn append(&mut self, e: impl AsView) {
        self.fit_length(self.len + 1);
        self.entries[self.len].set(e);
        self.len += 1;
    }

    /// Returns the index of an entry structurally equal to `e`, appending a
    /// copy first when there is none. Linear in the length.
    pub fn insert_unique(&mut self, e: impl AsView) -> usize {
        let v = e.as_view();
        match self.iter().position(|x| x.view() == v) {
            Some(i) => i,
            None => {
                self.append(v);
                self.len - 1
            }
        }
    }

    /// Sorts the entries by [`Expr::cmp_fast`]. The sort is stable.
    pub fn sort_fast(&mut self) {
        self.entries[..self.len].sort_by(Expr::cmp_fast);
    }

    /// Exchanges the storage of two vectors.
    #[inline]
    pub fn swap(&mut self, other: &mut ExprVec) {
        core::mem::swap(self, other);
    }

    /// Overwrites `self` with deep copies of the entries of `src`.
    pub fn set_from(&mut self, src: &ExprVec) {
        self.set_length(src.len);
        for (dst, e) in self.entries.iter_mut().zip(src.iter()) {
            dst.set(e);
        }
    }

    /// The entry at `i`, if within the logical length.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&Expr> {
        self.as_slice().get(i)
    }

    /// The entry at `i`, or [`ExprError::IndexOutOfRange`].
    pub fn entry(&self, i: usize) -> Result<&Expr, ExprError> {
        self.get(i).ok_or(ExprError::IndexOutOfRange {
            index: i,
            len: self.len,
        })
    }

    /// Mutable access to the entry at `i`.
    pub fn entry_mut(&mut self, i: usize) -> Result<&mut Expr, ExprError> {
        let len = self.len;
        self.entries[..len]
            .get_mut(i)
            .ok_or(ExprError::IndexOutOfRange { index: i, len })
    }

    /// The entries within the logical length.
    #[inline]
    pub fn as_slice(&self) -> &[Expr] {
        &self.entries[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Expr> {
        self.as_slice().iter()
    }
}

impl Index<usize> for ExprVec {
    type Output = Expr;

    fn index(&self, i: usize) -> &Expr {
        &self.as_slice()[i]
    }
}

impl PartialEq for ExprVec {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ExprVec {}

impl fmt::Debug for ExprVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ExprVec {
    type Item = &'a Expr;
    type IntoIter = core::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: AsView> FromIterator<A> for ExprVec {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut v = ExprVec::new();
        for e in iter {
            v.append(e);
        }
        v
    }
}

impl<A: AsView> Extend<A> for ExprVec {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for e in iter {
            self.append(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> ExprVec {
        names.iter().map(Expr::symbol).collect()
    }

    #[test]
    fn append_copies() {
        let mut v = ExprVec::new();
        let mut x = Expr::symbol("x");
        v.append(&x);
        x.set(Expr::from(1));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0], Expr::symbol("x"));
    }

    #[test]
    fn insert_unique_deduplicates() {
        let mut v = ExprVec::new();
        let f = Expr::symbol("f");
        let a = Expr::call(&f, &[Expr::from(1)]);
        let b = Expr::call(&f, &[Expr::from(1)]);
        assert_eq!(v.insert_unique(&a), 0);
        assert_eq!(v.insert_unique(&b), 0);
        assert_eq!(v.len(), 1);
        assert_eq!(v.insert_unique(Expr::symbol("y")), 1);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn shrink_clears_tail() {
        let mut v = syms(&["a", "b", "c"]);
        let cap = v.capacity();
        v.set_length(1);
        assert_eq!(v.len(), 1);
        assert_eq!(v.capacity(), cap);
        assert!(v.entries[1..].iter().all(Expr::is_zero));
        v.set_length(3);
        assert!(v[1].is_zero());
        assert!(v[2].is_zero());
        assert_eq!(v[0], Expr::symbol("a"));
    }

    #[test]
    fn growth_doubles_slots() {
        let mut v = ExprVec::with_capacity(4);
        assert_eq!(v.capacity(), 4);
        v.fit_length(5);
        assert_eq!(v.capacity(), 8);
        v.fit_length(20);
        assert_eq!(v.capacity(), 20);
        assert!(v.is_empty());
    }

    #[test]
    fn sort_fast_orders_by_representation() {
        let mut v = ExprVec::new();
        v.append(Expr::symbol("a_long_symbol_name"));
        v.append(Expr::symbol("b"));
        v.append(Expr::from(3));
        v.sort_fast();
        assert_eq!(v[0], Expr::from(3));
        assert_eq!(v[1], Expr::symbol("b"));
        let once = v.clone();
        v.sort_fast();
        assert_eq!(v, once);
    }

    #[test]
    fn swap_and_set_from() {
        let mut a = syms(&["x"]);
        let mut b = syms(&["y", "z"]);
        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(b[0], Expr::symbol("x"));

        let mut c = syms(&["p", "q", "r", "s"]);
        c.set_from(&a);
        assert_eq!(c, a);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn entry_out_of_range() {
        let v = syms(&["x"]);
        assert!(v.entry(0).is_ok());
        assert!(matches!(
            v.entry(1),
            Err(ExprError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(v.get(1).is_none());
    }
}
