//! Arithmetic convenience builders and arithmetic leaf collection.
//!
//! The builders are sugar over [`Expr::call`]: the operator symbol is a
//! single builtin header word held on the stack, so building `Add(a, b)`
//! performs exactly one allocation.

use crate::view::{AsView, ExprView};
use crate::{Builtin, Expr, ExprVec};

impl Expr {
    /// Builds the call `b(args...)` of a builtin operator.
    pub fn builtin_call<A: AsView>(b: Builtin, args: &[A]) -> Expr {
        let head = [b.header()];
        Expr::call(ExprView::new(&head), args)
    }

    /// `Neg(a)`
    pub fn neg(a: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Neg, &[a.as_view()])
    }

    /// `Add(a, b)`
    pub fn add(a: impl AsView, b: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Add, &[a.as_view(), b.as_view()])
    }

    /// `Sub(a, b)`
    pub fn sub(a: impl AsView, b: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Sub, &[a.as_view(), b.as_view()])
    }

    /// `Mul(a, b)`
    pub fn mul(a: impl AsView, b: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Mul, &[a.as_view(), b.as_view()])
    }

    /// `Div(a, b)`
    pub fn div(a: impl AsView, b: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Div, &[a.as_view(), b.as_view()])
    }

    /// `Pow(a, b)`
    pub fn pow(a: impl AsView, b: impl AsView) -> Expr {
        Self::builtin_call(Builtin::Pow, &[a.as_view(), b.as_view()])
    }

    /// Returns `true` if the root is a call of one of the six arithmetic
    /// operators `Neg`, `Add`, `Sub`, `Mul`, `Div`, `Pow`.
    #[inline]
    pub fn is_arithmetic_operation(&self) -> bool {
        self.view().is_arithmetic_operation()
    }

    /// Appends to `nodes` every maximal sub-expression that is not an
    /// arithmetic operation, once per distinct encoding, in first-seen
    /// order. Integer literals are constants, not leaves, and are skipped.
    pub fn collect_arithmetic_nodes(&self, nodes: &mut ExprVec) {
        self.view().collect_arithmetic_nodes(nodes);
    }

    /// The arithmetic leaves of `self`; see
    /// [`Expr::collect_arithmetic_nodes`].
    pub fn arithmetic_nodes(&self) -> ExprVec {
        let mut nodes = ExprVec::new();
        self.collect_arithmetic_nodes(&mut nodes);
        nodes
    }
}

impl ExprView<'_> {
    #[inline]
    pub fn is_arithmetic_operation(&self) -> bool {
        self.head_builtin().is_some_and(Builtin::is_arithmetic)
    }

    pub fn collect_arithmetic_nodes(&self, nodes: &mut ExprVec) {
        if self.is_integer() {
            return;
        }
        if self.is_arithmetic_operation() {
            for arg in self.args() {
                arg.collect_arithmetic_nodes(nodes);
            }
            return;
        }
        let before = nodes.len();
        let i = nodes.insert_unique(*self);
        if nodes.len() > before {
            log::trace!("arithmetic leaf #{}: {}", i, self);
        }
    }
}
