//! # Flat Exprs
//!
//! Symbolic expression trees stored as flat runs of machine words.
//!
//! An [`Expr`] owns one encoded node: a header word carrying a 4-bit type
//! tag plus either an inline payload (small integers, short symbols and
//! strings, builtin operators) or the total size of the node, followed by
//! its children. Every node is self-delimiting, so sub-expressions are
//! reached without pointers and borrowed as zero-copy [`ExprView`]s.
//!
//! On top of the encoding the crate provides an [`ExprVec`] with
//! deduplication and a fast representation order, arithmetic builders, and
//! a bridge between arithmetic expressions and fractions of multivariate
//! integer polynomials ([`expand`], [`express`], [`expanded_normal_form`]).
//!
//! ## Example
//! ```rust
//! use flat_exprs::{Expr, NormalFormConfig};
//!
//! let x = Expr::symbol("x");
//! let one = Expr::from(1);
//!
//! // (x + 1) * (x - 1)
//! let e = Expr::mul(Expr::add(&x, &one), Expr::sub(&x, &one));
//! assert_eq!(e.arity(), 2);
//! assert_eq!(e.arg(0).unwrap(), Expr::add(&x, &one));
//!
//! let nf = e.expanded_normal_form(&NormalFormConfig::default()).unwrap();
//! assert_eq!(nf.to_string(), "Add(Pow(x, 2), -1)");
//! ```
//!
//! ## License
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod arith;
mod builtin;
mod display;
mod error;
mod expr;
mod field;
mod normal;
mod poly;
mod proptests;
mod vec;
mod view;
pub mod word;

pub use builtin::{Builtin, lookup_builtin};
pub use error::ExprError;
pub use expr::Expr;
pub use field::{FieldContext, SpecialValue, Truth, Value, exp};
pub use normal::{NormalFormConfig, expand, expanded_normal_form, express, express_poly};
pub use poly::{Fraction, Monomial, Poly, PolyCtx};
pub use vec::ExprVec;
pub use view::{Args, AsView, ExprView, Node};
pub use word::{ExprType, Word};
