//! Human-readable rendering of expressions.
//!
//! Integers print in decimal, symbols by name, strings double-quoted with
//! escapes, and calls as `f(a, b, ...)`. The output is for diagnostics and
//! tests; it is not a serialization format.

use crate::view::{ExprView, Node};
use crate::Expr;
use std::fmt;

fn write_str_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    f.write_str(&out)
}

impl fmt::Display for ExprView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Integer(i) => write!(f, "{i}"),
            Node::Symbol(s) => f.write_str(&s),
            Node::String(s) => write_str_quoted(f, &s),
            Node::Call(func, args) => {
                write!(f, "{func}(")?;
                for (i, a) in args.enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Expr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}
