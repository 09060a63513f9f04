//! Conversion between arithmetic expressions and polynomial fractions.
//!
//! [`expand`] interprets an expression built from integer literals, the
//! entries of a variable vector and the six arithmetic operators as a
//! [`Fraction`]; [`express`] rebuilds an expression from a fraction. Their
//! composition, [`expanded_normal_form`], canonicalises an expression up to
//! commutativity, associativity and distributivity.
//!
//! Not every expression has such a form. Conversion failures are ordinary
//! [`ExprError`] values carrying the offending sub-expression.

use crate::poly::{Fraction, Monomial, Poly, PolyCtx};
use crate::view::{AsView, ExprView};
use crate::word::Word;
use crate::{Builtin, Expr, ExprError, ExprVec};
use dashu::integer::IBig;
use indexmap::IndexMap;

/// Options of [`expanded_normal_form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalFormConfig {
    /// Number the variables in [`ExprVec::sort_fast`] order instead of the
    /// order in which they are first met.
    pub sort_variables: bool,
    /// Bring the fraction to lowest terms before rebuilding; see
    /// [`Fraction::reduce`].
    pub reduce: bool,
}

impl Default for NormalFormConfig {
    fn default() -> Self {
        Self {
            sort_variables: true,
            reduce: true,
        }
    }
}

/// Exponents are stored as `u32`; any operation that could exceed this
/// degree is refused.
const MAX_DEGREE: u64 = u32::MAX as u64;

/// Bound on the coefficient size a power may produce.
const MAX_POWER_BITS: u64 = 1 << 26;

struct Expander<'v> {
    ctx: PolyCtx,
    /// Encoded words of each variable to its index; first occurrence wins.
    index: IndexMap<&'v [Word], usize>,
}

impl<'v> Expander<'v> {
    fn new(vars: &'v ExprVec) -> Self {
        let mut index = IndexMap::with_capacity(vars.len());
        for (i, v) in vars.iter().enumerate() {
            index.entry(v.view().words()).or_insert(i);
        }
        Self {
            ctx: PolyCtx::new(vars.len()),
            index,
        }
    }

    fn check_degree(&self, a: &Fraction, b: &Fraction, e: ExprView<'_>) -> Result<(), ExprError> {
        if a.max_exponent() as u64 + b.max_exponent() as u64 > MAX_DEGREE {
            return Err(ExprError::ExponentTooLarge(e.to_expr()));
        }
        Ok(())
    }

    fn expand(&self, e: ExprView<'_>) -> Result<Fraction, ExprError> {
        log::trace!("expand {}", e);
        if let Some(c) = e.to_integer() {
            return Ok(Fraction::constant(c, self.ctx));
        }
        if let Some(&i) = self.index.get(e.words()) {
            return Ok(Fraction::var(i, self.ctx));
        }
        let unrecognized = || ExprError::UnrecognizedSubexpression(e.to_expr());
        let op = e
            .head_builtin()
            .filter(|b| b.is_arithmetic())
            .ok_or_else(unrecognized)?;
        let nargs = e.nargs()?;
        let mut args = e.args();

        match (op, nargs) {
            (Builtin::Add, _) => args.try_fold(Fraction::zero(self.ctx), |acc, a| {
                let t = self.expand(a)?;
                self.check_degree(&acc, &t, e)?;
                Ok(acc.add(&t))
            }),
            (Builtin::Mul, _) => args.try_fold(Fraction::one(self.ctx), |acc, a| {
                let t = self.expand(a)?;
                self.check_degree(&acc, &t, e)?;
                Ok(acc.mul(&t))
            }),
            (Builtin::Sub, n) if n >= 1 => {
                let first = args.next().ok_or_else(unrecognized)?;
                let first = self.expand(first)?;
                args.try_fold(first, |acc, a| {
                    let t = self.expand(a)?;
                    self.check_degree(&acc, &t, e)?;
                    Ok(acc.sub(&t))
                })
            }
            (Builtin::Neg, 1) => Ok(self.expand(e.arg(0)?)?.neg()),
            (Builtin::Div, 2) => {
                let a = self.expand(e.arg(0)?)?;
                let b = self.expand(e.arg(1)?)?;
                self.check_degree(&a, &b, e)?;
                a.div(&b)
                    .ok_or_else(|| ExprError::DivisionByZero(e.to_expr()))
            }
            (Builtin::Pow, 2) => {
                let base = self.expand(e.arg(0)?)?;
                let k = self.integer_exponent(e, e.arg(1)?)?;
                let k = i32::try_from(k).map_err(|_| ExprError::ExponentTooLarge(e.to_expr()))?;
                let k_abs = k.unsigned_abs() as u64;
                let bits = base.max_coeff_bits() as u64;
                if base.max_exponent() as u64 * k_abs > MAX_DEGREE
                    || (bits > 1 && bits * k_abs > MAX_POWER_BITS)
                {
                    return Err(ExprError::ExponentTooLarge(e.to_expr()));
                }
                base.pow(k)
                    .ok_or_else(|| ExprError::DivisionByZero(e.to_expr()))
            }
            _ => Err(unrecognized()),
        }
    }

    /// The exponent `e` of the power `pow`. Failures inside the exponent are
    /// reported as they are; an exponent that expands to anything but an
    /// integer constant makes the whole power non-rational.
    fn integer_exponent(&self, pow: ExprView<'_>, e: ExprView<'_>) -> Result<IBig, ExprError> {
        if let Some(k) = e.to_integer() {
            return Ok(k);
        }
        let f = self.expand(e)?.reduce();
        match f.numerator().as_constant() {
            Some(k) if f.denominator().is_one() => Ok(k),
            _ => Err(ExprError::NonRationalExponent(pow.to_expr())),
        }
    }
}

/// Interprets `expr` as a fraction of polynomials in `vars`.
///
/// Integer literals become constants and any sub-expression structurally
/// equal to `vars[i]` becomes variable `i`. `Add` and `Mul` take any number
/// of arguments, `Sub` at least one, `Neg` one, `Div` and `Pow` two. A power
/// needs an exponent denoting an integer constant.
///
/// # Errors
///
/// - [`ExprError::UnrecognizedSubexpression`] for anything else
/// - [`ExprError::NonRationalExponent`] for a non-integer exponent
/// - [`ExprError::DivisionByZero`] when a divisor is zero
/// - [`ExprError::ExponentTooLarge`] when a degree would exceed `u32::MAX`
///   or a power would build an overly large coefficient
pub fn expand(expr: impl AsView, vars: &ExprVec) -> Result<Fraction, ExprError> {
    let expr = expr.as_view();
    Expander::new(vars).expand(expr).inspect_err(|err| {
        log::debug!("no rational normal form for {}: {}", expr, err);
    })
}

/// Rebuilds an expression from a polynomial in `vars`.
///
/// Terms appear in descending monomial order. A term is its coefficient
/// times `vars[i]` or `Pow(vars[i], e)` factors, written as the bare
/// monomial for coefficient 1 and as `Neg(monomial)` for -1.
///
/// # Panics
///
/// Panics if `p` has more variables than `vars` has entries.
pub fn express_poly(p: &Poly, vars: &ExprVec) -> Expr {
    let mut terms: Vec<Expr> = p
        .terms()
        .iter()
        .map(|(m, c)| express_term(m, c, vars))
        .collect();
    match terms.len() {
        0 => Expr::zero(),
        1 => terms.swap_remove(0),
        _ => Expr::builtin_call(Builtin::Add, &terms),
    }
}

fn express_term(m: &Monomial, c: &IBig, vars: &ExprVec) -> Expr {
    let mut factors: Vec<Expr> = Vec::new();
    for (i, &e) in m.exponents().iter().enumerate() {
        match e {
            0 => {}
            1 => factors.push(vars[i].clone()),
            _ => factors.push(Expr::pow(&vars[i], Expr::from(e as i64))),
        }
    }
    if factors.is_empty() {
        return Expr::from_integer(c);
    }
    let monomial = |factors: Vec<Expr>| match factors.len() {
        1 => factors.into_iter().next().unwrap_or_default(),
        _ => Expr::builtin_call(Builtin::Mul, &factors),
    };
    if c.is_one() {
        monomial(factors)
    } else if *c == IBig::from(-1) {
        Expr::neg(monomial(factors))
    } else {
        factors.insert(0, Expr::from_integer(c));
        Expr::builtin_call(Builtin::Mul, &factors)
    }
}

/// Rebuilds an expression from a fraction in `vars`: the numerator, wrapped
/// in `Div` when the denominator is not 1.
///
/// Re-expanding the result over the same `vars` yields a fraction equal to
/// `frac`, provided no entry of `vars` is an integer, an arithmetic
/// operation, or a duplicate of an earlier entry.
///
/// # Panics
///
/// Panics if `frac` has more variables than `vars` has entries.
pub fn express(frac: &Fraction, vars: &ExprVec) -> Expr {
    let num = express_poly(frac.numerator(), vars);
    if frac.denominator().is_one() {
        return num;
    }
    Expr::div(&num, express_poly(frac.denominator(), vars))
}

/// Puts an arithmetic expression in expanded normal form: collects its
/// arithmetic leaves as variables, expands, optionally reduces, and
/// rebuilds.
///
/// Two expressions denoting the same rational function of the same leaves
/// have identical normal forms under the default configuration.
pub fn expanded_normal_form(
    expr: impl AsView,
    config: &NormalFormConfig,
) -> Result<Expr, ExprError> {
    let expr = expr.as_view();
    let mut vars = ExprVec::new();
    expr.collect_arithmetic_nodes(&mut vars);
    if config.sort_variables {
        vars.sort_fast();
    }
    let mut frac = expand(expr, &vars)?;
    if config.reduce {
        frac = frac.reduce();
    }
    Ok(express(&frac, &vars))
}

impl Expr {
    /// See [`expanded_normal_form`].
    pub fn expanded_normal_form(&self, config: &NormalFormConfig) -> Result<Expr, ExprError> {
        expanded_normal_form(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn y() -> Expr {
        Expr::symbol("y")
    }

    fn vars(v: &[Expr]) -> ExprVec {
        v.iter().collect()
    }

    #[test]
    fn literals_and_variables() {
        init();
        let v = vars(&[x()]);
        let f = expand(Expr::from(7), &v).unwrap();
        assert_eq!(f.numerator().as_constant(), Some(IBig::from(7)));
        let f = expand(x(), &v).unwrap();
        assert_eq!(f, Fraction::var(0, PolyCtx::new(1)));
    }

    #[test]
    fn rational_function() {
        init();
        let v = vars(&[x()]);
        let e = Expr::div(Expr::add(x(), Expr::from(1)), x());
        let f = expand(&e, &v).unwrap();
        let ctx = PolyCtx::new(1);
        assert_eq!(f.numerator(), &Poly::var(0, ctx).add(&Poly::one(ctx)));
        assert_eq!(f.denominator(), &Poly::var(0, ctx));
        let back = express(&f, &v);
        assert_eq!(back.to_string(), "Div(Add(x, 1), x)");
        let again = expand(&back, &v).unwrap();
        assert_eq!(again.numerator(), f.numerator());
        assert_eq!(again.denominator(), f.denominator());
    }

    #[test]
    fn variadic_operators() {
        init();
        let v = vars(&[x()]);
        let empty_add = Expr::builtin_call(Builtin::Add, &[] as &[Expr]);
        assert!(expand(&empty_add, &v).unwrap().is_zero());
        let empty_mul = Expr::builtin_call(Builtin::Mul, &[] as &[Expr]);
        assert!(expand(&empty_mul, &v).unwrap().is_one());
        let sub = Expr::builtin_call(Builtin::Sub, &[Expr::from(10), x(), Expr::from(3)]);
        let f = expand(&sub, &v).unwrap();
        assert_eq!(express(&f, &v).to_string(), "Add(Neg(x), 7)");
        let neg_sub = Expr::builtin_call(Builtin::Sub, &[x()]);
        assert_eq!(expand(&neg_sub, &v).unwrap(), Fraction::var(0, PolyCtx::new(1)));
        let bad = Expr::builtin_call(Builtin::Sub, &[] as &[Expr]);
        assert!(matches!(
            expand(&bad, &v),
            Err(ExprError::UnrecognizedSubexpression(_))
        ));
    }

    #[test]
    fn unrecognized_reports_subexpression() {
        init();
        let v = vars(&[x()]);
        let e = Expr::add(x(), Expr::mul(Expr::from(2), y()));
        match expand(&e, &v) {
            Err(ExprError::UnrecognizedSubexpression(sub)) => assert_eq!(sub, y()),
            other => panic!("unexpected {other:?}"),
        }
        let sin = Expr::builtin_call(Builtin::Sin, &[x()]);
        assert!(expand(&sin, &v).is_err());
    }

    #[test]
    fn powers() {
        init();
        let v = vars(&[x()]);
        let e = Expr::pow(Expr::add(x(), Expr::from(1)), Expr::from(2));
        let f = expand(&e, &v).unwrap();
        assert_eq!(express(&f, &v).to_string(), "Add(Pow(x, 2), Mul(2, x), 1)");

        let inv = Expr::pow(x(), Expr::from(-1));
        assert_eq!(express(&expand(&inv, &v).unwrap(), &v).to_string(), "Div(1, x)");

        let neg_exp = Expr::pow(x(), Expr::neg(Expr::from(2)));
        assert!(expand(&neg_exp, &v).is_ok());

        let half = Expr::pow(x(), Expr::div(Expr::from(5), Expr::from(2)));
        assert!(matches!(
            expand(&half, &v),
            Err(ExprError::NonRationalExponent(_))
        ));
        let sym = Expr::pow(x(), x());
        assert!(matches!(
            expand(&sym, &v),
            Err(ExprError::NonRationalExponent(_))
        ));
    }

    #[test]
    fn exponent_limits() {
        init();
        let v = vars(&[x()]);
        let huge = Expr::pow(x(), Expr::from_integer(&IBig::from(1u64 << 40)));
        assert!(matches!(
            expand(&huge, &v),
            Err(ExprError::ExponentTooLarge(_))
        ));
        let big = Expr::pow(x(), Expr::from(1 << 30));
        let nested = Expr::pow(&big, Expr::from(8));
        assert!(matches!(
            expand(&nested, &v),
            Err(ExprError::ExponentTooLarge(_))
        ));
    }

    #[test]
    fn exponent_failures_name_the_exponent() {
        init();
        let v = vars(&[x(), y()]);
        let sin = Expr::builtin_call(Builtin::Sin, &[y()]);
        match expand(Expr::pow(x(), &sin), &v) {
            Err(ExprError::UnrecognizedSubexpression(sub)) => assert_eq!(sub, sin),
            other => panic!("unexpected {other:?}"),
        }
        let inf = Expr::div(Expr::from(1), Expr::from(0));
        match expand(Expr::pow(x(), &inf), &v) {
            Err(ExprError::DivisionByZero(sub)) => assert_eq!(sub, inf),
            other => panic!("unexpected {other:?}"),
        }
        let one = Expr::div(&y(), &y());
        let f = expand(Expr::pow(x(), &one), &v).unwrap();
        assert_eq!(f, Fraction::var(0, PolyCtx::new(2)));
    }

    #[test]
    fn constant_powers_are_bounded() {
        init();
        let v = vars(&[x()]);
        let e = Expr::pow(Expr::from(3), Expr::from(i32::MAX));
        assert!(matches!(
            expand(&e, &v),
            Err(ExprError::ExponentTooLarge(_))
        ));
        let inv = Expr::pow(Expr::from(-2), Expr::from(-(1 << 26)));
        assert!(matches!(
            expand(&inv, &v),
            Err(ExprError::ExponentTooLarge(_))
        ));
        let one = Expr::pow(Expr::from(-1), Expr::from(i32::MAX));
        let minus_one = Fraction::constant(IBig::from(-1), PolyCtx::new(1));
        assert_eq!(expand(&one, &v).unwrap(), minus_one);
        let ok = Expr::pow(Expr::from(2), Expr::from(100));
        assert_eq!(
            expand(&ok, &v).unwrap().numerator().as_constant(),
            Some(IBig::ONE << 100)
        );
    }

    #[test]
    fn division_by_zero() {
        init();
        let v = vars(&[x()]);
        let e = Expr::div(x(), Expr::sub(x(), x()));
        assert!(matches!(expand(&e, &v), Err(ExprError::DivisionByZero(_))));
        let p = Expr::pow(Expr::from(0), Expr::from(-2));
        assert!(matches!(expand(&p, &v), Err(ExprError::DivisionByZero(_))));
    }

    #[test]
    fn express_terms() {
        let v = vars(&[x(), y()]);
        let ctx = PolyCtx::new(2);
        assert_eq!(express(&Fraction::zero(ctx), &v), Expr::zero());
        let neg_x = Fraction::var(0, ctx).neg();
        assert_eq!(express(&neg_x, &v).to_string(), "Neg(x)");
        let xy3 = Fraction::var(0, ctx)
            .mul(&Fraction::var(1, ctx))
            .mul(&Fraction::constant(IBig::from(3), ctx));
        assert_eq!(express(&xy3, &v).to_string(), "Mul(3, x, y)");
        let xy = Fraction::var(0, ctx).mul(&Fraction::var(1, ctx));
        assert_eq!(express(&xy, &v).to_string(), "Mul(x, y)");
    }

    #[test]
    fn normal_form_identifies_rearrangements() {
        init();
        let config = NormalFormConfig::default();
        let a = Expr::add(x(), y());
        let b = Expr::add(y(), x());
        assert_eq!(
            a.expanded_normal_form(&config).unwrap(),
            b.expanded_normal_form(&config).unwrap()
        );
        let c = Expr::mul(Expr::add(x(), Expr::from(1)), Expr::sub(x(), Expr::from(1)));
        let d = Expr::sub(Expr::pow(x(), Expr::from(2)), Expr::from(1));
        assert_eq!(
            c.expanded_normal_form(&config).unwrap(),
            d.expanded_normal_form(&config).unwrap()
        );
    }

    #[test]
    fn normal_form_reduces() {
        init();
        let e = Expr::div(Expr::mul(x(), y()), x());
        let on = expanded_normal_form(&e, &NormalFormConfig::default()).unwrap();
        assert_eq!(on, y());
        let off = NormalFormConfig {
            reduce: false,
            ..Default::default()
        };
        let raw = expanded_normal_form(&e, &off).unwrap();
        assert!(raw.is_builtin_call(Builtin::Div));
    }

    #[test]
    fn equal_rational_functions_share_a_normal_form() {
        init();
        let config = NormalFormConfig::default();
        let one = || Expr::from(1);
        let xp1 = Expr::add(x(), one());
        let yp1 = Expr::add(y(), one());
        let yp2 = Expr::add(y(), Expr::from(2));

        let a = Expr::add(
            Expr::div(one(), Expr::mul(&xp1, &yp1)),
            Expr::div(one(), Expr::mul(&xp1, &yp2)),
        );
        let b = Expr::div(
            Expr::add(Expr::mul(Expr::from(2), y()), Expr::from(3)),
            Expr::builtin_call(Builtin::Mul, &[&xp1, &yp1, &yp2]),
        );
        assert_eq!(
            a.expanded_normal_form(&config).unwrap(),
            b.expanded_normal_form(&config).unwrap()
        );

        let c = Expr::div(Expr::mul(&xp1, &yp1), Expr::mul(&xp1, &yp2));
        let nf = c.expanded_normal_form(&config).unwrap();
        assert_eq!(nf.to_string(), "Div(Add(y, 1), Add(y, 2))");
    }

    #[test]
    fn variable_order_follows_config() {
        init();
        let z = Expr::symbol("z");
        let e = Expr::add(&z, x());
        let sorted = expanded_normal_form(&e, &NormalFormConfig::default()).unwrap();
        assert_eq!(sorted.to_string(), "Add(x, z)");
        let unsorted = NormalFormConfig {
            sort_variables: false,
            ..Default::default()
        };
        let kept = expanded_normal_form(&e, &unsorted).unwrap();
        assert_eq!(kept.to_string(), "Add(z, x)");
    }

    #[test]
    fn failure_leaves_input_valid() {
        init();
        let e = Expr::pow(x(), Expr::div(Expr::from(5), Expr::from(2)));
        assert!(e.expanded_normal_form(&NormalFormConfig::default()).is_err());
        assert!(e.check_sizes());
        assert!(e.is_pow());
    }
}
