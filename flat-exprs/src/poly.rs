//! Sparse multivariate integer polynomials and their fractions.
//!
//! These are the canonical values of the normal-form bridge. A [`PolyCtx`]
//! fixes the number of variables; variable `i` stands for entry `i` of the
//! variable vector the bridge was given.
//!
//! Terms are kept sorted in descending lexicographic order of their
//! monomials (variable 0 most significant) with no zero coefficients, so two
//! polynomials are equal iff their term lists are equal.

use dashu::base::{BitTest, Gcd};
use dashu::integer::IBig;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The variable context shared by all polynomials of one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolyCtx {
    nvars: usize,
}

impl PolyCtx {
    #[inline]
    pub fn new(nvars: usize) -> Self {
        Self { nvars }
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }
}

/// A monomial as a dense exponent vector.
///
/// The derived order is lexicographic over the exponents, which is the
/// monomial order used throughout this module.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Monomial(SmallVec<[u32; 4]>);

impl Monomial {
    /// The monomial 1.
    pub fn one(nvars: usize) -> Self {
        Self(SmallVec::from_elem(0, nvars))
    }

    /// The monomial `x_i`.
    pub fn var(i: usize, nvars: usize) -> Self {
        let mut m = Self::one(nvars);
        m.0[i] = 1;
        m
    }

    pub fn from_exponents(exps: &[u32]) -> Self {
        Self(SmallVec::from_slice(exps))
    }

    #[inline]
    pub fn exponent(&self, i: usize) -> u32 {
        self.0[i]
    }

    #[inline]
    pub fn exponents(&self) -> &[u32] {
        &self.0
    }

    pub fn is_one(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    pub fn max_exponent(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Adds exponents.
    pub fn mul(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// Subtracts exponents, or `None` if `other` does not divide `self`.
    pub fn div(&self, other: &Self) -> Option<Self> {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<SmallVec<_>>>()
            .map(Self)
    }

    /// Componentwise minimum of exponents.
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(&other.0).map(|(a, b)| *a.min(b)).collect())
    }
}

/// A sparse multivariate polynomial with big-integer coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Poly {
    nvars: usize,
    /// Descending monomial order, no zero coefficients.
    terms: Vec<(Monomial, IBig)>,
}

impl Poly {
    /// Creates a polynomial from arbitrary terms, sorting them and combining
    /// like monomials.
    pub fn from_terms(terms: Vec<(Monomial, IBig)>, ctx: PolyCtx) -> Self {
        let mut acc: BTreeMap<Monomial, IBig> = BTreeMap::new();
        for (m, c) in terms {
            debug_assert_eq!(m.0.len(), ctx.nvars);
            *acc.entry(m).or_insert(IBig::ZERO) += c;
        }
        Self::from_map(acc, ctx.nvars)
    }

    fn from_map(acc: BTreeMap<Monomial, IBig>, nvars: usize) -> Self {
        Self {
            nvars,
            terms: acc.into_iter().rev().filter(|(_, c)| !c.is_zero()).collect(),
        }
    }

    pub fn zero(ctx: PolyCtx) -> Self {
        Self {
            nvars: ctx.nvars,
            terms: Vec::new(),
        }
    }

    pub fn one(ctx: PolyCtx) -> Self {
        Self::constant(IBig::ONE, ctx)
    }

    pub fn constant(c: IBig, ctx: PolyCtx) -> Self {
        if c.is_zero() {
            return Self::zero(ctx);
        }
        Self {
            nvars: ctx.nvars,
            terms: vec![(Monomial::one(ctx.nvars), c)],
        }
    }

    /// The polynomial `x_i`.
    pub fn var(i: usize, ctx: PolyCtx) -> Self {
        debug_assert!(i < ctx.nvars);
        Self {
            nvars: ctx.nvars,
            terms: vec![(Monomial::var(i, ctx.nvars), IBig::ONE)],
        }
    }

    #[inline]
    pub fn ctx(&self) -> PolyCtx {
        PolyCtx::new(self.nvars)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        matches!(self.terms.as_slice(), [(m, c)] if m.is_one() && c.is_one())
    }

    /// The value of a constant polynomial, `None` otherwise.
    pub fn as_constant(&self) -> Option<IBig> {
        match self.terms.as_slice() {
            [] => Some(IBig::ZERO),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in descending monomial order.
    #[inline]
    pub fn terms(&self) -> &[(Monomial, IBig)] {
        &self.terms
    }

    pub fn leading_term(&self) -> Option<(&Monomial, &IBig)> {
        self.terms.first().map(|(m, c)| (m, c))
    }

    /// Largest exponent of any variable in any term.
    pub fn max_exponent(&self) -> u32 {
        self.terms
            .iter()
            .map(|(m, _)| m.max_exponent())
            .max()
            .unwrap_or(0)
    }

    /// Bit length of the largest coefficient magnitude.
    pub fn max_coeff_bits(&self) -> usize {
        self.terms.iter().map(|(_, c)| c.bit_len()).max().unwrap_or(0)
    }

    /// Largest exponent of `x_v` in any term.
    pub fn degree_in(&self, v: usize) -> u32 {
        self.terms.iter().map(|(m, _)| m.0[v]).max().unwrap_or(0)
    }

    /// The coefficient of `x_v^k`, as a polynomial free of `x_v`.
    pub fn coeff_in(&self, v: usize, k: u32) -> Self {
        // Zeroing one exponent keeps the order among terms that agree on it.
        let terms = self
            .terms
            .iter()
            .filter(|(m, _)| m.0[v] == k)
            .map(|(m, c)| {
                let mut m = m.clone();
                m.0[v] = 0;
                (m, c.clone())
            })
            .collect();
        Self {
            nvars: self.nvars,
            terms,
        }
    }

    /// The nonzero coefficients of the powers of `x_v`, highest power first.
    fn coeffs_in(&self, v: usize) -> Vec<Self> {
        let mut groups: BTreeMap<u32, Vec<(Monomial, IBig)>> = BTreeMap::new();
        for (m, c) in &self.terms {
            let mut m = m.clone();
            let k = std::mem::take(&mut m.0[v]);
            groups.entry(k).or_default().push((m, c.clone()));
        }
        groups
            .into_values()
            .rev()
            .map(|terms| Self {
                nvars: self.nvars,
                terms,
            })
            .collect()
    }

    /// Lowest-numbered variable that occurs in some term.
    fn main_var(&self) -> Option<usize> {
        self.terms
            .iter()
            .filter_map(|(m, _)| m.0.iter().position(|&e| e != 0))
            .min()
    }

    fn is_unit(&self) -> bool {
        match self.terms.as_slice() {
            [(m, c)] => m.is_one() && (c.is_one() || *c == IBig::NEG_ONE),
            _ => false,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nvars, other.nvars);
        let mut terms = Vec::with_capacity(self.len() + other.len());
        let mut a = self.terms.iter().peekable();
        let mut b = other.terms.iter().peekable();
        loop {
            match (a.peek().copied(), b.peek().copied()) {
                (Some((ma, ca)), Some((mb, cb))) => match ma.cmp(mb) {
                    Ordering::Greater => {
                        terms.push((ma.clone(), ca.clone()));
                        a.next();
                    }
                    Ordering::Less => {
                        terms.push((mb.clone(), cb.clone()));
                        b.next();
                    }
                    Ordering::Equal => {
                        let c = ca + cb;
                        if !c.is_zero() {
                            terms.push((ma.clone(), c));
                        }
                        a.next();
                        b.next();
                    }
                },
                (Some(t), None) => {
                    terms.push(t.clone());
                    a.next();
                }
                (None, Some(t)) => {
                    terms.push(t.clone());
                    b.next();
                }
                (None, None) => break,
            }
        }
        Self {
            nvars: self.nvars,
            terms,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            nvars: self.nvars,
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nvars, other.nvars);
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.ctx());
        }
        let mut acc: BTreeMap<Monomial, IBig> = BTreeMap::new();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                *acc.entry(m1.mul(m2)).or_insert(IBig::ZERO) += c1 * c2;
            }
        }
        Self::from_map(acc, self.nvars)
    }

    /// Multiplies by the single term `c * m`.
    pub fn mul_term(&self, m: &Monomial, c: &IBig) -> Self {
        if c.is_zero() {
            return Self::zero(self.ctx());
        }
        Self {
            nvars: self.nvars,
            terms: self
                .terms
                .iter()
                .map(|(m2, c2)| (m.mul(m2), c * c2))
                .collect(),
        }
    }

    /// Raises to a non-negative power by repeated squaring.
    pub fn pow(&self, mut e: u32) -> Self {
        let mut result = Self::one(self.ctx());
        let mut base = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Non-negative gcd of the coefficients; zero for the zero polynomial.
    pub fn content(&self) -> IBig {
        self.terms.iter().fold(IBig::ZERO, |g, (_, c)| {
            if g.is_one() {
                g
            } else {
                IBig::from(g.gcd(c.clone()))
            }
        })
    }

    /// Divides every coefficient by `k`, which must divide all of them.
    pub fn div_scalar(&self, k: &IBig) -> Self {
        debug_assert!(self.terms.iter().all(|(_, c)| (c % k).is_zero()));
        Self {
            nvars: self.nvars,
            terms: self.terms.iter().map(|(m, c)| (m.clone(), c / k)).collect(),
        }
    }

    /// The largest monomial dividing every term; `1` for zero.
    pub fn monomial_gcd(&self) -> Monomial {
        let mut terms = self.terms.iter();
        match terms.next() {
            Some((first, _)) => terms.fold(first.clone(), |g, (m, _)| g.gcd(m)),
            None => Monomial::one(self.nvars),
        }
    }

    /// Divides every term by `m`, or `None` if `m` does not divide them all.
    pub fn div_monomial(&self, m: &Monomial) -> Option<Self> {
        let terms = self
            .terms
            .iter()
            .map(|(t, c)| t.div(m).map(|q| (q, c.clone())))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            nvars: self.nvars,
            terms,
        })
    }

    /// Exact division: `Some(q)` with `self == q * d`, or `None` when `d` is
    /// zero or does not divide `self` over the integers.
    pub fn div_exact(&self, d: &Self) -> Option<Self> {
        let (lm, lc) = d.leading_term()?;
        let mut r = self.clone();
        let mut q = Vec::new();
        while let Some((m, c)) = r.leading_term() {
            let qm = m.div(lm)?;
            if !(c % lc).is_zero() {
                return None;
            }
            let qc = c / lc;
            r = r.sub(&d.mul_term(&qm, &qc));
            q.push((qm, qc));
        }
        Some(Self {
            nvars: self.nvars,
            terms: q,
        })
    }

    /// Pseudo-remainder with respect to `x_v`: the remainder of
    /// `lc^k * self` by `d`, where `lc` is the leading coefficient of `d`
    /// in `x_v`. `d` must be nonzero.
    fn prem(&self, d: &Self, v: usize) -> Self {
        let dd = d.degree_in(v);
        let lc = d.coeff_in(v, dd);
        let mut r = self.clone();
        while !r.is_zero() {
            let dr = r.degree_in(v);
            if dr < dd {
                break;
            }
            let lr = r.coeff_in(v, dr);
            let mut shift = Monomial::one(self.nvars);
            shift.0[v] = dr - dd;
            r = r.mul(&lc).sub(&d.mul(&lr).mul_term(&shift, &IBig::ONE));
        }
        r
    }

    /// Splits into the content with respect to `x_v` (the gcd of the
    /// coefficients of its powers) and the primitive part.
    fn split_content(&self, v: usize) -> (Self, Self) {
        if self.is_zero() {
            return (self.clone(), self.clone());
        }
        let mut content = Self::zero(self.ctx());
        for coeff in self.coeffs_in(v) {
            content = content.gcd_rec(&coeff);
            if content.is_unit() {
                break;
            }
        }
        let primitive = self
            .div_exact(&content)
            .expect("content divides the polynomial");
        (content, primitive)
    }

    /// Greatest common divisor over the integers, normalised to a positive
    /// leading coefficient. The gcd of two zero polynomials is zero.
    ///
    /// Recurses on the lowest-numbered variable: the gcd of the contents in
    /// that variable times the last nonzero entry of the primitive
    /// pseudo-remainder sequence of the primitive parts.
    pub fn gcd(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nvars, other.nvars);
        let g = self.gcd_rec(other);
        if g.leading_term().is_some_and(|(_, c)| *c < IBig::ZERO) {
            g.neg()
        } else {
            g
        }
    }

    fn gcd_rec(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let v = match (self.main_var(), other.main_var()) {
            (None, None) => {
                let g = IBig::from(self.content().gcd(other.content()));
                return Self::constant(g, self.ctx());
            }
            (Some(a), Some(b)) => a.min(b),
            (Some(v), None) | (None, Some(v)) => v,
        };
        let (ca, pa) = self.split_content(v);
        let (cb, pb) = other.split_content(v);
        let c = ca.gcd_rec(&cb);
        let (da, db) = (pa.degree_in(v), pb.degree_in(v));
        if da == 0 || db == 0 {
            return c;
        }
        let (mut p, mut q) = if da >= db { (pa, pb) } else { (pb, pa) };
        while !q.is_zero() {
            let r = p.prem(&q, v);
            p = q;
            q = r.split_content(v).1;
        }
        c.mul(&p)
    }
}

/// A quotient of two polynomials over the same context.
///
/// # Invariants
///
/// - the denominator is never zero
/// - the leading coefficient of the denominator is positive
/// - numerator and denominator share no integer content
/// - zero is `0 / 1`
///
/// Common polynomial factors are only removed by [`Fraction::reduce`], which
/// yields the unique lowest-terms form. Equality is value equality, decided
/// by cross multiplication.
#[derive(Clone, Debug)]
pub struct Fraction {
    num: Poly,
    den: Poly,
}

impl Fraction {
    /// Creates a normalised fraction.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn new(num: Poly, den: Poly) -> Self {
        assert!(!den.is_zero(), "denominator cannot be zero");
        let mut f = Self { num, den };
        f.normalize();
        f
    }

    pub fn from_poly(p: Poly) -> Self {
        let den = Poly::one(p.ctx());
        Self { num: p, den }
    }

    pub fn zero(ctx: PolyCtx) -> Self {
        Self::from_poly(Poly::zero(ctx))
    }

    pub fn one(ctx: PolyCtx) -> Self {
        Self::from_poly(Poly::one(ctx))
    }

    pub fn constant(c: IBig, ctx: PolyCtx) -> Self {
        Self::from_poly(Poly::constant(c, ctx))
    }

    pub fn var(i: usize, ctx: PolyCtx) -> Self {
        Self::from_poly(Poly::var(i, ctx))
    }

    #[inline]
    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    #[inline]
    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    pub fn into_parts(self) -> (Poly, Poly) {
        (self.num, self.den)
    }

    #[inline]
    pub fn ctx(&self) -> PolyCtx {
        self.num.ctx()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    /// Largest exponent in numerator or denominator.
    pub fn max_exponent(&self) -> u32 {
        self.num.max_exponent().max(self.den.max_exponent())
    }

    /// Bit length of the largest coefficient in numerator or denominator.
    pub fn max_coeff_bits(&self) -> usize {
        self.num.max_coeff_bits().max(self.den.max_coeff_bits())
    }

    fn normalize(&mut self) {
        if self.num.is_zero() {
            self.den = Poly::one(self.num.ctx());
            return;
        }
        let g = IBig::from(self.num.content().gcd(self.den.content()));
        if !g.is_one() {
            self.num = self.num.div_scalar(&g);
            self.den = self.den.div_scalar(&g);
        }
        if self.den.leading_term().is_some_and(|(_, c)| *c < IBig::ZERO) {
            self.num = self.num.neg();
            self.den = self.den.neg();
        }
    }

    /// Brings the fraction to lowest terms: numerator and denominator
    /// coprime, the denominator with a positive leading coefficient. Equal
    /// fractions reduce to identical parts.
    pub fn reduce(&self) -> Self {
        if self.is_zero() || self.den.is_one() {
            return self.clone();
        }
        let (mut num, mut den) = (self.num.clone(), self.den.clone());
        let m = num.monomial_gcd().gcd(&den.monomial_gcd());
        if !m.is_one() {
            if let (Some(n), Some(d)) = (num.div_monomial(&m), den.div_monomial(&m)) {
                num = n;
                den = d;
            }
        }
        let g = num.gcd(&den);
        if !g.is_one() {
            if let (Some(n), Some(d)) = (num.div_exact(&g), den.div_exact(&g)) {
                num = n;
                den = d;
            }
        }
        Self::new(num, den)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.den == other.den {
            return Self::new(self.num.add(&other.num), self.den.clone());
        }
        Self::new(
            self.num.mul(&other.den).add(&other.num.mul(&self.den)),
            self.den.mul(&other.den),
        )
    }

    pub fn neg(&self) -> Self {
        Self {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::new(self.num.mul(&other.num), self.den.mul(&other.den))
    }

    /// `None` when `other` is zero.
    pub fn div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(Self::new(
            self.num.mul(&other.den),
            self.den.mul(&other.num),
        ))
    }

    /// Raises to an integer power. Negative powers invert; `None` for a
    /// negative power of zero.
    pub fn pow(&self, e: i32) -> Option<Self> {
        let k = e.unsigned_abs();
        if e >= 0 {
            return Some(Self {
                num: self.num.pow(k),
                den: self.den.pow(k),
            });
        }
        if self.is_zero() {
            return None;
        }
        Some(Self::new(self.den.pow(k), self.num.pow(k)))
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.num.mul(&other.den) == other.num.mul(&self.den)
    }
}

impl Eq for Fraction {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx2() -> PolyCtx {
        PolyCtx::new(2)
    }

    fn x() -> Poly {
        Poly::var(0, ctx2())
    }

    fn y() -> Poly {
        Poly::var(1, ctx2())
    }

    fn c(v: i64) -> Poly {
        Poly::constant(IBig::from(v), ctx2())
    }

    #[test]
    fn terms_are_sorted_descending() {
        let p = y().add(&x()).add(&c(3)).add(&x().mul(&x()));
        let exps: Vec<&[u32]> = p.terms().iter().map(|(m, _)| m.exponents()).collect();
        assert_eq!(exps, vec![&[2, 0][..], &[1, 0][..], &[0, 1][..], &[0, 0][..]]);
    }

    #[test]
    fn cancellation_drops_terms() {
        let p = x().add(&c(1));
        assert!(p.sub(&p).is_zero());
        assert_eq!(p.add(&c(-1)), x());
    }

    #[test]
    fn multiplication_and_power() {
        // (x + 1)^2 = x^2 + 2x + 1
        let p = x().add(&c(1));
        let sq = p.pow(2);
        assert_eq!(sq, x().mul(&x()).add(&x().mul(&c(2))).add(&c(1)));
        assert_eq!(p.pow(0), Poly::one(ctx2()));
        assert_eq!(sq.max_exponent(), 2);
    }

    #[test]
    fn content_and_monomial_gcd() {
        let p = x().mul(&y()).mul(&c(6)).add(&x().mul(&c(-4)));
        assert_eq!(p.content(), IBig::from(2));
        assert_eq!(p.monomial_gcd(), Monomial::from_exponents(&[1, 0]));
        assert_eq!(Poly::zero(ctx2()).content(), IBig::ZERO);
    }

    #[test]
    fn exact_division() {
        let a = x().add(&y());
        let b = x().sub(&y());
        let prod = a.mul(&b);
        assert_eq!(prod.div_exact(&a), Some(b.clone()));
        assert_eq!(prod.div_exact(&b), Some(a.clone()));
        assert_eq!(a.div_exact(&b), None);
        assert_eq!(x().div_exact(&c(2)), None);
        assert_eq!(x().div_exact(&Poly::zero(ctx2())), None);
    }

    #[test]
    fn fraction_normalisation() {
        let f = Fraction::new(x().mul(&c(2)), c(-4));
        assert_eq!(f.numerator(), &x().neg());
        assert_eq!(f.denominator(), &c(2));
        let z = Fraction::new(Poly::zero(ctx2()), x());
        assert!(z.denominator().is_one());
    }

    #[test]
    fn fraction_reduce() {
        let a = x().add(&y());
        let f = Fraction::new(a.mul(&x()).mul(&x()), a.mul(&x()));
        let r = f.reduce();
        assert_eq!(r.numerator(), &x());
        assert!(r.denominator().is_one());
        assert_eq!(r, f);
    }

    #[test]
    fn gcd_finds_shared_factors() {
        let a = x().add(&c(1));
        let b = y().add(&c(1));
        let d = y().add(&c(2));
        assert_eq!(a.mul(&b).gcd(&a.mul(&d)), a);
        assert_eq!(a.mul(&c(-6)).gcd(&a.mul(&b).mul(&c(4))), a.mul(&c(2)));
        assert!(b.gcd(&d).is_one());
        assert_eq!(Poly::zero(ctx2()).gcd(&b.neg()), b);
        assert_eq!(c(12).gcd(&c(-18)), c(6));

        // x^2 - 1 and x^2 + 2x + 1
        let sq = x().mul(&x());
        let p = sq.sub(&c(1));
        let q = sq.add(&x().mul(&c(2))).add(&c(1));
        assert_eq!(p.gcd(&q), a);
    }

    #[test]
    fn reduce_gives_lowest_terms() {
        let a = x().add(&c(1));
        let b = y().add(&c(1));
        let d = y().add(&c(2));
        let f = Fraction::new(a.mul(&b), a.mul(&d).neg());
        let r = f.reduce();
        assert_eq!(r.numerator(), &b.neg());
        assert_eq!(r.denominator(), &d);
        assert_eq!(r, f);

        let g = Fraction::new(b.mul(&x()).mul(&c(3)), d.mul(&x()).mul(&c(-3)));
        let rg = g.reduce();
        assert_eq!(rg.numerator(), r.numerator());
        assert_eq!(rg.denominator(), r.denominator());
    }

    #[test]
    fn fraction_arithmetic() {
        let one = Fraction::one(ctx2());
        let fx = Fraction::var(0, ctx2());
        let inv = one.div(&fx).unwrap();
        assert_eq!(inv.mul(&fx), one);
        assert_eq!(fx.add(&inv).sub(&inv), fx);
        assert!(fx.div(&Fraction::zero(ctx2())).is_none());
        assert_eq!(fx.pow(-2).unwrap().mul(&fx.pow(2).unwrap()), one);
        assert!(Fraction::zero(ctx2()).pow(-1).is_none());
        assert!(Fraction::zero(ctx2()).pow(3).unwrap().is_zero());
    }
}
