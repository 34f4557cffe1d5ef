use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::symbolic::expr::{SymbolicExpr, SymbolicFunction};

/// Share of the contributions to a monomial below which their sum is zero
const ZERO_TOLERANCE: f64 = 1e-10;

fn format_coefficient(value: f64) -> String {
    format!("{:.12e}", value)
}

/// How an opaque atom depends on its inner fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AtomHead {
    Function(SymbolicFunction),
    /// `inner ^ q` for an exponent that is not expanded.
    Power(f64),
    /// `c ^ inner` for a positive constant base.
    Exponential(f64),
}

/// Non-polynomial subterm treated as an independent generator
///
/// Atoms compare by a canonical text key, so equal subterms built from
/// different trees are the same generator.
#[derive(Debug, Clone)]
pub(crate) struct Atom {
    head: AtomHead,
    inner: Fraction,
    key: String,
}

impl Atom {
    fn new(head: AtomHead, inner: Fraction) -> Self {
        let key = match head {
            AtomHead::Function(function) => format!("{}({})", function, inner),
            AtomHead::Power(q) => format!("({})^{}", inner, format_coefficient(q)),
            AtomHead::Exponential(c) => format!("{}^({})", format_coefficient(c), inner),
        };
        Self { head, inner, key }
    }

    pub(crate) fn inner(&self) -> &Fraction {
        &self.inner
    }

    /// Values of the inner fraction for which the atom equals `value`
    pub(crate) fn invert(&self, value: f64) -> Vec<f64> {
        match self.head {
            AtomHead::Function(function) => function.inverse(value),
            AtomHead::Power(q) if value == 0.0 => {
                if q > 0.0 {
                    vec![0.0]
                } else {
                    Vec::new()
                }
            }
            AtomHead::Power(q) if q.fract() != 0.0 => {
                if value > 0.0 {
                    vec![value.powf(q.recip())]
                } else {
                    Vec::new()
                }
            }
            // integer exponents keep the sign information of the base
            AtomHead::Power(q) if q % 2.0 == 0.0 => {
                if value > 0.0 {
                    let root = value.powf(q.recip());
                    vec![-root, root]
                } else {
                    Vec::new()
                }
            }
            AtomHead::Power(q) => vec![value.signum() * value.abs().powf(q.recip())],
            AtomHead::Exponential(c) if value > 0.0 => vec![value.ln() / c.ln()],
            AtomHead::Exponential(_) => Vec::new(),
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Atom {}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Generator {
    Variable,
    Atom(Atom),
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Generator::Variable => write!(f, "x"),
            Generator::Atom(atom) => write!(f, "{}", atom.key),
        }
    }
}

/// Product of generators with their exponents
pub(crate) type Monomial = BTreeMap<Generator, u32>;

fn multiply_monomials(a: &Monomial, b: &Monomial) -> Monomial {
    let mut product = a.clone();
    for (generator, exponent) in b {
        *product.entry(generator.clone()).or_insert(0) += exponent;
    }
    product
}

/// Multivariate polynomial with floating-point coefficients
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Polynomial {
    terms: BTreeMap<Monomial, f64>,
}

impl Polynomial {
    pub(crate) fn constant(value: f64) -> Self {
        let mut terms = BTreeMap::new();
        if value != 0.0 {
            terms.insert(Monomial::new(), value);
        }
        Self { terms }
    }

    pub(crate) fn generator(generator: Generator) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::from([(generator, 1)]), 1.0);
        Self { terms }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self.terms.get(&Monomial::new()).copied(),
            _ => None,
        }
    }

    /// The generator itself when the polynomial is exactly `1 * g`
    fn as_generator(&self) -> Option<&Generator> {
        let (monomial, coefficient) = self.terms.first_key_value()?;
        if self.terms.len() != 1 || *coefficient != 1.0 || monomial.len() != 1 {
            return None;
        }
        monomial
            .first_key_value()
            .filter(|(_, exponent)| **exponent == 1)
            .map(|(generator, _)| generator)
    }

    /// Sums contributions per monomial, dropping the ones that cancel
    ///
    /// A sum is treated as zero when it is below [`ZERO_TOLERANCE`] of the
    /// absolute contributions to that same monomial, so small coefficients
    /// next to large ones survive.
    fn collect(contributions: impl IntoIterator<Item = (Monomial, f64)>) -> Self {
        let mut sums: BTreeMap<Monomial, (f64, f64)> = BTreeMap::new();
        for (monomial, c) in contributions {
            let (sum, size) = sums.entry(monomial).or_insert((0.0, 0.0));
            *sum += c;
            *size += c.abs();
        }
        let terms = sums
            .into_iter()
            .filter(|(_, (sum, size))| *sum != 0.0 && sum.abs() > ZERO_TOLERANCE * size)
            .map(|(monomial, (sum, _))| (monomial, sum))
            .collect();
        Self { terms }
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self::collect(
            self.terms
                .iter()
                .chain(&other.terms)
                .map(|(monomial, c)| (monomial.clone(), *c)),
        )
    }

    pub(crate) fn scaled(&self, factor: f64) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(monomial, c)| (monomial.clone(), c * factor))
            .filter(|(_, c)| *c != 0.0)
            .collect();
        Self { terms }
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        Self::collect(self.terms.iter().flat_map(|(a, ca)| {
            other
                .terms
                .iter()
                .map(move |(b, cb)| (multiply_monomials(a, b), ca * cb))
        }))
    }

    pub(crate) fn powi(&self, exponent: u32) -> Self {
        let mut result = Polynomial::constant(1.0);
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    pub(crate) fn generators(&self) -> BTreeSet<&Generator> {
        self.terms.keys().flat_map(|monomial| monomial.keys()).collect()
    }

    /// Dense coefficients, lowest degree first, of a polynomial in one generator
    pub(crate) fn coefficients(&self, generator: &Generator) -> Vec<f64> {
        let degree = self
            .terms
            .keys()
            .filter_map(|monomial| monomial.get(generator))
            .copied()
            .max()
            .unwrap_or(0);
        let mut coefficients = vec![0.0; degree as usize + 1];
        for (monomial, c) in &self.terms {
            let exponent = monomial.get(generator).copied().unwrap_or(0) as usize;
            if let Some(slot) = coefficients.get_mut(exponent) {
                *slot += c;
            }
        }
        coefficients
    }

    /// Splits off the generators that divide every term
    ///
    /// Returns those generators and the polynomial with the common monomial
    /// divided out.
    pub(crate) fn split_common_factor(&self) -> (Vec<Generator>, Polynomial) {
        let mut monomials = self.terms.keys();
        let Some(first) = monomials.next() else {
            return (Vec::new(), self.clone());
        };
        let mut common = first.clone();
        for monomial in monomials {
            common.retain(|generator, exponent| match monomial.get(generator) {
                Some(other) => {
                    *exponent = (*exponent).min(*other);
                    true
                }
                None => false,
            });
        }
        if common.is_empty() {
            return (Vec::new(), self.clone());
        }

        let terms = self
            .terms
            .iter()
            .map(|(monomial, c)| {
                let mut reduced = monomial.clone();
                for (generator, exponent) in &common {
                    if let Some(current) = reduced.get_mut(generator) {
                        *current -= exponent;
                    }
                }
                reduced.retain(|_, exponent| *exponent > 0);
                (reduced, *c)
            })
            .collect();
        (common.into_keys().collect(), Polynomial { terms })
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (index, (monomial, c)) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", format_coefficient(*c))?;
            for (generator, exponent) in monomial {
                if *exponent == 1 {
                    write!(f, "*{}", generator)?;
                } else {
                    write!(f, "*{}^{}", generator, exponent)?;
                }
            }
        }
        Ok(())
    }
}

/// Quotient of two polynomials; the denominator is never the zero polynomial
///
/// Constant denominators are folded into the numerator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fraction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl Fraction {
    fn new(numerator: Polynomial, denominator: Polynomial) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        if let Some(d) = denominator.as_constant() {
            return Some(Self::from_polynomial(numerator.scaled(d.recip())));
        }
        if numerator.is_zero() {
            return Some(Self::from_polynomial(numerator));
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    pub(crate) fn from_polynomial(numerator: Polynomial) -> Self {
        Self {
            numerator,
            denominator: Polynomial::constant(1.0),
        }
    }

    pub(crate) fn constant(value: f64) -> Self {
        Self::from_polynomial(Polynomial::constant(value))
    }

    fn atom(head: AtomHead, inner: Fraction) -> Self {
        Self::from_polynomial(Polynomial::generator(Generator::Atom(Atom::new(head, inner))))
    }

    pub(crate) fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    fn has_unit_denominator(&self) -> bool {
        self.denominator.as_constant() == Some(1.0)
    }

    pub(crate) fn as_constant(&self) -> Option<f64> {
        if self.has_unit_denominator() {
            self.numerator.as_constant()
        } else {
            None
        }
    }

    fn as_generator(&self) -> Option<&Generator> {
        if self.has_unit_denominator() {
            self.numerator.as_generator()
        } else {
            None
        }
    }

    pub(crate) fn add(&self, other: &Self) -> Option<Self> {
        if self.denominator == other.denominator {
            return Self::new(
                self.numerator.add(&other.numerator),
                self.denominator.clone(),
            );
        }
        Self::new(
            self.numerator
                .mul(&other.denominator)
                .add(&other.numerator.mul(&self.denominator)),
            self.denominator.mul(&other.denominator),
        )
    }

    pub(crate) fn sub(&self, other: &Self) -> Option<Self> {
        let negated = Self {
            numerator: other.numerator.scaled(-1.0),
            denominator: other.denominator.clone(),
        };
        self.add(&negated)
    }

    pub(crate) fn mul(&self, other: &Self) -> Option<Self> {
        Self::new(
            self.numerator.mul(&other.numerator),
            self.denominator.mul(&other.denominator),
        )
    }

    fn inverse(&self) -> Option<Self> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    fn powi(&self, exponent: i64) -> Option<Self> {
        let base = if exponent < 0 {
            self.inverse()?
        } else {
            self.clone()
        };
        let n = u32::try_from(exponent.unsigned_abs()).ok()?;
        Self::new(base.numerator.powi(n), base.denominator.powi(n))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.has_unit_denominator() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "({})/({})", self.numerator, self.denominator)
        }
    }
}

/// Brings symbolic expressions into rational canonical form
pub(crate) struct Canonicalizer {
    max_expanded_power: u32,
}

impl Canonicalizer {
    pub(crate) fn new(max_expanded_power: u32) -> Self {
        Self { max_expanded_power }
    }

    /// Canonical form of `expr`, or `None` when it has no real representation
    /// here (division by zero, undefined constants, variable exponents over
    /// non-positive bases).
    pub(crate) fn canonicalize(&self, expr: &SymbolicExpr) -> Option<Fraction> {
        match expr {
            SymbolicExpr::Constant(c) => c.is_finite().then(|| Fraction::constant(*c)),
            SymbolicExpr::Variable => Some(Fraction::from_polynomial(Polynomial::generator(
                Generator::Variable,
            ))),
            SymbolicExpr::Add(a, b) => self.canonicalize(a)?.add(&self.canonicalize(b)?),
            SymbolicExpr::Mul(a, b) => self.canonicalize(a)?.mul(&self.canonicalize(b)?),
            SymbolicExpr::Pow(base, exponent) => {
                self.power(self.canonicalize(base)?, &self.canonicalize(exponent)?)
            }
            SymbolicExpr::Apply(SymbolicFunction::Sqrt, argument) => {
                self.power(self.canonicalize(argument)?, &Fraction::constant(0.5))
            }
            SymbolicExpr::Apply(function, argument) => {
                let argument = self.canonicalize(argument)?;
                match argument.as_constant() {
                    Some(value) => function.apply(value).map(Fraction::constant),
                    None => Some(Fraction::atom(AtomHead::Function(*function), argument)),
                }
            }
        }
    }

    fn power(&self, base: Fraction, exponent: &Fraction) -> Option<Fraction> {
        let Some(q) = exponent.as_constant() else {
            let c = base.as_constant()?;
            if c == 1.0 {
                return Some(Fraction::constant(1.0));
            }
            return (c > 0.0).then(|| Fraction::atom(AtomHead::Exponential(c), exponent.clone()));
        };

        if let Some(c) = base.as_constant() {
            let value = c.powf(q);
            return value.is_finite().then(|| Fraction::constant(value));
        }

        // (g^p)^q is folded into g^(p*q)
        if let Some(Generator::Atom(atom)) = base.as_generator()
            && let AtomHead::Power(p) = atom.head
        {
            return self.power(atom.inner.clone(), &Fraction::constant(p * q));
        }

        if q.fract() == 0.0 && q.abs() <= f64::from(self.max_expanded_power) {
            return base.powi(q as i64);
        }
        Some(Fraction::atom(AtomHead::Power(q), base))
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{Atom, AtomHead, Canonicalizer, Fraction, Generator, Polynomial};
    use crate::symbolic::expr::SymbolicExpr;

    fn x() -> Polynomial {
        Polynomial::generator(Generator::Variable)
    }

    #[test]
    fn test_add_cancels_to_zero() {
        let p = x().add(&Polynomial::constant(3.0));
        let q = p.scaled(-1.0);
        assert!(p.add(&q).is_zero());
    }

    #[test]
    fn test_add_drops_rounding_noise() {
        let a = x().scaled(0.1).add(&x().scaled(0.2));
        let b = x().scaled(-0.3);
        assert!(a.add(&b).is_zero());
    }

    #[test]
    fn test_mul_and_coefficients() {
        let p = x().add(&Polynomial::constant(1.0));
        let q = x().add(&Polynomial::constant(-1.0));
        assert_eq!(p.mul(&q).coefficients(&Generator::Variable), vec![-1.0, 0.0, 1.0]);
        assert_eq!(p.powi(3).coefficients(&Generator::Variable), vec![1.0, 3.0, 3.0, 1.0]);
        assert_eq!(p.powi(0), Polynomial::constant(1.0));
    }

    #[test]
    fn test_small_coefficients_survive_next_to_large_ones() {
        let p = x().add(&Polynomial::constant(1.0)).powi(48);
        let coefficients = p.coefficients(&Generator::Variable);
        assert_eq!(coefficients.len(), 49);
        assert_eq!(coefficients.first(), Some(&1.0));
        assert_eq!(coefficients.get(1), Some(&48.0));
        assert_eq!(coefficients.get(47), Some(&48.0));
    }

    #[test]
    fn test_integer_power_inverse_keeps_sign() {
        let power = |q: f64| Atom::new(AtomHead::Power(q), Fraction::constant(0.0));
        assert_eq!(power(100.0).invert(1.0), vec![-1.0, 1.0]);
        assert!(power(100.0).invert(-1.0).is_empty());
        assert_eq!(power(65.0).invert(-1.0), vec![-1.0]);
        assert_eq!(power(-3.0).invert(-8.0), vec![-0.5]);
        assert_eq!(power(0.5).invert(3.0), vec![9.0]);
        assert!(power(0.5).invert(-3.0).is_empty());
        assert_eq!(power(70.0).invert(0.0), vec![0.0]);
        assert!(power(-2.0).invert(0.0).is_empty());
    }

    #[test]
    fn test_split_common_factor() {
        let p = x().powi(3).add(&x().scaled(-5.0));
        let (common, reduced) = p.split_common_factor();
        assert_eq!(common, vec![Generator::Variable]);
        assert_eq!(reduced.coefficients(&Generator::Variable), vec![-5.0, 0.0, 1.0]);
    }

    #[test]
    fn test_constant_function_arguments_are_folded() {
        let expr = SymbolicExpr::Apply(
            crate::symbolic::SymbolicFunction::Log10,
            Box::new(SymbolicExpr::Constant(100.0)),
        );
        let canonical = Canonicalizer::new(64).canonicalize(&expr);
        assert_eq!(canonical.and_then(|f| f.as_constant()), Some(2.0));
    }

    #[test]
    fn test_division_by_zero_has_no_form() {
        let expr = SymbolicExpr::Pow(
            Box::new(SymbolicExpr::Constant(0.0)),
            Box::new(SymbolicExpr::Constant(-1.0)),
        );
        assert!(Canonicalizer::new(64).canonicalize(&expr).is_none());
    }

    #[test]
    fn test_square_of_square_root_collapses() {
        let sqrt_x = SymbolicExpr::Apply(
            crate::symbolic::SymbolicFunction::Sqrt,
            Box::new(SymbolicExpr::Variable),
        );
        let squared = SymbolicExpr::Pow(Box::new(sqrt_x), Box::new(SymbolicExpr::Constant(2.0)));
        let canonical = Canonicalizer::new(64).canonicalize(&squared);
        assert_eq!(
            canonical.map(|f| f.numerator().clone()),
            Some(x())
        );
    }
}
