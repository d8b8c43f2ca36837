use crate::bn254::BN254Fq;
use crate::prelude::*;
use crate::traits::LegendreSymbol;
use ark_std::fmt;

/// The quadratic extension `Fq[u] / (u^2 + 1)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BN254Fq2 {
    /// The constant coefficient.
    pub c0: BN254Fq,
    /// The coefficient of `u`.
    pub c1: BN254Fq,
}

/// The non-residue `xi = 9 + u` that defines the sextic twist.
pub const FQ2_NONRESIDUE: BN254Fq2 = BN254Fq2::new(BN254Fq::from_decimal("9"), BN254Fq::one());

impl BN254Fq2 {
    /// Build an element from its two coefficients.
    #[inline]
    pub const fn new(c0: BN254Fq, c1: BN254Fq) -> Self {
        Self { c0, c1 }
    }

    /// Embed an element of the base field.
    #[inline]
    pub const fn from_base(c0: BN254Fq) -> Self {
        Self::new(c0, BN254Fq::zero())
    }

    /// Multiply by `xi = 9 + u`.
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Self {
        // (a0 + a1 u)(9 + u) = (9 a0 - a1) + (a0 + 9 a1) u
        let nine = |x: &BN254Fq| x.double().double().double() + x;
        Self::new(nine(&self.c0) - self.c1, self.c0 + nine(&self.c1))
    }

    /// Multiply both coefficients by a base field element.
    #[inline]
    pub fn mul_by_fp(&self, other: &BN254Fq) -> Self {
        Self::new(self.c0 * other, self.c1 * other)
    }

    /// Return `c0 - c1 u`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// The norm `c0^2 + c1^2` down to the base field.
    #[inline]
    pub fn norm(&self) -> BN254Fq {
        self.c0.square() + self.c1.square()
    }

    /// The quadratic character, computed on the norm.
    pub fn legendre(&self) -> LegendreSymbol {
        self.norm().legendre()
    }

    /// Return a square root, failing if the element is not a square.
    pub fn sqrt(&self) -> Result<Self> {
        if self.c1.is_zero() {
            return if self.c0.legendre() != LegendreSymbol::QuadraticNonResidue {
                Ok(Self::new(self.c0.sqrt()?, BN254Fq::zero()))
            } else {
                // -1 is not a square in Fq, so u * sqrt(-c0) works.
                Ok(Self::new(BN254Fq::zero(), (-self.c0).sqrt()?))
            };
        }

        let alpha = self.norm().sqrt()?;
        let two_inv = BN254Fq::from(2u32).inverse()?;
        let mut delta = (self.c0 + alpha) * two_inv;
        if delta.legendre() != LegendreSymbol::QuadraticResidue {
            delta = (self.c0 - alpha) * two_inv;
        }
        let x0 = delta.sqrt()?;
        let x1 = self.c1 * x0.double().inverse()?;
        Ok(Self::new(x0, x1))
    }

    /// Whether the element is lexicographically larger than its negation,
    /// comparing `c1` first and then `c0`.
    pub fn is_lexicographically_largest(&self) -> bool {
        let neg = -*self;
        match self.c1.cmp(&neg.c1) {
            ark_std::cmp::Ordering::Greater => true,
            ark_std::cmp::Ordering::Less => false,
            ark_std::cmp::Ordering::Equal => self.c0 > neg.c0,
        }
    }

    pub(crate) fn is_zero_inner(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    pub(crate) fn add_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 + other.c0, self.c1 + other.c1)
    }

    pub(crate) fn sub_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 - other.c0, self.c1 - other.c1)
    }

    pub(crate) fn neg_inner(&self) -> Self {
        Self::new(-self.c0, -self.c1)
    }

    pub(crate) fn mul_inner(&self, other: &Self) -> Self {
        // Karatsuba with u^2 = -1.
        let v0 = self.c0 * other.c0;
        let v1 = self.c1 * other.c1;
        let c1 = (self.c0 + self.c1) * (other.c0 + other.c1) - v0 - v1;
        Self::new(v0 - v1, c1)
    }
}

impl fmt::Debug for BN254Fq2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq2({} + {} * u)", self.c0, self.c1)
    }
}

impl_extension_field_ops!(BN254Fq2, BN254Fq2::from_base(BN254Fq::one()));

impl UniformRand for BN254Fq2 {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(BN254Fq::rand(rng), BN254Fq::rand(rng))
    }
}

impl Field for BN254Fq2 {
    #[inline]
    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    #[inline]
    fn square(&self) -> Self {
        // (a0 + a1 u)^2 = (a0 + a1)(a0 - a1) + 2 a0 a1 u
        let c0 = (self.c0 + self.c1) * (self.c0 - self.c1);
        let c1 = (self.c0 * self.c1).double();
        Self::new(c0, c1)
    }

    fn inverse(&self) -> Result<Self> {
        let t = self.norm().inverse()?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    #[inline]
    fn frobenius_map(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod test {
    use super::{BN254Fq2, FQ2_NONRESIDUE};
    use crate::bn254::BN254Fq;
    use crate::prelude::*;

    #[test]
    fn field_axioms() {
        let mut prng = test_rng();
        for _ in 0..10 {
            let a = BN254Fq2::rand(&mut prng);
            let b = BN254Fq2::rand(&mut prng);
            let c = BN254Fq2::rand(&mut prng);
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a.square(), a * a);
            assert_eq!(a.double(), a + a);
            assert!((a * a.inverse().unwrap()).is_one());
            assert_eq!(a.mul_by_nonresidue(), a * FQ2_NONRESIDUE);
            assert_eq!(a - a, BN254Fq2::zero());
        }
        assert_eq!(BN254Fq2::zero().inverse(), Err(AlgebraError::ZeroInversion));
    }

    #[test]
    fn u_squares_to_minus_one() {
        let u = BN254Fq2::new(BN254Fq::zero(), BN254Fq::one());
        assert_eq!(u.square(), -BN254Fq2::one());
    }

    #[test]
    fn frobenius_is_qth_power() {
        let mut prng = test_rng();
        let a = BN254Fq2::rand(&mut prng);
        let q = BN254Fq::MODULUS;
        assert_eq!(a.frobenius_map(1), a.pow(&q.0));
        assert_eq!(a.frobenius_map(2), a);
    }

    #[test]
    fn square_roots() {
        let mut prng = test_rng();
        for _ in 0..10 {
            let a = BN254Fq2::rand(&mut prng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == -a);
            assert_eq!(sq.legendre(), LegendreSymbol::QuadraticResidue);
        }
        let base_only = BN254Fq2::from_base(-BN254Fq::from(4u32));
        assert_eq!(base_only.sqrt().unwrap().square(), base_only);
        assert_eq!(FQ2_NONRESIDUE.sqrt(), Err(AlgebraError::NotASquare));
    }
}
