/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// Build a constant `BN254Fq2` from the decimal strings of its coefficients.
macro_rules! fq2 {
    ($c0:expr, $c1:expr) => {
        $crate::bn254::BN254Fq2::new(
            $crate::bn254::BN254Fq::from_decimal($c0),
            $crate::bn254::BN254Fq::from_decimal($c1),
        )
    };
}

/// Arithmetic operator impls for an extension field with `add_inner`,
/// `sub_inner`, `mul_inner`, `neg_inner` and `is_zero_inner`.
macro_rules! impl_extension_field_ops {
    ($t:ident, $one:expr) => {
        impl Zero for $t {
            #[inline]
            fn zero() -> Self {
                Self::default()
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.is_zero_inner()
            }
        }

        impl One for $t {
            #[inline]
            fn one() -> Self {
                $one
            }
        }

        impl Add for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.add_inner(&rhs)
            }
        }

        impl<'a> Add<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: &Self) -> Self {
                self.add_inner(rhs)
            }
        }

        impl<'a> AddAssign<&'a $t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                *self = self.add_inner(rhs);
            }
        }

        impl Sub for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.sub_inner(&rhs)
            }
        }

        impl<'a> Sub<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: &Self) -> Self {
                self.sub_inner(rhs)
            }
        }

        impl<'a> SubAssign<&'a $t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: &Self) {
                *self = self.sub_inner(rhs);
            }
        }

        impl Mul for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.mul_inner(&rhs)
            }
        }

        impl<'a> Mul<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: &Self) -> Self {
                self.mul_inner(rhs)
            }
        }

        impl<'a> MulAssign<&'a $t> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: &Self) {
                *self = self.mul_inner(rhs);
            }
        }

        impl Neg for $t {
            type Output = $t;

            #[inline]
            fn neg(self) -> Self {
                self.neg_inner()
            }
        }

        impl Sum<$t> for $t {
            fn sum<I: Iterator<Item = $t>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc.add_inner(&x))
            }
        }

        impl<'a> Sum<&'a $t> for $t {
            fn sum<I: Iterator<Item = &'a $t>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc.add_inner(x))
            }
        }
    };
}

mod fr;
pub use fr::*;

mod fq;
pub use fq::*;

mod fq2;
pub use fq2::*;

mod fq6;
pub use fq6::*;

mod fq12;
pub use fq12::*;

mod g1;
pub use g1::*;

mod g2;
pub use g2::*;

mod gt;
pub use gt::*;

mod pairing;
pub use pairing::*;
