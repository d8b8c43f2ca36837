use crate::bn254::{BN254Fq, BN254Fq12, BN254Fq2, BN254Fq6, BN254Scalar};
use crate::prelude::*;

/// The target group of the pairing, the order-r subgroup of `Fq12^*`.
///
/// It is written additively like the source groups: `add` multiplies,
/// `neg` conjugates and `mul` by a scalar exponentiates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BN254Gt(pub(crate) BN254Fq12);

/// The reduced pairing of the two fixed generators.
const BN254_GT_BASE: BN254Fq12 = BN254Fq12::new(
    BN254Fq6::new(
        fq2!(
            "17264119758069723980713015158403419364912226240334615592005620718956030922389",
            "1300711225518851207585954685848229181392358478699795190245709208408267917898"
        ),
        fq2!(
            "8894217292938489450175280157304813535227569267786222825147475294561798790624",
            "1829859855596098509359522796979920150769875799037311140071969971193843357227"
        ),
        fq2!(
            "4968700049505451466697923764727215585075098085662966862137174841375779106779",
            "12814315002058128940449527172080950701976819591738376253772993495204862218736"
        ),
    ),
    BN254Fq6::new(
        fq2!(
            "4233474252585134102088637248223601499779641130562251948384759786370563844606",
            "9420544134055737381096389798327244442442230840902787283326002357297404128074"
        ),
        fq2!(
            "13457906610892676317612909831857663099224588803620954529514857102808143524905",
            "5122435115068592725432309312491733755581898052459744089947319066829791570839"
        ),
        fq2!(
            "8891987925005301465158626530377582234132838601606565363865129986128301774627",
            "440796048150724096437130979851431985500142692666486515369083499585648077975"
        ),
    ),
);

const BN254_GT_LEN: usize = 12 * 32;

impl BN254Gt {
    /// Wrap a field element that is known to lie in the target group.
    #[inline]
    pub fn from_fq12_unchecked(value: BN254Fq12) -> Self {
        Self(value)
    }

    /// The underlying field element.
    #[inline]
    pub fn as_fq12(&self) -> &BN254Fq12 {
        &self.0
    }

    /// Whether `x^r = 1`.
    pub fn is_in_subgroup(&self) -> bool {
        self.0.pow(&BN254Scalar::MODULUS.0).is_one()
    }

    fn coefficients(&self) -> [BN254Fq; 12] {
        let mut res = [BN254Fq::zero(); 12];
        let c6 = [self.0.c0, self.0.c1];
        for (i, c) in c6.iter().enumerate() {
            for (j, c2) in [c.c0, c.c1, c.c2].iter().enumerate() {
                res[6 * i + 2 * j] = c2.c0;
                res[6 * i + 2 * j + 1] = c2.c1;
            }
        }
        res
    }

    fn from_coefficients(c: &[BN254Fq; 12]) -> Self {
        let fq6 = |o: usize| {
            BN254Fq6::new(
                BN254Fq2::new(c[o], c[o + 1]),
                BN254Fq2::new(c[o + 2], c[o + 3]),
                BN254Fq2::new(c[o + 4], c[o + 5]),
            )
        };
        Self(BN254Fq12::new(fq6(0), fq6(6)))
    }
}

impl Default for BN254Gt {
    fn default() -> Self {
        Self(BN254Fq12::one())
    }
}

impl<'a> Add<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> Sub<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 * rhs.0.unitary_inverse())
    }
}

impl<'a> AddAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 *= &rhs.0;
    }
}

impl<'a> SubAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 *= &rhs.0.unitary_inverse();
    }
}

impl Neg for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.unitary_inverse())
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Gt {
    type Output = BN254Gt;

    fn mul(self, rhs: &BN254Scalar) -> Self::Output {
        let limbs = rhs.get_little_endian_u64();
        let mut acc = BN254Fq12::one();
        let mut found_one = false;
        for limb in limbs.iter().rev() {
            for i in (0..64).rev() {
                if found_one {
                    acc = acc.cyclotomic_square();
                }
                if (limb >> i) & 1 == 1 {
                    found_one = true;
                    acc *= &self.0;
                }
            }
        }
        Self(acc)
    }
}

impl Group for BN254Gt {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = BN254_GT_LEN;
    const UNCOMPRESSED_LEN: usize = BN254_GT_LEN;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.cyclotomic_square())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(BN254Fq12::one())
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.0.is_one()
    }

    #[inline]
    fn get_base() -> Self {
        Self(BN254_GT_BASE)
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::get_base().mul(&BN254Scalar::random(rng))
    }

    fn to_compressed_bytes(&self) -> Vec<u8> {
        self.to_unchecked_bytes()
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let res = Self::from_unchecked_bytes(bytes)?;
        if !res.is_in_subgroup() {
            return Err(AlgebraError::NotInSubgroup);
        }
        Ok(res)
    }

    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BN254_GT_LEN);
        for c in self.coefficients().iter() {
            bytes.extend_from_slice(&c.to_bytes());
        }
        bytes
    }

    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BN254_GT_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut coefficients = [BN254Fq::zero(); 12];
        for (c, chunk) in coefficients.iter_mut().zip(bytes.chunks(32)) {
            *c = BN254Fq::from_bytes(chunk)?;
        }
        Ok(Self::from_coefficients(&coefficients))
    }
}

#[cfg(test)]
mod test {
    use super::BN254Gt;
    use crate::bn254::{BN254Fq12, BN254Scalar};
    use crate::prelude::*;

    #[test]
    fn base_has_order_r() {
        let base = BN254Gt::get_base();
        assert!(!base.is_identity());
        assert!(base.is_in_subgroup());
        assert_eq!(base.mul(&-BN254Scalar::one()), base.neg());
    }

    #[test]
    fn additive_notation() {
        let mut prng = test_rng();
        let a = BN254Gt::random(&mut prng);
        let b = BN254Gt::random(&mut prng);
        let s = BN254Scalar::random(&mut prng);
        assert_eq!(a + &b, b + &a);
        assert_eq!(a - &a, BN254Gt::get_identity());
        assert_eq!(a.double(), a + &a);
        assert_eq!((a + &b).mul(&s), a.mul(&s) + &b.mul(&s));
        assert_eq!(a.mul(&BN254Scalar::from(3u32)), a + &a + &a);
    }

    #[test]
    fn encoding() {
        let mut prng = test_rng();
        let a = BN254Gt::random(&mut prng);
        let bytes = a.to_compressed_bytes();
        assert_eq!(bytes.len(), 384);
        assert_eq!(BN254Gt::from_compressed_bytes(&bytes).unwrap(), a);

        let outside = BN254Gt::from_fq12_unchecked(BN254Fq12::rand(&mut prng));
        assert_eq!(
            BN254Gt::from_compressed_bytes(&outside.to_compressed_bytes()),
            Err(AlgebraError::NotInSubgroup)
        );
        assert_eq!(
            BN254Gt::from_compressed_bytes(&bytes[1..]),
            Err(AlgebraError::DeserializationError)
        );
    }
}
