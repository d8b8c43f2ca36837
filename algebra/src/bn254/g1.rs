use crate::bn254::{BN254Fq, BN254Scalar};
use crate::prelude::*;
use crate::short_weierstrass::{Jacobian, SWCurveConfig};

/// The curve `y^2 = x^3 + 3` over Fq, with generator `(1, 2)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BN254G1Config;

impl SWCurveConfig for BN254G1Config {
    type BaseField = BN254Fq;
    const COEFF_B: BN254Fq = BN254Fq::from_decimal("3");
    const GENERATOR_X: BN254Fq = BN254Fq::from_decimal("1");
    const GENERATOR_Y: BN254Fq = BN254Fq::from_decimal("2");
}

/// The first source group of the pairing, in Jacobian coordinates.
pub type BN254G1 = Jacobian<BN254G1Config>;

const BN254_G1_COMPRESSED_TAG: u8 = 0x02;

impl Group for BN254G1 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 33;
    const UNCOMPRESSED_LEN: usize = 64;

    #[inline]
    fn double(&self) -> Self {
        Jacobian::double(self)
    }

    #[inline]
    fn get_identity() -> Self {
        Self::zero()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_zero()
    }

    #[inline]
    fn get_base() -> Self {
        Self::generator()
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::generator().mul(&BN254Scalar::random(rng))
    }

    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::COMPRESSED_LEN];
        if let Some((x, y)) = self.to_affine_coordinates() {
            bytes[0] = BN254_G1_COMPRESSED_TAG | y.is_odd() as u8;
            bytes[1..].copy_from_slice(&x.to_bytes());
        }
        bytes
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        match bytes[0] {
            0x00 if bytes[1..].iter().all(|b| *b == 0) => Ok(Self::zero()),
            tag if tag & !1 == BN254_G1_COMPRESSED_TAG => {
                let x = BN254Fq::from_bytes(&bytes[1..])?;
                let rhs = x.square() * x + BN254G1Config::COEFF_B;
                let mut y = rhs
                    .sqrt()
                    .map_err(|_| AlgebraError::DecompressElementError)?;
                if y.is_odd() != (tag & 1 == 1) {
                    y = -y;
                }
                Ok(Self::from_affine_unchecked(x, y))
            }
            _ => Err(AlgebraError::DeserializationError),
        }
    }

    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::UNCOMPRESSED_LEN];
        if let Some((x, y)) = self.to_affine_coordinates() {
            bytes[..32].copy_from_slice(&x.to_bytes());
            bytes[32..].copy_from_slice(&y.to_bytes());
        }
        bytes
    }

    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::UNCOMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let x = BN254Fq::from_bytes(&bytes[..32])?;
        let y = BN254Fq::from_bytes(&bytes[32..])?;
        // (0, 0) is not on the curve, so it encodes the identity.
        if x.is_zero() && y.is_zero() {
            Ok(Self::zero())
        } else {
            Ok(Self::from_affine_unchecked(x, y))
        }
    }
}

#[cfg(test)]
mod test {
    use super::BN254G1;
    use crate::bn254::{BN254Fq, BN254Scalar};
    use crate::prelude::*;

    #[test]
    fn compressed_encoding() {
        let mut prng = test_rng();
        for _ in 0..1000 {
            let p = BN254G1::random(&mut prng);
            let bytes = p.to_compressed_bytes();
            assert_eq!(bytes.len(), 33);
            assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
            assert_eq!(BN254G1::from_compressed_bytes(&bytes).unwrap(), p);
        }

        let identity = BN254G1::get_identity().to_compressed_bytes();
        assert_eq!(identity, vec![0u8; 33]);
        assert!(BN254G1::from_compressed_bytes(&identity)
            .unwrap()
            .is_identity());

        let base = BN254G1::get_base().to_compressed_bytes();
        let mut expected = vec![0u8; 33];
        expected[0] = 0x02;
        expected[32] = 1;
        assert_eq!(base, expected);
    }

    #[test]
    fn compressed_decoding_errors() {
        let base = BN254G1::get_base().to_compressed_bytes();
        assert_eq!(
            BN254G1::from_compressed_bytes(&base[..32]),
            Err(AlgebraError::DeserializationError)
        );

        let mut bad_tag = base.clone();
        bad_tag[0] = 0x04;
        assert_eq!(
            BN254G1::from_compressed_bytes(&bad_tag),
            Err(AlgebraError::DeserializationError)
        );

        let mut bad_identity = vec![0u8; 33];
        bad_identity[5] = 1;
        assert!(BN254G1::from_compressed_bytes(&bad_identity).is_err());

        let mut x_too_large = vec![0xffu8; 33];
        x_too_large[0] = 0x02;
        assert_eq!(
            BN254G1::from_compressed_bytes(&x_too_large),
            Err(AlgebraError::DeserializationError)
        );

        // q + 1 reduces to the generator's x, but is not canonical.
        let mut q_plus_one = vec![0x02u8];
        q_plus_one.extend(BN254Fq::MODULUS.to_bytes_be());
        q_plus_one[32] += 1;
        assert_eq!(
            BN254G1::from_compressed_bytes(&q_plus_one),
            Err(AlgebraError::DeserializationError)
        );

        // x = 4 gives 67, which is not a square mod q.
        let mut not_on_curve = vec![0u8; 33];
        not_on_curve[0] = 0x02;
        not_on_curve[32] = 4;
        assert_eq!(
            BN254G1::from_compressed_bytes(&not_on_curve),
            Err(AlgebraError::DecompressElementError)
        );
    }

    #[test]
    fn unchecked_encoding() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let bytes = p.to_unchecked_bytes();
        assert_eq!(bytes.len(), BN254G1::unchecked_size());
        assert_eq!(BN254G1::from_unchecked_bytes(&bytes).unwrap(), p);
        let zero = BN254G1::get_identity().to_unchecked_bytes();
        assert!(BN254G1::from_unchecked_bytes(&zero)
            .unwrap()
            .is_identity());
    }

    #[test]
    fn generator_has_order_r() {
        let g = BN254G1::get_base();
        assert!(g.is_well_formed());
        assert_eq!(
            g.mul_limbs(&BN254Scalar::MODULUS.0),
            BN254G1::get_identity()
        );
        let (x, y) = g.to_affine_coordinates().unwrap();
        assert_eq!(x, BN254Fq::one());
        assert_eq!(y, BN254Fq::from(2u32));
    }

    #[test]
    fn serde_round_trip() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<BN254G1>(&json).unwrap(), p);
        let bin = bincode::serialize(&p).unwrap();
        assert_eq!(bincode::deserialize::<BN254G1>(&bin).unwrap(), p);
    }
}
