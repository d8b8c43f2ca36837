use crate::bigint::Bigint;
use crate::bn254::{BN254Fq, BN254Fq2, BN254Scalar};
use crate::prelude::*;
use crate::short_weierstrass::{Jacobian, SWCurveConfig};
use num_bigint::BigUint;

/// The sextic twist `y^2 = x^3 + 3 / (9 + u)` over Fq2.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BN254G2Config;

impl SWCurveConfig for BN254G2Config {
    type BaseField = BN254Fq2;
    const COEFF_B: BN254Fq2 = fq2!(
        "19485874751759354771024239261021720505790618469301721065564631296452457478373",
        "266929791119991161246907387137283842545076965332900288569378510910307636690"
    );
    const GENERATOR_X: BN254Fq2 = fq2!(
        "10857046999023057135944570762232829481370756359578518086990519993285655852781",
        "11559732032986387107991004021392285783925812861821192530917403151452391805634"
    );
    const GENERATOR_Y: BN254Fq2 = fq2!(
        "8495653923123431417604973247489272438418190587263600148770280649306958101930",
        "4082367875863433681332203403145435568316851327593401208105741076214120093531"
    );
}

/// `xi^((q - 1) / 3)`, the x-coordinate factor of the twisted Frobenius.
pub(crate) const TWIST_MUL_BY_Q_X: BN254Fq2 = fq2!(
    "21575463638280843010398324269430826099269044274347216827212613867836435027261",
    "10307601595873709700152284273816112264069230130616436755625194854815875713954"
);

/// `xi^((q - 1) / 2)`, the y-coordinate factor of the twisted Frobenius.
pub(crate) const TWIST_MUL_BY_Q_Y: BN254Fq2 = fq2!(
    "2821565182194536844548159561693502659359617185244120367078079554186484126554",
    "3505843767911556378687030309984248845540243509899259641013678093033130930403"
);

/// The second source group of the pairing, in Jacobian coordinates.
pub type BN254G2 = Jacobian<BN254G2Config>;

const BN254_G2_COMPRESSED_TAG: u8 = 0x0a;

impl BN254G2 {
    /// The untwist-Frobenius-twist endomorphism, which acts as
    /// multiplication by `q` on the prime order subgroup.
    pub fn mul_by_q(&self) -> Self {
        Self::new_unchecked(
            TWIST_MUL_BY_Q_X * self.x.frobenius_map(1),
            TWIST_MUL_BY_Q_Y * self.y.frobenius_map(1),
            self.z.frobenius_map(1),
        )
    }

    /// Check that `r * P` is the identity.
    pub fn is_in_subgroup(&self) -> bool {
        self.mul_limbs(&BN254Scalar::MODULUS.0).is_zero()
    }
}

/// Pack `c1 * q + c0` into 64 big-endian bytes.
fn fq2_to_packed_bytes(x: &BN254Fq2) -> Vec<u8> {
    let q: BigUint = BN254Fq::MODULUS.into();
    let packed = BigUint::from(x.c1) * q + BigUint::from(x.c0);
    let digits = packed.to_bytes_be();
    let mut bytes = vec![0u8; 64 - digits.len()];
    bytes.extend_from_slice(&digits);
    bytes
}

/// Inverse of `fq2_to_packed_bytes`, rejecting values with `c1 >= q`.
fn fq2_from_packed_bytes(bytes: &[u8]) -> Result<BN254Fq2> {
    let packed = Bigint::<8>::from_bytes_be(bytes)?;
    let (c1, c0) = packed
        .div_qr::<4, 8>(&BN254Fq::MODULUS)
        .map_err(|_| AlgebraError::DeserializationError)?;
    let c1 = c1
        .shorten::<4>(&BN254Fq::MODULUS)
        .map_err(|_| AlgebraError::DeserializationError)?;
    Ok(BN254Fq2::new(
        BN254Fq::from_bigint(c0)?,
        BN254Fq::from_bigint(c1)?,
    ))
}

impl Group for BN254G2 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 65;
    const UNCOMPRESSED_LEN: usize = 128;

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
            bytes[0] = BN254_G2_COMPRESSED_TAG | y.is_lexicographically_largest() as u8;
            bytes[1..].copy_from_slice(&fq2_to_packed_bytes(&x));
        }
        bytes
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        match bytes[0] {
            0x00 if bytes[1..].iter().all(|b| *b == 0) => Ok(Self::zero()),
            tag if tag & !1 == BN254_G2_COMPRESSED_TAG => {
                let x = fq2_from_packed_bytes(&bytes[1..])?;
                let rhs = x.square() * x + BN254G2Config::COEFF_B;
                let mut y = rhs
                    .sqrt()
                    .map_err(|_| AlgebraError::DecompressElementError)?;
                if y.is_lexicographically_largest() != (tag & 1 == 1) {
                    y = -y;
                }
                let point = Self::from_affine_unchecked(x, y);
                if !point.is_in_subgroup() {
                    return Err(AlgebraError::NotInSubgroup);
                }
                Ok(point)
            }
            _ => Err(AlgebraError::DeserializationError),
        }
    }

    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::UNCOMPRESSED_LEN);
        match self.to_affine_coordinates() {
            Some((x, y)) => {
                for c in [x.c0, x.c1, y.c0, y.c1] {
                    bytes.extend_from_slice(&c.to_bytes());
                }
            }
            None => bytes.resize(Self::UNCOMPRESSED_LEN, 0),
        }
        bytes
    }

    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::UNCOMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut coords = [BN254Fq::zero(); 4];
        for (c, chunk) in coords.iter_mut().zip(bytes.chunks(32)) {
            *c = BN254Fq::from_bytes(chunk)?;
        }
        let x = BN254Fq2::new(coords[0], coords[1]);
        let y = BN254Fq2::new(coords[2], coords[3]);
        if x.is_zero() && y.is_zero() {
            Ok(Self::zero())
        } else {
            Ok(Self::from_affine_unchecked(x, y))
        }
    }
}
