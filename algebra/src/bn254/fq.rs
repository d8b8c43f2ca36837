use crate::bigint::Bigint;
use crate::fp::{Fp, FpParameters, FP_LIMBS};

/// Parameters of the base field of BN254.
pub struct BN254FqParameters;

impl FpParameters for BN254FqParameters {
    const MODULUS: Bigint<FP_LIMBS> = Bigint::from_decimal(
        "21888242871839275222246405745257275088696311157297823662689037894645226208583",
    );
    const GENERATOR: Bigint<FP_LIMBS> = Bigint::from_u64(3);
    // 3 is a non-residue since q = 3 mod 4 and q = 7 mod 12.
    const NQR: Bigint<FP_LIMBS> = Bigint::from_u64(3);
}

/// The base field of BN254, over which G1 is defined.
pub type BN254Fq = Fp<BN254FqParameters>;
