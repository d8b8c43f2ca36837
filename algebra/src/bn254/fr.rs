use crate::bigint::Bigint;
use crate::fp::{Fp, FpParameters, FP_LIMBS};

/// Parameters of the scalar field of BN254.
pub struct BN254FrParameters;

impl FpParameters for BN254FrParameters {
    const MODULUS: Bigint<FP_LIMBS> = Bigint::from_decimal(
        "21888242871839275222246405745257275088548364400416034343698204186575808495617",
    );
    const GENERATOR: Bigint<FP_LIMBS> = Bigint::from_u64(5);
    const NQR: Bigint<FP_LIMBS> = Bigint::from_u64(5);
}

/// The scalar field of BN254, i.e. the field of the group order `r`.
pub type BN254Scalar = Fp<BN254FrParameters>;

#[cfg(test)]
mod test {
    use super::BN254Scalar;
    use crate::prelude::*;
    use crate::traits::group_tests::{test_scalar_operations, test_scalar_serialization};

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<BN254Scalar>();
    }

    #[test]
    fn test_scalar_serialization_formats() {
        test_scalar_serialization::<BN254Scalar>();
    }

    #[test]
    fn scalar_from_to_bytes() {
        let small_value = BN254Scalar::from(165747u32);
        let small_value_bytes = small_value.to_bytes();
        let mut expected = [0u8; 32];
        expected[29..].copy_from_slice(&[0x02, 0x87, 0x73]);
        assert_eq!(small_value_bytes, expected);
        assert_eq!(
            BN254Scalar::from_bytes(&small_value_bytes).unwrap(),
            small_value
        );
    }

    #[test]
    fn root_of_unity() {
        let root = BN254Scalar::two_adic_root_of_unity();
        let expected: BN254Scalar =
            "19103219067921713944291392827692070036145651957329286315305642004821462161904"
                .parse()
                .unwrap();
        assert_eq!(root, expected);

        let mut x = root;
        for _ in 0..27 {
            x = x.square();
        }
        assert_eq!(x, -BN254Scalar::one());
        assert!(x.square().is_one());
    }
}
