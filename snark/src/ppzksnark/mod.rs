//! The r1cs_ppzksnark of Parno, Howell, Gentry and Raykova, in the variant of
//! Ben-Sasson, Chiesa, Tromer and Virza.
//!
//! The generator turns a constraint system into a proving key and a
//! verification key. The prover uses the proving key to produce a constant
//! size [`Proof`] for a primary input and a satisfying auxiliary input, and
//! the verifier checks it with five pairing-product equations.

mod generator;
mod keys;
mod knowledge_commitment;
mod proof;
mod prover;
mod sparse_vector;
mod verifier;

pub use generator::{dummy_verification_key, generate, generate_with_trapdoor, Trapdoor};
pub use keys::{KeyPair, ProcessedVerificationKey, ProvingKey, VerificationKey};
pub use knowledge_commitment::{
    batch_to_special, kc_batch_exp, kc_multi_exp_with_mixed_addition, KnowledgeCommitment,
    KnowledgeCommitmentVector,
};
pub use proof::{Proof, PROOF_LEN};
pub use prover::prove;
pub use sparse_vector::{AccumulationVector, SparseVector};
pub use verifier::{
    online_verify_strong_ic, online_verify_weak_ic, process_vk, verify_strong_ic,
    verify_weak_ic,
};

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::SnarkError;
    use crate::qap::instance_map_with_evaluation;
    use crate::r1cs::{
        generate_r1cs_example_with_binary_input, generate_r1cs_example_with_field_input,
        R1CSExample,
    };
    use pghr_algebra::{
        bn254::{BN254Scalar, BN254G1, BN254G2},
        prelude::*,
    };

    fn run(example: &R1CSExample<BN254Scalar>) {
        let mut prng = test_rng();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        assert_eq!(
            keys.vk.encoded_ic_query.domain_size(),
            example.primary_input.len()
        );

        let proof = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        assert!(verify_strong_ic(&keys.vk, &example.primary_input, &proof));
        assert!(verify_weak_ic(&keys.vk, &example.primary_input, &proof));

        let pvk = process_vk(&keys.vk);
        assert!(online_verify_strong_ic(&pvk, &example.primary_input, &proof));
        assert!(online_verify_weak_ic(&pvk, &example.primary_input, &proof));

        // the keys and the proof survive their byte encodings
        let vk = VerificationKey::from_bytes(&keys.vk.to_bytes()).unwrap();
        let proof = Proof::from_bytes(&proof.to_bytes()).unwrap();
        assert!(verify_strong_ic(&vk, &example.primary_input, &proof));
        let pk = ProvingKey::from_bytes(&keys.pk.to_bytes()).unwrap();
        assert_eq!(pk, keys.pk);
    }

    #[test]
    fn completeness_with_field_input() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(100, 10, &mut prng).unwrap();
        run(&example);
    }

    #[test]
    fn completeness_with_binary_input() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_binary_input(100, 10, &mut prng).unwrap();
        run(&example);
    }

    #[test]
    fn completeness_without_input() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(16, 0, &mut prng).unwrap();
        run(&example);
    }

    #[test]
    fn wrong_input_is_rejected() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(30, 4, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        let proof = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();

        let mut wrong = example.primary_input.clone();
        wrong[2].add_assign(&BN254Scalar::one());
        assert!(!verify_strong_ic(&keys.vk, &wrong, &proof));
        assert!(!verify_weak_ic(&keys.vk, &wrong, &proof));

        // too long for the key
        let mut long = example.primary_input.clone();
        long.push(BN254Scalar::zero());
        assert!(!verify_strong_ic(&keys.vk, &long, &proof));
        assert!(!verify_weak_ic(&keys.vk, &long, &proof));

        // shorter inputs pass the weak check only when the dropped tail is zero
        let short = &example.primary_input[..3];
        assert!(!verify_strong_ic(&keys.vk, short, &proof));
        assert!(!verify_weak_ic(&keys.vk, short, &proof));
    }

    #[test]
    fn weak_ic_pads_with_zeros() {
        let mut prng = test_rng();
        let mut example = generate_r1cs_example_with_binary_input(30, 4, &mut prng).unwrap();
        // find an example whose last input bit is zero
        while example.primary_input[3] != BN254Scalar::zero() {
            example = generate_r1cs_example_with_binary_input(30, 4, &mut prng).unwrap();
        }
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        let proof = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        let short = &example.primary_input[..3];
        assert!(verify_weak_ic(&keys.vk, short, &proof));
        assert!(!verify_strong_ic(&keys.vk, short, &proof));
    }

    #[test]
    fn tampered_proofs_are_rejected() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(20, 3, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        let proof = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        let input = &example.primary_input;
        let g1 = BN254G1::get_base();

        let mut bad = proof;
        bad.g_a.g = bad.g_a.g.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_a.h = bad.g_a.h.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_b.g = bad.g_b.g.add(&BN254G2::get_base());
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_b.h = bad.g_b.h.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_c.g = bad.g_c.g.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_c.h = bad.g_c.h.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_h = bad.g_h.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        let mut bad = proof;
        bad.g_k = bad.g_k.add(&g1);
        assert!(!verify_strong_ic(&keys.vk, input, &bad));

        // a proof for another key fails too
        let other = generate(&example.constraint_system, &mut prng).unwrap();
        assert!(!verify_strong_ic(&other.vk, input, &proof));
    }

    #[test]
    fn malformed_proof_is_rejected() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(10, 2, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        let mut proof = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        proof.g_h = BN254G1::from_affine_unchecked(proof.g_h.x, proof.g_h.x);
        assert!(!proof.is_well_formed());
        assert!(!verify_weak_ic(&keys.vk, &example.primary_input, &proof));
    }

    #[test]
    fn generator_with_fixed_trapdoor() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(12, 2, &mut prng).unwrap();
        let cs = &example.constraint_system;
        let trapdoor = Trapdoor::random(&mut prng);

        let keys = generate_with_trapdoor(cs, &trapdoor).unwrap();
        assert_eq!(keys, generate_with_trapdoor(cs, &trapdoor).unwrap());

        // the verification key matches the trapdoor
        let g1 = BN254G1::get_base();
        let g2 = BN254G2::get_base();
        assert_eq!(keys.vk.alpha_a_g2, g2.mul(&trapdoor.alpha_a));
        assert_eq!(keys.vk.alpha_b_g1, g1.mul(&trapdoor.alpha_b));
        assert_eq!(keys.vk.gamma_g2, g2.mul(&trapdoor.gamma));
        assert_eq!(
            keys.vk.gamma_beta_g1,
            g1.mul(&(trapdoor.gamma * trapdoor.beta))
        );

        // the query sizes follow the QAP
        let mut swapped = cs.clone();
        swapped.swap_ab_if_beneficial();
        assert_eq!(keys.pk.constraint_system, swapped);
        let qap = instance_map_with_evaluation(&swapped, &trapdoor.t).unwrap();
        assert_eq!(keys.pk.a_query.domain_size, qap.num_variables + 2);
        assert_eq!(keys.pk.h_query.len(), qap.degree + 1);
        assert_eq!(keys.pk.k_query.len(), qap.num_variables + 4);

        // H and K queries are the powers of t and the K coefficients in the exponent
        for (i, h) in keys.pk.h_query.iter().enumerate() {
            assert_eq!(*h, g1.mul(&qap.ht[i]));
        }
        let r_c = trapdoor.r_a * trapdoor.r_b;
        let k0 = trapdoor.beta
            * (trapdoor.r_a * qap.at[0] + trapdoor.r_b * qap.bt[0] + r_c * qap.ct[0]);
        assert_eq!(keys.pk.k_query[0], g1.mul(&k0));
        assert_eq!(keys.vk.rc_z_g2, g2.mul(&(r_c * qap.zt)));
    }

    #[test]
    fn degenerate_trapdoor_is_rejected() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(12, 2, &mut prng).unwrap();
        let cs = &example.constraint_system;

        let mut trapdoor = Trapdoor::random(&mut prng);
        trapdoor.gamma = BN254Scalar::zero();
        assert!(generate_with_trapdoor(cs, &trapdoor).is_err());

        // t on the evaluation domain makes Z(t) vanish
        let mut trapdoor = Trapdoor::random(&mut prng);
        trapdoor.t = BN254Scalar::one();
        assert_eq!(
            generate_with_trapdoor(cs, &trapdoor),
            Err(SnarkError::Algebra(AlgebraError::ParameterError))
        );
    }

    #[test]
    fn dummy_key_has_the_right_shape() {
        let mut prng = test_rng();
        let vk = dummy_verification_key(7, &mut prng);
        assert_eq!(vk.encoded_ic_query.domain_size(), 7);
        assert_eq!(vk.g1_size(), 2 + 8);
        let proof = Proof::default();
        assert!(!verify_strong_ic(&vk, &[BN254Scalar::zero(); 7], &proof));
        assert_eq!(VerificationKey::from_bytes(&vk.to_bytes()).unwrap(), vk);
    }
}
