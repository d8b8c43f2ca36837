use super::keys::{ProcessedVerificationKey, VerificationKey};
use super::proof::Proof;
use ark_std::{end_timer, start_timer};
use pghr_algebra::{
    bn254::{
        double_miller_loop, final_exponentiation, miller_loop, precompute_g1, precompute_g2,
        BN254Fq12, BN254Scalar,
    },
    prelude::*,
};

/// Precompute the pairing arguments of a verification key.
pub fn process_vk(vk: &VerificationKey) -> ProcessedVerificationKey {
    let timer = start_timer!(|| "process verification key");
    let pvk = vk.process();
    end_timer!(timer);
    pvk
}

fn is_one_after_final_exponentiation(f: &BN254Fq12) -> bool {
    final_exponentiation(f).is_one()
}

/// Verify a proof against a processed key, accepting a primary input that is
/// shorter than the one the key was built for. The missing entries are taken
/// as zero.
pub fn online_verify_weak_ic(
    pvk: &ProcessedVerificationKey,
    primary_input: &[BN254Scalar],
    proof: &Proof,
) -> bool {
    let timer = start_timer!(|| "online verifier");
    let result = online_checks(pvk, primary_input, proof);
    end_timer!(timer);
    result
}

fn online_checks(
    pvk: &ProcessedVerificationKey,
    primary_input: &[BN254Scalar],
    proof: &Proof,
) -> bool {
    if primary_input.len() > pvk.encoded_ic_query.domain_size() {
        tracing::debug!(
            input_size = primary_input.len(),
            domain_size = pvk.encoded_ic_query.domain_size(),
            "primary input is too long"
        );
        return false;
    }
    let accumulated = pvk
        .encoded_ic_query
        .accumulate_chunk(primary_input, 0)
        .first;

    if !proof.is_well_formed() {
        tracing::debug!("proof is not well formed");
        return false;
    }

    let g2_one = &pvk.pp_g2_one_precomp;

    let kc_a = miller_loop(&precompute_g1(&proof.g_a.g), &pvk.vk_alpha_a_g2_precomp)
        * miller_loop(&precompute_g1(&proof.g_a.h), g2_one).unitary_inverse();
    if !is_one_after_final_exponentiation(&kc_a) {
        tracing::debug!("knowledge commitment for A query incorrect");
        return false;
    }

    let kc_b = miller_loop(&pvk.vk_alpha_b_g1_precomp, &precompute_g2(&proof.g_b.g))
        * miller_loop(&precompute_g1(&proof.g_b.h), g2_one).unitary_inverse();
    if !is_one_after_final_exponentiation(&kc_b) {
        tracing::debug!("knowledge commitment for B query incorrect");
        return false;
    }

    let kc_c = miller_loop(&precompute_g1(&proof.g_c.g), &pvk.vk_alpha_c_g2_precomp)
        * miller_loop(&precompute_g1(&proof.g_c.h), g2_one).unitary_inverse();
    if !is_one_after_final_exponentiation(&kc_c) {
        tracing::debug!("knowledge commitment for C query incorrect");
        return false;
    }

    // e(A + IC, B) = e(H, rC Z) * e(C, P2)
    let a_with_input = proof.g_a.g.add(&accumulated);
    let a_with_input_precomp = precompute_g1(&a_with_input);
    let b_g2_precomp = precompute_g2(&proof.g_b.g);
    let qap = miller_loop(&a_with_input_precomp, &b_g2_precomp)
        * double_miller_loop(
            &precompute_g1(&proof.g_h),
            &pvk.vk_rc_z_g2_precomp,
            &precompute_g1(&proof.g_c.g),
            g2_one,
        )
        .unitary_inverse();
    if !is_one_after_final_exponentiation(&qap) {
        tracing::debug!("QAP divisibility check failed");
        return false;
    }

    // e(K, gamma P2) = e(A + IC + C, gamma beta P2) * e(gamma beta P1, B)
    let abc = a_with_input.add(&proof.g_c.g);
    let same_coefficients = miller_loop(&precompute_g1(&proof.g_k), &pvk.vk_gamma_g2_precomp)
        * double_miller_loop(
            &precompute_g1(&abc),
            &pvk.vk_gamma_beta_g2_precomp,
            &pvk.vk_gamma_beta_g1_precomp,
            &b_g2_precomp,
        )
        .unitary_inverse();
    if !is_one_after_final_exponentiation(&same_coefficients) {
        tracing::debug!("same-coefficient check failed");
        return false;
    }

    true
}

/// Verify a proof against a processed key. The primary input must have
/// exactly the size the key was built for.
pub fn online_verify_strong_ic(
    pvk: &ProcessedVerificationKey,
    primary_input: &[BN254Scalar],
    proof: &Proof,
) -> bool {
    if pvk.encoded_ic_query.domain_size() != primary_input.len() {
        tracing::debug!(
            input_size = primary_input.len(),
            domain_size = pvk.encoded_ic_query.domain_size(),
            "input length differs from expected"
        );
        return false;
    }
    online_verify_weak_ic(pvk, primary_input, proof)
}

/// Process the key, then run [`online_verify_weak_ic`].
pub fn verify_weak_ic(vk: &VerificationKey, primary_input: &[BN254Scalar], proof: &Proof) -> bool {
    let timer = start_timer!(|| "r1cs_ppzksnark verifier (weak IC)");
    let pvk = process_vk(vk);
    let result = online_verify_weak_ic(&pvk, primary_input, proof);
    end_timer!(timer);
    result
}

/// Process the key, then run [`online_verify_strong_ic`].
pub fn verify_strong_ic(
    vk: &VerificationKey,
    primary_input: &[BN254Scalar],
    proof: &Proof,
) -> bool {
    let timer = start_timer!(|| "r1cs_ppzksnark verifier (strong IC)");
    let pvk = process_vk(vk);
    let result = online_verify_strong_ic(&pvk, primary_input, proof);
    end_timer!(timer);
    result
}
