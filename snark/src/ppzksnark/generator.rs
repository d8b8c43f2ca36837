use super::keys::{KeyPair, ProvingKey, VerificationKey};
use super::knowledge_commitment::{batch_to_special, kc_batch_exp, KnowledgeCommitment};
use super::sparse_vector::AccumulationVector;
use crate::errors::{Result, SnarkError};
use crate::qap::{instance_map_with_evaluation, qap_domain};
use crate::r1cs::R1CSConstraintSystem;
use ark_std::{end_timer, start_timer};
use pghr_algebra::{
    bn254::{BN254Scalar, BN254G1, BN254G2},
    multi_exp::FixedBaseTable,
    prelude::*,
};

/// The secret randomness of a key pair. Whoever knows it can forge proofs,
/// so it must be discarded after the keys are built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trapdoor {
    /// The evaluation point of the QAP.
    pub t: BN254Scalar,
    /// The knowledge factor of A.
    pub alpha_a: BN254Scalar,
    /// The knowledge factor of B.
    pub alpha_b: BN254Scalar,
    /// The knowledge factor of C.
    pub alpha_c: BN254Scalar,
    /// The scaling of A.
    pub r_a: BN254Scalar,
    /// The scaling of B. The scaling of C is `r_a * r_b`.
    pub r_b: BN254Scalar,
    /// The consistency factor.
    pub beta: BN254Scalar,
    /// The blinding of the consistency check.
    pub gamma: BN254Scalar,
}

impl Trapdoor {
    /// Sample every scalar independently, resampling the ones that must be non-zero.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut non_zero = || loop {
            let s = BN254Scalar::random(rng);
            if !s.is_zero() {
                break s;
            }
        };
        Self {
            t: non_zero(),
            alpha_a: non_zero(),
            alpha_b: non_zero(),
            alpha_c: non_zero(),
            r_a: non_zero(),
            r_b: non_zero(),
            beta: non_zero(),
            gamma: non_zero(),
        }
    }
}

/// Run the generator with fresh randomness.
pub fn generate<R: CryptoRng + RngCore>(
    cs: &R1CSConstraintSystem<BN254Scalar>,
    rng: &mut R,
) -> Result<KeyPair> {
    let domain = qap_domain(cs)?;
    let mut trapdoor = Trapdoor::random(rng);
    // t must stay outside the evaluation domain
    while domain.compute_z(&trapdoor.t).is_zero() {
        trapdoor.t = BN254Scalar::random(rng);
    }
    generate_with_trapdoor(cs, &trapdoor)
}

/// Run the generator with the given secret scalars.
///
/// Fails if the constraint system is invalid, if `r_a`, `r_b`, `beta` or
/// `gamma` is zero, or if `t` lies in the evaluation domain.
pub fn generate_with_trapdoor(
    cs: &R1CSConstraintSystem<BN254Scalar>,
    trapdoor: &Trapdoor,
) -> Result<KeyPair> {
    let timer = start_timer!(|| "r1cs_ppzksnark generator");
    let Trapdoor {
        t,
        alpha_a,
        alpha_b,
        alpha_c,
        r_a,
        r_b,
        beta,
        gamma,
    } = *trapdoor;
    if r_a.is_zero() || r_b.is_zero() || beta.is_zero() || gamma.is_zero() {
        return Err(SnarkError::Algebra(AlgebraError::ParameterError));
    }

    let mut cs = cs.clone();
    cs.swap_ab_if_beneficial();

    let qap = instance_map_with_evaluation(&cs, &t)?;
    if qap.zt.is_zero() {
        return Err(SnarkError::Algebra(AlgebraError::ParameterError));
    }
    tracing::debug!(
        num_variables = qap.num_variables,
        num_inputs = qap.num_inputs,
        degree = qap.degree,
        "QAP instance"
    );

    let zt = qap.zt;
    let mut at = qap.at;
    let mut bt = qap.bt;
    let mut ct = qap.ct;
    let ht = qap.ht;
    // index num_variables + 1 holds Z(t), used by the prover to blind A, B and C
    at.push(zt);
    bt.push(zt);
    ct.push(zt);

    let r_c = r_a * r_b;

    // built before the input prefix of At is zeroed out
    let mut kt: Vec<BN254Scalar> = at
        .iter()
        .zip(bt.iter().zip(ct.iter()))
        .take(qap.num_variables + 1)
        .map(|(a, (b, c))| beta * (r_a * a + r_b * b + r_c * c))
        .collect();
    kt.push(beta * r_a * zt);
    kt.push(beta * r_b * zt);
    kt.push(beta * r_c * zt);

    let mut ic_coefficients = Vec::with_capacity(qap.num_inputs + 1);
    for a in at.iter_mut().take(qap.num_inputs + 1) {
        ic_coefficients.push(*a);
        *a = BN254Scalar::zero();
    }

    let g1_exp_count = 2 * (non_zero(&at) + non_zero(&ct)) + non_zero(&bt) + ht.len() + kt.len();
    let g2_exp_count = non_zero(&bt);
    let g1_window = FixedBaseTable::<BN254G1>::window_size(g1_exp_count);
    let g2_window = FixedBaseTable::<BN254G2>::window_size(g2_exp_count);
    tracing::debug!(g1_exp_count, g1_window, g2_exp_count, g2_window, "fixed-base windows");

    let table_timer = start_timer!(|| "fixed-base tables");
    let g1_table = FixedBaseTable::new(&BN254G1::get_base(), g1_window);
    let g2_table = FixedBaseTable::new(&BN254G2::get_base(), g2_window);
    end_timer!(table_timer);

    let query_timer = start_timer!(|| "A, B, C queries");
    let mut a_query = kc_batch_exp(&g1_table, &g1_table, &r_a, &(r_a * alpha_a), &at);
    let mut b_query = kc_batch_exp(&g2_table, &g1_table, &r_b, &(r_b * alpha_b), &bt);
    let mut c_query = kc_batch_exp(&g1_table, &g1_table, &r_c, &(r_c * alpha_c), &ct);
    KnowledgeCommitment::batch_to_special(&mut a_query.values);
    KnowledgeCommitment::batch_to_special(&mut b_query.values);
    KnowledgeCommitment::batch_to_special(&mut c_query.values);
    end_timer!(query_timer);

    let query_timer = start_timer!(|| "H, K queries");
    let mut h_query = g1_table.batch_mul(&ht);
    let mut k_query = g1_table.batch_mul(&kt);
    batch_to_special(&mut h_query);
    batch_to_special(&mut k_query);
    end_timer!(query_timer);

    let vk_timer = start_timer!(|| "verification key");
    let g1 = BN254G1::get_base();
    let g2 = BN254G2::get_base();
    let ic_base = g1.mul(&(r_a * ic_coefficients[0]));
    let multiplied_ic: Vec<BN254Scalar> = ic_coefficients[1..].iter().map(|c| r_a * c).collect();
    let ic_values = g1_table.batch_mul(&multiplied_ic);

    let vk = VerificationKey {
        alpha_a_g2: g2.mul(&alpha_a),
        alpha_b_g1: g1.mul(&alpha_b),
        alpha_c_g2: g2.mul(&alpha_c),
        gamma_g2: g2.mul(&gamma),
        gamma_beta_g1: g1.mul(&(gamma * beta)),
        gamma_beta_g2: g2.mul(&(gamma * beta)),
        rc_z_g2: g2.mul(&(r_c * zt)),
        encoded_ic_query: AccumulationVector::new(ic_base, ic_values),
    };
    end_timer!(vk_timer);

    let pk = ProvingKey {
        a_query,
        b_query,
        c_query,
        h_query,
        k_query,
        constraint_system: cs,
    };
    pk.print_size();
    vk.print_size();
    end_timer!(timer);

    Ok(KeyPair { pk, vk })
}

fn non_zero(v: &[BN254Scalar]) -> usize {
    v.iter().filter(|s| !s.is_zero()).count()
}

/// A verification key of the right shape for `input_size` primary inputs,
/// made of random elements. Only useful to measure verification time.
pub fn dummy_verification_key<R: CryptoRng + RngCore>(
    input_size: usize,
    rng: &mut R,
) -> VerificationKey {
    let ic_base = BN254G1::random(rng);
    let ic_values = (0..input_size).map(|_| BN254G1::random(rng)).collect();
    VerificationKey {
        alpha_a_g2: BN254G2::random(rng),
        alpha_b_g1: BN254G1::random(rng),
        alpha_c_g2: BN254G2::random(rng),
        gamma_g2: BN254G2::random(rng),
        gamma_beta_g1: BN254G1::random(rng),
        gamma_beta_g2: BN254G2::random(rng),
        rc_z_g2: BN254G2::random(rng),
        encoded_ic_query: AccumulationVector::new(ic_base, ic_values),
    }
}
