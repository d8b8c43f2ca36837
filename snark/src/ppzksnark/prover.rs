use super::keys::ProvingKey;
use super::knowledge_commitment::{
    kc_multi_exp_with_mixed_addition, KnowledgeCommitment, KnowledgeCommitmentVector,
};
use super::proof::Proof;
use crate::errors::{Result, SnarkError};
use crate::qap::witness_map;
use ark_std::{end_timer, start_timer};
use pghr_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};

/// Produce a proof that the prover knows an auxiliary input satisfying the
/// constraint system of `pk` together with `primary_input`.
///
/// The proof is randomized by three fresh blinding scalars drawn from `rng`.
///
/// # Example
/// ```
/// use pghr_algebra::prelude::*;
/// use pghr_snark::ppzksnark::{generate, prove, verify_strong_ic};
/// use pghr_snark::r1cs::generate_r1cs_example_with_binary_input;
///
/// let mut prng = test_rng();
/// let example = generate_r1cs_example_with_binary_input(20, 4, &mut prng).unwrap();
/// let keys = generate(&example.constraint_system, &mut prng).unwrap();
/// let proof = prove(
///     &keys.pk,
///     &example.primary_input,
///     &example.auxiliary_input,
///     &mut prng,
/// )
/// .unwrap();
/// assert!(verify_strong_ic(&keys.vk, &example.primary_input, &proof));
/// ```
pub fn prove<R: CryptoRng + RngCore>(
    pk: &ProvingKey,
    primary_input: &[BN254Scalar],
    auxiliary_input: &[BN254Scalar],
    rng: &mut R,
) -> Result<Proof> {
    let cs = &pk.constraint_system;
    if primary_input.len() != cs.num_inputs()
        || primary_input.len() + auxiliary_input.len() != cs.num_variables()
    {
        return Err(SnarkError::InputSizeMismatch);
    }
    pk.check_shape()?;
    if !cs.is_satisfied(primary_input, auxiliary_input) {
        return Err(SnarkError::UnsatisfiedConstraintSystem);
    }

    let timer = start_timer!(|| "r1cs_ppzksnark prover");
    let d1 = BN254Scalar::random(rng);
    let d2 = BN254Scalar::random(rng);
    let d3 = BN254Scalar::random(rng);

    let wit = witness_map(cs, primary_input, auxiliary_input, &d1, &d2, &d3)?;
    let nv = wit.num_variables;

    let abc_timer = start_timer!(|| "A, B, C commitments");
    // the A query has its input prefix moved into the verification key
    let mut g_a = query_at(&pk.a_query, nv + 1).mul(&d1);
    let mut g_b = query_at(&pk.b_query, 0).add(&query_at(&pk.b_query, nv + 1).mul(&d2));
    let mut g_c = query_at(&pk.c_query, 0).add(&query_at(&pk.c_query, nv + 1).mul(&d3));

    g_a = g_a.add(&kc_multi_exp_with_mixed_addition(
        &pk.a_query,
        1,
        1 + nv,
        &wit.coefficients_for_abcs,
    ));
    g_b = g_b.add(&kc_multi_exp_with_mixed_addition(
        &pk.b_query,
        1,
        1 + nv,
        &wit.coefficients_for_abcs,
    ));
    g_c = g_c.add(&kc_multi_exp_with_mixed_addition(
        &pk.c_query,
        1,
        1 + nv,
        &wit.coefficients_for_abcs,
    ));
    end_timer!(abc_timer);

    let h_timer = start_timer!(|| "H commitment");
    let g_h = multi_exp_g1(&pk.h_query, &wit.coefficients_for_h);
    end_timer!(h_timer);

    let k_timer = start_timer!(|| "K commitment");
    let k = &pk.k_query;
    let g_k = k[0]
        .add(&k[nv + 1].mul(&d1))
        .add(&k[nv + 2].mul(&d2))
        .add(&k[nv + 3].mul(&d3))
        .add(&multi_exp_g1(&k[1..=nv], &wit.coefficients_for_abcs[..nv]));
    end_timer!(k_timer);

    let proof = Proof {
        g_a,
        g_b,
        g_c,
        g_h,
        g_k,
    };
    tracing::debug!(
        num_variables = nv,
        degree = wit.degree,
        "proof generated"
    );
    proof.print_size();
    end_timer!(timer);
    Ok(proof)
}

// a missing entry of a sparse query stands for zero
fn query_at<T, H>(query: &KnowledgeCommitmentVector<T, H>, index: usize) -> KnowledgeCommitment<T, H>
where
    T: Group,
    H: Group<ScalarType = T::ScalarType>,
{
    query
        .get(index)
        .copied()
        .unwrap_or_else(KnowledgeCommitment::zero)
}

fn multi_exp_g1(points: &[BN254G1], scalars: &[BN254Scalar]) -> BN254G1 {
    let scalars: Vec<&BN254Scalar> = scalars.iter().collect();
    let points: Vec<&BN254G1> = points.iter().collect();
    BN254G1::multi_exp(&scalars, &points)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ppzksnark::{generate, ProvingKey};
    use crate::r1cs::{
        generate_r1cs_example_with_field_input, LinearCombination, R1CSConstraint,
        R1CSConstraintSystem, Variable,
    };

    #[test]
    fn rejects_wrong_input_sizes() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(10, 3, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();

        let short_primary = &example.primary_input[..2];
        assert_eq!(
            prove(&keys.pk, short_primary, &example.auxiliary_input, &mut prng),
            Err(SnarkError::InputSizeMismatch)
        );
        let mut long_aux = example.auxiliary_input.clone();
        long_aux.push(BN254Scalar::one());
        assert_eq!(
            prove(&keys.pk, &example.primary_input, &long_aux, &mut prng),
            Err(SnarkError::InputSizeMismatch)
        );
    }

    #[test]
    fn rejects_unsatisfying_assignment() {
        let mut prng = test_rng();
        // x1 * x1 = x2
        let mut cs = R1CSConstraintSystem::new(1, 1);
        cs.add_constraint(R1CSConstraint::new(
            LinearCombination::from(Variable(1)),
            LinearCombination::from(Variable(1)),
            LinearCombination::from(Variable(2)),
        ));
        let keys = generate(&cs, &mut prng).unwrap();

        let x = BN254Scalar::from(3u32);
        assert!(prove(&keys.pk, &[x], &[BN254Scalar::from(9u32)], &mut prng).is_ok());
        assert_eq!(
            prove(&keys.pk, &[x], &[BN254Scalar::from(10u32)], &mut prng),
            Err(SnarkError::UnsatisfiedConstraintSystem)
        );
    }

    #[test]
    fn rejects_truncated_queries() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(10, 3, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        assert_eq!(keys.pk.check_shape(), Ok(()));

        let mut pk = keys.pk.clone();
        pk.h_query.truncate(1);
        assert_eq!(
            prove(&pk, &example.primary_input, &example.auxiliary_input, &mut prng),
            Err(SnarkError::ProvingKeyMismatch)
        );
        assert_eq!(
            ProvingKey::from_bytes(&pk.to_bytes()),
            Err(SnarkError::ProvingKeyMismatch)
        );

        let mut pk = keys.pk.clone();
        pk.k_query.pop();
        assert_eq!(
            prove(&pk, &example.primary_input, &example.auxiliary_input, &mut prng),
            Err(SnarkError::ProvingKeyMismatch)
        );

        let mut pk = keys.pk.clone();
        pk.b_query.domain_size -= 1;
        assert_eq!(
            prove(&pk, &example.primary_input, &example.auxiliary_input, &mut prng),
            Err(SnarkError::ProvingKeyMismatch)
        );
    }

    #[test]
    fn proofs_are_randomized() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(8, 2, &mut prng).unwrap();
        let keys = generate(&example.constraint_system, &mut prng).unwrap();
        let p1 = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        let p2 = prove(
            &keys.pk,
            &example.primary_input,
            &example.auxiliary_input,
            &mut prng,
        )
        .unwrap();
        assert_ne!(p1, p2);
        assert!(p1.is_well_formed());
        assert!(p2.is_well_formed());
    }
}
