use crate::errors::{PghrError, Result};
use pghr_algebra::{bn254::BN254Scalar, prelude::*};
use pghr_snark::{
    errors::SnarkError,
    ppzksnark::{self, ProcessedVerificationKey, Proof, ProvingKey, VerificationKey},
    r1cs::R1CSConstraintSystem,
};

/// The encoded keys returned by [`generate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedKeyPair {
    /// The encoded proving key.
    pub proving_key: Vec<u8>,
    /// The encoded verification key.
    pub verification_key: Vec<u8>,
}

/// Encode a constraint system for [`generate`].
pub fn encode_constraint_system(cs: &R1CSConstraintSystem<BN254Scalar>) -> Result<Vec<u8>> {
    bincode::serialize(cs).map_err(|_| PghrError::SerializationError)
}

/// Decode a constraint system, rejecting one that refers to undeclared variables.
pub fn decode_constraint_system(bytes: &[u8]) -> Result<R1CSConstraintSystem<BN254Scalar>> {
    let cs: R1CSConstraintSystem<BN254Scalar> =
        bincode::deserialize(bytes).map_err(|_| PghrError::DeserializationError)?;
    if !cs.is_valid() {
        return Err(SnarkError::ConstraintSystemInvalid.into());
    }
    Ok(cs)
}

/// Encode an input as the concatenation of its 32-byte big-endian field elements.
pub fn encode_input(input: &[BN254Scalar]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(input.len() * BN254Scalar::bytes_len());
    for x in input {
        bytes.extend_from_slice(&x.to_bytes());
    }
    bytes
}

/// Decode an input produced by [`encode_input`].
pub fn decode_input(bytes: &[u8]) -> Result<Vec<BN254Scalar>> {
    let len = BN254Scalar::bytes_len();
    if bytes.len() % len != 0 {
        return Err(PghrError::DeserializationError);
    }
    bytes
        .chunks(len)
        .map(|chunk| BN254Scalar::from_bytes(chunk).map_err(PghrError::from))
        .collect()
}

/// Run the key generator on an encoded constraint system.
pub fn generate<R: CryptoRng + RngCore>(
    constraint_system: &[u8],
    rng: &mut R,
) -> Result<SerializedKeyPair> {
    let cs = decode_constraint_system(constraint_system)?;
    tracing::info!(
        num_constraints = cs.num_constraints(),
        num_inputs = cs.num_inputs(),
        num_variables = cs.num_variables(),
        "generating keys"
    );
    let keys = ppzksnark::generate(&cs, rng)?;
    Ok(SerializedKeyPair {
        proving_key: keys.pk.to_bytes(),
        verification_key: keys.vk.to_bytes(),
    })
}

/// Produce an encoded proof from an encoded proving key and encoded inputs.
pub fn prove<R: CryptoRng + RngCore>(
    proving_key: &[u8],
    primary_input: &[u8],
    auxiliary_input: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let pk = ProvingKey::from_bytes(proving_key)?;
    let primary_input = decode_input(primary_input)?;
    let auxiliary_input = decode_input(auxiliary_input)?;
    let proof = ppzksnark::prove(&pk, &primary_input, &auxiliary_input, rng)?;
    Ok(proof.to_bytes())
}

/// Check an encoded proof. The primary input must have the size the key was
/// built for.
///
/// Returns an error only when an argument cannot be decoded.
pub fn verify(verification_key: &[u8], primary_input: &[u8], proof: &[u8]) -> Result<bool> {
    let vk = VerificationKey::from_bytes(verification_key)?;
    let primary_input = decode_input(primary_input)?;
    let proof = Proof::from_bytes(proof)?;
    Ok(ppzksnark::verify_strong_ic(&vk, &primary_input, &proof))
}

/// Decode a verification key and precompute its pairing arguments, for
/// repeated use with [`verify_processed`].
pub fn process_vk(verification_key: &[u8]) -> Result<ProcessedVerificationKey> {
    let vk = VerificationKey::from_bytes(verification_key)?;
    Ok(ppzksnark::process_vk(&vk))
}

/// Check an encoded proof against a processed verification key.
pub fn verify_processed(
    pvk: &ProcessedVerificationKey,
    primary_input: &[u8],
    proof: &[u8],
) -> Result<bool> {
    let primary_input = decode_input(primary_input)?;
    let proof = Proof::from_bytes(proof)?;
    Ok(ppzksnark::online_verify_strong_ic(
        pvk,
        &primary_input,
        &proof,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use pghr_snark::r1cs::generate_r1cs_example_with_field_input;

    #[test]
    fn boundary_calls() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(50, 5, &mut prng).unwrap();
        let cs_bytes = encode_constraint_system(&example.constraint_system).unwrap();
        let keys = generate(&cs_bytes, &mut prng).unwrap();

        let primary = encode_input(&example.primary_input);
        let auxiliary = encode_input(&example.auxiliary_input);
        let proof = prove(&keys.proving_key, &primary, &auxiliary, &mut prng).unwrap();
        assert_eq!(proof.len(), ppzksnark::PROOF_LEN);

        assert_eq!(verify(&keys.verification_key, &primary, &proof), Ok(true));
        let pvk = process_vk(&keys.verification_key).unwrap();
        assert_eq!(verify_processed(&pvk, &primary, &proof), Ok(true));

        // a different input is a valid encoding but a failed check
        let mut other = example.primary_input.clone();
        other[0] = other[0] + BN254Scalar::one();
        let other = encode_input(&other);
        assert_eq!(verify(&keys.verification_key, &other, &proof), Ok(false));
        assert_eq!(verify_processed(&pvk, &other, &proof), Ok(false));

        // the key pair can be stored with bincode
        let stored = bincode::serialize(&keys).unwrap();
        assert_eq!(
            bincode::deserialize::<SerializedKeyPair>(&stored).unwrap(),
            keys
        );
    }

    #[test]
    fn decoding_errors() {
        assert_eq!(
            decode_input(&[0u8; 33]),
            Err(PghrError::DeserializationError)
        );
        assert_eq!(decode_input(&[]), Ok(vec![]));
        assert_eq!(
            decode_input(&[0xffu8; 32]),
            Err(PghrError::Algebra(AlgebraError::DeserializationError))
        );
        assert_eq!(
            decode_constraint_system(&[1, 2, 3]),
            Err(PghrError::DeserializationError)
        );
        assert!(verify(&[0u8; 10], &[], &[0u8; ppzksnark::PROOF_LEN]).is_err());
        assert!(process_vk(&[]).is_err());
    }

    #[test]
    fn invalid_constraint_system_is_rejected() {
        use pghr_snark::r1cs::{LinearCombination, R1CSConstraint, Variable};

        let mut cs = R1CSConstraintSystem::<BN254Scalar>::new(1, 1);
        cs.add_constraint(R1CSConstraint::new(
            LinearCombination::from(Variable(1)),
            LinearCombination::from(Variable(1)),
            LinearCombination::from(Variable(5)),
        ));
        let bytes = encode_constraint_system(&cs).unwrap();
        assert_eq!(
            decode_constraint_system(&bytes),
            Err(PghrError::Snark(SnarkError::ConstraintSystemInvalid))
        );
        let mut prng = test_rng();
        assert!(generate(&bytes, &mut prng).is_err());
    }

    #[test]
    fn unsatisfied_assignment_is_reported() {
        let mut prng = test_rng();
        let example = generate_r1cs_example_with_field_input(10, 2, &mut prng).unwrap();
        let cs_bytes = encode_constraint_system(&example.constraint_system).unwrap();
        let keys = generate(&cs_bytes, &mut prng).unwrap();

        let mut auxiliary = example.auxiliary_input.clone();
        auxiliary[0] = auxiliary[0] + BN254Scalar::one();
        assert_eq!(
            prove(
                &keys.proving_key,
                &encode_input(&example.primary_input),
                &encode_input(&auxiliary),
                &mut prng,
            ),
            Err(PghrError::Snark(SnarkError::UnsatisfiedConstraintSystem))
        );
    }
}
