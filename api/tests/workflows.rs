use pghr::ppzksnark::{
    decode_constraint_system, encode_constraint_system, encode_input, generate, process_vk,
    prove, verify, verify_processed, SerializedKeyPair,
};
use pghr::{Proof, VerificationKey};
use pghr_snark::r1cs::generate_r1cs_example_with_binary_input;
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

#[test]
fn node_workflow() {
    let mut prng = ChaChaRng::from_seed([0u8; 32]);
    let example = generate_r1cs_example_with_binary_input(200, 8, &mut prng).unwrap();

    // the node hands over an encoded constraint system and stores the keys
    let cs = encode_constraint_system(&example.constraint_system).unwrap();
    assert_eq!(
        decode_constraint_system(&cs).unwrap(),
        example.constraint_system
    );
    let keys = generate(&cs, &mut prng).unwrap();
    let stored = serde_json::to_string(&keys).unwrap();
    let keys: SerializedKeyPair = serde_json::from_str(&stored).unwrap();

    let primary = encode_input(&example.primary_input);
    let auxiliary = encode_input(&example.auxiliary_input);
    let proof = prove(&keys.proving_key, &primary, &auxiliary, &mut prng).unwrap();
    assert!(verify(&keys.verification_key, &primary, &proof).unwrap());

    let pvk = process_vk(&keys.verification_key).unwrap();
    for _ in 0..3 {
        let proof = prove(&keys.proving_key, &primary, &auxiliary, &mut prng).unwrap();
        assert!(verify_processed(&pvk, &primary, &proof).unwrap());
    }

    // the typed values agree with the encoded ones
    let vk = VerificationKey::from_bytes(&keys.verification_key).unwrap();
    let typed_proof = Proof::from_bytes(&proof).unwrap();
    assert!(pghr_snark::ppzksnark::verify_strong_ic(
        &vk,
        &example.primary_input,
        &typed_proof
    ));
    let json = serde_json::to_string(&typed_proof).unwrap();
    assert_eq!(serde_json::from_str::<Proof>(&json).unwrap(), typed_proof);
}

#[test]
fn keys_do_not_mix() {
    let mut prng = ChaChaRng::from_seed([1u8; 32]);
    let example = generate_r1cs_example_with_binary_input(40, 4, &mut prng).unwrap();
    let cs = encode_constraint_system(&example.constraint_system).unwrap();
    let first = generate(&cs, &mut prng).unwrap();
    let second = generate(&cs, &mut prng).unwrap();
    assert_ne!(first, second);

    let primary = encode_input(&example.primary_input);
    let auxiliary = encode_input(&example.auxiliary_input);
    let proof = prove(&first.proving_key, &primary, &auxiliary, &mut prng).unwrap();
    assert!(verify(&first.verification_key, &primary, &proof).unwrap());
    assert!(!verify(&second.verification_key, &primary, &proof).unwrap());

    // a primary input of another size is rejected by the strong check
    let short = encode_input(&example.primary_input[..3]);
    assert!(!verify(&first.verification_key, &short, &proof).unwrap());
}
