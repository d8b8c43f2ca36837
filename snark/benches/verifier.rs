use criterion::{criterion_group, criterion_main, Criterion};
use pghr_algebra::{bn254::BN254Scalar, prelude::*};
use pghr_snark::ppzksnark::{
    dummy_verification_key, generate, online_verify_strong_ic, process_vk, prove,
    verify_strong_ic,
};
use pghr_snark::r1cs::generate_r1cs_example_with_field_input;
use rand_chacha::ChaChaRng;

fn bench_verifier(c: &mut Criterion) {
    let mut prng = ChaChaRng::from_seed([0u8; 32]);

    let example = generate_r1cs_example_with_field_input(1 << 10, 10, &mut prng).unwrap();
    let keys = generate(&example.constraint_system, &mut prng).unwrap();
    let proof = prove(
        &keys.pk,
        &example.primary_input,
        &example.auxiliary_input,
        &mut prng,
    )
    .unwrap();
    let pvk = process_vk(&keys.vk);

    let mut verifier_group = c.benchmark_group("bench_verifier");
    verifier_group.bench_function("verifier".to_string(), |b| {
        b.iter(|| assert!(verify_strong_ic(&keys.vk, &example.primary_input, &proof)))
    });
    verifier_group.bench_function("online verifier".to_string(), |b| {
        b.iter(|| assert!(online_verify_strong_ic(&pvk, &example.primary_input, &proof)))
    });

    for input_size in [10, 100, 1000] {
        let vk = dummy_verification_key(input_size, &mut prng);
        let input: Vec<BN254Scalar> = (0..input_size)
            .map(|_| BN254Scalar::random(&mut prng))
            .collect();
        verifier_group.bench_function(format!("process key ({} inputs)", input_size), |b| {
            b.iter(|| process_vk(&vk))
        });
        verifier_group.bench_function(format!("accumulate ({} inputs)", input_size), |b| {
            b.iter(|| vk.encoded_ic_query.accumulate_chunk(&input, 0))
        });
    }
    verifier_group.finish();
}

criterion_group!(benches, bench_verifier);
criterion_main!(benches);
