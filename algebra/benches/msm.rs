use ark_std::time::Instant;
use pghr_algebra::{
    bn254::{BN254Scalar, BN254G1},
    multi_exp::FixedBaseTable,
    prelude::*,
};

fn main() {
    let mut prng = test_rng();

    let count = 4096;

    // Sample random points
    let mut points = Vec::new();
    for _ in 0..count {
        points.push(BN254G1::random(&mut prng));
    }

    // Sample random scalars
    let mut scalars = Vec::new();
    for _ in 0..count {
        scalars.push(BN254Scalar::random(&mut prng));
    }

    let points_ptr = points.iter().collect::<Vec<&BN254G1>>();
    let scalars_ptr = scalars.iter().collect::<Vec<&BN254Scalar>>();

    let start = Instant::now();
    let _ = BN254G1::multi_exp(&scalars_ptr, &points_ptr);
    println!("multi-exp total time: {} s", start.elapsed().as_secs_f32());
    println!(
        "multi-exp average time: {} us",
        start.elapsed().as_micros() / count
    );

    let start = Instant::now();
    let window = FixedBaseTable::<BN254G1>::window_size(count as usize);
    let table = FixedBaseTable::new(&BN254G1::get_base(), window);
    let _ = table.batch_mul(&scalars);
    println!(
        "fixed-base batch mul (window {}) total time: {} s",
        window,
        start.elapsed().as_secs_f32()
    );
}
