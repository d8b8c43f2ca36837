use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaCha20Rng,
};

const TEST_SEED: [u8; 32] = [
    0x42, 0x4e, 0x32, 0x35, 0x34, 0x2d, 0x70, 0x67, 0x68, 0x72, 0x31, 0x33, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
];

/// A PRNG for tests and benchmarks, never for generating real parameters.
///
/// It is deterministic unless `PGHR_RANDOM_TEST_RNG=1` is set, in which case
/// it is seeded from the operating system.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let randomized =
        std::env::vars().any(|(key, val)| key == "PGHR_RANDOM_TEST_RNG" && val == "1");
    if randomized {
        ChaCha20Rng::from_entropy()
    } else {
        ChaCha20Rng::from_seed(TEST_SEED)
    }
}

/// A PRNG for tests and benchmarks, never for generating real parameters.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    ChaCha20Rng::from_seed(TEST_SEED)
}
