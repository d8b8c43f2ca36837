//! Arithmetic layer of the PGHR zk-SNARK: fixed-width big integers, the BN254
//! base and scalar fields in Montgomery form, the Fq2/Fq6/Fq12 tower, Jacobian
//! arithmetic for G1 and G2, and the optimal-ate pairing.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_import_braces, non_shorthand_field_patterns)]
#![deny(renamed_and_removed_lints, stable_features, unused_allocation)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(
    clippy::op_ref,
    clippy::suspicious_op_assign_impl,
    clippy::suspicious_arithmetic_impl,
    clippy::upper_case_acronyms
)]

/// Fixed-width multi-precision integers.
pub mod bigint;
/// The BN254 curve: fields, groups and pairing.
pub mod bn254;
/// Module for error handling.
pub mod errors;
/// Prime fields in Montgomery representation.
pub mod fp;
/// Module for multi-exponentiation.
pub mod multi_exp;
/// Module for the prelude.
pub mod prelude;
/// Module for test rng.
pub mod rand_helper;
/// Module for serialization.
pub mod serialization;
/// Short Weierstrass curves in Jacobian coordinates.
pub mod short_weierstrass;
/// Module for traits.
pub mod traits;
/// Module for utils.
pub mod utils;

pub use ark_std::{
    borrow, fmt, hash, iter, marker, ops, rand, str, One, UniformRand, Zero,
};
