//! The boundary of the PGHR engine: generation, proving and verification
//! over encoded constraint systems, keys and proofs.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_import_braces, unused_qualifications, trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(stable_features, unreachable_pub, non_shorthand_field_patterns)]
#![deny(unused_attributes, unused_imports, unused_mut)]
#![deny(missing_docs)]
#![deny(renamed_and_removed_lints, stable_features, unused_allocation)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![forbid(unsafe_code)]
#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling.
pub mod errors;
/// The encoded generate, prove and verify calls.
pub mod ppzksnark;

pub use errors::PghrError;
pub use pghr_snark::ppzksnark::{ProcessedVerificationKey, Proof, ProvingKey, VerificationKey};
pub use pghr_snark::r1cs::R1CSConstraintSystem;
