//! The BCTV14 / PGHR13 preprocessing zk-SNARK for rank-1 constraint systems
//! ("r1cs_ppzksnark") over the BN254 curve.
//!
//! The crate is organised bottom-up: [`r1cs`] holds constraint systems and
//! their assignments, [`qap`] reduces them to quadratic arithmetic programs
//! over a radix-2 evaluation domain, and [`ppzksnark`] implements the
//! generator, prover and verifier on top of `pghr-algebra`.
#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling.
pub mod errors;
/// The r1cs_ppzksnark proof system.
pub mod ppzksnark;
/// Quadratic arithmetic programs and the R1CS-to-QAP reduction.
pub mod qap;
/// Rank-1 constraint systems.
pub mod r1cs;
/// Byte encoding helpers.
pub(crate) mod utils;

pub use errors::SnarkError;
