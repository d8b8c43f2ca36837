#![allow(clippy::upper_case_acronyms)]
#![allow(non_camel_case_types)]

use pghr::ppzksnark::{encode_constraint_system, encode_input, generate};
use pghr_algebra::utils::save_to_file;
use pghr_snark::ppzksnark::dummy_verification_key;
use pghr_snark::r1cs::{
    generate_r1cs_example_with_binary_input, generate_r1cs_example_with_field_input,
};
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(
    about = "PGHR tool to generate r1cs_ppzksnark keys for example constraint systems.",
    rename_all = "kebab-case"
)]
enum Actions {
    /// Generates keys, the constraint system and a satisfying assignment
    /// for a random example with field inputs
    EXAMPLE {
        num_constraints: usize,
        num_inputs: usize,
        directory: PathBuf,
        /// Use binary inputs instead of field inputs
        #[structopt(long)]
        binary: bool,
    },

    /// Generates a verification key of random elements, to measure verification
    DUMMY_VK { input_size: usize, directory: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    use Actions::*;
    let action = Actions::from_args();
    match action {
        EXAMPLE {
            num_constraints,
            num_inputs,
            directory,
            binary,
        } => gen_example(num_constraints, num_inputs, directory, binary),

        DUMMY_VK {
            input_size,
            directory,
        } => gen_dummy_vk(input_size, directory),
    }
}

// cargo run --release --features="gen" --bin gen-params example 1000 10 "./parameters"
fn gen_example(
    num_constraints: usize,
    num_inputs: usize,
    directory: PathBuf,
    binary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut prng = ChaChaRng::from_entropy();
    let example = if binary {
        generate_r1cs_example_with_binary_input(num_constraints, num_inputs, &mut prng)
    } else {
        generate_r1cs_example_with_field_input(num_constraints, num_inputs, &mut prng)
    }
    .ok_or("the number of inputs is too large for the number of constraints")?;

    tracing::info!(num_constraints, num_inputs, binary, "generating example");
    let cs = encode_constraint_system(&example.constraint_system)?;
    let keys = generate(&cs, &mut prng)?;

    let files = [
        ("constraint-system.bin", cs),
        ("proving-key.bin", keys.proving_key),
        ("verification-key.bin", keys.verification_key),
        ("primary-input.bin", encode_input(&example.primary_input)),
        ("auxiliary-input.bin", encode_input(&example.auxiliary_input)),
    ];
    for (name, bytes) in files {
        let mut path = directory.clone();
        path.push(name);
        tracing::info!(path = %path.display(), len = bytes.len(), "saving");
        save_to_file(&bytes, path)?;
    }
    Ok(())
}

// cargo run --release --features="gen" --bin gen-params dummy-vk 100 "./parameters"
fn gen_dummy_vk(input_size: usize, directory: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut prng = ChaChaRng::from_entropy();
    let vk = dummy_verification_key(input_size, &mut prng);
    let mut path = directory;
    path.push("dummy-verification-key.bin");
    tracing::info!(path = %path.display(), input_size, "saving");
    save_to_file(&vk.to_bytes(), path)?;
    Ok(())
}
