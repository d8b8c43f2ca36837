use super::knowledge_commitment::{KnowledgeCommitment, KnowledgeCommitmentVector};
use super::sparse_vector::{AccumulationVector, SparseVector};
use crate::errors::{Result, SnarkError};
use crate::qap::qap_domain;
use crate::r1cs::R1CSConstraintSystem;
use crate::utils::{
    expect_end, read_constraint_system, read_group, read_group_vec, write_constraint_system,
    write_group, write_group_vec,
};
use pghr_algebra::{
    bn254::{
        precompute_g1, precompute_g2, BN254G1Prepared, BN254G2Prepared, BN254Scalar, BN254G1,
        BN254G2,
    },
    prelude::*,
};

pub(crate) const G1_SIZE_IN_BITS: usize = BN254G1::COMPRESSED_LEN * 8;
pub(crate) const G2_SIZE_IN_BITS: usize = BN254G2::COMPRESSED_LEN * 8;

/// The proving key: the constraint system and the query vectors the prover
/// combines with the assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvingKey {
    /// `(rA A_i(t), rA alphaA A_i(t))`, plus the entry for `Z(t)` at index `num_variables + 1`.
    pub a_query: KnowledgeCommitmentVector<BN254G1, BN254G1>,
    /// `(rB B_i(t) in G2, rB alphaB B_i(t) in G1)`, plus `Z(t)`.
    pub b_query: KnowledgeCommitmentVector<BN254G2, BN254G1>,
    /// `(rC C_i(t), rC alphaC C_i(t))`, plus `Z(t)`.
    pub c_query: KnowledgeCommitmentVector<BN254G1, BN254G1>,
    /// `t^i` for `i` in `0..=degree`.
    pub h_query: Vec<BN254G1>,
    /// `beta (rA A_i(t) + rB B_i(t) + rC C_i(t))`, plus `beta rA Z(t), beta rB Z(t), beta rC Z(t)`.
    pub k_query: Vec<BN254G1>,
    /// The constraint system, after swapping A and B when beneficial.
    pub constraint_system: R1CSConstraintSystem<BN254Scalar>,
}

/// The verification key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    /// `alphaA * P2`.
    pub alpha_a_g2: BN254G2,
    /// `alphaB * P1`.
    pub alpha_b_g1: BN254G1,
    /// `alphaC * P2`.
    pub alpha_c_g2: BN254G2,
    /// `gamma * P2`.
    pub gamma_g2: BN254G2,
    /// `gamma beta * P1`.
    pub gamma_beta_g1: BN254G1,
    /// `gamma beta * P2`.
    pub gamma_beta_g2: BN254G2,
    /// `rC Z(t) * P2`.
    pub rc_z_g2: BN254G2,
    /// `rA A_i(t) * P1` for the constant one and each primary input.
    pub encoded_ic_query: AccumulationVector<BN254G1>,
}

/// A verification key with the fixed pairing arguments precomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedVerificationKey {
    /// The G2 generator.
    pub pp_g2_one_precomp: BN254G2Prepared,
    /// `alphaA * P2`.
    pub vk_alpha_a_g2_precomp: BN254G2Prepared,
    /// `alphaB * P1`.
    pub vk_alpha_b_g1_precomp: BN254G1Prepared,
    /// `alphaC * P2`.
    pub vk_alpha_c_g2_precomp: BN254G2Prepared,
    /// `rC Z(t) * P2`.
    pub vk_rc_z_g2_precomp: BN254G2Prepared,
    /// `gamma * P2`.
    pub vk_gamma_g2_precomp: BN254G2Prepared,
    /// `gamma beta * P1`.
    pub vk_gamma_beta_g1_precomp: BN254G1Prepared,
    /// `gamma beta * P2`.
    pub vk_gamma_beta_g2_precomp: BN254G2Prepared,
    /// The input consistency vector.
    pub encoded_ic_query: AccumulationVector<BN254G1>,
}

/// The output of the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    /// The proving key.
    pub pk: ProvingKey,
    /// The verification key.
    pub vk: VerificationKey,
}

impl ProvingKey {
    /// The number of G1 elements of the dense queries.
    pub fn g1_size(&self) -> usize {
        2 * (self.a_query.domain_size + self.c_query.domain_size)
            + self.b_query.domain_size
            + self.h_query.len()
            + self.k_query.len()
    }

    /// The number of G2 elements of the dense queries.
    pub fn g2_size(&self) -> usize {
        self.b_query.domain_size
    }

    /// The number of G1 elements actually stored.
    pub fn g1_sparse_size(&self) -> usize {
        2 * (self.a_query.len() + self.c_query.len())
            + self.b_query.len()
            + self.h_query.len()
            + self.k_query.len()
    }

    /// The number of G2 elements actually stored.
    pub fn g2_sparse_size(&self) -> usize {
        self.b_query.len()
    }

    /// The size of the stored group elements in bits.
    pub fn size_in_bits(&self) -> usize {
        self.g1_sparse_size() * G1_SIZE_IN_BITS + self.g2_sparse_size() * G2_SIZE_IN_BITS
    }

    /// Log the size statistics.
    pub fn print_size(&self) {
        tracing::info!(
            g1 = self.g1_size(),
            g1_sparse = self.g1_sparse_size(),
            g2 = self.g2_size(),
            g2_sparse = self.g2_sparse_size(),
            size_in_bits = self.size_in_bits(),
            "proving key size"
        );
    }

    /// Check that the query vectors have the lengths the generator gives them
    /// for the stored constraint system.
    pub fn check_shape(&self) -> Result<()> {
        let cs = &self.constraint_system;
        let degree = qap_domain(cs)?.size;
        let nv = cs.num_variables();
        if self.a_query.domain_size != nv + 2
            || self.b_query.domain_size != nv + 2
            || self.c_query.domain_size != nv + 2
            || self.h_query.len() != degree + 1
            || self.k_query.len() != nv + 4
        {
            return Err(SnarkError::ProvingKeyMismatch);
        }
        Ok(())
    }

    /// Encode as the query vectors followed by the constraint system.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![];
        self.a_query.write(&mut out, |o, kc| kc.write(o));
        self.b_query.write(&mut out, |o, kc| kc.write(o));
        self.c_query.write(&mut out, |o, kc| kc.write(o));
        write_group_vec(&mut out, &self.h_query);
        write_group_vec(&mut out, &self.k_query);
        write_constraint_system(&mut out, &self.constraint_system);
        out
    }

    /// Decode a proving key, checking every group element.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut bytes = bytes;
        let a_query = SparseVector::read(
            &mut bytes,
            KnowledgeCommitment::<BN254G1, BN254G1>::ENCODED_LEN,
            KnowledgeCommitment::<BN254G1, BN254G1>::read,
        )?;
        let b_query = SparseVector::read(
            &mut bytes,
            KnowledgeCommitment::<BN254G2, BN254G1>::ENCODED_LEN,
            KnowledgeCommitment::<BN254G2, BN254G1>::read,
        )?;
        let c_query = SparseVector::read(
            &mut bytes,
            KnowledgeCommitment::<BN254G1, BN254G1>::ENCODED_LEN,
            KnowledgeCommitment::<BN254G1, BN254G1>::read,
        )?;
        let h_query = read_group_vec(&mut bytes)?;
        let k_query = read_group_vec(&mut bytes)?;
        let constraint_system = read_constraint_system(&mut bytes)?;
        expect_end(bytes)?;
        let pk = Self {
            a_query,
            b_query,
            c_query,
            h_query,
            k_query,
            constraint_system,
        };
        pk.check_shape()?;
        Ok(pk)
    }
}

impl VerificationKey {
    /// The number of G1 elements.
    pub fn g1_size(&self) -> usize {
        2 + self.encoded_ic_query.size()
    }

    /// The number of G2 elements.
    pub fn g2_size(&self) -> usize {
        5
    }

    /// The size of the group elements in bits.
    pub fn size_in_bits(&self) -> usize {
        self.g1_size() * G1_SIZE_IN_BITS + self.g2_size() * G2_SIZE_IN_BITS
    }

    /// Log the size statistics.
    pub fn print_size(&self) {
        tracing::info!(
            g1 = self.g1_size(),
            g2 = self.g2_size(),
            size_in_bits = self.size_in_bits(),
            "verification key size"
        );
    }

    /// Encode the seven fixed elements followed by the input consistency vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![];
        write_group(&mut out, &self.alpha_a_g2);
        write_group(&mut out, &self.alpha_b_g1);
        write_group(&mut out, &self.alpha_c_g2);
        write_group(&mut out, &self.gamma_g2);
        write_group(&mut out, &self.gamma_beta_g1);
        write_group(&mut out, &self.gamma_beta_g2);
        write_group(&mut out, &self.rc_z_g2);
        self.encoded_ic_query.write(&mut out);
        out
    }

    /// Decode a verification key, checking every group element.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut bytes = bytes;
        let vk = Self {
            alpha_a_g2: read_group(&mut bytes)?,
            alpha_b_g1: read_group(&mut bytes)?,
            alpha_c_g2: read_group(&mut bytes)?,
            gamma_g2: read_group(&mut bytes)?,
            gamma_beta_g1: read_group(&mut bytes)?,
            gamma_beta_g2: read_group(&mut bytes)?,
            rc_z_g2: read_group(&mut bytes)?,
            encoded_ic_query: AccumulationVector::read(&mut bytes)?,
        };
        expect_end(bytes)?;
        Ok(vk)
    }

    /// Precompute the pairing arguments that do not depend on the proof.
    pub fn process(&self) -> ProcessedVerificationKey {
        ProcessedVerificationKey {
            pp_g2_one_precomp: precompute_g2(&BN254G2::get_base()),
            vk_alpha_a_g2_precomp: precompute_g2(&self.alpha_a_g2),
            vk_alpha_b_g1_precomp: precompute_g1(&self.alpha_b_g1),
            vk_alpha_c_g2_precomp: precompute_g2(&self.alpha_c_g2),
            vk_rc_z_g2_precomp: precompute_g2(&self.rc_z_g2),
            vk_gamma_g2_precomp: precompute_g2(&self.gamma_g2),
            vk_gamma_beta_g1_precomp: precompute_g1(&self.gamma_beta_g1),
            vk_gamma_beta_g2_precomp: precompute_g2(&self.gamma_beta_g2),
            encoded_ic_query: self.encoded_ic_query.clone(),
        }
    }
}

macro_rules! to_from_bytes_snark {
    ($t:ident) => {
        impl PghrFromToBytes for $t {
            fn pghr_to_bytes(&self) -> Vec<u8> {
                self.to_bytes()
            }
            fn pghr_from_bytes(bytes: &[u8]) -> core::result::Result<$t, AlgebraError> {
                $t::from_bytes(bytes).map_err(|_| AlgebraError::DeserializationError)
            }
        }
        serialize_deserialize!($t);
    };
}
pub(crate) use to_from_bytes_snark;

to_from_bytes_snark!(ProvingKey);
to_from_bytes_snark!(VerificationKey);
