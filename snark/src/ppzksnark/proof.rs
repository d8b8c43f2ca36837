use super::keys::{to_from_bytes_snark, G1_SIZE_IN_BITS, G2_SIZE_IN_BITS};
use super::knowledge_commitment::KnowledgeCommitment;
use crate::errors::Result;
use crate::utils::{expect_end, read_group, write_group};
use pghr_algebra::{
    bn254::{BN254G1, BN254G2},
    prelude::*,
};

/// The length of an encoded proof: seven G1 elements and one G2 element.
pub const PROOF_LEN: usize = 7 * BN254G1::COMPRESSED_LEN + BN254G2::COMPRESSED_LEN;

/// A proof of the r1cs_ppzksnark.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// The A commitment and its knowledge component.
    pub g_a: KnowledgeCommitment<BN254G1, BN254G1>,
    /// The B commitment (in G2) and its knowledge component (in G1).
    pub g_b: KnowledgeCommitment<BN254G2, BN254G1>,
    /// The C commitment and its knowledge component.
    pub g_c: KnowledgeCommitment<BN254G1, BN254G1>,
    /// The commitment to the quotient polynomial H.
    pub g_h: BN254G1,
    /// The commitment tying A, B and C to the same assignment.
    pub g_k: BN254G1,
}

impl Default for Proof {
    /// An invalid proof made of valid curve points: every element is a generator.
    fn default() -> Self {
        Self {
            g_a: KnowledgeCommitment::one(),
            g_b: KnowledgeCommitment::one(),
            g_c: KnowledgeCommitment::one(),
            g_h: BN254G1::get_base(),
            g_k: BN254G1::get_base(),
        }
    }
}

impl Proof {
    /// The number of G1 elements.
    pub fn g1_size(&self) -> usize {
        7
    }

    /// The number of G2 elements.
    pub fn g2_size(&self) -> usize {
        1
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
            "proof size"
        );
    }

    /// Check that every element satisfies its curve equation.
    pub fn is_well_formed(&self) -> bool {
        self.g_a.is_well_formed()
            && self.g_b.is_well_formed()
            && self.g_c.is_well_formed()
            && self.g_h.is_well_formed()
            && self.g_k.is_well_formed()
    }

    /// Encode as `g_A.g, g_A.h, g_B.g, g_B.h, g_C.g, g_C.h, g_K, g_H`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PROOF_LEN);
        self.g_a.write(&mut out);
        self.g_b.write(&mut out);
        self.g_c.write(&mut out);
        write_group(&mut out, &self.g_k);
        write_group(&mut out, &self.g_h);
        out
    }

    /// Decode a proof, rejecting points off the curve or outside the subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut bytes = bytes;
        let g_a = KnowledgeCommitment::<BN254G1, BN254G1>::read(&mut bytes)?;
        let g_b = KnowledgeCommitment::<BN254G2, BN254G1>::read(&mut bytes)?;
        let g_c = KnowledgeCommitment::<BN254G1, BN254G1>::read(&mut bytes)?;
        let g_k = read_group(&mut bytes)?;
        let g_h = read_group(&mut bytes)?;
        expect_end(bytes)?;
        Ok(Self {
            g_a,
            g_b,
            g_c,
            g_h,
            g_k,
        })
    }
}

to_from_bytes_snark!(Proof);

#[cfg(test)]
mod test {
    use super::{Proof, PROOF_LEN};
    use crate::errors::SnarkError;
    use pghr_algebra::prelude::*;

    #[test]
    fn default_proof_encoding() {
        let proof = Proof::default();
        assert!(proof.is_well_formed());
        assert_eq!(PROOF_LEN, 296);
        assert_eq!(proof.size_in_bits(), PROOF_LEN * 8);

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), PROOF_LEN);
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);

        // g_A.g is the G1 generator (1, 2)
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[32], 1);
        // g_B.g is a G2 point
        assert_eq!(bytes[66] & !1, 0x0a);

        assert_eq!(
            Proof::from_bytes(&bytes[1..]),
            Err(SnarkError::Algebra(AlgebraError::DeserializationError))
        );
        let mut longer = bytes.clone();
        longer.push(0);
        assert!(Proof::from_bytes(&longer).is_err());

        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(serde_json::from_str::<Proof>(&json).unwrap(), proof);
        let bin = bincode::serialize(&proof).unwrap();
        assert_eq!(bincode::deserialize::<Proof>(&bin).unwrap(), proof);
    }

    #[test]
    fn malformed_point_is_rejected() {
        let mut proof = Proof::default();
        assert!(proof.is_well_formed());
        proof.g_h.y.add_assign(&proof.g_h.x);
        assert!(!proof.is_well_formed());
    }
}
