//! Helpers for the length-prefixed byte encoding of keys and proofs.
//!
//! Group elements use their compressed form, field elements the 32-byte
//! big-endian form, and every vector is preceded by its length as a
//! big-endian u64.
use crate::errors::{Result, SnarkError};
use crate::r1cs::{LinearCombination, LinearTerm, R1CSConstraint, R1CSConstraintSystem, Variable};
use pghr_algebra::prelude::*;

pub(crate) fn write_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u64).to_be_bytes());
}

pub(crate) fn read_len(bytes: &mut &[u8]) -> Result<usize> {
    let len = read_u64_be(bytes)?;
    usize::try_from(len).map_err(|_| SnarkError::Algebra(AlgebraError::DeserializationError))
}

pub(crate) fn write_group<G: Group>(out: &mut Vec<u8>, p: &G) {
    out.extend_from_slice(&p.to_compressed_bytes());
}

pub(crate) fn read_group<G: Group>(bytes: &mut &[u8]) -> Result<G> {
    let chunk = take_bytes(bytes, G::COMPRESSED_LEN)?;
    Ok(G::from_compressed_bytes(chunk)?)
}

pub(crate) fn write_group_vec<G: Group>(out: &mut Vec<u8>, v: &[G]) {
    write_len(out, v.len());
    for p in v.iter() {
        write_group(out, p);
    }
}

/// Read a length-prefixed vector, never reserving more than the input could hold.
pub(crate) fn read_vec<T>(
    bytes: &mut &[u8],
    elem_len: usize,
    mut read: impl FnMut(&mut &[u8]) -> Result<T>,
) -> Result<Vec<T>> {
    let len = read_len(bytes)?;
    if len.saturating_mul(elem_len) > bytes.len() {
        return Err(SnarkError::Algebra(AlgebraError::DeserializationError));
    }
    let mut res = Vec::with_capacity(len);
    for _ in 0..len {
        res.push(read(bytes)?);
    }
    Ok(res)
}

pub(crate) fn read_group_vec<G: Group>(bytes: &mut &[u8]) -> Result<Vec<G>> {
    read_vec(bytes, G::COMPRESSED_LEN, read_group::<G>)
}

pub(crate) fn write_scalar<F: Scalar>(out: &mut Vec<u8>, s: &F) {
    out.extend_from_slice(&s.to_bytes());
}

pub(crate) fn read_scalar<F: Scalar>(bytes: &mut &[u8]) -> Result<F> {
    let chunk = take_bytes(bytes, F::bytes_len())?;
    Ok(F::from_bytes(chunk)?)
}

fn write_linear_combination<F: Scalar>(out: &mut Vec<u8>, lc: &LinearCombination<F>) {
    write_len(out, lc.terms.len());
    for t in lc.terms.iter() {
        write_len(out, t.variable.index());
        write_scalar(out, &t.coeff);
    }
}

fn read_linear_combination<F: Scalar>(bytes: &mut &[u8]) -> Result<LinearCombination<F>> {
    let terms = read_vec(bytes, 8 + F::bytes_len(), |b| {
        let variable = Variable(read_len(b)?);
        let coeff = read_scalar(b)?;
        Ok(LinearTerm::new(variable, coeff))
    })?;
    Ok(LinearCombination { terms })
}

/// Encode the sizes, then each constraint as the three linear combinations.
pub(crate) fn write_constraint_system<F: Scalar>(out: &mut Vec<u8>, cs: &R1CSConstraintSystem<F>) {
    write_len(out, cs.primary_input_size);
    write_len(out, cs.auxiliary_input_size);
    write_len(out, cs.constraints.len());
    for c in cs.constraints.iter() {
        write_linear_combination(out, &c.a);
        write_linear_combination(out, &c.b);
        write_linear_combination(out, &c.c);
    }
}

/// Decode a constraint system, rejecting one that refers to undeclared variables.
pub(crate) fn read_constraint_system<F: Scalar>(
    bytes: &mut &[u8],
) -> Result<R1CSConstraintSystem<F>> {
    let primary_input_size = read_len(bytes)?;
    let auxiliary_input_size = read_len(bytes)?;
    // each constraint holds at least three term counts
    let constraints = read_vec(bytes, 24, |b| {
        let a = read_linear_combination(b)?;
        let b_lc = read_linear_combination(b)?;
        let c = read_linear_combination(b)?;
        Ok(R1CSConstraint::new(a, b_lc, c))
    })?;
    let cs = R1CSConstraintSystem {
        primary_input_size,
        auxiliary_input_size,
        constraints,
    };
    if primary_input_size.checked_add(auxiliary_input_size).is_none() || !cs.is_valid() {
        return Err(SnarkError::ConstraintSystemInvalid);
    }
    Ok(cs)
}

/// Fail unless the whole input has been consumed.
pub(crate) fn expect_end(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        Ok(())
    } else {
        Err(SnarkError::Algebra(AlgebraError::DeserializationError))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::r1cs::{generate_r1cs_example_with_field_input, R1CSExample};
    use pghr_algebra::bn254::{BN254Scalar, BN254G1, BN254G2};

    #[test]
    fn constraint_system_encoding() {
        let mut prng = test_rng();
        let example: R1CSExample<BN254Scalar> =
            generate_r1cs_example_with_field_input(30, 4, &mut prng).unwrap();
        let mut out = vec![];
        write_constraint_system(&mut out, &example.constraint_system);
        let mut bytes = out.as_slice();
        let cs = read_constraint_system::<BN254Scalar>(&mut bytes).unwrap();
        assert!(expect_end(bytes).is_ok());
        assert_eq!(cs, example.constraint_system);

        // truncated input
        let mut bytes = &out[..out.len() - 1];
        assert!(read_constraint_system::<BN254Scalar>(&mut bytes).is_err());

        // the last term refers to an undeclared variable once the auxiliary size shrinks
        let mut shrunk = out.clone();
        shrunk[15] -= 1;
        let mut bytes = shrunk.as_slice();
        assert_eq!(
            read_constraint_system::<BN254Scalar>(&mut bytes),
            Err(SnarkError::ConstraintSystemInvalid)
        );
    }

    #[test]
    fn group_vector_encoding() {
        let mut prng = test_rng();
        let g1: Vec<BN254G1> = (0..5).map(|_| BN254G1::random(&mut prng)).collect();
        let g2: Vec<BN254G2> = (0..3).map(|_| BN254G2::random(&mut prng)).collect();
        let mut out = vec![];
        write_group_vec(&mut out, &g1);
        write_group_vec(&mut out, &g2);
        assert_eq!(out.len(), 8 + 5 * 33 + 8 + 3 * 65);

        let mut bytes = out.as_slice();
        assert_eq!(read_group_vec::<BN254G1>(&mut bytes).unwrap(), g1);
        assert_eq!(read_group_vec::<BN254G2>(&mut bytes).unwrap(), g2);
        assert!(expect_end(bytes).is_ok());

        // a length prefix larger than the remaining input
        let mut bogus = vec![];
        write_len(&mut bogus, 1 << 40);
        let mut bytes = bogus.as_slice();
        assert!(read_group_vec::<BN254G1>(&mut bytes).is_err());
    }
}
