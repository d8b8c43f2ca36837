use crate::errors::{Result, SnarkError};
use crate::r1cs::R1CSConstraintSystem;
use ark_std::{collections::BTreeMap, end_timer, start_timer};
use pghr_algebra::prelude::*;

mod domain;

pub use domain::{primitive_nth_root_of_unity, EvaluationDomain};

/// The size of the domain of the QAP of a constraint system: one point per
/// constraint, plus one per input (and the constant one) for the extra
/// constraints `input_i * 0 = 0` that keep the input polynomials independent.
pub(crate) fn qap_domain<F: Scalar>(cs: &R1CSConstraintSystem<F>) -> Result<EvaluationDomain<F>> {
    EvaluationDomain::new(cs.num_constraints() + cs.num_inputs() + 1)
}

/// A QAP with its polynomials `A_i, B_i, C_i` given by their values on the
/// domain, stored sparsely as `point index -> value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QAPInstance<F> {
    /// The evaluation domain.
    pub domain: EvaluationDomain<F>,
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The degree of the vanishing polynomial, which is the domain size.
    pub degree: usize,
    /// The number of primary inputs.
    pub num_inputs: usize,
    /// `A_i` in the Lagrange basis, for `i` in `0..=num_variables`.
    pub a_in_lagrange_basis: Vec<BTreeMap<usize, F>>,
    /// `B_i` in the Lagrange basis.
    pub b_in_lagrange_basis: Vec<BTreeMap<usize, F>>,
    /// `C_i` in the Lagrange basis.
    pub c_in_lagrange_basis: Vec<BTreeMap<usize, F>>,
}

/// A QAP with its polynomials evaluated at a single point `t`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QAPInstanceEvaluation<F> {
    /// The evaluation domain.
    pub domain: EvaluationDomain<F>,
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The degree of the vanishing polynomial.
    pub degree: usize,
    /// The number of primary inputs.
    pub num_inputs: usize,
    /// The evaluation point.
    pub t: F,
    /// `A_i(t)` for `i` in `0..=num_variables`.
    pub at: Vec<F>,
    /// `B_i(t)`.
    pub bt: Vec<F>,
    /// `C_i(t)`.
    pub ct: Vec<F>,
    /// `t^i` for `i` in `0..=degree`.
    pub ht: Vec<F>,
    /// `Z(t)`.
    pub zt: F,
}

/// A witness for a QAP: the assignment plus the coefficients of `H`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QAPWitness<F> {
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The degree of the vanishing polynomial.
    pub degree: usize,
    /// The number of primary inputs.
    pub num_inputs: usize,
    /// The blinding factor of `A`.
    pub d1: F,
    /// The blinding factor of `B`.
    pub d2: F,
    /// The blinding factor of `C`.
    pub d3: F,
    /// The full assignment, primary then auxiliary.
    pub coefficients_for_abcs: Vec<F>,
    /// The `degree + 1` coefficients of `H`.
    pub coefficients_for_h: Vec<F>,
}

/// Reduce a constraint system to a QAP given in the Lagrange basis.
///
/// Constraint `j` is mapped to the domain point `w^j` and input `i` (with
/// the constant one as input 0) to `w^(num_constraints + i)`.
pub fn instance_map<F: Scalar>(cs: &R1CSConstraintSystem<F>) -> Result<QAPInstance<F>> {
    if !cs.is_valid() {
        return Err(SnarkError::ConstraintSystemInvalid);
    }
    let domain = qap_domain(cs)?;
    let n = cs.num_variables() + 1;

    let mut a_in_lagrange_basis = vec![BTreeMap::new(); n];
    let mut b_in_lagrange_basis = vec![BTreeMap::new(); n];
    let mut c_in_lagrange_basis = vec![BTreeMap::new(); n];

    for (i, a) in a_in_lagrange_basis
        .iter_mut()
        .enumerate()
        .take(cs.num_inputs() + 1)
    {
        a.insert(cs.num_constraints() + i, F::one());
    }

    for (j, constraint) in cs.constraints.iter().enumerate() {
        for t in constraint.a.terms.iter() {
            add_at(&mut a_in_lagrange_basis[t.variable.0], j, &t.coeff);
        }
        for t in constraint.b.terms.iter() {
            add_at(&mut b_in_lagrange_basis[t.variable.0], j, &t.coeff);
        }
        for t in constraint.c.terms.iter() {
            add_at(&mut c_in_lagrange_basis[t.variable.0], j, &t.coeff);
        }
    }

    Ok(QAPInstance {
        domain,
        num_variables: cs.num_variables(),
        degree: domain.size,
        num_inputs: cs.num_inputs(),
        a_in_lagrange_basis,
        b_in_lagrange_basis,
        c_in_lagrange_basis,
    })
}

fn add_at<F: Scalar>(map: &mut BTreeMap<usize, F>, point: usize, coeff: &F) {
    map.entry(point).or_insert_with(F::zero).add_assign(coeff);
}

/// Reduce a constraint system to a QAP evaluated at `t`, without
/// materialising the polynomials.
pub fn instance_map_with_evaluation<F: Scalar>(
    cs: &R1CSConstraintSystem<F>,
    t: &F,
) -> Result<QAPInstanceEvaluation<F>> {
    if !cs.is_valid() {
        return Err(SnarkError::ConstraintSystemInvalid);
    }
    let timer = start_timer!(|| "QAP instance map with evaluation");
    let domain = qap_domain(cs)?;
    let n = cs.num_variables() + 1;

    let mut at = vec![F::zero(); n];
    let mut bt = vec![F::zero(); n];
    let mut ct = vec![F::zero(); n];

    let zt = domain.compute_z(t);
    let u = domain.lagrange_coeffs(t);

    for (i, a) in at.iter_mut().enumerate().take(cs.num_inputs() + 1) {
        *a = u[cs.num_constraints() + i];
    }

    for (j, constraint) in cs.constraints.iter().enumerate() {
        for term in constraint.a.terms.iter() {
            at[term.variable.0].add_assign(&u[j].mul(&term.coeff));
        }
        for term in constraint.b.terms.iter() {
            bt[term.variable.0].add_assign(&u[j].mul(&term.coeff));
        }
        for term in constraint.c.terms.iter() {
            ct[term.variable.0].add_assign(&u[j].mul(&term.coeff));
        }
    }

    let mut ht = Vec::with_capacity(domain.size + 1);
    let mut ti = F::one();
    for _ in 0..=domain.size {
        ht.push(ti);
        ti.mul_assign(t);
    }
    end_timer!(timer);

    Ok(QAPInstanceEvaluation {
        domain,
        num_variables: cs.num_variables(),
        degree: domain.size,
        num_inputs: cs.num_inputs(),
        t: *t,
        at,
        bt,
        ct,
        ht,
        zt,
    })
}

/// Compute the QAP witness of an assignment, with blinding factors
/// `d1, d2, d3`: the coefficients of
/// `H = ((A + d1 Z)(B + d2 Z) - (C + d3 Z)) / Z`.
pub fn witness_map<F: Scalar>(
    cs: &R1CSConstraintSystem<F>,
    primary_input: &[F],
    auxiliary_input: &[F],
    d1: &F,
    d2: &F,
    d3: &F,
) -> Result<QAPWitness<F>> {
    if primary_input.len() != cs.num_inputs()
        || primary_input.len() + auxiliary_input.len() != cs.num_variables()
    {
        return Err(SnarkError::InputSizeMismatch);
    }
    let timer = start_timer!(|| "QAP witness map");
    let domain = qap_domain(cs)?;
    let m = domain.size;

    let full_assignment: Vec<F> = primary_input
        .iter()
        .chain(auxiliary_input.iter())
        .copied()
        .collect();

    let mut a = vec![F::zero(); m];
    let mut b = vec![F::zero(); m];
    // the extra constraints `input_i * 0 = 0`
    for i in 0..=cs.num_inputs() {
        a[cs.num_constraints() + i] = if i > 0 {
            full_assignment[i - 1]
        } else {
            F::one()
        };
    }
    for (j, constraint) in cs.constraints.iter().enumerate() {
        a[j].add_assign(&constraint.a.evaluate(&full_assignment)?);
        b[j].add_assign(&constraint.b.evaluate(&full_assignment)?);
    }

    domain.ifft(&mut a)?;
    domain.ifft(&mut b)?;

    // (d2 A + d1 B - d3) + d1 d2 Z
    let mut coefficients_for_h = vec![F::zero(); m + 1];
    for (h, (ai, bi)) in coefficients_for_h.iter_mut().zip(a.iter().zip(b.iter())) {
        *h = d2.mul(ai).add(&d1.mul(bi));
    }
    coefficients_for_h[0].sub_assign(d3);
    domain.add_poly_z(&d1.mul(d2), &mut coefficients_for_h)?;

    domain.coset_fft(&mut a)?;
    domain.coset_fft(&mut b)?;
    let mut h_tmp: Vec<F> = a.iter().zip(b.iter()).map(|(x, y)| x.mul(y)).collect();
    drop(a);
    drop(b);

    let mut c = vec![F::zero(); m];
    for (j, constraint) in cs.constraints.iter().enumerate() {
        c[j].add_assign(&constraint.c.evaluate(&full_assignment)?);
    }
    domain.ifft(&mut c)?;
    domain.coset_fft(&mut c)?;
    for (h, ci) in h_tmp.iter_mut().zip(c.iter()) {
        h.sub_assign(ci);
    }

    domain.divide_by_z_on_coset(&mut h_tmp)?;
    domain.coset_ifft(&mut h_tmp)?;
    for (h, hi) in coefficients_for_h.iter_mut().zip(h_tmp.iter()) {
        h.add_assign(hi);
    }
    end_timer!(timer);

    Ok(QAPWitness {
        num_variables: cs.num_variables(),
        degree: m,
        num_inputs: cs.num_inputs(),
        d1: *d1,
        d2: *d2,
        d3: *d3,
        coefficients_for_abcs: full_assignment,
        coefficients_for_h,
    })
}

impl<F: Scalar> QAPWitness<F> {
    fn matches(&self, num_variables: usize, degree: usize, num_inputs: usize) -> bool {
        self.num_variables == num_variables
            && self.degree == degree
            && self.num_inputs == num_inputs
            && self.coefficients_for_abcs.len() == num_variables
            && self.coefficients_for_h.len() == degree + 1
    }
}

impl<F: Scalar> QAPInstance<F> {
    /// Check that `(A + d1 Z)(B + d2 Z) - (C + d3 Z) = H Z` as polynomials.
    ///
    /// Both sides have degree at most `2 * degree`, so comparing them on a
    /// domain of more than `2 * degree` points decides the identity.
    pub fn is_satisfied(&self, witness: &QAPWitness<F>) -> bool {
        if !witness.matches(self.num_variables, self.degree, self.num_inputs)
            || self.a_in_lagrange_basis.len() != self.num_variables + 1
            || self.b_in_lagrange_basis.len() != self.num_variables + 1
            || self.c_in_lagrange_basis.len() != self.num_variables + 1
        {
            tracing::debug!("QAP witness does not match the instance");
            return false;
        }
        let check = || -> Result<bool> {
            let large = EvaluationDomain::<F>::new(2 * self.degree + 1)?;
            let a = self.combine(&self.a_in_lagrange_basis, witness, &witness.d1, &large)?;
            let b = self.combine(&self.b_in_lagrange_basis, witness, &witness.d2, &large)?;
            let c = self.combine(&self.c_in_lagrange_basis, witness, &witness.d3, &large)?;
            let mut h = witness.coefficients_for_h.clone();
            large.fft(&mut h)?;

            let one = F::one();
            let mut x_m = F::one();
            let step = large.group_gen.pow(&[self.degree as u64]);
            for i in 0..large.size {
                // Z(x) = x^degree - 1
                let z = x_m.sub(&one);
                if a[i].mul(&b[i]).sub(&c[i]) != h[i].mul(&z) {
                    tracing::debug!(point = i, "QAP divisibility fails");
                    return Ok(false);
                }
                x_m.mul_assign(&step);
            }
            Ok(true)
        };
        check().unwrap_or(false)
    }

    /// The evaluations on `large` of `sum_i w_i P_i + d Z`, with `w_0 = 1`.
    fn combine(
        &self,
        basis: &[BTreeMap<usize, F>],
        witness: &QAPWitness<F>,
        d: &F,
        large: &EvaluationDomain<F>,
    ) -> Result<Vec<F>> {
        let mut evals = vec![F::zero(); self.degree];
        for (i, poly) in basis.iter().enumerate() {
            let w = if i == 0 {
                F::one()
            } else {
                witness.coefficients_for_abcs[i - 1]
            };
            for (point, value) in poly.iter() {
                evals[*point].add_assign(&w.mul(value));
            }
        }
        self.domain.ifft(&mut evals)?;
        evals.push(F::zero());
        self.domain.add_poly_z(d, &mut evals)?;
        large.fft(&mut evals)?;
        Ok(evals)
    }
}

impl<F: Scalar> QAPInstanceEvaluation<F> {
    /// Check that `(A(t) + d1 Z(t))(B(t) + d2 Z(t)) - (C(t) + d3 Z(t)) = H(t) Z(t)`.
    pub fn is_satisfied(&self, witness: &QAPWitness<F>) -> bool {
        if !witness.matches(self.num_variables, self.degree, self.num_inputs)
            || self.at.len() != self.num_variables + 1
            || self.bt.len() != self.num_variables + 1
            || self.ct.len() != self.num_variables + 1
            || self.ht.len() != self.degree + 1
            || self.zt != self.domain.compute_z(&self.t)
        {
            tracing::debug!("QAP witness does not match the evaluated instance");
            return false;
        }

        let eval = |vals: &[F], d: &F| -> F {
            let mut acc = vals[0].add(&d.mul(&self.zt));
            for (v, w) in vals[1..].iter().zip(witness.coefficients_for_abcs.iter()) {
                acc.add_assign(&v.mul(w));
            }
            acc
        };
        let ans_a = eval(&self.at, &witness.d1);
        let ans_b = eval(&self.bt, &witness.d2);
        let ans_c = eval(&self.ct, &witness.d3);
        let ans_h = self
            .ht
            .iter()
            .zip(witness.coefficients_for_h.iter())
            .fold(F::zero(), |acc, (x, y)| acc.add(&x.mul(y)));

        if ans_a.mul(&ans_b).sub(&ans_c) != ans_h.mul(&self.zt) {
            tracing::debug!("QAP divisibility fails at t");
            return false;
        }
        true
    }
}
