use super::{LinearCombination, R1CSConstraint, R1CSConstraintSystem, Variable};
use pghr_algebra::prelude::*;

/// A constraint system together with a satisfying assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct R1CSExample<F> {
    /// The constraint system.
    pub constraint_system: R1CSConstraintSystem<F>,
    /// The primary input.
    pub primary_input: Vec<F>,
    /// The auxiliary input.
    pub auxiliary_input: Vec<F>,
}

impl<F: Scalar> R1CSExample<F> {
    fn from_full_assignment(
        constraint_system: R1CSConstraintSystem<F>,
        mut full_assignment: Vec<F>,
    ) -> Self {
        let auxiliary_input = full_assignment.split_off(constraint_system.num_inputs());
        Self {
            constraint_system,
            primary_input: full_assignment,
            auxiliary_input,
        }
    }
}

/// Build a satisfiable system of `num_constraints` constraints over field
/// inputs: a chain alternating `a + b = c` and `a * b = c` started from two
/// random values, closed by one constraint squaring the sum of all variables.
///
/// Returns `None` unless `1 <= num_constraints` and
/// `num_inputs <= num_constraints + 2`.
pub fn generate_r1cs_example_with_field_input<F: Scalar, R: CryptoRng + RngCore>(
    num_constraints: usize,
    num_inputs: usize,
    rng: &mut R,
) -> Option<R1CSExample<F>> {
    if num_constraints == 0 || num_inputs > num_constraints + 2 {
        return None;
    }

    let mut cs = R1CSConstraintSystem::new(num_inputs, 2 + num_constraints - num_inputs);
    let mut a = F::random(rng);
    let mut b = F::random(rng);
    let mut full_assignment = vec![a, b];

    for i in 0..num_constraints - 1 {
        let mut lc_a = LinearCombination::new();
        let mut lc_b = LinearCombination::new();
        let mut lc_c = LinearCombination::new();
        let tmp = if i % 2 == 1 {
            // a * b = c
            lc_a.add_term(Variable(i + 1), F::one());
            lc_b.add_term(Variable(i + 2), F::one());
            lc_c.add_term(Variable(i + 3), F::one());
            a * b
        } else {
            // a + b = c
            lc_b.add_term(Variable::ONE, F::one());
            lc_a.add_term(Variable(i + 1), F::one());
            lc_a.add_term(Variable(i + 2), F::one());
            lc_c.add_term(Variable(i + 3), F::one());
            a + b
        };
        cs.add_constraint(R1CSConstraint::new(lc_a, lc_b, lc_c));
        full_assignment.push(tmp);
        a = b;
        b = tmp;
    }

    let mut lc_a = LinearCombination::new();
    let mut lc_b = LinearCombination::new();
    let mut lc_c = LinearCombination::new();
    let mut sum = F::zero();
    for i in 1..cs.num_variables() {
        lc_a.add_term(Variable(i), F::one());
        lc_b.add_term(Variable(i), F::one());
        sum.add_assign(&full_assignment[i - 1]);
    }
    lc_c.add_term(Variable(cs.num_variables()), F::one());
    cs.add_constraint(R1CSConstraint::new(lc_a, lc_b, lc_c));
    full_assignment.push(sum.square());

    Some(R1CSExample::from_full_assignment(cs, full_assignment))
}

/// Build a satisfiable system over `num_inputs` random bits where every
/// constraint XORs two earlier variables into a fresh auxiliary one:
/// `2u * v = u + v - w`.
///
/// Returns `None` if `num_inputs` is zero.
pub fn generate_r1cs_example_with_binary_input<F: Scalar, R: CryptoRng + RngCore>(
    num_constraints: usize,
    num_inputs: usize,
    rng: &mut R,
) -> Option<R1CSExample<F>> {
    if num_inputs == 0 {
        return None;
    }

    let mut cs = R1CSConstraintSystem::new(num_inputs, num_constraints);
    let mut full_assignment: Vec<F> = (0..num_inputs)
        .map(|_| {
            if rng.next_u32() % 2 == 1 {
                F::one()
            } else {
                F::zero()
            }
        })
        .collect();

    let two = F::from(2u32);
    let minus_one = F::one().neg();
    for i in 0..num_constraints {
        let fresh = Variable(num_inputs + i + 1);
        let range = if i == 0 { num_inputs } else { i };
        let u = rng.next_u32() as usize % range;
        let v = rng.next_u32() as usize % range;

        let mut lc_a = LinearCombination::new();
        let mut lc_b = LinearCombination::new();
        let mut lc_c = LinearCombination::new();
        lc_a.add_term(Variable(u + 1), two);
        lc_b.add_term(Variable(v + 1), F::one());
        if u == v {
            lc_c.add_term(Variable(u + 1), two);
        } else {
            lc_c.add_term(Variable(u + 1), F::one());
            lc_c.add_term(Variable(v + 1), F::one());
        }
        lc_c.add_term(fresh, minus_one);
        cs.add_constraint(R1CSConstraint::new(lc_a, lc_b, lc_c));

        let x = full_assignment[u];
        let y = full_assignment[v];
        full_assignment.push(x + y - x * y - x * y);
    }

    Some(R1CSExample::from_full_assignment(cs, full_assignment))
}
