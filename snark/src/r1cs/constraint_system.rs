use super::{LinearCombination, Variable};
use crate::errors::Result;
use pghr_algebra::prelude::*;

/// A rank-1 constraint `<A, X> * <B, X> = <C, X>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1CSConstraint<F> {
    /// The left factor.
    pub a: LinearCombination<F>,
    /// The right factor.
    pub b: LinearCombination<F>,
    /// The product.
    pub c: LinearCombination<F>,
}

impl<F: Scalar> R1CSConstraint<F> {
    /// Create the constraint `a * b = c`.
    pub fn new(a: LinearCombination<F>, b: LinearCombination<F>, c: LinearCombination<F>) -> Self {
        Self { a, b, c }
    }

    /// Evaluate the constraint under a full assignment, returning `(<A, X>, <B, X>, <C, X>)`.
    pub fn evaluate(&self, assignment: &[F]) -> Result<(F, F, F)> {
        Ok((
            self.a.evaluate(assignment)?,
            self.b.evaluate(assignment)?,
            self.c.evaluate(assignment)?,
        ))
    }
}

/// A rank-1 constraint system.
///
/// The variables are numbered `1..=num_variables()`: first the primary
/// (public) inputs, then the auxiliary (private) inputs. Index 0 is the
/// constant one and is never assigned explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1CSConstraintSystem<F> {
    /// The number of primary inputs.
    pub primary_input_size: usize,
    /// The number of auxiliary inputs.
    pub auxiliary_input_size: usize,
    /// The constraints.
    pub constraints: Vec<R1CSConstraint<F>>,
}

impl<F: Scalar> R1CSConstraintSystem<F> {
    /// Create a constraint system without constraints.
    pub fn new(primary_input_size: usize, auxiliary_input_size: usize) -> Self {
        Self {
            primary_input_size,
            auxiliary_input_size,
            constraints: vec![],
        }
    }

    /// Return the number of primary inputs.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.primary_input_size
    }

    /// Return the number of variables, not counting the constant one.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.primary_input_size + self.auxiliary_input_size
    }

    /// Return the number of constraints.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Append a constraint.
    pub fn add_constraint(&mut self, constraint: R1CSConstraint<F>) {
        self.constraints.push(constraint);
    }

    /// Check that every constraint only refers to declared variables.
    pub fn is_valid(&self) -> bool {
        let n = self.num_variables();
        self.constraints
            .iter()
            .all(|c| c.a.is_valid(n) && c.b.is_valid(n) && c.c.is_valid(n))
    }

    /// Check whether the assignment satisfies every constraint.
    ///
    /// Returns false at the first violated constraint. With the `debug`
    /// feature every constraint is checked and each violation is logged.
    pub fn is_satisfied(&self, primary_input: &[F], auxiliary_input: &[F]) -> bool {
        if primary_input.len() != self.num_inputs() {
            tracing::debug!(
                expected = self.num_inputs(),
                actual = primary_input.len(),
                "primary input has the wrong length"
            );
            return false;
        }
        if primary_input.len() + auxiliary_input.len() != self.num_variables() {
            tracing::debug!(
                expected = self.num_variables(),
                actual = primary_input.len() + auxiliary_input.len(),
                "assignment has the wrong length"
            );
            return false;
        }

        let full_assignment: Vec<F> = primary_input
            .iter()
            .chain(auxiliary_input.iter())
            .copied()
            .collect();

        let mut satisfied = true;
        for (i, constraint) in self.constraints.iter().enumerate() {
            let holds = match constraint.evaluate(&full_assignment) {
                Ok((a, b, c)) => a * b == c,
                Err(_) => false,
            };
            if !holds {
                tracing::debug!(constraint = i, "constraint not satisfied");
                satisfied = false;
                if cfg!(not(feature = "debug")) {
                    break;
                }
            }
        }
        satisfied
    }

    /// Swap A and B in every constraint if that lowers the number of
    /// variables appearing in B, which ends up in G2. Returns whether
    /// the swap happened.
    pub fn swap_ab_if_beneficial(&mut self) -> bool {
        let n = self.num_variables() + 1;
        let mut touched_by_a = vec![false; n];
        let mut touched_by_b = vec![false; n];
        for c in self.constraints.iter() {
            for t in c.a.terms.iter().filter(|t| t.variable.0 < n) {
                touched_by_a[t.variable.0] = true;
            }
            for t in c.b.terms.iter().filter(|t| t.variable.0 < n) {
                touched_by_b[t.variable.0] = true;
            }
        }
        let non_zero_a = touched_by_a.iter().filter(|t| **t).count();
        let non_zero_b = touched_by_b.iter().filter(|t| **t).count();

        if non_zero_b > non_zero_a {
            tracing::debug!(non_zero_a, non_zero_b, "swapping A and B");
            for c in self.constraints.iter_mut() {
                ark_std::mem::swap(&mut c.a, &mut c.b);
            }
            true
        } else {
            false
        }
    }

    /// Return the variables used by the constraints, in increasing order.
    pub fn used_variables(&self) -> Vec<Variable> {
        let mut used = vec![false; self.num_variables() + 1];
        for c in self.constraints.iter() {
            for t in c.a.terms.iter().chain(c.b.terms.iter()).chain(c.c.terms.iter()) {
                if let Some(u) = used.get_mut(t.variable.0) {
                    *u = true;
                }
            }
        }
        used.iter()
            .enumerate()
            .filter(|(_, u)| **u)
            .map(|(i, _)| Variable(i))
            .collect()
    }
}
