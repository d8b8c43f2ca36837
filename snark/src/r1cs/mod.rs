use crate::errors::{Result, SnarkError};
use pghr_algebra::prelude::*;

mod constraint_system;
mod example;

pub use constraint_system::{R1CSConstraint, R1CSConstraintSystem};
pub use example::{
    generate_r1cs_example_with_binary_input, generate_r1cs_example_with_field_input, R1CSExample,
};

/// A variable of a constraint system, identified by its index.
/// The index 0 is reserved for the constant one.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Variable(pub usize);

impl Variable {
    /// The variable that is always assigned one.
    pub const ONE: Variable = Variable(0);

    /// Return the index of the variable.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A variable scaled by a coefficient.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearTerm<F> {
    /// The variable.
    pub variable: Variable,
    /// The coefficient.
    pub coeff: F,
}

impl<F: Scalar> LinearTerm<F> {
    /// Create a term `coeff * variable`.
    pub fn new(variable: Variable, coeff: F) -> Self {
        Self { variable, coeff }
    }

    /// Evaluate the term under a variable assignment that excludes the constant one.
    pub fn evaluate(&self, assignment: &[F]) -> Result<F> {
        Ok(variable_value(self.variable, assignment)? * self.coeff)
    }
}

impl<F: Scalar> From<Variable> for LinearTerm<F> {
    fn from(variable: Variable) -> Self {
        Self::new(variable, F::one())
    }
}

impl<F: Scalar> Mul<F> for Variable {
    type Output = LinearTerm<F>;

    fn mul(self, coeff: F) -> LinearTerm<F> {
        LinearTerm::new(self, coeff)
    }
}

impl<'a, F: Scalar> Mul<&'a F> for LinearTerm<F> {
    type Output = LinearTerm<F>;

    fn mul(self, scalar: &'a F) -> LinearTerm<F> {
        LinearTerm::new(self.variable, self.coeff * scalar)
    }
}

impl<F: Scalar> Neg for LinearTerm<F> {
    type Output = LinearTerm<F>;

    fn neg(self) -> LinearTerm<F> {
        LinearTerm::new(self.variable, -self.coeff)
    }
}

impl<F: Scalar> Add for LinearTerm<F> {
    type Output = LinearCombination<F>;

    fn add(self, other: LinearTerm<F>) -> LinearCombination<F> {
        LinearCombination {
            terms: vec![self, other],
        }
    }
}

/// A formal sum of linear terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination<F> {
    /// The terms, in insertion order. A variable may appear more than once.
    pub terms: Vec<LinearTerm<F>>,
}

impl<F> Default for LinearCombination<F> {
    fn default() -> Self {
        Self { terms: vec![] }
    }
}

impl<F: Scalar> LinearCombination<F> {
    /// Create an empty linear combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// A linear combination that evaluates to the constant `value`.
    pub fn constant(value: F) -> Self {
        Self {
            terms: vec![LinearTerm::new(Variable::ONE, value)],
        }
    }

    /// Append `coeff * variable`.
    pub fn add_term(&mut self, variable: Variable, coeff: F) {
        self.terms.push(LinearTerm::new(variable, coeff));
    }

    /// Return the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Return true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check that every variable index is at most `num_variables`.
    pub fn is_valid(&self, num_variables: usize) -> bool {
        self.terms.iter().all(|t| t.variable.0 <= num_variables)
    }

    /// Evaluate under an assignment of the variables `1..=assignment.len()`.
    pub fn evaluate(&self, assignment: &[F]) -> Result<F> {
        let mut acc = F::zero();
        for term in self.terms.iter() {
            acc.add_assign(&term.evaluate(assignment)?);
        }
        Ok(acc)
    }
}

fn variable_value<F: Scalar>(variable: Variable, assignment: &[F]) -> Result<F> {
    if variable == Variable::ONE {
        return Ok(F::one());
    }
    assignment
        .get(variable.0 - 1)
        .copied()
        .ok_or(SnarkError::Algebra(AlgebraError::IndexError))
}

impl<F: Scalar> From<LinearTerm<F>> for LinearCombination<F> {
    fn from(term: LinearTerm<F>) -> Self {
        Self { terms: vec![term] }
    }
}

impl<F: Scalar> From<Variable> for LinearCombination<F> {
    fn from(variable: Variable) -> Self {
        LinearTerm::from(variable).into()
    }
}

impl<F: Scalar> Add for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(mut self, other: LinearCombination<F>) -> LinearCombination<F> {
        self.terms.extend(other.terms);
        self
    }
}

impl<F: Scalar> Add<LinearTerm<F>> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(mut self, term: LinearTerm<F>) -> LinearCombination<F> {
        self.terms.push(term);
        self
    }
}

impl<F: Scalar> Sub for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn sub(self, other: LinearCombination<F>) -> LinearCombination<F> {
        self + (-other)
    }
}

impl<F: Scalar> Neg for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn neg(self) -> LinearCombination<F> {
        Self {
            terms: self.terms.into_iter().map(|t| -t).collect(),
        }
    }
}

impl<'a, F: Scalar> Mul<&'a F> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn mul(self, scalar: &'a F) -> LinearCombination<F> {
        Self {
            terms: self.terms.into_iter().map(|t| t * scalar).collect(),
        }
    }
}
