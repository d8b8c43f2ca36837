use ark_std::{error, fmt, string::String};
use pghr_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, SnarkError>;

#[derive(Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum SnarkError {
    /// Algebra error
    Algebra(AlgebraError),
    /// Error with message
    Message(String),
    /// The constraint system refers to variables it does not declare.
    ConstraintSystemInvalid,
    /// The assignment does not satisfy the constraint system.
    UnsatisfiedConstraintSystem,
    /// The input has a different length than the one the key was built for.
    InputSizeMismatch,
    /// No radix-2 evaluation domain of the requested size exists.
    DomainTooLarge,
    /// The query vectors of a proving key do not fit its constraint system.
    ProvingKeyMismatch,
}

impl fmt::Display for SnarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SnarkError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            Message(e) => f.write_str(e),
            ConstraintSystemInvalid => f.write_str("Constraint system is invalid."),
            UnsatisfiedConstraintSystem => {
                f.write_str("Assignment does not satisfy the constraint system.")
            }
            InputSizeMismatch => f.write_str("Input size mismatch."),
            DomainTooLarge => f.write_str("Evaluation domain is too large for the field."),
            ProvingKeyMismatch => {
                f.write_str("Proving key does not match its constraint system.")
            }
        }
    }
}

impl error::Error for SnarkError {}

impl From<AlgebraError> for SnarkError {
    fn from(e: AlgebraError) -> SnarkError {
        SnarkError::Algebra(e)
    }
}
