use ark_std::{error, fmt};
use pghr_algebra::prelude::AlgebraError;
use pghr_snark::errors::SnarkError;

pub(crate) type Result<T> = core::result::Result<T, PghrError>;

#[derive(Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum PghrError {
    Algebra(AlgebraError),
    Snark(SnarkError),
    SerializationError,
    DeserializationError,
}

impl fmt::Display for PghrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PghrError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            Snark(e) => write!(f, "Snark: {}", e),
            SerializationError => f.write_str("Could not serialize object"),
            DeserializationError => f.write_str("Could not deserialize object"),
        }
    }
}

impl error::Error for PghrError {}

impl From<AlgebraError> for PghrError {
    fn from(e: AlgebraError) -> PghrError {
        PghrError::Algebra(e)
    }
}

impl From<SnarkError> for PghrError {
    fn from(e: SnarkError) -> PghrError {
        match e {
            SnarkError::Algebra(e) => PghrError::Algebra(e),
            e => PghrError::Snark(e),
        }
    }
}
