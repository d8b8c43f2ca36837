use ark_std::{error, fmt};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum AlgebraError {
    BigintOverflow,
    DecompressElementError,
    DeserializationError,
    DivisionByZero,
    IndexError,
    NotASquare,
    NotInSubgroup,
    NotOnCurve,
    ParameterError,
    PointAtInfinity,
    SerializationError,
    ZeroInversion,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AlgebraError::*;
        f.write_str(match self {
            BigintOverflow => "Big integer does not fit in the requested width or bound",
            DecompressElementError => "Could not decompress group element",
            DeserializationError => "Could not deserialize object",
            DivisionByZero => "Big integer division by zero",
            IndexError => "Index out of bounds",
            NotASquare => "Field element is not a quadratic residue",
            NotInSubgroup => "Curve point is not in the prime order subgroup",
            NotOnCurve => "Point does not satisfy the curve equation",
            ParameterError => "Unexpected parameter for method or function",
            PointAtInfinity => "Unexpected point at infinity",
            SerializationError => "Could not serialize object",
            ZeroInversion => "Field element zero is not invertible",
        })
    }
}

impl error::Error for AlgebraError {}
